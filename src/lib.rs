pub mod error;
pub mod tensor;
pub mod permute;
pub mod dump;
pub mod nn;
pub mod cli;

pub use error::LayoutError;
pub use tensor::{ConstTensor, DataType, TensorInfo, TensorShape};
pub use permute::{swizzle_nn4d_tensor, PermutationVector};
pub use dump::{dump_tensor, export_network_graph_to_dot_file};
