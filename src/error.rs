use thiserror::Error;

use crate::nn::OperandType;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported tensor rank {actual} (expected {expected})")]
    UnsupportedRank { expected: String, actual: usize },

    #[error("Unsupported data type: {0}")]
    UnsupportedDataType(u32),

    #[error("Invalid permutation: {0}")]
    InvalidPermutation(String),

    #[error("Buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Unsupported operand type: {0}")]
    UnsupportedOperand(OperandType),

    #[error("Memory pool index {index} out of range ({pools} pools)")]
    PoolIndexOutOfRange { index: usize, pools: usize },

    #[error("Memory pool range {offset}+{length} exceeds pool of {pool_size} bytes")]
    PoolRangeOutOfBounds {
        offset: usize,
        length: usize,
        pool_size: usize,
    },
}
