//! Swizzling of 4D NN tensors between driver and backend layouts.

use tracing::{debug, warn};

use super::{permuted_shape, PermutationVector, PermutedOffsets};
use crate::error::LayoutError;
use crate::tensor::{DataType, TensorInfo};

/// Descriptor of the tensor produced by swizzling `info` with `mappings`.
/// Data type and quantization parameters carry over unchanged.
pub fn swizzled_info(
    info: &TensorInfo,
    mappings: &PermutationVector,
) -> Result<TensorInfo, LayoutError> {
    let shape = permuted_shape(info.shape(), mappings)?;
    Ok(TensorInfo::new(shape, info.data_type())
        .with_quantization(info.quantization_scale(), info.quantization_offset()))
}

/// Copy a rank-4 tensor from `input` into `output`, reordering its axes by
/// `mappings`. `output` is laid out in the permuted shape.
///
/// Fails without touching `output` if the rank is not 4, the data type has
/// no swizzle support, the mapping is not 4-wide, or either buffer is not
/// exactly `info.num_bytes()` long. An empty mapping is a plain copy.
pub fn swizzle_nn4d_tensor(
    info: &TensorInfo,
    input: &[u8],
    output: &mut [u8],
    mappings: &PermutationVector,
) -> Result<(), LayoutError> {
    let rank = info.num_dimensions();
    if rank != 4 {
        return Err(LayoutError::UnsupportedRank {
            expected: "4".to_string(),
            actual: rank,
        });
    }

    let width = match info.data_type() {
        DataType::Float32 => std::mem::size_of::<f32>(),
        DataType::QuantisedAsymm8 => std::mem::size_of::<u8>(),
        DataType::Signed32 => std::mem::size_of::<i32>(),
        other @ (DataType::Float16 | DataType::Boolean) => {
            warn!(data_type = ?other, "Unknown data type for swizzling");
            return Err(LayoutError::UnsupportedDataType(other.code()));
        }
    };

    let expected = info.num_bytes();
    for actual in [input.len(), output.len()] {
        if actual != expected {
            return Err(LayoutError::BufferSize { expected, actual });
        }
    }

    if mappings.is_empty() {
        output.copy_from_slice(input);
        return Ok(());
    }
    if mappings.len() != rank {
        return Err(LayoutError::InvalidPermutation(format!(
            "{} mappings for a 4D tensor",
            mappings.len()
        )));
    }

    debug!(
        shape = %info.shape(),
        data_type = ?info.data_type(),
        mappings = ?mappings.as_slice(),
        "Swizzling 4D tensor"
    );

    for (s, d) in PermutedOffsets::new(info.shape().dims(), mappings) {
        let src = s * width;
        let dst = d * width;
        output[dst..dst + width].copy_from_slice(&input[src..src + width]);
    }
    Ok(())
}
