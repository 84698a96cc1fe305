//! NN API model types and their mapping onto tensor descriptors.

pub mod pool;
pub mod summary;

use std::fmt;

use crate::error::LayoutError;
use crate::tensor::{DataType, TensorInfo, TensorShape};

pub use pool::{memory_from_pool, memory_from_pool_mut, DataLocation};
pub use summary::{model_summary, operand_summary};

/// Operand types of the NN HAL 1.0 interface. Discriminants are the HAL codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum OperandType {
    Float32 = 0,
    Int32 = 1,
    Uint32 = 2,
    TensorFloat32 = 3,
    TensorInt32 = 4,
    TensorQuant8Asymm = 5,
}

impl OperandType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Float32 => "FLOAT32",
            Self::Int32 => "INT32",
            Self::Uint32 => "UINT32",
            Self::TensorFloat32 => "TENSOR_FLOAT32",
            Self::TensorInt32 => "TENSOR_INT32",
            Self::TensorQuant8Asymm => "TENSOR_QUANT8_ASYMM",
        }
    }
}

impl fmt::Display for OperandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operation types of the NN HAL 1.0 interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum OperationType {
    Add = 0,
    AveragePool2d = 1,
    Concatenation = 2,
    Conv2d = 3,
    DepthwiseConv2d = 4,
    DepthToSpace = 5,
    Dequantize = 6,
    EmbeddingLookup = 7,
    Floor = 8,
    FullyConnected = 9,
    HashtableLookup = 10,
    L2Normalization = 11,
    L2Pool2d = 12,
    LocalResponseNormalization = 13,
    Logistic = 14,
    LshProjection = 15,
    Lstm = 16,
    MaxPool2d = 17,
    Mul = 18,
    Relu = 19,
    Relu1 = 20,
    Relu6 = 21,
    Reshape = 22,
    ResizeBilinear = 23,
    Rnn = 24,
    Softmax = 25,
    SpaceToDepth = 26,
    Svdf = 27,
    Tanh = 28,
}

impl OperationType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::AveragePool2d => "AVERAGE_POOL_2D",
            Self::Concatenation => "CONCATENATION",
            Self::Conv2d => "CONV_2D",
            Self::DepthwiseConv2d => "DEPTHWISE_CONV_2D",
            Self::DepthToSpace => "DEPTH_TO_SPACE",
            Self::Dequantize => "DEQUANTIZE",
            Self::EmbeddingLookup => "EMBEDDING_LOOKUP",
            Self::Floor => "FLOOR",
            Self::FullyConnected => "FULLY_CONNECTED",
            Self::HashtableLookup => "HASHTABLE_LOOKUP",
            Self::L2Normalization => "L2_NORMALIZATION",
            Self::L2Pool2d => "L2_POOL_2D",
            Self::LocalResponseNormalization => "LOCAL_RESPONSE_NORMALIZATION",
            Self::Logistic => "LOGISTIC",
            Self::LshProjection => "LSH_PROJECTION",
            Self::Lstm => "LSTM",
            Self::MaxPool2d => "MAX_POOL_2D",
            Self::Mul => "MUL",
            Self::Relu => "RELU",
            Self::Relu1 => "RELU1",
            Self::Relu6 => "RELU6",
            Self::Reshape => "RESHAPE",
            Self::ResizeBilinear => "RESIZE_BILINEAR",
            Self::Rnn => "RNN",
            Self::Softmax => "SOFTMAX",
            Self::SpaceToDepth => "SPACE_TO_DEPTH",
            Self::Svdf => "SVDF",
            Self::Tanh => "TANH",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An operand as described by the NN runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct Operand {
    pub operand_type: OperandType,
    pub dimensions: Vec<u32>,
    pub scale: f32,
    pub zero_point: i32,
    pub location: DataLocation,
}

impl Operand {
    pub fn new(operand_type: OperandType, dimensions: &[u32]) -> Self {
        Self {
            operand_type,
            dimensions: dimensions.to_vec(),
            scale: 0.0,
            zero_point: 0,
            location: DataLocation::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub operation_type: OperationType,
    pub inputs: Vec<u32>,
    pub outputs: Vec<u32>,
}

/// A model as handed to the driver. Only the parts the driver inspects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    pub operands: Vec<Operand>,
    pub operations: Vec<Operation>,
    pub input_indexes: Vec<u32>,
    pub output_indexes: Vec<u32>,
}

/// Tensor descriptor for a tensor operand.
///
/// Scalar operand types have no tensor equivalent and are rejected with
/// `UnsupportedOperand`.
pub fn tensor_info_for_operand(operand: &Operand) -> Result<TensorInfo, LayoutError> {
    let data_type = match operand.operand_type {
        OperandType::TensorFloat32 => DataType::Float32,
        OperandType::TensorQuant8Asymm => DataType::QuantisedAsymm8,
        OperandType::TensorInt32 => DataType::Signed32,
        other => return Err(LayoutError::UnsupportedOperand(other)),
    };

    let dims: Vec<usize> = operand.dimensions.iter().map(|&d| d as usize).collect();
    let shape = TensorShape::new(&dims)?;

    Ok(TensorInfo::new(shape, data_type).with_quantization(operand.scale, operand.zero_point))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tensor_float32_operand() {
        let operand = Operand::new(OperandType::TensorFloat32, &[1, 224, 224, 3]);
        let info = tensor_info_for_operand(&operand).unwrap();
        assert_eq!(info.data_type(), DataType::Float32);
        assert_eq!(info.shape().dims(), &[1, 224, 224, 3]);
    }

    #[test]
    fn test_quantized_operand_keeps_scale_and_zero_point() {
        let mut operand = Operand::new(OperandType::TensorQuant8Asymm, &[1, 8]);
        operand.scale = 0.0078125;
        operand.zero_point = 128;

        let info = tensor_info_for_operand(&operand).unwrap();
        assert_eq!(info.data_type(), DataType::QuantisedAsymm8);
        assert_eq!(info.quantization_scale(), 0.0078125);
        assert_eq!(info.quantization_offset(), 128);
    }

    #[test]
    fn test_int32_operand() {
        let operand = Operand::new(OperandType::TensorInt32, &[4]);
        let info = tensor_info_for_operand(&operand).unwrap();
        assert_eq!(info.data_type(), DataType::Signed32);
    }

    #[test]
    fn test_scalar_operand_unsupported() {
        let operand = Operand::new(OperandType::Int32, &[]);
        let err = tensor_info_for_operand(&operand).unwrap_err();
        assert!(matches!(err, LayoutError::UnsupportedOperand(OperandType::Int32)));
        assert_eq!(err.to_string(), "Unsupported operand type: INT32");
    }

    #[test]
    fn test_operand_rank_too_high() {
        let operand = Operand::new(OperandType::TensorFloat32, &[1, 2, 3, 4, 5]);
        let err = tensor_info_for_operand(&operand).unwrap_err();
        assert!(matches!(err, LayoutError::UnsupportedRank { actual: 5, .. }));
    }
}
