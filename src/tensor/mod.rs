//! Tensor descriptors shared by the swizzle engine and the dump serializer.
//!
//! A [`TensorInfo`] describes shape and element type; a [`ConstTensor`] pairs
//! one with a borrowed, row-major byte buffer. Neither owns pixel data and
//! neither outlives the call that uses it.

pub mod strides;

use std::fmt;
use std::ops::Index;

use crate::error::LayoutError;

pub use strides::Strides;

/// Highest rank accepted by [`TensorShape`].
pub const MAX_RANK: usize = 4;

/// Element data type of a tensor.
///
/// The discriminants are the stable numeric codes reported in diagnostics.
/// Only `Float32`, `QuantisedAsymm8` and `Signed32` are handled by the
/// swizzle and dump paths; the others exist so descriptors can carry them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum DataType {
    Float16 = 0,
    Float32 = 1,
    QuantisedAsymm8 = 2,
    Signed32 = 3,
    Boolean = 4,
}

impl DataType {
    /// Convert a raw type code into a `DataType`.
    pub fn from_u32(v: u32) -> Result<Self, LayoutError> {
        match v {
            0 => Ok(Self::Float16),
            1 => Ok(Self::Float32),
            2 => Ok(Self::QuantisedAsymm8),
            3 => Ok(Self::Signed32),
            4 => Ok(Self::Boolean),
            _ => Err(LayoutError::UnsupportedDataType(v)),
        }
    }

    pub fn code(self) -> u32 {
        self as u32
    }

    /// Size in bytes of one element.
    pub fn size_in_bytes(self) -> usize {
        match self {
            Self::Float16 => 2,
            Self::Float32 => 4,
            Self::QuantisedAsymm8 => 1,
            Self::Signed32 => 4,
            Self::Boolean => 1,
        }
    }
}

/// Per-axis extents of a tensor of rank 1 to [`MAX_RANK`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TensorShape {
    dims: Vec<usize>,
}

impl TensorShape {
    pub fn new(dims: &[usize]) -> Result<Self, LayoutError> {
        if dims.is_empty() || dims.len() > MAX_RANK {
            return Err(LayoutError::UnsupportedRank {
                expected: format!("1..={}", MAX_RANK),
                actual: dims.len(),
            });
        }
        Ok(Self {
            dims: dims.to_vec(),
        })
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn num_elements(&self) -> usize {
        self.dims.iter().product()
    }

    /// Row-major strides of a contiguous buffer with this shape.
    pub fn strides(&self) -> Strides {
        Strides::row_major(&self.dims)
    }
}

impl Index<usize> for TensorShape {
    type Output = usize;

    fn index(&self, axis: usize) -> &usize {
        &self.dims[axis]
    }
}

/// Formats as `[d0,d1,...]`, the form used in dump headers.
impl fmt::Display for TensorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, "]")
    }
}

/// Shape, element type and quantization parameters of a tensor.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorInfo {
    shape: TensorShape,
    data_type: DataType,
    quantization_scale: f32,
    quantization_offset: i32,
}

impl TensorInfo {
    pub fn new(shape: TensorShape, data_type: DataType) -> Self {
        Self {
            shape,
            data_type,
            quantization_scale: 0.0,
            quantization_offset: 0,
        }
    }

    /// Attach asymmetric quantization parameters.
    pub fn with_quantization(mut self, scale: f32, offset: i32) -> Self {
        self.quantization_scale = scale;
        self.quantization_offset = offset;
        self
    }

    pub fn shape(&self) -> &TensorShape {
        &self.shape
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn quantization_scale(&self) -> f32 {
        self.quantization_scale
    }

    pub fn quantization_offset(&self) -> i32 {
        self.quantization_offset
    }

    pub fn num_dimensions(&self) -> usize {
        self.shape.rank()
    }

    pub fn num_elements(&self) -> usize {
        self.shape.num_elements()
    }

    /// Byte size of a contiguous buffer holding this tensor.
    pub fn num_bytes(&self) -> usize {
        self.num_elements() * self.data_type.size_in_bytes()
    }
}

/// A read-only view of a tensor: descriptor plus caller-owned bytes.
#[derive(Debug, Clone, Copy)]
pub struct ConstTensor<'a> {
    info: &'a TensorInfo,
    data: &'a [u8],
}

impl<'a> ConstTensor<'a> {
    /// Returns `BufferSize` if `data` is not exactly `info.num_bytes()` long.
    pub fn new(info: &'a TensorInfo, data: &'a [u8]) -> Result<Self, LayoutError> {
        if data.len() != info.num_bytes() {
            return Err(LayoutError::BufferSize {
                expected: info.num_bytes(),
                actual: data.len(),
            });
        }
        Ok(Self { info, data })
    }

    pub fn info(&self) -> &'a TensorInfo {
        self.info
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Raw bytes of the element at linear `index`.
    ///
    /// # Panics
    /// Panics if `index` is not below the element count.
    pub fn element_bytes(&self, index: usize) -> &'a [u8] {
        let width = self.info.data_type().size_in_bytes();
        let start = index * width;
        &self.data[start..start + width]
    }
}
