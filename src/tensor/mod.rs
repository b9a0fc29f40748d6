//! Tensor metadata: element types and descriptors
//!
//! Element-type tags mirror the ONNX `TensorProto.DataType` enumeration so
//! that models imported from ONNX keep their numeric tags unchanged.

use crate::error::{OptError, OptResult};

/// Tensor element type
///
/// Discriminants match the ONNX `TensorProto.DataType` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ElemType {
    /// Undefined / unknown
    Undefined = 0,
    /// 32-bit float
    Float = 1,
    /// Unsigned 8-bit integer
    Uint8 = 2,
    /// Signed 8-bit integer
    Int8 = 3,
    /// Unsigned 16-bit integer
    Uint16 = 4,
    /// Signed 16-bit integer
    Int16 = 5,
    /// Signed 32-bit integer
    Int32 = 6,
    /// Signed 64-bit integer
    Int64 = 7,
    /// 16-bit float
    Float16 = 10,
    /// 64-bit float
    Double = 11,
}

impl ElemType {
    /// Convert an i32 tag to an `ElemType`
    pub fn from_i32(value: i32) -> OptResult<Self> {
        match value {
            0 => Ok(ElemType::Undefined),
            1 => Ok(ElemType::Float),
            2 => Ok(ElemType::Uint8),
            3 => Ok(ElemType::Int8),
            4 => Ok(ElemType::Uint16),
            5 => Ok(ElemType::Int16),
            6 => Ok(ElemType::Int32),
            7 => Ok(ElemType::Int64),
            10 => Ok(ElemType::Float16),
            11 => Ok(ElemType::Double),
            _ => Err(OptError::InvalidDataType(value)),
        }
    }

    /// Check if this is an 8-bit quantized integer type
    pub fn is_quantized_int(self) -> bool {
        matches!(self, ElemType::Uint8 | ElemType::Int8)
    }

    /// Check if this is a floating point type
    pub fn is_float(self) -> bool {
        matches!(self, ElemType::Float | ElemType::Float16 | ElemType::Double)
    }
}

/// Tensor descriptor: a named value with an element type
///
/// Node input/output slots carry these. An *optional* input slot that is not
/// provided is modeled as `None` at the slot level, never as a descriptor
/// with an empty name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TensorDef {
    /// Tensor name, unique within the owning graph
    pub name: String,
    /// Element type tag
    pub elem_type: ElemType,
}

impl TensorDef {
    /// Create a new tensor descriptor
    pub fn new(name: impl Into<String>, elem_type: ElemType) -> Self {
        Self {
            name: name.into(),
            elem_type,
        }
    }
}
