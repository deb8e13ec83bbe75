//! This module contains the NIfTI-1 data type codes relevant to NRRD
//! conversion. Only the scalar types that both formats can represent are
//! listed; complex, RGB and extended-precision types have no NRRD
//! counterpart and are deliberately absent.

/// Data type for representing a NIfTI value type in a volume.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum NiftiType {
    /// unsigned char.
    // NIFTI_TYPE_UINT8           2
    Uint8 = 2,
    /// signed short.
    // NIFTI_TYPE_INT16           4
    Int16 = 4,
    /// signed int.
    // NIFTI_TYPE_INT32           8
    Int32 = 8,
    /// 32 bit float.
    // NIFTI_TYPE_FLOAT32        16
    Float32 = 16,
    /// 64 bit float = double.
    // NIFTI_TYPE_FLOAT64        64
    Float64 = 64,
    /// signed char.
    // NIFTI_TYPE_INT8          256
    Int8 = 256,
    /// unsigned short.
    // NIFTI_TYPE_UINT16        512
    Uint16 = 512,
    /// unsigned int.
    // NIFTI_TYPE_UINT32        768
    Uint32 = 768,
    /// signed long long.
    // NIFTI_TYPE_INT64        1024
    Int64 = 1024,
    /// unsigned long long.
    // NIFTI_TYPE_UINT64       1280
    Uint64 = 1280,
}

impl NiftiType {
    /// Retrieve the size of an element of this data type, in bytes.
    pub fn size_of(self) -> usize {
        use NiftiType::*;
        match self {
            Int8 | Uint8 => 1,
            Int16 | Uint16 => 2,
            Int32 | Uint32 | Float32 => 4,
            Int64 | Uint64 | Float64 => 8,
        }
    }

    /// Retrieve the number of bits per voxel, as declared in the
    /// header's `bitpix` field.
    pub fn bitpix(self) -> i16 {
        (self.size_of() * 8) as i16
    }
}

#[cfg(test)]
mod tests {
    use super::NiftiType;
    use num_traits::FromPrimitive;

    #[test]
    fn type_codes() {
        assert_eq!(NiftiType::from_i16(4), Some(NiftiType::Int16));
        assert_eq!(NiftiType::from_i16(16), Some(NiftiType::Float32));
        assert_eq!(NiftiType::from_i16(3), None);
    }

    #[test]
    fn type_sizes() {
        assert_eq!(NiftiType::Uint8.size_of(), 1);
        assert_eq!(NiftiType::Float64.size_of(), 8);
        assert_eq!(NiftiType::Int16.bitpix(), 16);
    }
}
