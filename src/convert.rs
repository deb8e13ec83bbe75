//! The conversion pipeline: decode a NRRD volume, build a NIfTI-1
//! header with a fixed identity spatial transform, and write the
//! output image beside the input.

use crate::error::{DecodeError, EncodeError, Result};
use crate::header::{NiftiHeader, MAGIC_CODE_NIP1};
use crate::nrrd::InMemNrrdVolume;
use crate::writer::write_nifti;
use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// Convert a NRRD (or detached-header NHDR) file to a NIfTI-1 image
/// written beside the input, with the same file stem and a `.nii` (or
/// `.nii.gz`, when `compress` is enabled) extension. Returns the
/// absolute path of the written file.
///
/// The output carries the source's sample values unchanged and an
/// identity 4×4 affine; orientation, spacing and origin metadata from
/// the NRRD header are deliberately not transferred.
///
/// # Example
///
/// ```no_run
/// # fn run() -> nrrd2nii::Result<()> {
/// let out = nrrd2nii::convert("image.nrrd", false)?;
/// assert!(out.ends_with("image.nii"));
/// # Ok(())
/// # }
/// ```
pub fn convert<P: AsRef<Path>>(input_path: P, compress: bool) -> Result<PathBuf> {
    let input = absolute(input_path.as_ref()).map_err(DecodeError::from)?;
    let output = output_path(&input, compress)
        .ok_or_else(|| DecodeError::UnrecognizedExtension(input.clone()))?;

    let volume = InMemNrrdVolume::with_file(&input)?;
    let header = identity_header(&volume)?;
    write_nifti(&output, &volume, &header)?;
    Ok(output)
}

/// Resolve a path to its absolute form against the current directory,
/// without touching the file system.
fn absolute(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}

/// Derive the output path by replacing a recognized input extension
/// (".nrrd" or ".nhdr", case insensitive) with the output extension.
/// Returns `None` for paths with any other extension.
fn output_path(input: &Path, compress: bool) -> Option<PathBuf> {
    let ext = input.extension()?.to_str()?;
    if !ext.eq_ignore_ascii_case("nrrd") && !ext.eq_ignore_ascii_case("nhdr") {
        return None;
    }
    Some(input.with_extension(if compress { "nii.gz" } else { "nii" }))
}

/// Build a NIfTI-1 header describing the volume's shape and element
/// type, with the identity transform in the sform fields.
fn identity_header(volume: &InMemNrrdVolume) -> Result<NiftiHeader, EncodeError> {
    let sizes = volume.sizes();
    if sizes.len() > 7 || sizes.iter().any(|&s| s > i16::max_value() as usize) {
        return Err(EncodeError::UnrepresentableShape);
    }

    let mut dim = [1; 8];
    dim[0] = sizes.len() as u16;
    for (d, s) in dim[1..].iter_mut().zip(sizes) {
        *d = *s as u16;
    }
    let mut pixdim = [0.; 8];
    for p in &mut pixdim[..=sizes.len()] {
        *p = 1.;
    }

    let datatype = volume.data_type();
    Ok(NiftiHeader {
        dim,
        pixdim,
        datatype: datatype as i16,
        bitpix: datatype.bitpix(),
        // identity affine, in the "aligned" coordinate interpretation
        sform_code: 2,
        qform_code: 0,
        srow_x: [1., 0., 0., 0.],
        srow_y: [0., 1., 0., 0.],
        srow_z: [0., 0., 1., 0.],
        magic: *MAGIC_CODE_NIP1,
        ..NiftiHeader::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nrrd::{Encoding, NrrdHeader};
    use crate::typedef::NiftiType;
    use crate::util::Endianness;
    use pretty_assertions::assert_eq;

    #[test]
    fn output_path_nrrd() {
        assert_eq!(
            output_path(Path::new("/data/scan.nrrd"), false),
            Some(PathBuf::from("/data/scan.nii"))
        );
        assert_eq!(
            output_path(Path::new("/data/scan.nrrd"), true),
            Some(PathBuf::from("/data/scan.nii.gz"))
        );
    }

    #[test]
    fn output_path_nhdr() {
        assert_eq!(
            output_path(Path::new("/data/scan.nhdr"), false),
            Some(PathBuf::from("/data/scan.nii"))
        );
        assert_eq!(
            output_path(Path::new("/data/SCAN.NHDR"), true),
            Some(PathBuf::from("/data/SCAN.nii.gz"))
        );
    }

    #[test]
    fn output_path_rejects_other_extensions() {
        assert_eq!(output_path(Path::new("/data/scan.mhd"), false), None);
        assert_eq!(output_path(Path::new("/data/scan"), false), None);
        assert_eq!(output_path(Path::new("/data/scan.nii"), true), None);
    }

    fn volume_of(sizes: Vec<usize>, datatype: NiftiType) -> InMemNrrdVolume {
        let header = NrrdHeader {
            version: 4,
            sizes,
            datatype,
            encoding: Encoding::Raw,
            endianness: Endianness::LE,
            data_file: None,
            byte_skip: 0,
            line_skip: 0,
        };
        let data = vec![0u8; header.data_len().unwrap()];
        InMemNrrdVolume::from_stream(&data[..], &header).unwrap()
    }

    #[test]
    fn header_for_3d_int16() {
        let volume = volume_of(vec![4, 3, 2], NiftiType::Int16);
        let h = identity_header(&volume).unwrap();
        assert_eq!(h.dim, [3, 4, 3, 2, 1, 1, 1, 1]);
        assert_eq!(h.datatype, NiftiType::Int16 as i16);
        assert_eq!(h.bitpix, 16);
        assert_eq!(h.pixdim, [1., 1., 1., 1., 0., 0., 0., 0.]);
        assert_eq!(h.srow_x, [1., 0., 0., 0.]);
        assert_eq!(h.srow_y, [0., 1., 0., 0.]);
        assert_eq!(h.srow_z, [0., 0., 1., 0.]);
        assert_eq!(h.sform_code, 2);
        assert_eq!(h.qform_code, 0);
        assert_eq!(h.vox_offset, 352.);
    }

    #[test]
    fn header_rejects_excessive_rank() {
        let volume = volume_of(vec![1; 8], NiftiType::Uint8);
        let e = identity_header(&volume).unwrap_err();
        assert!(matches!(e, EncodeError::UnrepresentableShape));
    }
}
