//! Conversion of NRRD volumetric images to the NIfTI-1 file format.
//!
//! The input may be an attached NRRD file (".nrrd") or a detached
//! header (".nhdr") with its raw data file beside it. The output is a
//! NIfTI-1 image (".nii", or ".nii.gz" when compression is requested)
//! written next to the input with the same file stem. Sample values are
//! carried over unchanged; the output's spatial transform is a fixed
//! identity affine, and no orientation or spacing metadata is
//! transferred from the source header.
//!
//! # Example
//!
//! ```no_run
//! # fn run() -> nrrd2nii::Result<()> {
//! let out_file = nrrd2nii::convert("image.nrrd", false)?;
//! # Ok(())
//! # }
//! ```
#![deny(missing_debug_implementations)]
#![warn(missing_docs, unused_extern_crates, trivial_casts, unused_results)]

#[macro_use]
extern crate quick_error;
#[macro_use]
extern crate num_derive;

pub mod convert;
pub mod error;
pub mod header;
pub mod nrrd;
pub mod typedef;
pub mod writer;
mod util;

pub use crate::convert::convert;
pub use crate::error::{ConvertError, DecodeError, EncodeError, Result};
pub use crate::header::NiftiHeader;
pub use crate::nrrd::{InMemNrrdVolume, NrrdHeader};
pub use crate::typedef::NiftiType;
pub use crate::util::Endianness;
