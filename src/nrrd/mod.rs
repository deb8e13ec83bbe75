//! Module for decoding NRRD volume files, in both the attached (".nrrd")
//! and detached header (".nhdr" plus raw data file) layouts.

pub mod header;
pub mod volume;

pub use self::header::{Encoding, NrrdHeader};
pub use self::volume::InMemNrrdVolume;
