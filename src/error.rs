//! Error types for NRRD decoding, NIfTI encoding, and the conversion
//! pipeline tying them together.

use std::io::Error as IOError;
use std::path::PathBuf;

quick_error! {
    /// Error type for failures while decoding the source NRRD file.
    #[derive(Debug)]
    pub enum DecodeError {
        /// The file does not start with a recognized magic code, or its
        /// header is not well formed.
        InvalidFormat {
            display("Invalid image file")
        }
        /// A field required by the header's declarations is absent.
        MissingField(name: &'static str) {
            display("Missing required NRRD field `{}`", name)
        }
        /// A field is present but its value could not be interpreted.
        InvalidField(name: &'static str) {
            display("Invalid value for NRRD field `{}`", name)
        }
        /// The declared element type has no NIfTI-1 counterpart.
        UnsupportedType(t: String) {
            display("Unsupported NRRD element type `{}`", t)
        }
        /// The declared data encoding is not handled by this reader.
        UnsupportedEncoding(e: String) {
            display("Unsupported NRRD encoding `{}`", e)
        }
        /// A detached header's data file could not be opened.
        MissingDataFile(err: IOError) {
            source(err)
            display("Could not open detached data file: {}", err)
        }
        /// The data stream did not contain as many bytes as the header
        /// declared.
        IncompatibleLength(got: usize, expected: usize) {
            display("Data length mismatch: got {} bytes, expected {}", got, expected)
        }
        /// The input path does not carry a recognized NRRD extension.
        UnrecognizedExtension(path: PathBuf) {
            display("Not a `.nrrd` or `.nhdr` file: {}", path.display())
        }
        /// I/O error while reading the source.
        Io(err: IOError) {
            from()
            source(err)
            display("{}", err)
        }
    }
}

quick_error! {
    /// Error type for failures while encoding the output NIfTI-1 file.
    #[derive(Debug)]
    pub enum EncodeError {
        /// The volume's shape cannot be represented in a NIfTI-1 header
        /// (more than 7 axes, or an axis longer than `i16::MAX`).
        UnrepresentableShape {
            display("Volume shape cannot be represented in NIfTI-1")
        }
        /// I/O error while writing the output.
        Io(err: IOError) {
            from()
            source(err)
            display("{}", err)
        }
    }
}

quick_error! {
    /// Top-level error type returned by a conversion.
    #[derive(Debug)]
    pub enum ConvertError {
        /// The source volume could not be decoded.
        Decode(err: DecodeError) {
            from()
            source(err)
            display("{}", err)
        }
        /// The output image could not be written.
        Encode(err: EncodeError) {
            from()
            source(err)
            display("{}", err)
        }
    }
}

/// Alias type for results originated from this crate.
pub type Result<T, E = ConvertError> = ::std::result::Result<T, E>;
