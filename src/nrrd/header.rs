//! This module defines the `NrrdHeader` struct and the parsing of the
//! NRRD text header, up to (but not including) the start of the data.
//!
//! The header is a sequence of ASCII lines terminated by an empty line
//! (or by the end of the file, for detached headers): a magic line
//! `NRRD000X`, comment lines starting with `#`, field descriptors of the
//! form `field: value`, and key/value pairs of the form `key:=value`.
//! Per the format's rules, unrecognized fields and all key/value pairs
//! are skipped. Only the fields that affect how the sample data is read
//! are retained.

use crate::error::DecodeError;
use crate::typedef::NiftiType;
use crate::util::Endianness;
use std::io::BufRead;
use std::path::PathBuf;

/// Data encodings this reader understands. Other encodings declared by
/// the format (`ascii`, `hex`, `bzip2`) are reported as unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Samples appear verbatim in the data stream.
    Raw,
    /// The data stream is a Gzip-compressed sequence of raw samples.
    Gzip,
}

/// The parsed form of a NRRD header, reduced to the fields which govern
/// the interpretation of the sample data.
#[derive(Debug, Clone, PartialEq)]
pub struct NrrdHeader {
    /// NRRD format version from the magic line (1 through 5).
    pub version: u8,
    /// Axis sizes, fastest axis first (the axis order NIfTI-1 also uses).
    pub sizes: Vec<usize>,
    /// The element type, already mapped to its NIfTI-1 counterpart.
    pub datatype: NiftiType,
    /// How the sample data is encoded.
    pub encoding: Encoding,
    /// Byte order of the sample data. Single-byte types carry no byte
    /// order and default to little endian.
    pub endianness: Endianness,
    /// Detached data file named by the header, if any. Relative names are
    /// resolved against the header file's directory by the volume reader.
    pub data_file: Option<PathBuf>,
    /// Bytes to skip before the samples, applied after decompression.
    pub byte_skip: usize,
    /// Lines to skip at the start of the data stream.
    pub line_skip: usize,
}

impl NrrdHeader {
    /// Parse a NRRD header from the given stream, leaving the stream
    /// positioned at the first byte after the header's terminating empty
    /// line. For attached files that position is the start of the data.
    pub fn from_stream<S: BufRead>(input: &mut S) -> Result<NrrdHeader, DecodeError> {
        let magic = read_line(input)?.ok_or(DecodeError::InvalidFormat)?;
        let version = parse_magic(&magic)?;

        let mut sizes: Option<Vec<usize>> = None;
        let mut dimension: Option<usize> = None;
        let mut datatype: Option<NiftiType> = None;
        let mut encoding: Option<Encoding> = None;
        let mut endianness: Option<Endianness> = None;
        let mut data_file: Option<PathBuf> = None;
        let mut byte_skip = 0;
        let mut line_skip = 0;

        while let Some(line) = read_line(input)? {
            if line.is_empty() {
                // empty line ends the header
                break;
            }
            if line.starts_with('#') {
                continue;
            }
            let (field, value) = match split_field(&line) {
                Some(fv) => fv,
                // key/value pairs (`key:=value`, no space after the
                // colon) carry no reading semantics
                None if line.contains(":=") => continue,
                None => return Err(DecodeError::InvalidFormat),
            };
            match field.to_ascii_lowercase().as_str() {
                "dimension" => {
                    dimension = Some(
                        value
                            .parse()
                            .map_err(|_| DecodeError::InvalidField("dimension"))?,
                    );
                }
                "sizes" => {
                    let parsed: Result<Vec<usize>, _> =
                        value.split_whitespace().map(str::parse).collect();
                    let parsed = parsed.map_err(|_| DecodeError::InvalidField("sizes"))?;
                    if parsed.is_empty() || parsed.iter().any(|&s| s == 0) {
                        return Err(DecodeError::InvalidField("sizes"));
                    }
                    sizes = Some(parsed);
                }
                "type" => {
                    datatype = Some(
                        parse_type(value)
                            .ok_or_else(|| DecodeError::UnsupportedType(value.to_owned()))?,
                    );
                }
                "encoding" => {
                    encoding = Some(match value.to_ascii_lowercase().as_str() {
                        "raw" => Encoding::Raw,
                        "gzip" | "gz" => Encoding::Gzip,
                        _ => return Err(DecodeError::UnsupportedEncoding(value.to_owned())),
                    });
                }
                "endian" => {
                    endianness = Some(match value.to_ascii_lowercase().as_str() {
                        "little" => Endianness::LE,
                        "big" => Endianness::BE,
                        _ => return Err(DecodeError::InvalidField("endian")),
                    });
                }
                "data file" | "datafile" => {
                    data_file = Some(PathBuf::from(value));
                }
                "byte skip" | "byteskip" => {
                    byte_skip = value
                        .parse()
                        .map_err(|_| DecodeError::InvalidField("byte skip"))?;
                }
                "line skip" | "lineskip" => {
                    line_skip = value
                        .parse()
                        .map_err(|_| DecodeError::InvalidField("line skip"))?;
                }
                // spacing, orientation and the other per-axis fields are
                // not transferred to the output image
                _ => (),
            }
        }

        let sizes = sizes.ok_or(DecodeError::MissingField("sizes"))?;
        let datatype = datatype.ok_or(DecodeError::MissingField("type"))?;
        let encoding = encoding.ok_or(DecodeError::MissingField("encoding"))?;

        if let Some(d) = dimension {
            if d != sizes.len() {
                return Err(DecodeError::InvalidField("dimension"));
            }
        }
        let endianness = match endianness {
            Some(e) => e,
            None if datatype.size_of() == 1 => Endianness::LE,
            None => return Err(DecodeError::MissingField("endian")),
        };

        Ok(NrrdHeader {
            version,
            sizes,
            datatype,
            encoding,
            endianness,
            data_file,
            byte_skip,
            line_skip,
        })
    }

    /// The total number of bytes of sample data declared by this header.
    /// Fails on shapes whose byte count does not fit in a `usize`.
    pub fn data_len(&self) -> Result<usize, DecodeError> {
        self.sizes
            .iter()
            .try_fold(self.datatype.size_of(), |acc, &s| acc.checked_mul(s))
            .ok_or(DecodeError::InvalidField("sizes"))
    }
}

/// Read one text line from the stream without consuming anything past its
/// line feed. Returns `None` at the end of the stream.
fn read_line<S: BufRead>(input: &mut S) -> Result<Option<String>, DecodeError> {
    let mut buf = Vec::new();
    let n = input.read_until(b'\n', &mut buf)?;
    if n == 0 {
        return Ok(None);
    }
    while buf.last() == Some(&b'\n') || buf.last() == Some(&b'\r') {
        let _ = buf.pop();
    }
    String::from_utf8(buf)
        .map(Some)
        .map_err(|_| DecodeError::InvalidFormat)
}

/// Validate the `NRRD000X` magic line, returning the format version.
fn parse_magic(line: &str) -> Result<u8, DecodeError> {
    let version = line
        .strip_prefix("NRRD000")
        .and_then(|v| v.parse::<u8>().ok());
    match version {
        Some(v) if (1..=5).contains(&v) => Ok(v),
        _ => Err(DecodeError::InvalidFormat),
    }
}

/// Split a `field: value` descriptor line. The separator is a colon
/// followed by whitespace, which distinguishes it from the `:=` of
/// key/value pairs.
fn split_field(line: &str) -> Option<(&str, &str)> {
    let colon = line.find(": ")?;
    let field = line[..colon].trim();
    let value = line[colon + 2..].trim();
    if field.is_empty() || value.is_empty() {
        None
    } else {
        Some((field, value))
    }
}

/// Map a NRRD element type name, in any of its aliases, to the
/// corresponding NIfTI-1 data type.
fn parse_type(value: &str) -> Option<NiftiType> {
    let t = match value.to_ascii_lowercase().as_str() {
        "signed char" | "int8" | "int8_t" => NiftiType::Int8,
        "uchar" | "unsigned char" | "uint8" | "uint8_t" => NiftiType::Uint8,
        "short" | "short int" | "signed short" | "signed short int" | "int16" | "int16_t" => {
            NiftiType::Int16
        }
        "ushort" | "unsigned short" | "unsigned short int" | "uint16" | "uint16_t" => {
            NiftiType::Uint16
        }
        "int" | "signed int" | "int32" | "int32_t" => NiftiType::Int32,
        "uint" | "unsigned int" | "uint32" | "uint32_t" => NiftiType::Uint32,
        "longlong" | "long long" | "long long int" | "signed long long"
        | "signed long long int" | "int64" | "int64_t" => NiftiType::Int64,
        "ulonglong" | "unsigned long long" | "unsigned long long int" | "uint64" | "uint64_t" => {
            NiftiType::Uint64
        }
        "float" => NiftiType::Float32,
        "double" => NiftiType::Float64,
        _ => return None,
    };
    Some(t)
}
