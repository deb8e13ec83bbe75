//! Module holding an in-memory representation of a NRRD volume's
//! sample data.

use crate::error::DecodeError;
use crate::nrrd::header::{Encoding, NrrdHeader};
use crate::typedef::NiftiType;
use crate::util::{swap_bytes_in_place, Endianness};
use flate2::bufread::GzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// A NRRD volume fully decoded into memory. The sample data is kept in
/// the file's original axis order (fastest axis first) and normalized to
/// little endian, which is the layout the NIfTI-1 writer emits verbatim.
#[derive(Debug, PartialEq, Clone)]
pub struct InMemNrrdVolume {
    sizes: Vec<usize>,
    datatype: NiftiType,
    raw_data: Vec<u8>,
}

impl InMemNrrdVolume {
    /// Decode a NRRD volume from a file. Attached files (".nrrd") carry
    /// their data in the same stream; detached headers (".nhdr") name a
    /// data file, which is resolved relative to the header's directory.
    pub fn with_file<P: AsRef<Path>>(path: P) -> Result<Self, DecodeError> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);
        let header = NrrdHeader::from_stream(&mut reader)?;

        match header.data_file {
            Some(ref name) => {
                let data_path = match path.parent() {
                    Some(dir) => dir.join(name),
                    None => name.clone(),
                };
                let file = File::open(data_path).map_err(DecodeError::MissingDataFile)?;
                Self::from_stream(BufReader::new(file), &header)
            }
            None => Self::from_stream(reader, &header),
        }
    }

    /// Decode the sample data from a stream positioned at the start of
    /// the (possibly compressed) data, according to a parsed header.
    pub fn from_stream<R: BufRead>(mut source: R, header: &NrrdHeader) -> Result<Self, DecodeError> {
        for _ in 0..header.line_skip {
            skip_line(&mut source)?;
        }

        let expected = header.data_len()?;
        let mut raw_data = Vec::with_capacity(expected);
        match header.encoding {
            Encoding::Raw => {
                skip_bytes(&mut source, header.byte_skip)?;
                let _ = source.read_to_end(&mut raw_data)?;
            }
            Encoding::Gzip => {
                let mut decoder = GzDecoder::new(source);
                skip_bytes(&mut decoder, header.byte_skip)?;
                let _ = decoder.read_to_end(&mut raw_data)?;
            }
        }
        if raw_data.len() != expected {
            return Err(DecodeError::IncompatibleLength(raw_data.len(), expected));
        }

        if header.endianness != Endianness::LE {
            swap_bytes_in_place(&mut raw_data, header.datatype.size_of());
        }

        Ok(InMemNrrdVolume {
            sizes: header.sizes.clone(),
            datatype: header.datatype,
            raw_data,
        })
    }

    /// Get the axis sizes of the volume, fastest axis first.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Get the volume's number of axes.
    pub fn dimensionality(&self) -> usize {
        self.sizes.len()
    }

    /// Get this volume's element data type.
    pub fn data_type(&self) -> NiftiType {
        self.datatype
    }

    /// Retrieve a reference to the raw sample data, in little endian.
    pub fn raw_data(&self) -> &[u8] {
        &self.raw_data
    }
}

fn skip_line<R: BufRead>(source: &mut R) -> io::Result<()> {
    let mut sink = Vec::new();
    let _ = source.read_until(b'\n', &mut sink)?;
    Ok(())
}

fn skip_bytes<R: Read>(source: &mut R, n: usize) -> io::Result<()> {
    let skipped = io::copy(&mut source.take(n as u64), &mut io::sink())?;
    if skipped < n as u64 {
        Err(io::ErrorKind::UnexpectedEof.into())
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn attached(header: &str, data: &[u8]) -> Vec<u8> {
        let mut file = Vec::from(header.as_bytes());
        file.extend_from_slice(data);
        file
    }

    #[test]
    fn raw_attached_data() {
        let file = attached(
            "NRRD0004\ntype: uint8\nsizes: 3 2\nencoding: raw\n\n",
            &[1, 2, 3, 4, 5, 6],
        );
        let mut cursor = &file[..];
        let header = NrrdHeader::from_stream(&mut cursor).unwrap();
        let volume = InMemNrrdVolume::from_stream(cursor, &header).unwrap();
        assert_eq!(volume.sizes(), &[3, 2]);
        assert_eq!(volume.dimensionality(), 2);
        assert_eq!(volume.data_type(), NiftiType::Uint8);
        assert_eq!(volume.raw_data(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn gzip_data_with_byte_skip() {
        let samples: Vec<u8> = (0..16).collect();
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&[0xFF; 4]).unwrap();
        encoder.write_all(&samples).unwrap();
        let compressed = encoder.finish().unwrap();

        let header = NrrdHeader {
            version: 4,
            sizes: vec![4, 4],
            datatype: NiftiType::Uint8,
            encoding: Encoding::Gzip,
            endianness: Endianness::LE,
            data_file: None,
            byte_skip: 4,
            line_skip: 0,
        };
        let volume = InMemNrrdVolume::from_stream(&compressed[..], &header).unwrap();
        assert_eq!(volume.raw_data(), &samples[..]);
    }

    #[test]
    fn big_endian_data_is_normalized() {
        let header = NrrdHeader {
            version: 4,
            sizes: vec![2],
            datatype: NiftiType::Int16,
            encoding: Encoding::Raw,
            endianness: Endianness::BE,
            data_file: None,
            byte_skip: 0,
            line_skip: 0,
        };
        let be_data: &[u8] = &[0x01, 0x02, 0x03, 0x04];
        let volume = InMemNrrdVolume::from_stream(be_data, &header).unwrap();
        assert_eq!(volume.raw_data(), &[0x02, 0x01, 0x04, 0x03]);
    }

    #[test]
    fn short_data_is_rejected() {
        let file = attached("NRRD0004\ntype: uint8\nsizes: 3 2\nencoding: raw\n\n", &[1, 2]);
        let mut cursor = &file[..];
        let header = NrrdHeader::from_stream(&mut cursor).unwrap();
        let e = InMemNrrdVolume::from_stream(cursor, &header).unwrap_err();
        match e {
            DecodeError::IncompatibleLength(got, expected) => {
                assert_eq!(got, 2);
                assert_eq!(expected, 6);
            }
            e => panic!("unexpected error {:?}", e),
        }
    }
}
