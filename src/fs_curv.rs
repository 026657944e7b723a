//! Functions for managing FreeSurfer per-vertex data in binary 'curv' files.
//!
//! These files store 1 scalar value for each vertex of the respective brain surface mesh.
//! For painting, the relevant one is the sulcal depth map (`?h.sulc`), which serves as
//! background shading for vertices without a score.

use byteordered::ByteOrdered;

use std::io::Read;
use std::path::Path;

use crate::error::{NeuropaintError, Result};
use crate::util::{capacity_hint, open_maybe_gz};

pub const CURV_MAGIC_FILE_TYPE_NUMBER: [u8; 3] = [255; 3];

#[derive(Debug, Clone, PartialEq)]
pub struct CurvHeader {
    pub curv_magic: [u8; 3],
    pub num_vertices: i32,
    pub num_faces: i32,
    pub num_values_per_vertex: i32,
}


impl Default for CurvHeader {
    fn default() -> CurvHeader {
        CurvHeader {
            curv_magic: CURV_MAGIC_FILE_TYPE_NUMBER,
            num_vertices: 0,
            num_faces: 0,
            num_values_per_vertex: 1,
        }
    }
}

impl CurvHeader {

    /// Read a Curv header from the given byte stream.
    /// It is assumed that the input is currently at the start of the
    /// Curv header.
    pub fn from_reader<S>(input: &mut S) -> Result<CurvHeader>
    where
        S: Read,
    {
        let mut hdr = CurvHeader::default();
        let mut input = ByteOrdered::be(input);

        for v in &mut hdr.curv_magic {
            *v = input.read_u8()?;
        }
        if hdr.curv_magic != CURV_MAGIC_FILE_TYPE_NUMBER {
            return Err(NeuropaintError::InvalidCurvFormat);
        }

        hdr.num_vertices = input.read_i32()?;
        hdr.num_faces = input.read_i32()?;
        hdr.num_values_per_vertex = input.read_i32()?;

        if hdr.num_vertices < 0 || hdr.num_values_per_vertex != 1 {
            return Err(NeuropaintError::InvalidCurvFormat);
        }
        Ok(hdr)
    }
}


/// Models a FreeSurfer curv file: one `f32` value per mesh vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct FsCurv {
    pub header: CurvHeader,
    pub data: Vec<f32>,
}

impl FsCurv {
    /// Read an FsCurv instance from a file.
    /// If the file's name ends with ".gz", the file is assumed to need GZip decoding. This is not typically the case
    /// for FreeSurfer Curv files, but very handy (and it helps us to reduce the size of our test data).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<FsCurv> {
        let mut input = open_maybe_gz(path)?;
        FsCurv::from_reader(&mut input)
    }

    /// Read an FsCurv instance from a byte stream positioned at the start of the header.
    pub fn from_reader<S>(input: &mut S) -> Result<FsCurv>
    where
        S: Read,
    {
        let header = CurvHeader::from_reader(input)?;

        let mut input = ByteOrdered::be(input);
        let mut data: Vec<f32> = Vec::with_capacity(capacity_hint(header.num_vertices as usize));
        for _ in 0..header.num_vertices {
            data.push(input.read_f32()?);
        }

        Ok(FsCurv { header, data })
    }
}


/// Read per-vertex data from a FreeSurfer curv file, like `lh.sulc` or `lh.thickness`.
///
/// # Examples
///
/// ```no_run
/// let sulc = neuropaint::read_curv("/path/to/subjects_dir/fsaverage5/surf/lh.sulc").unwrap();
/// println!("Read sulcal depth for {} vertices.", sulc.data.len());
/// ```
pub fn read_curv<P: AsRef<Path>>(path: P) -> Result<FsCurv> {
    FsCurv::from_file(path)
}


#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    fn curv_bytes(values: &[f32]) -> Vec<u8> {
        let mut buf: Vec<u8> = Vec::new();
        {
            let mut out = ByteOrdered::be(&mut buf);
            for _ in 0..3 {
                out.write_u8(255).unwrap();
            }
            out.write_i32(values.len() as i32).unwrap();
            out.write_i32(0).unwrap();
            out.write_i32(1).unwrap();
            for v in values {
                out.write_f32(*v).unwrap();
            }
        }
        buf
    }

    #[test]
    fn curv_data_can_be_read_from_a_stream() {
        let mut input = Cursor::new(curv_bytes(&[0.5, -1.25, 3.0]));
        let curv = FsCurv::from_reader(&mut input).unwrap();

        assert_eq!(3, curv.header.num_vertices);
        assert_eq!(1, curv.header.num_values_per_vertex);
        assert_eq!(vec![0.5f32, -1.25, 3.0], curv.data);
    }

    #[test]
    fn a_huge_vertex_count_without_data_is_an_io_error() {
        let mut bytes = curv_bytes(&[1.0]);
        bytes[3..7].copy_from_slice(&i32::MAX.to_be_bytes());
        let result = FsCurv::from_reader(&mut Cursor::new(bytes));
        assert!(matches!(result, Err(NeuropaintError::Io(_))));
    }

    #[test]
    fn a_wrong_magic_number_is_rejected() {
        let mut bytes = curv_bytes(&[1.0]);
        bytes[0] = 0;
        let result = FsCurv::from_reader(&mut Cursor::new(bytes));
        assert!(matches!(result, Err(NeuropaintError::InvalidCurvFormat)));
    }

    #[test]
    fn truncated_curv_data_is_an_io_error() {
        let mut bytes = curv_bytes(&[1.0, 2.0]);
        bytes.truncate(bytes.len() - 2);
        let result = FsCurv::from_reader(&mut Cursor::new(bytes));
        assert!(matches!(result, Err(NeuropaintError::Io(_))));
    }
}
