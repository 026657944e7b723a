// Functions for managing FreeSurfer brain surface meshes in binary 'surf' files.
// These files store a triangular mesh, where each vertex if defined by its x,y,z coord and
// each face is defined by 3 vertices, stored as 3 indices into the vertices.


use byteordered::ByteOrdered;

use std::fmt::Write as FmtWrite;
use std::io::Read;
use std::path::Path;

use crate::error::{NeuropaintError, Result};
use crate::util::{capacity_hint, open_maybe_gz, read_double_newline_terminated_string};

pub const TRIS_MAGIC_FILE_TYPE_NUMBER: i32 = 16777214;

#[derive(Debug, Clone, PartialEq)]
pub struct FsSurfaceHeader {
    pub surf_magic: [u8; 3],
    pub info_line: String,
    pub num_vertices: i32,
    pub num_faces: i32,
}


impl Default for FsSurfaceHeader {
    fn default() -> FsSurfaceHeader {
        FsSurfaceHeader {
            surf_magic: [255; 3],
            info_line: String::from(""),
            num_vertices: 0,
            num_faces: 0
        }
    }
}

impl FsSurfaceHeader {

    /// Read an FsSurface header from the given byte stream.
    /// It is assumed that the input is currently at the start of the
    /// FsSurface header.
    pub fn from_reader<S>(input: &mut S) -> Result<FsSurfaceHeader>
    where
        S: Read,
    {
        let mut hdr = FsSurfaceHeader::default();

        input.read_exact(&mut hdr.surf_magic)?;

        let magic: i32 = interpret_fs_int24(hdr.surf_magic[0], hdr.surf_magic[1], hdr.surf_magic[2]);
        if magic != TRIS_MAGIC_FILE_TYPE_NUMBER {
            return Err(NeuropaintError::InvalidFsSurfaceFormat);
        }

        hdr.info_line = read_double_newline_terminated_string(input)?;

        let mut input = ByteOrdered::be(input);
        hdr.num_vertices = input.read_i32()?;
        hdr.num_faces = input.read_i32()?;

        if hdr.num_vertices < 0 || hdr.num_faces < 0 {
            return Err(NeuropaintError::InvalidFsSurfaceFormat);
        }
        Ok(hdr)
    }
}


/// Interpret three bytes as a single 24 bit integer, FreeSurfer style.
pub fn interpret_fs_int24(b1: u8, b2:u8, b3:u8) -> i32 {
    ((b1 as i32) << 16) + ((b2 as i32) << 8) + b3 as i32
}


// An FsSurface object
#[derive(Debug, PartialEq, Clone)]
pub struct FsSurface {
    pub header: FsSurfaceHeader,
    pub mesh: BrainMesh,
}

/// A triangular brain mesh. Vertex coordinates are stored as consecutive x,y,z triplets, faces as consecutive vertex index triplets.
#[derive(Debug, PartialEq, Clone)]
pub struct BrainMesh {
    pub vertices: Vec<f32>,
    pub faces: Vec<i32>,
}

impl BrainMesh {
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len() / 3
    }

    /// Export the mesh in ASCII PLY format.
    ///
    /// # Parameters
    ///
    /// * `colors`: optional RGB vertex colors, 3 `u8` values per vertex.
    /// * `comments`: lines written as `comment` entries into the PLY header.
    ///
    /// # Panics
    ///
    /// If `colors` is given and does not hold exactly 3 values per vertex.
    pub fn to_ply(&self, colors: Option<&[u8]>, comments: &[String]) -> String {
        if let Some(c) = colors {
            assert_eq!(c.len(), self.num_vertices() * 3, "Need exactly 3 color values per vertex.");
        }

        let mut ply = String::from("ply\nformat ascii 1.0\n");
        for comment in comments {
            let _ = writeln!(ply, "comment {}", comment.replace('\n', " "));
        }
        let _ = writeln!(ply, "element vertex {}", self.num_vertices());
        ply.push_str("property float x\nproperty float y\nproperty float z\n");
        if colors.is_some() {
            ply.push_str("property uchar red\nproperty uchar green\nproperty uchar blue\n");
        }
        let _ = writeln!(ply, "element face {}", self.num_faces());
        ply.push_str("property list uchar int vertex_indices\nend_header\n");

        for (idx, coords) in self.vertices.chunks_exact(3).enumerate() {
            let _ = write!(ply, "{} {} {}", coords[0], coords[1], coords[2]);
            if let Some(c) = colors {
                let _ = write!(ply, " {} {} {}", c[idx * 3], c[idx * 3 + 1], c[idx * 3 + 2]);
            }
            ply.push('\n');
        }
        for face in self.faces.chunks_exact(3) {
            let _ = writeln!(ply, "3 {} {} {}", face[0], face[1], face[2]);
        }
        ply
    }
}


/// Read a brain mesh from a FreeSurfer surf file, like `lh.white` or `lh.inflated`.
///
/// # Examples
///
/// ```no_run
/// let surf = neuropaint::read_surf("/path/to/subjects_dir/fsaverage5/surf/lh.inflated").unwrap();
/// println!("Mesh has {} vertices.", surf.mesh.num_vertices());
/// ```
pub fn read_surf<P: AsRef<Path>>(path: P) -> Result<FsSurface> {
    FsSurface::from_file(path)
}


impl FsSurface {
    /// Read an FsSurface instance from a file.
    /// If the file's name ends with ".gz", the file is assumed to need GZip decoding. This is not typically the case
    /// for FreeSurfer Surface files, but very handy (and it helps us to reduce the size of our test data).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<FsSurface> {
        let mut input = open_maybe_gz(path)?;
        FsSurface::from_reader(&mut input)
    }

    /// Read an FsSurface instance from a byte stream positioned at the start of the header.
    pub fn from_reader<S>(input: &mut S) -> Result<FsSurface>
    where
        S: Read,
    {
        let header = FsSurfaceHeader::from_reader(input)?;
        let mesh = FsSurface::mesh_from_reader(input, &header)?;
        Ok(FsSurface { header, mesh })
    }

    /// Read the vertex and face data that follows the header.
    pub fn mesh_from_reader<S>(input: &mut S, hdr: &FsSurfaceHeader) -> Result<BrainMesh>
    where
        S: Read,
    {
        let num_coords = hdr.num_vertices.checked_mul(3).ok_or(NeuropaintError::InvalidFsSurfaceFormat)?;
        let num_face_indices = hdr.num_faces.checked_mul(3).ok_or(NeuropaintError::InvalidFsSurfaceFormat)?;

        let mut input = ByteOrdered::be(input);

        let mut vertex_data : Vec<f32> = Vec::with_capacity(capacity_hint(num_coords as usize));
        for _ in 0..num_coords {
            vertex_data.push(input.read_f32()?);
        }

        let mut face_data : Vec<i32> = Vec::with_capacity(capacity_hint(num_face_indices as usize));
        for _ in 0..num_face_indices {
            let vertex = input.read_i32()?;
            if vertex < 0 || vertex >= hdr.num_vertices {
                return Err(NeuropaintError::InvalidFsSurfaceFormat);
            }
            face_data.push(vertex);
        }

        Ok(BrainMesh {
            vertices : vertex_data,
            faces : face_data
        })
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    /// A single triangle, encoded as a FreeSurfer surf file.
    fn triangle_surf_bytes() -> Vec<u8> {
        let mut buf: Vec<u8> = Vec::new();
        {
            let mut out = ByteOrdered::be(&mut buf);
            for b in &[255u8, 255, 254] {
                out.write_u8(*b).unwrap();
            }
            for b in b"created by test\n\n" {
                out.write_u8(*b).unwrap();
            }
            out.write_i32(3).unwrap();
            out.write_i32(1).unwrap();
            for c in &[0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0] {
                out.write_f32(*c).unwrap();
            }
            for v in &[0i32, 1, 2] {
                out.write_i32(*v).unwrap();
            }
        }
        buf
    }

    #[test]
    fn fs_int24_is_interpreted_big_endian() {
        assert_eq!(TRIS_MAGIC_FILE_TYPE_NUMBER, interpret_fs_int24(255, 255, 254));
        assert_eq!(1, interpret_fs_int24(0, 0, 1));
    }

    #[test]
    fn a_surf_stream_can_be_read() {
        let surf = FsSurface::from_reader(&mut Cursor::new(triangle_surf_bytes())).unwrap();

        assert_eq!("created by test", surf.header.info_line);
        assert_eq!(3, surf.header.num_vertices);
        assert_eq!(1, surf.header.num_faces);
        assert_eq!(3, surf.mesh.num_vertices());
        assert_eq!(1, surf.mesh.num_faces());
        assert_eq!(vec![0, 1, 2], surf.mesh.faces);
    }

    #[test]
    fn faces_referencing_missing_vertices_are_rejected() {
        let mut bytes = triangle_surf_bytes();
        let last = bytes.len() - 1;
        bytes[last] = 7;
        let result = FsSurface::from_reader(&mut Cursor::new(bytes));
        assert!(matches!(result, Err(NeuropaintError::InvalidFsSurfaceFormat)));
    }

    #[test]
    fn huge_element_counts_are_rejected() {
        for (num_vertices, num_faces) in &[(i32::MAX, 1), (3, i32::MAX)] {
            let mut bytes = triangle_surf_bytes();
            let count_offset = 3 + b"created by test\n\n".len();
            bytes[count_offset..count_offset + 4].copy_from_slice(&num_vertices.to_be_bytes());
            bytes[count_offset + 4..count_offset + 8].copy_from_slice(&num_faces.to_be_bytes());

            let result = FsSurface::from_reader(&mut Cursor::new(bytes));
            assert!(matches!(result, Err(NeuropaintError::InvalidFsSurfaceFormat)));
        }
    }

    #[test]
    fn truncated_vertex_data_is_an_io_error() {
        let mut bytes = triangle_surf_bytes();
        let count_offset = 3 + b"created by test\n\n".len();
        bytes[count_offset..count_offset + 4].copy_from_slice(&100_000_000i32.to_be_bytes());

        let result = FsSurface::from_reader(&mut Cursor::new(bytes));
        assert!(matches!(result, Err(NeuropaintError::Io(_))));
    }

    #[test]
    fn colored_ply_export_lists_vertices_and_faces() {
        let surf = FsSurface::from_reader(&mut Cursor::new(triangle_surf_bytes())).unwrap();
        let colors: Vec<u8> = vec![255, 0, 0, 0, 255, 0, 0, 0, 255];
        let ply = surf.mesh.to_ply(Some(colors.as_slice()), &[String::from("title demo")]);

        assert!(ply.starts_with("ply\nformat ascii 1.0\ncomment title demo\n"));
        assert!(ply.contains("element vertex 3\n"));
        assert!(ply.contains("property uchar red\n"));
        assert!(ply.contains("element face 1\n"));
        assert!(ply.contains("\n1 0 0 0 255 0\n"));
        assert!(ply.ends_with("3 0 1 2\n"));
    }
}
