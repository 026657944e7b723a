//! Functions for managing FreeSurfer brain surface parcellations in annot files.
//!
//! These files assign each vertex of a brain surface mesh to exactly one brain region
//! or label. A so-called colortable contains data on the regions, including the region's
//! name, an RGB display color, and a unique identifier.

use byteordered::ByteOrdered;

use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

use crate::error::{NeuropaintError, Result};
use crate::util::{capacity_hint, open_maybe_gz, read_fixed_length_string};


#[derive(Debug, Clone, PartialEq)]
pub struct FsAnnotColortable {
    pub id: Vec<i32>,  // A region index, not really needed. The 'label' is unique as well and more relevant, see below.
    pub name: Vec<String>,
    pub r: Vec<i32>,
    pub g: Vec<i32>,
    pub b: Vec<i32>,
    pub a: Vec<i32>,
    pub label: Vec<i32>, // A unique label computed from r,g,b. Used in annot.vertex_labels to identify the region.
}

impl FsAnnotColortable {

    /// Read a colortable in format version 2 from a reader. The reader must be positioned directly after the (negative) format version field.
    pub fn from_reader<S>(input: &mut S) -> Result<FsAnnotColortable>
    where
        S: Read,
    {
        let mut input = ByteOrdered::be(input);

        let _num_colortable_entries_total: i32 = input.read_i32()?; // May be larger than the number of entries stored below.
        let num_chars_orig_filename: i32 = input.read_i32()?; // Length of following string.
        if num_chars_orig_filename < 0 {
            return Err(NeuropaintError::UnsupportedFsAnnotFormatVersion);
        }
        let _orig_filename = read_fixed_length_string(&mut input, num_chars_orig_filename as usize)?;
        let num_colortable_entries: i32 = input.read_i32()?; // Yes, it is stored twice. Once here, once before.
        if num_colortable_entries < 0 {
            return Err(NeuropaintError::UnsupportedFsAnnotFormatVersion);
        }

        let capacity = capacity_hint(num_colortable_entries as usize);
        let mut ct = FsAnnotColortable {
            id: Vec::with_capacity(capacity),
            name: Vec::with_capacity(capacity),
            r: Vec::with_capacity(capacity),
            g: Vec::with_capacity(capacity),
            b: Vec::with_capacity(capacity),
            a: Vec::with_capacity(capacity),
            label: Vec::with_capacity(capacity),
        };

        for _ in 0..num_colortable_entries {
            ct.id.push(input.read_i32()?);
            let num_chars_region_name: i32 = input.read_i32()?; // Length of following string.
            if num_chars_region_name < 0 {
                return Err(NeuropaintError::UnsupportedFsAnnotFormatVersion);
            }
            ct.name.push(read_fixed_length_string(&mut input, num_chars_region_name as usize)?);
            let (r, g, b, a) = (input.read_i32()?, input.read_i32()?, input.read_i32()?, input.read_i32()?);
            ct.r.push(r);
            ct.g.push(g);
            ct.b.push(b);
            ct.a.push(a);
            ct.label.push(colortable_label(r, g, b, a));
        }

        Ok(ct)
    }
}

/// Compute the unique region label FreeSurfer derives from a region's RGBA color.
pub fn colortable_label(r: i32, g: i32, b: i32, a: i32) -> i32 {
    r.wrapping_add(g.wrapping_shl(8)).wrapping_add(b.wrapping_shl(16)).wrapping_add(a.wrapping_shl(24))
}

impl fmt::Display for FsAnnotColortable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Colortable for {} brain regions.", self.id.len())
    }
}


/// Models a FreeSurfer brain surface parcellation from an annot file. This is the result of applying a brain atlas (like Destrieux) to a subject. The `vertex_indices` are the 0-based indices used in FreeSurfer and should be ignored. The `vertex_labels` field contains the mesh vertices in order, and assigns to each vertex a brain region using the `label` field (not the `id` field!) from the `colortable`. The field `colortable` contains an [`FsAnnotColortable`] struct that describes the brain regions.
#[derive(Debug, Clone, PartialEq)]
pub struct FsAnnot {
    pub vertex_indices: Vec<i32>, // 0-based indices, not really needed as all vertices need to be covered in order.
    pub vertex_labels: Vec<i32>,
    pub colortable: FsAnnotColortable,
}

impl FsAnnot {
    /// Read an FsAnnot instance from a file.
    /// If the file's name ends with ".gz", the file is assumed to need GZip decoding.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<FsAnnot> {
        let mut input = open_maybe_gz(path)?;
        FsAnnot::from_reader(&mut input)
    }

    /// Read an FsAnnot instance from a byte stream positioned at the start of the file.
    pub fn from_reader<S>(input: &mut S) -> Result<FsAnnot>
    where
        S: Read,
    {
        let mut file = ByteOrdered::be(input);

        let num_vertices: i32 = file.read_i32()?;
        if num_vertices < 0 {
            return Err(NeuropaintError::UnsupportedFsAnnotFormatVersion);
        }

        let mut vertex_indices : Vec<i32> = Vec::with_capacity(capacity_hint(num_vertices as usize));
        let mut vertex_labels : Vec<i32> = Vec::with_capacity(capacity_hint(num_vertices as usize));
        for _ in 0..num_vertices {
            vertex_indices.push(file.read_i32()?);
            vertex_labels.push(file.read_i32()?);
        }

        let has_colortable: i32 = file.read_i32()?;
        if has_colortable != 1 {
            return Err(NeuropaintError::UnsupportedFsAnnotFormatVersion);
        }

        let format_version: i32 = file.read_i32()?;
        if format_version != -2 { // If this is negative, the absolute value encodes the file format version. We only support version 2.
            return Err(NeuropaintError::UnsupportedFsAnnotFormatVersion);
        }

        let colortable = FsAnnotColortable::from_reader(&mut file)?;

        Ok(FsAnnot {
            vertex_indices,
            vertex_labels,
            colortable,
        })
    }

    /// Get the region names contained in the [`FsAnnot`] struct, in colortable order.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// let annot = neuropaint::read_annot("/path/to/subjects_dir/fsaverage5/label/lh.aparc.a2009s.annot").unwrap();
    /// annot.regions();
    /// ```
    pub fn regions(&self) -> Vec<String> {
        self.colortable.name.clone()
    }

    /// Get the number of regions contained in the [`FsAnnot`] struct, or its [`FsAnnotColortable`].
    pub fn num_regions(&self) -> usize {
        self.colortable.name.len()
    }

    /// Compute the dense, 0-based region id for each vertex, i.e., the index into [`FsAnnot::regions`].
    ///
    /// # Parameters
    ///
    /// * `unmatched_region_index`: The region index to use for vertices with a label that does not match any region label. Typically they are assigned to an `unknown` region, which should be at the start of the colortable (at index `0`). If in doubt, check the region names of the annot.
    ///
    /// # Errors
    ///
    /// If the `unmatched_region_index` is needed and out of range for this annot.
    pub fn vertex_region_ids(&self, unmatched_region_index: usize) -> Result<Vec<i32>> {
        let label_to_region: HashMap<i32, usize> = self.colortable.label.iter()
            .enumerate()
            .rev() // the first region wins if a label is shared
            .map(|(region_idx, label)| (*label, region_idx))
            .collect();

        self.vertex_labels.iter()
            .enumerate()
            .map(|(vertex, vlabel)| {
                match label_to_region.get(vlabel) {
                    Some(region_idx) => Ok(*region_idx as i32),
                    None if unmatched_region_index < self.num_regions() => Ok(unmatched_region_index as i32),
                    None => Err(NeuropaintError::RegionIndexOutOfRange(vertex, unmatched_region_index as i32, self.num_regions())),
                }
            })
            .collect()
    }
}


impl fmt::Display for FsAnnot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Surface parcellation assigning {} vertices to {} brain regions.", self.vertex_indices.len(), self.colortable.id.len())
    }
}


/// Read a brain parcellation from a FreeSurfer annot file.
///
/// A parcellation assigns each vertex of a brain surface mesh to exactly one brain region.
/// The colortable contains data on the regions, including the region's
/// name, an RGB display color, and a unique identifier.
///
/// # Examples
///
/// ```no_run
/// let annot = neuropaint::read_annot("/path/to/subjects_dir/fsaverage5/label/lh.aparc.a2009s.annot").unwrap();
/// println!("Annotation assigns the {} brain mesh vertices to {} different regions.", annot.vertex_indices.len(), annot.regions().len());
/// ```
pub fn read_annot<P: AsRef<Path>>(path: P) -> Result<FsAnnot> {
    FsAnnot::from_file(path)
}
