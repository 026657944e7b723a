//! The standard template: inflated surface meshes, sulcal depth maps, and a parcellation defined on them.
//!
//! [`FsAverageAtlas`] reads all of these from a FreeSurfer `subjects_dir` that contains
//! the `fsaverage` template subjects.

use log::{debug, warn};

use std::cell::Cell;
use std::path::{Path, PathBuf};

use crate::error::{NeuropaintError, Result};
use crate::fs_annot::read_annot;
use crate::fs_curv::read_curv;
use crate::fs_surface::{read_surf, BrainMesh};
use crate::options::{Hemisphere, MeshResolution};
use crate::traits::AtlasProvider;
use crate::util::duplicate_names;


/// Inflated surface meshes and sulcal depth maps for both hemispheres.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateMesh {
    pub left_inflated_surface: BrainMesh,
    pub right_inflated_surface: BrainMesh,
    pub left_sulcal_map: Vec<f32>,
    pub right_sulcal_map: Vec<f32>,
}

impl TemplateMesh {
    /// The inflated mesh of the hemisphere.
    pub fn surface(&self, hemi: Hemisphere) -> &BrainMesh {
        match hemi {
            Hemisphere::Left => &self.left_inflated_surface,
            Hemisphere::Right => &self.right_inflated_surface,
        }
    }

    /// The sulcal depth map of the hemisphere.
    pub fn sulcal_map(&self, hemi: Hemisphere) -> &[f32] {
        match hemi {
            Hemisphere::Left => &self.left_sulcal_map,
            Hemisphere::Right => &self.right_sulcal_map,
        }
    }
}


/// A parcellation of both hemispheres. `region_names[i]` names the region with id `i` in both per-vertex id arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceAtlas {
    pub left_region_id_per_vertex: Vec<i32>,
    pub right_region_id_per_vertex: Vec<i32>,
    pub region_names: Vec<String>,
}

impl SurfaceAtlas {
    pub fn region_ids(&self, hemi: Hemisphere) -> &[i32] {
        match hemi {
            Hemisphere::Left => &self.left_region_id_per_vertex,
            Hemisphere::Right => &self.right_region_id_per_vertex,
        }
    }

    pub fn num_regions(&self) -> usize {
        self.region_names.len()
    }

    /// Region names that occur more than once, in order of their first repetition.
    ///
    /// Region names are the keys used to look up scores, so all regions sharing a name receive the same score.
    pub fn duplicate_region_names(&self) -> Vec<&str> {
        duplicate_names(&self.region_names)
    }
}


/// Reads the template mesh and parcellation from a FreeSurfer `subjects_dir`.
///
/// Expected files, relative to `<subjects_dir>/<subject>`:
///
/// * `surf/?h.inflated` and `surf/?h.sulc` for the mesh subject of the requested resolution (`fsaverage5` for low, `fsaverage` for high).
/// * `label/?h.<annot_name>.annot` for the parcellation subject. Unless set with [`FsAverageAtlas::with_parcellation_subject`], this is the mesh subject of the most recently fetched resolution (`fsaverage5` before any mesh was fetched), so mesh and parcellation fit together.
///
/// Any of the files may be gzip compressed, in which case its name must carry an additional `.gz` suffix.
#[derive(Debug, Clone, PartialEq)]
pub struct FsAverageAtlas {
    subjects_dir: PathBuf,
    annot_name: String,
    parcellation_subject: Option<String>,
    unmatched_region_index: usize,
    last_resolution: Cell<MeshResolution>,
}

impl FsAverageAtlas {
    /// Create a provider for the Destrieux atlas (`aparc.a2009s`) on `fsaverage5`.
    pub fn new<P: AsRef<Path>>(subjects_dir: P) -> FsAverageAtlas {
        FsAverageAtlas {
            subjects_dir: subjects_dir.as_ref().to_path_buf(),
            annot_name: String::from("aparc.a2009s"),
            parcellation_subject: None,
            unmatched_region_index: 0,
            last_resolution: Cell::new(MeshResolution::Low),
        }
    }

    /// Use a different annot file, e.g. `aparc` for the Desikan-Killiany atlas.
    pub fn with_annot_name(mut self, annot_name: &str) -> FsAverageAtlas {
        self.annot_name = annot_name.to_string();
        self
    }

    /// Always read the parcellation from this template subject. It must match the mesh resolution used for plotting.
    pub fn with_parcellation_subject(mut self, subject: &str) -> FsAverageAtlas {
        self.parcellation_subject = Some(subject.to_string());
        self
    }

    /// The region that vertices with a label missing from the colortable are assigned to.
    pub fn with_unmatched_region_index(mut self, region_index: usize) -> FsAverageAtlas {
        self.unmatched_region_index = region_index;
        self
    }

    /// The template subject providing meshes of the given resolution.
    pub fn mesh_subject(resolution: MeshResolution) -> &'static str {
        match resolution {
            MeshResolution::Low => "fsaverage5",
            MeshResolution::High => "fsaverage",
        }
    }

    /// The template subject the parcellation is read from.
    pub fn parcellation_subject(&self) -> &str {
        match &self.parcellation_subject {
            Some(subject) => subject.as_str(),
            None => FsAverageAtlas::mesh_subject(self.last_resolution.get()),
        }
    }

    /// Path of a file in the subject dir, preferring the uncompressed file and falling back to a `.gz` version if only that exists.
    fn subject_file(&self, subject: &str, subdir: &str, file_name: &str) -> PathBuf {
        let path = self.subjects_dir.join(subject).join(subdir).join(file_name);
        let gz_path = path.with_file_name(format!("{}.gz", file_name));
        if !path.exists() && gz_path.exists() {
            gz_path
        } else {
            path
        }
    }

    fn read_hemi_mesh(&self, subject: &str, hemi: Hemisphere) -> Result<(BrainMesh, Vec<f32>)> {
        let surf_path = self.subject_file(subject, "surf", &format!("{}.inflated", hemi.prefix()));
        let sulc_path = self.subject_file(subject, "surf", &format!("{}.sulc", hemi.prefix()));
        debug!("Reading {} hemisphere mesh from {} and {}", hemi, surf_path.display(), sulc_path.display());

        let surf = read_surf(&surf_path)?;
        let sulc = read_curv(&sulc_path)?;
        if sulc.data.len() != surf.mesh.num_vertices() {
            return Err(NeuropaintError::VertexCountMismatch(
                sulc_path.display().to_string(), surf.mesh.num_vertices(), sulc.data.len()));
        }
        Ok((surf.mesh, sulc.data))
    }
}

impl AtlasProvider for FsAverageAtlas {
    fn fetch_mesh(&self, resolution: MeshResolution) -> Result<TemplateMesh> {
        let subject = FsAverageAtlas::mesh_subject(resolution);
        self.last_resolution.set(resolution);
        let (left_inflated_surface, left_sulcal_map) = self.read_hemi_mesh(subject, Hemisphere::Left)?;
        let (right_inflated_surface, right_sulcal_map) = self.read_hemi_mesh(subject, Hemisphere::Right)?;

        Ok(TemplateMesh {
            left_inflated_surface,
            right_inflated_surface,
            left_sulcal_map,
            right_sulcal_map,
        })
    }

    fn fetch_parcellation(&self) -> Result<SurfaceAtlas> {
        let annot_file = |hemi: Hemisphere| format!("{}.{}.annot", hemi.prefix(), self.annot_name);
        let subject = self.parcellation_subject();
        let lh_path = self.subject_file(subject, "label", &annot_file(Hemisphere::Left));
        let rh_path = self.subject_file(subject, "label", &annot_file(Hemisphere::Right));
        debug!("Reading parcellation from {} and {}", lh_path.display(), rh_path.display());

        let lh_annot = read_annot(&lh_path)?;
        let rh_annot = read_annot(&rh_path)?;

        if lh_annot.colortable.name != rh_annot.colortable.name {
            return Err(NeuropaintError::MismatchedHemisphereRegions);
        }

        let atlas = SurfaceAtlas {
            left_region_id_per_vertex: lh_annot.vertex_region_ids(self.unmatched_region_index)?,
            right_region_id_per_vertex: rh_annot.vertex_region_ids(self.unmatched_region_index)?,
            region_names: lh_annot.regions(),
        };

        for name in atlas.duplicate_region_names() {
            warn!("Region name '{}' occurs more than once in the parcellation, all its regions share one score.", name);
        }
        Ok(atlas)
    }
}
