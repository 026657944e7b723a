//! Painting of region-wise scores onto the vertices of a parcellated surface.
//!
//! Each region's score is broadcast to all vertices assigned to that region. Vertices of
//! regions without a finite score stay unset, which is represented at the type level as
//! `None` and is never confused with a score of `0.0`.

use std::collections::HashMap;
use std::convert::TryFrom;

use crate::error::{NeuropaintError, Result};


/// A per-vertex scalar array. Each entry is either a finite score or `None` for unset vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexTexture {
    values: Vec<Option<f64>>,
}

impl VertexTexture {
    /// A texture of the given length with all vertices unset.
    pub fn unset(num_vertices: usize) -> VertexTexture {
        VertexTexture { values: vec![None; num_vertices] }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value of a vertex, `None` if the vertex is unset or out of range.
    pub fn get(&self, vertex: usize) -> Option<f64> {
        self.values.get(vertex).copied().flatten()
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Option<f64>> {
        self.values
    }

    /// Number of vertices that carry a value.
    pub fn num_set(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Minimum and maximum over the set vertices only. `None` if no vertex is set.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values.iter().flatten().fold(None, |range, &v| match range {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
    }
}


/// Result of [`paint`]: the texture, plus the number of regions whose score was painted.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintedTexture {
    pub texture: VertexTexture,
    pub filled_count: usize,
}

impl PaintedTexture {
    /// Whether any region was painted. A texture without painted regions should not be rendered.
    pub fn is_renderable(&self) -> bool {
        self.filled_count > 0
    }
}


/// Paint region scores onto vertices.
///
/// # Parameters
///
/// * `vertex_region_id`: the region id of each vertex, an index into `region_names`.
/// * `region_names`: the name of each region, used to look up its score.
/// * `score_by_name`: scores by region name. Names that are not in `region_names` are ignored.
///
/// Regions without an entry in `score_by_name`, or with a non-finite score (NaN, infinite), are not painted, and their vertices stay unset.
///
/// # Errors
///
/// [`NeuropaintError::RegionIndexOutOfRange`] if any vertex has a region id outside `0..region_names.len()`.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
///
/// let names: Vec<String> = vec!["A".into(), "B".into(), "C".into()];
/// let mut scores = HashMap::new();
/// scores.insert(String::from("A"), 1.5);
/// scores.insert(String::from("C"), f64::NAN);
///
/// let painted = neuropaint::paint(&[0, 0, 1, 1, 2], &names, &scores).unwrap();
/// assert_eq!(painted.texture.values(), &[Some(1.5), Some(1.5), None, None, None]);
/// assert_eq!(painted.filled_count, 1);
/// ```
pub fn paint(vertex_region_id: &[i32], region_names: &[String], score_by_name: &HashMap<String, f64>) -> Result<PaintedTexture> {
    let num_regions = region_names.len();

    let mut region_score: Vec<Option<f64>> = vec![None; num_regions];
    let mut filled_count: usize = 0;
    for (region_idx, name) in region_names.iter().enumerate() {
        match score_by_name.get(name) {
            Some(score) if score.is_finite() => {
                region_score[region_idx] = Some(*score);
                filled_count += 1;
            }
            _ => {}
        }
    }

    let mut values: Vec<Option<f64>> = vec![None; vertex_region_id.len()];
    for (vertex, (value, region_id)) in values.iter_mut().zip(vertex_region_id).enumerate() {
        let region_idx = usize::try_from(*region_id)
            .ok()
            .filter(|idx| *idx < num_regions)
            .ok_or_else(|| NeuropaintError::RegionIndexOutOfRange(vertex, *region_id, num_regions))?;
        *value = region_score[region_idx];
    }

    Ok(PaintedTexture {
        texture: VertexTexture { values },
        filled_count,
    })
}
