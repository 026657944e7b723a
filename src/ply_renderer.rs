//! A [`SurfaceRenderer`] that writes vertex-colored meshes as PLY files.
//!
//! Each render call produces one ASCII PLY file, which can be viewed in mesh viewers like
//! MeshLab or Blender. Vertices with a value are colored with the colormap, all other
//! vertices show the background map in grey.

use log::info;

use std::fs;
use std::path::{Path, PathBuf};

use crate::colormap::Colormap;
use crate::error::{NeuropaintError, Result};
use crate::traits::{RenderRequest, SurfaceRenderer};

/// Grey levels used for the background shading, from the deepest sulci to the crowns of the gyri.
const BG_DARK: f64 = 64.0;
const BG_LIGHT: f64 = 191.0;


/// Writes one PLY file per rendered column into an output directory.
#[derive(Debug, Clone, PartialEq)]
pub struct PlyRenderer {
    output_dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PlyRenderer {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> PlyRenderer {
        PlyRenderer {
            output_dir: output_dir.as_ref().to_path_buf(),
            written: Vec::new(),
        }
    }

    /// Paths of all files written so far, in render order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// File name for a render: `<hemisphere>_<view>_<title>.ply`, with characters outside `[A-Za-z0-9._-]` in the title replaced by `_`.
    pub fn file_name(request: &RenderRequest) -> String {
        let title: String = request.title.chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' { c } else { '_' })
            .collect();
        format!("{}_{}_{}.ply", request.hemisphere, request.view, title)
    }

    /// Output path for a render. If an earlier render of this renderer already used the file name, e.g. for titles that only differ in replaced characters, a numeric suffix is appended.
    fn output_path(&self, request: &RenderRequest) -> PathBuf {
        let file_name = PlyRenderer::file_name(request);
        let stem = file_name.trim_end_matches(".ply");
        let mut path = self.output_dir.join(&file_name);
        let mut n = 2;
        while self.written.contains(&path) {
            path = self.output_dir.join(format!("{}_{}.ply", stem, n));
            n += 1;
        }
        path
    }
}

/// Compute RGB vertex colors for a render request.
///
/// Values are scaled over the range of the set vertices only. If a threshold is given, values with an absolute value below it are treated like unset vertices.
pub fn vertex_colors(request: &RenderRequest, cmap: &Colormap) -> Vec<u8> {
    let shown = |v: f64| request.threshold.map_or(true, |t| v.abs() >= t);

    let (vmin, vmax) = request.stat_map.values().iter()
        .flatten()
        .copied()
        .filter(|v| shown(*v))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    let (bg_min, bg_max) = request.bg_map.iter()
        .filter(|v| v.is_finite())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));

    let mut colors: Vec<u8> = Vec::with_capacity(request.stat_map.len() * 3);
    for (vertex, value) in request.stat_map.values().iter().enumerate() {
        let rgb = match value {
            Some(v) if shown(*v) => cmap.sample_range(*v, vmin, vmax),
            _ => {
                let bg = request.bg_map.get(vertex).copied().unwrap_or(f32::NAN);
                // Positive sulcal depth is inside a sulcus, which is drawn darker.
                let rel = if bg.is_finite() && bg_max > bg_min {
                    ((bg - bg_min) / (bg_max - bg_min)) as f64
                } else {
                    0.5
                };
                let mut grey = BG_LIGHT - rel * (BG_LIGHT - BG_DARK);
                if let Some(darkness) = request.darkness {
                    grey *= darkness as f64;
                }
                let grey = grey.max(0.0).min(255.0).round() as u8;
                [grey, grey, grey]
            }
        };
        colors.extend_from_slice(&rgb);
    }
    colors
}

impl SurfaceRenderer for PlyRenderer {
    fn render(&mut self, request: &RenderRequest) -> Result<()> {
        let num_vertices = request.mesh.num_vertices();
        if request.stat_map.len() != num_vertices {
            return Err(NeuropaintError::VertexCountMismatch(
                format!("stat map '{}'", request.title), num_vertices, request.stat_map.len()));
        }
        if request.bg_map.len() != num_vertices {
            return Err(NeuropaintError::VertexCountMismatch(
                String::from("background map"), num_vertices, request.bg_map.len()));
        }

        let cmap = Colormap::by_name(request.colormap)?;
        let colors = vertex_colors(request, &cmap);

        let mut comments = vec![
            format!("title {}", request.title),
            format!("hemisphere {}", request.hemisphere),
            format!("view {}", request.view),
        ];
        if request.colorbar {
            if let Some((vmin, vmax)) = request.stat_map.value_range() {
                comments.push(format!("colorbar {} {} {}", cmap.name, vmin, vmax));
            }
        }

        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_path(request);
        fs::write(&path, request.mesh.to_ply(Some(colors.as_slice()), &comments))?;
        info!("Wrote '{}' for {} vertices to {}", request.title, num_vertices, path.display());

        self.written.push(path);
        Ok(())
    }
}
