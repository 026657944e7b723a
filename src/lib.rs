//! Painting of region-wise brain scores onto cortical surface meshes.
//!
//! Given a surface parcellation, which assigns each mesh vertex to a brain region, and a table of
//! scores per region name, this crate computes per-vertex textures and hands them to a renderer.
//! FreeSurfer surfaces, curv files and annot parcellations of the `fsaverage` template subjects are
//! supported as the source of meshes and atlases, and vertex-colored meshes can be exported as PLY files.

pub mod atlas;
pub mod colormap;
pub mod cortical_plot;
pub mod error;
pub mod fs_annot;
pub mod fs_curv;
pub mod fs_surface;
pub mod options;
pub mod paint;
pub mod ply_renderer;
pub mod score_table;
pub mod traits;
pub mod util;

pub use atlas::{FsAverageAtlas, SurfaceAtlas, TemplateMesh};
pub use colormap::Colormap;
pub use cortical_plot::{active_columns, cortical_plot, ColumnOutcome, PlotReport};
pub use error::{NeuropaintError, Result};
pub use fs_annot::{read_annot, FsAnnot, FsAnnotColortable};
pub use fs_curv::{read_curv, CurvHeader, FsCurv};
pub use fs_surface::{read_surf, BrainMesh, FsSurface, FsSurfaceHeader};
pub use options::{Hemisphere, MeshResolution, PlotOptions, View};
pub use paint::{paint, PaintedTexture, VertexTexture};
pub use ply_renderer::PlyRenderer;
pub use score_table::{ScoreCell, ScoreColumn, ScoreTable};
pub use traits::{AtlasProvider, RenderRequest, SurfaceRenderer};
