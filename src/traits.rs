use crate::atlas::{SurfaceAtlas, TemplateMesh};
use crate::error::Result;
use crate::fs_surface::BrainMesh;
use crate::options::{Hemisphere, MeshResolution, View};
use crate::paint::VertexTexture;

/// Supplies the standard template mesh and the parcellation defined on it.
pub trait AtlasProvider {
    fn fetch_mesh(&self, resolution: MeshResolution) -> Result<TemplateMesh>;
    fn fetch_parcellation(&self) -> Result<SurfaceAtlas>;
}

/// Everything a renderer needs to draw one painted hemisphere.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub mesh: &'a BrainMesh,
    pub stat_map: &'a VertexTexture,
    /// Background shading for vertices without a value, typically sulcal depth.
    pub bg_map: &'a [f32],
    pub hemisphere: Hemisphere,
    pub view: View,
    pub colormap: &'a str,
    pub colorbar: bool,
    pub darkness: Option<f32>,
    pub threshold: Option<f64>,
    pub title: &'a str,
}

/// Draws painted textures on a surface. Rendering blocks until the figure is produced.
pub trait SurfaceRenderer {
    fn render(&mut self, request: &RenderRequest) -> Result<()>;
}
