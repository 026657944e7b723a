//! Plot region-wise scores from a score table on a cortical hemisphere, one figure per score column.

use log::{debug, info, warn};

use std::collections::HashMap;

use crate::error::{NeuropaintError, Result};
use crate::options::PlotOptions;
use crate::paint::paint;
use crate::score_table::ScoreTable;
use crate::traits::{AtlasProvider, RenderRequest, SurfaceRenderer};


/// What happened to a single score column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnOutcome {
    /// The column was painted and rendered. `filled_regions` regions received a score.
    Rendered { column: String, filled_regions: usize },
    /// No region of the parcellation received a finite score, so nothing was rendered.
    SkippedNoMatches { column: String },
}

impl ColumnOutcome {
    pub fn column(&self) -> &str {
        match self {
            ColumnOutcome::Rendered { column, .. } => column.as_str(),
            ColumnOutcome::SkippedNoMatches { column } => column.as_str(),
        }
    }
}


/// Summary of a [`cortical_plot`] run, one entry per plotted column in table order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlotReport {
    pub outcomes: Vec<ColumnOutcome>,
}

impl PlotReport {
    pub fn rendered(&self) -> Vec<&str> {
        self.outcomes.iter()
            .filter(|o| matches!(o, ColumnOutcome::Rendered { .. }))
            .map(|o| o.column())
            .collect()
    }

    pub fn skipped(&self) -> Vec<&str> {
        self.outcomes.iter()
            .filter(|o| matches!(o, ColumnOutcome::SkippedNoMatches { .. }))
            .map(|o| o.column())
            .collect()
    }
}


/// The score columns to plot: all score columns of the table in table order, restricted to the requested ones if any are requested.
pub fn active_columns<'a>(table: &'a ScoreTable, requested: Option<&[String]>) -> Vec<&'a str> {
    let columns = table.score_columns();
    match requested {
        Some(req) if !req.is_empty() => columns.into_iter().filter(|c| req.iter().any(|r| r == c)).collect(),
        _ => columns,
    }
}


/// Paint the scores of each score column onto a hemisphere and render the result.
///
/// The mesh and parcellation are fetched once from `atlas`. For each active column (see [`active_columns`]),
/// the region scores are painted onto the vertices of the hemisphere given in `options`, and `renderer` is called
/// with a colorbar, no darkness adjustment, no threshold, and the column name as title. Columns where no region of the
/// parcellation matches a finite score are skipped with a warning.
///
/// # Errors
///
/// * [`NeuropaintError::TypeConversion`] if any cell of an active column is not a number. This is checked for all columns before anything is rendered.
/// * Errors of the atlas provider or the renderer, and [`NeuropaintError::VertexCountMismatch`] if mesh, background map and parcellation do not fit together.
///
/// # Examples
///
/// ```no_run
/// use neuropaint::{cortical_plot, FsAverageAtlas, PlotOptions, PlyRenderer, ScoreTable};
///
/// let table = ScoreTable::from_csv_file("effect_sizes.csv").unwrap();
/// let atlas = FsAverageAtlas::new("/path/to/subjects_dir");
/// let mut renderer = PlyRenderer::new("figures");
/// let report = cortical_plot(&table, &atlas, &mut renderer, &PlotOptions::default()).unwrap();
/// println!("Rendered columns: {:?}", report.rendered());
/// ```
pub fn cortical_plot<A, R>(table: &ScoreTable, atlas: &A, renderer: &mut R, options: &PlotOptions) -> Result<PlotReport>
where
    A: AtlasProvider,
    R: SurfaceRenderer,
{
    let columns = active_columns(table, options.columns.as_deref());
    if columns.is_empty() {
        info!("No score columns to plot.");
        return Ok(PlotReport::default());
    }

    // Convert everything up front, so a malformed table renders nothing at all.
    let mut scores: Vec<(&str, HashMap<String, f64>)> = Vec::with_capacity(columns.len());
    for column in table.columns().iter().filter(|c| columns.contains(&c.name.as_str())) {
        let values = column.to_f64()?;
        scores.push((column.name.as_str(), table.score_map(&values)));
    }

    let hemi = options.hemisphere;
    let mesh = atlas.fetch_mesh(options.resolution)?;
    let parcellation = atlas.fetch_parcellation()?;

    let surface = mesh.surface(hemi);
    let bg_map = mesh.sulcal_map(hemi);
    let region_ids = parcellation.region_ids(hemi);
    if region_ids.len() != surface.num_vertices() {
        return Err(NeuropaintError::VertexCountMismatch(
            format!("{} hemisphere parcellation", hemi), surface.num_vertices(), region_ids.len()));
    }
    if bg_map.len() != surface.num_vertices() {
        return Err(NeuropaintError::VertexCountMismatch(
            format!("{} hemisphere sulcal map", hemi), surface.num_vertices(), bg_map.len()));
    }

    let mut report = PlotReport::default();
    for (column, score_by_name) in scores {
        let painted = paint(region_ids, &parcellation.region_names, &score_by_name)?;

        if !painted.is_renderable() {
            warn!("No parcels matched for column '{}'. Skipping.", column);
            report.outcomes.push(ColumnOutcome::SkippedNoMatches { column: column.to_string() });
            continue;
        }
        debug!("Column '{}': painted {} of {} regions onto {} vertices.",
            column, painted.filled_count, parcellation.num_regions(), painted.texture.num_set());

        renderer.render(&RenderRequest {
            mesh: surface,
            stat_map: &painted.texture,
            bg_map,
            hemisphere: hemi,
            view: options.view,
            colormap: &options.colormap,
            colorbar: true,
            darkness: None,
            threshold: None,
            title: column,
        })?;

        report.outcomes.push(ColumnOutcome::Rendered {
            column: column.to_string(),
            filled_regions: painted.filled_count,
        });
    }
    Ok(report)
}
