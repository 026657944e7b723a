use neuropaint::{
    cortical_plot, AtlasProvider, BrainMesh, ColumnOutcome, Hemisphere, MeshResolution, NeuropaintError,
    PlotOptions, RenderRequest, Result, ScoreCell, ScoreTable, SurfaceAtlas, SurfaceRenderer, TemplateMesh, View,
};

use std::cell::Cell;

/// An in-memory atlas: 5 left vertices in regions [0,0,1,1,2] and 3 right vertices in regions [2,2,0].
struct DemoAtlas {
    fetches: Cell<usize>,
}

fn mesh_with_vertices(n: usize) -> BrainMesh {
    BrainMesh {
        vertices: vec![0.0; n * 3],
        faces: vec![],
    }
}

impl AtlasProvider for DemoAtlas {
    fn fetch_mesh(&self, _resolution: MeshResolution) -> Result<TemplateMesh> {
        self.fetches.set(self.fetches.get() + 1);
        Ok(TemplateMesh {
            left_inflated_surface: mesh_with_vertices(5),
            right_inflated_surface: mesh_with_vertices(3),
            left_sulcal_map: vec![0.0; 5],
            right_sulcal_map: vec![1.0; 3],
        })
    }

    fn fetch_parcellation(&self) -> Result<SurfaceAtlas> {
        Ok(SurfaceAtlas {
            left_region_id_per_vertex: vec![0, 0, 1, 1, 2],
            right_region_id_per_vertex: vec![2, 2, 0],
            region_names: vec![String::from("A"), String::from("B"), String::from("C")],
        })
    }
}

fn demo_atlas() -> DemoAtlas {
    DemoAtlas { fetches: Cell::new(0) }
}

/// Records what would have been drawn.
#[derive(Default)]
struct RecordingRenderer {
    calls: Vec<(String, Vec<Option<f64>>, Hemisphere, View, String, bool, Option<f32>, Option<f64>, usize)>,
}

impl SurfaceRenderer for RecordingRenderer {
    fn render(&mut self, request: &RenderRequest) -> Result<()> {
        self.calls.push((
            request.title.to_string(),
            request.stat_map.values().to_vec(),
            request.hemisphere,
            request.view,
            request.colormap.to_string(),
            request.colorbar,
            request.darkness,
            request.threshold,
            request.bg_map.len(),
        ));
        Ok(())
    }
}

fn table(labels: &[&str], columns: &[(&str, &[f64])]) -> ScoreTable {
    let mut table = ScoreTable::new(labels.to_vec());
    for (name, values) in columns {
        table.add_numeric_column(name, values).unwrap();
    }
    table
}

#[test]
fn regions_with_finite_scores_are_painted_and_rendered() {
    let t = table(&["A", "C"], &[("effect", &[1.5, f64::NAN])]);
    let atlas = demo_atlas();
    let mut renderer = RecordingRenderer::default();

    let report = cortical_plot(&t, &atlas, &mut renderer, &PlotOptions::default()).unwrap();

    assert_eq!(vec![ColumnOutcome::Rendered { column: String::from("effect"), filled_regions: 1 }], report.outcomes);
    assert_eq!(1, renderer.calls.len());
    let (title, values, hemi, view, cmap, colorbar, darkness, threshold, bg_len) = &renderer.calls[0];
    assert_eq!("effect", title);
    assert_eq!(&vec![Some(1.5), Some(1.5), None, None, None], values);
    assert_eq!(Hemisphere::Left, *hemi);
    assert_eq!(View::Lateral, *view);
    assert_eq!("gist_ncar", cmap);
    assert!(*colorbar);
    assert_eq!(None, *darkness);
    assert_eq!(None, *threshold);
    assert_eq!(5, *bg_len);
}

#[test]
fn columns_without_matching_regions_are_skipped() {
    let t = table(&["X", "Y"], &[("nomatch", &[1.0, 2.0]), ("allnan", &[f64::NAN, f64::NAN])]);
    let mut renderer = RecordingRenderer::default();

    let report = cortical_plot(&t, &demo_atlas(), &mut renderer, &PlotOptions::default()).unwrap();

    assert!(renderer.calls.is_empty());
    assert_eq!(vec!["nomatch", "allnan"], report.skipped());
    assert!(report.rendered().is_empty());
}

#[test]
fn an_empty_table_renders_nothing() {
    let t = table(&[], &[("effect", &[])]);
    let mut renderer = RecordingRenderer::default();

    let report = cortical_plot(&t, &demo_atlas(), &mut renderer, &PlotOptions::default()).unwrap();

    assert!(renderer.calls.is_empty());
    assert_eq!(vec!["effect"], report.skipped());
}

#[test]
fn a_skipped_column_does_not_stop_later_columns() {
    let t = table(&["A", "B"], &[("first", &[f64::NAN, f64::INFINITY]), ("second", &[0.0, -1.0])]);
    let mut renderer = RecordingRenderer::default();

    let report = cortical_plot(&t, &demo_atlas(), &mut renderer, &PlotOptions::default()).unwrap();

    assert_eq!(vec!["first"], report.skipped());
    assert_eq!(vec!["second"], report.rendered());
    assert_eq!(&vec![Some(0.0), Some(0.0), Some(-1.0), Some(-1.0), None], &renderer.calls[0].1);
}

#[test]
fn duplicate_labels_use_the_last_row() {
    let t = table(&["A", "A"], &[("effect", &[2.0, 3.0])]);
    let mut renderer = RecordingRenderer::default();

    cortical_plot(&t, &demo_atlas(), &mut renderer, &PlotOptions::default()).unwrap();

    assert_eq!(&vec![Some(3.0), Some(3.0), None, None, None], &renderer.calls[0].1);
}

#[test]
fn the_selected_hemisphere_and_view_are_used() {
    let t = table(&["A", "C"], &[("effect", &[1.0, 2.0])]);
    let mut renderer = RecordingRenderer::default();
    let opts = PlotOptions {
        hemisphere: Hemisphere::Right,
        view: View::Ventral,
        colormap: String::from("viridis"),
        ..PlotOptions::default()
    };

    cortical_plot(&t, &demo_atlas(), &mut renderer, &opts).unwrap();

    let (_, values, hemi, view, cmap, _, _, _, bg_len) = &renderer.calls[0];
    assert_eq!(&vec![Some(2.0), Some(2.0), Some(1.0)], values);
    assert_eq!(Hemisphere::Right, *hemi);
    assert_eq!(View::Ventral, *view);
    assert_eq!("viridis", cmap);
    assert_eq!(3, *bg_len);
}

#[test]
fn the_column_filter_restricts_rendering_in_table_order() {
    let t = table(&["A"], &[("x", &[1.0]), ("y", &[2.0]), ("z", &[3.0])]);
    let mut renderer = RecordingRenderer::default();
    let opts = PlotOptions {
        columns: Some(vec![String::from("z"), String::from("x"), String::from("missing")]),
        ..PlotOptions::default()
    };

    let report = cortical_plot(&t, &demo_atlas(), &mut renderer, &opts).unwrap();

    assert_eq!(vec!["x", "z"], report.rendered());
    let titles: Vec<&str> = renderer.calls.iter().map(|c| c.0.as_str()).collect();
    assert_eq!(vec!["x", "z"], titles);
}

#[test]
fn a_filter_matching_no_column_renders_nothing_and_fetches_nothing() {
    let t = table(&["A"], &[("x", &[1.0])]);
    let atlas = demo_atlas();
    let mut renderer = RecordingRenderer::default();
    let opts = PlotOptions {
        columns: Some(vec![String::from("nope")]),
        ..PlotOptions::default()
    };

    let report = cortical_plot(&t, &atlas, &mut renderer, &opts).unwrap();

    assert!(report.outcomes.is_empty());
    assert!(renderer.calls.is_empty());
    assert_eq!(0, atlas.fetches.get());
}

#[test]
fn the_mesh_is_fetched_once_for_all_columns() {
    let t = table(&["A"], &[("x", &[1.0]), ("y", &[2.0])]);
    let atlas = demo_atlas();
    let mut renderer = RecordingRenderer::default();

    cortical_plot(&t, &atlas, &mut renderer, &PlotOptions::default()).unwrap();

    assert_eq!(2, renderer.calls.len());
    assert_eq!(1, atlas.fetches.get());
}

#[test]
fn a_non_numeric_cell_aborts_before_anything_is_rendered() {
    let mut t = table(&["A", "B"], &[("good", &[1.0, 2.0])]);
    t.add_column("bad", vec![ScoreCell::from("1.0"), ScoreCell::from("large")]).unwrap();
    let mut renderer = RecordingRenderer::default();

    let result = cortical_plot(&t, &demo_atlas(), &mut renderer, &PlotOptions::default());

    match result {
        Err(NeuropaintError::TypeConversion(column, row, value)) => {
            assert_eq!("bad", column);
            assert_eq!(1, row);
            assert_eq!("large", value);
        }
        other => panic!("Expected a type conversion error, got {:?}", other),
    }
    assert!(renderer.calls.is_empty());
}

#[test]
fn text_cells_are_coerced_to_numbers() {
    let mut t = ScoreTable::new(vec!["A", "B", "C"]);
    t.add_column("effect", vec![ScoreCell::from(" 4.5"), ScoreCell::Missing, ScoreCell::from("nan")]).unwrap();
    let mut renderer = RecordingRenderer::default();

    let report = cortical_plot(&t, &demo_atlas(), &mut renderer, &PlotOptions::default()).unwrap();

    assert_eq!(vec![ColumnOutcome::Rendered { column: String::from("effect"), filled_regions: 1 }], report.outcomes);
    assert_eq!(&vec![Some(4.5), Some(4.5), None, None, None], &renderer.calls[0].1);
}

struct BrokenAtlas;

impl AtlasProvider for BrokenAtlas {
    fn fetch_mesh(&self, resolution: MeshResolution) -> Result<TemplateMesh> {
        demo_atlas().fetch_mesh(resolution)
    }

    fn fetch_parcellation(&self) -> Result<SurfaceAtlas> {
        Ok(SurfaceAtlas {
            left_region_id_per_vertex: vec![0, 0, 1, 1, 7],
            right_region_id_per_vertex: vec![0, 0],
            region_names: vec![String::from("A"), String::from("B")],
        })
    }
}

#[test]
fn malformed_parcellations_are_errors() {
    let t = table(&["A"], &[("x", &[1.0])]);
    let mut renderer = RecordingRenderer::default();

    let left = cortical_plot(&t, &BrokenAtlas, &mut renderer, &PlotOptions::default());
    assert!(matches!(left, Err(NeuropaintError::RegionIndexOutOfRange(4, 7, 2))));

    let opts = PlotOptions { hemisphere: Hemisphere::Right, ..PlotOptions::default() };
    let right = cortical_plot(&t, &BrokenAtlas, &mut renderer, &opts);
    assert!(matches!(right, Err(NeuropaintError::VertexCountMismatch(_, 3, 2))));

    assert!(renderer.calls.is_empty());
}
