///
/// cortical_plot_ply -- neuropaint example application that paints region-wise scores onto the fsaverage brain and exports PLY meshes
///
/// To run this application, run 'cargo run --release -- <scores.csv> <subjects_dir> [--hemi right] [--view medial] [--columns effect,pvalue]' in the demos/cortical_plot_ply directory.
/// The subjects_dir must contain the FreeSurfer 'fsaverage5' subject ('fsaverage' for '--resolution high'). Set RUST_LOG=info to see what is written.
///

use clap::Parser;
use log::error;
use neuropaint::{cortical_plot, FsAverageAtlas, Hemisphere, MeshResolution, PlotOptions, PlyRenderer, ScoreTable, View};

use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "cortical_plot_ply", version, about = "Paint region-wise scores onto the fsaverage brain and export PLY meshes", long_about = None)]
struct Args {
    /// CSV file with a 'label' column of region names and one or more score columns
    scores: PathBuf,

    /// FreeSurfer subjects dir containing the fsaverage template subjects
    subjects_dir: PathBuf,

    /// Hemisphere to plot (left or right)
    #[arg(long, default_value = "left")]
    hemi: Hemisphere,

    /// Camera view (lateral, medial, dorsal, ventral, anterior, posterior)
    #[arg(long, default_value = "lateral")]
    view: View,

    /// Colormap name, append '_r' to reverse it
    #[arg(long, default_value = "gist_ncar")]
    cmap: String,

    /// Template mesh resolution (low = fsaverage5, high = fsaverage)
    #[arg(long, default_value = "low")]
    resolution: MeshResolution,

    /// Score columns to plot (comma-separated). Plots all score columns if omitted.
    #[arg(long, value_delimiter = ',')]
    columns: Vec<String>,

    /// Directory the PLY files are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let opts = PlotOptions {
        hemisphere: args.hemi,
        columns: if args.columns.is_empty() { None } else { Some(args.columns.clone()) },
        view: args.view,
        colormap: args.cmap.clone(),
        resolution: args.resolution,
    };

    println!("=====[ cortical_plot_ply -- neuropaint score painting example application ]=====");
    println!("Loading scores from '{}'...", args.scores.display());
    let table = match ScoreTable::from_csv_file(&args.scores) {
        Ok(t) => t,
        Err(e) => {
            error!("Could not read score table: {}", e);
            process::exit(1);
        }
    };
    println!("Found {} regions and score columns {:?}.", table.num_rows(), table.score_columns());

    let atlas = FsAverageAtlas::new(&args.subjects_dir);
    let mut renderer = PlyRenderer::new(&args.output_dir);

    match cortical_plot(&table, &atlas, &mut renderer, &opts) {
        Ok(report) => {
            for path in renderer.written() {
                println!("Exported vertex-colored PLY mesh to: {}", path.display());
            }
            if !report.skipped().is_empty() {
                println!("Skipped columns without matching regions: {:?}", report.skipped());
            }
            println!("Note: You can view the meshes with a mesh viewer software like Blender or MeshLab.");
        }
        Err(e) => {
            error!("Plotting failed: {}", e);
            process::exit(1);
        }
    }
}
