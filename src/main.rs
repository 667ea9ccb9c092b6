use clap::{CommandFactory, Parser};
use gpxmap::classify::{self, DisplayGroup, MarkerCategory};
use gpxmap::distance::DistanceEngine;
use gpxmap::model::GeoDataDocument;
use gpxmap::{aggregate, viewer, writer};
use log::{error, info, warn};
use std::path::Path;
use std::process::ExitCode;

pub const TRACKS_DIR: &str = "tracks";
pub const GEODATA_PATH: &str = "geo_data.json.gz";
pub const VIEWER_PATH: &str = "index.html";
pub const OVERLAY_PATH: &str = "deepstate.geojson";

// fixed simplification stride for a generation run
pub const POINT_STRIDE: usize = 5;

#[derive(Parser)]
#[command(name = "gpxmap")]
#[command(about = "Aggregate GPX tracks into a map document and viewer")]
struct Cli {
    /// Aggregate the tracks directory and write the geodata artifact
    #[arg(long)]
    geodata: bool,
    /// Emit the viewer HTML document
    #[arg(long)]
    html: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if !cli.geodata && !cli.html {
        let _ = Cli::command().print_help();
        return ExitCode::SUCCESS;
    }

    if cli.geodata && !run_geodata() {
        return ExitCode::FAILURE;
    }

    if cli.html {
        match viewer::write_viewer(
            Path::new(VIEWER_PATH),
            Path::new(GEODATA_PATH),
            Path::new(OVERLAY_PATH),
        ) {
            Ok(()) => info!("viewer saved to {}", VIEWER_PATH),
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

fn run_geodata() -> bool {
    let document = aggregate::aggregate(Path::new(TRACKS_DIR), POINT_STRIDE);
    log_summary(&document);

    if document.tracks.is_empty() {
        // expected terminal state for an empty input set, not a failure
        warn!("no tracks found under {}, skipping geodata output", TRACKS_DIR);
        return true;
    }

    match writer::write_geodata(&document, Path::new(GEODATA_PATH)) {
        Ok(()) => {
            info!("geodata saved to {}", GEODATA_PATH);
            true
        }
        Err(e) => {
            error!("{}", e);
            false
        }
    }
}

fn log_summary(document: &GeoDataDocument) {
    info!(
        "{} tracks, {} heat points, {} named points",
        document.tracks.len(),
        document.heat_points.len(),
        document.named_points.len()
    );

    let total_km: f64 = document
        .tracks
        .iter()
        .flat_map(|track| &track.segments)
        .map(|segment| DistanceEngine::new(segment).total_km())
        .sum();
    info!("total simplified track distance: {:.1} km", total_km);

    let todo = document
        .named_points
        .iter()
        .filter(|p| classify::display_group(&p.filename) == DisplayGroup::Todo)
        .count();
    let warnings = document
        .named_points
        .iter()
        .filter(|p| classify::category_for(&p.filename) == MarkerCategory::Warning)
        .count();
    if !document.named_points.is_empty() {
        info!(
            "markers: {} in the to-do group, {} warnings",
            todo, warnings
        );
    }
}
