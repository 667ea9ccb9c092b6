use crate::model::{GeoDataDocument, NamedPoint, TrackEntry};
use crate::parsers;
use crate::simplify;
use geo::Point;
use indicatif::ParallelProgressIterator;
use log::{info, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

struct FileResult {
    track: Option<TrackEntry>,
    heat_points: Vec<Point>,
    named_points: Vec<NamedPoint>,
}

/// Walk `root` recursively (following symlinks), parse every `.gpx`
/// file (extension matched case-insensitively), simplify each segment
/// with `stride`, and merge everything into one document in discovery
/// order. Files that fail to parse are logged and skipped; they never
/// abort the batch. An empty result is an expected outcome for an
/// empty input set and is left to the caller to report.
pub fn aggregate(root: &Path, stride: usize) -> GeoDataDocument {
    let files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("gpx"))
        })
        .map(|entry| entry.into_path())
        .collect();

    info!("found {} gpx files under {}", files.len(), root.display());

    // Per-file work is independent; rayon's ordered collect keeps the
    // merge in discovery order.
    let results: Vec<FileResult> = files
        .into_par_iter()
        .progress()
        .filter_map(|path| process_file(&path, stride))
        .collect();

    let mut document = GeoDataDocument::default();
    for result in results {
        if let Some(track) = result.track {
            document.tracks.push(track);
        }
        document.heat_points.extend(result.heat_points);
        document.named_points.extend(result.named_points);
    }
    document
}

fn process_file(path: &Path, stride: usize) -> Option<FileResult> {
    let parsed = match parsers::gpx::parse_track_file(path) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("skipping {}: {}", path.display(), e);
            return None;
        }
    };

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let segments: Vec<Vec<Point>> = parsed
        .segments
        .iter()
        .map(|segment| simplify::stride(segment, stride))
        .collect();
    let heat_points: Vec<Point> = segments.iter().flatten().copied().collect();

    // a file whose segments hold no points contributes no track entry
    let track = (!segments.is_empty()).then(|| TrackEntry {
        filename: filename.clone(),
        segments,
    });

    let named_points = parsed
        .named_points
        .into_iter()
        .map(|(point, name)| NamedPoint {
            point,
            name,
            filename: filename.clone(),
        })
        .collect();

    Some(FileResult {
        track,
        heat_points,
        named_points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempdir::TempDir;

    fn write_gpx(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    fn track_gpx(segments: &[usize]) -> String {
        let mut out = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<gpx version=\"1.1\" creator=\"test\">\n<trk>\n",
        );
        for (s, count) in segments.iter().enumerate() {
            out.push_str("<trkseg>\n");
            for i in 0..*count {
                out.push_str(&format!(
                    "<trkpt lat=\"{:.4}\" lon=\"{:.4}\"></trkpt>\n",
                    44.0 + s as f64, 30.0 + i as f64 * 0.001
                ));
            }
            out.push_str("</trkseg>\n");
        }
        out.push_str("</trk>\n</gpx>\n");
        out
    }

    #[test]
    fn stride_five_over_two_segments() {
        let dir = TempDir::new("aggregate").unwrap();
        write_gpx(dir.path(), "ride.gpx", &track_gpx(&[12, 3]));

        let document = aggregate(dir.path(), 5);
        assert_eq!(document.tracks.len(), 1);
        let track = &document.tracks[0];
        assert_eq!(track.filename, "ride.gpx");
        assert_eq!(track.segments.len(), 2);
        assert_eq!(track.segments[0].len(), 3); // indices 0, 5, 10
        assert_eq!(track.segments[1].len(), 1); // index 0
        assert_eq!(document.heat_points.len(), 4);
        assert_eq!(track.segments[0][1], Point::new(30.005, 44.0));
    }

    #[test]
    fn empty_directory_aggregates_to_empty_document() {
        let dir = TempDir::new("aggregate").unwrap();
        let document = aggregate(dir.path(), 5);
        assert!(document.tracks.is_empty());
        assert!(document.heat_points.is_empty());
        assert!(document.named_points.is_empty());
    }

    #[test]
    fn unparseable_file_is_skipped_without_aborting() {
        let dir = TempDir::new("aggregate").unwrap();
        write_gpx(dir.path(), "broken.gpx", "<gpx><trk>");
        write_gpx(dir.path(), "good.gpx", &track_gpx(&[2]));

        let document = aggregate(dir.path(), 1);
        assert_eq!(document.tracks.len(), 1);
        assert_eq!(document.tracks[0].filename, "good.gpx");
    }

    #[test]
    fn extension_match_is_case_insensitive_and_recursive() {
        let dir = TempDir::new("aggregate").unwrap();
        let nested = dir.path().join("2024").join("spring");
        fs::create_dir_all(&nested).unwrap();
        write_gpx(&nested, "upper.GPX", &track_gpx(&[2]));
        write_gpx(dir.path(), "notes.txt", "not a track");

        let document = aggregate(dir.path(), 1);
        assert_eq!(document.tracks.len(), 1);
        assert_eq!(document.tracks[0].filename, "upper.GPX");
    }

    #[test]
    fn waypoint_only_file_contributes_no_track_entry() {
        let dir = TempDir::new("aggregate").unwrap();
        write_gpx(
            dir.path(),
            "WP_WAR_RB_01.gpx",
            "<?xml version=\"1.0\"?>\n<gpx version=\"1.1\" creator=\"test\">\n<wpt lat=\"44.5\" lon=\"30.5\"><name>Camp</name></wpt>\n</gpx>\n",
        );

        let document = aggregate(dir.path(), 5);
        assert!(document.tracks.is_empty());
        assert_eq!(document.named_points.len(), 1);
        let point = &document.named_points[0];
        assert_eq!(point.name, "Camp");
        assert_eq!(point.filename, "WP_WAR_RB_01.gpx");
        assert_eq!(
            crate::classify::category_for(&point.filename),
            crate::classify::MarkerCategory::Warning
        );
        assert_eq!(
            crate::classify::display_group(&point.filename),
            crate::classify::DisplayGroup::General
        );
    }

    #[test]
    fn heat_points_follow_per_file_order() {
        let dir = TempDir::new("aggregate").unwrap();
        write_gpx(dir.path(), "a.gpx", &track_gpx(&[4]));

        let document = aggregate(dir.path(), 1);
        let flattened: Vec<Point> = document
            .tracks
            .iter()
            .flat_map(|t| t.coords())
            .collect();
        assert_eq!(flattened, document.heat_points);
        for pair in document.heat_points.windows(2) {
            assert!(pair[0].x() < pair[1].x());
        }
    }
}
