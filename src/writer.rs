use crate::model::GeoDataDocument;
use flate2::Compression;
use flate2::write::GzEncoder;
use geo::Point;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to serialize geodata: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write artifact: {0}")]
    Io(#[from] std::io::Error),
}

// Wire schema. Field order is fixed by the struct definitions and
// insertion order is preserved, so identical input serializes to
// byte-identical output.
#[derive(Serialize)]
struct TrackWire<'a> {
    filename: &'a str,
    coords: Vec<[f64; 2]>,
    segments: Vec<Vec<[f64; 2]>>,
}

#[derive(Serialize)]
struct NamedPointWire<'a> {
    lat: f64,
    lon: f64,
    name: &'a str,
    filename: &'a str,
}

#[derive(Serialize)]
struct DocumentWire<'a> {
    tracks: Vec<TrackWire<'a>>,
    heat_points: Vec<[f64; 2]>,
    named_points: Vec<NamedPointWire<'a>>,
}

fn lat_lon(point: &Point) -> [f64; 2] {
    [point.y(), point.x()]
}

impl<'a> From<&'a GeoDataDocument> for DocumentWire<'a> {
    fn from(document: &'a GeoDataDocument) -> Self {
        DocumentWire {
            tracks: document
                .tracks
                .iter()
                .map(|track| TrackWire {
                    filename: &track.filename,
                    coords: track.segments.iter().flatten().map(lat_lon).collect(),
                    segments: track
                        .segments
                        .iter()
                        .map(|segment| segment.iter().map(lat_lon).collect())
                        .collect(),
                })
                .collect(),
            heat_points: document.heat_points.iter().map(lat_lon).collect(),
            named_points: document
                .named_points
                .iter()
                .map(|point| NamedPointWire {
                    lat: point.point.y(),
                    lon: point.point.x(),
                    name: &point.name,
                    filename: &point.filename,
                })
                .collect(),
        }
    }
}

/// Serialize the document as gzip-compressed JSON at `path`.
///
/// All-or-nothing: the artifact is written to a temporary sibling and
/// renamed into place, so a failure mid-write never leaves a final
/// path claiming success.
pub fn write_geodata(document: &GeoDataDocument, path: &Path) -> Result<(), WriteError> {
    let wire = DocumentWire::from(document);
    let tmp_path = tmp_sibling(path);

    if let Err(e) = write_compressed(&wire, &tmp_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_compressed(wire: &DocumentWire, path: &Path) -> Result<(), WriteError> {
    let file = File::create(path)?;
    let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    serde_json::to_writer(&mut encoder, wire)?;
    let mut inner = encoder.finish()?;
    inner.flush()?;
    Ok(())
}
