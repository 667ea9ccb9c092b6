use askama::Template;
use log::warn;
use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("failed to render viewer template: {0}")]
    Render(#[from] askama::Error),
    #[error("failed to write viewer document: {0}")]
    Io(#[from] std::io::Error),
}

/// The single-page map viewer. The version tokens defeat stale caches
/// of the two fetched artifacts.
#[derive(Template)]
#[template(path = "viewer.html")]
struct ViewerTemplate {
    geo_version: u64,
    overlay_version: u64,
}

/// Cache-busting token: the artifact's last-modified time in seconds
/// since the epoch. A missing artifact gets token 0 instead of
/// aborting; the overlay in particular is externally supplied and may
/// not be present yet.
fn version_token(path: &Path) -> u64 {
    match fs::metadata(path).and_then(|meta| meta.modified()) {
        Ok(modified) => modified
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0),
        Err(e) => {
            warn!("no version token for {}: {}", path.display(), e);
            0
        }
    }
}

pub fn render_viewer(geodata_path: &Path, overlay_path: &Path) -> Result<String, ViewerError> {
    let template = ViewerTemplate {
        geo_version: version_token(geodata_path),
        overlay_version: version_token(overlay_path),
    };
    Ok(template.render()?)
}

pub fn write_viewer(
    out_path: &Path,
    geodata_path: &Path,
    overlay_path: &Path,
) -> Result<(), ViewerError> {
    let html = render_viewer(geodata_path, overlay_path)?;
    fs::write(out_path, html)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn render_embeds_version_tokens() {
        let dir = TempDir::new("viewer").unwrap();
        let geodata = dir.path().join("geo_data.json.gz");
        fs::write(&geodata, b"x").unwrap();
        let overlay = dir.path().join("deepstate.geojson");

        let html = render_viewer(&geodata, &overlay).unwrap();
        let token = version_token(&geodata);
        assert!(token > 0);
        assert!(html.contains(&format!("geo_data.json.gz?v={token}")));
        // missing overlay falls back to token 0 rather than failing
        assert!(html.contains("deepstate.geojson?v=0"));
    }

    #[test]
    fn viewer_carries_the_render_time_classification_rules() {
        let dir = TempDir::new("viewer").unwrap();
        let html = render_viewer(
            &dir.path().join("geo_data.json.gz"),
            &dir.path().join("deepstate.geojson"),
        )
        .unwrap();
        assert!(html.contains("TODO_MAIN"));
        assert!(html.contains("WP_WAR_RB"));
        assert!(html.contains("WP_"));
        assert!(html.contains("includes(\"TODO\")"));
    }

    #[test]
    fn write_viewer_produces_the_document() {
        let dir = TempDir::new("viewer").unwrap();
        let out = dir.path().join("index.html");
        write_viewer(
            &out,
            &dir.path().join("geo_data.json.gz"),
            &dir.path().join("deepstate.geojson"),
        )
        .unwrap();
        let html = fs::read_to_string(&out).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("track-progressbar"));
    }
}
