pub mod gpx;

use thiserror::Error;

/// Per-file parse failure. Caught at the file boundary by the
/// aggregator; never aborts the batch.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed gpx: {0}")]
    Gpx(#[from] ::gpx::errors::GpxError),
}
