//! GPX track aggregation for map rendering.
//!
//! The ingest side walks a directory of GPX files, simplifies each
//! recorded segment by a fixed stride, and writes one gzip-compressed
//! JSON document with tracks, heat-map points and named markers. The
//! viewer side of the crate models the distance scrubber that the
//! emitted map document drives: cumulative haversine distances and the
//! pointer/touch state machine over them.

pub mod aggregate;
pub mod classify;
pub mod distance;
pub mod model;
pub mod parsers;
pub mod scrub;
pub mod simplify;
pub mod viewer;
pub mod writer;
