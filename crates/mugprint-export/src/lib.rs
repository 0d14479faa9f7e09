//! mugprint-export: Oversampled PNG export (sans-IO)
//!
//! Re-rasterizes the painted frame at print density and encodes it as
//! PNG bytes. Triggering the actual download is `mugprint-io`'s job.

pub mod png;

pub use png::{
    EXPORT_FILENAME, Export, ExportError, OVERSAMPLING, PNG_MIME, encode_png, export_frame,
    export_latest, straight_rgba,
};
