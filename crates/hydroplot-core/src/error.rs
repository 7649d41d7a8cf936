// File: crates/hydroplot-core/src/error.rs
// Summary: Typed error taxonomy returned by every fallible call in the crate.

use std::path::PathBuf;

/// Coarse grouping of [`PlotError`] variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// The caller passed invalid input.
    ContractViolation,
    /// The renderer rejected the chart parameters.
    RenderingFailure,
    /// Writing the image failed.
    ExportFailure,
}

/// Errors produced while shaping series, rendering or exporting charts.
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    /// Two sequences that are zipped together differ in length.
    #[error("length mismatch: {xs} x values vs {ys} y values")]
    LengthMismatch { xs: usize, ys: usize },

    /// A series label has no entry in a required colour map.
    #[error("no colour configured for series `{0}`")]
    UnknownLabel(String),

    /// A chart that cannot be drawn without data received none.
    #[error("{0}: no values to plot")]
    EmptySeries(&'static str),

    /// The renderer refused the parameters or failed to draw.
    #[error("render error: {0}")]
    Render(String),

    /// Creating the output directory or file failed.
    #[error("I/O error writing `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The image encoder failed or does not support the output extension.
    #[error("encoding `{path}` failed: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl PlotError {
    pub fn class(&self) -> ErrorClass {
        match self {
            PlotError::LengthMismatch { .. } | PlotError::UnknownLabel(_) | PlotError::EmptySeries(_) => {
                ErrorClass::ContractViolation
            }
            PlotError::Render(_) => ErrorClass::RenderingFailure,
            PlotError::Io { .. } | PlotError::Encode { .. } => ErrorClass::ExportFailure,
        }
    }
}

pub type Result<T, E = PlotError> = std::result::Result<T, E>;
