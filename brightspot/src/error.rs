// THEORY:
// Every per-frame anomaly in this engine is modelled as filtering: a region that
// is too small, too large or degenerate simply does not show up. The only
// failures a user can ever see are configuration failures at startup, and they
// all live in this one enum.

use std::path::PathBuf;

/// Errors raised while loading or validating a configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("overlay colour palette is empty")]
    EmptyPalette,
    #[error("max_area ({max}) is smaller than min_area ({min})")]
    InvertedAreaBounds { min: f64, max: f64 },
    #[error("min_area must be a non-negative number, got {0}")]
    NegativeMinArea(f64),
    #[error("capture resolution {width}x{height} is not usable")]
    InvalidResolution { width: u32, height: u32 },
    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
