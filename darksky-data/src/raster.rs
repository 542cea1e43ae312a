//! Load the brightness raster from a JSON document.
//!
//! The document has the shape
//!
//! ```json
//! {
//!   "resolution": 0.1,
//!   "bounds": { "min_lat": 47.0, "max_lat": 50.0, "min_lng": 10.0, "max_lng": 13.0 },
//!   "cells": [[3, 4, 0], [2, 5, 6]]
//! }
//! ```
//!
//! Rows run north to south and columns west to east. A cell value of `0`
//! marks missing data.

use std::io::{self, Read};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use darksky_core::{GridBounds, RasterError, RasterGrid};
use log::debug;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading a raster file.
#[derive(Debug, Error)]
pub enum RasterLoadError {
    /// The file could not be opened or read.
    #[error("failed to read raster {path}: {source}")]
    Io {
        /// Path of the raster file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file was not a raster document.
    #[error("failed to parse raster {path}: {source}")]
    Parse {
        /// Path of the raster file.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The document decoded but describes an invalid grid.
    #[error("invalid raster {path}: {source}")]
    Invalid {
        /// Path of the raster file.
        path: Utf8PathBuf,
        /// Validation error.
        #[source]
        source: RasterError,
    },
}

#[derive(Debug, Deserialize)]
struct RasterDocument {
    resolution: f64,
    bounds: GridBounds,
    cells: Vec<Vec<u8>>,
}

/// Read and validate the raster stored at `path`.
///
/// # Errors
///
/// Returns [`RasterLoadError`] when the file cannot be read, is not a raster
/// document, or describes an invalid grid.
pub fn load_raster(path: &Utf8Path) -> Result<RasterGrid, RasterLoadError> {
    let io_error = |source| RasterLoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(io_error)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(io_error)?;
    parse_raster(path, &contents)
}

/// Decode a raster document already held in memory.
///
/// `path` is only used to label errors.
///
/// # Errors
///
/// Returns [`RasterLoadError::Parse`] or [`RasterLoadError::Invalid`].
pub fn parse_raster(path: &Utf8Path, contents: &str) -> Result<RasterGrid, RasterLoadError> {
    let document: RasterDocument =
        serde_json::from_str(contents).map_err(|source| RasterLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    let grid = RasterGrid::new(document.resolution, document.bounds, document.cells).map_err(
        |source| RasterLoadError::Invalid {
            path: path.to_path_buf(),
            source,
        },
    )?;
    let (rows, cols) = grid.dimensions();
    debug!("loaded raster {path}: {rows}x{cols} cells at {}°", grid.resolution());
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::rstest;

    const LABEL: &str = "inline.json";

    #[rstest]
    fn parses_valid_document() {
        let json = r#"{
            "resolution": 0.1,
            "bounds": {"min_lat": 48.0, "max_lat": 48.2, "min_lng": 11.0, "max_lng": 11.3},
            "cells": [[3, 4, 0], [2, 5, 6]]
        }"#;
        let grid = parse_raster(Utf8Path::new(LABEL), json).expect("valid raster");
        assert_eq!(grid.dimensions(), (2, 3));
        let class = grid.lookup(Coord { x: 11.05, y: 48.05 }).expect("covered");
        assert_eq!(class.get(), 2);
        assert!(grid.lookup(Coord { x: 11.25, y: 48.15 }).is_none());
    }

    #[rstest]
    #[case(r#"{"resolution": 0.1}"#)]
    #[case("not json")]
    fn rejects_malformed_document(#[case] json: &str) {
        let err = parse_raster(Utf8Path::new(LABEL), json).expect_err("malformed");
        assert!(matches!(err, RasterLoadError::Parse { .. }));
    }

    #[rstest]
    fn rejects_ragged_rows() {
        let json = r#"{
            "resolution": 0.1,
            "bounds": {"min_lat": 48.0, "max_lat": 48.2, "min_lng": 11.0, "max_lng": 11.3},
            "cells": [[3, 4, 5], [2]]
        }"#;
        let err = parse_raster(Utf8Path::new(LABEL), json).expect_err("ragged");
        assert!(matches!(
            err,
            RasterLoadError::Invalid {
                source: RasterError::RaggedRow { .. },
                ..
            }
        ));
    }
}
