//! Error types used by the crate.

use mapscale_types::error::MapScaleTypesError;
use mapscale_types::Point2d;
use thiserror::Error;

/// Mapscale error type.
#[derive(Debug, Error)]
pub enum MapScaleError {
    /// The screen point cannot be converted into geographic coordinates by the current
    /// projection, e.g. because it is outside of the visible part of the globe.
    #[error("screen point ({}, {}) cannot be projected", .0.x, .0.y)]
    Unprojectable(Point2d),
    /// Invalid configuration parameter.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Invalid geometry.
    #[error(transparent)]
    Types(#[from] MapScaleTypesError),
}
