//! Error types for Cellwatch.

use cellwatch_types::cell::CellParseError;
use cellwatch_types::record::RecordKind;
use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, CellwatchError>;

#[derive(Debug, Error)]
pub enum CellwatchError {
    /// Latitude/longitude out of range or not finite.
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Resolution outside what the hexagonal grid supports.
    #[error("Invalid resolution: {0} (supported range 0..=15)")]
    InvalidResolution(u32),

    /// Cell literal that does not decode to a grid cell.
    #[error("Invalid cell: {0}")]
    InvalidCell(String),

    #[error("{kind} not found")]
    NotFound { kind: RecordKind, id: Uuid },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<CellParseError> for CellwatchError {
    fn from(e: CellParseError) -> Self {
        Self::InvalidCell(e.to_string())
    }
}

impl CellwatchError {
    pub(crate) fn not_found(kind: RecordKind, id: Uuid) -> Self {
        Self::NotFound { kind, id }
    }

    /// True for errors caused by the caller's input rather than by state.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidCoordinate(_) | Self::InvalidResolution(_) | Self::InvalidCell(_)
        )
    }
}
