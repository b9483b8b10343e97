//! Opaque hexagonal cell identifier.
//!
//! `GeoCellId` wraps an H3 cell index. Outside the core it is only ever seen
//! as its canonical string form (lowercase hexadecimal), so collaborators can
//! store, compare, and hash it without knowing how it is built.

use h3o::CellIndex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a string or integer is not a valid cell identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellParseError {
    input: String,
    reason: String,
}

impl CellParseError {
    pub fn new(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// The rejected input, as received.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for CellParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid cell id: {}", self.input, self.reason)
    }
}

impl std::error::Error for CellParseError {}

/// Identifier of one cell of the global hexagonal grid at a fixed resolution.
///
/// A `GeoCellId` always holds a well-formed cell, so code that receives one
/// never has to re-validate it.
///
/// # Examples
///
/// ```
/// use cellwatch_types::cell::GeoCellId;
///
/// let cell: GeoCellId = "8828308281fffff".parse().unwrap();
/// assert_eq!(cell.resolution(), 8);
/// assert_eq!(cell.to_string(), "8828308281fffff");
///
/// assert!("not-a-cell".parse::<GeoCellId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GeoCellId(CellIndex);

impl GeoCellId {
    /// Resolution level the cell belongs to (0 = coarsest, 15 = finest).
    #[inline]
    pub fn resolution(&self) -> u8 {
        u8::from(self.0.resolution())
    }

    /// Whether the cell is one of the twelve pentagons of its resolution.
    #[inline]
    pub fn is_pentagon(&self) -> bool {
        self.0.is_pentagon()
    }

    /// Access the underlying H3 index.
    #[inline]
    pub fn inner(&self) -> CellIndex {
        self.0
    }
}

impl From<CellIndex> for GeoCellId {
    fn from(index: CellIndex) -> Self {
        Self(index)
    }
}

impl From<GeoCellId> for CellIndex {
    fn from(cell: GeoCellId) -> Self {
        cell.0
    }
}

impl TryFrom<u64> for GeoCellId {
    type Error = CellParseError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        CellIndex::try_from(value)
            .map(Self)
            .map_err(|e| CellParseError::new(format!("{value:#x}"), e.to_string()))
    }
}

impl FromStr for GeoCellId {
    type Err = CellParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CellParseError::new(s, "empty identifier"));
        }
        trimmed
            .parse::<CellIndex>()
            .map(Self)
            .map_err(|e| CellParseError::new(s, e.to_string()))
    }
}

impl TryFrom<String> for GeoCellId {
    type Error = CellParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GeoCellId> for String {
    fn from(cell: GeoCellId) -> Self {
        cell.to_string()
    }
}

impl fmt::Display for GeoCellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
