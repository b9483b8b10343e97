//! Geospatial computation: coordinate validation, cell indexing, and
//! neighborhood expansion.

pub mod geocell;
pub mod neighborhood;
pub mod validation;
