//! Metron Core - Fundamental types
//!
//! This crate provides the types shared by the Metron crates:
//! - `UnitError`: Every failure the unit engine reports, with stable codes
//! - `ErrorReport`: Serializable view of an error
//! - `parse_literal`: Numeric literal parsing (exact integers, floats)

mod error;
mod number;

pub use error::{codes, ErrorReport, UnitError};
pub use number::{is_integer_literal, parse_literal, scan_literal, NumberError};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{ErrorReport, UnitError};
    pub use crate::error::codes;
}
