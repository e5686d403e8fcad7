//! Metron Units - Unit-of-measure algebra
//!
//! Register measurement systems, define units within each system as linear
//! scale factors, link systems with conversion edges, then parse, convert and
//! combine quantities.
//!
//! Components:
//! - `UnitSystem`: the catalog of one system, with metric and binary prefix families
//! - `CompoundUnit`: products and quotients of units (rates such as km/hr)
//! - `Units`: the registry of systems and the graph of conversions between them
//! - `Quantity`: an immutable value with a unit, with conversion and arithmetic
//! - `Units::parse`: quantity strings like "50km/hr"
//!
//! ```
//! use metron_units::{Units, UnitOptions, FamilyOptions};
//!
//! let mut units = Units::new();
//! units.system("length")?.metric("meter", FamilyOptions::new().symbol("m"))?;
//! units.system("time")?
//!     .metric("second", FamilyOptions::new().symbol("s"))?
//!     .unit("hour", 3600.0, UnitOptions::new().symbol("hr"))?;
//! units.seal();
//!
//! let speed = units.parse("100 km")?.divided_by(&units.parse("2 hours")?)?;
//! assert_eq!(speed.to_string(), "50 km/hr");
//!
//! let distance = speed.multiply_by(&units.parse("3 hr")?)?;
//! assert_eq!(distance.in_unit("meter")?.value(), 150_000.0);
//! # Ok::<(), metron_core::UnitError>(())
//! ```

mod unit;
mod prefix;
mod system;
mod compound;
mod conversion;
mod registry;
mod quantity;
mod parse;

#[cfg(test)]
mod test_support;

pub use unit::{SystemId, Unit, UnitId, UnitOptions, UnitRef};
pub use prefix::{FamilyOptions, Prefix, BINARY_PREFIXES, METRIC_PREFIXES};
pub use system::{SystemBuilder, UnitSystem};
pub use compound::{CompoundDisplay, CompoundUnit};
pub use conversion::{Conversion, ScaleFn, Transform};
pub use registry::{SystemRef, Units};
pub use quantity::{Operand, Quantity};
pub use metron_core::UnitError;
