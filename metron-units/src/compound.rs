//! Compound units: products and quotients of units
//!
//! A compound unit owns its operands outright, so trees are built fresh per
//! operation and can never contain a cycle. It has no system of its own; its
//! scale is derived from the leaves whenever a quantity is converted.

use std::fmt;
use crate::unit::{Unit, UnitId};
use crate::Units;

/// Binary tree of unit operations
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CompoundUnit {
    Primitive(UnitId),
    Product(Box<CompoundUnit>, Box<CompoundUnit>),
    Quotient(Box<CompoundUnit>, Box<CompoundUnit>),
}

impl CompoundUnit {
    pub fn product(left: impl Into<CompoundUnit>, right: impl Into<CompoundUnit>) -> Self {
        CompoundUnit::Product(Box::new(left.into()), Box::new(right.into()))
    }

    pub fn quotient(left: impl Into<CompoundUnit>, right: impl Into<CompoundUnit>) -> Self {
        CompoundUnit::Quotient(Box::new(left.into()), Box::new(right.into()))
    }

    /// A rate is a compound unit whose top-level operation is a quotient
    pub fn is_rate(&self) -> bool {
        matches!(self, CompoundUnit::Quotient(..))
    }

    pub fn as_primitive(&self) -> Option<UnitId> {
        match self {
            CompoundUnit::Primitive(id) => Some(*id),
            _ => None,
        }
    }

    /// Numerator and denominator of a rate
    pub fn as_quotient(&self) -> Option<(&CompoundUnit, &CompoundUnit)> {
        match self {
            CompoundUnit::Quotient(n, d) => Some((n, d)),
            _ => None,
        }
    }

    /// Renders as `a<op>b`, recursively, left to right
    pub fn display<'a>(&'a self, units: &'a Units) -> CompoundDisplay<'a> {
        CompoundDisplay { unit: self, units }
    }
}

impl From<UnitId> for CompoundUnit {
    fn from(id: UnitId) -> Self {
        CompoundUnit::Primitive(id)
    }
}

impl From<&Unit> for CompoundUnit {
    fn from(unit: &Unit) -> Self {
        CompoundUnit::Primitive(unit.id)
    }
}

/// Display adapter returned by `CompoundUnit::display`
pub struct CompoundDisplay<'a> {
    unit: &'a CompoundUnit,
    units: &'a Units,
}

impl fmt::Display for CompoundDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            CompoundUnit::Primitive(id) => match self.units.unit(*id) {
                Some(unit) => write!(f, "{}", unit),
                None => write!(f, "?"),
            },
            CompoundUnit::Product(l, r) => {
                write!(f, "{}*{}", l.display(self.units), r.display(self.units))
            }
            CompoundUnit::Quotient(l, r) => {
                write!(f, "{}/{}", l.display(self.units), r.display(self.units))
            }
        }
    }
}
