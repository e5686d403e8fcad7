//! Quantity type - a value with an associated unit

use std::fmt;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use metron_core::UnitError;
use crate::compound::CompoundUnit;
use crate::unit::{Unit, UnitRef};
use crate::Units;

/// An immutable (number, unit) pair
///
/// Every operation returns a new quantity. Quantities borrow the registry
/// their units live in.
#[derive(Clone)]
pub struct Quantity<'u> {
    value: f64,
    unit: CompoundUnit,
    units: &'u Units,
}

/// Right-hand side of `multiply_by` / `divided_by`
#[derive(Debug, Clone, Copy)]
pub enum Operand<'q, 'u> {
    Scalar(f64),
    Quantity(&'q Quantity<'u>),
}

impl From<f64> for Operand<'_, '_> {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl<'q, 'u> From<&'q Quantity<'u>> for Operand<'q, 'u> {
    fn from(q: &'q Quantity<'u>) -> Self {
        Operand::Quantity(q)
    }
}

impl<'u> Quantity<'u> {
    pub fn new(units: &'u Units, value: f64, unit: impl Into<CompoundUnit>) -> Self {
        Quantity { value, unit: unit.into(), units }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> &CompoundUnit {
        &self.unit
    }

    pub fn units(&self) -> &'u Units {
        self.units
    }

    /// The unit record, when the unit is primitive
    pub fn primitive(&self) -> Option<&'u Unit> {
        self.unit.as_primitive().and_then(|id| self.units.unit(id))
    }

    pub fn is_rate(&self) -> bool {
        self.unit.is_rate()
    }

    fn with(&self, value: f64, unit: CompoundUnit) -> Self {
        Quantity { value, unit, units: self.units }
    }

    // ========== Conversion ==========

    /// Express this quantity in another primitive unit
    pub fn in_unit<'a>(&self, target: impl Into<UnitRef<'a>>) -> Result<Self, UnitError> {
        let target = self.units.resolve(target)?;
        self.in_compound(&CompoundUnit::Primitive(target.id))
    }

    /// Express this quantity in a unit of the same shape
    ///
    /// Primitive units convert through the edge graph, including function
    /// edges. Compound units convert leaf by leaf (products multiply the leaf
    /// factors, quotients divide them), which needs every leaf path to be
    /// linear.
    pub fn in_compound(&self, target: &CompoundUnit) -> Result<Self, UnitError> {
        let value = match (&self.unit, target) {
            (CompoundUnit::Primitive(from), CompoundUnit::Primitive(to)) => {
                let from = self.units.resolve(*from)?;
                let to = self.units.resolve(*to)?;
                convert_primitive(self.units, self.value, from, to)?
            }
            _ => self.value * compound_factor(self.units, &self.unit, target)?,
        };
        Ok(self.with(value, target.clone()))
    }

    /// Re-express a primitive quantity in its system's best-fit unit
    ///
    /// Compound quantities are returned unchanged.
    pub fn normalized(&self) -> Result<Self, UnitError> {
        let Some(unit) = self.primitive() else {
            return Ok(self.clone());
        };
        let system = self.units.system_by_id(unit.system())
            .ok_or_else(|| UnitError::unit_not_found(unit.name.clone()))?;
        match system.best_fit(unit.to_base(self.value)) {
            Some(best) => self.in_unit(best),
            None => Ok(self.clone()),
        }
    }

    // ========== Arithmetic ==========

    /// Reinterpret the unit as `unit / per` without changing the value
    pub fn per<'a>(&self, per: impl Into<UnitRef<'a>>) -> Result<Self, UnitError> {
        let per = self.units.resolve(per)?;
        Ok(self.with(self.value, CompoundUnit::quotient(self.unit.clone(), per.id)))
    }

    /// Divide by a scalar (same unit) or by a quantity (builds a rate)
    pub fn divided_by<'q>(&self, operand: impl Into<Operand<'q, 'u>>) -> Result<Self, UnitError>
    where
        'u: 'q,
    {
        match operand.into() {
            Operand::Scalar(s) => {
                if s == 0.0 {
                    return Err(UnitError::DivisionByZero);
                }
                Ok(self.with(self.value / s, self.unit.clone()))
            }
            Operand::Quantity(q) => {
                self.check_registry(q)?;
                if q.value == 0.0 {
                    return Err(UnitError::DivisionByZero);
                }
                let unit = CompoundUnit::quotient(self.unit.clone(), q.unit.clone());
                Ok(self.with(self.value / q.value, unit))
            }
        }
    }

    /// Multiply by a scalar (same unit) or by a quantity
    ///
    /// With one rate operand `N/D`, the other operand is converted into `D`
    /// and the denominator cancels, leaving `N` (speed × time = distance).
    /// Two rates combine into `(N1*N2)/(D1*D2)` without cancellation.
    pub fn multiply_by<'q>(&self, operand: impl Into<Operand<'q, 'u>>) -> Result<Self, UnitError>
    where
        'u: 'q,
    {
        let other = match operand.into() {
            Operand::Scalar(s) => return Ok(self.with(self.value * s, self.unit.clone())),
            Operand::Quantity(q) => q,
        };
        self.check_registry(other)?;

        match (self.unit.as_quotient(), other.unit.as_quotient()) {
            (Some((n1, d1)), Some((n2, d2))) => {
                let unit = CompoundUnit::quotient(
                    CompoundUnit::product(n1.clone(), n2.clone()),
                    CompoundUnit::product(d1.clone(), d2.clone()),
                );
                Ok(self.with(self.value * other.value, unit))
            }
            (Some((n, d)), None) => {
                let other = other.in_compound(d)?;
                Ok(self.with(self.value * other.value, n.clone()))
            }
            (None, Some((n, d))) => {
                let this = self.in_compound(d)?;
                Ok(self.with(this.value * other.value, n.clone()))
            }
            (None, None) => {
                let unit = CompoundUnit::product(self.unit.clone(), other.unit.clone());
                Ok(self.with(self.value * other.value, unit))
            }
        }
    }

    /// Add another quantity, converted into this quantity's unit
    pub fn plus(&self, other: &Quantity<'u>) -> Result<Self, UnitError> {
        self.check_registry(other)?;
        let converted = other.in_compound(&self.unit)?;
        Ok(self.with(self.value + converted.value, self.unit.clone()))
    }

    /// Subtract another quantity, converted into this quantity's unit
    pub fn minus(&self, other: &Quantity<'u>) -> Result<Self, UnitError> {
        self.check_registry(other)?;
        let converted = other.in_compound(&self.unit)?;
        Ok(self.with(self.value - converted.value, self.unit.clone()))
    }

    fn check_registry(&self, other: &Quantity<'_>) -> Result<(), UnitError> {
        if std::ptr::eq(self.units, other.units) {
            Ok(())
        } else {
            Err(UnitError::config("quantities belong to different registries"))
        }
    }
}

/// Convert between two primitive units, routing through the edge graph
fn convert_primitive(units: &Units, value: f64, from: &Unit, to: &Unit) -> Result<f64, UnitError> {
    if from.system() == to.system() {
        return Ok(value * (from.scale / to.scale));
    }
    let steps = units.system_path(from.system(), to.system())
        .ok_or_else(|| UnitError::not_convertible(from.to_string(), to.to_string()))?;
    let base = steps.iter().fold(from.to_base(value), |v, step| step.convert(v));
    Ok(to.from_base(base))
}

/// Multiplier taking one unit of `from` to `to`, for linear paths only
fn linear_factor(units: &Units, from: &Unit, to: &Unit) -> Result<f64, UnitError> {
    if from.system() == to.system() {
        return Ok(from.scale / to.scale);
    }
    let not_convertible = || UnitError::not_convertible(from.to_string(), to.to_string());
    let steps = units.system_path(from.system(), to.system()).ok_or_else(not_convertible)?;
    let mut factor = from.scale / to.scale;
    for step in steps {
        factor *= step.factor().ok_or_else(not_convertible)?;
    }
    Ok(factor)
}

fn compound_factor(units: &Units, from: &CompoundUnit, to: &CompoundUnit) -> Result<f64, UnitError> {
    match (from, to) {
        (CompoundUnit::Primitive(a), CompoundUnit::Primitive(b)) => {
            linear_factor(units, units.resolve(*a)?, units.resolve(*b)?)
        }
        (CompoundUnit::Product(a1, a2), CompoundUnit::Product(b1, b2)) => {
            Ok(compound_factor(units, a1, b1)? * compound_factor(units, a2, b2)?)
        }
        (CompoundUnit::Quotient(a1, a2), CompoundUnit::Quotient(b1, b2)) => {
            Ok(compound_factor(units, a1, b1)? / compound_factor(units, a2, b2)?)
        }
        _ => Err(UnitError::not_convertible(
            from.display(units).to_string(),
            to.display(units).to_string(),
        )),
    }
}

impl fmt::Display for Quantity<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.display(self.units))
    }
}

impl fmt::Debug for Quantity<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quantity")
            .field("value", &self.value)
            .field("unit", &self.unit.display(self.units).to_string())
            .finish()
    }
}

impl From<Quantity<'_>> for f64 {
    fn from(q: Quantity<'_>) -> f64 {
        q.value
    }
}

impl From<&Quantity<'_>> for f64 {
    fn from(q: &Quantity<'_>) -> f64 {
        q.value
    }
}

impl Serialize for Quantity<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Quantity", 2)?;
        state.serialize_field("value", &self.value)?;
        state.serialize_field("unit", &self.unit.display(self.units).to_string())?;
        state.end()
    }
}
