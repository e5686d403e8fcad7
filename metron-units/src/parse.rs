//! Quantity parsing - strings like "50km/hr" or "10 MiB"
//!
//! Grammar: optional whitespace, a numeric literal
//! (`[-+]?\d*\.?\d+([eE][-+]?\d+)?`), optional whitespace, then a unit made of
//! letters and hyphens with `/` separating quotient segments.

use metron_core::{parse_literal, scan_literal, UnitError};
use tracing::trace;
use crate::compound::CompoundUnit;
use crate::quantity::Quantity;
use crate::unit::UnitId;
use crate::Units;

impl Units {
    /// Parse a quantity string such as "100 km" or "50km/hr"
    ///
    /// Malformed input and unknown unit segments both fail with
    /// `UnitError::Parse`.
    pub fn parse(&self, input: &str) -> Result<Quantity<'_>, UnitError> {
        let s = input.trim();

        let len = scan_literal(s)
            .ok_or_else(|| UnitError::parse(input, "expected a number"))?;
        let (number, rest) = s.split_at(len);
        let unit_expr = rest.trim_start();

        if unit_expr.is_empty() {
            return Err(UnitError::parse(input, "missing unit"));
        }
        if let Some(c) = unit_expr.chars().find(|c| !is_unit_char(*c)) {
            return Err(UnitError::parse(input, format!("unexpected character '{}' in unit", c)));
        }

        let value = parse_literal(number)
            .map_err(|e| UnitError::parse(input, e.to_string()))?;
        let unit = self.compound(unit_expr)
            .map_err(|e| match e {
                UnitError::Parse { reason, .. } => UnitError::parse(input, reason),
                other => UnitError::parse(input, other.to_string()),
            })?;

        trace!(input, value, "parsed quantity");
        Ok(Quantity::new(self, value, unit))
    }

    /// Build a quantity from a number and a unit expression
    ///
    /// Errors follow `compound`: malformed expressions fail with
    /// `UnitError::Parse`, unknown units with `UnitError::UnitNotFound`.
    pub fn quantity(&self, value: f64, unit_expr: &str) -> Result<Quantity<'_>, UnitError> {
        Ok(Quantity::new(self, value, self.compound(unit_expr)?))
    }

    /// Resolve a `/`-separated unit expression
    ///
    /// Segments fold left: `a/b/c` is `(a/b)/c`. An empty segment is a
    /// `UnitError::Parse`; a segment naming no registered unit is a
    /// `UnitError::UnitNotFound`. Only `parse`, which reads free text, folds
    /// both into `Parse`.
    pub fn compound(&self, expr: &str) -> Result<CompoundUnit, UnitError> {
        let mut segments = expr.trim().split('/');
        let first = segments.next().unwrap_or_default();
        let mut unit = CompoundUnit::from(self.segment(expr, first)?);
        for segment in segments {
            let next = self.segment(expr, segment)?;
            unit = CompoundUnit::quotient(unit, next);
        }
        Ok(unit)
    }

    fn segment(&self, expr: &str, segment: &str) -> Result<UnitId, UnitError> {
        let segment = segment.trim();
        if segment.is_empty() {
            return Err(UnitError::parse(expr, "empty unit segment"));
        }
        Ok(self.get_unit(segment, false)?.id)
    }
}

fn is_unit_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '-' || c == '/'
}
