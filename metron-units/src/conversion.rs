//! Conversion edges between systems

use std::fmt;
use std::sync::Arc;
use crate::unit::SystemId;

/// Function mapping a base-unit value of one system to another
pub type ScaleFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// How an edge maps values
#[derive(Clone)]
pub enum Transform {
    /// Constant multiplier
    Scale(f64),
    /// Arbitrary monotonic function
    Function(ScaleFn),
}

impl Transform {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Transform::Scale(s) => value * s,
            Transform::Function(f) => f(value),
        }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Scale(s) => write!(f, "Scale({})", s),
            Transform::Function(_) => write!(f, "Function(..)"),
        }
    }
}

/// Directed edge from the base unit of one system to the base unit of another
#[derive(Debug, Clone)]
pub struct Conversion {
    pub from: SystemId,
    pub to: SystemId,
    pub transform: Transform,
}

impl Conversion {
    pub(crate) fn new(from: SystemId, to: SystemId, transform: Transform) -> Self {
        Conversion { from, to, transform }
    }

    /// Convert a base-unit value of `from` into a base-unit value of `to`
    pub fn convert(&self, value: f64) -> f64 {
        self.transform.apply(value)
    }

    /// The constant multiplier, if this edge is linear
    pub fn factor(&self) -> Option<f64> {
        match self.transform {
            Transform::Scale(s) => Some(s),
            Transform::Function(_) => None,
        }
    }
}
