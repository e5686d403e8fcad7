//! Primitive units and the handles that address them

use std::fmt;

/// Handle to a system inside a `Units` registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SystemId(pub(crate) usize);

impl SystemId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle to a unit: its system plus its slot in that system's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId {
    pub(crate) system: SystemId,
    pub(crate) index: usize,
}

impl UnitId {
    pub fn system(self) -> SystemId {
        self.system
    }
}

/// A named scale factor within one system
///
/// Units are immutable once registered and compared by handle.
#[derive(Debug, Clone)]
pub struct Unit {
    /// Handle of this unit
    pub id: UnitId,
    /// Canonical name (e.g., "kilometer")
    pub name: String,
    /// Additional names resolving to this unit
    pub aliases: Vec<String>,
    /// Symbols; the first one is the display form
    pub symbols: Vec<String>,
    /// How many base units of its system one of this unit equals
    pub scale: f64,
}

impl Unit {
    pub fn system(&self) -> SystemId {
        self.id.system
    }

    /// Check if this is the base unit of its system
    pub fn is_base(&self) -> bool {
        self.scale == 1.0
    }

    /// Display form: first symbol, or the name when there is none
    pub fn display_name(&self) -> &str {
        self.symbols.first().map(|s| s.as_str()).unwrap_or(&self.name)
    }

    /// Value of `value` of this unit expressed in the system's base unit
    pub fn to_base(&self, value: f64) -> f64 {
        value * self.scale
    }

    /// Value of `base_value` base units expressed in this unit
    pub fn from_base(&self, base_value: f64) -> f64 {
        base_value / self.scale
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Unit {}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Aliases and symbols attached to a unit at registration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitOptions {
    pub aliases: Vec<String>,
    pub symbols: Vec<String>,
}

impl UnitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add an alias
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Builder: add a symbol
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbols.push(symbol.into());
        self
    }
}

/// How a caller refers to a unit
///
/// Resolved once at the API boundary by `Units::resolve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitRef<'a> {
    /// Name or alias first, then symbol, then the plural retry
    Lookup(&'a str),
    /// Name or alias only
    ByName(&'a str),
    /// Symbol only
    BySymbol(&'a str),
    /// Already resolved
    Handle(UnitId),
}

impl<'a> From<&'a str> for UnitRef<'a> {
    fn from(s: &'a str) -> Self {
        UnitRef::Lookup(s)
    }
}

impl<'a> From<&'a String> for UnitRef<'a> {
    fn from(s: &'a String) -> Self {
        UnitRef::Lookup(s.as_str())
    }
}

impl From<UnitId> for UnitRef<'_> {
    fn from(id: UnitId) -> Self {
        UnitRef::Handle(id)
    }
}

impl From<&Unit> for UnitRef<'_> {
    fn from(unit: &Unit) -> Self {
        UnitRef::Handle(unit.id)
    }
}

impl fmt::Display for UnitRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitRef::Lookup(s) | UnitRef::ByName(s) | UnitRef::BySymbol(s) => write!(f, "{}", s),
            UnitRef::Handle(id) => write!(f, "#{}:{}", id.system.0, id.index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(index: usize, name: &str, symbols: &[&str], scale: f64) -> Unit {
        Unit {
            id: UnitId { system: SystemId(0), index },
            name: name.to_string(),
            aliases: Vec::new(),
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
            scale,
        }
    }

    #[test]
    fn test_display_prefers_first_symbol() {
        assert_eq!(unit(0, "meter", &["m", "mtr"], 1.0).to_string(), "m");
        assert_eq!(unit(1, "furlong", &[], 201.168).to_string(), "furlong");
    }

    #[test]
    fn test_base_scaling() {
        let km = unit(1, "kilometer", &["km"], 1000.0);
        assert_eq!(km.to_base(5.0), 5000.0);
        assert_eq!(km.from_base(5000.0), 5.0);
        assert!(!km.is_base());
        assert!(unit(0, "meter", &["m"], 1.0).is_base());
    }

    #[test]
    fn test_equality_by_handle() {
        let a = unit(3, "meter", &["m"], 1.0);
        let mut b = a.clone();
        b.name = "metre".to_string();
        assert_eq!(a, b);

        let c = unit(4, "meter", &["m"], 1.0);
        assert_ne!(a, c);
    }

    #[test]
    fn test_options_builder() {
        let opts = UnitOptions::new().alias("metre").symbol("m");
        assert_eq!(opts.aliases, vec!["metre"]);
        assert_eq!(opts.symbols, vec!["m"]);
    }

    #[test]
    fn test_unit_ref_conversions() {
        assert_eq!(UnitRef::from("km"), UnitRef::Lookup("km"));
        let km = unit(1, "kilometer", &["km"], 1000.0);
        assert_eq!(UnitRef::from(&km), UnitRef::Handle(km.id));
    }
}
