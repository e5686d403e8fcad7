//! Unit systems: the catalog of primitive units sharing one scale space

use std::collections::{HashMap, HashSet};
use metron_core::UnitError;
use tracing::debug;
use crate::prefix::{FamilyOptions, Prefix, BINARY_PREFIXES, METRIC_PREFIXES};
use crate::unit::{SystemId, Unit, UnitId, UnitOptions};

/// A named collection of mutually convertible units
#[derive(Debug, Clone)]
pub struct UnitSystem {
    id: SystemId,
    name: String,
    /// Arena of units in registration order; `UnitId::index` points here
    units: Vec<Unit>,
    /// Arena indices sorted by ascending scale
    by_scale: Vec<usize>,
    names: HashMap<String, usize>,
    symbols: HashMap<String, usize>,
    base: Option<usize>,
}

impl UnitSystem {
    pub(crate) fn new(id: SystemId, name: &str) -> Self {
        UnitSystem {
            id,
            name: name.to_string(),
            units: Vec::new(),
            by_scale: Vec::new(),
            names: HashMap::new(),
            symbols: HashMap::new(),
            base: None,
        }
    }

    pub fn id(&self) -> SystemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Units in registration order
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    /// Units ordered by ascending scale
    pub fn units_by_scale(&self) -> impl Iterator<Item = &Unit> {
        self.by_scale.iter().map(move |&i| &self.units[i])
    }

    /// The designated base unit (scale 1), if one is registered
    pub fn base(&self) -> Option<&Unit> {
        self.base.map(|i| &self.units[i])
    }

    pub(crate) fn unit(&self, id: UnitId) -> Option<&Unit> {
        if id.system != self.id {
            return None;
        }
        self.units.get(id.index)
    }

    /// Exact name/alias lookup, then symbol lookup unless `name_only`
    pub fn get_unit(&self, lookup: &str, name_only: bool) -> Option<&Unit> {
        if let Some(&i) = self.names.get(lookup) {
            return Some(&self.units[i]);
        }
        if !name_only {
            return self.get_by_symbol(lookup);
        }
        None
    }

    /// Symbol-only lookup
    pub fn get_by_symbol(&self, symbol: &str) -> Option<&Unit> {
        self.symbols.get(symbol).map(|&i| &self.units[i])
    }

    /// The largest unit in which `base_value` reads at least 1
    ///
    /// Falls back to the smallest unit for tiny magnitudes, and to the base
    /// unit for zero.
    pub fn best_fit(&self, base_value: f64) -> Option<&Unit> {
        let magnitude = base_value.abs();
        if magnitude == 0.0 {
            return self.base().or_else(|| self.units_by_scale().next());
        }
        self.units_by_scale()
            .filter(|u| magnitude / u.scale >= 1.0)
            .last()
            .or_else(|| self.units_by_scale().next())
    }

    fn register(&mut self, name: &str, scale: f64, options: UnitOptions) -> Result<UnitId, UnitError> {
        self.validate(name, scale, &options)?;
        Ok(self.insert(name, scale, options))
    }

    /// Register every unit of `batch`, or none of them
    fn register_all(&mut self, batch: Vec<(String, f64, UnitOptions)>) -> Result<(), UnitError> {
        let mut names = HashSet::new();
        let mut symbols = HashSet::new();
        let mut base: Option<&str> = None;
        for (name, scale, options) in &batch {
            self.validate(name, *scale, options)?;
            for n in std::iter::once(name).chain(&options.aliases) {
                if !names.insert(n.as_str()) {
                    return Err(self.name_taken(n));
                }
            }
            for s in &options.symbols {
                if !symbols.insert(s.as_str()) {
                    return Err(self.symbol_taken(s));
                }
            }
            if *scale == 1.0 {
                if let Some(first) = base {
                    return Err(UnitError::config(format!(
                        "'{}' and '{}' both have scale 1 in system '{}'", first, name, self.name
                    )));
                }
                base = Some(name);
            }
        }

        for (name, scale, options) in batch {
            self.insert(&name, scale, options);
        }
        Ok(())
    }

    fn validate(&self, name: &str, scale: f64, options: &UnitOptions) -> Result<(), UnitError> {
        if name.is_empty() {
            return Err(UnitError::config(format!("unit name in system '{}' is empty", self.name)));
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(UnitError::config(format!(
                "unit '{}' in system '{}' has invalid scale {}", name, self.name, scale
            )));
        }
        if scale == 1.0 {
            if let Some(base) = self.base() {
                return Err(UnitError::config(format!(
                    "system '{}' already has base unit '{}', cannot add '{}' with scale 1",
                    self.name, base.name, name
                )));
            }
        }

        let mut new_names: Vec<&str> = Vec::with_capacity(1 + options.aliases.len());
        new_names.push(name);
        new_names.extend(options.aliases.iter().map(|a| a.as_str()));
        for (i, n) in new_names.iter().enumerate() {
            if self.names.contains_key(*n) || new_names[..i].contains(n) {
                return Err(self.name_taken(n));
            }
        }
        for (i, s) in options.symbols.iter().enumerate() {
            if self.symbols.contains_key(s) || options.symbols[..i].contains(s) {
                return Err(self.symbol_taken(s));
            }
        }
        Ok(())
    }

    fn name_taken(&self, name: &str) -> UnitError {
        UnitError::config(format!("name '{}' is already registered in system '{}'", name, self.name))
    }

    fn symbol_taken(&self, symbol: &str) -> UnitError {
        UnitError::config(format!("symbol '{}' is already registered in system '{}'", symbol, self.name))
    }

    /// Commit a validated unit
    fn insert(&mut self, name: &str, scale: f64, options: UnitOptions) -> UnitId {
        let index = self.units.len();
        let id = UnitId { system: self.id, index };
        self.names.insert(name.to_string(), index);
        for alias in &options.aliases {
            self.names.insert(alias.clone(), index);
        }
        for s in &options.symbols {
            self.symbols.insert(s.clone(), index);
        }

        let pos = self.by_scale.partition_point(|&i| self.units[i].scale <= scale);
        self.by_scale.insert(pos, index);
        if scale == 1.0 {
            self.base = Some(index);
        }

        debug!(system = %self.name, unit = name, scale, "registered unit");
        self.units.push(Unit {
            id,
            name: name.to_string(),
            aliases: options.aliases,
            symbols: options.symbols,
            scale,
        });
        id
    }
}

/// Registration handle for one system, returned by `Units::system`
///
/// Every method consumes the builder and hands it back, so registrations chain:
///
/// ```
/// # use metron_units::{Units, UnitOptions, FamilyOptions};
/// let mut units = Units::new();
/// units.system("time")?
///     .metric("second", FamilyOptions::new().symbol("s"))?
///     .unit("minute", 60.0, UnitOptions::new().symbol("min"))?;
/// # Ok::<(), metron_core::UnitError>(())
/// ```
pub struct SystemBuilder<'a> {
    system: &'a mut UnitSystem,
}

impl<'a> SystemBuilder<'a> {
    pub(crate) fn new(system: &'a mut UnitSystem) -> Self {
        SystemBuilder { system }
    }

    pub fn id(&self) -> SystemId {
        self.system.id
    }

    /// Register one primitive unit
    pub fn unit(self, name: &str, scale: f64, options: UnitOptions) -> Result<Self, UnitError> {
        self.system.register(name, scale, options)?;
        Ok(self)
    }

    /// Register one unit per prefix row, named `prefix + name`
    ///
    /// The family is checked as a whole first; on error nothing is added.
    pub fn factors(self, name: &str, table: &[Prefix], options: &FamilyOptions) -> Result<Self, UnitError> {
        let batch = table.iter()
            .map(|p| {
                let unit_options = UnitOptions {
                    aliases: options.aliases.iter().map(|a| format!("{}{}", p.name, a)).collect(),
                    symbols: options.symbols.iter().map(|s| format!("{}{}", p.symbol, s)).collect(),
                };
                (format!("{}{}", p.name, name), p.factor * options.scale, unit_options)
            })
            .collect();
        self.system.register_all(batch)?;
        Ok(self)
    }

    /// Metric family (yocto through yotta), bounded by `min_value`/`max_value`
    pub fn metric(self, name: &str, options: FamilyOptions) -> Result<Self, UnitError> {
        let table = options.select(&METRIC_PREFIXES);
        self.factors(name, &table, &options)
    }

    /// Binary family (1024^0 through yobi), bounded by `min_value`/`max_value`
    pub fn binary(self, name: &str, options: FamilyOptions) -> Result<Self, UnitError> {
        let table = options.select(&BINARY_PREFIXES);
        self.factors(name, &table, &options)
    }

    /// Read access to the system being built
    pub fn system(&self) -> &UnitSystem {
        &*self.system
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn system(name: &str) -> UnitSystem {
        UnitSystem::new(SystemId(0), name)
    }

    #[test]
    fn test_unit_lookup_by_name_alias_symbol() {
        let mut length = system("length");
        SystemBuilder::new(&mut length)
            .unit("meter", 1.0, UnitOptions::new().alias("metre").symbol("m")).unwrap();

        let by_name = length.get_unit("meter", false).unwrap();
        let by_alias = length.get_unit("metre", false).unwrap();
        let by_symbol = length.get_unit("m", false).unwrap();
        assert_eq!(by_name.id, by_alias.id);
        assert_eq!(by_name.id, by_symbol.id);

        assert!(length.get_unit("m", true).is_none());
        assert!(length.get_unit("furlong", false).is_none());
    }

    #[test]
    fn test_units_sorted_by_scale() {
        let mut time = system("time");
        SystemBuilder::new(&mut time)
            .unit("hour", 3600.0, UnitOptions::new()).unwrap()
            .unit("second", 1.0, UnitOptions::new()).unwrap()
            .unit("minute", 60.0, UnitOptions::new()).unwrap();

        let names: Vec<&str> = time.units_by_scale().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["second", "minute", "hour"]);

        let order: Vec<&str> = time.units().map(|u| u.name.as_str()).collect();
        assert_eq!(order, vec!["hour", "second", "minute"]);
    }

    #[test]
    fn test_base_designation() {
        let mut time = system("time");
        SystemBuilder::new(&mut time)
            .unit("minute", 60.0, UnitOptions::new()).unwrap();
        assert!(time.base().is_none());

        SystemBuilder::new(&mut time)
            .unit("second", 1.0, UnitOptions::new()).unwrap();
        assert_eq!(time.base().unwrap().name, "second");

        let err = SystemBuilder::new(&mut time)
            .unit("tick", 1.0, UnitOptions::new())
            .err()
            .unwrap();
        assert!(matches!(err, UnitError::Config(_)));
    }

    #[test]
    fn test_invalid_scale_rejected() {
        let mut s = system("s");
        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = SystemBuilder::new(&mut s).unit("bad", scale, UnitOptions::new());
            assert!(matches!(result.err(), Some(UnitError::Config(_))), "scale {}", scale);
        }
        assert!(s.is_empty());
    }

    #[test]
    fn test_name_and_symbol_collisions() {
        let mut length = system("length");
        SystemBuilder::new(&mut length)
            .unit("meter", 1.0, UnitOptions::new().symbol("m")).unwrap();

        let dup_name = SystemBuilder::new(&mut length)
            .unit("meter", 2.0, UnitOptions::new());
        assert!(dup_name.is_err());

        let dup_alias = SystemBuilder::new(&mut length)
            .unit("yard", 0.9144, UnitOptions::new().alias("meter"));
        assert!(dup_alias.is_err());

        let dup_symbol = SystemBuilder::new(&mut length)
            .unit("mile", 1609.344, UnitOptions::new().symbol("m"));
        assert!(dup_symbol.is_err());

        // Failed registrations leave nothing behind
        assert_eq!(length.len(), 1);
        assert!(length.get_unit("yard", false).is_none());
    }

    #[test]
    fn test_family_collision_registers_nothing() {
        let mut time = system("time");
        SystemBuilder::new(&mut time)
            .unit("kilotick", 1000.0, UnitOptions::new().symbol("ks")).unwrap();

        let err = SystemBuilder::new(&mut time)
            .metric("second", FamilyOptions::new().symbol("s"))
            .err()
            .unwrap();
        assert_eq!(err, UnitError::config("symbol 'ks' is already registered in system 'time'"));
        assert_eq!(time.len(), 1);
        assert!(time.base().is_none());
        assert!(time.get_unit("second", true).is_none());
        assert!(time.get_unit("ms", false).is_none());
    }

    #[test]
    fn test_family_with_two_bases_rejected() {
        let mut mass = system("mass");
        let table = [
            Prefix { name: "", symbol: "", factor: 1.0 },
            Prefix { name: "also", symbol: "a", factor: 1.0 },
        ];
        let result = SystemBuilder::new(&mut mass)
            .factors("gram", &table, &FamilyOptions::new().symbol("g"));
        assert!(matches!(result.err(), Some(UnitError::Config(_))));
        assert!(mass.is_empty());
    }

    #[test]
    fn test_metric_family() {
        let mut bytes = system("decimal bytes");
        SystemBuilder::new(&mut bytes)
            .metric("byte", FamilyOptions::new().symbol("b")).unwrap();

        assert_eq!(bytes.len(), 21);
        let kb = bytes.get_unit("kilobyte", true).unwrap();
        assert_eq!(kb.symbols, vec!["kb"]);
        assert_eq!(kb.scale, 1000.0);
        assert_eq!(bytes.get_unit("Yb", false).unwrap().name, "yottabyte");
        assert_eq!(bytes.get_unit("yb", false).unwrap().name, "yoctobyte");
        assert_eq!(bytes.base().unwrap().name, "byte");
    }

    #[test]
    fn test_metric_family_bounded() {
        let mut bytes = system("decimal bytes");
        SystemBuilder::new(&mut bytes)
            .metric("byte", FamilyOptions::new().symbol("B").min_value(1.0)).unwrap();

        assert_eq!(bytes.len(), 11);
        assert!(bytes.get_unit("millibyte", true).is_none());
        assert_eq!(bytes.units_by_scale().next().unwrap().name, "byte");
    }

    #[test]
    fn test_binary_family_with_aliases() {
        let mut bytes = system("binary bytes");
        SystemBuilder::new(&mut bytes)
            .binary("byte", FamilyOptions::new().alias("octet").symbol("B")).unwrap();

        assert_eq!(bytes.len(), 9);
        let mib = bytes.get_unit("MiB", false).unwrap();
        assert_eq!(mib.name, "mebibyte");
        assert_eq!(mib.aliases, vec!["mebioctet"]);
        assert_eq!(mib.scale, 1_048_576.0);
        assert_eq!(bytes.get_unit("octet", true).unwrap().name, "byte");
    }

    #[test]
    fn test_factors_with_base_scale() {
        let mut mass = system("mass");
        let table = [
            Prefix { name: "", symbol: "", factor: 1.0 },
            Prefix { name: "kilo", symbol: "k", factor: 1000.0 },
        ];
        SystemBuilder::new(&mut mass)
            .factors("gram", &table, &FamilyOptions::new().symbol("g").scale(0.001)).unwrap();

        assert_eq!(mass.get_unit("g", false).unwrap().scale, 0.001);
        assert_relative_eq!(mass.get_unit("kg", false).unwrap().scale, 1.0);
        assert_eq!(mass.get_unit("kilogram", true).unwrap().symbols, vec!["kg"]);
    }

    #[test]
    fn test_best_fit() {
        let mut time = system("time");
        SystemBuilder::new(&mut time)
            .metric("second", FamilyOptions::new().symbol("s").min_value(1e-3).max_value(1.0)).unwrap()
            .unit("minute", 60.0, UnitOptions::new()).unwrap()
            .unit("hour", 3600.0, UnitOptions::new()).unwrap();

        assert_eq!(time.best_fit(7200.0).unwrap().name, "hour");
        assert_eq!(time.best_fit(90.0).unwrap().name, "minute");
        assert_eq!(time.best_fit(-90.0).unwrap().name, "minute");
        assert_eq!(time.best_fit(0.5).unwrap().name, "decisecond");
        assert_eq!(time.best_fit(1e-9).unwrap().name, "millisecond");
        assert_eq!(time.best_fit(0.0).unwrap().name, "second");
    }
}
