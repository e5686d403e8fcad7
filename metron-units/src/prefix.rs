//! Prefix tables for generated unit families

/// One row of a prefix table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prefix {
    /// Prepended to the base name and its aliases
    pub name: &'static str,
    /// Prepended to the base symbols
    pub symbol: &'static str,
    /// Multiplier applied to the base scale
    pub factor: f64,
}

const fn prefix(name: &'static str, symbol: &'static str, factor: f64) -> Prefix {
    Prefix { name, symbol, factor }
}

/// SI prefixes from yocto (10^-24) to yotta (10^24), including the bare unit
pub static METRIC_PREFIXES: [Prefix; 21] = [
    prefix("yocto", "y", 1e-24),
    prefix("zepto", "z", 1e-21),
    prefix("atto", "a", 1e-18),
    prefix("femto", "f", 1e-15),
    prefix("pico", "p", 1e-12),
    prefix("nano", "n", 1e-9),
    prefix("micro", "μ", 1e-6),
    prefix("milli", "m", 1e-3),
    prefix("centi", "c", 1e-2),
    prefix("deci", "d", 1e-1),
    prefix("", "", 1.0),
    prefix("deca", "da", 1e1),
    prefix("hecto", "h", 1e2),
    prefix("kilo", "k", 1e3),
    prefix("mega", "M", 1e6),
    prefix("giga", "G", 1e9),
    prefix("tera", "T", 1e12),
    prefix("peta", "P", 1e15),
    prefix("exa", "E", 1e18),
    prefix("zetta", "Z", 1e21),
    prefix("yotta", "Y", 1e24),
];

/// IEC binary prefixes, 1024^0 through 1024^8
pub static BINARY_PREFIXES: [Prefix; 9] = [
    prefix("", "", 1.0),
    prefix("kibi", "Ki", 1024.0),
    prefix("mebi", "Mi", 1_048_576.0),
    prefix("gibi", "Gi", 1_073_741_824.0),
    prefix("tebi", "Ti", 1_099_511_627_776.0),
    prefix("pebi", "Pi", 1_125_899_906_842_624.0),
    prefix("exbi", "Ei", 1_152_921_504_606_846_976.0),
    prefix("zebi", "Zi", 1_180_591_620_717_411_303_424.0),
    prefix("yobi", "Yi", 1_208_925_819_614_629_174_706_176.0),
];

/// Options for a generated family of prefixed units
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyOptions {
    /// Aliases of the bare unit; each gets every prefix prepended
    pub aliases: Vec<String>,
    /// Symbols of the bare unit; each gets every prefix symbol prepended
    pub symbols: Vec<String>,
    /// Smallest prefix factor to generate (inclusive)
    pub min_value: Option<f64>,
    /// Largest prefix factor to generate (inclusive)
    pub max_value: Option<f64>,
    /// Scale of the bare unit within its system
    pub scale: f64,
}

impl Default for FamilyOptions {
    fn default() -> Self {
        FamilyOptions {
            aliases: Vec::new(),
            symbols: Vec::new(),
            min_value: None,
            max_value: None,
            scale: 1.0,
        }
    }
}

impl FamilyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbols.push(symbol.into());
        self
    }

    pub fn min_value(mut self, min: f64) -> Self {
        self.min_value = Some(min);
        self
    }

    pub fn max_value(mut self, max: f64) -> Self {
        self.max_value = Some(max);
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Rows of `table` whose factor lies within the configured bounds
    pub fn select(&self, table: &[Prefix]) -> Vec<Prefix> {
        let min = self.min_value.unwrap_or(f64::NEG_INFINITY);
        let max = self.max_value.unwrap_or(f64::INFINITY);
        table.iter()
            .filter(|p| p.factor >= min && p.factor <= max)
            .copied()
            .collect()
    }
}
