//! The conversion registry: owns every system and the graph of edges between them

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use metron_core::UnitError;
use tracing::{debug, trace, warn};
use crate::conversion::{Conversion, Transform};
use crate::system::{SystemBuilder, UnitSystem};
use crate::unit::{SystemId, Unit, UnitId, UnitRef};

/// How a caller refers to a system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemRef<'a> {
    Name(&'a str),
    Id(SystemId),
}

impl<'a> From<&'a str> for SystemRef<'a> {
    fn from(name: &'a str) -> Self {
        SystemRef::Name(name)
    }
}

impl From<SystemId> for SystemRef<'_> {
    fn from(id: SystemId) -> Self {
        SystemRef::Id(id)
    }
}

/// Registry of unit systems and the conversions linking them
///
/// Built once during a registration phase, then read. Quantities borrow the
/// registry, so the borrow checker already keeps registration from
/// interleaving with conversions; `seal` makes the freeze explicit for
/// registries shared behind an `Arc`.
#[derive(Debug, Default)]
pub struct Units {
    /// Systems in registration order; `SystemId` indexes here
    systems: Vec<UnitSystem>,
    by_name: HashMap<String, SystemId>,
    /// Outgoing edges per system, indexed like `systems`
    edges: Vec<Vec<Conversion>>,
    sealed: bool,
}

impl Units {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Registration ==========

    /// Get or create the system called `name`
    pub fn system(&mut self, name: &str) -> Result<SystemBuilder<'_>, UnitError> {
        self.check_open()?;
        let id = self.system_id(name)?;
        Ok(SystemBuilder::new(&mut self.systems[id.0]))
    }

    /// Register `from -> to` with a constant scale, and the reciprocal edge
    pub fn conversion<'a>(
        &mut self,
        from: impl Into<SystemRef<'a>>,
        to: impl Into<SystemRef<'a>>,
        scale: f64,
    ) -> Result<&mut Self, UnitError> {
        self.check_open()?;
        if !scale.is_finite() || scale == 0.0 {
            return Err(UnitError::config(format!(
                "conversion scale must be a finite nonzero number, got {}", scale
            )));
        }
        let (from, to) = self.edge_endpoints(from.into(), to.into())?;
        self.insert_edge(Conversion::new(from, to, Transform::Scale(scale)));
        self.insert_edge(Conversion::new(to, from, Transform::Scale(1.0 / scale)));
        Ok(self)
    }

    /// Register `from -> to` with a transform function and its explicit inverse
    pub fn conversion_fn<'a, F, G>(
        &mut self,
        from: impl Into<SystemRef<'a>>,
        to: impl Into<SystemRef<'a>>,
        forward: F,
        inverse: G,
    ) -> Result<&mut Self, UnitError>
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
        G: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        self.check_open()?;
        let (from, to) = self.edge_endpoints(from.into(), to.into())?;
        self.insert_edge(Conversion::new(from, to, Transform::Function(Arc::new(forward))));
        self.insert_edge(Conversion::new(to, from, Transform::Function(Arc::new(inverse))));
        Ok(self)
    }

    /// Freeze the registry; later registration fails
    pub fn seal(&mut self) {
        debug!(systems = self.systems.len(), "registry sealed");
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    fn check_open(&self) -> Result<(), UnitError> {
        if self.sealed {
            return Err(UnitError::config("registry is sealed"));
        }
        Ok(())
    }

    fn system_id(&mut self, name: &str) -> Result<SystemId, UnitError> {
        if let Some(&id) = self.by_name.get(name) {
            return Ok(id);
        }
        if name.is_empty() {
            return Err(UnitError::config("system name is empty"));
        }
        let id = SystemId(self.systems.len());
        self.systems.push(UnitSystem::new(id, name));
        self.edges.push(Vec::new());
        self.by_name.insert(name.to_string(), id);
        debug!(system = name, "registered system");
        Ok(id)
    }

    fn edge_endpoints(&mut self, from: SystemRef<'_>, to: SystemRef<'_>) -> Result<(SystemId, SystemId), UnitError> {
        let from = self.resolve_system(from)?;
        let to = self.resolve_system(to)?;
        if from == to {
            return Err(UnitError::config(format!(
                "conversion from system '{}' to itself", self.systems[from.0].name()
            )));
        }
        Ok((from, to))
    }

    fn resolve_system(&mut self, system: SystemRef<'_>) -> Result<SystemId, UnitError> {
        match system {
            SystemRef::Name(name) => self.system_id(name),
            SystemRef::Id(id) if id.0 < self.systems.len() => Ok(id),
            SystemRef::Id(id) => Err(UnitError::config(format!("unknown system id {}", id.0))),
        }
    }

    fn insert_edge(&mut self, edge: Conversion) {
        let from_name = self.systems[edge.from.0].name();
        let to_name = self.systems[edge.to.0].name();
        let outgoing = &mut self.edges[edge.from.0];
        match outgoing.iter_mut().find(|e| e.to == edge.to) {
            Some(existing) => {
                warn!(from = from_name, to = to_name, "replacing conversion");
                *existing = edge;
            }
            None => {
                debug!(from = from_name, to = to_name, transform = ?edge.transform, "registered conversion");
                outgoing.push(edge);
            }
        }
    }

    // ========== Lookup ==========

    /// Systems in registration order
    pub fn systems(&self) -> impl Iterator<Item = &UnitSystem> {
        self.systems.iter()
    }

    pub fn get_system(&self, name: &str) -> Option<&UnitSystem> {
        self.by_name.get(name).map(|id| &self.systems[id.0])
    }

    pub fn system_by_id(&self, id: SystemId) -> Option<&UnitSystem> {
        self.systems.get(id.0)
    }

    /// Resolve a handle to its unit record
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.systems.get(id.system.0)?.unit(id)
    }

    /// Look a unit up by name or alias in every system, then by symbol
    ///
    /// When nothing matches and `lookup` ends in `s`, retries once without
    /// the `s`, matching names only (so "hours" finds "hour" but a plural
    /// never matches a symbol).
    pub fn get_unit(&self, lookup: &str, name_only: bool) -> Result<&Unit, UnitError> {
        if let Some(unit) = self.find_unit(lookup, name_only) {
            return Ok(unit);
        }
        if !name_only {
            let stem = lookup.strip_suffix('s').or_else(|| lookup.strip_suffix('S'));
            if let Some(stem) = stem {
                trace!(lookup, stem, "retrying singular");
                if let Some(unit) = self.find_unit(stem, true) {
                    return Ok(unit);
                }
            }
        }
        Err(UnitError::unit_not_found(lookup))
    }

    fn find_unit(&self, lookup: &str, name_only: bool) -> Option<&Unit> {
        let by_name = self.systems.iter().find_map(|s| s.get_unit(lookup, true));
        if by_name.is_some() || name_only {
            return by_name;
        }
        self.find_symbol(lookup)
    }

    fn find_symbol(&self, symbol: &str) -> Option<&Unit> {
        self.systems.iter().find_map(|s| s.get_by_symbol(symbol))
    }

    /// Resolve any unit reference to its record
    pub fn resolve<'a>(&self, unit: impl Into<UnitRef<'a>>) -> Result<&Unit, UnitError> {
        match unit.into() {
            UnitRef::Lookup(s) => self.get_unit(s, false),
            UnitRef::ByName(s) => self.get_unit(s, true),
            UnitRef::BySymbol(s) => self.find_symbol(s).ok_or_else(|| UnitError::unit_not_found(s)),
            r @ UnitRef::Handle(id) => self.unit(id).ok_or_else(|| UnitError::unit_not_found(r.to_string())),
        }
    }

    // ========== Graph ==========

    /// Ordered chain of edges leading from `from`'s system to `to`'s system
    ///
    /// Empty when both units share a system. Fails with `NotConvertible`
    /// when no chain exists.
    pub fn conversion_steps<'a>(
        &self,
        from: impl Into<UnitRef<'a>>,
        to: impl Into<UnitRef<'a>>,
    ) -> Result<Vec<&Conversion>, UnitError> {
        let from = self.resolve(from)?;
        let to = self.resolve(to)?;
        self.system_path(from.system(), to.system())
            .ok_or_else(|| UnitError::not_convertible(from.to_string(), to.to_string()))
    }

    /// True iff a chain of edges links the two units' systems
    pub fn is_compatible<'a>(&self, a: impl Into<UnitRef<'a>>, b: impl Into<UnitRef<'a>>) -> bool {
        self.conversion_steps(a, b).is_ok()
    }

    /// Breadth-first search over systems
    ///
    /// Each system is visited at most once, so the search terminates on
    /// cyclic graphs and returns a path with the fewest edges.
    pub(crate) fn system_path(&self, from: SystemId, to: SystemId) -> Option<Vec<&Conversion>> {
        if from == to {
            return Some(Vec::new());
        }

        let mut visited = vec![false; self.systems.len()];
        let mut reached_by: Vec<Option<&Conversion>> = vec![None; self.systems.len()];
        let mut queue = VecDeque::new();
        visited[from.0] = true;
        queue.push_back(from);

        while let Some(current) = queue.pop_front() {
            trace!(system = self.systems[current.0].name(), "expanding");
            for edge in &self.edges[current.0] {
                if visited[edge.to.0] {
                    continue;
                }
                visited[edge.to.0] = true;
                reached_by[edge.to.0] = Some(edge);
                if edge.to == to {
                    let path = Self::unwind(&reached_by, from, to);
                    debug!(
                        from = self.systems[from.0].name(),
                        to = self.systems[to.0].name(),
                        steps = path.len(),
                        "resolved conversion path"
                    );
                    return Some(path);
                }
                queue.push_back(edge.to);
            }
        }

        debug!(
            from = self.systems[from.0].name(),
            to = self.systems[to.0].name(),
            "no conversion path"
        );
        None
    }

    fn unwind<'e>(reached_by: &[Option<&'e Conversion>], from: SystemId, to: SystemId) -> Vec<&'e Conversion> {
        let mut path = Vec::new();
        let mut current = to;
        while current != from {
            match reached_by[current.0] {
                Some(edge) => {
                    path.push(edge);
                    current = edge.from;
                }
                None => break,
            }
        }
        path.reverse();
        path
    }
}
