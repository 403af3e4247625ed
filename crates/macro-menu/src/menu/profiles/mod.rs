mod config;
mod policy;

pub use config::{CalorieWindow, ProfileGate};
pub use policy::GateFailure;

use super::domain::ScoredItem;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    Cut,
    Bulk,
}

impl ProfileKind {
    pub const fn ordered() -> [Self; 2] {
        [Self::Cut, Self::Bulk]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Cut => "Cut",
            Self::Bulk => "Bulk",
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl ProfileGate {
    pub fn accepts(&self, item: &ScoredItem) -> bool {
        policy::check_item(self, item).is_empty()
    }

    /// Lists every criterion the item misses, for explaining a rejection.
    pub fn failures(&self, item: &ScoredItem) -> Vec<GateFailure> {
        policy::check_item(self, item)
    }
}

/// Verdict of one profile gate for one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateReport {
    pub profile: ProfileKind,
    pub failures: Vec<GateFailure>,
}

impl GateReport {
    pub fn passes(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Gate thresholds for both diet profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileGates {
    pub cut: ProfileGate,
    pub bulk: ProfileGate,
}

impl Default for ProfileGates {
    fn default() -> Self {
        Self {
            cut: ProfileGate::cut(),
            bulk: ProfileGate::bulk(),
        }
    }
}

impl ProfileGates {
    pub fn gate(&self, kind: ProfileKind) -> &ProfileGate {
        match kind {
            ProfileKind::Cut => &self.cut,
            ProfileKind::Bulk => &self.bulk,
        }
    }

    /// Cut and bulk verdicts for `item`, in profile order.
    pub fn reports(&self, item: &ScoredItem) -> Vec<GateReport> {
        ProfileKind::ordered()
            .into_iter()
            .map(|profile| GateReport {
                profile,
                failures: self.gate(profile).failures(item),
            })
            .collect()
    }
}

/// Read-only cut and bulk views over a scored collection, in collection order.
#[derive(Debug, Clone)]
pub struct ProfileSet<'a> {
    pub cut: Vec<&'a ScoredItem>,
    pub bulk: Vec<&'a ScoredItem>,
}

impl<'a> ProfileSet<'a> {
    pub fn select(items: &'a [ScoredItem], gates: &ProfileGates) -> Self {
        Self {
            cut: items.iter().filter(|item| gates.cut.accepts(item)).collect(),
            bulk: items.iter().filter(|item| gates.bulk.accepts(item)).collect(),
        }
    }

    pub fn members(&self, kind: ProfileKind) -> &[&'a ScoredItem] {
        match kind {
            ProfileKind::Cut => &self.cut,
            ProfileKind::Bulk => &self.bulk,
        }
    }
}
