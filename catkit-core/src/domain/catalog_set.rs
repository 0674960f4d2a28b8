//! Catalog set domain types

use serde::{Deserialize, Serialize};

/// Lightweight reference to a parent object, carrying only its title.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub title: Option<String>,
}

/// One member of a catalog set, as returned by the paginated members
/// endpoint. Only attribute members are eligible for sensitivity flagging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSetMember {
    pub id: u64,
    pub otype: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub table: Option<NamedRef>,
    #[serde(default)]
    pub schema: Option<NamedRef>,
    #[serde(default)]
    pub ds: Option<NamedRef>,
}

impl CatalogSetMember {
    pub fn is_attribute(&self) -> bool {
        self.otype == "attribute"
    }
}

/// Direction of a sensitivity flag toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensitivityAction {
    Set,
    Unset,
}

impl SensitivityAction {
    /// Wire label expected by the sensitivity endpoint's `action` form field.
    pub fn wire_label(&self) -> &'static str {
        match self {
            SensitivityAction::Set => "mark_sensitive",
            SensitivityAction::Unset => "mark_unsensitive",
        }
    }
}

/// One attribute the bulk toggle could not update.
#[derive(Debug, Clone)]
pub struct SensitivityFailure {
    pub attr_id: u64,
    pub detail: String,
}

/// Aggregate result of a bulk sensitivity toggle.
///
/// Failures are collected rather than aborting the batch; the report always
/// accounts for every attribute attempted.
#[derive(Debug, Clone, Default)]
pub struct SensitivityReport {
    pub updated: usize,
    pub failures: Vec<SensitivityFailure>,
}

impl SensitivityReport {
    pub fn record_success(&mut self) {
        self.updated += 1;
    }

    pub fn record_failure(&mut self, attr_id: u64, detail: impl Into<String>) {
        self.failures.push(SensitivityFailure {
            attr_id,
            detail: detail.into(),
        });
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total(&self) -> usize {
        self.updated + self.failures.len()
    }
}
