//! Display settings for the measured-parameter catalog.
//!
//! The catalog says which parameters exist; this model says which of them
//! are shown and in what order. State is keyed by parameter name. Unknown
//! names in saved state are dropped on load, parameters missing from saved
//! state get defaults (visible, position-derived order).

use std::collections::HashMap;

use crate::catalog::CatalogEntry;
use crate::snapshot::{SettingRecord, SettingsSnapshot};

/// Order assigned when a numeric order is absent or unusable. High enough
/// to sort after anything assigned by hand or by renumbering.
pub const DEFAULT_ORDER: i64 = 9999;

/// One parameter's display settings. `description` comes from the catalog
/// and is never persisted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    pub name: String,
    pub description: String,
    pub enabled: bool,
    pub order: i64,
}

/// Settings for every catalog parameter, in catalog order internally.
/// Presentation and serialization orders are derived, never stored.
#[derive(Debug, Clone, Default)]
pub struct SettingsModel {
    items: Vec<Setting>,
}

impl SettingsModel {
    /// Seeds settings from the catalog, overlaying saved state by name.
    /// A parameter absent from saved state is enabled with an order of
    /// ten times its 1-based catalog position. Saved names not in the
    /// catalog are dropped. Catalog entries with blank names are skipped
    /// but still advance the position used for default orders.
    pub fn load(catalog: &[CatalogEntry], saved: &SettingsSnapshot) -> Self {
        let by_name: HashMap<&str, &SettingRecord> = saved
            .params
            .iter()
            .map(|rec| (rec.name.trim(), rec))
            .collect();

        let mut items = Vec::new();
        for (idx, entry) in catalog.iter().enumerate() {
            let name = entry.name.trim();
            if name.is_empty() {
                continue;
            }
            let saved = by_name.get(name);
            items.push(Setting {
                name: name.to_string(),
                description: entry.description.trim().to_string(),
                enabled: saved.and_then(|rec| rec.enabled).unwrap_or(true),
                order: saved
                    .and_then(|rec| rec.order)
                    .unwrap_or((idx as i64 + 1) * 10),
            });
        }
        Self { items }
    }

    pub fn get(&self, name: &str) -> Option<&Setting> {
        let name = name.trim();
        self.items.iter().find(|s| s.name == name)
    }

    pub fn items(&self) -> &[Setting] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sets visibility for one parameter. Unknown names are ignored.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) {
        let name = name.trim();
        if let Some(s) = self.items.iter_mut().find(|s| s.name == name) {
            s.enabled = enabled;
        }
    }

    /// Sets the order for one parameter. Finite values truncate toward
    /// zero, anything else falls back to [`DEFAULT_ORDER`]. Unknown names
    /// are ignored.
    pub fn set_order(&mut self, name: &str, order: f64) {
        let name = name.trim();
        if let Some(s) = self.items.iter_mut().find(|s| s.name == name) {
            s.order = coerce_order(order);
        }
    }

    pub fn enable_all(&mut self) {
        for s in &mut self.items {
            s.enabled = true;
        }
    }

    pub fn disable_all(&mut self) {
        for s in &mut self.items {
            s.enabled = false;
        }
    }

    /// Reassigns orders as consecutive multiples of `step`, separately for
    /// the enabled and the disabled group. Within a group the current
    /// (order, name) order is kept, only the numbers change.
    pub fn renumber(&mut self, step: i64) {
        let step = step.max(1);
        for enabled in [true, false] {
            let mut group: Vec<(i64, String)> = self
                .items
                .iter()
                .filter(|s| s.enabled == enabled)
                .map(|s| (s.order, s.name.clone()))
                .collect();
            group.sort();
            for (pos, (_, name)) in group.iter().enumerate() {
                if let Some(s) = self.items.iter_mut().find(|s| &s.name == name) {
                    s.order = (pos as i64 + 1) * step;
                }
            }
        }
    }

    /// Enabled and disabled parameters, each sorted by (order, name).
    pub fn grouped(&self) -> (Vec<&Setting>, Vec<&Setting>) {
        let mut visible: Vec<&Setting> = self.items.iter().filter(|s| s.enabled).collect();
        let mut hidden: Vec<&Setting> = self.items.iter().filter(|s| !s.enabled).collect();
        let key = |s: &&Setting| (s.order, s.name.clone());
        visible.sort_by_key(key);
        hidden.sort_by_key(key);
        (visible, hidden)
    }

    /// Canonical serialization: every parameter, all fields present,
    /// sorted by (order, name).
    pub fn serialize(&self) -> SettingsSnapshot {
        let mut rows: Vec<&Setting> = self.items.iter().collect();
        rows.sort_by_key(|s| (s.order, s.name.clone()));
        SettingsSnapshot {
            params: rows
                .into_iter()
                .map(|s| SettingRecord {
                    name: s.name.clone(),
                    enabled: Some(s.enabled),
                    order: Some(s.order),
                })
                .collect(),
        }
    }

    /// Canonical serialization rendered as paste-ready text.
    pub fn export_text(&self) -> String {
        let mut lines = vec![
            "# parameters_ui.json".to_string(),
            "# UI-only settings (visibility + order)".to_string(),
            "params:".to_string(),
        ];
        for rec in self.serialize().params {
            lines.push(format!("  - name: {}", rec.name));
            lines.push(format!("    enabled: {}", rec.enabled.unwrap_or(true)));
            lines.push(format!("    order: {}", rec.order.unwrap_or(DEFAULT_ORDER)));
        }
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

fn coerce_order(order: f64) -> i64 {
    if order.is_finite() {
        order.trunc() as i64
    } else {
        DEFAULT_ORDER
    }
}
