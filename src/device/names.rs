//! Device-type name lookup
//!
//! Two revisions of the code-to-name table exist in the wild. The resolver
//! picks one once, at construction, in fixed preference order:
//! 1. current table (`DeviceTypeNames`)
//! 2. legacy table (`LegacyDeviceTypeNames`)
//! 3. neither → every name resolves to "Unknown"

use std::sync::Arc;

use tracing::debug;

use crate::config::NameLookupMode;

/// Numeric device-type codes shared by the detector and the lookup tables
pub mod device_type {
    pub const DESKTOP: &str = "0";
    pub const SMARTPHONE: &str = "1";
    pub const TABLET: &str = "2";
    pub const FEATURE_PHONE: &str = "3";
    pub const CONSOLE: &str = "4";
}

/// Label for name requests that carry no device code (API-originated orders)
pub const API_DEVICE_NAME: &str = "API";
const UNKNOWN_DEVICE_NAME: &str = "unknown";

const DEVICE_TYPES: [&str; 14] = [
    "desktop",
    "smartphone",
    "tablet",
    "feature phone",
    "console",
    "tv",
    "car browser",
    "smart display",
    "camera",
    "portable media player",
    "phablet",
    "smart speaker",
    "wearable",
    "peripheral",
];

// Older table stops after the media player
const LEGACY_DEVICE_TYPES: [&str; 10] = [
    "desktop",
    "smartphone",
    "tablet",
    "feature phone",
    "console",
    "tv",
    "car browser",
    "smart display",
    "camera",
    "portable media player",
];

/// Device name lookup trait
pub trait DeviceNameLookup: Send + Sync {
    /// Raw (lower-case) name for a device-type code
    fn lookup_device_name(&self, code: &str) -> Option<String>;

    /// 获取 revision 名称（用于日志）
    fn revision(&self) -> &'static str;
}

fn lookup_in(table: &[&str], code: &str) -> Option<String> {
    let index: usize = code.trim().parse().ok()?;
    table.get(index).map(|name| name.to_string())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceTypeNames;

impl DeviceNameLookup for DeviceTypeNames {
    fn lookup_device_name(&self, code: &str) -> Option<String> {
        lookup_in(&DEVICE_TYPES, code)
    }

    fn revision(&self) -> &'static str {
        "current"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyDeviceTypeNames;

impl DeviceNameLookup for LegacyDeviceTypeNames {
    fn lookup_device_name(&self, code: &str) -> Option<String> {
        lookup_in(&LEGACY_DEVICE_TYPES, code)
    }

    fn revision(&self) -> &'static str {
        "legacy"
    }
}

/// Resolves device codes to human-readable, title-cased names
#[derive(Clone, Default)]
pub struct DeviceNameResolver {
    lookup: Option<Arc<dyn DeviceNameLookup>>,
}

impl DeviceNameResolver {
    /// Select the first available facility; both absent is a valid state
    pub fn from_facilities(
        primary: Option<Arc<dyn DeviceNameLookup>>,
        secondary: Option<Arc<dyn DeviceNameLookup>>,
    ) -> Self {
        let lookup = primary.or(secondary);
        match &lookup {
            Some(l) => debug!("Device names: using {} lookup table", l.revision()),
            None => debug!("Device names: no lookup table available"),
        }
        Self { lookup }
    }

    pub fn from_mode(mode: NameLookupMode) -> Self {
        let current: Arc<dyn DeviceNameLookup> = Arc::new(DeviceTypeNames);
        let legacy: Arc<dyn DeviceNameLookup> = Arc::new(LegacyDeviceTypeNames);

        match mode {
            NameLookupMode::Auto => Self::from_facilities(Some(current), Some(legacy)),
            NameLookupMode::Current => Self::from_facilities(Some(current), None),
            NameLookupMode::Legacy => Self::from_facilities(None, Some(legacy)),
            NameLookupMode::None => Self::from_facilities(None, None),
        }
    }

    pub fn revision(&self) -> Option<&'static str> {
        self.lookup.as_ref().map(|l| l.revision())
    }

    /// Title-cased name, or `None` when no table is available or the code is unmapped
    pub fn lookup_name(&self, code: &str) -> Option<String> {
        self.lookup
            .as_ref()?
            .lookup_device_name(code)
            .map(|name| title_case(&name))
    }

    /// Display name with sentinels: "API" without a code, "Unknown" when unresolvable
    pub fn resolve_name(&self, code: Option<&str>) -> String {
        let Some(code) = code else {
            return API_DEVICE_NAME.to_string();
        };

        let raw = self
            .lookup
            .as_ref()
            .and_then(|l| l.lookup_device_name(code))
            .unwrap_or_else(|| UNKNOWN_DEVICE_NAME.to_string());

        title_case(&raw)
    }
}

impl std::fmt::Debug for DeviceNameResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceNameResolver")
            .field("revision", &self.revision())
            .finish()
    }
}

/// Upper-case the first letter of every whitespace-separated word
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start && !c.is_whitespace() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_whitespace();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_none_is_api() {
        let resolver = DeviceNameResolver::from_mode(NameLookupMode::Auto);
        assert_eq!(resolver.resolve_name(None), "API");
    }

    #[test]
    fn test_resolve_without_any_facility() {
        let resolver = DeviceNameResolver::from_facilities(None, None);
        assert_eq!(resolver.resolve_name(Some("1")), "Unknown");
        assert_eq!(resolver.lookup_name("1"), None);
        assert_eq!(resolver.revision(), None);
    }

    #[test]
    fn test_primary_preferred_over_secondary() {
        let resolver = DeviceNameResolver::from_facilities(
            Some(Arc::new(DeviceTypeNames)),
            Some(Arc::new(LegacyDeviceTypeNames)),
        );
        assert_eq!(resolver.revision(), Some("current"));
        assert_eq!(resolver.resolve_name(Some("13")), "Peripheral");
    }

    #[test]
    fn test_secondary_fallback() {
        let resolver = DeviceNameResolver::from_facilities(None, Some(Arc::new(LegacyDeviceTypeNames)));
        assert_eq!(resolver.revision(), Some("legacy"));
        assert_eq!(resolver.resolve_name(Some("3")), "Feature Phone");
        // beyond the legacy table
        assert_eq!(resolver.resolve_name(Some("13")), "Unknown");
        assert_eq!(resolver.lookup_name("13"), None);
    }

    #[test]
    fn test_title_casing() {
        let resolver = DeviceNameResolver::from_mode(NameLookupMode::Current);
        assert_eq!(resolver.resolve_name(Some("9")), "Portable Media Player");
        assert_eq!(resolver.lookup_name(device_type::DESKTOP).as_deref(), Some("Desktop"));
        assert_eq!(title_case("smart  tv"), "Smart  Tv");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_non_numeric_code_is_unknown() {
        let resolver = DeviceNameResolver::from_mode(NameLookupMode::Auto);
        assert_eq!(resolver.resolve_name(Some("smartphone")), "Unknown");
    }
}
