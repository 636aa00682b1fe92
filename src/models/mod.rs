use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Device family a battery entity is sorted into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Mobile,
    Sonoff,
    Tuya,
    Zigbee,
    Other,
}

impl Category {
    /// All categories in report order
    pub const ALL: [Category; 5] = [
        Category::Mobile,
        Category::Sonoff,
        Category::Tuya,
        Category::Zigbee,
        Category::Other,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Category::Mobile => "mobile_devices",
            Category::Sonoff => "sonoff_devices",
            Category::Tuya => "tuya_devices",
            Category::Zigbee => "zigbee_devices",
            Category::Other => "other_devices",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::Mobile => "Mobile Devices",
            Category::Sonoff => "Sonoff Devices",
            Category::Tuya => "Tuya Devices",
            Category::Zigbee => "Zigbee Devices",
            Category::Other => "Other Devices",
        }
    }

    #[cfg(test)]
    pub fn from_key(s: &str) -> Option<Self> {
        return Category::ALL.into_iter().find(|c| c.key() == s);
    }

    /// Only these families get a dedicated low battery automation
    pub fn wants_automation(&self) -> bool {
        return matches!(self, Category::Mobile | Category::Sonoff);
    }
}

/// Charge level classification used in reports and notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryStatus {
    Critical,
    Low,
    Warning,
    Good,
}

impl BatteryStatus {
    pub fn from_level(level: f64) -> Self {
        if level <= 15.0 {
            return BatteryStatus::Critical;
        } else if level <= 25.0 {
            return BatteryStatus::Low;
        } else if level <= 40.0 {
            return BatteryStatus::Warning;
        }
        return BatteryStatus::Good;
    }

    pub fn label(&self) -> &'static str {
        match self {
            BatteryStatus::Critical => "🔴 CRITICAL",
            BatteryStatus::Low => "🟠 LOW",
            BatteryStatus::Warning => "🟡 WARNING",
            BatteryStatus::Good => "🟢 GOOD",
        }
    }
}

/// Returns the level if the state is a plain non-negative decimal ("87", "12.5").
/// Signs, exponents and more than one dot are rejected.
pub fn parse_level(state: &str) -> Option<f64> {
    if state.matches('.').count() > 1 {
        return None;
    }
    let digits = state.replace('.', "");
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    return state.parse::<f64>().ok();
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DeviceInfo {
    pub model: String,
    pub manufacturer: String,
    pub sw_version: String,
    pub hw_version: String,
    /// Parent device (e.g. the Zigbee coordinator), empty if the device is standalone
    pub via_device: String,
}

/// A hub entity confirmed to report a battery
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatteryRecord {
    pub entity_id: String,
    /// Friendly name, falls back to the entity id
    pub name: String,
    pub state: String,
    pub unit: String,
    pub device_class: String,
    pub last_updated: String,
    pub device_info: DeviceInfo,
}

impl BatteryRecord {
    pub fn level(&self) -> Option<f64> {
        return parse_level(&self.state);
    }

    pub fn status(&self) -> Option<BatteryStatus> {
        return self.level().map(BatteryStatus::from_level);
    }
}

/// Battery records grouped by category. Every category is always present.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorizedDevices {
    buckets: Vec<(Category, Vec<BatteryRecord>)>,
}

impl CategorizedDevices {
    pub fn new() -> Self {
        return CategorizedDevices {
            buckets: Category::ALL.iter().map(|c| (*c, Vec::new())).collect(),
        };
    }

    pub fn push(&mut self, category: Category, record: BatteryRecord) {
        if let Some((_, devices)) = self.buckets.iter_mut().find(|(c, _)| *c == category) {
            devices.push(record);
        }
    }

    pub fn get(&self, category: Category) -> &[BatteryRecord] {
        return self
            .buckets
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, devices)| devices.as_slice())
            .unwrap_or(&[]);
    }

    /// Categories in report order, including empty ones
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[BatteryRecord])> {
        return self.buckets.iter().map(|(c, devices)| (*c, devices.as_slice()));
    }

    pub fn non_empty(&self) -> impl Iterator<Item = (Category, &[BatteryRecord])> {
        return self.iter().filter(|(_, devices)| !devices.is_empty());
    }

    /// All records in category-then-discovery order
    pub fn records(&self) -> impl Iterator<Item = (Category, &BatteryRecord)> {
        return self
            .buckets
            .iter()
            .flat_map(|(c, devices)| devices.iter().map(move |d| (*c, d)));
    }

    pub fn total(&self) -> usize {
        return self.buckets.iter().map(|(_, devices)| devices.len()).sum();
    }
}

impl Default for CategorizedDevices {
    fn default() -> Self {
        return CategorizedDevices::new();
    }
}

impl Serialize for CategorizedDevices {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for (category, devices) in &self.buckets {
            map.serialize_entry(category.key(), devices)?;
        }
        return map.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_boundaries() {
        assert_eq!(BatteryStatus::from_level(15.0), BatteryStatus::Critical);
        assert_eq!(BatteryStatus::from_level(15.01), BatteryStatus::Low);
        assert_eq!(BatteryStatus::from_level(25.0), BatteryStatus::Low);
        assert_eq!(BatteryStatus::from_level(40.0), BatteryStatus::Warning);
        assert_eq!(BatteryStatus::from_level(40.01), BatteryStatus::Good);
        assert_eq!(BatteryStatus::from_level(0.0), BatteryStatus::Critical);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("87"), Some(87.0));
        assert_eq!(parse_level("12.5"), Some(12.5));
        assert_eq!(parse_level("15.01"), Some(15.01));
        assert_eq!(parse_level("1.2.3"), None);
        assert_eq!(parse_level("-5"), None);
        assert_eq!(parse_level("on"), None);
        assert_eq!(parse_level("unavailable"), None);
        assert_eq!(parse_level(""), None);
        assert_eq!(parse_level("."), None);
        assert_eq!(parse_level("1e3"), None);
    }

    #[test]
    fn test_category_keys() {
        for c in Category::ALL {
            assert_eq!(Category::from_key(c.key()), Some(c));
        }
        assert_eq!(Category::from_key("unknown_devices"), None);
        assert!(Category::Mobile.wants_automation());
        assert!(Category::Sonoff.wants_automation());
        assert!(!Category::Tuya.wants_automation());
    }

    #[test]
    fn test_serialize_keeps_category_order() {
        let json = serde_json::to_string(&CategorizedDevices::new()).unwrap();
        assert_eq!(
            json,
            r#"{"mobile_devices":[],"sonoff_devices":[],"tuya_devices":[],"zigbee_devices":[],"other_devices":[]}"#
        );
    }
}
