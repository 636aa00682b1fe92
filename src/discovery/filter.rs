use lazy_static::lazy_static;
use log::debug;
use regex::{Regex, RegexBuilder};

use crate::hub::HaEntity;
use crate::models::{parse_level, BatteryRecord, DeviceInfo};

/// States Home Assistant uses when a sensor has no reading
pub const UNAVAILABLE_STATES: [&str; 4] = ["unknown", "unavailable", "none", ""];

pub struct BatteryPattern {
    pub name: &'static str,
    pub regex: Regex,
}

fn pattern(name: &'static str, expr: &str) -> BatteryPattern {
    let regex = RegexBuilder::new(expr)
        .case_insensitive(true)
        .build()
        .expect("static battery pattern");
    return BatteryPattern { name, regex };
}

lazy_static! {
    /// Identifier patterns, evaluated in order. The first hit decides.
    pub static ref BATTERY_PATTERNS: Vec<BatteryPattern> = vec![
        pattern("battery", r"^.*battery.*"),
        pattern("bat_suffix", r"^.*_bat$"),
        pattern("battery_level", r"^.*_battery_level.*"),
        pattern("battery_percentage", r"^.*_battery_percentage.*"),
        pattern("battery_state", r"^.*_battery_state.*"),
        pattern("power_source", r"^.*_power_source.*"),
    ];
}

pub fn matching_pattern(entity_id: &str) -> Option<&'static BatteryPattern> {
    return BATTERY_PATTERNS.iter().find(|p| p.regex.is_match(entity_id));
}

/// Second stage check on an entity whose id looked like a battery
pub fn is_battery_entity(entity: &HaEntity) -> bool {
    if entity.attribute("device_class") == "battery" {
        return true;
    }
    if entity.attribute("unit_of_measurement") == "%" {
        return true;
    }
    return entity.entity_id.to_lowercase().contains("battery")
        && !UNAVAILABLE_STATES.contains(&entity.state.as_str())
        && parse_level(&entity.state).is_some();
}

pub fn to_battery_record(entity: &HaEntity) -> BatteryRecord {
    let friendly_name = entity.attribute("friendly_name");
    return BatteryRecord {
        entity_id: entity.entity_id.clone(),
        name: if friendly_name.is_empty() { entity.entity_id.clone() } else { friendly_name },
        state: entity.state.clone(),
        unit: entity.attribute("unit_of_measurement"),
        device_class: entity.attribute("device_class"),
        last_updated: entity.last_updated.clone(),
        device_info: DeviceInfo {
            model: entity.attribute("model"),
            manufacturer: entity.attribute("manufacturer"),
            sw_version: entity.attribute("sw_version"),
            hw_version: entity.attribute("hw_version"),
            via_device: entity.reference_attribute("via_device"),
        },
    };
}

/// Picks the battery entities out of the full state list, keeping hub order
pub fn find_battery_entities(entities: &[HaEntity]) -> Vec<BatteryRecord> {
    let mut records = Vec::new();

    for entity in entities {
        let Some(p) = matching_pattern(&entity.entity_id) else {
            continue;
        };

        if is_battery_entity(entity) {
            debug!("{} accepted via pattern {}", entity.entity_id, p.name);
            records.push(to_battery_record(entity));
        } else {
            debug!("{} matched pattern {} but is no battery sensor", entity.entity_id, p.name);
        }
    }

    return records;
}
