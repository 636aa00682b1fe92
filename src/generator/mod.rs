pub mod automations;
pub mod report;

use serde::{Deserialize, Serialize};

use crate::models::CategorizedDevices;

pub use automations::generate_automations;
pub use report::render_discovery_report;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardEntity {
    pub entity: String,
    pub name: String,
    pub category: String,
}

/// Include lists and dashboard entries for every discovered battery
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeneratedConfig {
    pub recorder_includes: Vec<String>,
    pub influxdb_includes: Vec<String>,
    pub dashboard_entities: Vec<DashboardEntity>,
}

pub fn generate_battery_config(categories: &CategorizedDevices) -> GeneratedConfig {
    let mut config = GeneratedConfig::default();

    for (category, device) in categories.records() {
        config.recorder_includes.push(device.entity_id.clone());
        config.influxdb_includes.push(device.entity_id.clone());
        config.dashboard_entities.push(DashboardEntity {
            entity: device.entity_id.clone(),
            name: device.name.clone(),
            category: category.key().to_string(),
        });
    }

    return config;
}
