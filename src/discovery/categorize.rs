use crate::models::{BatteryRecord, CategorizedDevices, Category};

const MOBILE_MARKERS: [&str; 3] = ["sm_", "phone", "mobile"];

/// Routes one record. Rules are checked in priority order, first match wins.
pub fn categorize(record: &BatteryRecord) -> Category {
    let entity_id = record.entity_id.to_lowercase();
    let manufacturer = record.device_info.manufacturer.to_lowercase();

    if MOBILE_MARKERS.iter().any(|m| entity_id.contains(*m)) {
        return Category::Mobile;
    }
    if entity_id.contains("sonoff") || manufacturer.contains("sonoff") {
        return Category::Sonoff;
    }
    if entity_id.contains("tuya") || manufacturer.contains("tuya") {
        return Category::Tuya;
    }
    if entity_id.contains("zigbee") || !record.device_info.via_device.is_empty() {
        return Category::Zigbee;
    }
    return Category::Other;
}

pub fn categorize_devices(records: Vec<BatteryRecord>) -> CategorizedDevices {
    let mut categories = CategorizedDevices::new();
    for record in records {
        categories.push(categorize(&record), record);
    }
    return categories;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeviceInfo;

    fn record(id: &str, manufacturer: &str, via: &str) -> BatteryRecord {
        return BatteryRecord {
            entity_id: id.to_string(),
            name: id.to_string(),
            state: "50".to_string(),
            unit: "%".to_string(),
            device_class: "battery".to_string(),
            last_updated: "".to_string(),
            device_info: DeviceInfo {
                manufacturer: manufacturer.to_string(),
                via_device: via.to_string(),
                ..Default::default()
            },
        };
    }

    #[test]
    fn test_rules() {
        assert_eq!(categorize(&record("sensor.sm_g991b_battery_level", "", "")), Category::Mobile);
        assert_eq!(categorize(&record("sensor.Pixel_Phone_battery", "", "")), Category::Mobile);
        assert_eq!(categorize(&record("sensor.door_battery", "SONOFF", "")), Category::Sonoff);
        assert_eq!(categorize(&record("sensor.tuya_th_battery", "", "")), Category::Tuya);
        assert_eq!(categorize(&record("sensor.zigbee_remote_battery", "", "")), Category::Zigbee);
        assert_eq!(categorize(&record("sensor.remote_battery", "IKEA", "coordinator")), Category::Zigbee);
        assert_eq!(categorize(&record("sensor.ups_battery", "APC", "")), Category::Other);
    }

    #[test]
    fn test_priority_order() {
        // mobile beats tuya, sonoff beats tuya and zigbee
        assert_eq!(categorize(&record("sensor.mobile_tuya_battery", "", "")), Category::Mobile);
        assert_eq!(categorize(&record("sensor.sonoff_zigbee_battery", "Tuya", "hub")), Category::Sonoff);
        assert_eq!(categorize(&record("sensor.tuya_zigbee_battery", "", "hub")), Category::Tuya);
    }

    #[test]
    fn test_partition() {
        let input = vec![
            record("sensor.phone_battery", "", ""),
            record("sensor.sonoff_battery", "", ""),
            record("sensor.tuya_battery", "", ""),
            record("sensor.zigbee_battery", "", ""),
            record("sensor.other_battery", "", ""),
            record("sensor.other2_battery", "", ""),
            record("sensor.phone_battery", "", ""),
        ];
        let categories = categorize_devices(input.clone());
        assert_eq!(categories.total(), input.len());

        for r in &input {
            let expected = input.iter().filter(|x| *x == r).count();
            let found = categories.records().filter(|(_, x)| *x == r).count();
            assert_eq!(found, expected);
        }
        assert_eq!(categories.get(Category::Mobile).len(), 2);
        assert_eq!(categories.get(Category::Other).len(), 2);
    }

    #[test]
    fn test_discovery_order_is_kept() {
        let categories = categorize_devices(vec![
            record("sensor.b_battery", "", ""),
            record("sensor.a_battery", "", ""),
        ]);
        let ids: Vec<&str> = categories.get(Category::Other).iter().map(|r| r.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["sensor.b_battery", "sensor.a_battery"]);
    }
}
