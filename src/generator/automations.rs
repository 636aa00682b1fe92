use crate::config::AutomationConfig;
use crate::models::{BatteryRecord, CategorizedDevices};

pub const AUTOMATION_FILE_HEADER: &str = "# Additional battery automations for specific devices\nautomation:";

pub fn automation_id(entity_id: &str) -> String {
    return format!("battery_alert_{}", entity_id.replace('.', "_"));
}

/// Double quoted scalar with `"` and `\` escaped. JSON strings are valid YAML.
fn quoted(text: &str) -> String {
    return serde_json::Value::String(text.to_string()).to_string();
}

/// One automation list entry, indented to sit below `automation:`
pub fn automation_snippet(device: &BatteryRecord, settings: &AutomationConfig) -> String {
    let entity_id = &device.entity_id;
    let name = &device.name;
    return format!(
        r#"
  - id: {id}
    alias: {alias}
    description: {description}
    trigger:
      - platform: numeric_state
        entity_id: {entity_id}
        below: {below}
        for:
          minutes: {minutes}
    condition:
      - condition: state
        entity_id: {toggle}
        state: 'on'
    action:
      - service: notify.email
        data:
          title: {email_title}
          message: >
            {name} battery is at {{{{ states('{entity_id}') }}}}%

            Please charge or replace the battery soon.

            Time: {{{{ now().strftime('%Y-%m-%d %H:%M:%S') }}}}
      - service: notify.telegram
        data:
          title: {telegram_title}
          message: "Battery level: {{{{ states('{entity_id}') }}}}%"
"#,
        id = automation_id(entity_id),
        alias = quoted(&format!("Battery Alert: {name}")),
        description = quoted(&format!("Alert when {name} battery is low")),
        email_title = quoted(&format!("🔋 Battery Alert: {name}")),
        telegram_title = quoted(&format!("🔋 {name} Battery Low")),
        below = settings.below,
        minutes = settings.for_minutes,
        toggle = settings.toggle_entity,
    );
}

/// Alert automations for the categories that warrant one, in report order
pub fn generate_automations(categories: &CategorizedDevices, settings: &AutomationConfig) -> Vec<String> {
    return categories
        .records()
        .filter(|(category, _)| category.wants_automation())
        .map(|(_, device)| automation_snippet(device, settings))
        .collect();
}

/// Complete contents of the automation file
pub fn automation_file(snippets: &[String]) -> String {
    let mut contents = AUTOMATION_FILE_HEADER.to_string();
    for snippet in snippets {
        contents.push_str(snippet);
    }
    return contents;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::generator::test_data::*;
    use crate::models::Category;

    #[test]
    fn test_only_mobile_and_sonoff_get_automations() {
        let snippets = generate_automations(&sample_categories(), &Config::default().automation);
        assert_eq!(snippets.len(), 2);
        assert!(snippets[0].contains("id: battery_alert_sensor_phone_battery"));
        assert!(snippets[1].contains("id: battery_alert_sensor_sonoff_plug_battery"));
    }

    #[test]
    fn test_snippet_template() {
        let settings = Config::default().automation;
        let snippet = automation_snippet(&record("sensor.phone_battery", "Phone", "12"), &settings);

        assert!(snippet.starts_with("\n  - id: battery_alert_sensor_phone_battery\n"));
        assert!(snippet.contains("    alias: \"Battery Alert: Phone\"\n"));
        assert!(snippet.contains("        entity_id: sensor.phone_battery\n        below: 20\n        for:\n          minutes: 30\n"));
        assert!(snippet.contains("        entity_id: input_boolean.battery_alerts_enabled\n        state: 'on'\n"));
        assert!(snippet.contains("Phone battery is at {{ states('sensor.phone_battery') }}%"));
        assert!(snippet.contains("Time: {{ now().strftime('%Y-%m-%d %H:%M:%S') }}"));
        assert!(snippet.contains("      - service: notify.email\n"));
        assert!(snippet.contains("      - service: notify.telegram\n"));
        assert!(snippet.contains("message: \"Battery level: {{ states('sensor.phone_battery') }}%\""));
    }

    #[test]
    fn test_settings_are_used() {
        let mut settings = Config::default().automation;
        settings.below = 10;
        settings.for_minutes = 5;
        settings.toggle_entity = "input_boolean.quiet".to_string();
        let snippet = automation_snippet(&record("sensor.phone_battery", "Phone", "12"), &settings);
        assert!(snippet.contains("below: 10\n"));
        assert!(snippet.contains("minutes: 5\n"));
        assert!(snippet.contains("entity_id: input_boolean.quiet\n"));
    }

    #[test]
    fn test_generated_file_is_valid_yaml() {
        let snippets = generate_automations(&sample_categories(), &Config::default().automation);
        let contents = automation_file(&snippets);
        let parsed: serde_yml::Value = serde_yml::from_str(&contents).unwrap();
        let list = parsed.get("automation").unwrap().as_sequence().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(
            list[0].get("id").unwrap().as_str().unwrap(),
            "battery_alert_sensor_phone_battery"
        );
    }

    #[test]
    fn test_quotes_and_backslashes_in_names_are_escaped() {
        let name = r#"Living Room 55" Phone \ Test"#;
        let mut categories = CategorizedDevices::new();
        categories.push(Category::Mobile, record("sensor.phone_battery", name, "12"));
        let contents = automation_file(&generate_automations(&categories, &Config::default().automation));

        let parsed: serde_yml::Value = serde_yml::from_str(&contents).unwrap();
        let entry = &parsed.get("automation").unwrap().as_sequence().unwrap()[0];
        assert_eq!(
            entry.get("alias").unwrap().as_str().unwrap(),
            r#"Battery Alert: Living Room 55" Phone \ Test"#
        );
        assert_eq!(
            entry.get("description").unwrap().as_str().unwrap(),
            format!("Alert when {name} battery is low")
        );
        let actions = entry.get("action").unwrap().as_sequence().unwrap();
        assert_eq!(
            actions[1].get("data").unwrap().get("title").unwrap().as_str().unwrap(),
            format!("🔋 {name} Battery Low")
        );
    }

    #[test]
    fn test_no_snippets_without_matching_devices() {
        let mut categories = CategorizedDevices::new();
        categories.push(Category::Tuya, record("sensor.tuya_battery", "Tuya", "50"));
        assert!(generate_automations(&categories, &Config::default().automation).is_empty());
    }
}
