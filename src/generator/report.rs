use chrono::NaiveDateTime;

use super::GeneratedConfig;
use crate::display_time;
use crate::models::{BatteryRecord, CategorizedDevices};

/// "Name: 42% 🟡 WARNING", or "Name: state" when the state is not a level
pub fn describe_level(device: &BatteryRecord) -> String {
    match device.status() {
        Some(status) => format!("{}: {}% {}", device.name, device.state, status.label()),
        None => format!("{}: {}", device.name, device.state),
    }
}

fn include_block(lines: &mut Vec<String>, comment: &str, integration: &str, entities: &[String]) {
    lines.push(format!("# {comment}"));
    lines.push(format!("{integration}:"));
    lines.push("  include:".to_string());
    lines.push("    entities:".to_string());
    for entity in entities {
        lines.push(format!("      - {entity}"));
    }
}

pub fn render_discovery_report(categories: &CategorizedDevices, config: &GeneratedConfig, generated_at: &NaiveDateTime) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("=".repeat(80));
    lines.push("BATTERY DEVICE DISCOVERY REPORT".to_string());
    lines.push("=".repeat(80));
    lines.push(format!("Generated on: {}", display_time(generated_at)));
    lines.push("".to_string());
    lines.push(format!("📊 SUMMARY: Found {} battery-powered devices", categories.total()));
    lines.push("".to_string());

    for (category, devices) in categories.non_empty() {
        lines.push(format!("📱 {}: {} devices", category.title(), devices.len()));
        for device in devices {
            lines.push(format!("   • {}", describe_level(device)));
        }
        lines.push("".to_string());
    }

    lines.push("🔧 CONFIGURATION SNIPPETS".to_string());
    lines.push("-".repeat(40));
    lines.push("".to_string());
    include_block(&mut lines, "Add to packages/battery_monitoring.yaml recorder section:", "recorder", &config.recorder_includes);
    lines.push("".to_string());
    include_block(&mut lines, "Add to packages/influxdb.yaml:", "influxdb", &config.influxdb_includes);
    lines.push("".to_string());
    lines.push("# Dashboard entities found:".to_string());
    for entity in &config.dashboard_entities {
        lines.push(format!("# {}: {} ({})", entity.category, entity.entity, entity.name));
    }

    let mut report = lines.join("\n");
    report.push('\n');
    return report;
}
