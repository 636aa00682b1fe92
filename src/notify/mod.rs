use chrono::NaiveDateTime;
use log::{error, info, warn};

use crate::config::Config;
use crate::display_time;
use crate::hub::{HubClient, NotificationPayload};
use crate::models::{BatteryStatus, CategorizedDevices};

pub const SHORT_TITLE: &str = "🔋 Battery Discovery Report";
pub const LONG_TITLE: &str = "🔋 Home Assistant Battery Discovery Report";

/// Names of the generated files, as shown to the user
pub struct ReportFiles {
    pub json: String,
    pub yaml: Option<String>,
}

/// Devices that need attention, formatted as "Name: 12%"
struct Attention {
    critical: Vec<String>,
    low: Vec<String>,
}

fn attention_list(categories: &CategorizedDevices) -> Attention {
    let mut attention = Attention { critical: Vec::new(), low: Vec::new() };
    for (_, device) in categories.records() {
        let entry = format!("{}: {}%", device.name, device.state);
        match device.status() {
            Some(BatteryStatus::Critical) => attention.critical.push(entry),
            Some(BatteryStatus::Low) => attention.low.push(entry),
            _ => {}
        }
    }
    return attention;
}

fn bullet_list(items: &[String]) -> String {
    return items.iter().map(|i| format!("• {i}")).collect::<Vec<_>>().join("\n");
}

/// Full report, meant for email style channels
pub fn long_message(categories: &CategorizedDevices, config: &Config, files: &ReportFiles, generated_at: &NaiveDateTime) -> String {
    let attention = attention_list(categories);

    let mut message = format!(
        "🔋 Battery Device Discovery Report\nGenerated: {}\n\n📊 SUMMARY:\n• Total Devices Found: {}\n• Home Assistant: {}\n\n📱 DEVICE BREAKDOWN:",
        display_time(generated_at),
        categories.total(),
        config.hub.url
    );

    for (category, devices) in categories.non_empty() {
        message.push_str(&format!("\n• {}: {} devices", category.title(), devices.len()));
    }

    if !attention.critical.is_empty() {
        message.push_str(&format!("\n\n🔴 CRITICAL DEVICES ({}):\n", attention.critical.len()));
        message.push_str(&bullet_list(&attention.critical));
    }

    if !attention.low.is_empty() {
        message.push_str(&format!("\n\n🟡 LOW BATTERY DEVICES ({}):\n", attention.low.len()));
        message.push_str(&bullet_list(&attention.low));
    }

    message.push_str(&format!(
        "\n\n📁 GENERATED FILES:\n• JSON Report: {}\n• YAML Automations: {}\n\n🔧 NEXT STEPS:\n\
1. Copy battery_monitoring.yaml to packages/ folder\n\
2. Add entity includes to recorder and InfluxDB configs\n\
3. Set up battery dashboard in Lovelace\n\
4. Test notifications using dashboard buttons\n\n\
🏠 Dashboard: {}\n\nThis report was generated by the Battery Discovery Script.",
        files.json,
        files.yaml.as_deref().unwrap_or("None"),
        config.hub.dashboard_url()
    ));

    return message;
}

/// Counts only, for chat style channels
pub fn short_message(categories: &CategorizedDevices, config: &Config) -> String {
    let attention = attention_list(categories);

    let breakdown: Vec<String> = categories
        .non_empty()
        .map(|(category, devices)| format!("• {}: {}", category.title(), devices.len()))
        .collect();

    let mut message = format!(
        "🔋 Battery Discovery Complete!\n\n📊 Found {} battery devices:\n{}",
        categories.total(),
        breakdown.join("\n")
    );

    if !attention.critical.is_empty() {
        message.push_str(&format!("\n\n🔴 {} CRITICAL devices need immediate attention!", attention.critical.len()));
    }
    if !attention.low.is_empty() {
        message.push_str(&format!("\n🟡 {} devices have low batteries", attention.low.len()));
    }

    message.push_str(&format!(
        "\n\n📧 Check email for detailed report\n🏠 Dashboard: {}",
        config.hub.dashboard_url()
    ));
    return message;
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct DispatchReport {
    pub sent: Vec<String>,
    /// Channel name and reason
    pub failed: Vec<(String, String)>,
}

impl DispatchReport {
    pub fn success(&self) -> bool {
        return !self.sent.is_empty();
    }
}

/// Sends the report through every configured channel, one after another.
/// A failing channel is logged and skipped.
pub async fn send_notifications<C: HubClient>(
    client: &C,
    config: &Config,
    categories: &CategorizedDevices,
    files: &ReportFiles,
    generated_at: &NaiveDateTime,
) -> DispatchReport {
    info!("📧 Sending notifications via Home Assistant...");

    let short = NotificationPayload {
        title: SHORT_TITLE.to_string(),
        message: short_message(categories, config),
    };
    let long = NotificationPayload {
        title: LONG_TITLE.to_string(),
        message: long_message(categories, config, files, generated_at),
    };

    let mut report = DispatchReport::default();
    for channel in &config.notify.channels {
        let payload = if *channel == config.notify.short_form_channel { &short } else { &long };

        match client.send_notification(channel, payload).await {
            Ok(()) => {
                info!("✅ Notification sent via notify.{channel}");
                report.sent.push(channel.clone());
            }
            Err(e) => {
                warn!("⚠️ Failed to send via notify.{channel}: {e}");
                report.failed.push((channel.clone(), e.to_string()));
            }
        }
    }

    if report.success() {
        info!("✅ Successfully sent {} notifications!", report.sent.len());
    } else {
        error!("❌ No notifications were sent successfully");
    }
    return report;
}
