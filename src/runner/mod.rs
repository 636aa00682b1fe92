use chrono::NaiveDateTime;
use log::{error, info};
use std::path::PathBuf;

use crate::config::Config;
use crate::discovery::{categorize_devices, find_battery_entities};
use crate::generator::{generate_automations, generate_battery_config, render_discovery_report};
use crate::hub::{get_all_entities, HubClient};
use crate::notify::{send_notifications, DispatchReport, ReportFiles};
use crate::output::{base_name, OutputError, ReportWriter};
use crate::run_timestamp;

/// What one discovery run produced
#[derive(Debug)]
pub struct RunOutcome {
    pub total_entities: usize,
    pub battery_devices: usize,
    pub json_file: PathBuf,
    pub yaml_file: Option<PathBuf>,
    pub summary_file: PathBuf,
    pub notifications: DispatchReport,
}

/// Runs the whole pipeline once. `Ok(None)` means the hub returned nothing
/// and the run stopped before producing anything.
pub async fn run_discovery<C: HubClient>(config: &Config, client: &C, now: NaiveDateTime) -> Result<Option<RunOutcome>, OutputError> {
    info!("🔍 Discovering battery devices in Home Assistant...");
    info!("Connecting to: {}", config.hub.url);

    let entities = get_all_entities(client).await;
    if entities.is_empty() {
        error!("❌ Failed to fetch entities. Check your HA_TOKEN and HA_URL.");
        return Ok(None);
    }
    info!("📊 Found {} total entities", entities.len());

    let battery_entities = find_battery_entities(&entities);
    info!("🔋 Found {} battery entities", battery_entities.len());

    let categories = categorize_devices(battery_entities);
    let generated = generate_battery_config(&categories);

    println!("{}", render_discovery_report(&categories, &generated, &now));

    let writer = ReportWriter::new(&config.output.directory, &run_timestamp(&now));
    let json_file = writer.write_json_report(&categories, &generated)?;

    let snippets = generate_automations(&categories, &config.automation);
    let yaml_file = writer.write_automations(&snippets)?;

    let summary_file = writer.write_summary(
        &categories,
        &json_file,
        yaml_file.as_deref(),
        &config.hub.url,
        &config.hub.dashboard_url(),
        &now,
    )?;

    let files = ReportFiles {
        json: base_name(&json_file),
        yaml: yaml_file.as_deref().map(base_name),
    };
    let notifications = send_notifications(client, config, &categories, &files, &now).await;

    let outcome = RunOutcome {
        total_entities: entities.len(),
        battery_devices: categories.total(),
        json_file,
        yaml_file,
        summary_file,
        notifications,
    };
    print_closing_summary(&outcome);
    return Ok(Some(outcome));
}

fn print_closing_summary(outcome: &RunOutcome) {
    let sent = outcome.notifications.success();

    println!("\n✅ Discovery complete!");
    println!("\n📧 HA Notifications: {}", if sent { "✅ Sent successfully" } else { "❌ Failed to send" });
    println!("\n📁 Generated Files:");
    println!("   • JSON Report: {}", outcome.json_file.display());
    if let Some(yaml_file) = &outcome.yaml_file {
        println!("   • YAML Automations: {}", yaml_file.display());
    }
    println!("   • Summary: {}", outcome.summary_file.display());
    println!("\n📋 Next steps:");
    if sent {
        println!("1. Check your email/Telegram for the detailed report");
    }
    println!("2. Review the generated local files for configuration details");
    println!("3. Copy the battery monitoring configuration to packages/battery_monitoring.yaml");
    println!("4. Add the dashboard configuration to your Lovelace dashboards");
    println!("5. Restart Home Assistant");
    println!("6. Check the new battery monitoring dashboard");
}
