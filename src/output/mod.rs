use chrono::NaiveDateTime;
use log::info;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::generator::automations::automation_file;
use crate::generator::report::describe_level;
use crate::generator::GeneratedConfig;
use crate::models::CategorizedDevices;
use crate::display_time;

pub const REPORT_PREFIX: &str = "battery_discovery_report";
pub const AUTOMATION_PREFIX: &str = "battery_automations";
pub const SUMMARY_PREFIX: &str = "battery_discovery_summary";

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Unable to write {0}: {1}")]
    Io(String, std::io::Error),
    #[error("Unable to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct ReportSnapshot<'a> {
    timestamp: &'a str,
    total_devices: usize,
    categories: &'a CategorizedDevices,
    config: &'a GeneratedConfig,
}

/// Writes the artifacts of one run into a directory, all named with the same timestamp
pub struct ReportWriter {
    directory: PathBuf,
    timestamp: String,
}

pub fn file_name(prefix: &str, timestamp: &str, extension: &str) -> String {
    return format!("{prefix}_{timestamp}.{extension}");
}

pub fn base_name(path: &Path) -> String {
    return path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
}

impl ReportWriter {
    pub fn new(directory: &str, timestamp: &str) -> Self {
        return ReportWriter {
            directory: PathBuf::from(directory),
            timestamp: timestamp.to_string(),
        };
    }

    fn path(&self, prefix: &str, extension: &str) -> PathBuf {
        return self.directory.join(file_name(prefix, &self.timestamp, extension));
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), OutputError> {
        return fs::write(path, contents).map_err(|e| OutputError::Io(path.display().to_string(), e));
    }

    pub fn write_json_report(&self, categories: &CategorizedDevices, config: &GeneratedConfig) -> Result<PathBuf, OutputError> {
        let snapshot = ReportSnapshot {
            timestamp: &self.timestamp,
            total_devices: categories.total(),
            categories,
            config,
        };
        let path = self.path(REPORT_PREFIX, "json");
        self.write(&path, &serde_json::to_string_pretty(&snapshot)?)?;
        info!("💾 Detailed report saved to: {}", path.display());
        return Ok(path);
    }

    /// Nothing is written when there are no snippets
    pub fn write_automations(&self, snippets: &[String]) -> Result<Option<PathBuf>, OutputError> {
        if snippets.is_empty() {
            return Ok(None);
        }
        let path = self.path(AUTOMATION_PREFIX, "yaml");
        self.write(&path, &automation_file(snippets))?;
        info!("🤖 Device-specific automations saved to: {}", path.display());
        return Ok(Some(path));
    }

    pub fn write_summary(
        &self,
        categories: &CategorizedDevices,
        json_path: &Path,
        yaml_path: Option<&Path>,
        hub_url: &str,
        dashboard_url: &str,
        generated_at: &NaiveDateTime,
    ) -> Result<PathBuf, OutputError> {
        let path = self.path(SUMMARY_PREFIX, "txt");

        let mut lines: Vec<String> = Vec::new();
        lines.push("🔋 BATTERY DEVICE DISCOVERY SUMMARY".to_string());
        lines.push("=".repeat(50));
        lines.push(format!("Generated: {}", display_time(generated_at)));
        lines.push(format!("Home Assistant: {hub_url}"));
        lines.push(format!("Total Devices Found: {}", categories.total()));
        lines.push("".to_string());

        lines.push("📁 GENERATED FILES:".to_string());
        lines.push(format!("• JSON Report: {}", base_name(json_path)));
        if let Some(yaml_path) = yaml_path {
            lines.push(format!("• YAML Automations: {}", base_name(yaml_path)));
        }
        lines.push(format!("• This Summary: {}", base_name(&path)));
        lines.push("".to_string());

        lines.push("📱 DEVICE CATEGORIES:".to_string());
        for (category, devices) in categories.non_empty() {
            lines.push(format!("• {}: {} devices", category.title(), devices.len()));
            for device in devices {
                lines.push(format!("  - {}", describe_level(device)));
            }
            lines.push("".to_string());
        }

        lines.push("🔧 NEXT STEPS:".to_string());
        lines.push("1. Copy battery_monitoring.yaml to packages/ folder".to_string());
        lines.push("2. Add entity includes to recorder and InfluxDB configs".to_string());
        lines.push("3. Set up battery dashboard in Lovelace".to_string());
        lines.push("4. Test notifications using dashboard buttons".to_string());
        lines.push(format!("5. Access dashboard: {dashboard_url}"));

        let mut contents = lines.join("\n");
        contents.push('\n');
        self.write(&path, &contents)?;
        info!("📄 File summary saved to: {}", path.display());
        return Ok(path);
    }
}
