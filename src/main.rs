use battery_discovery::{run_discovery, Config, HaHttpClient};
use chrono::Local;
use log::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    let default_filter = std::env::var("BD_LOG_LEVEL").unwrap_or("info".to_string());
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(default_filter));

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {e}");
            return;
        }
    };

    let client = match HaHttpClient::new(&config.hub) {
        Ok(c) => c,
        Err(e) => {
            error!("Unable to create Home Assistant client: {e}");
            return;
        }
    };

    match run_discovery(&config, &client, Local::now().naive_local()).await {
        Ok(Some(outcome)) => info!("Run finished with {} battery devices", outcome.battery_devices),
        Ok(None) => info!("Nothing discovered"),
        Err(e) => error!("Writing results failed: {e}"),
    }
}
