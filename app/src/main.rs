mod config;
mod error;
mod logging;
mod mock;
mod rest;
mod sensor;

use config::Config;
use error::StartupError;
use sensor::{ConcurrentObserver, ObserverOptions};
use std::future::Future;
use tracing::info;

#[tokio::main]
pub async fn main() -> Result<(), StartupError> {
    dotenv::dotenv().ok();
    let config = Config::from_env()?;
    logging::init(config.trace_stdout())?;

    let observer = ConcurrentObserver::new(ObserverOptions {
        seed: config.mock_seed(),
        timezone: config.timezone(),
    });
    let shutdown = register_sigint_handler()?;

    let served = rest::dispatch_server(observer, &config, shutdown).await;
    logging::shutdown();
    Ok(served?)
}

/// Resolves once the process receives Ctrl-C
fn register_sigint_handler() -> Result<impl Future<Output = ()>, ctrlc::Error> {
    let (sender, mut receiver) = tokio::sync::watch::channel(false);
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        let _ = sender.send(true);
    })?;

    Ok(async move {
        let _ = receiver.changed().await;
    })
}
