//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml` and from `MICROSAVE__*` environment variables
//! (e.g. `MICROSAVE__SERVER__PORT=8080`).
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    /// Log level for the workspace crates (`trace`..`error`).
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct Engine {
    pub nps_rate: f64,
    pub index_rate: f64,
    /// Exclusive cap on transaction amounts, in major units.
    pub max_amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub engine: Engine,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.bind", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("engine.nps_rate", engine::NPS_RATE)?
            .set_default("engine.index_rate", engine::INDEX_RATE)?
            .set_default("engine.max_amount", engine::DEFAULT_MAX_AMOUNT.to_major())?
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("MICROSAVE").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
