use clap::Args;

use crate::config::{config, AppConfig, StoreBackend};
use crate::server;

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long, env = "CATALOG_HOST", help = "Address to bind")]
    pub host: Option<String>,

    #[arg(long, env = "CATALOG_PORT", help = "Port to listen on")]
    pub port: Option<u16>,

    #[arg(long, help = "Keep records in memory instead of Postgres")]
    pub memory: bool,
}

impl ServeArgs {
    /// Loaded configuration with command-line overrides applied
    pub fn apply(&self, base: &AppConfig) -> AppConfig {
        let mut config = base.clone();
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.memory {
            config.server.store = StoreBackend::Memory;
        }
        config
    }
}

pub async fn handle(args: ServeArgs) -> anyhow::Result<()> {
    let config = args.apply(config());
    tracing::info!(
        "Starting library catalog in {:?} mode ({:?} store)",
        config.environment,
        config.server.store
    );
    server::run(&config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_loaded_config() {
        let base = AppConfig::development();
        let args = ServeArgs {
            host: Some("0.0.0.0".into()),
            port: Some(8081),
            memory: true,
        };

        let config = args.apply(&base);
        assert_eq!(config.bind_addr(), "0.0.0.0:8081");
        assert_eq!(config.server.store, StoreBackend::Memory);
    }

    #[test]
    fn absent_flags_keep_loaded_config() {
        let base = AppConfig::production();
        let args = ServeArgs {
            host: None,
            port: None,
            memory: false,
        };

        let config = args.apply(&base);
        assert_eq!(config.server.port, base.server.port);
        assert_eq!(config.server.store, base.server.store);
    }
}
