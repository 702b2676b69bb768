use clap::Parser;
use staffdesk_core::domain::common::{BackendConfig, StaffdeskConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "staffdesk-api", version, about = "Staffdesk filter and listing API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub backend: BackendArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    /// Prefix prepended to every route, e.g. `/api`.
    #[arg(long = "server-root-path", env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(long = "server-host", env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "PORT", default_value_t = 3333)]
    pub port: u16,

    #[arg(
        long = "server-allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct BackendArgs {
    #[arg(long = "backend-url", env = "BACKEND_URL", default_value = "http://localhost:3000")]
    pub url: String,

    #[arg(long = "backend-timeout-secs", env = "BACKEND_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for StaffdeskConfig {
    fn from(args: Args) -> Self {
        Self {
            backend: BackendConfig {
                base_url: args.backend.url,
                timeout_secs: args.backend.timeout_secs,
            },
        }
    }
}
