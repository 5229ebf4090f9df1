//! Command-line interface
//!
//! Global flags override the `ALIBABA_*` environment variables. Results are
//! printed to stdout as JSON; progress and diagnostics go to stderr.

pub mod auth;
pub mod order;
pub mod output;
pub mod product;
pub mod request;
pub mod shipping;

use std::process::ExitCode;

use alibaba_api::{
    AlibabaClient, AlibabaConfig, AlibabaError, ConfigError, ConfigOverrides, DEFAULT_TIMEOUT_SECS,
};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Alibaba API CLI
#[derive(Parser)]
#[command(name = "alibaba-cli")]
#[command(about = "Command-line client for the Alibaba.com Open Platform API v2")]
#[command(version)]
pub struct Cli {
    /// Credentials and output options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags accepted by every command
#[derive(Args, Clone, Debug, Default)]
pub struct GlobalArgs {
    /// Application key (or set ALIBABA_APP_KEY)
    #[arg(long, global = true)]
    pub app_key: Option<String>,

    /// Application secret (or set ALIBABA_APP_SECRET)
    #[arg(long, global = true)]
    pub app_secret: Option<String>,

    /// OAuth access token (or set ALIBABA_ACCESS_TOKEN)
    #[arg(long, global = true)]
    pub access_token: Option<String>,

    /// OAuth refresh token (or set ALIBABA_REFRESH_TOKEN)
    #[arg(long, global = true)]
    pub refresh_token: Option<String>,

    /// Use the sandbox environment (or set ALIBABA_USE_SANDBOX)
    #[arg(long, global = true)]
    pub sandbox: bool,

    /// Request timeout in seconds (or set ALIBABA_TIMEOUT; default 30)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Override the REST base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Print compact JSON instead of pretty-printed JSON
    #[arg(long, global = true)]
    pub raw: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show configuration status
    Status,
    /// OAuth token management
    #[command(subcommand)]
    Auth(auth::AuthCommands),
    /// Product discovery
    #[command(subcommand)]
    Product(product::ProductCommands),
    /// Freight estimates
    #[command(subcommand)]
    Shipping(shipping::ShippingCommands),
    /// Order management
    #[command(subcommand)]
    Order(order::OrderCommands),
    /// Send a signed request to any endpoint
    Request(request::RequestArgs),
}

/// Errors reported by the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Credentials are missing or invalid.
    #[error("Not configured: {0}")]
    Config(#[from] ConfigError),

    /// The API call failed.
    #[error(transparent)]
    Api(#[from] AlibabaError),

    /// A JSON argument could not be parsed.
    #[error("Invalid JSON for --{flag}: {source}")]
    InvalidJson {
        /// The offending flag.
        flag: &'static str,
        /// The parse error.
        source: serde_json::Error,
    },

    /// A `--param` value was not `key=value`.
    #[error("Invalid parameter '{0}', expected key=value")]
    InvalidParam(String),

    /// Output could not be serialized.
    #[error("Failed to format output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error. Malformed arguments use the same
    /// code clap uses for usage errors.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidJson { .. } | Self::InvalidParam(_) => 2,
            _ => 1,
        }
    }

    /// Renders the error for stderr, including the request id when known.
    #[must_use]
    pub fn report(&self) -> String {
        match self {
            Self::Api(error) => match error.request_id() {
                Some(request_id) => format!(
                    "{} error: {error} (request id: {request_id})",
                    error.kind()
                ),
                None => format!("{} error: {error}", error.kind()),
            },
            other => other.to_string(),
        }
    }
}

impl From<CliError> for ExitCode {
    fn from(error: CliError) -> Self {
        Self::from(error.exit_code())
    }
}

/// Shared state handed to every command
#[derive(Clone, Debug)]
pub struct Context {
    overrides: ConfigOverrides,
    raw: bool,
}

impl Context {
    /// Builds the context from the global flags.
    #[must_use]
    pub fn new(global: &GlobalArgs) -> Self {
        Self {
            overrides: ConfigOverrides {
                app_key: global.app_key.clone(),
                app_secret: global.app_secret.clone(),
                access_token: global.access_token.clone(),
                refresh_token: global.refresh_token.clone(),
                use_sandbox: global.sandbox.then_some(true),
                timeout_secs: global.timeout,
                base_url: global.base_url.clone(),
            },
            raw: global.raw,
        }
    }

    /// Loads configuration from the flags and the environment.
    pub fn config(&self) -> Result<AlibabaConfig, CliError> {
        Ok(AlibabaConfig::from_env(self.overrides.clone())?)
    }

    /// Creates a client from the loaded configuration.
    pub fn client(&self) -> Result<AlibabaClient, CliError> {
        Ok(AlibabaClient::new(self.config()?)?)
    }

    /// Prints `value` to stdout as JSON.
    pub fn print<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), CliError> {
        output::echo_output(value, self.raw)
    }
}

/// Parses a JSON command-line argument.
pub fn parse_json(flag: &'static str, raw: &str) -> Result<Value, CliError> {
    serde_json::from_str(raw).map_err(|source| CliError::InvalidJson { flag, source })
}

#[derive(Serialize)]
struct StatusInfo {
    configured: bool,
    environment: String,
    has_access_token: bool,
    has_refresh_token: bool,
    timeout: u64,
}

/// Runs the parsed command line.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = Context::new(&cli.global);

    match cli.command {
        Commands::Status => status(&ctx),
        Commands::Auth(cmd) => auth::execute(&ctx, cmd).await,
        Commands::Product(cmd) => product::execute(&ctx, cmd).await,
        Commands::Shipping(cmd) => shipping::execute(&ctx, cmd).await,
        Commands::Order(cmd) => order::execute(&ctx, cmd).await,
        Commands::Request(args) => request::execute(&ctx, args).await,
    }
}

fn status(ctx: &Context) -> Result<(), CliError> {
    match ctx.config() {
        Ok(config) => {
            output::echo_success("Configuration loaded");
            ctx.print(&StatusInfo {
                configured: true,
                environment: config.environment().to_string(),
                has_access_token: config.access_token().is_some(),
                has_refresh_token: config.refresh_token().is_some(),
                timeout: config.timeout_secs(),
            })?;
            if config.access_token().is_none() {
                output::echo_warning("No access token - run 'auth token-create' first");
            }
            Ok(())
        }
        Err(error) => {
            ctx.print(&StatusInfo {
                configured: false,
                environment: if ctx.overrides.use_sandbox == Some(true) {
                    "sandbox".to_string()
                } else {
                    "production".to_string()
                },
                has_access_token: false,
                has_refresh_token: false,
                timeout: ctx.overrides.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            })?;
            Err(error)
        }
    }
}
