//! CLI entry and dispatch.

use anyhow::{Context, Result};
use authgate_core::config::Config;
use authgate_core::{AuthGateway, BrowserContext, logging};
use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(name = "authgate")]
#[command(version)]
#[command(about = "Resolve login flows and drive user sessions against an identity provider")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    browser: BrowserArgs,
}

/// What a browser tab would send along implicitly.
#[derive(clap::Args, Debug, Clone)]
struct BrowserArgs {
    /// Raw Cookie header forwarded to the provider and backend
    #[arg(long, global = true, env = "AUTHGATE_COOKIE", hide_env_values = true)]
    cookie: Option<String>,

    /// Current location path of the page
    #[arg(long, global = true, default_value = "/")]
    path: String,
}

impl From<BrowserArgs> for BrowserContext {
    fn from(args: BrowserArgs) -> Self {
        BrowserContext::new(args.cookie, args.path)
    }
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Resolve a login page URL into a flow or a redirect
    Resolve {
        /// Login page URL or query string (e.g. "?flow=<id>")
        #[arg(value_name = "URL")]
        url: String,
    },
    /// Show the provider session for the given cookie
    Whoami,
    /// Look up a login flow by id
    Flow {
        /// Provider login flow id
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Mount the authenticated area and report what it renders
    Session,
    /// Log out of the backend and the provider
    Logout,
    /// Load the default facility
    Facility,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, browser } = cli;
    let ctx = BrowserContext::from(browser);

    match command {
        Commands::Resolve { url } => {
            let app = App::load()?;
            commands::resolve::run(&app.gateway, &url, &ctx).await
        }
        Commands::Whoami => {
            let app = App::load()?;
            commands::whoami::run(&app.gateway, &ctx).await
        }
        Commands::Flow { id } => {
            let app = App::load()?;
            commands::flow::run(&app.gateway, &id, &ctx).await
        }
        Commands::Session => {
            let app = App::load()?;
            commands::session::run(app.gateway, ctx).await
        }
        Commands::Logout => {
            let app = App::load()?;
            commands::logout::run(&app.gateway, &ctx).await
        }
        Commands::Facility => {
            let app = App::load()?;
            commands::facility::run(&app.gateway, &ctx).await
        }

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}

/// Everything a network command needs, built from config and environment.
struct App {
    gateway: AuthGateway,
    _log_guard: Option<logging::WorkerGuard>,
}

impl App {
    fn load() -> Result<Self> {
        let config = Config::load().context("load config")?;
        let log_guard = logging::init(&config.logging).context("init logging")?;
        let gateway = AuthGateway::from_config(&config)?;
        Ok(Self {
            gateway,
            _log_guard: log_guard,
        })
    }
}
