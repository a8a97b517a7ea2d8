//! Hospital Hub CLI
//!
//! Command-line front end for the hospital backend:
//! - Store or clear the session token
//! - Issue authenticated requests against any endpoint
//! - Show the bed statistics dashboard
//! - Generate a default config file

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use reqwest::header::{HeaderName, HeaderValue};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use hospital_hub::config::{generate_default_config, ConfigLoad};
use hospital_hub::gateway::{endpoint_with_query, method_from_str};
use hospital_hub::session::FileSessionStore;
use hospital_hub::{
    fetch_bed_stats, BedStatsPanel, Config, Gateway, GatewayError, LoginButton, RequestOptions,
    SessionManager, UserIdentity,
};

#[derive(Parser)]
#[command(name = "hospital-hub")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Authenticated client for the hospital management backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL (overrides config and VITE_BACKEND_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store a session token
    Login {
        /// Bearer token issued by the backend
        #[arg(short, long, required_unless_present = "google")]
        token: Option<String>,
        /// User email
        #[arg(long)]
        email: Option<String>,
        /// User display name
        #[arg(long)]
        name: Option<String>,
        /// User role
        #[arg(long)]
        role: Option<String>,
        /// User id (defaults to the email)
        #[arg(long)]
        user_id: Option<String>,
        /// Print the Google sign-in link instead
        #[arg(long, conflicts_with = "token")]
        google: bool,
    },

    /// Clear the stored session
    Logout,

    /// Show the current session
    Whoami,

    /// GET an endpoint
    Get(RequestArgs),

    /// POST to an endpoint
    Post(RequestArgs),

    /// PUT to an endpoint
    Put(RequestArgs),

    /// DELETE an endpoint
    Delete(RequestArgs),

    /// Show bed statistics
    Stats {
        /// Keep the dashboard open; press Enter to refresh, q to quit
        #[arg(short, long)]
        interactive: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
pub struct RequestArgs {
    /// Endpoint path, e.g. /api/beds
    pub endpoint: String,
    /// JSON request body
    #[arg(short, long)]
    pub data: Option<String>,
    /// Extra header in name:value format
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,
    /// Query parameter in key=value format
    #[arg(short, long = "query")]
    pub query: Vec<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match load_config(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    hospital_hub::logging::init_logging(&loaded.config.logging);
    loaded.report();

    let mut config = loaded.config;
    if let Some(url) = &cli.base_url {
        config.gateway.base_url = url.clone();
    }

    if let Err(e) = run(cli, config).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<ConfigLoad> {
    match &cli.config {
        Some(path) => Ok(Config::load_reported(path)?),
        None => Ok(Config::discover()),
    }
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let store = FileSessionStore::new(&config.session.file);
    let session = Arc::new(SessionManager::new(Arc::new(store))?);
    let gateway = Gateway::new(config.gateway.clone(), session.clone())?;

    let outcome = dispatch(cli, &gateway, &session).await;

    if let Err(e) = &outcome {
        if let Some(GatewayError::SessionExpired) = e.downcast_ref::<GatewayError>() {
            eprintln!(
                "Redirected to {}. Run `hospital-hub login` again.",
                config.gateway.login_path
            );
        }
    }

    outcome
}

async fn dispatch(cli: Cli, gateway: &Gateway, session: &SessionManager) -> anyhow::Result<()> {
    match cli.command {
        Commands::Login {
            token,
            email,
            name,
            role,
            user_id,
            google,
        } => {
            if google {
                println!("{}", LoginButton::for_gateway(gateway));
                return Ok(());
            }

            let token = token.ok_or_else(|| anyhow!("--token is required"))?;
            let user = email.map(|email| {
                let id = user_id.unwrap_or_else(|| email.clone());
                let mut user = UserIdentity::new(id, email);
                if let Some(name) = name {
                    user = user.name(name);
                }
                if let Some(role) = role {
                    user = user.role(role);
                }
                user
            });

            session.login(token, user)?;
            println!("Logged in");
        }

        Commands::Logout => {
            session.clear()?;
            println!("Logged out");
        }

        Commands::Whoami => {
            let current = session.snapshot();
            if !current.is_authenticated() {
                println!("Not logged in");
                return Ok(());
            }

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&current.user)?),
                _ => match &current.user {
                    Some(user) => {
                        println!("{} <{}>", user.display_name(), user.email);
                        if let Some(role) = &user.role {
                            println!("Role: {}", role);
                        }
                    }
                    None => println!("Logged in (no user details)"),
                },
            }
        }

        Commands::Get(args) => send(gateway, "GET", args, &cli.format).await?,
        Commands::Post(args) => send(gateway, "POST", args, &cli.format).await?,
        Commands::Put(args) => send(gateway, "PUT", args, &cli.format).await?,
        Commands::Delete(args) => send(gateway, "DELETE", args, &cli.format).await?,

        Commands::Stats { interactive } => {
            let stats = fetch_bed_stats(gateway).await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }

            if !interactive {
                println!("{}", BedStatsPanel::read_only(stats));
                return Ok(());
            }

            let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
            let mut panel = BedStatsPanel::new(stats, move || {
                let _ = tx.send(());
            });
            println!("{}", panel);
            println!("Press Enter to refresh, q to quit");

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                if line.trim().eq_ignore_ascii_case("q") {
                    break;
                }

                panel.refresh();
                while rx.try_recv().is_ok() {
                    panel.set_stats(fetch_bed_stats(gateway).await?);
                }
                println!("{}", panel);
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

async fn send(gateway: &Gateway, method: &str, args: RequestArgs, format: &str) -> anyhow::Result<()> {
    let method = method_from_str(method).ok_or_else(|| anyhow!("Unsupported method {}", method))?;
    let mut options = RequestOptions::new(method);

    if let Some(data) = &args.data {
        let body: Value = serde_json::from_str(data).context("--data is not valid JSON")?;
        options = options.body(body);
    }

    for header in &args.headers {
        let (name, value) = header
            .split_once(':')
            .ok_or_else(|| anyhow!("Invalid header {:?}, expected name:value", header))?;
        options = options.header(
            HeaderName::from_bytes(name.trim().as_bytes())?,
            HeaderValue::from_str(value.trim())?,
        );
    }

    let mut params = Vec::new();
    for pair in &args.query {
        match pair.split_once('=') {
            Some(kv) => params.push(kv),
            None => bail!("Invalid query parameter {:?}, expected key=value", pair),
        }
    }

    let endpoint = endpoint_with_query(&args.endpoint, &params);
    let response = gateway.request(&endpoint, options).await?;

    match format {
        "json" => println!("{}", serde_json::to_string(&response)?),
        _ => println!("{}", serde_json::to_string_pretty(&response)?),
    }

    Ok(())
}
