//! `clover`: drive the Clover client engine from a terminal.
//!
//! Each subcommand emits the same requests a UI would and prints the
//! resulting state as JSON.

mod commands;

use clap::{Parser, Subcommand};
use clover_bff::ClientConfig;

/// Clover CLI tool.
#[derive(Parser, Debug)]
#[command(name = "clover", about = "Clover social client")]
struct Cli {
    /// Path to client config file (default: ~/.clover/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Login and store the session.
    Login {
        #[arg(long)]
        email: Option<String>,
        /// Password. Prompted for when omitted.
        #[arg(long)]
        password: Option<String>,
    },

    /// Logout: revoke the token and clear the session.
    Logout,

    /// Search users (or groups with --groups).
    Search {
        term: String,
        #[arg(long)]
        groups: bool,
    },

    /// Toggle your like on a feed.
    Like { feed_id: String },

    /// Comment on a feed.
    Comment { feed_id: String, content: String },

    /// Print a feed's share link.
    Share { feed_id: String },

    /// Show or change client settings.
    Config {
        #[arg(long)]
        api_url: Option<String>,
        #[arg(long)]
        search_debounce_ms: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(std::path::PathBuf::from)
        .unwrap_or_else(ClientConfig::default_path);
    let config = ClientConfig::load(&config_path)?;

    match cli.command {
        Commands::Login { email, password } => {
            let email = match email {
                Some(email) => email,
                None => {
                    eprint!("Email: ");
                    let mut s = String::new();
                    std::io::stdin().read_line(&mut s)?;
                    s.trim().to_string()
                }
            };
            let password = match password {
                Some(p) => p,
                None => rpassword::prompt_password("Password: ")?,
            };
            if email.is_empty() || password.is_empty() {
                anyhow::bail!("Email and password are required.");
            }
            let engine = commands::Engine::new(&config);
            commands::auth::login(&engine, &email, &password).await?;
        }

        Commands::Logout => {
            let engine = commands::Engine::new(&config);
            commands::auth::logout(&engine).await?;
        }

        Commands::Search { term, groups } => {
            let engine = commands::Engine::new(&config);
            commands::search::search(&engine, &term, groups).await?;
        }

        Commands::Like { feed_id } => {
            let engine = commands::Engine::new(&config);
            commands::feed::like(&engine, &feed_id).await?;
        }

        Commands::Comment { feed_id, content } => {
            let engine = commands::Engine::new(&config);
            commands::feed::comment(&engine, &feed_id, &content).await?;
        }

        Commands::Share { feed_id } => {
            let engine = commands::Engine::new(&config);
            commands::feed::share(&engine, &feed_id).await?;
        }

        Commands::Config {
            api_url,
            search_debounce_ms,
        } => {
            let mut config = config;
            let changed = api_url.is_some() || search_debounce_ms.is_some();
            if let Some(url) = api_url {
                config.api_url = url;
            }
            if let Some(ms) = search_debounce_ms {
                config.search_debounce_ms = ms;
            }
            if changed {
                config.save(&config_path)?;
                eprintln!("Saved {}.", config_path.display());
            }
            commands::print_json(&config)?;
        }
    }

    Ok(())
}
