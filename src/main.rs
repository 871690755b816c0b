use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

use dirmap::config::Config;
use dirmap::robots::generate_robots_txt;
use dirmap::sitemap::generate_sitemap;
use dirmap::storage::{Database, DatabaseError};
use dirmap::util::atomic_write;

#[derive(Parser, Debug)]
#[command(
    name = "dirmap",
    about = "Generate sitemap.xml and robots.txt for a directory website"
)]
struct Args {
    /// Config file (TOML). A missing file means defaults.
    #[arg(long, value_name = "FILE", default_value = "dirmap.toml")]
    config: PathBuf,

    /// SQLite database, overrides `database_path` from the config
    #[arg(long, value_name = "FILE")]
    database: Option<PathBuf>,

    /// Base URL, overrides `base_url` from the config
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render sitemap.xml
    Sitemap {
        /// Write to this file instead of stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Render robots.txt
    Robots {
        /// Write to this file instead of stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            atomic_write(path, content.as_bytes())?;
            eprintln!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .context("Failed to write to stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays a clean document
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = Config::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;
    if let Some(database) = args.database {
        config.database_path = database;
    }
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }

    let routes = config
        .route_table()
        .context("Failed to build route table")?;

    match args.command {
        Command::Robots { output } => {
            let robots = generate_robots_txt(&routes).context("Failed to generate robots.txt")?;
            emit(&robots, output.as_deref())?;
        }
        Command::Sitemap { output } => {
            let db_path = config
                .database_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in database path"))?;
            let db = match Database::open(db_path).await {
                Ok(db) => db,
                Err(DatabaseError::InstanceLocked) => {
                    eprintln!(
                        "Error: The database at {} is locked. Try again shortly.",
                        db_path
                    );
                    std::process::exit(1);
                }
                Err(e) => return Err(anyhow::anyhow!("Failed to open database: {}", e)),
            };

            let sitemap = generate_sitemap(&db, &routes)
                .await
                .context("Failed to generate sitemap")?;
            emit(&sitemap, output.as_deref())?;
        }
    }

    Ok(())
}
