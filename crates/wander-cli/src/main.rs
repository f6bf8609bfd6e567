mod config;
mod current_cmd;
mod steps_cmd;
mod suggest_cmd;
mod trip_cmds;

#[cfg(test)]
mod test_util;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use wander_db::config::DbConfig;
use wander_db::pool;

use config::WanderConfig;

#[derive(Parser)]
#[command(name = "wander", about = "Plan trips and keep track of the one you're on")]
struct Cli {
    /// Database URL (overrides WANDER_DATABASE_URL env var)
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a wander config file (no database required)
    Init {
        /// PostgreSQL connection URL
        #[arg(long, default_value = DbConfig::DEFAULT_URL)]
        db_url: String,
        /// Id that owns your trips
        #[arg(long)]
        user_id: String,
        /// Command that reads a prompt on stdin and prints a plan
        #[arg(long)]
        generator: Option<String>,
        /// Arguments for the generator command
        #[arg(long = "generator-arg", allow_hyphen_values = true)]
        generator_args: Vec<String>,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Initialize the wander database (requires config file or env vars)
    DbInit,
    /// Trip management
    Trip {
        #[command(subcommand)]
        command: TripCommands,
    },
    /// Show the trip in progress today
    Current,
    /// Suggest destinations (cached until --refresh)
    Suggest {
        /// Discard the cached suggestions and generate new ones
        #[arg(long)]
        refresh: bool,
    },
    /// Show the trip wizard's steps
    Steps {
        /// Show position and neighbours of one step
        #[arg(long)]
        at: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TripCommands {
    /// Create a trip from a draft TOML file
    Create {
        /// Path to the draft TOML file
        file: String,
        /// Use this JSON file as the generated plan instead of running the generator
        #[arg(long)]
        plan: Option<String>,
    },
    /// List your trips
    List,
    /// Show one trip with its itinerary
    Show {
        /// Trip ID to show
        trip_id: String,
    },
    /// Delete a trip
    Delete {
        /// Trip ID to delete
        trip_id: String,
    },
    /// Generate a new itinerary for an existing trip
    Regenerate {
        /// Trip ID to regenerate
        trip_id: String,
        /// Use this JSON file as the generated plan instead of running the generator
        #[arg(long)]
        plan: Option<String>,
    },
    /// Print a starter draft file
    Template,
    /// Print the generation prompt for a draft file (no database required)
    Prompt {
        /// Path to the draft TOML file
        file: String,
    },
}

/// Execute the `wander init` command: write config file.
fn cmd_init(
    db_url: &str,
    user_id: &str,
    generator: Option<String>,
    generator_args: Vec<String>,
    force: bool,
) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }
    if user_id.trim().is_empty() {
        anyhow::bail!("--user-id must not be empty");
    }

    let cfg = config::ConfigFile {
        database: config::DatabaseSection {
            url: db_url.to_string(),
        },
        user: Some(config::UserSection {
            id: user_id.to_string(),
        }),
        generator: generator.map(|command| config::GeneratorSection {
            command,
            args: generator_args,
        }),
    };

    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  database.url = {db_url}");
    println!("  user.id = {user_id}");
    if let Some(generator) = &cfg.generator {
        println!("  generator.command = {}", generator.command);
    }
    println!();
    println!("Next: run `wander db-init` to create and migrate the database.");

    Ok(())
}

/// Execute the `wander db-init` command: create database and run migrations.
async fn cmd_db_init(cli_db_url: Option<&str>) -> anyhow::Result<()> {
    let resolved = WanderConfig::resolve(cli_db_url)?;

    println!("Initializing wander database...");

    pool::ensure_database_exists(&resolved.db_config).await?;
    let db_pool = pool::create_pool(&resolved.db_config).await?;
    let result = async {
        pool::run_migrations(&db_pool).await?;
        pool::trip_count(&db_pool).await
    }
    .await;
    db_pool.close().await;

    let count = result?;
    println!("Database ready. trips: {count} rows");
    println!("wander db-init complete.");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    tracing::debug!(%today, "resolved today's date");

    match cli.command {
        Commands::Init {
            db_url,
            user_id,
            generator,
            generator_args,
            force,
        } => {
            cmd_init(&db_url, &user_id, generator, generator_args, force)?;
        }
        Commands::DbInit => {
            cmd_db_init(cli.database_url.as_deref()).await?;
        }
        Commands::Trip {
            command: TripCommands::Template,
        } => {
            trip_cmds::cmd_template(today)?;
        }
        Commands::Trip {
            command: TripCommands::Prompt { file },
        } => {
            trip_cmds::cmd_prompt(&file, today)?;
        }
        Commands::Trip { command } => {
            let resolved = WanderConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = trip_cmds::run_trip_command(command, &db_pool, &resolved, today).await;
            db_pool.close().await;
            result?;
        }
        Commands::Current => {
            let resolved = WanderConfig::resolve(cli.database_url.as_deref())?;
            let user_id = resolved.user_id()?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = current_cmd::run_current(&db_pool, user_id, today).await;
            db_pool.close().await;
            result?;
        }
        Commands::Suggest { refresh } => {
            let resolved = WanderConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = suggest_cmd::run_suggest(&db_pool, &resolved, refresh).await;
            db_pool.close().await;
            result?;
        }
        Commands::Steps { at } => {
            steps_cmd::run_steps(at.as_deref())?;
        }
    }

    Ok(())
}
