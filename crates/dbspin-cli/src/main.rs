use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "dbspin",
    about = "dbspin - spin up a throwaway database container and prove it works",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pull the image, (re)create the container, wait for readiness, and
    /// run the demonstration schema.
    ///
    /// By default any pre-existing container of the engine's fixed name is
    /// removed first, matching a clean run. With --reuse, a container that
    /// is already running is kept and only probed.
    Up {
        /// Engine to provision (mariadb, postgres)
        #[arg(short, long)]
        engine: String,
        /// Override the published host port
        #[arg(short, long)]
        port: Option<u16>,
        /// Reuse a running container instead of recreating it
        #[arg(long)]
        reuse: bool,
        /// Readiness attempt budget
        #[arg(long)]
        attempts: Option<u32>,
        /// Fixed delay between readiness attempts (e.g. "2s", "500ms")
        #[arg(long)]
        delay: Option<String>,
        /// Path to dbspin.toml (default: ./dbspin.toml if present)
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Run only the readiness wait against an already-running service.
    Probe {
        /// Engine to probe (mariadb, postgres)
        #[arg(short, long)]
        engine: String,
        /// Override the published host port
        #[arg(short, long)]
        port: Option<u16>,
        /// Readiness attempt budget
        #[arg(long)]
        attempts: Option<u32>,
        /// Fixed delay between readiness attempts (e.g. "2s", "500ms")
        #[arg(long)]
        delay: Option<String>,
        /// Path to dbspin.toml (default: ./dbspin.toml if present)
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Stop and remove the engine's container.
    Down {
        /// Engine to tear down (mariadb, postgres)
        #[arg(short, long)]
        engine: String,
        /// Path to dbspin.toml (default: ./dbspin.toml if present)
        #[arg(short, long)]
        config: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dbspin=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Up {
            engine,
            port,
            reuse,
            attempts,
            delay,
            config,
        } => {
            commands::up::up(
                &engine,
                port,
                reuse,
                attempts,
                delay.as_deref(),
                config.as_deref(),
            )
            .await
        }
        Commands::Probe {
            engine,
            port,
            attempts,
            delay,
            config,
        } => {
            commands::probe::probe(
                &engine,
                port,
                attempts,
                delay.as_deref(),
                config.as_deref(),
            )
            .await
        }
        Commands::Down { engine, config } => commands::down::down(&engine, config.as_deref()),
    }
}
