use std::path::PathBuf;

use clap::Parser;
use common::config::ConfigManager;
use common::{log, logger};

use tictactoe_server::cleanup_task::CleanupTask;
use tictactoe_server::game_service::GameService;
use tictactoe_server::server_config::ServerConfig;
use tictactoe_server::session_store::InMemorySessionStore;
use tictactoe_server::web_server::run_web_server;

#[derive(Parser)]
#[command(name = "tictactoe_server")]
#[command(about = "Tic-tac-toe REST API with a minimax opponent")]
struct Args {
    /// YAML config file; defaults apply when it does not exist
    #[arg(long, default_value = "server_config.yaml")]
    config: PathBuf,

    /// Overrides `bind_address` from the config file
    #[arg(long)]
    bind: Option<String>,

    /// Writes the effective config to `--config` and exits
    #[arg(long)]
    init_config: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager: ConfigManager<_, ServerConfig> = ConfigManager::from_yaml_file(&args.config);
    let mut config = config_manager.get_config()?;

    if args.init_config {
        config_manager.set_config(&config)?;
        log!("Config written to {}", args.config.display());
        return Ok(());
    }

    config.apply_env_overrides();
    if let Some(bind) = args.bind {
        config.bind_address = bind;
    }
    log!(
        "Config loaded: bind {}, session ttl {}s, cleanup every {}s, max {} sessions",
        config.bind_address,
        config.session_ttl_secs,
        config.cleanup_interval_secs,
        config.max_sessions
    );
    log!("Allowed origins: {}", config.allowed_origins.join(", "));

    let store = InMemorySessionStore::new(config.session_ttl(), config.max_sessions);
    let game_service = GameService::new(store.clone());

    let cleanup_task = CleanupTask::new(store, config.cleanup_interval());
    tokio::spawn(async move {
        cleanup_task.run().await;
    });

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        log!("Shutdown signal received");
    };

    run_web_server(game_service, &config, shutdown_signal).await?;

    log!("Server shut down gracefully");

    Ok(())
}
