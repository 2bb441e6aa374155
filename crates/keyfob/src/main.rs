mod cli;

use clap::Parser;
use tower_http::cors::CorsLayer;

use cli::Cli;
use keyfob_core::seed::SeedStore;
use keyfob_core::KeyfobCore;
use keyfob_crypto::keys::KeyStore;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = match cli.verbose {
        0 => cli.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_new(level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Hold the non-blocking guards for the lifetime of main so logs flush on exit.
    let _log_guards = init_logging(env_filter, cli.log_file.as_deref())?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> anyhow::Result<()> {
    ensure_data_dir();

    let keys = KeyStore::load(&cli.private_key_path(), &cli.peer_public_key_path());
    let store = SeedStore::open(cli.seed_file_path());
    let core = KeyfobCore::new(keys, store);

    startup_diagnostics(&cli, &core);

    let app = core.routes().layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cli.port)).await?;
    tracing::info!("HTTP listener on port {}", cli.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down.");
    Ok(())
}

/// Wait for Ctrl+C.
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for Ctrl+C");
}

// ── Data directory ──────────────────────────────────────────────────

/// Ensure the keyfob data directory structure exists.
///
/// Errors are logged but not fatal — key paths may point elsewhere via
/// the CLI flags.
fn ensure_data_dir() {
    let data_dir = keyfob_common::paths::data_dir();

    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        tracing::warn!(
            path = %data_dir.display(),
            error = %e,
            "Could not create data directory"
        );
        return;
    }

    for subdir in &["keys", "state", "logs"] {
        let path = data_dir.join(subdir);
        if let Err(e) = std::fs::create_dir_all(&path) {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Could not create subdirectory"
            );
        }
    }

    tracing::debug!(path = %data_dir.display(), "Data directory ready");
}

// ── Startup diagnostics ─────────────────────────────────────────────

fn startup_diagnostics(cli: &Cli, core: &KeyfobCore) {
    tracing::info!("Keyfob v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("Platform: {}", std::env::consts::OS);

    if core.has_private_key() {
        tracing::info!("Private key: {}", cli.private_key_path().display());
    } else {
        tracing::warn!(
            "Private key not loaded from {} — /decrypt-seed will fail",
            cli.private_key_path().display()
        );
    }

    tracing::info!("Seed file: {}", core.seed_path().display());
    tracing::info!("TCP {}: listening (HTTP)", cli.port);
}

// ── Logging setup ───────────────────────────────────────────────────

/// Initialize tracing with stderr + optional file output.
/// Returns guards that must be held for the lifetime of the program
/// to ensure the non-blocking writers flush on shutdown.
fn init_logging(
    env_filter: tracing_subscriber::EnvFilter,
    log_file: Option<&std::path::Path>,
) -> anyhow::Result<Vec<tracing_appender::non_blocking::WorkerGuard>> {
    use tracing_subscriber::prelude::*;

    // Non-blocking stderr avoids deadlocks when stderr is a redirected
    // pipe that nobody reads.
    let (nb_stderr, stderr_guard) = tracing_appender::non_blocking(std::io::stderr());
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(nb_stderr);

    if let Some(path) = log_file {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        let (nb_file, file_guard) = tracing_appender::non_blocking(file);
        let file_layer = tracing_subscriber::fmt::layer().with_writer(nb_file);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();

        Ok(vec![stderr_guard, file_guard])
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();

        Ok(vec![stderr_guard])
    }
}
