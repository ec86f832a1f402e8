use mimalloc::MiMalloc;
use std::process::ExitCode;
use supabase_probe::{Config, ConnectivityProbe};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    info!(
        supabase_url = %cfg.supabase_url.as_deref().unwrap_or("<none>"),
        table = %cfg.table(),
        loglevel = %cfg.loglevel()
    );

    let probe = match ConnectivityProbe::from_config(&cfg) {
        Ok(probe) => probe,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = std::io::stdout();
    match probe.run(&mut stdout).await {
        Ok(outcome) => {
            info!(reachable = outcome.is_reachable(), "probe finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "probe aborted");
            ExitCode::FAILURE
        }
    }
}
