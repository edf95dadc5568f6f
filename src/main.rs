use std::process::ExitCode;

use scanproxy::bootstrap::run;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("scanproxy=info,tower_http=info"));
    let registry = tracing_subscriber::registry().with(filter);

    if dotenvy::var("SCANPROXY_LOG_FORMAT").is_ok_and(|format| format == "json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    if let Err(e) = run().await {
        tracing::error!("scanproxy error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}
