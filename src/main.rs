use std::process::ExitCode;

use sheets_wrapper::{config::AppConfig, prettyprint::PrettyFormatter, AppError, PayloadError};
use tracing::{error, info};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const DEFAULT_LOG_FILTER: &str = "sheets_wrapper=info";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    setup_tracing();
    setup_panic_hook();

    match run().await {
        Ok(()) => {
            println!("Done");
            ExitCode::SUCCESS
        }
        Err(report) => {
            match report.downcast_ref::<PayloadError>() {
                Some(missing) if matches!(missing, PayloadError::Missing(_)) => {
                    println!("{}", missing)
                }
                _ => error!("{:?}", report),
            }
            ExitCode::from(1)
        }
    }
}

async fn run() -> error_stack::Result<(), AppError> {
    let config = AppConfig::load().map_err(|report| report.change_context(AppError::Config))?;
    info!(?config, "Configuration loaded");

    sheets_wrapper::run(&config).await
}

fn setup_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let indicatif_layer = IndicatifLayer::new();
    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(indicatif_layer.get_stderr_writer());

    Registry::default()
        .with(filter)
        .with(indicatif_layer)
        .with(stderr_layer)
        .init();
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}
