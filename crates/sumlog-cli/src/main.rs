use sumlog_core::logging;

mod cli;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible.
    let log_target = logging::init();

    if let Err(err) = cli::run_from_args().await {
        tracing::error!("run failed ({:?}): {:#}", log_target, err);
        eprintln!("sumlog error: {:#}", err);
        std::process::exit(1);
    }
}
