use bookshelf::Config;
use clap::Parser;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::parse();
    tracing::debug!(?config, "starting");

    if let Err(e) = bookshelf::run(config).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
