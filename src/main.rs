use axum_media_browser::{app, config::Args, ServeRoot};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| args.log_filter().into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let root = match ServeRoot::new(&args.dir) {
        Ok(root) => root,
        Err(e) => {
            error!("Failed to resolve root directory '{}': {}. Exiting.", args.dir.display(), e);
            eprintln!("Error: Failed to resolve root directory '{}': {}", args.dir.display(), e);
            std::process::exit(1);
        }
    };

    if args.verbose {
        info!("Verbose mode enabled");
    }
    info!("Serving directory: {}", root.path().display());
    info!("Listening on: {}", args.socket_addr());

    let root_display = root.path().display().to_string();
    let router = app(root, args.verbose);

    let listener = match tokio::net::TcpListener::bind(args.socket_addr()).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to address {}: {}", args.socket_addr(), e);
            eprintln!("Error: Failed to bind to address {}: {}", args.socket_addr(), e);
            std::process::exit(1);
        }
    };

    println!("Serving directory {} on HTTP port: {}", root_display, args.port);
    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
