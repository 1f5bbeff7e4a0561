//! Serve command - run the upload service.

use colored::Colorize;

use crate::cli::ServeArgs;
use crate::server::{
    app,
    state::{AppState, ServerConfig},
};

pub fn run(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig {
        host: args.host,
        port: args.port,
        max_upload_bytes: args.max_upload_mb.saturating_mul(1024 * 1024),
        ..ServerConfig::default()
    };
    let url = format!("http://{}:{}", config.host, config.port);
    let state = AppState::new(config);

    println!();
    println!(
        "{} {}",
        "Starting reconciliation server at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Upload limit: {} MB", args.max_upload_mb);
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    if !args.no_open {
        if let Err(e) = open::that(&url) {
            eprintln!("{} Could not open browser: {}", "Warning:".yellow(), e);
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let shutdown = async {
            tokio::signal::ctrl_c().await.ok();
            println!();
            println!("{}", "Shutting down...".yellow());
        };

        app::run_server(state, shutdown).await
    })
}
