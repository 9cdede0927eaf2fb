use breakeven::api::{Cli, Command, render_report, run_from_args, run_http_server};
use breakeven::config::{LogLevel, ServerConfig};
use clap::Parser;
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(log_level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_level.as_filter_str())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    match cli.command {
        Command::Serve(args) => {
            let config = match ServerConfig::new(args.host, args.port) {
                Ok(config) => config,
                Err(e) => {
                    error!("{e}");
                    std::process::exit(2);
                }
            };
            if let Err(e) = run_http_server(config).await {
                error!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Command::Compute(args) => match run_from_args(&args) {
            Ok(result) => print!("{}", render_report(&result)),
            Err(msg) => {
                error!("{msg}");
                std::process::exit(2);
            }
        },
    }
}
