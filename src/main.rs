use clap::Parser;
use prospector::{cli, config, errors};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: cli::Cli) -> Result<(), errors::ProspectorError> {
    if let cli::Commands::Validate(args) = &cli.command {
        let path = std::path::PathBuf::from(&args.config);
        config::parse_config(&path).await?;
        println!("Configuration is valid: {}", args.config);
        return Ok(());
    }

    let config = config::load_config(cli.config.as_deref()).await?;
    match cli.command {
        cli::Commands::Serve(args) => cli::serve::handle_serve(args, config).await,
        cli::Commands::Scan(args) => cli::scan::handle_scan(args, config).await,
        cli::Commands::Leads(args) => cli::leads::handle_leads(args, config).await,
        cli::Commands::Status(args) => cli::leads::handle_status(args, config).await,
        cli::Commands::Note(args) => cli::leads::handle_note(args, config).await,
        cli::Commands::Validate(_) => Ok(()),
    }
}
