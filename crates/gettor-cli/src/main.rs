//! CLI entry point - the composition root.
//!
//! Parses arguments, installs logging, bootstraps the context and routes
//! each command to its handler. The database pool is closed before exit.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use gettor_cli::handlers::requests::RecordArgs;
use gettor_cli::{
    Cli, CliConfig, CliError, Commands, RequestsCommand, StatsCommand, bootstrap, handlers,
};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    // Load environment variables before clap reads GETTOR_* defaults
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
        eprintln!("Error: {err:#}");
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Dispatch to appropriate handler
    let Some(command) = cli.command.as_ref() else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = CliConfig::from_cli(&cli)?;
    let ctx = bootstrap(config).await?;

    let result = match command {
        Commands::Init => handlers::init::execute(&ctx),
        Commands::Links { platform, status } => {
            handlers::links::execute(&ctx, platform, status, cli.json).await
        }
        Commands::Requests { command } => match command {
            RequestsCommand::Record {
                id,
                command,
                service,
                platform,
                date,
                status,
            } => {
                let args = RecordArgs {
                    id,
                    command,
                    service,
                    platform: platform.as_deref(),
                    date: date.as_deref(),
                    status,
                };
                handlers::requests::record(&ctx, args).await
            }
            RequestsCommand::Update {
                id,
                hid,
                status,
                service,
                date,
            } => handlers::requests::update(&ctx, id, hid, status, service, date).await,
            RequestsCommand::List {
                status,
                command,
                service,
            } => handlers::requests::list(&ctx, status, command, service, cli.json).await,
            RequestsCommand::Count { id, service } => {
                handlers::requests::count(&ctx, id, service).await
            }
        },
        Commands::Stats { command } => match command {
            StatsCommand::Bump {
                command,
                service,
                platform,
            } => handlers::stats::bump(&ctx, command, service, platform.as_deref()).await,
            StatsCommand::Show { date } => {
                handlers::stats::show(&ctx, date.as_deref(), cli.json).await
            }
        },
    };

    ctx.shutdown().await;
    result
}
