use clap::Parser;
use item_processor::cli::{execute_process, execute_serve, Cli, Commands};
use item_processor::logging::init_logging;
use item_processor::ServerConfig;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Commands::Serve {
            host,
            port,
            seed,
            pool,
        } => execute_serve(ServerConfig::new(host, port), seed.as_deref(), &pool).await,
        Commands::Process { seed, output, pool } => {
            execute_process(&seed, output.as_deref(), &pool)
                .await
                .map(|_| ())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
