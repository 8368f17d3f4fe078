//! run-sql - apply a SQL script through a database RPC endpoint.

use std::io;
use std::process::ExitCode;

use sql_rpc_runner::app;
use sql_rpc_runner::cli::Cli;
use sql_rpc_runner::config::Config;
use sql_rpc_runner::error::Result;
use sql_rpc_runner::logging;
use sql_rpc_runner::runner::{self, RunOutcome};
use sql_rpc_runner::secrets::SecretStore;
use tracing::{error, info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse_args();
    logging::init_stderr_logging(cli.verbose);

    let result = run(&cli).await;
    match &result {
        Ok(RunOutcome::Applied(summary)) if !summary.all_succeeded() => {
            warn!("{} of {} statements failed", summary.failed(), summary.total);
        }
        Ok(_) => {}
        Err(e) => error!("{}: {}", e.category(), e),
    }

    ExitCode::from(runner::exit_status(&result))
}

async fn run(cli: &Cli) -> Result<RunOutcome> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;
    let settings = cli.resolve(&config)?;

    app::run(&settings, &SecretStore::new(), io::stdout()).await
}
