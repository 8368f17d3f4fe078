//! Core orchestrator for run-sql.
//!
//! Takes resolved settings through to an outcome: a dry-run plan, or an
//! applied script. Credentials are only looked up when statements will
//! actually be sent.

use std::io::Write;

use tracing::info;

use crate::cli::RunSettings;
use crate::error::Result;
use crate::rpc::RpcClient;
use crate::runner::{self, RunOutcome, StatementRunner};
use crate::secrets::{mask_secret, SecretStore};

/// Runs one invocation, writing console output to `out`.
pub async fn run<W: Write>(
    settings: &RunSettings,
    secrets: &SecretStore,
    mut out: W,
) -> Result<RunOutcome> {
    if settings.dry_run {
        let statements = runner::plan(&settings.script, settings.split, out)?;
        return Ok(RunOutcome::Planned {
            statements: statements.len(),
        });
    }

    let endpoint = settings.endpoint(|host| secrets.retrieve_api_key(host))?;
    info!("Endpoint: {:?}", endpoint);

    if settings.remember_key {
        secrets.store_api_key(endpoint.host(), endpoint.api_key())?;
        let _ = writeln!(
            out,
            "Stored API key {} for {} in the OS keyring",
            mask_secret(endpoint.api_key()),
            endpoint.host()
        );
    }

    let client = RpcClient::new(endpoint)?;
    let mut statement_runner = StatementRunner::new(&client, out);
    let summary = statement_runner
        .run(&settings.script, settings.split)
        .await?;

    Ok(RunOutcome::Applied(summary))
}
