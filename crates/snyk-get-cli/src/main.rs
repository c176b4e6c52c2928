//! snyk-get - download, verify, and install the Snyk CLI

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use snyk_get_cli::Cli;
use snyk_get_cli::ui::ConsoleReporter;
use snyk_get_core::artifact::ArtifactName;
use snyk_get_core::engine::{AcquireRequest, RetryPolicy};
use snyk_get_core::platform::{HostLibcProbe, PlatformKey};
use snyk_get_core::reporter::Reporter;
use snyk_get_core::source::source_list;
use snyk_get_core::version::VersionSelector;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let reporter = ConsoleReporter::new(cli.quiet);

    // Unsupported hosts fail here, before any network traffic.
    let platform = PlatformKey::current(&HostLibcProbe)?;
    let artifact = ArtifactName::for_platform(&platform)?;
    tracing::debug!(%platform, artifact = %artifact.remote_name, "resolved host platform");

    let version = VersionSelector::parse(&cli.version);
    let sources = source_list(Some(&cli.base_url));

    let client = reqwest::Client::new();
    let installed = AcquireRequest::new(
        &client,
        &artifact,
        &version,
        &sources,
        RetryPolicy::new(cli.retry),
        &cli.dir,
        &reporter,
    )
    .execute()
    .await?;

    reporter.success(&format!(
        "Snyk CLI {version} installed to {}",
        installed.path.display()
    ));

    if !cli.no_version_check {
        run_version_check(&installed.path, &reporter).await;
    }

    Ok(())
}

/// Run the freshly installed binary with `-v` as a smoke check. A launch
/// failure is a warning, not an install failure.
async fn run_version_check(path: &Path, reporter: &ConsoleReporter) {
    reporter.info("Running 'snyk -v' to check the installed version:");

    let exe = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    match tokio::process::Command::new(&exe).arg("-v").status().await {
        Ok(status) if status.success() => {}
        Ok(status) => reporter.warning(&format!("'snyk -v' exited with {status}")),
        Err(err) => reporter.warning(&format!("could not launch {}: {err}", exe.display())),
    }
}
