// ABOUTME: Plan command implementation.
// ABOUTME: Resolves every compose service and hands the records to the dry-run deployer.

use moorage::config::{Settings, load_compose_file};
use moorage::deploy::{DryRun, Planner, RegistryLogin, deploy_all};
use moorage::diagnostics::Diagnostics;
use moorage::error::Result;
use moorage::output::Output;
use moorage::resolve::FsEnvFiles;
use std::env;
use std::path::Path;

/// Resolve the compose file and show what would be deployed.
pub async fn plan(
    file: &Path,
    transport: Vec<String>,
    registry: RegistryLogin,
    config: Option<&Path>,
    output: Output,
) -> Result<()> {
    let settings = match config {
        Some(path) => Settings::load(path)?,
        None => Settings::discover(&env::current_dir()?)?,
    };

    let registry = registry.or(settings.registry.clone()).resolve()?;

    let document = load_compose_file(file)?;
    let planner = Planner::new(settings.tiers()?)
        .transport_args(settings.transport_args(transport))
        .registry(registry)
        .env_files(FsEnvFiles::for_compose_file(file));

    let mut diag = Diagnostics::default();
    let records = planner.plan(&document, &mut diag)?;

    output.progress(&format!(
        "Planning {} service(s) from {}",
        records.len(),
        file.display()
    ));

    let deployed = deploy_all(&DryRun::new(output), &records).await?;

    // Emit collected warnings
    for warning in diag.warnings() {
        output.warning(&warning.message);
    }

    output.success(&format!("{} service(s) ready to deploy", deployed.len()));
    Ok(())
}
