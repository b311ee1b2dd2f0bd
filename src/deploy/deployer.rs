// ABOUTME: Deployer trait for handing records to a hosting platform.
// ABOUTME: Includes the dry-run deployer that only reports what would be created.

use super::error::DeployError;
use super::record::DeploymentRecord;
use crate::output::Output;
use async_trait::async_trait;
use serde::Serialize;

/// Handle for a created app. Only the id is guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployedApp {
    pub id: String,
    pub service_name: String,
}

/// Creates one app per deployment record.
#[async_trait]
pub trait Deployer: Send + Sync {
    async fn deploy(&self, record: &DeploymentRecord) -> Result<DeployedApp, DeployError>;
}

/// Hand records to the deployer one at a time, in order. Stops at the first failure.
pub async fn deploy_all<D: Deployer + ?Sized>(
    deployer: &D,
    records: &[DeploymentRecord],
) -> Result<Vec<DeployedApp>, DeployError> {
    let mut deployed = Vec::with_capacity(records.len());
    for record in records {
        tracing::info!(service = %record.service_name, image = %record.image, "deploying service");
        deployed.push(deployer.deploy(record).await?);
    }
    Ok(deployed)
}

/// Reports each record instead of creating anything.
pub struct DryRun {
    output: Output,
}

impl DryRun {
    pub fn new(output: Output) -> Self {
        Self { output }
    }
}

#[async_trait]
impl Deployer for DryRun {
    async fn deploy(&self, record: &DeploymentRecord) -> Result<DeployedApp, DeployError> {
        self.output.record(record);
        Ok(DeployedApp {
            id: format!("dry-run/{}", record.service_name),
            service_name: record.service_name.clone(),
        })
    }
}
