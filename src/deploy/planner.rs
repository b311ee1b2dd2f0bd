// ABOUTME: Builds deployment records for every service of a compose document.
// ABOUTME: Services are resolved independently and returned in declaration order.

use super::error::PlanError;
use super::record::DeploymentRecord;
use super::registry::Registry;
use crate::compose::{ComposeDocument, Service};
use crate::diagnostics::Diagnostics;
use crate::resolve::{
    EnvFileLoader, NoEnvFiles, ResourceTiers, check_transport_args, resolve_environment,
    resolve_ingress, resolve_resources, resolve_startup_command, resolve_transport,
};

/// Resolves compose services into deployment records.
pub struct Planner {
    tiers: ResourceTiers,
    transport_args: Vec<String>,
    registry: Option<Registry>,
    env_files: Box<dyn EnvFileLoader + Send + Sync>,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(ResourceTiers::default())
    }
}

impl Planner {
    pub fn new(tiers: ResourceTiers) -> Self {
        Self {
            tiers,
            transport_args: Vec::new(),
            registry: None,
            env_files: Box::new(NoEnvFiles),
        }
    }

    /// Set `service=transport` overrides. Earlier entries win.
    pub fn transport_args(mut self, args: Vec<String>) -> Self {
        self.transport_args = args;
        self
    }

    /// Set the registry credentials attached to every record.
    pub fn registry(mut self, registry: Option<Registry>) -> Self {
        self.registry = registry;
        self
    }

    /// Set where `env_file` entries are read from.
    pub fn env_files(mut self, loader: impl EnvFileLoader + Send + Sync + 'static) -> Self {
        self.env_files = Box::new(loader);
        self
    }

    /// Resolve every service, in document order.
    pub fn plan(
        &self,
        document: &ComposeDocument,
        diag: &mut Diagnostics,
    ) -> Result<Vec<DeploymentRecord>, PlanError> {
        let names: Vec<&str> = document.service_names().collect();
        check_transport_args(self.transport_args.as_slice(), names.iter().copied(), diag);

        document
            .services()
            .map(|service| self.resolve_service(service, diag))
            .collect()
    }

    /// Resolve one service into its deployment record.
    pub fn resolve_service(
        &self,
        service: &Service,
        diag: &mut Diagnostics,
    ) -> Result<DeploymentRecord, PlanError> {
        let image = service
            .image
            .clone()
            .ok_or_else(|| PlanError::MissingImage(service.name.clone()))?;

        tracing::debug!(service = %service.name, "resolving deployment parameters");

        Ok(DeploymentRecord {
            service_name: service.name.clone(),
            image,
            container_name: service.container_name.clone(),
            ingress: resolve_ingress(service),
            transport: resolve_transport(&service.name, self.transport_args.as_slice()),
            startup: resolve_startup_command(service),
            resources: resolve_resources(service, &self.tiers, diag),
            environment: resolve_environment(service, self.env_files.as_ref(), diag),
            registry: self.registry.clone(),
        })
    }
}
