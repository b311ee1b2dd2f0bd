// ABOUTME: Pure resolution functions from compose services to deployment values.
// ABOUTME: Warnings go to a caller-supplied Diagnostics; services are never mutated.

mod environment;
mod ingress;
mod resources;
mod startup;
mod transport;

pub use environment::{EnvFileLoader, FsEnvFiles, NoEnvFiles, resolve_environment};
pub use ingress::{Ingress, resolve_ingress};
pub use resources::{
    ResourceRequest, ResourceTier, ResourceTiers, TierError, requested_cpu, requested_memory,
    resolve_resources,
};
pub use startup::{StartupCommand, resolve_startup_command};
pub use transport::{Transport, check_transport_args, resolve_transport};
