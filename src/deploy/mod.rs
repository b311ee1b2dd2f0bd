// ABOUTME: Deployment planning and hand-off to a deployer.
// ABOUTME: Exports the record type, the planner, and the Deployer trait.

mod deployer;
mod error;
mod planner;
mod record;
mod registry;

pub use deployer::{DeployedApp, Deployer, DryRun, deploy_all};
pub use error::{DeployError, PlanError};
pub use planner::Planner;
pub use record::DeploymentRecord;
pub use registry::{Registry, RegistryLogin, password_secret_ref};
