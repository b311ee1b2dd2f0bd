// ABOUTME: Integration tests for deployment planning and the Deployer trait.
// ABOUTME: Uses an in-memory deployer to check order and failure handling.

use async_trait::async_trait;
use moorage::compose::ComposeDocument;
use moorage::deploy::*;
use moorage::diagnostics::{Diagnostics, WarningKind};
use moorage::output::{Output, OutputMode};
use moorage::resolve::{Ingress, Transport};
use std::sync::Mutex;

const STACK: &str = r#"
services:
  web:
    image: nginx:latest
    ports:
      - "80:8080"
    cpus: 0.25
  worker:
    image: app/worker:1
    command: ["bundle", "exec", "sidekiq"]
    environment:
      QUEUE: default
  cache:
    image: redis:7
    expose:
      - 6379
"#;

/// Records every deployment; can be told to reject one service.
#[derive(Default)]
struct RecordingDeployer {
    deployed: Mutex<Vec<String>>,
    reject: Option<String>,
}

#[async_trait]
impl Deployer for RecordingDeployer {
    async fn deploy(&self, record: &DeploymentRecord) -> Result<DeployedApp, DeployError> {
        if self.reject.as_deref() == Some(record.service_name.as_str()) {
            return Err(DeployError::rejected(&record.service_name, "quota exceeded"));
        }
        self.deployed
            .lock()
            .unwrap()
            .push(record.service_name.clone());
        Ok(DeployedApp {
            id: format!("apps/{}", record.service_name),
            service_name: record.service_name.clone(),
        })
    }
}

fn stack() -> ComposeDocument {
    ComposeDocument::from_yaml(STACK).unwrap()
}

mod planning {
    use super::*;

    #[test]
    fn records_follow_declaration_order() {
        let mut diag = Diagnostics::default();
        let records = Planner::default().plan(&stack(), &mut diag).unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.service_name.as_str()).collect();
        assert_eq!(names, vec!["web", "worker", "cache"]);
        assert!(!diag.has_warnings());
    }

    #[test]
    fn records_carry_resolved_values() {
        let mut diag = Diagnostics::default();
        let records = Planner::default()
            .transport_args(vec!["web=http2".to_string()])
            .plan(&stack(), &mut diag)
            .unwrap();

        let web = &records[0];
        assert_eq!(web.image, "nginx:latest");
        assert_eq!(web.ingress, Ingress::External { target_port: 8080 });
        assert_eq!(web.transport, Transport::Http2);
        assert_eq!(web.resources.cpu.as_deref(), Some("0.25"));
        assert_eq!(web.resources.memory.as_deref(), Some("0.5Gi"));
        assert_eq!(web.environment, None);

        let worker = &records[1];
        assert_eq!(worker.ingress, Ingress::Disabled);
        assert_eq!(worker.transport, Transport::Auto);
        assert_eq!(
            worker.startup.command,
            Some(vec!["bundle exec sidekiq".to_string()])
        );
        assert_eq!(worker.env_vars(), Some(vec!["QUEUE=default".to_string()]));

        assert_eq!(records[2].ingress, Ingress::Internal { target_port: 6379 });
    }

    #[test]
    fn missing_image_is_fatal() {
        let doc = ComposeDocument::from_yaml("services:\n  web:\n    ports: [\"80\"]\n").unwrap();
        let mut diag = Diagnostics::default();
        let err = Planner::default().plan(&doc, &mut diag).unwrap_err();
        assert!(matches!(err, PlanError::MissingImage(ref name) if name == "web"));
        assert!(err.to_string().contains("web"));
    }

    #[test]
    fn unmatched_transport_is_reported_once() {
        let mut diag = Diagnostics::default();
        Planner::default()
            .transport_args(vec!["ghost=tcp".to_string()])
            .plan(&stack(), &mut diag)
            .unwrap();
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(diag.warnings()[0].kind, WarningKind::UnmatchedTransport);
    }

    #[test]
    fn every_record_carries_the_registry() {
        let registry = RegistryLogin {
            server: Some("foobar.azurecr.io".to_string()),
            username: Some("foobar".to_string()),
            password: Some("snafu".to_string()),
        }
        .resolve()
        .unwrap();
        let mut diag = Diagnostics::default();
        let records = Planner::default()
            .registry(registry)
            .plan(&stack(), &mut diag)
            .unwrap();

        for record in &records {
            let registry = record.registry.as_ref().unwrap();
            assert_eq!(registry.password_secret_ref, "foobarazurecrio-foobar");
            assert_eq!(registry.password(), "snafu");
        }
    }

    #[test]
    fn env_files_come_from_the_configured_loader() {
        let doc = ComposeDocument::from_yaml(
            "services:\n  web:\n    image: x\n    env_file: web.env\n",
        )
        .unwrap();
        let loader = |_: &str| -> std::io::Result<String> { Ok("A=1\n".to_string()) };
        let mut diag = Diagnostics::default();
        let records = Planner::default()
            .env_files(loader)
            .plan(&doc, &mut diag)
            .unwrap();
        assert_eq!(records[0].env_vars(), Some(vec!["A=1".to_string()]));
    }
}

mod deploying {
    use super::*;

    fn records() -> Vec<DeploymentRecord> {
        let mut diag = Diagnostics::default();
        Planner::default().plan(&stack(), &mut diag).unwrap()
    }

    #[tokio::test]
    async fn deploys_in_order() {
        let deployer = RecordingDeployer::default();
        let apps = deploy_all(&deployer, &records()).await.unwrap();

        assert_eq!(apps.len(), 3);
        assert_eq!(apps[0].id, "apps/web");
        assert_eq!(
            *deployer.deployed.lock().unwrap(),
            vec!["web", "worker", "cache"]
        );
    }

    #[tokio::test]
    async fn stops_at_first_failure() {
        let deployer = RecordingDeployer {
            reject: Some("worker".to_string()),
            ..Default::default()
        };
        let err = deploy_all(&deployer, &records()).await.unwrap_err();

        assert!(err.to_string().contains("worker"));
        assert_eq!(*deployer.deployed.lock().unwrap(), vec!["web"]);
    }

    #[tokio::test]
    async fn dry_run_returns_synthetic_ids() {
        let deployer = DryRun::new(Output::new(OutputMode::Quiet));
        let apps = deploy_all(&deployer, &records()).await.unwrap();
        let ids: Vec<&str> = apps.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["dry-run/web", "dry-run/worker", "dry-run/cache"]);
    }

    #[tokio::test]
    async fn works_through_trait_objects() {
        let deployer: Box<dyn Deployer> = Box::new(RecordingDeployer::default());
        let apps = deploy_all(deployer.as_ref(), &records()).await.unwrap();
        assert_eq!(apps.len(), 3);
    }
}
