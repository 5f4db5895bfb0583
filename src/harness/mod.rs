//! Deploy step descriptor and the orchestrator that runs it.
//!
//! A deploy step is registered under a name and a set of tags. The orchestrator
//! decides from the requested tags whether the step runs at all; when it does,
//! the step builds its constructor arguments, the deployer creates the contract
//! and the step's post-deploy check reads the instance back.

use crate::config::DeployConfig;
use crate::constants::{DEFAULT_RESOURCE_CONFIG, SYSTEM_CONFIG_NAME, SYSTEM_CONFIG_TAGS};
use crate::contract::ResourceConfig;
use crate::deploy::{
    execute, verify_deployment, DeployError, DeployedSystemConfig, SystemConfigDeployer,
    SystemConfigReader, VerificationReport,
};
use crate::params::{self, BuiltParams, ConfigurationError};

/// Descriptor of the SystemConfig deploy step
#[derive(Debug, Clone)]
pub struct DeployStep {
    /// Name the deployment is recorded under
    pub name: &'static str,
    /// Tags used for step selection
    pub tags: &'static [&'static str],
    config: DeployConfig,
    resource_config: ResourceConfig,
}

impl DeployStep {
    /// The SystemConfig implementation step with the default resource config.
    pub fn system_config(config: DeployConfig) -> Self {
        Self {
            name: SYSTEM_CONFIG_NAME,
            tags: SYSTEM_CONFIG_TAGS,
            config,
            resource_config: DEFAULT_RESOURCE_CONFIG,
        }
    }

    /// Replace the resource config (test networks only).
    pub fn with_resource_config(mut self, resource_config: ResourceConfig) -> Self {
        self.resource_config = resource_config;
        self
    }

    /// Deploy config this step reads from.
    pub fn config(&self) -> &DeployConfig {
        &self.config
    }

    /// True if no tags were requested or any requested tag belongs to the step.
    pub fn matches_tags(&self, requested: &[String]) -> bool {
        requested.is_empty() || requested.iter().any(|tag| self.tags.contains(&tag.as_str()))
    }

    /// Build the constructor arguments.
    pub fn constructor_args(&self) -> Result<BuiltParams, ConfigurationError> {
        params::build(&self.config, &self.resource_config)
    }

    /// Post-deploy check against `instance`.
    pub async fn post_deploy<R>(&self, instance: &R) -> Result<VerificationReport, DeployError>
    where
        R: SystemConfigReader + ?Sized,
    {
        let params = self.constructor_args()?;
        verify_deployment(instance, &params).await
    }
}

/// Result of running a step
#[derive(Debug)]
pub enum StepOutcome<I> {
    /// Step not selected by the requested tags
    Skipped {
        /// Step name
        name: &'static str,
    },
    /// Step deployed and verified
    Deployed(DeployedSystemConfig<I>),
}

/// Runs deploy steps against one deployer
#[derive(Debug)]
pub struct Orchestrator<D> {
    deployer: D,
    tags: Vec<String>,
}

impl<D: SystemConfigDeployer> Orchestrator<D> {
    /// Create an orchestrator that runs steps matching any of `tags` (all steps if empty).
    pub fn new(deployer: D, tags: Vec<String>) -> Self {
        Self { deployer, tags }
    }

    /// Build, deploy and verify `step`, unless its tags are not selected.
    ///
    /// Nothing is sent to the chain when argument building fails.
    pub async fn run(&self, step: &DeployStep) -> Result<StepOutcome<D::Instance>, DeployError> {
        if !step.matches_tags(&self.tags) {
            tracing::info!(step = step.name, requested = ?self.tags, "Skipping deploy step");
            return Ok(StepOutcome::Skipped { name: step.name });
        }

        let params = step.constructor_args()?;
        tracing::info!(step = step.name, tags = ?step.tags, "Running deploy step");
        execute(&self.deployer, &params).await.map(StepOutcome::Deployed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deploy::mock::MockDeployer;
    use crate::params::tests::sample_config;
    use alloy_primitives::{Address, U256};

    fn tags(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_step_descriptor() {
        let step = DeployStep::system_config(sample_config());
        assert_eq!(step.name, "SystemConfig");
        assert!(step.tags.contains(&"setup"));
        assert!(step.tags.contains(&"l1"));
        assert!(step.tags.contains(&"SystemConfigImpl"));
    }

    #[test]
    fn test_tag_matching() {
        let step = DeployStep::system_config(sample_config());
        assert!(step.matches_tags(&[]));
        assert!(step.matches_tags(&tags(&["l1"])));
        assert!(step.matches_tags(&tags(&["l2", "setup"])));
        assert!(!step.matches_tags(&tags(&["l2"])));
    }

    #[tokio::test]
    async fn test_run_deploys_and_verifies() {
        let orchestrator = Orchestrator::new(MockDeployer::faithful(), tags(&["setup"]));
        let step = DeployStep::system_config(sample_config());

        let outcome = orchestrator.run(&step).await.unwrap();
        let StepOutcome::Deployed(deployed) = outcome else {
            panic!("step should have run");
        };
        assert_eq!(deployed.address(), MockDeployer::ADDRESS);
    }

    #[tokio::test]
    async fn test_unselected_step_is_skipped() {
        let orchestrator = Orchestrator::new(MockDeployer::faithful(), tags(&["l2"]));
        let step = DeployStep::system_config(sample_config());

        let outcome = orchestrator.run(&step).await.unwrap();
        assert!(matches!(outcome, StepOutcome::Skipped { name: "SystemConfig" }));
        assert!(orchestrator.deployer.deployed_args().is_empty());
    }

    #[tokio::test]
    async fn test_configuration_error_sends_nothing() {
        let orchestrator = Orchestrator::new(MockDeployer::faithful(), Vec::new());
        let config =
            DeployConfig { l2_genesis_block_gas_limit: U256::from(20_999_999), ..sample_config() };
        let step = DeployStep::system_config(config);

        let err = orchestrator.run(&step).await.unwrap_err();
        assert!(matches!(
            err,
            DeployError::Configuration(ConfigurationError::GasLimitTooLow { .. })
        ));
        assert!(orchestrator.deployer.deployed_args().is_empty());
        assert!(orchestrator.deployer.reads().is_empty());
    }

    #[tokio::test]
    async fn test_post_deploy_detects_foreign_owner() {
        let orchestrator = Orchestrator::new(
            MockDeployer::tampered(|state| state.owner = Address::repeat_byte(0x42)),
            Vec::new(),
        );
        let step = DeployStep::system_config(sample_config());
        // deployment itself fails verification, the contract stays "on chain"
        assert!(orchestrator.run(&step).await.is_err());

        let instance = orchestrator.deployer.attach(MockDeployer::ADDRESS);
        let err = step.post_deploy(&instance).await.unwrap_err();
        assert!(matches!(
            err,
            DeployError::Verification(crate::deploy::VerificationError { field: "owner", .. })
        ));
    }

    #[tokio::test]
    async fn test_custom_resource_config_is_deployed() {
        let resource_config =
            ResourceConfig { maxResourceLimit: 8_000_000, ..DEFAULT_RESOURCE_CONFIG };
        let orchestrator = Orchestrator::new(MockDeployer::faithful(), Vec::new());
        let step = DeployStep::system_config(sample_config())
            .with_resource_config(resource_config.clone());

        orchestrator.run(&step).await.unwrap();
        let deployed = orchestrator.deployer.deployed_args();
        assert_eq!(deployed[0].resource_config, resource_config);
    }
}
