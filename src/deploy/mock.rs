//! In-memory SystemConfig used by unit tests.

use super::{DeployError, SystemConfigDeployer, SystemConfigReader};
use crate::contract::ResourceConfig;
use crate::params::ConstructorArgs;
use alloy_primitives::{address, Address, B256, U256};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Storage of the fake contract
#[derive(Debug, Clone)]
pub(crate) struct MockState {
    pub owner: Address,
    pub overhead: U256,
    pub scalar: U256,
    pub batcher_hash: B256,
    pub unsafe_block_signer: Address,
    pub resource_config: ResourceConfig,
}

impl MockState {
    fn from_args(args: &ConstructorArgs) -> Self {
        Self {
            owner: args.owner,
            overhead: args.overhead,
            scalar: args.scalar,
            batcher_hash: args.batcher_hash,
            unsafe_block_signer: args.unsafe_block_signer,
            resource_config: args.resource_config.clone(),
        }
    }
}

type ReadLog = Arc<Mutex<Vec<&'static str>>>;

#[derive(Debug)]
pub(crate) struct MockSystemConfig {
    address: Address,
    state: MockState,
    reads: ReadLog,
    fail_on: Option<&'static str>,
}

impl MockSystemConfig {
    pub fn from_args(address: Address, args: &ConstructorArgs) -> Self {
        Self::new(address, MockState::from_args(args), ReadLog::default())
    }

    fn new(address: Address, state: MockState, reads: ReadLog) -> Self {
        Self { address, state, reads, fail_on: None }
    }

    /// Make the given getter return an RPC error.
    pub fn failing_on(mut self, method: &'static str) -> Self {
        self.fail_on = Some(method);
        self
    }

    /// Getters called so far, in call order.
    pub fn reads(&self) -> Vec<&'static str> {
        self.reads.lock().unwrap().clone()
    }

    fn read(&self, method: &'static str) -> Result<(), DeployError> {
        self.reads.lock().unwrap().push(method);
        if self.fail_on == Some(method) {
            let source = alloy_contract::Error::UnknownFunction(method.to_string());
            return Err(DeployError::Read { method, source });
        }
        Ok(())
    }
}

#[async_trait]
impl SystemConfigReader for MockSystemConfig {
    fn address(&self) -> Address {
        self.address
    }

    async fn owner(&self) -> Result<Address, DeployError> {
        self.read("owner")?;
        Ok(self.state.owner)
    }

    async fn overhead(&self) -> Result<U256, DeployError> {
        self.read("overhead")?;
        Ok(self.state.overhead)
    }

    async fn scalar(&self) -> Result<U256, DeployError> {
        self.read("scalar")?;
        Ok(self.state.scalar)
    }

    async fn batcher_hash(&self) -> Result<B256, DeployError> {
        self.read("batcherHash")?;
        Ok(self.state.batcher_hash)
    }

    async fn unsafe_block_signer(&self) -> Result<Address, DeployError> {
        self.read("unsafeBlockSigner")?;
        Ok(self.state.unsafe_block_signer)
    }

    async fn resource_config(&self) -> Result<ResourceConfig, DeployError> {
        self.read("resourceConfig")?;
        Ok(self.state.resource_config.clone())
    }
}

type Tamper = Box<dyn Fn(&mut MockState) + Send + Sync>;

/// Fake deployer: "mines" the creation instantly and stores the args as state
pub(crate) struct MockDeployer {
    tamper: Option<Tamper>,
    revert: bool,
    deployed: Mutex<Vec<ConstructorArgs>>,
    state: Mutex<Option<MockState>>,
    reads: ReadLog,
}

impl MockDeployer {
    pub const ADDRESS: Address = address!("4200000000000000000000000000000000000A11");

    fn with(tamper: Option<Tamper>, revert: bool) -> Self {
        Self {
            tamper,
            revert,
            deployed: Mutex::new(Vec::new()),
            state: Mutex::new(None),
            reads: ReadLog::default(),
        }
    }

    /// Contract stores exactly what it was given.
    pub fn faithful() -> Self {
        Self::with(None, false)
    }

    /// Contract stores the args, then `tamper` corrupts them.
    pub fn tampered(tamper: impl Fn(&mut MockState) + Send + Sync + 'static) -> Self {
        Self::with(Some(Box::new(tamper)), false)
    }

    /// Creation transaction reverts.
    pub fn failing() -> Self {
        Self::with(None, true)
    }

    pub fn deployed_args(&self) -> Vec<ConstructorArgs> {
        self.deployed.lock().unwrap().clone()
    }

    pub fn reads(&self) -> Vec<&'static str> {
        self.reads.lock().unwrap().clone()
    }
}

#[async_trait]
impl SystemConfigDeployer for MockDeployer {
    type Instance = MockSystemConfig;

    async fn deploy(&self, args: &ConstructorArgs) -> Result<MockSystemConfig, DeployError> {
        if self.revert {
            return Err(DeployError::Reverted(B256::repeat_byte(0xde)));
        }
        self.deployed.lock().unwrap().push(args.clone());

        let mut state = MockState::from_args(args);
        if let Some(tamper) = &self.tamper {
            tamper(&mut state);
        }
        *self.state.lock().unwrap() = Some(state);

        Ok(self.attach(Self::ADDRESS))
    }

    fn attach(&self, address: Address) -> MockSystemConfig {
        let state = self
            .state
            .lock()
            .unwrap()
            .clone()
            .expect("attach called before anything was deployed");
        MockSystemConfig::new(address, state, self.reads.clone())
    }
}
