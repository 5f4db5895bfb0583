use super::{DeployError, SystemConfigDeployer, SystemConfigReader};
use crate::contract::{ISystemConfig, ResourceConfig};
use crate::params::ConstructorArgs;
use alloy_network::{EthereumWallet, ReceiptResponse, TransactionBuilder};
use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_types_eth::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;

fn read_error(method: &'static str, err: alloy_contract::Error) -> DeployError {
    DeployError::Read { method, source: err }
}

/// Connect to an L1 RPC endpoint without a wallet (read-only).
pub async fn connect_read_only(rpc_url: &str) -> Result<DynProvider, DeployError> {
    Ok(ProviderBuilder::new().connect(rpc_url).await?.erased())
}

/// Connect to an L1 RPC endpoint that signs with `signer`.
pub async fn connect_with_signer(
    rpc_url: &str,
    signer: PrivateKeySigner,
) -> Result<DynProvider, DeployError> {
    let wallet = EthereumWallet::from(signer);
    Ok(ProviderBuilder::new().wallet(wallet).connect(rpc_url).await?.erased())
}

/// Deploys SystemConfig through a JSON-RPC provider.
///
/// The creation bytecode comes from a compiled artifact; constructor arguments
/// are ABI-encoded and appended to it.
#[derive(Clone)]
pub struct ProviderDeployer {
    provider: DynProvider,
    creation_code: Bytes,
}

impl ProviderDeployer {
    /// Create a deployer for the given provider and creation bytecode.
    pub fn new(provider: DynProvider, creation_code: Bytes) -> Self {
        Self { provider, creation_code }
    }

    /// Full creation calldata: bytecode followed by encoded constructor args.
    pub fn deploy_code(&self, args: &ConstructorArgs) -> Bytes {
        let encoded = args.abi_encode();
        let mut code = Vec::with_capacity(self.creation_code.len() + encoded.len());
        code.extend_from_slice(&self.creation_code);
        code.extend_from_slice(&encoded);
        code.into()
    }
}

#[async_trait]
impl SystemConfigDeployer for ProviderDeployer {
    type Instance = ProviderSystemConfig;

    async fn deploy(&self, args: &ConstructorArgs) -> Result<ProviderSystemConfig, DeployError> {
        let tx = TransactionRequest::default().with_deploy_code(self.deploy_code(args));

        let pending = self.provider.send_transaction(tx).await?;
        let tx_hash = *pending.tx_hash();
        tracing::info!(%tx_hash, "Submitted SystemConfig creation transaction");

        let receipt = pending.get_receipt().await?;
        if !receipt.status() {
            return Err(DeployError::Reverted(tx_hash));
        }
        let address =
            receipt.contract_address().ok_or(DeployError::MissingContractAddress(tx_hash))?;
        tracing::info!(
            %tx_hash,
            %address,
            block = ?receipt.block_number(),
            gas_used = receipt.gas_used(),
            "SystemConfig creation mined"
        );

        Ok(self.attach(address))
    }

    fn attach(&self, address: Address) -> ProviderSystemConfig {
        ProviderSystemConfig::new(address, self.provider.clone())
    }
}

/// Deployed SystemConfig read through `eth_call`.
#[derive(Clone)]
pub struct ProviderSystemConfig {
    contract: ISystemConfig::ISystemConfigInstance<DynProvider>,
}

impl ProviderSystemConfig {
    /// Bind to the contract at `address`.
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self { contract: ISystemConfig::new(address, provider) }
    }
}

#[async_trait]
impl SystemConfigReader for ProviderSystemConfig {
    fn address(&self) -> Address {
        *self.contract.address()
    }

    async fn owner(&self) -> Result<Address, DeployError> {
        self.contract.owner().call().await.map_err(|e| read_error("owner", e))
    }

    async fn overhead(&self) -> Result<U256, DeployError> {
        self.contract.overhead().call().await.map_err(|e| read_error("overhead", e))
    }

    async fn scalar(&self) -> Result<U256, DeployError> {
        self.contract.scalar().call().await.map_err(|e| read_error("scalar", e))
    }

    async fn batcher_hash(&self) -> Result<B256, DeployError> {
        self.contract.batcherHash().call().await.map_err(|e| read_error("batcherHash", e))
    }

    async fn unsafe_block_signer(&self) -> Result<Address, DeployError> {
        self.contract
            .unsafeBlockSigner()
            .call()
            .await
            .map_err(|e| read_error("unsafeBlockSigner", e))
    }

    async fn resource_config(&self) -> Result<ResourceConfig, DeployError> {
        self.contract.resourceConfig().call().await.map_err(|e| read_error("resourceConfig", e))
    }
}
