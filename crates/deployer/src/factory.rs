use {
    crate::{
        artifact::Artifact,
        error::DeploymentError,
        parameters::{DeploymentParameters, DeploymentResult},
        signers::Account,
    },
    alloy::{
        dyn_abi::{DynSolType, DynSolValue, Specifier},
        json_abi::JsonAbi,
        network::TransactionBuilder,
        primitives::{Address, B256, Bytes},
        providers::{DynProvider, Provider},
        rpc::types::TransactionRequest,
    },
    anyhow::{Context, Result, anyhow, ensure},
};

/// A deployable contract bound to a network.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ContractFactory: Send + Sync {
    /// Submits the creation transaction from `deployer` and resolves with
    /// the address of the new contract.
    async fn deploy(
        &self,
        deployer: &Account,
        parameters: &DeploymentParameters,
    ) -> Result<DeploymentResult, DeploymentError>;
}

/// Deploys a compiled artifact through an RPC provider.
pub struct ArtifactFactory {
    artifact: Artifact,
    provider: DynProvider,
    confirmations: u64,
}

impl ArtifactFactory {
    pub fn new(artifact: Artifact, provider: DynProvider, confirmations: u64) -> Self {
        Self {
            artifact,
            provider,
            confirmations,
        }
    }

    /// Creation bytecode followed by the ABI encoded constructor arguments.
    pub fn deployment_code(
        &self,
        parameters: &DeploymentParameters,
    ) -> Result<Bytes, DeploymentError> {
        let arguments =
            encode_constructor_arguments(&self.artifact.abi, &parameters.constructor_arguments())
                .map_err(DeploymentError::InvalidConstructorArguments)?;
        Ok([&self.artifact.bytecode[..], &arguments[..]].concat().into())
    }
}

#[async_trait::async_trait]
impl ContractFactory for ArtifactFactory {
    async fn deploy(
        &self,
        deployer: &Account,
        parameters: &DeploymentParameters,
    ) -> Result<DeploymentResult, DeploymentError> {
        let code = self.deployment_code(parameters)?;
        let tx = TransactionRequest::default()
            .with_from(deployer.address())
            .with_deploy_code(code);

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .context("could not submit creation transaction")
            .map_err(DeploymentError::DeploymentTransactionFailed)?;
        let tx_hash = *pending.tx_hash();
        tracing::debug!(
            contract = %self.artifact.contract_name,
            tx = ?tx_hash,
            "submitted creation transaction"
        );

        let receipt = pending
            .with_required_confirmations(self.confirmations)
            .get_receipt()
            .await
            .with_context(|| format!("could not fetch receipt of {tx_hash}"))
            .map_err(DeploymentError::DeploymentTransactionFailed)?;

        let contract_address =
            deployed_address(tx_hash, receipt.status(), receipt.contract_address)?;
        Ok(DeploymentResult {
            contract_address,
            transaction_hash: Some(tx_hash),
        })
    }
}

/// Coerces the textual arguments into the types the constructor declares and
/// ABI encodes them.
fn encode_constructor_arguments(abi: &JsonAbi, arguments: &[&str]) -> Result<Vec<u8>> {
    let inputs = abi
        .constructor
        .as_ref()
        .map(|constructor| constructor.inputs.as_slice())
        .unwrap_or_default();
    ensure!(
        inputs.len() == arguments.len(),
        "constructor takes {} arguments but {} were given",
        inputs.len(),
        arguments.len()
    );

    let values = inputs
        .iter()
        .zip(arguments)
        .map(|(param, argument)| {
            let ty = param
                .resolve()
                .with_context(|| format!("unsupported parameter type {}", param.ty))?;
            let value = match ty {
                // Taken verbatim, the string parser would strip quotes.
                DynSolType::String => DynSolValue::String(argument.to_string()),
                ty => ty.coerce_str(argument).with_context(|| {
                    format!(
                        "invalid value {argument:?} for parameter {} of type {}",
                        param.name, param.ty
                    )
                })?,
            };
            Ok(value)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(DynSolValue::Tuple(values).abi_encode_params())
}

fn deployed_address(
    tx_hash: B256,
    status: bool,
    contract_address: Option<Address>,
) -> Result<Address, DeploymentError> {
    if !status {
        return Err(DeploymentError::DeploymentTransactionFailed(anyhow!(
            "creation transaction {tx_hash} reverted"
        )));
    }
    contract_address.ok_or_else(|| {
        DeploymentError::DeploymentTransactionFailed(anyhow!(
            "receipt of {tx_hash} has no contract address"
        ))
    })
}
