use {
    crate::{
        artifact::{ArtifactResolver, contract_label},
        error::DeploymentError,
        parameters::{DeploymentParameters, DeploymentResult},
        signers::SignerProvider,
    },
    std::{io::Write, sync::Arc},
};

/// Deploys one contract with the first available signer.
///
/// Every call submits a new creation transaction. There is no retry and no
/// deduplication of previous deployments.
pub struct Runner {
    signers: Arc<dyn SignerProvider>,
    artifacts: Arc<dyn ArtifactResolver>,
    contract: String,
    parameters: DeploymentParameters,
}

impl Runner {
    pub fn new(
        signers: Arc<dyn SignerProvider>,
        artifacts: Arc<dyn ArtifactResolver>,
        contract: String,
        parameters: DeploymentParameters,
    ) -> Self {
        Self {
            signers,
            artifacts,
            contract,
            parameters,
        }
    }

    /// Runs the deployment and writes the signer and contract addresses to
    /// `out`.
    pub async fn run(
        &self,
        out: &mut (dyn Write + Send),
    ) -> Result<DeploymentResult, DeploymentError> {
        let deployer = self
            .signers
            .signers()
            .await
            .map_err(DeploymentError::SignerProvider)?
            .into_iter()
            .next()
            .ok_or(DeploymentError::NoSignerAvailable)?;
        report(out, format_args!("Deploying with address: {}", deployer.address()));

        let factory = self.artifacts.resolve(&self.contract)?;
        tracing::info!(
            signer = %deployer.address(),
            contract = %self.contract,
            "deploying contract"
        );
        let result = factory.deploy(&deployer, &self.parameters).await?;

        tracing::info!(
            contract = %self.contract,
            address = %result.contract_address,
            tx = ?result.transaction_hash,
            "contract deployed"
        );
        report(
            out,
            format_args!(
                "{} address:  {}",
                contract_label(&self.contract),
                result.contract_address
            ),
        );
        Ok(result)
    }
}

fn report(out: &mut (dyn Write + Send), line: std::fmt::Arguments<'_>) {
    if let Err(err) = writeln!(out, "{line}") {
        tracing::warn!(?err, "could not write deployment output");
    }
}
