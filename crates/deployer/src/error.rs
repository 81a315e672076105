/// Everything that can make a deployment run fail. None of these are
/// recovered from; the binary reports them and exits with a non-zero status.
#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("no signer available")]
    NoSignerAvailable,
    #[error("failed to retrieve signers: {0:#}")]
    SignerProvider(anyhow::Error),
    #[error("artifact for contract {name:?} not found")]
    ArtifactNotFound { name: String },
    #[error("invalid artifact for contract {name:?}: {error:#}")]
    InvalidArtifact { name: String, error: anyhow::Error },
    #[error("invalid constructor arguments: {0:#}")]
    InvalidConstructorArguments(anyhow::Error),
    #[error("deployment transaction failed: {0:#}")]
    DeploymentTransactionFailed(anyhow::Error),
}
