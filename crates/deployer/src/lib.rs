pub mod arguments;
pub mod artifact;
mod error;
pub mod factory;
pub mod parameters;
pub mod runner;
pub mod signers;

pub use {
    error::DeploymentError,
    parameters::{DeploymentParameters, DeploymentResult},
    runner::Runner,
};
use {
    crate::{
        arguments::Arguments,
        artifact::ArtifactDirectory,
        signers::{LocalSigners, NodeAccounts, SignerProvider},
    },
    alloy::{
        network::EthereumWallet,
        providers::{DynProvider, Provider, ProviderBuilder},
        signers::local::PrivateKeySigner,
    },
    clap::{Parser, error::ErrorKind},
    std::{process::ExitCode, sync::Arc},
    url::Url,
};

/// Entry point of the `deploy` binary. Exits with `0` once the contract is
/// deployed and with `1` on any error, including invalid arguments. Only
/// the deployment report is written to stdout.
pub async fn start(args: impl Iterator<Item = String>) -> ExitCode {
    let args = match Arguments::try_parse_from(args) {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };
    let mut config = observe::Config::default()
        .with_env_filter(&args.logging.log_filter)
        .with_stderr_threshold(args.logging.log_stderr_threshold);
    if args.logging.log_json {
        config = config.with_json_format();
    }
    observe::tracing::initialize(&config);
    tracing::info!("running deployer with validated arguments:\n{}", args);

    match run(&args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

pub async fn run(args: &Arguments) -> Result<DeploymentResult, DeploymentError> {
    let provider = provider(&args.node_url, &args.private_keys);
    let signers: Arc<dyn SignerProvider> = if args.private_keys.is_empty() {
        Arc::new(NodeAccounts::new(provider.clone()))
    } else {
        Arc::new(LocalSigners::new(args.private_keys.clone()))
    };
    let artifacts = Arc::new(ArtifactDirectory::new(
        args.artifacts.clone(),
        provider,
        args.confirmations,
    ));

    Runner::new(signers, artifacts, args.contract.clone(), args.parameters())
        .run(&mut std::io::stdout())
        .await
}

/// Provider for the node at `node_url`. Transactions from one of `signers`
/// are signed locally, all others are left to the node.
fn provider(node_url: &Url, signers: &[PrivateKeySigner]) -> DynProvider {
    let builder = ProviderBuilder::new();
    match signers.split_first() {
        Some((first, rest)) => {
            let mut wallet = EthereumWallet::new(first.clone());
            for signer in rest {
                wallet.register_signer(signer.clone());
            }
            builder.wallet(wallet).connect_http(node_url.clone()).erased()
        }
        None => builder.connect_http(node_url.clone()).erased(),
    }
}
