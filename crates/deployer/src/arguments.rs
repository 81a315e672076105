use {
    crate::parameters::{
        DEFAULT_COLLECTION_NAME,
        DEFAULT_COLLECTION_SYMBOL,
        DEFAULT_PROXY_REGISTRY_ADDRESS,
        DeploymentParameters,
    },
    alloy::signers::local::PrivateKeySigner,
    clap::Parser,
    std::{
        fmt::{self, Display, Formatter},
        path::PathBuf,
    },
    tracing::Level,
    url::Url,
};

#[derive(clap::Parser)]
pub struct LoggingArguments {
    #[clap(long, env, default_value = "warn,deployer=debug")]
    pub log_filter: String,

    /// Log events at least this severe go to stderr, the rest to stdout. The
    /// default keeps all logs on stderr.
    #[clap(long, env, default_value = "trace")]
    pub log_stderr_threshold: Level,

    /// Output log events as JSON.
    #[clap(long, env)]
    pub log_json: bool,
}

impl Display for LoggingArguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            log_filter,
            log_stderr_threshold,
            log_json,
        } = self;

        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "log_stderr_threshold: {log_stderr_threshold}")?;
        writeln!(f, "log_json: {log_json}")?;
        Ok(())
    }
}

#[derive(Parser)]
#[clap(about = "Deploys a compiled NFT collection contract")]
pub struct Arguments {
    #[clap(flatten)]
    pub logging: LoggingArguments,

    /// The Ethereum node URL to connect to.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: Url,

    /// Comma separated private keys of the accounts that may deploy. The
    /// first one is the deployer. Without keys the accounts unlocked on the
    /// node are used instead.
    #[clap(long, env, value_delimiter = ',', hide_env_values = true)]
    pub private_keys: Vec<PrivateKeySigner>,

    /// Directory holding the compiled contract artifacts.
    #[clap(long, env, default_value = "artifacts")]
    pub artifacts: PathBuf,

    /// Name of the contract to deploy. Use a fully qualified name like
    /// `contracts/HeroicStory.sol:HeroicStory` if the name is ambiguous.
    #[clap(long, env, default_value = "HeroicStory")]
    pub contract: String,

    #[clap(long, env, default_value = DEFAULT_COLLECTION_NAME)]
    pub collection_name: String,

    #[clap(long, env, default_value = DEFAULT_COLLECTION_SYMBOL)]
    pub collection_symbol: String,

    /// Address of the proxy registry passed to the collection constructor.
    #[clap(long, env, default_value = DEFAULT_PROXY_REGISTRY_ADDRESS)]
    pub proxy_registry_address: String,

    /// Number of confirmations to wait for before reporting the deployment.
    #[clap(long, env, default_value = "1", value_parser = clap::value_parser!(u64).range(1..))]
    pub confirmations: u64,
}

impl Arguments {
    pub fn parameters(&self) -> DeploymentParameters {
        DeploymentParameters {
            collection_name: self.collection_name.clone(),
            collection_symbol: self.collection_symbol.clone(),
            proxy_registry_address: self.proxy_registry_address.clone(),
        }
    }
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            logging,
            node_url,
            private_keys,
            artifacts,
            contract,
            collection_name: _,
            collection_symbol: _,
            proxy_registry_address: _,
            confirmations,
        } = self;

        write!(f, "{logging}")?;
        writeln!(f, "node_url: {node_url}")?;
        if private_keys.is_empty() {
            writeln!(f, "private_keys: None")?;
        } else {
            writeln!(f, "private_keys: SECRET")?;
        }
        writeln!(f, "artifacts: {}", artifacts.display())?;
        writeln!(f, "contract: {contract}")?;
        write!(f, "{}", self.parameters())?;
        writeln!(f, "confirmations: {confirmations}")?;
        Ok(())
    }
}
