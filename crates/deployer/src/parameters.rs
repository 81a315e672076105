use {
    alloy::primitives::{Address, B256},
    std::fmt::{self, Display, Formatter},
};

pub const DEFAULT_COLLECTION_NAME: &str = "Heroic Story";
pub const DEFAULT_COLLECTION_SYMBOL: &str = "STORY";
/// OpenSea proxy registry on mainnet.
pub const DEFAULT_PROXY_REGISTRY_ADDRESS: &str = "0xa5409ec958c83c3f309868babaca7c86dcb077c1";

/// Constructor arguments of the collection contract.
///
/// The registry address is kept verbatim. It only gets validated when a
/// factory encodes it against the constructor ABI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentParameters {
    pub collection_name: String,
    pub collection_symbol: String,
    pub proxy_registry_address: String,
}

impl DeploymentParameters {
    /// The arguments in constructor order: name, symbol, registry address.
    pub fn constructor_arguments(&self) -> [&str; 3] {
        [
            &self.collection_name,
            &self.collection_symbol,
            &self.proxy_registry_address,
        ]
    }
}

impl Default for DeploymentParameters {
    fn default() -> Self {
        Self {
            collection_name: DEFAULT_COLLECTION_NAME.to_string(),
            collection_symbol: DEFAULT_COLLECTION_SYMBOL.to_string(),
            proxy_registry_address: DEFAULT_PROXY_REGISTRY_ADDRESS.to_string(),
        }
    }
}

impl Display for DeploymentParameters {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            collection_name,
            collection_symbol,
            proxy_registry_address,
        } = self;

        writeln!(f, "collection_name: {collection_name}")?;
        writeln!(f, "collection_symbol: {collection_symbol}")?;
        writeln!(f, "proxy_registry_address: {proxy_registry_address}")?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentResult {
    pub contract_address: Address,
    /// Hash of the creation transaction, if the factory submitted one.
    pub transaction_hash: Option<B256>,
}
