//! Sources of signing identities for the deployment transaction.

use {
    alloy::{
        primitives::Address,
        providers::{DynProvider, Provider},
        signers::local::PrivateKeySigner,
    },
    anyhow::{Context, Result},
};

/// An identity able to authorize the deployment transaction.
#[derive(Debug, Clone)]
pub enum Account {
    /// Private key held by this process. Transactions get signed locally
    /// before they are sent to the node.
    Local(PrivateKeySigner),
    /// Account unlocked on the node (e.g. anvil or a hardhat node) which
    /// signs `eth_sendTransaction` requests on our behalf.
    Node(Address),
}

impl Account {
    pub fn address(&self) -> Address {
        match self {
            Self::Local(signer) => signer.address(),
            Self::Node(address) => *address,
        }
    }
}

/// Yields the signing identities available for the configured network in a
/// stable order. The first one is used as the deployer.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SignerProvider: Send + Sync {
    async fn signers(&self) -> Result<Vec<Account>>;
}

/// Signers from private keys passed through the command line.
#[derive(Debug, Clone)]
pub struct LocalSigners(Vec<PrivateKeySigner>);

impl LocalSigners {
    pub fn new(signers: Vec<PrivateKeySigner>) -> Self {
        Self(signers)
    }
}

#[async_trait::async_trait]
impl SignerProvider for LocalSigners {
    async fn signers(&self) -> Result<Vec<Account>> {
        Ok(self.0.iter().cloned().map(Account::Local).collect())
    }
}

/// Accounts the node manages itself.
#[derive(Clone)]
pub struct NodeAccounts {
    provider: DynProvider,
}

impl NodeAccounts {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }
}

#[async_trait::async_trait]
impl SignerProvider for NodeAccounts {
    async fn signers(&self) -> Result<Vec<Account>> {
        let accounts = self
            .provider
            .get_accounts()
            .await
            .context("could not fetch node accounts")?;
        Ok(accounts.into_iter().map(Account::Node).collect())
    }
}
