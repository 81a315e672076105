//! Resolution of contract names to compiled artifacts.
//!
//! Artifacts are the JSON files Hardhat (`artifacts/contracts/<Source>.sol/
//! <Name>.json`) and Foundry (`out/<Source>.sol/<Name>.json`) write after
//! compilation. Both carry the contract ABI and its creation bytecode.

use {
    crate::{
        error::DeploymentError,
        factory::{ArtifactFactory, ContractFactory},
    },
    alloy::{json_abi::JsonAbi, primitives::Bytes, providers::DynProvider},
    anyhow::{Context, Result, ensure},
    serde::Deserialize,
    std::{
        fs,
        path::{Path, PathBuf},
        sync::Arc,
    },
};

/// Resolves a named contract to a factory able to deploy it.
#[cfg_attr(test, mockall::automock)]
pub trait ArtifactResolver: Send + Sync {
    fn resolve(&self, name: &str) -> Result<Arc<dyn ContractFactory>, DeploymentError>;
}

#[derive(Debug, Clone)]
pub struct Artifact {
    pub contract_name: String,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    contract_name: Option<String>,
    abi: JsonAbi,
    bytecode: RawBytecode,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    // Hardhat
    Hex(Bytes),
    // Foundry
    Object { object: Bytes },
}

impl Artifact {
    /// Parses an artifact. `fallback_name` is used for artifacts without a
    /// `contractName` field, which is the case for Foundry.
    pub fn from_json(json: &str, fallback_name: &str) -> Result<Self> {
        let raw: RawArtifact = serde_json::from_str(json).context("malformed artifact json")?;
        let bytecode = match raw.bytecode {
            RawBytecode::Hex(bytes) => bytes,
            RawBytecode::Object { object } => object,
        };
        Ok(Self {
            contract_name: raw.contract_name.unwrap_or_else(|| fallback_name.to_string()),
            abi: raw.abi,
            bytecode,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();
        Self::from_json(&json, stem).with_context(|| format!("could not parse {}", path.display()))
    }
}

/// Splits a fully qualified name (`contracts/HeroicStory.sol:HeroicStory`)
/// into its source and contract parts. Plain names have no source.
fn split_qualified_name(name: &str) -> (Option<&str>, &str) {
    match name.rsplit_once(':') {
        Some((source, contract)) => (Some(source), contract),
        None => (None, name),
    }
}

/// Name under which a contract gets reported, without its source path.
pub fn contract_label(name: &str) -> &str {
    split_qualified_name(name).1
}

/// Resolves artifacts from a compilation output directory and binds them to
/// the network the deployment should go to.
#[derive(Clone)]
pub struct ArtifactDirectory {
    root: PathBuf,
    provider: DynProvider,
    confirmations: u64,
}

impl ArtifactDirectory {
    pub fn new(root: PathBuf, provider: DynProvider, confirmations: u64) -> Self {
        Self {
            root,
            provider,
            confirmations,
        }
    }

    /// Finds and loads the artifact of the named contract.
    pub fn find(&self, name: &str) -> Result<Artifact, DeploymentError> {
        let (source, contract) = split_qualified_name(name);
        let invalid = |error| DeploymentError::InvalidArtifact {
            name: name.to_string(),
            error,
        };

        let candidates = match source {
            Some(source) => {
                let path = self.root.join(source).join(format!("{contract}.json"));
                if path.is_file() { vec![path] } else { Vec::new() }
            }
            None => {
                let mut paths = Vec::new();
                collect_artifact_files(&self.root, &format!("{contract}.json"), &mut paths)
                    .map_err(invalid)?;
                paths.sort();
                paths
            }
        };

        let mut artifacts = Vec::new();
        for path in candidates {
            let artifact = Artifact::load(&path).map_err(invalid)?;
            if artifact.contract_name == contract {
                artifacts.push((path, artifact));
            }
        }

        let (path, artifact) = match artifacts.len() {
            0 => {
                tracing::debug!(root = %self.root.display(), name, "no matching artifact");
                return Err(DeploymentError::ArtifactNotFound {
                    name: name.to_string(),
                });
            }
            1 => artifacts.remove(0),
            _ => {
                let paths: Vec<_> = artifacts
                    .iter()
                    .map(|(path, _)| path.display().to_string())
                    .collect();
                return Err(invalid(anyhow::anyhow!(
                    "multiple artifacts match, use a fully qualified name: {}",
                    paths.join(", ")
                )));
            }
        };

        check_deployable(&artifact).map_err(invalid)?;
        tracing::debug!(path = %path.display(), name, "resolved artifact");
        Ok(artifact)
    }
}

impl ArtifactResolver for ArtifactDirectory {
    fn resolve(&self, name: &str) -> Result<Arc<dyn ContractFactory>, DeploymentError> {
        let artifact = self.find(name)?;
        Ok(Arc::new(ArtifactFactory::new(
            artifact,
            self.provider.clone(),
            self.confirmations,
        )))
    }
}

fn check_deployable(artifact: &Artifact) -> Result<()> {
    ensure!(
        !artifact.bytecode.is_empty(),
        "artifact has no bytecode, {} is abstract or an interface",
        artifact.contract_name
    );
    Ok(())
}

/// Recursively collects all files named `file_name` below `dir`. A missing
/// directory holds no artifacts.
fn collect_artifact_files(dir: &Path, file_name: &str, paths: &mut Vec<PathBuf>) -> Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    let entries = fs::read_dir(dir).with_context(|| format!("could not list {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("could not list {}", dir.display()))?;
        let path = entry.path();
        // Symlinked directories are not followed, they may point back up.
        let file_type = entry
            .file_type()
            .with_context(|| format!("could not inspect {}", path.display()))?;
        if file_type.is_dir() {
            collect_artifact_files(&path, file_name, paths)?;
        } else if path.file_name().is_some_and(|name| name == file_name) {
            paths.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::providers::{Provider, ProviderBuilder, mock::Asserter},
        serde_json::json,
    };

    fn abi() -> serde_json::Value {
        json!([{
            "type": "constructor",
            "stateMutability": "nonpayable",
            "inputs": [
                { "name": "_name", "type": "string", "internalType": "string" },
                { "name": "_symbol", "type": "string", "internalType": "string" },
                { "name": "_proxyRegistryAddress", "type": "address", "internalType": "address" }
            ]
        }])
    }

    fn hardhat_artifact(name: &str, bytecode: &str) -> String {
        json!({
            "_format": "hh-sol-artifact-1",
            "contractName": name,
            "sourceName": format!("contracts/{name}.sol"),
            "abi": abi(),
            "bytecode": bytecode,
            "deployedBytecode": bytecode,
            "linkReferences": {},
            "deployedLinkReferences": {}
        })
        .to_string()
    }

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn directory(root: &Path) -> ArtifactDirectory {
        let provider = ProviderBuilder::new()
            .connect_mocked_client(Asserter::new())
            .erased();
        ArtifactDirectory::new(root.to_path_buf(), provider, 1)
    }

    #[test]
    fn finds_hardhat_artifact() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "contracts/HeroicStory.sol/HeroicStory.json",
            &hardhat_artifact("HeroicStory", "0x6080604052"),
        );
        write(
            dir.path(),
            "contracts/HeroicStory.sol/HeroicStory.dbg.json",
            r#"{ "_format": "hh-sol-dbg-1", "buildInfo": "../../build-info/x.json" }"#,
        );

        let artifact = directory(dir.path()).find("HeroicStory").unwrap();
        assert_eq!(artifact.contract_name, "HeroicStory");
        assert_eq!(artifact.bytecode.to_vec(), vec![0x60, 0x80, 0x60, 0x40, 0x52]);
        assert_eq!(artifact.abi.constructor.unwrap().inputs.len(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_not_searched() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "contracts/HeroicStory.sol/HeroicStory.json",
            &hardhat_artifact("HeroicStory", "0x6080"),
        );
        std::os::unix::fs::symlink(dir.path(), dir.path().join("contracts/loop")).unwrap();

        let artifact = directory(dir.path()).find("HeroicStory").unwrap();
        assert_eq!(artifact.contract_name, "HeroicStory");
    }

    #[test]
    fn finds_foundry_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = json!({
            "abi": abi(),
            "bytecode": { "object": "0x6080", "sourceMap": "", "linkReferences": {} },
        });
        write(
            dir.path(),
            "HeroicStory.sol/HeroicStory.json",
            &artifact.to_string(),
        );

        let artifact = directory(dir.path()).find("HeroicStory").unwrap();
        assert_eq!(artifact.contract_name, "HeroicStory");
        assert_eq!(artifact.bytecode.to_vec(), vec![0x60, 0x80]);
    }

    #[test]
    fn missing_artifact_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "contracts/Other.sol/Other.json",
            &hardhat_artifact("Other", "0x6080"),
        );

        let err = directory(dir.path()).find("HeroicStory").unwrap_err();
        assert!(matches!(err, DeploymentError::ArtifactNotFound { name } if name == "HeroicStory"));
    }

    #[test]
    fn missing_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = directory(&dir.path().join("artifacts"))
            .resolve("HeroicStory")
            .err()
            .unwrap();
        assert!(matches!(err, DeploymentError::ArtifactNotFound { .. }));
    }

    #[test]
    fn ambiguous_name_requires_qualified_name() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = hardhat_artifact("HeroicStory", "0x6080");
        write(dir.path(), "contracts/A.sol/HeroicStory.json", &artifact);
        write(dir.path(), "contracts/B.sol/HeroicStory.json", &artifact);

        let directory = directory(dir.path());
        let err = directory.find("HeroicStory").unwrap_err();
        assert!(matches!(err, DeploymentError::InvalidArtifact { .. }));
        assert!(err.to_string().contains("fully qualified name"));

        let artifact = directory
            .find("contracts/B.sol:HeroicStory")
            .unwrap();
        assert_eq!(artifact.contract_name, "HeroicStory");
    }

    #[test]
    fn interfaces_are_not_deployable() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "contracts/IHeroicStory.sol/IHeroicStory.json",
            &hardhat_artifact("IHeroicStory", "0x"),
        );

        let err = directory(dir.path()).find("IHeroicStory").unwrap_err();
        assert!(matches!(err, DeploymentError::InvalidArtifact { .. }));
    }

    #[test]
    fn malformed_artifact_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "HeroicStory.json", "{ not json");

        let err = directory(dir.path()).find("HeroicStory").unwrap_err();
        assert!(matches!(err, DeploymentError::InvalidArtifact { .. }));
    }

    #[test]
    fn labels_strip_source_path() {
        assert_eq!(contract_label("HeroicStory"), "HeroicStory");
        assert_eq!(
            contract_label("contracts/HeroicStory.sol:HeroicStory"),
            "HeroicStory"
        );
    }
}
