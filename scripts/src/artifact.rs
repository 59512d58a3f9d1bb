//! Loading of the compiled contract artifacts (hardhat or foundry json output)

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{hex, primitives::Bytes};
use json::JsonValue;

use crate::errors::ScriptError;

/// A compiled contract: its creation bytecode and its abi
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    /// Creation bytecode, without constructor arguments
    pub bytecode: Bytes,
    /// The raw abi, an ordered array of entries
    pub abi: JsonValue,
}

impl Artifact {
    /// Path of the hardhat artifact for the given contract
    pub fn path_for(artifacts_dir: &Path, contract: &str) -> PathBuf {
        artifacts_dir
            .join("contracts")
            .join(format!("{contract}.sol"))
            .join(format!("{contract}.json"))
    }

    /// Read and parse the artifact at `path`, no caching is done
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ScriptError::ArtifactLoading(format!("unable to read {}: {e}", path.display()))
        })?;

        Self::parse(&content)
            .map_err(|e| ScriptError::ArtifactLoading(format!("{}: {e}", path.display())))
    }

    /// Parse an artifact document
    pub fn parse(content: &str) -> Result<Self, String> {
        let document = json::parse(content).map_err(|e| format!("malformed json ({e})"))?;

        // Hardhat stores a plain string, foundry a `{ object: .. }`
        let raw_bytecode = match &document["bytecode"] {
            value if value.is_string() => value.as_str(),
            value if value.is_object() => value["object"].as_str(),
            _ => None,
        }
        .ok_or_else(|| String::from("missing `bytecode` field"))?;

        if raw_bytecode.contains("__") {
            return Err(String::from(
                "bytecode has unresolved library links, link the libraries before deploying",
            ));
        }

        let bytecode = hex::decode(raw_bytecode.trim())
            .map_err(|e| format!("invalid bytecode hex ({e})"))?;
        if bytecode.is_empty() {
            return Err(String::from(
                "empty bytecode, abstract contracts and interfaces can't be deployed",
            ));
        }

        let abi = document["abi"].clone();
        if !abi.is_array() {
            return Err(String::from("missing or invalid `abi` field"));
        }

        Ok(Artifact {
            bytecode: Bytes::from(bytecode),
            abi,
        })
    }

    /// Number of inputs the constructor expects (0 when the abi declares none)
    pub fn constructor_inputs(&self) -> usize {
        self.abi
            .members()
            .find(|entry| entry["type"] == "constructor")
            .map(|constructor| constructor["inputs"].len())
            .unwrap_or(0)
    }

    /// Canonical signatures of the functions & events, in abi order
    pub fn signatures(&self) -> Vec<String> {
        self.abi
            .members()
            .filter(|entry| entry["type"] == "function" || entry["type"] == "event")
            .filter_map(|entry| {
                let name = entry["name"].as_str()?;
                Some(format!("{name}({})", joined_types(&entry["inputs"])))
            })
            .collect()
    }
}

/// Comma separated canonical types of a list of abi params
fn joined_types(params: &JsonValue) -> String {
    params
        .members()
        .map(canonical_type)
        .collect::<Vec<_>>()
        .join(",")
}

/// Canonical type of a single abi param, tuples are expanded
fn canonical_type(param: &JsonValue) -> String {
    let ty = param["type"].as_str().unwrap_or_default();
    match ty.strip_prefix("tuple") {
        Some(suffix) => format!("({}){suffix}", joined_types(&param["components"])),
        None => ty.to_string(),
    }
}
