//! Compiled contract artifacts.
//!
//! The SystemConfig creation bytecode is produced by the contracts build and
//! handed over as a JSON artifact. Two layouts are accepted:
//! ```json
//! { "bytecode": { "object": "0x6080..." } }   // forge
//! { "bytecode": "0x6080..." }                 // hardhat
//! ```

use alloy_primitives::Bytes;
use eyre::{bail, ensure, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BytecodeField {
    Forge { object: String },
    Hardhat(String),
}

#[derive(Debug, Deserialize)]
struct ArtifactFile {
    bytecode: BytecodeField,
}

/// Load creation bytecode from an artifact file.
pub fn load_creation_code(path: impl AsRef<Path>) -> Result<Bytes> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read artifact: {}", path.display()))?;
    parse_creation_code(&data)
        .wrap_err_with(|| format!("Invalid artifact: {}", path.display()))
}

/// Extract creation bytecode from artifact JSON.
pub fn parse_creation_code(data: &str) -> Result<Bytes> {
    let artifact: ArtifactFile =
        serde_json::from_str(data).wrap_err("Failed to parse artifact JSON")?;
    let raw = match artifact.bytecode {
        BytecodeField::Forge { object } => object,
        BytecodeField::Hardhat(raw) => raw,
    };

    let raw = raw.trim();
    if raw.contains("__$") {
        bail!("Bytecode has unlinked library placeholders");
    }
    let code = hex::decode(raw.strip_prefix("0x").unwrap_or(raw))
        .wrap_err("Bytecode is not valid hex")?;
    ensure!(!code.is_empty(), "Bytecode is empty (abstract contract or interface?)");

    Ok(code.into())
}
