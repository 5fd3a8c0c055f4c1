//! The pre-built contract artifact forwarded to factory construction.
//!
//! The artifact is opaque to this crate: the ABI is carried as raw JSON and
//! the bytecode as bytes. Only its shape is checked here, so that a
//! malformed artifact surfaces as a configuration error at load time rather
//! than as an unattributable failure mid-deployment.

use alloy::primitives::Bytes;
use serde::{Deserialize, Serialize};

/// Immutable (interface-description, executable-bytecode) pair for the
/// equity token contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentArtifact {
    abi: serde_json::Value,
    bytecode: Bytes,
}

impl DeploymentArtifact {
    /// Parses a compiler-output JSON artifact of the form
    /// `{"abi": [...], "bytecode": "0x..."}`.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError`] when the JSON is invalid, the ABI is
    /// missing or not an array, or the bytecode is missing, empty, or not
    /// 0x-prefixed hex.
    pub fn from_json(raw: &str) -> Result<Self, ArtifactError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;

        let abi = value
            .get("abi")
            .filter(|abi| abi.is_array())
            .cloned()
            .ok_or(ArtifactError::MissingAbi)?;

        let bytecode_str = value
            .get("bytecode")
            .and_then(serde_json::Value::as_str)
            .ok_or(ArtifactError::MissingBytecode)?;

        let bytecode: Bytes = bytecode_str.parse().map_err(|_| {
            ArtifactError::InvalidBytecode {
                bytecode: bytecode_str.to_string(),
            }
        })?;

        if bytecode.is_empty() {
            return Err(ArtifactError::EmptyBytecode);
        }

        Ok(Self { abi, bytecode })
    }

    #[must_use]
    pub const fn abi(&self) -> &serde_json::Value {
        &self.abi
    }

    #[must_use]
    pub const fn bytecode(&self) -> &Bytes {
        &self.bytecode
    }
}

/// Malformed deployment artifact. Terminal and not user-correctable; maps to
/// the configuration-error branch of [`DeployError`](crate::deploy::DeployError).
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Artifact has no ABI array")]
    MissingAbi,

    #[error("Artifact has no bytecode string")]
    MissingBytecode,

    #[error("Artifact bytecode is not valid hex: {bytecode}")]
    InvalidBytecode { bytecode: String },

    #[error("Artifact bytecode is empty")]
    EmptyBytecode,
}

#[cfg(test)]
mod tests {
    use super::{ArtifactError, DeploymentArtifact};

    const VALID: &str = r#"{"abi": [{"type": "constructor"}], "bytecode": "0x6080604052"}"#;

    #[test]
    fn test_parses_valid_artifact() {
        let artifact = DeploymentArtifact::from_json(VALID).unwrap();
        assert_eq!(artifact.bytecode().len(), 5);
        assert!(artifact.abi().is_array());
    }

    #[test]
    fn test_rejects_invalid_json() {
        let result = DeploymentArtifact::from_json("not json");
        assert!(matches!(result, Err(ArtifactError::Json(_))));
    }

    #[test]
    fn test_rejects_missing_abi() {
        let result =
            DeploymentArtifact::from_json(r#"{"bytecode": "0x6080"}"#);
        assert!(matches!(result, Err(ArtifactError::MissingAbi)));
    }

    #[test]
    fn test_rejects_non_array_abi() {
        let result = DeploymentArtifact::from_json(
            r#"{"abi": "nope", "bytecode": "0x6080"}"#,
        );
        assert!(matches!(result, Err(ArtifactError::MissingAbi)));
    }

    #[test]
    fn test_rejects_missing_bytecode() {
        let result = DeploymentArtifact::from_json(r#"{"abi": []}"#);
        assert!(matches!(result, Err(ArtifactError::MissingBytecode)));
    }

    #[test]
    fn test_rejects_non_hex_bytecode() {
        let result = DeploymentArtifact::from_json(
            r#"{"abi": [], "bytecode": "0xzz"}"#,
        );
        assert!(matches!(result, Err(ArtifactError::InvalidBytecode { .. })));
    }

    #[test]
    fn test_rejects_empty_bytecode() {
        let result = DeploymentArtifact::from_json(
            r#"{"abi": [], "bytecode": "0x"}"#,
        );
        assert!(matches!(result, Err(ArtifactError::EmptyBytecode)));
    }
}
