use buildcommon::prelude::*;

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::Error;

/// Indentation of the metadata file, per nesting level
const INDENT: &[u8] = b"\t\t";

/// Metadata of a build, written as the metadata file
///
/// Keys are serialized in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Branch under build
    pub branch: String,

    /// CI run identifier (GITHUB_RUN_ID)
    #[serde(rename = "buildworkflowid")]
    pub build_workflow_id: String,

    /// Product name
    pub product: String,

    /// Repository name
    pub repo: String,

    /// Repository owner
    pub org: String,

    /// Commit SHA
    #[serde(rename = "sha")]
    pub revision: String,

    /// Product version
    pub version: String,
}

impl Metadata {
    /// Serialize to indented JSON
    pub fn to_json(&self) -> Result<Vec<u8>, Error> {
        let mut output = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut output, PrettyFormatter::with_indent(INDENT));
        self.serialize(&mut serializer)
            .change_context(Error::Serialize)?;
        Ok(output)
    }

    /// Write the metadata file to `path`, replacing any existing file
    pub fn write(&self, path: &Path) -> Result<(), Error> {
        let json = self.to_json()?;
        verboseln!("metadata: {}", String::from_utf8_lossy(&json));
        system::write_file_atomic(path, json)
            .change_context_lazy(|| Error::Write(path.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vault() -> Metadata {
        Metadata {
            branch: "main".to_string(),
            build_workflow_id: "1234567890".to_string(),
            product: "vault".to_string(),
            repo: "vault".to_string(),
            org: "hashicorp".to_string(),
            revision: "0123abcd".to_string(),
            version: "1.15.0".to_string(),
        }
    }

    #[test]
    fn json_layout() {
        let json = String::from_utf8(vault().to_json().unwrap()).unwrap();
        let expected = "{\n\
            \t\t\"branch\": \"main\",\n\
            \t\t\"buildworkflowid\": \"1234567890\",\n\
            \t\t\"product\": \"vault\",\n\
            \t\t\"repo\": \"vault\",\n\
            \t\t\"org\": \"hashicorp\",\n\
            \t\t\"sha\": \"0123abcd\",\n\
            \t\t\"version\": \"1.15.0\"\n\
            }";
        assert_eq!(json, expected);
    }

    #[test]
    fn reserialize_is_identical() {
        let json = vault().to_json().unwrap();
        let parsed: Metadata = serde_json::from_slice(&json).unwrap();
        assert_eq!(parsed, vault());
        assert_eq!(parsed.to_json().unwrap(), json);
    }

    #[test]
    fn write_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("metadata.json");
        let err = vault().write(&path).unwrap_err();
        assert!(matches!(err.current_context(), Error::Write(_)));
    }
}
