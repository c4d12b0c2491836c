//! Options for one interface generation run

use crate::{
    error::{Error, Result},
    format::FormatterKind,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_copy_docs() -> bool {
    true
}

/// Everything that controls one run. Loadable from JSON; the CLI layers its flags on top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Options {
    /// Type whose exported methods make up the interface
    #[serde(default)]
    pub struct_name: String,
    #[serde(default)]
    pub interface_name: String,
    /// Package clause of the generated file
    #[serde(default)]
    pub package_name: String,
    /// Go files or directories to scan
    #[serde(default)]
    pub files: Vec<PathBuf>,
    #[serde(default = "default_copy_docs")]
    pub copy_docs: bool,
    /// Write here instead of returning the text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Extra imports, added without alias ahead of scanned ones
    #[serde(default)]
    pub imports: Vec<String>,
    /// Package that qualifies unqualified exported types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
    #[serde(default)]
    pub omit_generated_comment: bool,
    #[serde(default)]
    pub formatter: FormatterKind,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            struct_name: String::new(),
            interface_name: String::new(),
            package_name: String::new(),
            files: Vec::new(),
            copy_docs: true,
            output: None,
            imports: Vec::new(),
            qualifier: None,
            omit_generated_comment: false,
            formatter: FormatterKind::default(),
        }
    }
}

impl Options {
    pub fn new(
        struct_name: impl Into<String>,
        interface_name: impl Into<String>,
        package_name: impl Into<String>,
    ) -> Self {
        Self {
            struct_name: struct_name.into(),
            interface_name: interface_name.into(),
            package_name: package_name.into(),
            ..Self::default()
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::FileError {
            path: path.to_path_buf(),
            source,
        })?;
        let options = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))?;
        Ok(options)
    }

    /// The qualifier, if one is set and non-empty
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref().filter(|q| !q.is_empty())
    }

    /// Check that every required value is present.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("struct_name", self.struct_name.is_empty()),
            ("interface_name", self.interface_name.is_empty()),
            ("package_name", self.package_name.is_empty()),
            ("files", self.files.is_empty()),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, empty)| *empty)
            .map(|(name, _)| *name)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::ConfigError(format!(
                "missing required option(s): {}",
                missing.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert!(options.copy_docs);
        assert_eq!(options.formatter, FormatterKind::Builtin);
        assert_eq!(options.qualifier(), None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options: Options = serde_json::from_str(r#"{ "struct_name": "Store" }"#).unwrap();
        assert_eq!(options.struct_name, "Store");
        assert!(options.copy_docs);
        assert!(options.files.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ifacegen.json");
        let config = serde_json::json!({
            "struct_name": "Store",
            "interface_name": "StoreAPI",
            "package_name": "storeapi",
            "files": ["store.go"],
            "copy_docs": false,
            "imports": ["context"],
            "qualifier": "store",
            "formatter": "goimports"
        });
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let options = Options::load_from_file(&path).unwrap();
        assert_eq!(options.interface_name, "StoreAPI");
        assert!(!options.copy_docs);
        assert_eq!(options.imports, vec!["context".to_string()]);
        assert_eq!(options.qualifier(), Some("store"));
        assert_eq!(options.formatter, FormatterKind::Goimports);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Options::load_from_file(&path),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn test_validate_lists_missing_options() {
        let err = Options::new("Store", "", "api").validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: missing required option(s): interface_name, files"
        );
    }

    #[test]
    fn test_empty_qualifier_is_none() {
        let mut options = Options::default();
        options.qualifier = Some(String::new());
        assert_eq!(options.qualifier(), None);
    }
}
