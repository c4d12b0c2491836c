use serde::{Deserialize, Serialize};

/// An exported method captured for the generated interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSignature {
    /// Method name; unique within one interface
    pub name: String,
    /// Rendered `Name(params) (results)` text
    pub signature: String,
    /// Raw doc comments, in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
}

impl MethodSignature {
    pub fn new(name: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signature: signature.into(),
            docs: Vec::new(),
        }
    }

    pub fn with_docs(mut self, docs: Vec<String>) -> Self {
        self.docs = docs;
        self
    }

    /// Doc lines followed by the signature line
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.docs
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.signature.as_str()))
    }
}
