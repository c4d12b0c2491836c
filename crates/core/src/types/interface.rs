use super::{ImportEntry, MethodSignature};
use serde::{Deserialize, Serialize};

/// Everything needed to emit one generated interface file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceSpec {
    /// Type whose methods were collected
    pub type_name: String,
    pub package_name: String,
    pub interface_name: String,
    /// Package prefixed onto unqualified exported types, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
    pub methods: Vec<MethodSignature>,
    pub imports: Vec<ImportEntry>,
    #[serde(default)]
    pub omit_generated_comment: bool,
}

impl InterfaceSpec {
    pub fn method_names(&self) -> Vec<&str> {
        self.methods.iter().map(|m| m.name.as_str()).collect()
    }
}
