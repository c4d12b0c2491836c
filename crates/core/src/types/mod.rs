pub mod import;
pub mod interface;
pub mod method;

// Re-export commonly used types
pub use import::ImportEntry;
pub use interface::InterfaceSpec;
pub use method::MethodSignature;
