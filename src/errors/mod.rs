pub mod types;

pub use types::ProspectorError;
