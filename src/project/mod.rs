//! Project management — loading documents, type models and configuration
//! from disk.

mod error;
pub mod file_loader;
pub mod workspace_loader;

pub use error::LoadError;
pub use file_loader::{load_config, load_type_model};
pub use workspace_loader::WorkspaceLoader;
