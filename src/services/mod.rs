// Service exports
pub mod artifact;

pub use artifact::{ArtifactError, ArtifactStore};
