use thiserror::Error;
use van_api::{OwnerRefError, SpecError};

pub type Result<T> = std::result::Result<T, VanError>;

#[derive(Error, Debug)]
pub enum VanError {
    #[error("Failed to check deployment {namespace}/{name}: {source}")]
    Lookup {
        name: String,
        namespace: String,
        source: kube::Error,
    },

    #[error("Failed to create deployment {namespace}/{name}: {source}")]
    Create {
        name: String,
        namespace: String,
        source: kube::Error,
    },

    #[error("Owner reference error: {0}")]
    OwnerReference(#[from] OwnerRefError),

    #[error("Invalid site spec: {0}")]
    InvalidSpec(#[from] SpecError),
}
