use thiserror::Error;

#[derive(Error, Debug)]
pub enum RandoError {
    #[error("Invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: i64, max: i64 },

    #[error("Attempted to {operation} from an empty sequence")]
    EmptyInput { operation: &'static str },

    #[error("Cyclic module dependency among: {}", modules.join(", "))]
    CyclicDependency { modules: Vec<String> },

    #[error("Module '{module}' depends on unregistered module '{dependency}'")]
    UnknownDependency { module: String, dependency: String },

    #[error("Module '{name}' registered twice")]
    DuplicateModule { name: String },

    #[error("Asset '{asset}' is produced by both '{first}' and '{second}'")]
    ConflictingProducers { asset: String, first: String, second: String },

    #[error("Module '{module}' wrote undeclared asset '{asset}'")]
    UndeclaredAsset { module: String, asset: String },

    #[error("Pre-load module '{module}' cannot depend on per-save module '{dependency}'")]
    PassOrder { module: String, dependency: String },

    #[error("Module '{module}' requested a seeded stream before a save was loaded")]
    SeedUnavailable { module: String },

    #[error("Shop '{shop}' is not registered")]
    UnknownShop { shop: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RandoError {
    /// Configuration errors abort the pass they occur in.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRange { .. }
                | Self::CyclicDependency { .. }
                | Self::UnknownDependency { .. }
                | Self::DuplicateModule { .. }
                | Self::ConflictingProducers { .. }
                | Self::UndeclaredAsset { .. }
                | Self::PassOrder { .. }
        )
    }
}

pub type RandoResult<T> = Result<T, RandoError>;
