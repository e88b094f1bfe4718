use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Why a cook did not start. These are answers, not faults: when one of
/// these comes back, nothing was deducted and nothing was written.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartRefusal {
    #[error("a cook is already in progress")]
    AlreadyCooking,

    #[error("missing ingredients")]
    MissingIngredients,

    #[error("not enough energy")]
    InsufficientEnergy,

    #[error("recipe not in catalog")]
    UnknownRecipe,
}
