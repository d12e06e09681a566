use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A category needs more items than the repository holds for it.
    InsufficientItems { category: String, required: usize, available: usize },
    /// The mask names a category the item repository (or pool) does not have.
    CategoryNotFound(String),
    /// A pool ran dry while filling. Counting and pool sizing diverged.
    PoolExhausted(String),
    /// A pool still holds items after every cell was filled.
    LeftoverItems { category: String, remaining: usize },
}

impl EngineError {
    /// Category the error refers to.
    pub fn category(&self) -> &str {
        match self {
            Self::InsufficientItems { category, .. } => category,
            Self::CategoryNotFound(category) => category,
            Self::PoolExhausted(category) => category,
            Self::LeftoverItems { category, .. } => category,
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientItems { category, required, available } => {
                write!(
                    f,
                    "category '{category}': mask needs {required} item(s), repository has {available}"
                )
            }
            Self::CategoryNotFound(category) => {
                write!(f, "category '{category}' not found in item repository")
            }
            Self::PoolExhausted(category) => {
                write!(f, "pool for category '{category}' exhausted before grid was filled")
            }
            Self::LeftoverItems { category, remaining } => {
                write!(f, "pool for category '{category}' has {remaining} unused item(s)")
            }
        }
    }
}

impl std::error::Error for EngineError {}
