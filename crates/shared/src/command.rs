#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("please select at least one ingredient")]
    EmptySelection,

    #[error("no pantry ingredient is safe for your allergies")]
    NoSafeIngredients,

    #[error("every recipe found contains one of your allergens")]
    AllAllergenic,

    #[error("invalid assignment: {0}")]
    InvalidAssignment(String),

    #[error("{0}")]
    Validate(#[from] validator::ValidationErrors),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Provider(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn is_provider(&self) -> bool {
        matches!(self, Error::Provider(_))
    }
}

#[macro_export]
macro_rules! not_found {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::NotFound(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::NotFound(format!($fmt, $($arg)*)))
    };
}

#[macro_export]
macro_rules! invalid_assignment {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::InvalidAssignment(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::InvalidAssignment(format!($fmt, $($arg)*)))
    };
}
