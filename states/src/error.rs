use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("State not registered: {0}")]
    StateNotFound(&'static str),
    #[error("Compute not registered: {0}")]
    ComputeNotFound(&'static str),
    #[error("Command not registered: {0}")]
    CommandNotFound(&'static str),
}

impl StateError {
    pub fn state_not_found<T>() -> Self {
        Self::StateNotFound(std::any::type_name::<T>())
    }

    pub fn compute_not_found<T>() -> Self {
        Self::ComputeNotFound(std::any::type_name::<T>())
    }
}
