use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid footer color {0:?}: expected #RRGGBB hex")]
    InvalidColor(String),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
