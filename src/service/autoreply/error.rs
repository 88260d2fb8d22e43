#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolicyError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}
