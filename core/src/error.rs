use thiserror::Error;

/// Rejections of a client request, the display string is sent on the wire
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid action")]
    InvalidAction(std::string::String),
    #[error("delayMinutes must be > 0")]
    InvalidDelay,
    #[error("delayMinutes is out of range")]
    DelayOutOfRange(f64),
}
