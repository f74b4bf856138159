//! Application-wide error types.

use thiserror::Error;

use crate::calendar::CalendarError;
use crate::content::ContentError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("content error: {0}")]
    Content(#[from] ContentError),

    #[error("calendar error: {0}")]
    Calendar(#[from] CalendarError),

    #[error("server error: {0}")]
    Server(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn config_error_display() {
        let e = AppError::Config("missing field".into());
        assert!(e.to_string().contains("missing field"));
        assert!(e.to_string().starts_with("config error"));
    }

    #[test]
    fn logger_error_display() {
        let e = AppError::Logger("already initialized".into());
        assert!(e.to_string().contains("already initialized"));
    }

    #[test]
    fn content_error_converts() {
        let e: AppError = ContentError::Request("connection refused".into()).into();
        assert!(e.to_string().contains("content error"));
        assert!(e.to_string().contains("connection refused"));
    }

    #[test]
    fn calendar_error_converts() {
        let e: AppError = CalendarError::Decode("expected object".into()).into();
        assert!(e.to_string().contains("calendar error"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let e: AppError = io_err.into();
        assert!(e.to_string().contains("io error"));
        let _: &dyn Error = &e;
    }
}
