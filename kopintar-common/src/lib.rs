//! Common types and logic shared by the Kopintar web client
//!
//! Everything here is free of browser APIs so it can be unit tested natively.

pub mod cluster;
pub mod dashboard;
pub mod edit;
pub mod error;
pub mod export;
pub mod form;
pub mod listing;
pub mod locale;
pub mod petani;
pub mod recommendation;
pub mod session;
pub mod wordcloud;

pub use error::{ApiError, ErrorKind, ErrorSeverity};
pub use petani::PetaniRecord;
pub use session::{guard, DeferredActions, Guarded, PendingAction, Session, TokenStore};

/// Client-side error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{}", .0.user_message())]
    Api(#[from] ApiError),

    #[error("ID petani tidak ditemukan!")]
    MissingRecordId,

    #[error("Anda harus login terlebih dahulu!")]
    NotLoggedIn,

    #[error("{0}")]
    Form(String),

    #[error("{0}")]
    Export(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_uses_localized_text() {
        assert_eq!(Error::MissingRecordId.to_string(), "ID petani tidak ditemukan!");
        assert_eq!(
            Error::NotLoggedIn.to_string(),
            "Anda harus login terlebih dahulu!"
        );
    }

    #[test]
    fn test_api_error_converts() {
        let err: Error = ApiError::from_status(401, "Unauthorized", None).into();
        assert!(matches!(err, Error::Api(_)));
        assert_eq!(
            err.to_string(),
            "Sesi login Anda telah berakhir. Silakan login kembali."
        );
    }
}
