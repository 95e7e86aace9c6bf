//! Transport error shared by every API call
//!
//! The backend answers failures as `{"detail": ...}`, where `detail` is either
//! a message string or a list of validation entries.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Failed API request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{}", self.describe())]
pub struct ApiError {
    /// HTTP status, `None` when the request never got a response
    pub status: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

/// Coarse classification used by callers to pick a reaction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    SessionExpired,
    Validation,
    NotFound,
    Server,
    Network,
    Other,
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            detail: None,
        }
    }

    /// Build from a non-2xx response. `body` is the parsed JSON body, if any.
    pub fn from_status(status: u16, status_text: &str, body: Option<Value>) -> Self {
        let detail = body.and_then(|mut b| b.get_mut("detail").map(Value::take));
        let message = if status_text.is_empty() {
            format!("Request failed with status code {}", status)
        } else {
            format!("HTTP {}: {}", status, status_text)
        };
        Self {
            status: Some(status),
            message,
            detail,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self.status {
            None => ErrorKind::Network,
            Some(401) => ErrorKind::SessionExpired,
            Some(422) => ErrorKind::Validation,
            Some(404) => ErrorKind::NotFound,
            Some(500..=599) => ErrorKind::Server,
            Some(_) => ErrorKind::Other,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        self.kind() == ErrorKind::SessionExpired
    }

    /// Backend `detail` when it is a plain message, else the transport message
    pub fn describe(&self) -> String {
        match &self.detail {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => self.message.clone(),
        }
    }

    /// Message shown after a failed create or update
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::SessionExpired => {
                "Sesi login Anda telah berakhir. Silakan login kembali.".to_string()
            }
            ErrorKind::Validation => {
                let payload = self
                    .detail
                    .as_ref()
                    .and_then(|d| serde_json::to_string_pretty(d).ok())
                    .unwrap_or_else(|| self.message.clone());
                format!("Gagal menyimpan data. Periksa format input Anda:\n{}", payload)
            }
            _ => format!("Gagal menyimpan data: {}", self.describe()),
        }
    }

    /// Get severity level for UI styling
    pub fn severity(&self) -> ErrorSeverity {
        match self.status {
            Some(404) => ErrorSeverity::Info,
            Some(400..=499) => ErrorSeverity::Warning,
            Some(_) | None => ErrorSeverity::Error,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self.kind() {
            ErrorKind::SessionExpired => "🔐",
            ErrorKind::Validation => "⚠️",
            ErrorKind::NotFound => "🔍",
            ErrorKind::Network => "📡",
            _ => "❌",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

impl ErrorSeverity {
    pub fn class(&self) -> &'static str {
        match self {
            ErrorSeverity::Info => "alert-info",
            ErrorSeverity::Warning => "alert-warning",
            ErrorSeverity::Error => "alert-error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_from_status() {
        assert_eq!(ApiError::from_status(401, "", None).kind(), ErrorKind::SessionExpired);
        assert_eq!(ApiError::from_status(422, "", None).kind(), ErrorKind::Validation);
        assert_eq!(ApiError::from_status(404, "", None).kind(), ErrorKind::NotFound);
        assert_eq!(ApiError::from_status(502, "", None).kind(), ErrorKind::Server);
        assert_eq!(ApiError::from_status(400, "", None).kind(), ErrorKind::Other);
        assert_eq!(ApiError::network("offline").kind(), ErrorKind::Network);
    }

    #[test]
    fn test_detail_is_extracted_from_body() {
        let body = json!({"detail": "NO sudah ada"});
        let err = ApiError::from_status(400, "Bad Request", Some(body));
        assert_eq!(err.describe(), "NO sudah ada");
        assert_eq!(err.user_message(), "Gagal menyimpan data: NO sudah ada");
    }

    #[test]
    fn test_generic_message_falls_back_to_transport() {
        let err = ApiError::from_status(500, "Internal Server Error", None);
        assert_eq!(
            err.user_message(),
            "Gagal menyimpan data: HTTP 500: Internal Server Error"
        );
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_validation_message_shows_raw_payload() {
        let body = json!({
            "detail": [{"loc": ["body", "usia"], "msg": "value is not a valid integer"}]
        });
        let err = ApiError::from_status(422, "Unprocessable Entity", Some(body));
        let msg = err.user_message();
        assert!(msg.starts_with("Gagal menyimpan data. Periksa format input Anda:\n"));
        assert!(msg.contains("value is not a valid integer"));
        assert_eq!(err.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_severity_and_display() {
        let body = json!({"detail": "Petani tidak ditemukan"});
        let missing = ApiError::from_status(404, "Not Found", Some(body));
        assert_eq!(missing.severity(), ErrorSeverity::Info);
        assert_eq!(missing.severity().class(), "alert-info");
        assert_eq!(missing.to_string(), "Petani tidak ditemukan");

        let offline = ApiError::network("Network Error");
        assert_eq!(offline.severity(), ErrorSeverity::Error);
        assert_eq!(offline.to_string(), "Network Error");
    }

    #[test]
    fn test_session_expired_message() {
        let err = ApiError::from_status(401, "Unauthorized", None);
        assert!(err.is_session_expired());
        assert_eq!(
            err.user_message(),
            "Sesi login Anda telah berakhir. Silakan login kembali."
        );
        assert_eq!(err.icon(), "🔐");
    }
}
