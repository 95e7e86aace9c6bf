use kopintar_common::session::{TokenResponse, INVALID_CREDENTIALS, LOGIN_FAILED};
use kopintar_common::ApiError;

use super::ApiClient;

impl ApiClient {
    /// OAuth2 password grant against `POST /token`
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        self.post_form("/token", &[("username", username), ("password", password)])
            .await
    }
}

/// Message shown in the login dialog for a failed attempt
pub fn login_error_message(error: &ApiError) -> &'static str {
    if error.status == Some(401) {
        INVALID_CREDENTIALS
    } else {
        LOGIN_FAILED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_error_message() {
        let unauthorized = ApiError::from_status(401, "Unauthorized", None);
        assert_eq!(login_error_message(&unauthorized), INVALID_CREDENTIALS);

        let server = ApiError::from_status(500, "Internal Server Error", None);
        assert_eq!(login_error_message(&server), LOGIN_FAILED);
        assert_eq!(login_error_message(&ApiError::network("offline")), LOGIN_FAILED);
    }
}
