//! Auth configuration shared by the session handlers.

const DEFAULT_SESSION_TTL_SECONDS: i64 = 12 * 60 * 60;

#[derive(Clone, Debug)]
pub struct AuthConfig {
    session_ttl_seconds: i64,
    secure_cookies: bool,
}

impl AuthConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            secure_cookies: false,
        }
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: i64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }

    #[must_use]
    pub fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl_seconds
    }

    /// Only mark cookies Secure when the site is served over HTTPS.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.secure_cookies
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new()
    }
}
