use std::env;

/// Settings for the identity-provider trust domain.
///
/// Session tokens are verified networklessly against the provider's
/// published RSA public key; profile data that is missing from session
/// claims is fetched from the provider's backend API using `secret_key`.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    /// Expected `iss` claim of session tokens. Not validated when unset.
    pub issuer: Option<String>,
    /// Expected `aud` claim of session tokens. Not validated when unset.
    pub audience: Option<String>,
    /// PEM-encoded RSA public key for session verification. When unset,
    /// every provider session fails verification and requests resolve as
    /// anonymous.
    pub public_key_pem: Option<String>,
    /// Base URL of the provider's backend API.
    pub api_url: String,
    /// Server-side API key for the provider's backend API.
    pub secret_key: String,
    /// Name of the session cookie set by the provider's frontend SDK.
    pub session_cookie: String,
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        Self {
            issuer: env::var("PROVIDER_ISSUER").ok().filter(|s| !s.is_empty()),
            audience: env::var("PROVIDER_AUDIENCE").ok().filter(|s| !s.is_empty()),
            public_key_pem: env::var("PROVIDER_PUBLIC_KEY_PEM")
                .ok()
                .filter(|s| !s.is_empty()),
            api_url: env::var("PROVIDER_API_URL")
                .unwrap_or_else(|_| "https://api.clerk.com/v1".to_string()),
            secret_key: env::var("PROVIDER_SECRET_KEY").unwrap_or_default(),
            session_cookie: env::var("PROVIDER_SESSION_COOKIE")
                .unwrap_or_else(|_| "__session".to_string()),
        }
    }
}
