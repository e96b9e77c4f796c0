//! Access token issuance.
//!
//! HS256-signed JWTs whose claims are the caller-supplied JSON object plus
//! `iat` and `exp`.

use anyhow::{Context, Result};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};

/// Access token lifetime in seconds (1 hour).
pub const ACCESS_TOKEN_LIFETIME: i64 = 3600;

/// Claims managed by the service; caller values for these are replaced.
const RESERVED_CLAIMS: [&str; 2] = ["iat", "exp"];

/// Token signing service.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    /// Create a token service with HMAC-SHA256 signing.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Sign `subject` as the token's claims, valid for one hour.
    pub fn issue(&self, subject: Map<String, Value>) -> Result<String> {
        let now = chrono::Utc::now().timestamp();

        let mut claims = subject;
        for key in RESERVED_CLAIMS {
            claims.remove(key);
        }
        claims.insert("iat".to_string(), Value::from(now));
        claims.insert("exp".to_string(), Value::from(now + ACCESS_TOKEN_LIFETIME));

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .context("failed to encode access token")
    }

    /// Verify a token's signature and expiry and return its claims.
    pub fn verify(&self, token: &str) -> Result<Map<String, Value>> {
        let validation = Validation::new(Algorithm::HS256);
        let data = jsonwebtoken::decode::<Map<String, Value>>(token, &self.decoding_key, &validation)
            .context("invalid token")?;
        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService").finish()
    }
}
