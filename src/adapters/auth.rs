//! Cosmos DB master-key authorization.
//!
//! Every REST call is signed with HMAC-SHA256 over the verb, resource type,
//! resource link and request date, keyed with the decoded account key.

use crate::utils::error::{AutoscaleError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

pub struct MasterKey {
    key: Vec<u8>,
}

impl MasterKey {
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let key = STANDARD.decode(encoded.trim()).map_err(|e| {
            AutoscaleError::InvalidConfigValueError {
                field: "authorization_key".to_string(),
                value: "<redacted>".to_string(),
                reason: format!("Key is not valid base64: {}", e),
            }
        })?;
        Ok(Self { key })
    }

    /// Builds the URL-encoded `authorization` header value.
    pub fn token(
        &self,
        verb: &str,
        resource_type: &str,
        resource_link: &str,
        date: &str,
    ) -> Result<String> {
        // offer 的 resource id 在簽章時必須是小寫
        let resource_link = if resource_type.eq_ignore_ascii_case("offers") {
            resource_link.to_lowercase()
        } else {
            resource_link.to_string()
        };

        let payload = format!(
            "{}\n{}\n{}\n{}\n\n",
            verb.to_lowercase(),
            resource_type.to_lowercase(),
            resource_link,
            date.to_lowercase()
        );

        let mut mac = HmacSha256::new_from_slice(&self.key).map_err(|e| {
            AutoscaleError::ProcessingError {
                message: format!("Cannot initialise HMAC: {}", e),
            }
        })?;
        mac.update(payload.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());

        let token = format!("type=master&ver=1.0&sig={}", signature);
        Ok(url::form_urlencoded::byte_serialize(token.as_bytes()).collect())
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MasterKey").field("key", &"<redacted>").finish()
    }
}

/// `x-ms-date` value, e.g. `Tue, 01 Nov 1994 08:12:31 GMT`.
pub fn rfc1123_now() -> String {
    chrono::Utc::now()
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}
