//! OAuth 1.0a request signing
//!
//! User-context Twitter requests carry an `Authorization: OAuth ...` header
//! whose HMAC-SHA1 signature covers the method, the base URL and every query
//! and form parameter.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::RngCore;
use secrecy::{ExposeSecret, SecretString};
use sha1::Sha1;

use crate::config::Config;
use crate::error::PlatformError;
use crate::platforms::PlatformResult;

/// RFC 3986 unreserved characters pass through; everything else is encoded
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// The four credentials of an OAuth 1.0a user context
pub struct OAuthSigner {
    consumer_key: String,
    consumer_secret: SecretString,
    token: String,
    token_secret: SecretString,
}

impl std::fmt::Debug for OAuthSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthSigner")
            .field("consumer_key", &self.consumer_key)
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

impl OAuthSigner {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        token: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: SecretString::from(consumer_secret.into()),
            token: token.into(),
            token_secret: SecretString::from(token_secret.into()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.consumer_key.clone(),
            config.consumer_secret.clone(),
            config.token.clone(),
            config.token_secret.clone(),
        )
    }

    /// Build the `Authorization` header value for a request
    ///
    /// `url` must not include a query string; query and form parameters go
    /// in `params`.
    pub fn authorization_header(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
    ) -> PlatformResult<String> {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_err(|e| PlatformError::Authentication(format!("Failed to get timestamp: {e}")))?
            .as_secs()
            .to_string();

        self.sign_with(method, url, params, &generate_nonce(), &timestamp)
    }

    fn sign_with(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
        nonce: &str,
        timestamp: &str,
    ) -> PlatformResult<String> {
        let mut oauth_params = vec![
            ("oauth_consumer_key".to_string(), self.consumer_key.clone()),
            ("oauth_nonce".to_string(), nonce.to_string()),
            ("oauth_signature_method".to_string(), "HMAC-SHA1".to_string()),
            ("oauth_timestamp".to_string(), timestamp.to_string()),
            ("oauth_token".to_string(), self.token.clone()),
            ("oauth_version".to_string(), "1.0".to_string()),
        ];

        let signature = self.signature(method, url, &oauth_params, params)?;
        oauth_params.push(("oauth_signature".to_string(), signature));

        let header = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!("OAuth {header}"))
    }

    fn signature(
        &self,
        method: &str,
        url: &str,
        oauth_params: &[(String, String)],
        params: &[(String, String)],
    ) -> PlatformResult<String> {
        // Parameters are sorted by encoded key, then encoded value
        let mut encoded: Vec<(String, String)> = oauth_params
            .iter()
            .chain(params)
            .map(|(k, v)| (percent_encode(k), percent_encode(v)))
            .collect();
        encoded.sort();

        let param_string = encoded
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        let base_string = format!(
            "{}&{}&{}",
            method.to_uppercase(),
            percent_encode(url),
            percent_encode(&param_string)
        );

        let signing_key = format!(
            "{}&{}",
            percent_encode(self.consumer_secret.expose_secret()),
            percent_encode(self.token_secret.expose_secret())
        );

        hmac_sha1(&signing_key, &base_string)
    }
}

fn percent_encode(s: &str) -> String {
    utf8_percent_encode(s, OAUTH_ENCODE_SET).to_string()
}

fn generate_nonce() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn hmac_sha1(key: &str, data: &str) -> PlatformResult<String> {
    type HmacSha1 = Hmac<Sha1>;

    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| PlatformError::Authentication(e.to_string()))?;
    mac.update(data.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("hello world"), "hello%20world");
        assert_eq!(percent_encode("foo=bar&baz"), "foo%3Dbar%26baz");
        assert_eq!(percent_encode("test-value_123.txt"), "test-value_123.txt");
        assert_eq!(percent_encode("~tilde"), "~tilde");
        assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
        assert_eq!(percent_encode("☃"), "%E2%98%83");
    }

    #[test]
    fn test_generate_nonce() {
        let nonce1 = generate_nonce();
        let nonce2 = generate_nonce();

        assert_ne!(nonce1, nonce2);
        assert_eq!(nonce1.len(), 32);
        assert!(nonce1.chars().all(|c| c.is_ascii_hexdigit()));
    }

    // Worked example from Twitter's "Creating a signature" documentation
    #[test]
    fn test_signature_matches_documented_example() {
        let signer = OAuthSigner::new(
            "xvz1evFS4wEEPTGEFPHBog",
            "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
            "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
            "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
        );
        let oauth_params = pairs(&[
            ("oauth_consumer_key", "xvz1evFS4wEEPTGEFPHBog"),
            ("oauth_nonce", "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg"),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", "1318622958"),
            ("oauth_token", "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb"),
            ("oauth_version", "1.0"),
        ]);
        let params = pairs(&[
            ("include_entities", "true"),
            (
                "status",
                "Hello Ladies + Gentlemen, a signed OAuth request!",
            ),
        ]);

        let signature = signer
            .signature(
                "POST",
                "https://api.twitter.com/1.1/statuses/update.json",
                &oauth_params,
                &params,
            )
            .unwrap();

        assert_eq!(signature, "hCtSmYh+iHYCEqBWrE7C7hYmtUk=");
    }

    #[test]
    fn test_authorization_header_shape() {
        let signer = OAuthSigner::new("ck", "cs", "tok", "ts");
        let header = signer
            .authorization_header(
                "GET",
                "https://api.twitter.com/1.1/statuses/user_timeline.json",
                &pairs(&[("screen_name", "someone")]),
            )
            .unwrap();

        assert!(header.starts_with("OAuth "));
        assert!(header.contains("oauth_consumer_key=\"ck\""));
        assert!(header.contains("oauth_token=\"tok\""));
        assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
        assert!(header.contains("oauth_signature="));
        assert!(header.contains("oauth_timestamp="));
        assert!(header.contains("oauth_nonce="));
        assert!(!header.contains("screen_name"));
    }

    #[test]
    fn test_fixed_inputs_sign_deterministically() {
        let signer = OAuthSigner::new("ck", "cs", "tok", "ts");
        let a = signer
            .sign_with("GET", "https://example.com/x", &[], "nonce", "1")
            .unwrap();
        let b = signer
            .sign_with("GET", "https://example.com/x", &[], "nonce", "1")
            .unwrap();
        let c = signer
            .sign_with("POST", "https://example.com/x", &[], "nonce", "1")
            .unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_debug_hides_secrets() {
        let signer = OAuthSigner::new("ck", "very-secret", "tok", "also-secret");
        let debug = format!("{:?}", signer);
        assert!(!debug.contains("very-secret"));
        assert!(!debug.contains("also-secret"));
    }
}
