use std::borrow::Cow;

use tracing::{debug, warn};
use url::Url;

const OTPAUTH_SCHEME: &str = "otpauth://";

/// Picks the base32 secret out of a raw secret or an `otpauth://` URI.
///
/// URIs without a usable `secret` query parameter fall back to the whole
/// input, which then has to decode as base32 on its own.
pub fn resolve(secret_or_uri: &str) -> Cow<'_, str> {
    if !secret_or_uri.starts_with(OTPAUTH_SCHEME) {
        debug!("using raw base32 secret");
        return Cow::Borrowed(secret_or_uri);
    }

    match Url::parse(secret_or_uri) {
        Ok(url) => match url
            .query_pairs()
            .find(|(key, _)| key == "secret")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
        {
            Some(secret) => {
                debug!("using secret from otpauth URI");
                Cow::Owned(secret)
            }
            None => {
                warn!("otpauth URI has no secret parameter, decoding input as-is");
                Cow::Borrowed(secret_or_uri)
            }
        },
        Err(e) => {
            warn!("failed to parse otpauth URI ({e}), decoding input as-is");
            Cow::Borrowed(secret_or_uri)
        }
    }
}
