//! RFC 6238 TOTP on top of RFC 4226 HOTP, HMAC-SHA1 only.

use hmac_sha1::hmac_sha1;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use crate::base32;
use crate::error::TotpError;
use crate::secret;

const CODE_LEN: usize = 6;
const PERIOD: u64 = 30;

/// Code generator with the fixed parameters used by authenticator apps:
/// six digits, a 30 second period and HMAC-SHA1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totp {
    code_len: usize,
    period: u64,
}

impl Default for Totp {
    fn default() -> Self {
        Self {
            code_len: CODE_LEN,
            period: PERIOD,
        }
    }
}

impl Totp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn period(&self) -> u64 {
        self.period
    }

    /// Generate the code for the current wall-clock time.
    pub fn generate(&self, secret_or_uri: &str) -> Result<String, TotpError> {
        self.generate_at(secret_or_uri, unix_now()?)
    }

    /// Generate the code for `unix_seconds`.
    pub fn generate_at(&self, secret_or_uri: &str, unix_seconds: u64) -> Result<String, TotpError> {
        let key = base32::decode(&secret::resolve(secret_or_uri))?;
        if key.is_empty() {
            return Err(TotpError::InvalidSecret("decoded key is empty"));
        }

        let step = self.time_step_at(unix_seconds);
        debug!(step, key_len = key.len(), "computing TOTP");
        Ok(self.hotp(&key, step))
    }

    /// HOTP value for raw key bytes and a counter.
    pub fn hotp(&self, key: &[u8], counter: u64) -> String {
        let hash = hmac_sha1(key, &counter.to_be_bytes());
        let code = truncate(&hash) % 10u32.pow(self.code_len as u32);
        format!("{:0>width$}", code, width = self.code_len)
    }

    pub fn time_step_at(&self, unix_seconds: u64) -> u64 {
        unix_seconds / self.period
    }

    pub fn time_step(&self) -> Result<u64, TotpError> {
        Ok(self.time_step_at(unix_now()?))
    }

    /// Seconds until the code for `unix_seconds` expires, in `1..=period`.
    pub fn seconds_remaining_at(&self, unix_seconds: u64) -> u64 {
        self.period - unix_seconds % self.period
    }

    pub fn seconds_remaining(&self) -> Result<u64, TotpError> {
        Ok(self.seconds_remaining_at(unix_now()?))
    }
}

/// Dynamic truncation (RFC 4226 §5.3).
fn truncate(hash: &[u8; 20]) -> u32 {
    let offset = (hash[hash.len() - 1] & 0x0F) as usize;

    let mut window = [0u8; 4];
    window.copy_from_slice(&hash[offset..offset + 4]);
    u32::from_be_bytes(window) & 0x7FFF_FFFF
}

fn unix_now() -> Result<u64, TotpError> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

pub fn generate(secret_or_uri: &str) -> Result<String, TotpError> {
    Totp::default().generate(secret_or_uri)
}

pub fn generate_at(secret_or_uri: &str, unix_seconds: u64) -> Result<String, TotpError> {
    Totp::default().generate_at(secret_or_uri, unix_seconds)
}

pub fn hotp(key: &[u8], counter: u64) -> String {
    Totp::default().hotp(key, counter)
}

pub fn time_step_at(unix_seconds: u64) -> u64 {
    Totp::default().time_step_at(unix_seconds)
}

pub fn time_step() -> Result<u64, TotpError> {
    Totp::default().time_step()
}

pub fn seconds_remaining_at(unix_seconds: u64) -> u64 {
    Totp::default().seconds_remaining_at(unix_seconds)
}

pub fn seconds_remaining() -> Result<u64, TotpError> {
    Totp::default().seconds_remaining()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::DecodeError;

    const RFC_SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

    #[test]
    fn test_rfc6238_known_answer() {
        assert_eq!(generate_at(RFC_SECRET, 59).unwrap(), "287082");
        // The 16 character prefix only carries the ten byte key "1234567890".
        assert_eq!(generate_at("GEZDGNBVGY3TQOJQ", 59).unwrap(), "263420");
    }

    #[test]
    fn test_rfc6238_sha1_vectors() {
        // 8-digit reference values, last six digits.
        let cases = [
            (59, "287082"),
            (1111111109, "081804"),
            (1111111111, "050471"),
            (1234567890, "005924"),
            (2000000000, "279037"),
            (20000000000, "353130"),
        ];
        for (time, expected) in cases {
            assert_eq!(generate_at(RFC_SECRET, time).unwrap(), expected, "t={time}");
        }
    }

    #[test]
    fn test_rfc4226_hotp_vectors() {
        let expected = [
            "755224", "287082", "359152", "969429", "338314", "254676", "287922", "162583",
            "399871", "520489",
        ];
        for (counter, code) in expected.iter().enumerate() {
            assert_eq!(hotp(b"12345678901234567890", counter as u64), *code);
        }
    }

    #[test]
    fn test_truncate_rfc4226_example() {
        let hash = [
            0x1f, 0x86, 0x98, 0x69, 0x0e, 0x02, 0xca, 0x16, 0x61, 0x85, 0x50, 0xef, 0x7f, 0x19,
            0xda, 0x8e, 0x94, 0x5b, 0x55, 0x5a,
        ];
        assert_eq!(truncate(&hash), 0x50ef7f19);
        assert_eq!(truncate(&hash) % 1_000_000, 872921);
    }

    #[test]
    fn test_truncate_masks_sign_bit() {
        let mut hash = [0xFFu8; 20];
        hash[19] = 0xF0;
        assert_eq!(truncate(&hash), 0x7FFF_FFFF);
    }

    #[test]
    fn test_code_is_zero_padded() {
        // Counter 1234567890 / 30 for the RFC secret yields 5924.
        let code = generate_at(RFC_SECRET, 1234567890).unwrap();
        assert_eq!(code, "005924");
        assert_eq!(code.len(), 6);
    }

    #[test]
    fn test_window_boundaries() {
        let at_30 = generate_at(RFC_SECRET, 30).unwrap();
        let at_59 = generate_at(RFC_SECRET, 59).unwrap();
        assert_eq!(at_30, at_59);
        assert_eq!(generate_at(RFC_SECRET, 29).unwrap(), hotp(b"12345678901234567890", 0));
        assert_ne!(generate_at(RFC_SECRET, 29).unwrap(), at_30);
    }

    #[test]
    fn test_time_step_and_remaining() {
        assert_eq!(time_step_at(0), 0);
        assert_eq!(time_step_at(29), 0);
        assert_eq!(time_step_at(30), 1);
        assert_eq!(time_step_at(59), 1);
        assert_eq!(seconds_remaining_at(0), 30);
        assert_eq!(seconds_remaining_at(29), 1);
        assert_eq!(seconds_remaining_at(31), 29);
    }

    #[test]
    fn test_uri_and_raw_secret_agree() {
        let uri = "otpauth://totp/Example?secret=JBSWY3DPEHPK3PXP&issuer=X";
        assert_eq!(
            generate_at(uri, 1_700_000_000).unwrap(),
            generate_at("JBSWY3DPEHPK3PXP", 1_700_000_000).unwrap()
        );
    }

    #[test]
    fn test_lowercase_and_padded_secret() {
        let expected = generate_at("PIUDISEQYA", 1_700_000_000).unwrap();
        assert_eq!(generate_at("piudiseqya", 1_700_000_000).unwrap(), expected);
        assert_eq!(generate_at("PIUDISEQYA======", 1_700_000_000).unwrap(), expected);
    }

    #[test]
    fn test_malformed_uri_falls_back_to_decode_error() {
        let err = generate_at("otpauth://totp/Example?issuer=X", 59).unwrap_err();
        assert!(matches!(
            err,
            TotpError::Decode(DecodeError {
                character: ':',
                position: 7
            })
        ));
    }

    #[test]
    fn test_empty_key_is_invalid_secret() {
        assert!(matches!(generate_at("", 59), Err(TotpError::InvalidSecret(_))));
        assert!(matches!(generate_at("A", 59), Err(TotpError::InvalidSecret(_))));
        assert!(matches!(generate_at("====", 59), Err(TotpError::InvalidSecret(_))));
    }

    #[test]
    fn test_generate_now() {
        let code = generate("JBSWY3DPEHPK3PXP").unwrap();
        assert_eq!(code.len(), 6);
        assert!(code.bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn test_deterministic() {
        let first = generate_at("JBSWY3DPEHPK3PXP", 1_000_000).unwrap();
        let second = generate_at("JBSWY3DPEHPK3PXP", 1_000_000).unwrap();
        assert_eq!(first, second);
    }
}
