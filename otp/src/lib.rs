//! Time-based one-time passwords (RFC 6238) for authenticator secrets.
//!
//! ```no_run
//! let code = totp_gen::generate("otpauth://totp/Example?secret=JBSWY3DPEHPK3PXP&issuer=X")?;
//! println!("{code}");
//! # Ok::<(), totp_gen::TotpError>(())
//! ```

pub mod base32;
pub mod config;
pub mod error;
pub mod secret;
pub mod totp;

pub use config::Config;
pub use error::{ConfigError, DecodeError, TotpError};
pub use totp::{generate, generate_at, hotp, Totp};
