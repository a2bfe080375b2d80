//! Italian fiscal code (codice fiscale) recognition and validation.
//!
//! This crate finds, validates, and normalizes the 16-character personal tax
//! identifier, including codes altered by omocodia (digits replaced by
//! letters to resolve collisions).
//!
//! # Features
//!
//! - Zoned grammar matcher with leftmost search over arbitrary text
//! - Official odd/even control character tables
//! - Omocodia normalization back to canonical digits
//! - Lenient or strict extraction, with a `verified` tag on every result
//!
//! # Example
//!
//! ```
//! use cfx_core::{CodeExtractor, checksum, omocodia};
//!
//! let found = CodeExtractor::lenient()
//!     .extract("Paziente: MRTMRA85M01H5Q1R - Cartella 123")
//!     .unwrap();
//! assert!(found.verified);
//! assert_eq!(found.normalized().as_str(), "MRTMRA85M01H501R");
//!
//! assert_eq!(checksum::compute_cin("RSSMRA80A01H501"), 'U');
//! assert_eq!(omocodia::normalize("MRTMRA85M01H5Q1Z"), "MRTMRA85M01H501Z");
//! ```

pub mod checksum;
mod code;
mod error;
pub mod extract;
pub mod grammar;
pub mod omocodia;

pub use code::{BODY_LEN, CODE_LEN, FiscalCode, Zone};
pub use error::{CodeError, Result};
pub use extract::{ChecksumPolicy, CodeExtractor, Extraction, extract};
