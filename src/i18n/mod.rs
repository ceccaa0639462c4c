//! Internationalization (i18n) for the portfolio's two display languages.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the supported languages and their metadata
//! - `language`: Type-safe `Language` handle validated against the registry
//! - `strings`: Localized strings produced by the script itself (form status,
//!   sending indicator, menu label). Page copy lives in the markup as
//!   `data-text-*` payloads and never passes through here.
//!
//! # Example
//!
//! ```rust
//! use portfolio_site::i18n::{Language, LanguageStrings};
//!
//! let hindi = Language::from_code("hi").unwrap();
//! assert_eq!(hindi.other(), Language::ENGLISH);
//! assert!(!LanguageStrings::for_language(hindi).send_success.is_empty());
//! ```

mod language;
mod registry;
pub mod strings;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::LanguageStrings;
