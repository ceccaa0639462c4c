//! Interactive layer of a bilingual personal portfolio site.
//!
//! The page logic is written against small platform traits ([`dom::Element`],
//! [`dom::Window`], [`schedule::Scheduler`], [`prefs::PreferenceStore`],
//! [`animation::Animator`], [`relay::EmailRelay`]). The `web` module binds
//! them to the browser when compiled for `wasm32`; the in-memory
//! implementations drive the same code in tests.

pub mod animation;
pub mod app;
pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod page;
pub mod particles;
pub mod prefs;
pub mod relay;
pub mod schedule;
pub mod state;
pub mod validation;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::{dispatch_scroll, submit_contact, App, Services};
pub use config::Config;
pub use error::{RelayError, SubmitBlocked};
