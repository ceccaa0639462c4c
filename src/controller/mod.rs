//! Page controllers.
//!
//! Each controller is built from explicit element handles and owns no
//! application state: the coordinator passes in the slice of
//! [`crate::state::AppState`] a call may read or change.

pub mod form;
pub mod language;
pub mod menu;
pub mod navigation;
pub mod scroll;
pub mod theme;

pub use form::{ContactField, FormController};
pub use language::LanguageController;
pub use menu::MenuController;
pub use navigation::NavigationController;
pub use scroll::ScrollEffects;
pub use theme::ThemeController;
