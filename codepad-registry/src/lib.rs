//! CodePad Registry - static language and theme tables.
//!
//! Registries are populated once at startup and are read-only afterwards.
//! Lookups for unknown ids return an error rather than panicking, and every
//! registry exposes a default entry so callers always have a fallback.

mod access;
mod languages;
mod registry;
mod themes;

pub use access::{Entitlement, FREE_LANGUAGE};
pub use languages::LanguageRegistry;
pub use registry::{Entry, Registry, RegistryError};
pub use themes::{ThemeHost, ThemeRegistry, install_themes};
