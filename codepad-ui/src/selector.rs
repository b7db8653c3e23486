//! Rows for the language and theme pickers.

use serde::Serialize;

use codepad_registry::{Entitlement, LanguageRegistry, ThemeRegistry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageOption {
    pub id: &'static str,
    pub label: &'static str,
    pub icon_path: &'static str,
    pub selected: bool,
    /// Shown with a lock; choosing it requires full access.
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeOption {
    pub id: &'static str,
    pub label: &'static str,
    pub swatch_color: &'static str,
    pub selected: bool,
}

/// Language rows in registry order.
pub fn language_options(
    registry: &LanguageRegistry,
    current: &str,
    entitlement: &Entitlement,
) -> Vec<LanguageOption> {
    registry
        .list()
        .map(|lang| LanguageOption {
            id: lang.id,
            label: lang.label,
            icon_path: lang.icon_path,
            selected: lang.id == current,
            locked: entitlement.is_locked(lang.id),
        })
        .collect()
}

pub fn theme_options(registry: &ThemeRegistry, current: &str) -> Vec<ThemeOption> {
    registry
        .list()
        .map(|theme| ThemeOption {
            id: theme.id,
            label: theme.label,
            swatch_color: theme.swatch_color,
            selected: theme.id == current,
        })
        .collect()
}
