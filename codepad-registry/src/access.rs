//! Language entitlement gating.
//!
//! The identity provider decides whether a user has full access; free users
//! may only pick [`FREE_LANGUAGE`]. Gating happens before `set_language` is
//! called, so the store itself never enforces it.

/// The language available without full access.
pub const FREE_LANGUAGE: &str = "javascript";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Entitlement {
    pub full_access: bool,
}

impl Entitlement {
    pub const FULL: Self = Self { full_access: true };
    pub const FREE: Self = Self { full_access: false };

    pub fn can_select(&self, language_id: &str) -> bool {
        self.full_access || language_id == FREE_LANGUAGE
    }

    /// Whether a selector row for `language_id` should render as locked.
    pub fn is_locked(&self, language_id: &str) -> bool {
        !self.can_select(language_id)
    }
}
