//! Editor color themes.

use serde::Serialize;

/// Built-in editor theme a custom definition extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BaseTheme {
    VsDark,
    Vs,
    HcBlack,
}

impl BaseTheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VsDark => "vs-dark",
            Self::Vs => "vs",
            Self::HcBlack => "hc-black",
        }
    }
}

/// A single token coloring rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRule {
    pub token: &'static str,
    /// Hex color without the leading `#`.
    pub foreground: &'static str,
    pub font_style: Option<&'static str>,
}

impl TokenRule {
    pub const fn new(token: &'static str, foreground: &'static str) -> Self {
        Self { token, foreground, font_style: None }
    }

    pub const fn styled(
        token: &'static str,
        foreground: &'static str,
        font_style: &'static str,
    ) -> Self {
        Self { token, foreground, font_style: Some(font_style) }
    }
}

/// Custom theme definition handed to the editor widget by the installer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeDefinition {
    pub base: BaseTheme,
    pub inherit: bool,
    pub rules: Vec<TokenRule>,
    /// Widget color overrides (`"editor.background"` -> `"#1e1e1e"`).
    pub colors: Vec<(&'static str, &'static str)>,
}

/// An editor color theme entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeConfig {
    pub id: &'static str,
    pub label: &'static str,
    /// Decorative swatch shown next to the label.
    pub swatch_color: &'static str,
    /// Present for themes the editor does not ship with.
    pub definition: Option<ThemeDefinition>,
    pub description: &'static str,
}

impl ThemeConfig {
    /// Whether this theme needs to be installed before use.
    pub fn is_custom(&self) -> bool {
        self.definition.is_some()
    }
}
