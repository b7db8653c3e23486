//! Built-in editor themes and the installer that registers custom ones.

use codepad_api::{BaseTheme, ThemeConfig, ThemeDefinition, TokenRule};

use crate::Registry;

/// Registry of editor themes.
pub type ThemeRegistry = Registry<ThemeConfig>;

impl Registry<ThemeConfig> {
    /// The themes the playground ships with. `vs-dark` is the default.
    pub fn builtin() -> Self {
        Self::from_static(builtin_themes())
    }
}

/// The editor widget side of theme installation.
///
/// Implemented by whatever hosts the live editor; the registry only knows how
/// to describe themes, not how to apply them.
pub trait ThemeHost {
    /// Register a custom theme under `id`.
    fn define_theme(&mut self, id: &str, definition: &ThemeDefinition) -> anyhow::Result<()>;
}

/// Register every custom theme with the host. Themes without a definition
/// ship with the editor and are skipped. Returns the number installed.
pub fn install_themes(registry: &ThemeRegistry, host: &mut dyn ThemeHost) -> usize {
    let mut installed = 0;
    for theme in registry.list() {
        let Some(definition) = &theme.definition else {
            continue;
        };
        match host.define_theme(theme.id, definition) {
            Ok(()) => {
                tracing::debug!("Installed editor theme {}", theme.id);
                installed += 1;
            }
            Err(e) => tracing::warn!("Failed to install editor theme {}: {}", theme.id, e),
        }
    }
    installed
}

fn builtin_themes() -> Vec<ThemeConfig> {
    vec![
        ThemeConfig {
            id: "vs-dark",
            label: "VS Dark",
            swatch_color: "#1e1e1e",
            definition: None,
            description: "Classic dark theme",
        },
        ThemeConfig {
            id: "vs-light",
            label: "VS Light",
            swatch_color: "#ffffff",
            definition: None,
            description: "Clean light theme",
        },
        ThemeConfig {
            id: "github-dark",
            label: "GitHub Dark",
            swatch_color: "#0d1117",
            definition: Some(ThemeDefinition {
                base: BaseTheme::VsDark,
                inherit: true,
                rules: vec![
                    TokenRule::styled("comment", "6e7681", "italic"),
                    TokenRule::new("string", "a5d6ff"),
                    TokenRule::new("keyword", "ff7b72"),
                    TokenRule::new("number", "79c0ff"),
                    TokenRule::new("type", "ffa657"),
                    TokenRule::new("class", "ffa657"),
                    TokenRule::new("function", "d2a8ff"),
                    TokenRule::new("variable", "ffa657"),
                    TokenRule::new("operator", "ff7b72"),
                ],
                colors: vec![
                    ("editor.background", "#0d1117"),
                    ("editor.foreground", "#c9d1d9"),
                    ("editor.lineHighlightBackground", "#161b22"),
                    ("editorLineNumber.foreground", "#6e7681"),
                    ("editorIndentGuide.background", "#21262d"),
                    ("editor.selectionBackground", "#264f78"),
                    ("editor.inactiveSelectionBackground", "#264f7855"),
                ],
            }),
            description: "GitHub's dark theme",
        },
        ThemeConfig {
            id: "monokai",
            label: "Monokai",
            swatch_color: "#272822",
            definition: Some(ThemeDefinition {
                base: BaseTheme::VsDark,
                inherit: true,
                rules: vec![
                    TokenRule::styled("comment", "75715E", "italic"),
                    TokenRule::new("string", "E6DB74"),
                    TokenRule::new("keyword", "F92672"),
                    TokenRule::new("number", "AE81FF"),
                    TokenRule::styled("type", "66D9EF", "italic"),
                    TokenRule::new("class", "A6E22E"),
                    TokenRule::new("function", "A6E22E"),
                    TokenRule::new("variable", "F8F8F2"),
                    TokenRule::new("operator", "F92672"),
                ],
                colors: vec![
                    ("editor.background", "#272822"),
                    ("editor.foreground", "#F8F8F2"),
                    ("editorLineNumber.foreground", "#75715E"),
                    ("editor.selectionBackground", "#49483E"),
                    ("editor.lineHighlightBackground", "#3E3D32"),
                    ("editorCursor.foreground", "#F8F8F2"),
                    ("editor.selectionHighlightBackground", "#49483E"),
                ],
            }),
            description: "Popular dark theme with vibrant colors",
        },
        ThemeConfig {
            id: "solarized-dark",
            label: "Solarized Dark",
            swatch_color: "#002b36",
            definition: Some(ThemeDefinition {
                base: BaseTheme::VsDark,
                inherit: true,
                rules: vec![
                    TokenRule::styled("comment", "586e75", "italic"),
                    TokenRule::new("string", "2aa198"),
                    TokenRule::new("keyword", "859900"),
                    TokenRule::new("number", "d33682"),
                    TokenRule::new("type", "b58900"),
                    TokenRule::new("class", "b58900"),
                    TokenRule::new("function", "268bd2"),
                    TokenRule::new("variable", "b58900"),
                    TokenRule::new("operator", "859900"),
                ],
                colors: vec![
                    ("editor.background", "#002b36"),
                    ("editor.foreground", "#839496"),
                    ("editorLineNumber.foreground", "#586e75"),
                    ("editor.selectionBackground", "#073642"),
                    ("editor.lineHighlightBackground", "#073642"),
                    ("editorCursor.foreground", "#839496"),
                    ("editor.selectionHighlightBackground", "#073642"),
                ],
            }),
            description: "Eye-friendly dark theme",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingHost {
        defined: Vec<String>,
        reject: Option<&'static str>,
    }

    impl ThemeHost for RecordingHost {
        fn define_theme(&mut self, id: &str, _definition: &ThemeDefinition) -> anyhow::Result<()> {
            if self.reject == Some(id) {
                anyhow::bail!("rejected");
            }
            self.defined.push(id.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_builtin_default_theme() {
        let registry = ThemeRegistry::builtin();
        assert_eq!(registry.default_entry().id, "vs-dark");
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_builtin_ids_unique() {
        assert!(ThemeRegistry::new(builtin_themes()).is_ok());
    }

    #[test]
    fn test_install_themes_only_custom() {
        let registry = ThemeRegistry::builtin();
        let mut host = RecordingHost::default();
        let installed = install_themes(&registry, &mut host);
        assert_eq!(installed, 3);
        assert_eq!(host.defined, vec!["github-dark", "monokai", "solarized-dark"]);
    }

    #[test]
    fn test_install_themes_skips_failures() {
        let registry = ThemeRegistry::builtin();
        let mut host = RecordingHost {
            reject: Some("monokai"),
            ..Default::default()
        };
        let installed = install_themes(&registry, &mut host);
        assert_eq!(installed, 2);
        assert!(!host.defined.iter().any(|id| id == "monokai"));
    }

    #[test]
    fn test_unknown_theme_error() {
        let registry = ThemeRegistry::builtin();
        assert_eq!(registry.get("dracula").unwrap_err().to_string(), "unknown theme: dracula");
    }
}
