//! Editor configuration.

use serde::Deserialize;
use smol_str::SmolStr;

/// Tunables for an [`Editor`](crate::engine::Editor).
///
/// Deserializes from partial documents; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Upper bound on replacements performed by one bulk find-and-replace.
    pub replace_iteration_cap: usize,
    /// Head symbols that make a list a definition form.
    pub definition_forms: Vec<SmolStr>,
    /// Separator placed between inserted top-level forms.
    pub top_level_separator: String,
    /// Separator placed between inserted nested forms.
    pub sibling_separator: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            replace_iteration_cap: 100,
            definition_forms: [
                "def",
                "defn",
                "defn-",
                "defmacro",
                "defmulti",
                "defmethod",
                "defonce",
                "defprotocol",
                "defrecord",
                "deftype",
                "definterface",
                "deftest",
            ]
            .into_iter()
            .map(SmolStr::new)
            .collect(),
            top_level_separator: "\n".to_string(),
            sibling_separator: " ".to_string(),
        }
    }
}

impl EditorConfig {
    /// Separator used between siblings whose parent has this kind
    pub fn separator_for(&self, parent_is_root: bool) -> &str {
        if parent_is_root {
            &self.top_level_separator
        } else {
            &self.sibling_separator
        }
    }
}
