//! The declarative UI spec tree (§3).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Root of a declarative UI spec tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSpec {
    /// Spec format version, free-form.
    pub version: String,
    /// Document title, defaults to `"Loom App"` when absent (§6.3).
    #[serde(default)]
    pub title: Option<String>,
    /// Layout enum over `{"", "stack", "grid-2", "grid-3"}`.
    #[serde(default)]
    pub layout: String,
    /// The component tree's top-level children.
    pub components: Vec<UiComponent>,
}

impl UiSpec {
    /// The title to render, falling back to the documented default.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().filter(|t| !t.is_empty()).unwrap_or("Loom App")
    }

    /// The layout, with the empty string treated as a synonym for `"stack"`
    /// (§9 ambiguous source behaviour (a)).
    #[must_use]
    pub fn normalized_layout(&self) -> &str {
        if self.layout.is_empty() { "stack" } else { &self.layout }
    }
}

/// One node in the component tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiComponent {
    /// Component kind, drawn from the closed catalog.
    #[serde(rename = "type")]
    pub component_type: String,
    /// Arbitrary JSON object of component-specific properties.
    #[serde(default)]
    pub props: Option<Value>,
    /// Child components; only legal on `"section"` and `"tabs"`.
    #[serde(default)]
    pub children: Option<Vec<UiComponent>>,
    /// Optional stable identifier for the component.
    #[serde(default)]
    pub id: Option<String>,
}
