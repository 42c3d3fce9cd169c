//! The closed catalog of UI component kinds and their child-legality rule.

/// One of the fourteen component kinds a spec tree may reference.
///
/// Closed by design: an unrecognized `type` string is a validation failure,
/// not an extension point (§4.5 "Unknown component type... are rejected").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Plain text block.
    Text,
    /// A heading at a given level.
    Heading,
    /// A clickable button.
    Button,
    /// An image reference.
    Image,
    /// A small status label.
    Badge,
    /// A bordered content container.
    Card,
    /// A horizontal rule.
    Divider,
    /// An ordered or unordered list.
    List,
    /// A tabular grid of rows/columns.
    Table,
    /// A chart rendered by the allowlisted chart library.
    Chart,
    /// A single labeled numeric value.
    Metric,
    /// A progress/completion indicator.
    Progress,
    /// A layout container that may carry children.
    Section,
    /// A tabbed layout container that may carry children.
    Tabs,
}

impl ComponentKind {
    /// Parse a component `type` string, case-sensitive per the wire contract.
    #[must_use]
    pub fn parse(type_name: &str) -> Option<Self> {
        Some(match type_name {
            "text" => Self::Text,
            "heading" => Self::Heading,
            "button" => Self::Button,
            "image" => Self::Image,
            "badge" => Self::Badge,
            "card" => Self::Card,
            "divider" => Self::Divider,
            "list" => Self::List,
            "table" => Self::Table,
            "chart" => Self::Chart,
            "metric" => Self::Metric,
            "progress" => Self::Progress,
            "section" => Self::Section,
            "tabs" => Self::Tabs,
            _ => return None,
        })
    }

    /// Whether this kind is permitted to carry a `children` array (§3: only
    /// `"section"` and `"tabs"`).
    #[must_use]
    pub const fn allows_children(self) -> bool {
        matches!(self, Self::Section | Self::Tabs)
    }

    /// The wire `type` string for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Heading => "heading",
            Self::Button => "button",
            Self::Image => "image",
            Self::Badge => "badge",
            Self::Card => "card",
            Self::Divider => "divider",
            Self::List => "list",
            Self::Table => "table",
            Self::Chart => "chart",
            Self::Metric => "metric",
            Self::Progress => "progress",
            Self::Section => "section",
            Self::Tabs => "tabs",
        }
    }
}
