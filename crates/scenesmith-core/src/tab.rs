//! Workspace tab identifiers.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// A tab of the project workspace.
///
/// The kebab-case form (`macro-chain`, `character-sheet`, ...) is what appears
/// in URLs and on the wire.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TabId {
    #[default]
    Overview,
    Background,
    Characters,
    CharacterSheet,
    MacroChain,
    Scenes,
    Context,
    /// Reserved; never navigable.
    Export,
}

impl TabId {
    /// Every tab in workspace display order, disabled ones included.
    pub const ALL: [TabId; 8] = [
        TabId::Overview,
        TabId::Background,
        TabId::Characters,
        TabId::CharacterSheet,
        TabId::MacroChain,
        TabId::Scenes,
        TabId::Context,
        TabId::Export,
    ];

    /// Whether the tab can be navigated to.
    pub fn is_enabled(self) -> bool {
        !matches!(self, TabId::Export)
    }

    /// Human-readable tab title.
    pub fn title(self) -> &'static str {
        match self {
            TabId::Overview => "Overview",
            TabId::Background => "Background",
            TabId::Characters => "Characters",
            TabId::CharacterSheet => "Character Sheet",
            TabId::MacroChain => "Macro Chain",
            TabId::Scenes => "Scenes",
            TabId::Context => "Context",
            TabId::Export => "Export",
        }
    }

    /// Parses a tab id, returning `None` for unknown values.
    pub fn parse(value: &str) -> Option<TabId> {
        TabId::from_str(value.trim()).ok()
    }

    /// Parses a URL tab value, falling back to [`TabId::Overview`] for
    /// missing, unknown or disabled tabs.
    pub fn from_url_value(value: Option<&str>) -> TabId {
        value
            .and_then(TabId::parse)
            .filter(|tab| tab.is_enabled())
            .unwrap_or_default()
    }
}
