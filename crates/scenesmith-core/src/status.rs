//! Status derivation.
//!
//! Pure functions from a context snapshot to the per-tab status dots and the
//! overall phase badge. Nothing here performs I/O or keeps state.

use crate::context::{BlockState, ContextSnapshot, SessionContext};
use crate::tab::TabId;
use serde::Serialize;
use strum::{AsRefStr, Display};

/// Colour of a tab's status dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TabStatus {
    /// Block present and locked
    Green,
    /// Block present, still editable
    Yellow,
    /// Tab disabled; never derived from context
    Gray,
}

impl From<BlockState> for Option<TabStatus> {
    fn from(state: BlockState) -> Self {
        match state {
            BlockState::Absent => None,
            BlockState::Draft => Some(TabStatus::Yellow),
            BlockState::Locked => Some(TabStatus::Green),
        }
    }
}

impl ContextSnapshot {
    /// Status dot for a tab of this snapshot.
    pub fn tab_status(&self, tab: TabId) -> Option<TabStatus> {
        match tab {
            TabId::Overview | TabId::Context | TabId::Export => None,
            TabId::Background => self.background.into(),
            TabId::Characters | TabId::CharacterSheet => self.characters.into(),
            TabId::MacroChain => self.macro_chain.into(),
            TabId::Scenes => self.scenes.into(),
        }
    }

    /// Overall progress of the project.
    pub fn phase(&self) -> Phase {
        if !self.background.is_present() {
            Phase::Setup
        } else if self.macro_chain.is_locked() {
            Phase::Active
        } else if self.background.is_locked() {
            Phase::Planning
        } else {
            Phase::Background
        }
    }
}

/// Status dot for `tab`; `None` while no context is known.
pub fn tab_status(context: Option<&SessionContext>, tab: TabId) -> Option<TabStatus> {
    context.and_then(|context| ContextSnapshot::from_context(context).tab_status(tab))
}

/// Same as [`tab_status`] for a raw tab id; unknown ids have no status.
pub fn tab_status_by_id(context: Option<&SessionContext>, tab_id: &str) -> Option<TabStatus> {
    TabId::parse(tab_id).and_then(|tab| tab_status(context, tab))
}

/// Coarse progress label, ordered `Setup < Background < Planning < Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display)]
pub enum Phase {
    Setup,
    Background,
    Planning,
    Active,
}

/// Visual variant of the phase badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BadgeStyle {
    Neutral,
    Warning,
    Info,
    Success,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Setup => "Setup",
            Phase::Background => "Background",
            Phase::Planning => "Planning",
            Phase::Active => "Active",
        }
    }

    pub fn style(self) -> BadgeStyle {
        match self {
            Phase::Setup => BadgeStyle::Neutral,
            Phase::Background => BadgeStyle::Warning,
            Phase::Planning => BadgeStyle::Info,
            Phase::Active => BadgeStyle::Success,
        }
    }
}

/// The phase badge shown above the workspace tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseBadge {
    pub phase: Phase,
    pub label: &'static str,
    pub style: BadgeStyle,
}

impl From<Phase> for PhaseBadge {
    fn from(phase: Phase) -> Self {
        Self {
            phase,
            label: phase.label(),
            style: phase.style(),
        }
    }
}

/// Overall phase of a context; no context reads as `Setup`.
pub fn overall_phase(context: Option<&SessionContext>) -> PhaseBadge {
    context
        .map(|context| ContextSnapshot::from_context(context).phase())
        .unwrap_or(Phase::Setup)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context(value: serde_json::Value) -> SessionContext {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_no_context_means_no_status() {
        for tab in TabId::ALL {
            assert_eq!(tab_status(None, tab), None);
        }
        assert_eq!(overall_phase(None).phase, Phase::Setup);
    }

    #[test]
    fn test_empty_context_scenario() {
        let ctx = context(json!({"blocks": {}, "locks": {}}));
        for tab in TabId::ALL {
            assert_eq!(tab_status(Some(&ctx), tab), None, "tab {tab}");
        }
        let badge = overall_phase(Some(&ctx));
        assert_eq!(badge.label, "Setup");
        assert_eq!(badge.style, BadgeStyle::Neutral);
    }

    #[test]
    fn test_unlocked_background_scenario() {
        let ctx = context(json!({
            "blocks": {"background": {"premise": "A drowned kingdom"}},
            "locks": {"background": false}
        }));
        assert_eq!(tab_status(Some(&ctx), TabId::Background), Some(TabStatus::Yellow));
        assert_eq!(overall_phase(Some(&ctx)).label, "Background");
    }

    #[test]
    fn test_locked_chain_scenario() {
        let ctx = context(json!({
            "blocks": {
                "background": {"premise": "A drowned kingdom"},
                "custom": {"macroChain": {"status": "Locked"}}
            },
            "locks": {"background": true}
        }));
        assert_eq!(tab_status(Some(&ctx), TabId::Background), Some(TabStatus::Green));
        assert_eq!(tab_status(Some(&ctx), TabId::MacroChain), Some(TabStatus::Green));
        let badge = overall_phase(Some(&ctx));
        assert_eq!(badge.label, "Active");
        assert_eq!(badge.style, BadgeStyle::Success);
    }

    #[test]
    fn test_background_status_rules() {
        let absent = context(json!({"blocks": {}, "locks": {"background": true}}));
        assert_eq!(tab_status(Some(&absent), TabId::Background), None);

        let no_lock_entry = context(json!({"blocks": {"background": {}}}));
        assert_eq!(tab_status(Some(&no_lock_entry), TabId::Background), Some(TabStatus::Yellow));
    }

    #[test]
    fn test_character_tabs_share_status() {
        let ctx = context(json!({"blocks": {"characters": {"characters": [], "locked": true}}}));
        assert_eq!(tab_status(Some(&ctx), TabId::Characters), Some(TabStatus::Green));
        assert_eq!(tab_status(Some(&ctx), TabId::CharacterSheet), Some(TabStatus::Green));
    }

    #[test]
    fn test_macro_chain_green_iff_locked() {
        for (status, expected) in [
            ("Draft", TabStatus::Yellow),
            ("Generated", TabStatus::Yellow),
            ("Edited", TabStatus::Yellow),
            ("NeedsRegen", TabStatus::Yellow),
            ("Locked", TabStatus::Green),
        ] {
            let ctx = context(json!({"blocks": {"custom": {"macroChain": {"status": status}}}}));
            assert_eq!(tab_status(Some(&ctx), TabId::MacroChain), Some(expected), "{status}");
        }
        let absent = context(json!({"blocks": {"custom": {}}}));
        assert_eq!(tab_status(Some(&absent), TabId::MacroChain), None);
    }

    #[test]
    fn test_scenes_status() {
        let draft = context(json!({"sceneDetails": {"s1": {"status": "Generated"}}}));
        assert_eq!(tab_status(Some(&draft), TabId::Scenes), Some(TabStatus::Yellow));

        let locked = context(json!({"sceneDetails": {
            "s1": {"status": "Generated"},
            "s2": {"status": "Locked"}
        }}));
        assert_eq!(tab_status(Some(&locked), TabId::Scenes), Some(TabStatus::Green));
    }

    #[test]
    fn test_overview_and_context_never_have_dots() {
        let ctx = context(json!({
            "blocks": {"background": {}, "characters": {"characters": []}},
            "locks": {"background": true}
        }));
        assert_eq!(tab_status(Some(&ctx), TabId::Overview), None);
        assert_eq!(tab_status(Some(&ctx), TabId::Context), None);
    }

    #[test]
    fn test_export_has_no_derived_status() {
        let ctx = context(json!({
            "blocks": {"background": {}, "custom": {"macroChain": {"status": "Locked"}}},
            "locks": {"background": true}
        }));
        assert_eq!(tab_status(Some(&ctx), TabId::Export), None);
    }

    #[test]
    fn test_unknown_tab_id() {
        let ctx = context(json!({"blocks": {"background": {}}}));
        assert_eq!(tab_status_by_id(Some(&ctx), "inventory"), None);
        assert_eq!(tab_status_by_id(Some(&ctx), "background"), Some(TabStatus::Yellow));
    }

    #[test]
    fn test_tab_status_is_idempotent() {
        let ctx = context(json!({
            "blocks": {"background": {}, "custom": {"macroChain": {"status": "Edited"}}},
            "locks": {"background": true}
        }));
        for tab in TabId::ALL {
            assert_eq!(tab_status(Some(&ctx), tab), tab_status(Some(&ctx), tab));
        }
    }

    #[test]
    fn test_phase_only_advances_as_blocks_are_added_and_locked() {
        let steps = [
            json!({"blocks": {}}),
            json!({"blocks": {"background": {}}}),
            json!({"blocks": {"background": {}}, "locks": {"background": true}}),
            json!({
                "blocks": {"background": {}, "custom": {"macroChain": {"status": "Generated"}}},
                "locks": {"background": true}
            }),
            json!({
                "blocks": {"background": {}, "custom": {"macroChain": {"status": "Locked"}}},
                "locks": {"background": true}
            }),
        ];
        let phases: Vec<Phase> = steps
            .into_iter()
            .map(|value| overall_phase(Some(&context(value))).phase)
            .collect();
        assert_eq!(
            phases,
            vec![
                Phase::Setup,
                Phase::Background,
                Phase::Planning,
                Phase::Planning,
                Phase::Active
            ]
        );
        assert!(phases.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TabStatus::Yellow).unwrap(), "\"yellow\"");
        assert_eq!(TabStatus::Green.to_string(), "green");
    }
}
