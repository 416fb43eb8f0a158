//! Selectors, trait sets and interaction state.
//!
//! A selector is `"<trait>"` or `"<trait>:<state>"`. The empty trait always
//! matches; the state, if any, must be one of `hover`, `active`, `focus`.
//! A trailing colon with nothing after it is normalized to "no state".

use std::fmt;

// ---------------------------------------------------------------------------
// Interaction
// ---------------------------------------------------------------------------

/// Interaction flags derived by event dispatch. Never declared by style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Interaction {
    pub hovered: bool,
    pub pressed: bool,
    pub focused: bool,
}

// ---------------------------------------------------------------------------
// TraitSet
// ---------------------------------------------------------------------------

/// Named boolean flags on a node, toggled by widget logic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraitSet {
    names: Vec<String>,
}

impl TraitSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` is enabled. The empty trait is always present.
    pub fn has(&self, name: &str) -> bool {
        name.is_empty() || self.names.iter().any(|n| n == name)
    }

    /// Enable `name`. No-op if already enabled.
    pub fn add(&mut self, name: &str) {
        if !name.is_empty() && !self.has(name) {
            self.names.push(name.to_owned());
        }
    }

    /// Disable `name`. No-op if not enabled.
    pub fn remove(&mut self, name: &str) {
        self.names.retain(|n| n != name);
    }

    /// Flip `name`.
    pub fn toggle(&mut self, name: &str) {
        if self.has(name) {
            self.remove(name);
        } else {
            self.add(name);
        }
    }

    /// Enable or disable `name`.
    pub fn set(&mut self, name: &str, enabled: bool) {
        if enabled {
            self.add(name);
        } else {
            self.remove(name);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Selector
// ---------------------------------------------------------------------------

/// The interaction condition part of a selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StateCondition {
    Hover,
    Active,
    Focus,
    /// A state name outside the supported set. Never matches.
    Unknown(String),
}

impl StateCondition {
    fn parse(name: &str) -> Self {
        match name {
            "hover" => StateCondition::Hover,
            "active" => StateCondition::Active,
            "focus" => StateCondition::Focus,
            other => StateCondition::Unknown(other.to_owned()),
        }
    }

    fn name(&self) -> &str {
        match self {
            StateCondition::Hover => "hover",
            StateCondition::Active => "active",
            StateCondition::Focus => "focus",
            StateCondition::Unknown(name) => name,
        }
    }

    fn holds(&self, interaction: Interaction) -> bool {
        match self {
            StateCondition::Hover => interaction.hovered,
            StateCondition::Active => interaction.pressed,
            StateCondition::Focus => interaction.focused,
            StateCondition::Unknown(_) => false,
        }
    }
}

/// A parsed, normalized selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Selector {
    trait_name: String,
    state: Option<StateCondition>,
}

impl Selector {
    /// Parse a selector string. Never fails; a trailing colon means no state.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let (trait_name, state) = match text.split_once(':') {
            Some((name, state)) => {
                let state = state.trim();
                let state = if state.is_empty() { None } else { Some(StateCondition::parse(state)) };
                (name.trim(), state)
            }
            None => (text, None),
        };
        // `*` is the sheet spelling of the empty trait.
        let trait_name = if trait_name == "*" { "" } else { trait_name };
        Self { trait_name: trait_name.to_owned(), state }
    }

    /// The selector that always matches.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn trait_name(&self) -> &str {
        &self.trait_name
    }

    pub fn state(&self) -> Option<&StateCondition> {
        self.state.as_ref()
    }

    /// Whether a node with these traits and interaction flags is selected.
    pub fn matches(&self, traits: &TraitSet, interaction: Interaction) -> bool {
        traits.has(&self.trait_name)
            && self.state.as_ref().map_or(true, |state| state.holds(interaction))
    }
}

impl From<&str> for Selector {
    fn from(text: &str) -> Self {
        Selector::parse(text)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            Some(state) => write!(f, "{}:{}", self.trait_name, state.name()),
            None => f.write_str(&self.trait_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hovered() -> Interaction {
        Interaction { hovered: true, ..Interaction::default() }
    }

    #[test]
    fn trait_set_basics() {
        let mut traits = TraitSet::new();
        assert!(traits.has(""));
        assert!(!traits.has("checked"));
        traits.add("checked");
        traits.add("checked");
        assert_eq!(traits.len(), 1);
        traits.toggle("checked");
        assert!(!traits.has("checked"));
        traits.set("selected", true);
        assert!(traits.has("selected"));
        traits.remove("nonexistent");
        assert_eq!(traits.iter().collect::<Vec<_>>(), vec!["selected"]);
    }

    #[test]
    fn empty_trait_never_stored() {
        let mut traits = TraitSet::new();
        traits.add("");
        assert!(traits.is_empty());
    }

    #[test]
    fn parse_plain_and_stateful() {
        let plain = Selector::parse("checked");
        assert_eq!(plain.trait_name(), "checked");
        assert_eq!(plain.state(), None);

        let stateful = Selector::parse("checked:hover");
        assert_eq!(stateful.state(), Some(&StateCondition::Hover));
        assert_eq!(stateful.to_string(), "checked:hover");

        let any_active = Selector::parse(":active");
        assert_eq!(any_active.trait_name(), "");
        assert_eq!(any_active.state(), Some(&StateCondition::Active));
    }

    #[test]
    fn trailing_colon_normalizes_to_plain() {
        assert_eq!(Selector::parse("checked:"), Selector::parse("checked"));
        assert_eq!(Selector::parse(":"), Selector::any());
    }

    #[test]
    fn empty_selector_always_matches() {
        assert!(Selector::any().matches(&TraitSet::new(), Interaction::default()));
    }

    #[test]
    fn trait_and_state_must_both_hold() {
        let selector = Selector::parse("checked:hover");
        let mut traits = TraitSet::new();

        assert!(!selector.matches(&traits, hovered()));

        traits.add("checked");
        assert!(!selector.matches(&traits, Interaction::default()));
        assert!(selector.matches(&traits, hovered()));
    }

    #[test]
    fn states_map_to_flags() {
        let traits = TraitSet::new();
        let pressed = Interaction { pressed: true, ..Interaction::default() };
        let focused = Interaction { focused: true, ..Interaction::default() };
        assert!(Selector::parse(":active").matches(&traits, pressed));
        assert!(!Selector::parse(":active").matches(&traits, hovered()));
        assert!(Selector::parse(":focus").matches(&traits, focused));
    }

    #[test]
    fn unknown_state_never_matches() {
        let all = Interaction { hovered: true, pressed: true, focused: true };
        assert!(!Selector::parse(":disabled").matches(&TraitSet::new(), all));
    }
}
