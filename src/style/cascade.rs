//! Per-node rule lists and the cascade.
//!
//! Matching records are applied in insertion order, not by specificity: a
//! later matching record overrides an earlier one on the fields it sets.

use crate::style::computed::ComputedStyle;
use crate::style::declared::DeclaredStyle;
use crate::style::selector::{Interaction, Selector, TraitSet};

/// One `(selector, record)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    pub selector: Selector,
    pub style: DeclaredStyle,
}

/// A node's ordered style records, unique by selector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleRules {
    rules: Vec<StyleRule>,
}

impl StyleRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `style` under `selector`. An existing record for the same
    /// selector is replaced in place and keeps its position.
    pub fn set(&mut self, selector: impl Into<Selector>, style: DeclaredStyle) {
        let selector = selector.into();
        match self.rules.iter_mut().find(|rule| rule.selector == selector) {
            Some(rule) => rule.style = style,
            None => self.rules.push(StyleRule { selector, style }),
        }
    }

    /// The record stored under `selector`, if any.
    pub fn get(&self, selector: impl Into<Selector>) -> Option<&DeclaredStyle> {
        let selector = selector.into();
        self.rules.iter().find(|rule| rule.selector == selector).map(|rule| &rule.style)
    }

    /// The record stored under `selector`, or an empty record.
    pub fn style(&self, selector: impl Into<Selector>) -> DeclaredStyle {
        self.get(selector).cloned().unwrap_or_default()
    }

    /// Drop the record stored under `selector`. Returns it if present.
    pub fn remove(&mut self, selector: impl Into<Selector>) -> Option<DeclaredStyle> {
        let selector = selector.into();
        let index = self.rules.iter().position(|rule| rule.selector == selector)?;
        Some(self.rules.remove(index).style)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Resolve a node's computed style from its parent's computed style.
///
/// Starts from defaults, inherits the narrow inherited subset, then applies
/// each matching record in insertion order. Never fails.
pub fn cascade(
    rules: &StyleRules,
    parent: &ComputedStyle,
    traits: &TraitSet,
    interaction: Interaction,
) -> ComputedStyle {
    let mut computed = ComputedStyle::inherited_from(parent);
    for rule in rules.iter() {
        if rule.selector.matches(traits, interaction) {
            rule.style.apply_to(&mut computed);
        }
    }
    computed
}
