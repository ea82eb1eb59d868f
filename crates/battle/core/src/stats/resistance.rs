//! Elemental resistance tables.

use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a damage element.
///
/// Elements are content-defined strings; `"physical"` is the entry consulted
/// for every action that declares no element.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Element(String);

impl Element {
    pub const PHYSICAL: &'static str = "physical";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn physical() -> Self {
        Self::new(Self::PHYSICAL)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Element {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Signed percentage modifiers against incoming damage, keyed by element.
///
/// Positive values reduce damage, negative values amplify it. Values live in
/// [-100, 100]; missing entries read as 0.
///
/// # Invariants
///
/// - Stored values are clamped on insertion
/// - [`ResistanceProfile::get`] clamps again, so a profile built through
///   deserialization can never leak an out-of-band value into a formula
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ResistanceProfile {
    entries: BTreeMap<Element, i32>,
}

impl ResistanceProfile {
    pub const MIN: i32 = -100;
    pub const MAX: i32 = 100;

    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion.
    pub fn with(mut self, element: impl Into<Element>, value: i32) -> Self {
        self.set(element, value);
        self
    }

    pub fn set(&mut self, element: impl Into<Element>, value: i32) {
        self.entries
            .insert(element.into(), value.clamp(Self::MIN, Self::MAX));
    }

    /// Resistance to `element`, clamped to [-100, 100], defaulting to 0.
    pub fn get(&self, element: &Element) -> i32 {
        self.entries
            .get(element)
            .copied()
            .unwrap_or(0)
            .clamp(Self::MIN, Self::MAX)
    }

    /// Resistance to physical damage.
    pub fn physical(&self) -> i32 {
        self.get(&Element::physical())
    }

    /// Resistance against an optional element; `None` resolves as physical.
    pub fn against(&self, element: Option<&Element>) -> i32 {
        match element {
            Some(element) => self.get(element),
            None => self.physical(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Element, i32)> + '_ {
        self.entries.iter().map(|(element, value)| (element, *value))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
