//! Event frame module - the fixed five-slot extraction result

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Rendering of an unset slot
pub const UNSET_MARKER: &str = "-";

/// A slot of the event frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    /// Predicate lemma
    Trigger,
    /// Who acted ("KTO")
    Agent,
    /// What or whom the action affected ("CO")
    Patient,
    /// Where it happened ("GDZIE")
    Location,
    /// When it happened ("KIEDY")
    Time,
}

impl Slot {
    /// All slots in frame order
    pub const ALL: [Slot; 5] = [
        Slot::Trigger,
        Slot::Agent,
        Slot::Patient,
        Slot::Location,
        Slot::Time,
    ];

    /// Wire key of the slot
    pub fn key(&self) -> &'static str {
        match self {
            Slot::Trigger => "TRIGGER",
            Slot::Agent => "KTO",
            Slot::Patient => "CO",
            Slot::Location => "GDZIE",
            Slot::Time => "KIEDY",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Value held by a slot; never absent
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SlotValue {
    /// Nothing was extracted for this slot
    #[default]
    Unset,
    /// Extracted surface text
    Filled(String),
}

impl SlotValue {
    /// Whether the slot holds a value
    pub fn is_set(&self) -> bool {
        matches!(self, SlotValue::Filled(_))
    }

    /// The extracted text, if any
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            SlotValue::Unset => None,
            SlotValue::Filled(text) => Some(text),
        }
    }
}

impl fmt::Display for SlotValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotValue::Unset => f.write_str(UNSET_MARKER),
            SlotValue::Filled(text) => f.write_str(text),
        }
    }
}

impl Serialize for SlotValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Event frame extracted from one sentence
///
/// Always holds exactly five slots. Built once through [`EventFrameBuilder`]
/// and treated as a value afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventFrame {
    trigger: SlotValue,
    agent: SlotValue,
    patient: SlotValue,
    location: SlotValue,
    time: SlotValue,
}

impl EventFrame {
    /// A frame with every slot unset
    pub fn empty() -> Self {
        Self::default()
    }

    /// Value of a slot
    pub fn get(&self, slot: Slot) -> &SlotValue {
        match slot {
            Slot::Trigger => &self.trigger,
            Slot::Agent => &self.agent,
            Slot::Patient => &self.patient,
            Slot::Location => &self.location,
            Slot::Time => &self.time,
        }
    }

    /// All five slots in frame order
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &SlotValue)> + '_ {
        Slot::ALL.into_iter().map(move |slot| (slot, self.get(slot)))
    }

    /// Whether any slot holds a value
    pub fn has_details(&self) -> bool {
        self.iter().any(|(_, value)| value.is_set())
    }

    /// Whether every slot is unset
    pub fn is_empty(&self) -> bool {
        !self.has_details()
    }
}

impl Serialize for EventFrame {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Slot::ALL.len()))?;
        for (slot, value) in self.iter() {
            map.serialize_entry(slot.key(), value)?;
        }
        map.end()
    }
}

/// Write-once builder for [`EventFrame`]
///
/// `fill` only sets a slot that is still unset, so the first value written
/// to a slot wins.
#[derive(Debug, Default)]
pub struct EventFrameBuilder {
    frame: EventFrame,
}

impl EventFrameBuilder {
    /// Create a builder with every slot unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a slot is still unset
    pub fn is_unset(&self, slot: Slot) -> bool {
        !self.frame.get(slot).is_set()
    }

    /// Set a slot if it is unset; returns whether the value was taken
    pub fn fill(&mut self, slot: Slot, value: impl Into<String>) -> bool {
        if !self.is_unset(slot) {
            return false;
        }
        let value = SlotValue::Filled(value.into());
        match slot {
            Slot::Trigger => self.frame.trigger = value,
            Slot::Agent => self.frame.agent = value,
            Slot::Patient => self.frame.patient = value,
            Slot::Location => self.frame.location = value,
            Slot::Time => self.frame.time = value,
        }
        true
    }

    /// Finish the frame
    pub fn build(self) -> EventFrame {
        self.frame
    }
}
