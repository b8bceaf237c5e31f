//! Label module - the closed sentence-classification vocabulary

use crate::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Event category assigned to a sentence
///
/// The vocabulary is closed: six classifier labels plus the `ErrorApi`
/// sentinel used when the annotation oracle could not label a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    /// Opinions, forecasts, announcements, weather, sport, everything else
    NoEvent,

    /// Criminal acts and law enforcement actions
    Crime,

    /// Government, legislation, diplomacy, protests
    Politics,

    /// Concrete company and market actions
    Business,

    /// Large-scale destruction or casualties
    Disaster,

    /// Local, individual accidents
    Accident,

    /// Sentinel for records the oracle failed to label
    ErrorApi,
}

impl Label {
    /// The six labels a classifier can predict, in canonical order
    pub const CLASSES: [Label; 6] = [
        Label::NoEvent,
        Label::Crime,
        Label::Politics,
        Label::Business,
        Label::Disaster,
        Label::Accident,
    ];

    /// Every label including the `ErrorApi` sentinel
    pub const ALL: [Label; 7] = [
        Label::NoEvent,
        Label::Crime,
        Label::Politics,
        Label::Business,
        Label::Disaster,
        Label::Accident,
        Label::ErrorApi,
    ];

    /// Canonical wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::NoEvent => "NO_EVENT",
            Label::Crime => "CRIME",
            Label::Politics => "POLITICS",
            Label::Business => "BUSINESS",
            Label::Disaster => "DISASTER",
            Label::Accident => "ACCIDENT",
            Label::ErrorApi => "ERROR_API",
        }
    }

    /// Parse a label name
    ///
    /// Accepts the canonical names and the Polish taxonomy used by the
    /// source corpora, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "NO_EVENT" | "BRAK_ZDARZENIA" => Some(Label::NoEvent),
            "CRIME" | "PRZESTEPSTWO" | "PRZESTĘPSTWO" => Some(Label::Crime),
            "POLITICS" | "POLITYKA" => Some(Label::Politics),
            "BUSINESS" | "BIZNES" => Some(Label::Business),
            "DISASTER" | "KATASTROFA" => Some(Label::Disaster),
            "ACCIDENT" | "WYPADEK" => Some(Label::Accident),
            "ERROR_API" => Some(Label::ErrorApi),
            _ => None,
        }
    }

    /// Position in [`Label::CLASSES`], `None` for the sentinel
    pub fn class_index(&self) -> Option<usize> {
        Label::CLASSES.iter().position(|l| l == self)
    }

    /// Whether the label describes an event (anything but `NoEvent`)
    pub fn is_event(&self) -> bool {
        *self != Label::NoEvent
    }

    /// Whether the label is an incident worth flagging prominently
    pub fn is_alert(&self) -> bool {
        matches!(self, Label::Crime | Label::Disaster | Label::Accident)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Label {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DomainError::UnknownLabel(s.to_string()))
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        for label in Label::ALL {
            assert_eq!(Label::parse(label.as_str()), Some(label));
        }
    }

    #[test]
    fn test_parse_polish_taxonomy() {
        assert_eq!(Label::parse("BRAK_ZDARZENIA"), Some(Label::NoEvent));
        assert_eq!(Label::parse("PRZESTEPSTWO"), Some(Label::Crime));
        assert_eq!(Label::parse("polityka"), Some(Label::Politics));
        assert_eq!(Label::parse(" Biznes "), Some(Label::Business));
        assert_eq!(Label::parse("KATASTROFA"), Some(Label::Disaster));
        assert_eq!(Label::parse("WYPADEK"), Some(Label::Accident));
    }

    #[test]
    fn test_unknown_label_rejected() {
        assert_eq!(Label::parse("INNE"), None);
        assert!("SPORT".parse::<Label>().is_err());
    }

    #[test]
    fn test_event_classification() {
        assert!(!Label::NoEvent.is_event());
        assert!(Label::Crime.is_event());
        assert!(Label::ErrorApi.is_event());
        assert!(Label::Accident.is_alert());
        assert!(!Label::Politics.is_alert());
    }

    #[test]
    fn test_class_index() {
        assert_eq!(Label::NoEvent.class_index(), Some(0));
        assert_eq!(Label::Accident.class_index(), Some(5));
        assert_eq!(Label::ErrorApi.class_index(), None);
    }

    #[test]
    fn test_serde_uses_canonical_names() {
        let json = serde_json::to_string(&Label::Disaster).unwrap();
        assert_eq!(json, "\"DISASTER\"");

        let parsed: Label = serde_json::from_str("\"WYPADEK\"").unwrap();
        assert_eq!(parsed, Label::Accident);

        assert!(serde_json::from_str::<Label>("\"INNE\"").is_err());
    }
}
