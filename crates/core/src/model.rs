//! Patient records as exchanged with the Patients API.
//!
//! The server owns every record. The desk only reads [`Patient`] values and sends
//! [`PatientDraft`] payloads back; identifiers are opaque and never assigned here.

use serde::{Deserialize, Deserializer, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Server-assigned patient identifier.
///
/// The API may hand out integers or strings, so both are accepted and carried through
/// unchanged. `Display` renders the bare value for use in URL paths.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatientId {
    Number(i64),
    Text(String),
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatientId::Number(n) => write!(f, "{n}"),
            PatientId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for PatientId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(n) => PatientId::Number(n),
            Err(_) => PatientId::Text(s.to_string()),
        })
    }
}

impl From<i64> for PatientId {
    fn from(n: i64) -> Self {
        PatientId::Number(n)
    }
}

impl From<&str> for PatientId {
    fn from(s: &str) -> Self {
        PatientId::Text(s.to_string())
    }
}

/// A patient record as returned by `GET /api/patients` and `GET /api/patients/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    /// Required by the API, but older records may carry `null`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// ISO-8601 date or date-time, kept verbatim so unparseable values can be reported.
    #[serde(default)]
    pub last_visit: Option<String>,
    #[serde(default)]
    pub next_visit: Option<String>,
    #[serde(default)]
    pub treatment_status: Option<String>,
    /// Server-computed classification, usually `high`, `medium` or `low` in any case.
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Patient {
    pub fn risk(&self) -> RiskLevel {
        RiskLevel::classify(self.risk_level.as_deref())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Payload for `POST /api/patients`.
///
/// Field values are taken verbatim from the editor form, empty strings included.
/// Carries no `id`; the same endpoint serves create and edit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub last_visit: String,
    pub next_visit: String,
    pub treatment_status: String,
    pub notes: String,
}

/// Risk classification driving the colour of the table badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
    /// Absent or unrecognised.
    Other,
}

impl RiskLevel {
    /// Classify a raw `risk_level` value, ignoring case.
    pub fn classify(value: Option<&str>) -> Self {
        match value.map(str::to_lowercase).as_deref() {
            Some("high") => RiskLevel::High,
            Some("medium") => RiskLevel::Medium,
            Some("low") => RiskLevel::Low,
            _ => RiskLevel::Other,
        }
    }

    pub fn tone(self) -> BadgeTone {
        match self {
            RiskLevel::High => BadgeTone::Danger,
            RiskLevel::Medium => BadgeTone::Warning,
            RiskLevel::Low => BadgeTone::Success,
            RiskLevel::Other => BadgeTone::Neutral,
        }
    }
}

/// Colour of a risk badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeTone {
    /// Red.
    Danger,
    /// Yellow.
    Warning,
    /// Green.
    Success,
    /// Gray.
    Neutral,
}

impl BadgeTone {
    pub fn css_class(self) -> &'static str {
        match self {
            BadgeTone::Danger => "danger",
            BadgeTone::Warning => "warning",
            BadgeTone::Success => "success",
            BadgeTone::Neutral => "secondary",
        }
    }
}

/// Body of `GET /api/patients/{id}/risk`. The narrative is opaque server text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    pub risk_analysis: String,
}

/// Body of `GET /api/patients/{id}/reminder`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpReminder {
    pub reminder: String,
}

/// Payload for `POST /api/treatments`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentDraft {
    pub patient_id: PatientId,
    pub treatment_type: String,
    /// ISO-8601 date or date-time of the treatment.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_follow_up: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patient_id_accepts_numbers_and_strings() {
        let n: PatientId = serde_json::from_str("42").expect("numeric id");
        assert_eq!(n, PatientId::Number(42));
        assert_eq!(n.to_string(), "42");

        let s: PatientId = serde_json::from_str("\"p-7\"").expect("string id");
        assert_eq!(s, PatientId::Text("p-7".into()));
        assert_eq!(s.to_string(), "p-7");
    }

    #[test]
    fn patient_id_parses_from_command_line_text() {
        assert_eq!("17".parse::<PatientId>(), Ok(PatientId::Number(17)));
        assert_eq!(
            "abc".parse::<PatientId>(),
            Ok(PatientId::Text("abc".into()))
        );
    }

    #[test]
    fn decodes_server_record_with_nulls_and_extra_fields() {
        let json = r#"{
            "id": 3,
            "name": "Ada Lovelace",
            "email": null,
            "phone": null,
            "last_visit": "2024-03-05T10:30:00",
            "next_visit": null,
            "treatment_status": "Root canal",
            "risk_level": "High",
            "notes": null,
            "created_at": "2024-01-01T08:00:00",
            "unexpected": true
        }"#;

        let patient: Patient = serde_json::from_str(json).expect("should decode");
        assert_eq!(patient.id, PatientId::Number(3));
        assert_eq!(patient.email, "");
        assert_eq!(patient.last_visit.as_deref(), Some("2024-03-05T10:30:00"));
        assert!(patient.next_visit.is_none());
        assert_eq!(patient.risk(), RiskLevel::High);
        assert_eq!(patient.created_at.as_deref(), Some("2024-01-01T08:00:00"));
    }

    #[test]
    fn decodes_minimal_record() {
        let patient: Patient =
            serde_json::from_str(r#"{"id":"x1","name":"Bo"}"#).expect("should decode");
        assert_eq!(patient.email, "");
        assert!(patient.risk_level.is_none());
        assert_eq!(patient.risk(), RiskLevel::Other);
    }

    #[test]
    fn draft_never_serialises_an_id() {
        let draft = PatientDraft {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            ..PatientDraft::default()
        };
        let value = serde_json::to_value(&draft).expect("should serialise");
        let object = value.as_object().expect("object");
        assert!(!object.contains_key("id"));
        assert_eq!(object.len(), 7);
        assert_eq!(object["phone"], "");
    }

    #[test]
    fn risk_level_maps_to_badge_tone() {
        assert_eq!(RiskLevel::classify(Some("high")).tone(), BadgeTone::Danger);
        assert_eq!(RiskLevel::classify(Some("MEDIUM")).tone(), BadgeTone::Warning);
        assert_eq!(RiskLevel::classify(Some("Low")).tone(), BadgeTone::Success);
        assert_eq!(RiskLevel::classify(Some("severe")).tone(), BadgeTone::Neutral);
        assert_eq!(RiskLevel::classify(None).tone(), BadgeTone::Neutral);
        assert_eq!(BadgeTone::Neutral.css_class(), "secondary");
    }

    #[test]
    fn treatment_draft_omits_absent_optionals() {
        let draft = TreatmentDraft {
            patient_id: PatientId::Number(1),
            treatment_type: "Extraction".into(),
            date: "2024-05-01".into(),
            status: None,
            complications: None,
            next_follow_up: Some("2024-05-15".into()),
        };
        let value = serde_json::to_value(&draft).expect("should serialise");
        assert_eq!(value["patient_id"], 1);
        assert!(value.get("status").is_none());
        assert_eq!(value["next_follow_up"], "2024-05-15");
    }
}
