//! The rendered patient table and its client-side filter.
//!
//! A [`PatientTable`] mirrors what the page shows. Every load replaces it wholesale; filtering
//! only toggles visibility of rows already rendered and never re-fetches or re-sorts.

use crate::constants::{
    EDIT_LABEL, NOT_AVAILABLE, NO_PATIENTS_FOUND, TABLE_COLUMN_COUNT, VIEW_RISK_LABEL,
};
use crate::format::{format_date, DateFormat};
use crate::model::{BadgeTone, Patient, PatientId};

/// Colour-coded risk badge shown in the risk column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RiskBadge {
    pub label: String,
    pub tone: BadgeTone,
}

/// One rendered patient row. Cell values are display strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientRow {
    /// Target of the row's `View Risk` and `Edit` actions.
    pub id: PatientId,
    pub name: String,
    pub last_visit: String,
    pub next_visit: String,
    pub risk: RiskBadge,
    pub treatment_status: String,
}

impl PatientRow {
    pub fn from_patient(patient: &Patient, format: &DateFormat) -> Self {
        Self {
            id: patient.id.clone(),
            name: patient.name.clone(),
            last_visit: format_date(patient.last_visit.as_deref(), format),
            next_visit: format_date(patient.next_visit.as_deref(), format),
            risk: RiskBadge {
                label: or_not_available(patient.risk_level.as_deref()),
                tone: patient.risk().tone(),
            },
            treatment_status: or_not_available(patient.treatment_status.as_deref()),
        }
    }

    /// The row's full visible text, action labels included.
    pub fn text(&self) -> String {
        [
            self.name.as_str(),
            self.last_visit.as_str(),
            self.next_visit.as_str(),
            self.risk.label.as_str(),
            self.treatment_status.as_str(),
            VIEW_RISK_LABEL,
            EDIT_LABEL,
        ]
        .join(" ")
    }
}

fn or_not_available(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableRow {
    Patient(PatientRow),
    /// A single message cell spanning `colspan` columns.
    Placeholder { text: String, colspan: usize },
}

impl TableRow {
    pub fn text(&self) -> String {
        match self {
            TableRow::Patient(row) => row.text(),
            TableRow::Placeholder { text, .. } => text.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatientTable {
    rows: Vec<TableRow>,
}

impl PatientTable {
    /// Render one row per patient in server order, or the empty-list placeholder.
    pub fn render(patients: &[Patient], format: &DateFormat) -> Self {
        if patients.is_empty() {
            return Self {
                rows: vec![TableRow::Placeholder {
                    text: NO_PATIENTS_FOUND.to_string(),
                    colspan: TABLE_COLUMN_COUNT,
                }],
            };
        }

        let rows = patients
            .iter()
            .map(|p| TableRow::Patient(PatientRow::from_patient(p, format)))
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Visibility of each row for a search term.
    ///
    /// A row stays visible iff its text contains the term, ignoring case. An empty term
    /// shows every row.
    pub fn filter(&self, term: &str) -> Vec<bool> {
        let term = term.to_lowercase();
        self.rows
            .iter()
            .map(|row| row.text().to_lowercase().contains(&term))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(id: i64, name: &str, risk: Option<&str>) -> Patient {
        Patient {
            id: PatientId::Number(id),
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: None,
            last_visit: Some("2024-03-05T10:30:00".into()),
            next_visit: None,
            treatment_status: None,
            risk_level: risk.map(str::to_string),
            notes: None,
            created_at: None,
        }
    }

    #[test]
    fn renders_one_row_per_patient_in_server_order() {
        let patients = vec![
            patient(2, "Zed", Some("high")),
            patient(1, "Amy", Some("Low")),
            patient(3, "Bob", None),
        ];
        let table = PatientTable::render(&patients, &DateFormat::default());
        assert_eq!(table.rows().len(), patients.len());

        let names: Vec<_> = table
            .rows()
            .iter()
            .map(|r| match r {
                TableRow::Patient(row) => row.name.clone(),
                other => panic!("unexpected row {other:?}"),
            })
            .collect();
        assert_eq!(names, vec!["Zed", "Amy", "Bob"]);
    }

    #[test]
    fn row_cells_fall_back_to_placeholders() {
        let mut p = patient(1, "Amy", None);
        p.treatment_status = Some(String::new());
        let row = PatientRow::from_patient(&p, &DateFormat::default());

        assert_eq!(row.last_visit, "3/5/2024");
        assert_eq!(row.next_visit, "N/A");
        assert_eq!(
            row.risk,
            RiskBadge {
                label: "N/A".into(),
                tone: BadgeTone::Neutral
            }
        );
        assert_eq!(row.treatment_status, "N/A");
    }

    #[test]
    fn badge_tone_follows_risk_level() {
        for (risk, tone) in [
            (Some("high"), BadgeTone::Danger),
            (Some("medium"), BadgeTone::Warning),
            (Some("low"), BadgeTone::Success),
            (Some("unknown"), BadgeTone::Neutral),
            (None, BadgeTone::Neutral),
        ] {
            let row = PatientRow::from_patient(&patient(1, "Amy", risk), &DateFormat::default());
            assert_eq!(row.risk.tone, tone, "risk level {risk:?}");
        }
    }

    #[test]
    fn empty_list_renders_single_placeholder() {
        let table = PatientTable::render(&[], &DateFormat::default());
        assert_eq!(
            table.rows(),
            &[TableRow::Placeholder {
                text: "No patients found".into(),
                colspan: 6
            }]
        );
    }

    #[test]
    fn filter_matches_visible_text_case_insensitively() {
        let patients = vec![
            patient(1, "Amy Pond", Some("High")),
            patient(2, "Rory Williams", Some("low")),
        ];
        let table = PatientTable::render(&patients, &DateFormat::default());

        assert_eq!(table.filter("amy"), vec![true, false]);
        assert_eq!(table.filter("LOW"), vec![false, true]);
        assert_eq!(table.filter("3/5/2024"), vec![true, true]);
        assert_eq!(table.filter("view risk"), vec![true, true]);
        assert_eq!(table.filter("nobody"), vec![false, false]);
    }

    #[test]
    fn clearing_the_filter_shows_every_row_again() {
        let patients = vec![patient(1, "Amy", None), patient(2, "Rory", None)];
        let table = PatientTable::render(&patients, &DateFormat::default());

        assert_eq!(table.filter("rory"), vec![false, true]);
        assert_eq!(table.filter(""), vec![true, true]);
        assert_eq!(table.filter("rory"), table.filter("rory"));
    }
}
