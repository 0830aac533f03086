//! Patient editor form state.
//!
//! The page's editor fields are mirrored by [`PatientForm`], with pure mappings from a
//! [`Patient`] (populate) and to a [`PatientDraft`] (serialize).

use crate::format::date_input_value;
use crate::model::{Patient, PatientDraft};
use crate::{DeskError, DeskResult};
use std::str::FromStr;

/// Values of the editor fields. `Default` is the reset (blank) form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatientForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// `YYYY-MM-DD` as held by a date input.
    pub last_visit: String,
    pub next_visit: String,
    pub treatment_status: String,
    pub notes: String,
}

impl PatientForm {
    /// Fill the form from a record: dates keep only their date portion and absent optional
    /// fields become empty strings.
    pub fn from_patient(patient: &Patient) -> Self {
        Self {
            name: patient.name.clone(),
            email: patient.email.clone(),
            phone: patient.phone.clone().unwrap_or_default(),
            last_visit: date_input_value(patient.last_visit.as_deref()),
            next_visit: date_input_value(patient.next_visit.as_deref()),
            treatment_status: patient.treatment_status.clone().unwrap_or_default(),
            notes: patient.notes.clone().unwrap_or_default(),
        }
    }

    /// The save payload, field for field. No validation is applied here.
    pub fn to_draft(&self) -> PatientDraft {
        PatientDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            last_visit: self.last_visit.clone(),
            next_visit: self.next_visit.clone(),
            treatment_status: self.treatment_status.clone(),
            notes: self.notes.clone(),
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::LastVisit => &self.last_visit,
            FormField::NextVisit => &self.next_visit,
            FormField::TreatmentStatus => &self.treatment_status,
            FormField::Notes => &self.notes,
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::LastVisit => &mut self.last_visit,
            FormField::NextVisit => &mut self.next_visit,
            FormField::TreatmentStatus => &mut self.treatment_status,
            FormField::Notes => &mut self.notes,
        };
        *slot = value.into();
    }
}

/// A named editor field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Phone,
    LastVisit,
    NextVisit,
    TreatmentStatus,
    Notes,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::LastVisit,
        FormField::NextVisit,
        FormField::TreatmentStatus,
        FormField::Notes,
    ];

    /// Field name as used in the API payload.
    pub fn as_str(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::LastVisit => "last_visit",
            FormField::NextVisit => "next_visit",
            FormField::TreatmentStatus => "treatment_status",
            FormField::Notes => "notes",
        }
    }
}

impl FromStr for FormField {
    type Err = DeskError;

    fn from_str(s: &str) -> DeskResult<Self> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        FormField::ALL
            .into_iter()
            .find(|f| f.as_str() == wanted)
            .ok_or_else(|| DeskError::InvalidInput(format!("unknown form field: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PatientId;

    fn full_patient() -> Patient {
        Patient {
            id: PatientId::Number(9),
            name: "Clara Oswald".into(),
            email: "clara@example.com".into(),
            phone: Some("555-0101".into()),
            last_visit: Some("2024-03-05T10:30:00".into()),
            next_visit: Some("2024-09-01T00:00:00Z".into()),
            treatment_status: Some("Crown fitted".into()),
            risk_level: Some("medium".into()),
            notes: Some("Prefers mornings".into()),
            created_at: None,
        }
    }

    #[test]
    fn populates_from_full_record() {
        let form = PatientForm::from_patient(&full_patient());
        assert_eq!(form.name, "Clara Oswald");
        assert_eq!(form.phone, "555-0101");
        assert_eq!(form.last_visit, "2024-03-05");
        assert_eq!(form.next_visit, "2024-09-01");
        assert_eq!(form.treatment_status, "Crown fitted");
        assert_eq!(form.notes, "Prefers mornings");
    }

    #[test]
    fn absent_optional_fields_become_empty() {
        let patient = Patient {
            phone: None,
            last_visit: None,
            next_visit: None,
            treatment_status: None,
            notes: None,
            ..full_patient()
        };
        let form = PatientForm::from_patient(&patient);
        assert_eq!(form.phone, "");
        assert_eq!(form.last_visit, "");
        assert_eq!(form.next_visit, "");
        assert_eq!(form.treatment_status, "");
        assert_eq!(form.notes, "");
    }

    #[test]
    fn draft_carries_form_values_verbatim() {
        let mut form = PatientForm::from_patient(&full_patient());
        form.set_field(FormField::Email, "new@example.com");
        form.set_field(FormField::Notes, "");

        let draft = form.to_draft();
        assert_eq!(draft.email, "new@example.com");
        assert_eq!(draft.notes, "");
        assert_eq!(draft.last_visit, "2024-03-05");
    }

    #[test]
    fn reset_form_is_blank() {
        let form = PatientForm::default();
        assert!(FormField::ALL.iter().all(|f| form.field(*f).is_empty()));
    }

    #[test]
    fn parses_field_names() {
        assert_eq!("name".parse::<FormField>().ok(), Some(FormField::Name));
        assert_eq!(
            "Treatment-Status".parse::<FormField>().ok(),
            Some(FormField::TreatmentStatus)
        );
        let err = "age".parse::<FormField>().expect_err("unknown field");
        assert!(matches!(err, DeskError::InvalidInput(msg) if msg.contains("age")));
    }
}
