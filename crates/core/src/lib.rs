//! # Desk Core
//!
//! View-layer logic for the patient desk, a page that lists patient records from the
//! Patients API, edits them through a dialog and surfaces server-side risk analysis.
//!
//! This crate contains everything that can be decided without a browser or a socket:
//! - Patient records and save payloads ([`model`])
//! - Visit date rendering ([`format`]) and the rendered table with its filter ([`table`])
//! - Editor form state and its mapping to and from records ([`form`])
//! - Notification banners ([`alert`])
//! - The [`PatientListController`] tying them together
//!
//! **No transport or markup**: the HTTP client lives in `desk-api-client`, and the page is
//! reached only through the [`PageView`] and [`Modal`] traits.

pub mod alert;
pub mod api;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod form;
pub mod format;
pub mod model;
pub mod sequence;
pub mod table;
pub mod view;

pub use alert::{Alert, AlertId, Severity};
pub use api::{ApiError, ApiResult, ErrorBody, PatientsApi};
pub use config::DeskConfig;
pub use controller::{EditorState, PatientListController};
pub use error::{DeskError, DeskResult};
pub use form::{FormField, PatientForm};
pub use format::DateFormat;
pub use model::{
    BadgeTone, FollowUpReminder, Patient, PatientDraft, PatientId, RiskAnalysis, RiskLevel,
    TreatmentDraft,
};
pub use table::{PatientRow, PatientTable, RiskBadge, TableRow};
pub use view::{Modal, PageView};
