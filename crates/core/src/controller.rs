//! The patient list controller.
//!
//! One controller serves one page session. It loads and renders the patient table, drives
//! the create/edit dialog, filters rendered rows and raises notifications. Every failure is
//! caught here, logged, and turned into a banner; no operation returns an error.
//!
//! Operations take `&self` so that several may be in flight at once, the way independent UI
//! events are. List loads and editor loads are sequenced: a response that arrives after a
//! newer request of the same kind was issued is discarded.

use crate::alert::{Alert, AlertId, AlertIds, Severity};
use crate::api::{ApiError, PatientsApi};
use crate::config::DeskConfig;
use crate::constants::{
    LOAD_PATIENTS_FAILED, LOAD_PATIENT_FAILED, LOAD_REMINDER_FAILED, LOAD_RISK_FAILED,
    PATIENT_NOT_FOUND, PATIENT_SAVED, RECORD_TREATMENT_FAILED, RECORD_TREATMENT_REJECTED,
    SAVE_PATIENT_FAILED, SAVE_PATIENT_REJECTED, TREATMENT_RECORDED,
};
use crate::form::PatientForm;
use crate::model::{PatientId, TreatmentDraft};
use crate::sequence::RequestSequencer;
use crate::table::{PatientTable, TableRow};
use crate::view::{Modal, PageView};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// State of the editor dialog.
///
/// `Idle → Creating | Editing(id) → Submitting → Idle`, with a failed submit returning to the
/// state it started from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Idle,
    Creating,
    Editing(PatientId),
    /// A save is in flight; carries the id being edited, if any.
    Submitting(Option<PatientId>),
}

impl EditorState {
    /// The record currently being edited, if any.
    pub fn current_patient_id(&self) -> Option<&PatientId> {
        match self {
            EditorState::Editing(id) | EditorState::Submitting(Some(id)) => Some(id),
            _ => None,
        }
    }

    fn after_failed_submit(editing: Option<PatientId>) -> Self {
        match editing {
            Some(id) => EditorState::Editing(id),
            None => EditorState::Creating,
        }
    }
}

/// Banner text for a failed write: the server's own message when it sent one, otherwise
/// `rejected` for an error status and `failed` when no usable response arrived.
fn write_failure_message(e: &ApiError, rejected: &str, failed: &str) -> String {
    match e {
        ApiError::Status { .. } | ApiError::NotFound => e
            .server_message()
            .filter(|m| !m.trim().is_empty())
            .map_or_else(|| rejected.to_string(), str::to_string),
        ApiError::Transport(_) | ApiError::Payload(_) => failed.to_string(),
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct PatientListController<A, V, M> {
    cfg: Arc<DeskConfig>,
    api: A,
    view: Arc<V>,
    modal: M,
    editor: Mutex<EditorState>,
    table: Mutex<PatientTable>,
    list_requests: RequestSequencer,
    editor_requests: RequestSequencer,
    alert_ids: AlertIds,
}

impl<A, V, M> PatientListController<A, V, M>
where
    A: PatientsApi,
    V: PageView,
    M: Modal,
{
    /// Bind a controller to its API client, page and editor dialog.
    pub fn new(cfg: Arc<DeskConfig>, api: A, view: Arc<V>, modal: M) -> Self {
        Self {
            cfg,
            api,
            view,
            modal,
            editor: Mutex::new(EditorState::Idle),
            table: Mutex::new(PatientTable::default()),
            list_requests: RequestSequencer::default(),
            editor_requests: RequestSequencer::default(),
            alert_ids: AlertIds::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &Arc<V> {
        &self.view
    }

    pub fn modal(&self) -> &M {
        &self.modal
    }

    pub fn editor_state(&self) -> EditorState {
        lock(&self.editor).clone()
    }

    pub fn current_patient_id(&self) -> Option<PatientId> {
        lock(&self.editor).current_patient_id().cloned()
    }

    /// Rows as last rendered.
    pub fn rendered_rows(&self) -> Vec<TableRow> {
        lock(&self.table).rows().to_vec()
    }

    /// Page-ready entry point: performs the initial list load.
    pub async fn initialise(&self) {
        tracing::debug!("initialising patient list");
        self.load_patients().await;
    }

    /// Fetch every patient and replace the table.
    ///
    /// On failure the table keeps its previous rows and a danger banner is shown.
    pub async fn load_patients(&self) {
        let ticket = self.list_requests.issue();

        match self.api.list_patients().await {
            Ok(patients) => {
                if !self.list_requests.is_current(ticket) {
                    tracing::debug!(
                        count = patients.len(),
                        "discarding stale patient list response"
                    );
                    return;
                }

                let table = PatientTable::render(&patients, self.cfg.date_format());
                self.view.replace_rows(table.rows());
                *lock(&self.table) = table;
                tracing::debug!(count = patients.len(), "rendered patient list");
            }
            Err(e) => {
                tracing::error!(error = %e, "error loading patients");
                self.show_alert(LOAD_PATIENTS_FAILED, Severity::Danger, false);
            }
        }
    }

    /// Load one record into the editor and open the dialog.
    ///
    /// A 404 raises a warning and leaves both the dialog and the editing id untouched.
    pub async fn edit_patient(&self, id: &PatientId) {
        let ticket = self.editor_requests.issue();

        match self.api.get_patient(id).await {
            Ok(patient) => {
                if !self.editor_requests.is_current(ticket) {
                    tracing::debug!(patient_id = %id, "discarding stale patient response");
                    return;
                }

                let form = PatientForm::from_patient(&patient);
                *lock(&self.editor) = EditorState::Editing(patient.id.clone());
                self.view.fill_form(&form);
                self.modal.show();
                tracing::debug!(patient_id = %patient.id, "editing patient");
            }
            Err(ApiError::NotFound) => {
                tracing::warn!(patient_id = %id, "patient not found");
                self.show_alert(PATIENT_NOT_FOUND, Severity::Warning, false);
            }
            Err(e) => {
                tracing::error!(patient_id = %id, error = %e, "error loading patient");
                self.show_alert(LOAD_PATIENT_FAILED, Severity::Danger, false);
            }
        }
    }

    /// Start the create flow: clear the editing id, reset the form and open the dialog.
    pub fn add_new_patient(&self) {
        self.editor_requests.invalidate();
        *lock(&self.editor) = EditorState::Creating;
        self.view.fill_form(&PatientForm::default());
        self.modal.show();
    }

    /// Submit the editor form.
    ///
    /// Both flows post to the collection endpoint without an id. On success the dialog
    /// closes, a success banner is shown and the list reloads. On failure the dialog stays
    /// open and the server's message (or a fallback) is shown.
    pub async fn save_patient(&self) {
        let draft = self.view.read_form().to_draft();
        let editing = {
            let mut state = lock(&self.editor);
            let editing = state.current_patient_id().cloned();
            *state = EditorState::Submitting(editing.clone());
            editing
        };

        if let Some(id) = &editing {
            tracing::debug!(patient_id = %id, "saving edited patient through the collection endpoint");
        }

        let result = self.api.save_patient(&draft).await;
        let submitting = EditorState::Submitting(editing.clone());

        match result {
            Ok(()) => {
                {
                    let mut state = lock(&self.editor);
                    if *state == submitting {
                        *state = EditorState::Idle;
                    }
                }
                self.modal.hide();
                self.show_alert(PATIENT_SAVED, Severity::Success, false);
                self.load_patients().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "error saving patient");
                {
                    let mut state = lock(&self.editor);
                    if *state == submitting {
                        *state = EditorState::after_failed_submit(editing);
                    }
                }
                let message =
                    write_failure_message(&e, SAVE_PATIENT_REJECTED, SAVE_PATIENT_FAILED);
                self.show_alert(message, Severity::Danger, false);
            }
        }
    }

    /// Show the server's risk analysis as a persistent banner.
    pub async fn view_patient_risk(&self, id: &PatientId) {
        match self.api.patient_risk(id).await {
            Ok(analysis) => {
                self.show_alert(analysis.risk_analysis, Severity::Info, true);
            }
            Err(ApiError::NotFound) => {
                tracing::warn!(patient_id = %id, "patient not found");
                self.show_alert(PATIENT_NOT_FOUND, Severity::Warning, false);
            }
            Err(e) => {
                tracing::error!(patient_id = %id, error = %e, "error loading risk analysis");
                self.show_alert(LOAD_RISK_FAILED, Severity::Danger, false);
            }
        }
    }

    /// Show the server's follow-up reminder as a persistent banner.
    pub async fn view_patient_reminder(&self, id: &PatientId) {
        match self.api.patient_reminder(id).await {
            Ok(reminder) => {
                self.show_alert(reminder.reminder, Severity::Info, true);
            }
            Err(ApiError::NotFound) => {
                tracing::warn!(patient_id = %id, "patient not found");
                self.show_alert(PATIENT_NOT_FOUND, Severity::Warning, false);
            }
            Err(e) => {
                tracing::error!(patient_id = %id, error = %e, "error loading follow-up reminder");
                self.show_alert(LOAD_REMINDER_FAILED, Severity::Danger, false);
            }
        }
    }

    /// Record a treatment for a patient. Failures follow the same messaging as saves.
    ///
    /// Returns whether the server accepted the treatment. The table is not reloaded.
    pub async fn record_treatment(&self, draft: &TreatmentDraft) -> bool {
        match self.api.record_treatment(draft).await {
            Ok(()) => {
                tracing::debug!(patient_id = %draft.patient_id, "treatment recorded");
                self.show_alert(TREATMENT_RECORDED, Severity::Success, false);
                true
            }
            Err(e) => {
                tracing::error!(patient_id = %draft.patient_id, error = %e, "error recording treatment");
                let message = write_failure_message(
                    &e,
                    RECORD_TREATMENT_REJECTED,
                    RECORD_TREATMENT_FAILED,
                );
                self.show_alert(message, Severity::Danger, false);
                false
            }
        }
    }

    /// Hide rendered rows whose text does not contain `term`, ignoring case.
    pub fn filter_patients(&self, term: &str) {
        let visible = lock(&self.table).filter(term);
        self.view.set_row_visibility(&visible);
    }

    /// Insert a banner above existing ones.
    ///
    /// Unless `persistent`, the banner is removed after the configured delay regardless of
    /// user interaction. The timer runs on the ambient tokio runtime; without one the banner
    /// stays until dismissed.
    pub fn show_alert(
        &self,
        message: impl Into<String>,
        severity: Severity,
        persistent: bool,
    ) -> AlertId {
        let alert = Alert {
            id: self.alert_ids.next(),
            message: message.into(),
            severity,
            persistent,
        };
        self.view.insert_alert(&alert);

        if !persistent {
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    let view = Arc::clone(&self.view);
                    let delay = self.cfg.alert_timeout();
                    let id = alert.id;
                    handle.spawn(async move {
                        tokio::time::sleep(delay).await;
                        view.remove_alert(id);
                    });
                }
                Err(_) => {
                    tracing::warn!(alert_id = alert.id.get(), "no runtime for alert timer");
                }
            }
        }

        alert.id
    }

    /// Remove a banner at the user's request.
    pub fn dismiss_alert(&self, id: AlertId) {
        self.view.remove_alert(id);
    }
}
