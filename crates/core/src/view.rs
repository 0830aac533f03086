//! Seams to the page that hosts the desk.
//!
//! The controller never touches markup directly. A host (a browser binding, a terminal, a
//! test double) implements these traits and decides how rows, fields and banners appear.

use crate::alert::{Alert, AlertId};
use crate::form::PatientForm;
use crate::table::TableRow;

/// The page surface: patient table, editor fields and notification area.
pub trait PageView: Send + Sync + 'static {
    /// Replace every table row; all new rows start visible.
    fn replace_rows(&self, rows: &[TableRow]);

    /// Show or hide rendered rows, one flag per row in render order.
    fn set_row_visibility(&self, visible: &[bool]);

    /// Write every editor field.
    fn fill_form(&self, form: &PatientForm);

    /// Read the editor fields as currently entered by the user.
    fn read_form(&self) -> PatientForm;

    /// Insert a banner above any existing ones.
    fn insert_alert(&self, alert: &Alert);

    /// Remove a banner. Unknown ids are ignored.
    fn remove_alert(&self, id: AlertId);
}

/// The dialog hosting the editor form.
pub trait Modal: Send + Sync {
    fn show(&self);
    fn hide(&self);
}
