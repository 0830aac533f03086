//! Terminal rendition of the patient page.
//!
//! `ConsolePage` keeps the same state a browser page would (rows, their visibility, editor
//! fields and the banner stack) and prints each change to stdout.

use desk_core::{Alert, AlertId, FormField, Modal, PageView, PatientForm, TableRow};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

const HEADERS: [&str; 6] = [
    "Name",
    "Last Visit",
    "Next Visit",
    "Risk",
    "Treatment Status",
    "Actions",
];

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
pub struct ConsolePage {
    rows: Mutex<Vec<TableRow>>,
    visible: Mutex<Vec<bool>>,
    form: Mutex<PatientForm>,
    alerts: Mutex<Vec<Alert>>,
}

impl ConsolePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Type into one editor field.
    pub fn set_field(&self, field: FormField, value: impl Into<String>) {
        lock(&self.form).set_field(field, value);
    }

    pub fn form(&self) -> PatientForm {
        lock(&self.form).clone()
    }

    /// Id of the banner at 1-based `position`, as numbered by [`ConsolePage::print_alerts`].
    pub fn alert_at(&self, position: usize) -> Option<AlertId> {
        let index = position.checked_sub(1)?;
        lock(&self.alerts).get(index).map(|a| a.id)
    }

    pub fn print_table(&self) {
        let rows = lock(&self.rows);
        let visible = lock(&self.visible);
        print!("{}", render_table(&rows, &visible));
    }

    pub fn print_form(&self) {
        let form = lock(&self.form);
        for field in FormField::ALL {
            println!("  {:<17} {}", field.as_str(), form.field(field));
        }
    }

    pub fn print_alerts(&self) {
        let alerts = lock(&self.alerts);
        if alerts.is_empty() {
            println!("No notifications.");
            return;
        }
        for (i, alert) in alerts.iter().enumerate() {
            println!("{:>3}. {}", i + 1, banner(alert));
        }
    }
}

impl PageView for ConsolePage {
    fn replace_rows(&self, rows: &[TableRow]) {
        *lock(&self.rows) = rows.to_vec();
        *lock(&self.visible) = vec![true; rows.len()];
        self.print_table();
    }

    fn set_row_visibility(&self, visible: &[bool]) {
        *lock(&self.visible) = visible.to_vec();
        self.print_table();
    }

    fn fill_form(&self, form: &PatientForm) {
        *lock(&self.form) = form.clone();
    }

    fn read_form(&self) -> PatientForm {
        self.form()
    }

    fn insert_alert(&self, alert: &Alert) {
        println!("{}", banner(alert));
        lock(&self.alerts).insert(0, alert.clone());
    }

    fn remove_alert(&self, id: AlertId) {
        lock(&self.alerts).retain(|a| a.id != id);
    }
}

fn banner(alert: &Alert) -> String {
    let pin = if alert.persistent { " (pinned)" } else { "" };
    format!("[{}]{pin} {}", alert.severity, alert.message)
}

/// Lay out the visible rows as a fixed-width text table.
pub fn render_table(rows: &[TableRow], visible: &[bool]) -> String {
    let shown = rows
        .iter()
        .enumerate()
        .filter(|(i, _)| visible.get(*i).copied().unwrap_or(true))
        .map(|(_, row)| row);

    let mut cells: Vec<Vec<String>> = Vec::new();
    let mut notes = Vec::new();
    for row in shown {
        match row {
            TableRow::Patient(p) => cells.push(vec![
                p.name.clone(),
                p.last_visit.clone(),
                p.next_visit.clone(),
                format!("{} ({})", p.risk.label, p.risk.tone.css_class()),
                p.treatment_status.clone(),
                format!("risk {0} | edit {0}", p.id),
            ]),
            TableRow::Placeholder { text, .. } => notes.push(text.clone()),
        }
    }

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.len()).collect();
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |line: &[String]| -> String {
        let padded: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    let mut out = format_line(&header);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format_line(&rule));
    for line in &cells {
        out.push_str(&format_line(line));
    }
    for note in notes {
        out.push_str(&note);
        out.push('\n');
    }
    out
}

/// Editor dialog state for the terminal session.
#[derive(Debug, Default)]
pub struct ConsoleModal {
    open: AtomicBool,
}

impl ConsoleModal {
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}

impl Modal for ConsoleModal {
    fn show(&self) {
        self.open.store(true, Ordering::SeqCst);
        tracing::debug!("editor opened");
    }

    fn hide(&self) {
        self.open.store(false, Ordering::SeqCst);
        tracing::debug!("editor closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use desk_core::{BadgeTone, PatientId, PatientRow, RiskBadge};

    fn row(id: i64, name: &str) -> TableRow {
        TableRow::Patient(PatientRow {
            id: PatientId::Number(id),
            name: name.into(),
            last_visit: "3/5/2024".into(),
            next_visit: "N/A".into(),
            risk: RiskBadge {
                label: "High".into(),
                tone: BadgeTone::Danger,
            },
            treatment_status: "Filling".into(),
        })
    }

    #[test]
    fn renders_only_visible_rows() {
        let rows = vec![row(1, "Amy Pond"), row(2, "Rory Williams")];
        let out = render_table(&rows, &[false, true]);

        assert!(out.starts_with("Name"));
        assert!(out.contains("Rory Williams  3/5/2024"));
        assert!(out.contains("High (danger)"));
        assert!(out.contains("risk 2 | edit 2"));
        assert!(!out.contains("Amy Pond"));
    }

    #[test]
    fn renders_placeholder_below_headers() {
        let rows = vec![TableRow::Placeholder {
            text: "No patients found".into(),
            colspan: 6,
        }];
        let out = render_table(&rows, &[true]);
        assert_eq!(out.lines().last(), Some("No patients found"));
        assert_eq!(out.lines().count(), 3);
    }

    #[test]
    fn typed_fields_are_read_back() {
        let page = ConsolePage::new();
        page.set_field(FormField::Name, "Amy Pond");
        page.set_field(FormField::NextVisit, "2024-09-01");

        let form = page.read_form();
        assert_eq!(form.name, "Amy Pond");
        assert_eq!(form.next_visit, "2024-09-01");
        assert_eq!(form.email, "");
        assert_eq!(page.alert_at(0), None);
        assert_eq!(page.alert_at(1), None);
    }
}
