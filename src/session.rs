//! Interactive page session over stdin.
//!
//! Each line is one user gesture on the page: clicking a row action, typing into the
//! editor, pressing save, typing into the search box.

use anyhow::{Context, bail};
use desk_core::{FormField, Modal, PatientId};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::Desk;

const HELP: &str = "\
Commands:
  list                  reload the patient table
  add                   open the editor for a new patient
  edit <id>             load a patient into the editor
  set <field> <value>   type into an editor field (name, email, phone, last_visit,
                        next_visit, treatment_status, notes)
  form                  show the editor fields
  save                  submit the editor
  cancel                close the editor
  risk <id>             show the risk analysis for a patient
  reminder <id>         show the follow-up reminder for a patient
  search [term]         filter the table; no term shows every row
  alerts                list notifications
  dismiss <n>           dismiss notification number n
  help                  show this help
  quit                  leave the session";

#[derive(Debug, PartialEq, Eq)]
pub enum SessionCommand {
    List,
    Add,
    Edit(PatientId),
    Set(FormField, String),
    Form,
    Save,
    Cancel,
    Risk(PatientId),
    Reminder(PatientId),
    Search(String),
    Alerts,
    Dismiss(usize),
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> anyhow::Result<Option<SessionCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "list" => SessionCommand::List,
        "add" | "new" => SessionCommand::Add,
        "edit" => SessionCommand::Edit(patient_id(rest)?),
        "set" => {
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            if field.is_empty() {
                bail!("usage: set <field> <value>");
            }
            SessionCommand::Set(field.parse()?, value.trim().to_string())
        }
        "form" => SessionCommand::Form,
        "save" => SessionCommand::Save,
        "cancel" | "close" => SessionCommand::Cancel,
        "risk" => SessionCommand::Risk(patient_id(rest)?),
        "reminder" => SessionCommand::Reminder(patient_id(rest)?),
        "search" => SessionCommand::Search(rest.to_string()),
        "alerts" => SessionCommand::Alerts,
        "dismiss" => SessionCommand::Dismiss(
            rest.parse()
                .with_context(|| format!("not a notification number: {rest:?}"))?,
        ),
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => bail!("unknown command {other:?}; type `help` for a list"),
    };

    Ok(Some(command))
}

fn patient_id(arg: &str) -> anyhow::Result<PatientId> {
    if arg.is_empty() {
        bail!("a patient id is required");
    }
    Ok(match arg.parse::<PatientId>() {
        Ok(id) => id,
        Err(never) => match never {},
    })
}

/// Run the page: initial load, then one command per stdin line until `quit` or EOF.
pub async fn run(desk: &Desk) -> anyhow::Result<()> {
    desk.initialise().await;
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        tracing::debug!(?command, "session command");
        if !dispatch(desk, command).await {
            break;
        }
    }

    Ok(())
}

/// Apply one command. Returns `false` when the session should end.
async fn dispatch(desk: &Desk, command: SessionCommand) -> bool {
    let page = desk.view();
    let editor_open = desk.modal().is_open();

    match command {
        SessionCommand::List => desk.load_patients().await,
        SessionCommand::Add => {
            desk.add_new_patient();
            page.print_form();
        }
        SessionCommand::Edit(id) => {
            desk.edit_patient(&id).await;
            if desk.modal().is_open() {
                page.print_form();
            }
        }
        SessionCommand::Set(field, value) => {
            if editor_open {
                page.set_field(field, value);
            } else {
                println!("The editor is closed; use `add` or `edit <id>` first.");
            }
        }
        SessionCommand::Form => page.print_form(),
        SessionCommand::Save => {
            if editor_open {
                desk.save_patient().await;
            } else {
                println!("The editor is closed; use `add` or `edit <id>` first.");
            }
        }
        SessionCommand::Cancel => desk.modal().hide(),
        SessionCommand::Risk(id) => desk.view_patient_risk(&id).await,
        SessionCommand::Reminder(id) => desk.view_patient_reminder(&id).await,
        SessionCommand::Search(term) => desk.filter_patients(&term),
        SessionCommand::Alerts => page.print_alerts(),
        SessionCommand::Dismiss(n) => match page.alert_at(n) {
            Some(id) => desk.dismiss_alert(id),
            None => println!("No notification number {n}."),
        },
        SessionCommand::Help => println!("{HELP}"),
        SessionCommand::Quit => return false,
    }

    true
}
