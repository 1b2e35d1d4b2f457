//! Terminal rendering for the board

use console::Style;
use once_cell::sync::Lazy;

use crate::schema::{Student, StudentField};

use super::form::FormErrors;
use super::notification::{Notification, Severity};

static HEADER: Lazy<Style> = Lazy::new(|| Style::new().bold());
static DIM: Lazy<Style> = Lazy::new(|| Style::new().dim());
static SUCCESS: Lazy<Style> = Lazy::new(|| Style::new().green());
static WARNING: Lazy<Style> = Lazy::new(|| Style::new().yellow());
static DANGER: Lazy<Style> = Lazy::new(|| Style::new().red().bold());

pub const EMPTY_LIST: &str = "No students found.";

const COLUMNS: [&str; 5] = ["ID", "Name", "Email", "Contact", "Department"];

fn row(student: &Student) -> [&str; 5] {
    [
        student.id.as_str(),
        student.name.as_str(),
        student.email.as_str(),
        student.contact.as_str(),
        student.department.as_str(),
    ]
}

fn pad_line(cells: [&str; 5], widths: [usize; 5]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<w$}", cell, w = w))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Aligned table of records followed by a count line.
pub fn render_table(students: &[&Student]) -> String {
    if students.is_empty() {
        return DIM.apply_to(EMPTY_LIST).to_string();
    }

    let mut widths = COLUMNS.map(|c| c.chars().count());
    for student in students {
        for (w, cell) in widths.iter_mut().zip(row(student)) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&HEADER.apply_to(pad_line(COLUMNS, widths)).to_string());
    out.push('\n');
    for student in students {
        out.push_str(&pad_line(row(student), widths));
        out.push('\n');
    }

    let noun = if students.len() == 1 { "student" } else { "students" };
    out.push_str(
        &DIM.apply_to(format!("{} {}", students.len(), noun))
            .to_string(),
    );
    out
}

pub fn render_notification(notification: &Notification) -> String {
    let style = match notification.severity {
        Severity::Success => &*SUCCESS,
        Severity::Warning => &*WARNING,
        Severity::Danger => &*DANGER,
    };
    style.apply_to(&notification.message).to_string()
}

/// One line per failing field, in field order.
pub fn render_form_errors(errors: &FormErrors) -> String {
    StudentField::ALL
        .iter()
        .filter_map(|field| {
            errors
                .get(field)
                .map(|msg| format!("  {}: {}", field.as_str(), WARNING.apply_to(msg)))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
