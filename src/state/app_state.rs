//! Application state definitions

use super::forms::{next_focus, prev_focus, Focus, FormField};
use super::{DetailEdit, DetailField, FormSnapshot, FormState, IdentityField};
use crate::error::{FieldError, ValidationError};
use crate::submission::SubmissionStatus;

/// Tone of a notice dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
    Warning,
}

/// Modal message shown over the form until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "Enviado",
            NoticeKind::Failure => "Error",
            NoticeKind::Warning => "Formulario incompleto",
        }
    }
}

/// Main application state
#[derive(Debug)]
pub struct AppState {
    /// Canonical survey data
    pub form: FormState,
    focus: Focus,
    /// Edit buffer of the focused row, if it is editable
    editor: Option<FormField>,
    pub submission: SubmissionStatus,
    pub notice: Option<Notice>,
    /// One-line feedback in the status bar
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let form = FormState::new();
        let focus = Focus::Identity(IdentityField::Name);
        let editor = focus.editor(&form);
        Self {
            form,
            focus,
            editor,
            submission: SubmissionStatus::Idle,
            notice: None,
            status_message: None,
        }
    }
}

impl AppState {
    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn editor(&self) -> Option<&FormField> {
        self.editor.as_ref()
    }

    /// Write the edit buffer back into the form state.
    ///
    /// On a parse error or a refused edit the form state is left unchanged and
    /// the buffer is kept.
    pub fn commit_editor(&mut self) -> Result<(), FieldError> {
        let Some(editor) = &self.editor else {
            return Ok(());
        };
        match self.focus {
            Focus::Identity(field) => self.form.set_identity_field(field, editor.as_text()),
            Focus::Detail(kind, field) => {
                let edit = match field {
                    DetailField::StartDate => DetailEdit::StartDate(editor.parse_date()?),
                    DetailField::EndDate => DetailEdit::EndDate(editor.parse_date()?),
                    DetailField::Distance => DetailEdit::DistanceKm(editor.parse_amount()?),
                    DetailField::Cost => DetailEdit::CostEuros(editor.parse_amount()?),
                };
                if !self.form.set_detail_field(kind, edit) {
                    return Err(FieldError::Rejected(field.label()));
                }
            }
            Focus::Toggle(_) | Focus::Submit => {}
        }
        Ok(())
    }

    /// Move focus to `target`, committing the current buffer first.
    /// An invalid buffer keeps the focus where it is.
    pub fn set_focus(&mut self, target: Focus) {
        match self.commit_editor() {
            Ok(()) => {
                self.focus = target;
                self.editor = target.editor(&self.form);
                self.status_message = None;
            }
            Err(err) => self.status_message = Some(err.to_string()),
        }
    }

    /// Move to next form row
    pub fn next_field(&mut self) {
        self.set_focus(next_focus(&self.form, self.focus));
    }

    /// Move to previous form row
    pub fn prev_field(&mut self) {
        self.set_focus(prev_focus(&self.form, self.focus));
    }

    /// Handle character input on the focused row
    pub fn input_char(&mut self, c: char) {
        if let Some(editor) = &mut self.editor {
            editor.push_char(c);
        }
    }

    /// Handle backspace on the focused row
    pub fn backspace(&mut self) {
        if let Some(editor) = &mut self.editor {
            editor.pop_char();
        }
    }

    /// Empty the focused field's buffer
    pub fn clear_field(&mut self) {
        if let Some(editor) = &mut self.editor {
            editor.clear();
        }
    }

    /// Flip the commuting type under the cursor. Returns false when the
    /// focused row is not a commuting type.
    pub fn toggle_focused_type(&mut self) -> bool {
        let Focus::Toggle(kind) = self.focus else {
            return false;
        };
        let selected = !self.form.is_selected(kind);
        self.form.toggle_commuting_type(kind, selected);
        true
    }

    /// Commit pending input and check required fields.
    ///
    /// Returns the snapshot to submit, or `None` after raising a notice or a
    /// status message explaining what is missing.
    pub fn ready_snapshot(&mut self) -> Option<FormSnapshot> {
        if let Err(err) = self.commit_editor() {
            self.status_message = Some(err.to_string());
            return None;
        }
        if self.form.selected_types().next().is_none() {
            self.notice = Some(Notice::new(
                NoticeKind::Warning,
                "Seleccione al menos un tipo de commuting",
            ));
            return None;
        }
        if let Err(ValidationError::Incomplete(missing)) = self.form.validate() {
            let list: Vec<String> = missing.iter().map(ToString::to_string).collect();
            self.notice = Some(Notice::new(
                NoticeKind::Warning,
                format!("Complete los campos obligatorios:\n{}", list.join("\n")),
            ));
            return None;
        }
        Some(self.form.snapshot())
    }

    /// Close the notice; a finished submission goes back to idle
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
        if matches!(
            self.submission,
            SubmissionStatus::Succeeded | SubmissionStatus::Failed
        ) {
            self.submission = SubmissionStatus::Idle;
        }
    }
}
