//! Edit buffer for the focused form field

use crate::error::FieldError;
use chrono::NaiveDate;

/// Longest accepted date input (`YYYY-MM-DD`)
const DATE_LEN: usize = 10;

/// Kind of input a field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
    Number,
}

/// Text being typed into one field before it is committed to the form state
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: String,
    pub kind: FieldKind,
    buffer: String,
}

impl FormField {
    /// Create a field pre-filled with the current value
    pub fn new(label: &str, kind: FieldKind, value: String) -> Self {
        Self {
            label: label.to_string(),
            kind,
            buffer: value,
        }
    }

    pub fn as_text(&self) -> &str {
        &self.buffer
    }

    /// Push a character, ignoring characters the field kind cannot hold
    pub fn push_char(&mut self, c: char) {
        match self.kind {
            FieldKind::Text => self.buffer.push(c),
            FieldKind::Date => {
                if (c.is_ascii_digit() || c == '-') && self.buffer.len() < DATE_LEN {
                    self.buffer.push(c);
                }
            }
            FieldKind::Number => {
                if c.is_ascii_digit() {
                    self.buffer.push(c);
                } else if (c == '.' || c == ',') && !self.buffer.contains('.') {
                    self.buffer.push('.');
                }
            }
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        self.buffer.pop();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Parse the buffer as a date; an empty buffer means "unset"
    pub fn parse_date(&self) -> Result<Option<NaiveDate>, FieldError> {
        let text = self.buffer.trim();
        if text.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| FieldError::InvalidDate(text.to_string()))
    }

    /// Parse the buffer as a non-negative amount; an empty buffer means "unset"
    pub fn parse_amount(&self) -> Result<Option<f64>, FieldError> {
        let text = self.buffer.trim();
        if text.is_empty() {
            return Ok(None);
        }
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Ok(Some(value)),
            _ => Err(FieldError::InvalidNumber(text.to_string())),
        }
    }
}
