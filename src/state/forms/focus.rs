//! Focusable rows of the survey form

use super::field::{FieldKind, FormField};
use crate::state::{CommutingType, DetailField, FormState, IdentityField};

/// A focusable row of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Identity(IdentityField),
    Toggle(CommutingType),
    Detail(CommutingType, DetailField),
    Submit,
}

impl Focus {
    /// Whether typing edits this row
    pub fn is_editable(&self) -> bool {
        matches!(self, Focus::Identity(_) | Focus::Detail(..))
    }

    /// Build an edit buffer holding the row's current value
    pub fn editor(&self, form: &FormState) -> Option<FormField> {
        match *self {
            Focus::Identity(field) => {
                let identity = form.identity();
                let value = match field {
                    IdentityField::Name => identity.name.clone(),
                    IdentityField::Company => identity.company.clone(),
                };
                Some(FormField::new(field.label(), FieldKind::Text, value))
            }
            Focus::Detail(kind, field) => {
                let value = form
                    .detail(kind)
                    .map(|d| d.display_value(field))
                    .unwrap_or_default();
                let field_kind = if field.is_date() {
                    FieldKind::Date
                } else {
                    FieldKind::Number
                };
                Some(FormField::new(field.label(), field_kind, value))
            }
            Focus::Toggle(_) | Focus::Submit => None,
        }
    }
}

/// Rows in display order for the current selection.
///
/// Detail rows only exist for selected types, so the order changes whenever
/// a commuting type is toggled.
pub fn focus_order(form: &FormState) -> Vec<Focus> {
    let mut order = vec![
        Focus::Identity(IdentityField::Name),
        Focus::Identity(IdentityField::Company),
    ];
    order.extend(CommutingType::ALL.into_iter().map(Focus::Toggle));
    for kind in form.selected_types() {
        order.extend(
            DetailField::for_type(kind)
                .iter()
                .map(|field| Focus::Detail(kind, *field)),
        );
    }
    order.push(Focus::Submit);
    order
}

/// Next row after `current`, wrapping around
pub fn next_focus(form: &FormState, current: Focus) -> Focus {
    let order = focus_order(form);
    let index = order.iter().position(|f| *f == current).unwrap_or(0);
    order[(index + 1) % order.len()]
}

/// Previous row before `current`, wrapping around
pub fn prev_focus(form: &FormState, current: Focus) -> Focus {
    let order = focus_order(form);
    let index = order.iter().position(|f| *f == current).unwrap_or(0);
    if index == 0 {
        order[order.len() - 1]
    } else {
        order[index - 1]
    }
}
