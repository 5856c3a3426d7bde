//! Canonical survey state: identity, selected commuting types and their details

use super::commuting::CommutingType;
use crate::error::ValidationError;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;

/// Respondent identity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub company: String,
}

/// Identity field addressed by an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityField {
    Name,
    Company,
}

impl IdentityField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Nombre",
            Self::Company => "Empresa",
        }
    }
}

/// Per-type detail field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailField {
    StartDate,
    EndDate,
    Distance,
    Cost,
}

impl DetailField {
    /// Fields shown for a commuting type, in display order
    pub fn for_type(kind: CommutingType) -> &'static [DetailField] {
        if kind.is_cost_bearing() {
            &[Self::StartDate, Self::EndDate, Self::Distance, Self::Cost]
        } else {
            &[Self::StartDate, Self::EndDate, Self::Distance]
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::StartDate => "Fecha Inicial",
            Self::EndDate => "Fecha Final",
            Self::Distance => "Distancia (en km)",
            Self::Cost => "Coste del viaje (en €)",
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Self::StartDate | Self::EndDate)
    }
}

/// Details collected for one selected commuting type.
///
/// Every field starts unset; amounts are finite and non-negative.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailRecord {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub distance_km: Option<f64>,
    pub cost_euros: Option<f64>,
}

impl DetailRecord {
    /// Whether the given field holds a value
    pub fn is_set(&self, field: DetailField) -> bool {
        match field {
            DetailField::StartDate => self.start_date.is_some(),
            DetailField::EndDate => self.end_date.is_some(),
            DetailField::Distance => self.distance_km.is_some(),
            DetailField::Cost => self.cost_euros.is_some(),
        }
    }

    /// Text for a field as the form shows it; empty when unset
    pub fn display_value(&self, field: DetailField) -> String {
        match field {
            DetailField::StartDate => format_date(self.start_date),
            DetailField::EndDate => format_date(self.end_date),
            DetailField::Distance => format_amount(self.distance_km),
            DetailField::Cost => format_amount(self.cost_euros),
        }
    }
}

/// Wire and display format of dates (`YYYY-MM-DD`), empty when unset
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn format_amount(amount: Option<f64>) -> String {
    amount.map(|a| a.to_string()).unwrap_or_default()
}

/// One edit of a detail field. `None` clears the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetailEdit {
    StartDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
    DistanceKm(Option<f64>),
    CostEuros(Option<f64>),
}

impl DetailEdit {
    pub fn field(&self) -> DetailField {
        match self {
            Self::StartDate(_) => DetailField::StartDate,
            Self::EndDate(_) => DetailField::EndDate,
            Self::DistanceKm(_) => DetailField::Distance,
            Self::CostEuros(_) => DetailField::Cost,
        }
    }

    fn amount_is_valid(amount: Option<f64>) -> bool {
        amount.map_or(true, |a| a.is_finite() && a >= 0.0)
    }
}

/// A required field that is still empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissingField {
    Name,
    Company,
    Detail(CommutingType, DetailField),
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => f.write_str(IdentityField::Name.label()),
            Self::Company => f.write_str(IdentityField::Company.label()),
            Self::Detail(kind, field) => write!(f, "{kind}: {}", field.label()),
        }
    }
}

/// Everything the user has entered.
///
/// A commuting type is selected exactly when it has an entry in `entries`, so
/// selection and details cannot drift apart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    identity: Identity,
    entries: BTreeMap<CommutingType, DetailRecord>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Set the name or company. Empty strings are accepted.
    pub fn set_identity_field(&mut self, field: IdentityField, value: impl Into<String>) {
        let value = value.into();
        match field {
            IdentityField::Name => self.identity.name = value,
            IdentityField::Company => self.identity.company = value,
        }
    }

    /// Select or deselect a commuting type.
    ///
    /// Selecting starts from an empty detail record; deselecting drops the
    /// type together with its details.
    pub fn toggle_commuting_type(&mut self, kind: CommutingType, selected: bool) {
        if selected {
            self.entries.entry(kind).or_default();
        } else if self.entries.remove(&kind).is_some() {
            tracing::debug!(%kind, "commuting type deselected, details dropped");
        }
    }

    pub fn is_selected(&self, kind: CommutingType) -> bool {
        self.entries.contains_key(&kind)
    }

    /// Selected types in display order
    pub fn selected_types(&self) -> impl Iterator<Item = CommutingType> + '_ {
        self.entries.keys().copied()
    }

    pub fn detail(&self, kind: CommutingType) -> Option<&DetailRecord> {
        self.entries.get(&kind)
    }

    /// Merge one field into the details of a selected type.
    ///
    /// Returns `false` and leaves the state untouched when the type is not
    /// selected, when a cost is set on a type that does not carry one, or when
    /// an amount is negative or not finite.
    pub fn set_detail_field(&mut self, kind: CommutingType, edit: DetailEdit) -> bool {
        let Some(record) = self.entries.get_mut(&kind) else {
            tracing::debug!(%kind, field = ?edit.field(), "ignoring detail edit for unselected type");
            return false;
        };

        match edit {
            DetailEdit::StartDate(date) => record.start_date = date,
            DetailEdit::EndDate(date) => record.end_date = date,
            DetailEdit::DistanceKm(km) => {
                if !DetailEdit::amount_is_valid(km) {
                    return false;
                }
                record.distance_km = km;
            }
            DetailEdit::CostEuros(euros) => {
                if !kind.is_cost_bearing() || !DetailEdit::amount_is_valid(euros) {
                    return false;
                }
                record.cost_euros = euros;
            }
        }
        true
    }

    /// Required fields that are still empty, in display order
    pub fn missing_fields(&self) -> Vec<MissingField> {
        let mut missing = Vec::new();
        if self.identity.name.trim().is_empty() {
            missing.push(MissingField::Name);
        }
        if self.identity.company.trim().is_empty() {
            missing.push(MissingField::Company);
        }
        for (kind, record) in &self.entries {
            for field in DetailField::for_type(*kind) {
                if !record.is_set(*field) {
                    missing.push(MissingField::Detail(*kind, *field));
                }
            }
        }
        missing
    }

    /// Required-field presence check run before a submission
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Incomplete(missing))
        }
    }

    /// Immutable copy for the submission pipeline
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            identity: self.identity.clone(),
            entries: self.entries.clone(),
        }
    }
}

/// Read-only view of a [`FormState`] taken at submit time
#[derive(Debug, Clone, PartialEq)]
pub struct FormSnapshot {
    identity: Identity,
    entries: BTreeMap<CommutingType, DetailRecord>,
}

impl FormSnapshot {
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn selected_types(&self) -> impl Iterator<Item = CommutingType> + '_ {
        self.entries.keys().copied()
    }

    pub fn selected_count(&self) -> usize {
        self.entries.len()
    }

    pub fn detail(&self, kind: CommutingType) -> Option<&DetailRecord> {
        self.entries.get(&kind)
    }
}
