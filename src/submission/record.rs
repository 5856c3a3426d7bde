//! Flattened per-type payload sent to the endpoint

use crate::state::{format_date, CommutingType, DetailRecord, FormSnapshot, Identity};
use serde::Serialize;

/// One record per selected commuting type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundRecord {
    pub name: String,
    pub company: String,
    #[serde(rename = "type")]
    pub kind: CommutingType,
    pub start_date: String,
    pub end_date: String,
    pub distance: f64,
    pub cost: f64,
}

impl OutboundRecord {
    /// Flatten identity and details, applying the defaults for unset fields:
    /// dates become `""`, distance and cost become `0`.
    ///
    /// Cost is always `0` for types that do not carry one.
    pub fn derive(identity: &Identity, kind: CommutingType, detail: Option<&DetailRecord>) -> Self {
        let cost = if kind.is_cost_bearing() {
            detail.and_then(|d| d.cost_euros).unwrap_or(0.0)
        } else {
            0.0
        };

        Self {
            name: identity.name.clone(),
            company: identity.company.clone(),
            kind,
            start_date: format_date(detail.and_then(|d| d.start_date)),
            end_date: format_date(detail.and_then(|d| d.end_date)),
            distance: detail.and_then(|d| d.distance_km).unwrap_or(0.0),
            cost,
        }
    }
}

/// Records for every selected type of a snapshot, in display order
pub fn derive_records(snapshot: &FormSnapshot) -> Vec<OutboundRecord> {
    snapshot
        .selected_types()
        .map(|kind| OutboundRecord::derive(snapshot.identity(), kind, snapshot.detail(kind)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DetailEdit, FormState, IdentityField};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn identity() -> Identity {
        Identity {
            name: "Ana".to_string(),
            company: "Acme".to_string(),
        }
    }

    /// Ana from Acme commuting by car and taxi in January 2024
    fn car_and_taxi_form() -> FormState {
        let mut form = FormState::new();
        form.set_identity_field(IdentityField::Name, "Ana");
        form.set_identity_field(IdentityField::Company, "Acme");
        for (kind, km) in [(CommutingType::PersonalCar, 12.0), (CommutingType::Taxi, 5.0)] {
            form.toggle_commuting_type(kind, true);
            form.set_detail_field(kind, DetailEdit::StartDate(date(2024, 1, 1)));
            form.set_detail_field(kind, DetailEdit::EndDate(date(2024, 1, 31)));
            form.set_detail_field(kind, DetailEdit::DistanceKm(Some(km)));
        }
        form.set_detail_field(CommutingType::Taxi, DetailEdit::CostEuros(Some(8.0)));
        form
    }

    #[test]
    fn test_car_and_taxi_scenario() {
        let records = derive_records(&car_and_taxi_form().snapshot());

        assert_eq!(
            records,
            vec![
                OutboundRecord {
                    name: "Ana".to_string(),
                    company: "Acme".to_string(),
                    kind: CommutingType::PersonalCar,
                    start_date: "2024-01-01".to_string(),
                    end_date: "2024-01-31".to_string(),
                    distance: 12.0,
                    cost: 0.0,
                },
                OutboundRecord {
                    name: "Ana".to_string(),
                    company: "Acme".to_string(),
                    kind: CommutingType::Taxi,
                    start_date: "2024-01-01".to_string(),
                    end_date: "2024-01-31".to_string(),
                    distance: 5.0,
                    cost: 8.0,
                },
            ]
        );
    }

    #[test]
    fn test_one_record_per_selected_type() {
        let mut form = FormState::new();
        for (count, kind) in CommutingType::ALL.into_iter().enumerate() {
            form.toggle_commuting_type(kind, true);
            let records = derive_records(&form.snapshot());
            assert_eq!(records.len(), count + 1);
            let kinds: Vec<_> = records.iter().map(|r| r.kind).collect();
            let selected: Vec<_> = form.selected_types().collect();
            assert_eq!(kinds, selected);
        }
    }

    #[test]
    fn test_unset_fields_use_defaults() {
        let record = OutboundRecord::derive(&identity(), CommutingType::Taxi, None);
        assert_eq!(record.start_date, "");
        assert_eq!(record.end_date, "");
        assert_eq!(record.distance, 0.0);
        assert_eq!(record.cost, 0.0);

        let empty = DetailRecord::default();
        let record = OutboundRecord::derive(&identity(), CommutingType::Taxi, Some(&empty));
        assert_eq!(record.start_date, "");
        assert_eq!(record.distance, 0.0);
    }

    #[test]
    fn test_cost_is_zero_for_non_cost_bearing_types() {
        // Bypass the form to simulate a stale cost on a type without one
        let detail = DetailRecord {
            cost_euros: Some(42.0),
            ..Default::default()
        };
        for kind in CommutingType::ALL {
            let record = OutboundRecord::derive(&identity(), kind, Some(&detail));
            let expected = if kind.is_cost_bearing() { 42.0 } else { 0.0 };
            assert_eq!(record.cost, expected, "cost for {kind}");
        }
    }

    #[test]
    fn test_wire_format_is_flat() {
        let record = OutboundRecord::derive(
            &identity(),
            CommutingType::MetroSuburbanTrain,
            Some(&DetailRecord {
                start_date: date(2024, 2, 1),
                end_date: date(2024, 2, 29),
                distance_km: Some(7.5),
                cost_euros: Some(1.5),
            }),
        );
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "name": "Ana",
                "company": "Acme",
                "type": "Metro/Tren cercanías",
                "startDate": "2024-02-01",
                "endDate": "2024-02-29",
                "distance": 7.5,
                "cost": 1.5,
            })
        );
    }
}
