//! Commuting categories offered by the survey

use serde::{Deserialize, Serialize};
use std::fmt;

/// Commuting method a respondent can select.
///
/// Declaration order is the display order of the form, and the `Ord` derive
/// relies on it so ordered collections keyed by this type iterate the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CommutingType {
    #[serde(rename = "Coche Personal")]
    PersonalCar,
    #[serde(rename = "Metro/Tren cercanías")]
    MetroSuburbanTrain,
    #[serde(rename = "Tren media distancia")]
    MediumDistanceTrain,
    #[serde(rename = "Caminando-Bicicleta")]
    WalkingCycling,
    #[serde(rename = "Taxi")]
    Taxi,
}

impl CommutingType {
    /// All commuting types in display order
    pub const ALL: [CommutingType; 5] = [
        Self::PersonalCar,
        Self::MetroSuburbanTrain,
        Self::MediumDistanceTrain,
        Self::WalkingCycling,
        Self::Taxi,
    ];

    /// Label shown in the form; identical to the serialized value
    pub fn label(&self) -> &'static str {
        match self {
            Self::PersonalCar => "Coche Personal",
            Self::MetroSuburbanTrain => "Metro/Tren cercanías",
            Self::MediumDistanceTrain => "Tren media distancia",
            Self::WalkingCycling => "Caminando-Bicicleta",
            Self::Taxi => "Taxi",
        }
    }

    /// Whether a travel cost is collected for this type
    pub fn is_cost_bearing(&self) -> bool {
        matches!(
            self,
            Self::MetroSuburbanTrain | Self::MediumDistanceTrain | Self::Taxi
        )
    }
}

impl fmt::Display for CommutingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_declaration_order() {
        let mut sorted = CommutingType::ALL;
        sorted.sort();
        assert_eq!(sorted, CommutingType::ALL);
    }

    #[test]
    fn test_cost_bearing_subset() {
        let cost_bearing: Vec<_> = CommutingType::ALL
            .into_iter()
            .filter(CommutingType::is_cost_bearing)
            .collect();
        assert_eq!(
            cost_bearing,
            vec![
                CommutingType::MetroSuburbanTrain,
                CommutingType::MediumDistanceTrain,
                CommutingType::Taxi,
            ]
        );
    }

    #[test]
    fn test_serializes_as_label() {
        for kind in CommutingType::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.label()));
        }
    }

    #[test]
    fn test_deserializes_from_label() {
        let parsed: CommutingType = serde_json::from_str("\"Metro/Tren cercanías\"").unwrap();
        assert_eq!(parsed, CommutingType::MetroSuburbanTrain);
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(CommutingType::WalkingCycling.to_string(), "Caminando-Bicicleta");
    }
}
