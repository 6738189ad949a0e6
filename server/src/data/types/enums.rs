//! Enumerated record fields
//!
//! Members are stored and exchanged as their upper-case names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::data::filters::FilterOperand;
use crate::data::types::value::FieldValue;

/// Raised when text does not name a member of an enum
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}', expected one of: {expected}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

/// Declares the name table, `FromStr`, `Display` and filter operand impl for
/// a field enum.
macro_rules! field_enum {
    ($name:ident, $filter:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(UnknownVariant {
                        kind: stringify!($name),
                        value: s.to_string(),
                        expected: Self::ALL
                            .iter()
                            .map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    }),
                }
            }
        }

        impl FilterOperand for $name {
            const FILTER_NAME: &'static str = $filter;

            fn parse_operand(raw: &str) -> Result<Self, String> {
                raw.parse().map_err(|e: UnknownVariant| e.to_string())
            }

            fn to_value(&self) -> FieldValue {
                FieldValue::Text(self.as_str().to_string())
            }
        }

        impl From<$name> for FieldValue {
            fn from(value: $name) -> Self {
                FieldValue::Text(value.as_str().to_string())
            }
        }
    };
}

/// Pet gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

field_enum!(Gender, "GenderFilter", {
    Male => "MALE",
    Female => "FEMALE",
});

/// Appointment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApptStatus {
    Pending,
    Confirmed,
    Cancelled,
    Done,
}

field_enum!(ApptStatus, "ApptStatusFilter", {
    Pending => "PENDING",
    Confirmed => "CONFIRMED",
    Cancelled => "CANCELLED",
    Done => "DONE",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display_round_trip() {
        for status in ApptStatus::ALL {
            assert_eq!(status.to_string().parse::<ApptStatus>().unwrap(), *status);
        }
        assert_eq!("FEMALE".parse::<Gender>().unwrap(), Gender::Female);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let err = "male".parse::<Gender>().unwrap_err();
        assert_eq!(err.kind, "Gender");
        assert_eq!(
            err.to_string(),
            "unknown Gender 'male', expected one of: MALE, FEMALE"
        );
    }

    #[test]
    fn test_serde_uses_upper_case_names() {
        assert_eq!(
            serde_json::to_string(&ApptStatus::Cancelled).unwrap(),
            "\"CANCELLED\""
        );
        let gender: Gender = serde_json::from_str("\"MALE\"").unwrap();
        assert_eq!(gender, Gender::Male);
        assert!(serde_json::from_str::<Gender>("\"Male\"").is_err());
    }

    #[test]
    fn test_filter_operand() {
        assert_eq!(Gender::FILTER_NAME, "GenderFilter");
        assert_eq!(
            ApptStatus::parse_operand("DONE").unwrap().to_value(),
            FieldValue::Text("DONE".to_string())
        );
        assert!(ApptStatus::parse_operand("LATE").is_err());
    }
}
