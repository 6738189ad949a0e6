//! Field-presence-aware partial updates
//!
//! A patch field is absent (leave the stored value), explicitly null (clear
//! it) or a value (overwrite it). Patch bodies mark every field
//! `#[serde(default)]` so an omitted key deserializes as [`Patch::Absent`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::service::ServiceError;

/// One field of a partial update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Apply to a nullable field
    pub fn apply(self, target: &mut Option<T>) {
        match self {
            Self::Absent => {}
            Self::Null => *target = None,
            Self::Value(value) => *target = Some(value),
        }
    }

    /// Apply to a required field; null is rejected
    pub fn apply_required(self, target: &mut T, field: &str) -> Result<(), ServiceError> {
        match self {
            Self::Absent => Ok(()),
            Self::Null => Err(ServiceError::required(field)),
            Self::Value(value) => {
                *target = value;
                Ok(())
            }
        }
    }

    /// Value if one was supplied
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Self::Absent => Patch::Absent,
            Self::Null => Patch::Null,
            Self::Value(value) => Patch::Value(f(value)),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(|v| v.map_or(Self::Null, Self::Value))
    }
}

/// Absent and null both serialize as `null`
impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

/// Sparse merge of a wire patch onto a stored record
pub trait RecordPatch<R> {
    /// Id carried in the patch body
    fn id(&self) -> Option<i64>;

    /// Copy every present field onto `target`
    fn apply_to(self, target: &mut R) -> Result<(), ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        name: Patch<String>,
        #[serde(default)]
        age: Patch<i32>,
    }

    #[test]
    fn test_presence_is_distinguished() {
        let body: Body = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(body.name, Patch::Null);
        assert!(body.age.is_absent());

        let body: Body = serde_json::from_str(r#"{"name": "Rex", "age": 3}"#).unwrap();
        assert_eq!(body.name, Patch::Value("Rex".to_string()));
        assert_eq!(body.age.value(), Some(&3));
    }

    #[test]
    fn test_serializes_supplied_value_or_null() {
        assert_eq!(serde_json::to_value(Patch::Value(3)).unwrap(), serde_json::json!(3));
        assert_eq!(serde_json::to_value(Patch::<i32>::Null).unwrap(), serde_json::Value::Null);
        assert_eq!(serde_json::to_value(Patch::<i32>::Absent).unwrap(), serde_json::Value::Null);
    }

    #[test]
    fn test_apply_nullable() {
        let mut breed = Some("Beagle".to_string());
        Patch::Absent.apply(&mut breed);
        assert_eq!(breed.as_deref(), Some("Beagle"));
        Patch::Null.apply(&mut breed);
        assert_eq!(breed, None);
        Patch::Value("Pug".to_string()).apply(&mut breed);
        assert_eq!(breed.as_deref(), Some("Pug"));
    }

    #[test]
    fn test_apply_required_rejects_null() {
        let mut owner_id = 1_i64;
        Patch::Value(2).apply_required(&mut owner_id, "ownerId").unwrap();
        assert_eq!(owner_id, 2);

        let err = Patch::<i64>::Null
            .apply_required(&mut owner_id, "ownerId")
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));
        assert_eq!(owner_id, 2);
    }
}
