//! Criteria: one optional filter per filterable field of a record kind
//!
//! Criteria types are declared with the [`criteria!`] macro, which generates
//! the struct, its present-or-create accessors, the `Display` rendering and
//! the [`Criteria`] implementation that builds a [`Predicate`].

use std::fmt;
use std::hash::Hash;

use super::error::FilterError;
use super::predicate::Predicate;
use crate::data::traits::Record;

/// Aggregate of optional per-field filters for one record kind
pub trait Criteria:
    Clone + Default + fmt::Debug + fmt::Display + Eq + Hash + Send + Sync + 'static
{
    type Record: Record;

    /// Wire names of the filterable fields, in declaration order
    const FIELDS: &'static [&'static str];

    /// AND of one predicate per set filter; unset filters add nothing
    fn to_predicate(&self) -> Predicate;

    /// Set `field.operation` from a raw query-string value
    fn apply(&mut self, field: &str, operation: &str, value: &str) -> Result<(), FilterError>;

    /// Distinct flag, true when never set
    fn is_distinct(&self) -> bool;

    fn set_distinct(&mut self, distinct: bool);

    /// Copy with every set filter cloned and every unset filter left unset
    fn copy(&self) -> Self {
        self.clone()
    }
}

/// Declare a criteria struct.
///
/// Each entry names the field (also its storage column), its filter type and
/// its wire name:
///
/// ```text
/// criteria! {
///     pub struct PetCriteria for Pet {
///         owner_id: LongFilter => "ownerId",
///         name: StringFilter => "name",
///     }
/// }
/// ```
macro_rules! criteria {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident for $record:ty {
            $($field:ident : $filter:ty => $wire:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        $vis struct $name {
            $(
                #[serde(skip_serializing_if = "Option::is_none")]
                pub $field: Option<$filter>,
            )*
            #[serde(skip_serializing_if = "Option::is_none")]
            pub distinct: Option<bool>,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            $(
                pub fn $field(&mut self) -> &mut $filter {
                    self.$field.get_or_insert_with(Default::default)
                }
            )*
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}{{", stringify!($name))?;
                $(
                    if let Some(filter) = &self.$field {
                        write!(f, "{}={}, ", $wire, filter)?;
                    }
                )*
                if let Some(distinct) = self.distinct {
                    write!(f, "distinct={}, ", distinct)?;
                }
                write!(f, "}}")
            }
        }

        impl $crate::data::filters::Criteria for $name {
            type Record = $record;

            const FIELDS: &'static [&'static str] = &[$($wire),*];

            fn to_predicate(&self) -> $crate::data::filters::Predicate {
                let mut predicate = $crate::data::filters::Predicate::all()
                    .with_distinct(self.distinct.unwrap_or(true));
                $(
                    if let Some(filter) = &self.$field {
                        $crate::data::filters::Filter::push_conditions(
                            filter,
                            stringify!($field),
                            &mut predicate,
                        );
                    }
                )*
                predicate
            }

            fn apply(
                &mut self,
                field: &str,
                operation: &str,
                value: &str,
            ) -> Result<(), $crate::data::filters::FilterError> {
                match field {
                    $(
                        $wire => {
                            let mut filter = self.$field.clone().unwrap_or_default();
                            $crate::data::filters::Filter::apply(&mut filter, operation, value)
                                .map_err(|e| e.for_field(field))?;
                            self.$field = Some(filter);
                            Ok(())
                        }
                    )*
                    _ => Err($crate::data::filters::FilterError::UnknownField(
                        field.to_string(),
                    )),
                }
            }

            fn is_distinct(&self) -> bool {
                self.distinct.unwrap_or(true)
            }

            fn set_distinct(&mut self, distinct: bool) {
                self.distinct = Some(distinct);
            }
        }
    };
}

pub(crate) use criteria;
