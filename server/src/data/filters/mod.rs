//! Criteria filtering
//!
//! Typed per-field filters, criteria aggregates and the predicates they
//! translate into.
//!
//! ## Usage
//!
//! ```no_run
//! use petcare_server::data::filters::{Criteria, parse_criteria};
//! use petcare_server::domain::PetCriteria;
//!
//! let criteria: PetCriteria =
//!     parse_criteria([("age.greaterThan", "2"), ("name.contains", "Rex")]).unwrap();
//! let predicate = criteria.to_predicate();
//! assert_eq!(predicate.conditions().len(), 2);
//! ```

mod criteria;
mod error;
mod parser;
mod predicate;
mod types;

pub(crate) use criteria::criteria;
pub use criteria::Criteria;
pub use error::FilterError;
pub use parser::{
    DISTINCT_KEY, MAX_FILTER_LIST_ITEMS, MAX_FILTER_PARAMS, parse_criteria, split_key,
};
pub use predicate::{Condition, Op, Predicate, SqlParams};
pub use types::{
    EnumFilter, Filter, FilterOperand, InstantFilter, IntegerFilter, LongFilter, OrderedOperand,
    RangeFilter, StringFilter, ZonedDateTimeFilter,
};
