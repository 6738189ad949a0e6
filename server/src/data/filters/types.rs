//! Filter primitives
//!
//! A filter is an optional, typed constraint on one field. Three kinds exist:
//! [`RangeFilter`] for totally ordered values (numbers, timestamps),
//! [`StringFilter`] for free text and [`EnumFilter`] for enumerations. Each
//! kind only carries the operations that make sense for it, and an ordered
//! operation on an unordered operand does not type-check.

use std::fmt;
use std::hash::Hash;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use super::error::FilterError;
use super::parser::MAX_FILTER_LIST_ITEMS;
use super::predicate::{Op, Predicate};
use crate::data::types::value::{FieldValue, truncate_micros};

/// A value that can appear as a filter operand
pub trait FilterOperand:
    Clone + fmt::Debug + fmt::Display + Eq + Hash + Serialize + Send + Sync + 'static
{
    /// Name of the filter kind wrapping this operand, used in `Display`
    const FILTER_NAME: &'static str;

    /// Parse a single query-string operand
    fn parse_operand(raw: &str) -> Result<Self, String>;

    /// Column value this operand compares against
    fn to_value(&self) -> FieldValue;
}

/// Operands with a natural total order
pub trait OrderedOperand: FilterOperand + Ord {}

/// Behaviour shared by every filter kind
pub trait Filter: Clone + Default + fmt::Debug + fmt::Display + Eq + Hash {
    /// True when no operation is set
    fn is_empty(&self) -> bool;

    /// Add one condition per set operation on `column`
    fn push_conditions(&self, column: &'static str, predicate: &mut Predicate);

    /// Set `operation` from its raw query-string value
    fn apply(&mut self, operation: &str, raw: &str) -> Result<(), FilterError>;
}

// ============================================================================
// Operands
// ============================================================================

impl FilterOperand for i64 {
    const FILTER_NAME: &'static str = "LongFilter";

    fn parse_operand(raw: &str) -> Result<Self, String> {
        raw.parse().map_err(|e: std::num::ParseIntError| e.to_string())
    }

    fn to_value(&self) -> FieldValue {
        FieldValue::Integer(*self)
    }
}

impl OrderedOperand for i64 {}

impl FilterOperand for i32 {
    const FILTER_NAME: &'static str = "IntegerFilter";

    fn parse_operand(raw: &str) -> Result<Self, String> {
        raw.parse().map_err(|e: std::num::ParseIntError| e.to_string())
    }

    fn to_value(&self) -> FieldValue {
        FieldValue::Integer(i64::from(*self))
    }
}

impl OrderedOperand for i32 {}

impl FilterOperand for DateTime<Utc> {
    const FILTER_NAME: &'static str = "InstantFilter";

    fn parse_operand(raw: &str) -> Result<Self, String> {
        DateTime::parse_from_rfc3339(raw)
            .map(|ts| truncate_micros(ts.with_timezone(&Utc)))
            .map_err(|e| format!("expected an RFC 3339 timestamp ({})", e))
    }

    fn to_value(&self) -> FieldValue {
        FieldValue::timestamp(self)
    }
}

impl OrderedOperand for DateTime<Utc> {}

impl FilterOperand for DateTime<FixedOffset> {
    const FILTER_NAME: &'static str = "ZonedDateTimeFilter";

    fn parse_operand(raw: &str) -> Result<Self, String> {
        DateTime::parse_from_rfc3339(raw)
            .map(truncate_micros)
            .map_err(|e| format!("expected an RFC 3339 timestamp ({})", e))
    }

    fn to_value(&self) -> FieldValue {
        FieldValue::timestamp(self)
    }
}

impl OrderedOperand for DateTime<FixedOffset> {}

// ============================================================================
// Parsing helpers
// ============================================================================

fn parse_one<T: FilterOperand>(operation: &str, raw: &str) -> Result<T, FilterError> {
    T::parse_operand(raw).map_err(|reason| FilterError::invalid(operation, raw, reason))
}

/// Comma-separated `in`/`notIn` items, capped so one list cannot exceed the
/// store's bound-parameter limit
fn split_list<'a>(operation: &str, raw: &'a str) -> Result<Vec<&'a str>, FilterError> {
    let items: Vec<&str> = raw.split(',').collect();
    if items.len() > MAX_FILTER_LIST_ITEMS {
        return Err(FilterError::TooManyValues {
            key: operation.to_string(),
            max: MAX_FILTER_LIST_ITEMS,
        });
    }
    Ok(items)
}

fn parse_list<T: FilterOperand>(operation: &str, raw: &str) -> Result<Vec<T>, FilterError> {
    split_list(operation, raw)?
        .into_iter()
        .map(|item| parse_one(operation, item))
        .collect()
}

fn string_list(operation: &str, raw: &str) -> Result<Vec<String>, FilterError> {
    Ok(split_list(operation, raw)?
        .into_iter()
        .map(str::to_string)
        .collect())
}

fn parse_specified(operation: &str, raw: &str) -> Result<bool, FilterError> {
    raw.parse::<bool>()
        .map_err(|_| FilterError::invalid(operation, raw, "expected true or false"))
}

fn values<T: FilterOperand>(items: &[T]) -> Vec<FieldValue> {
    items.iter().map(FilterOperand::to_value).collect()
}

// ============================================================================
// Display helpers
// ============================================================================

struct List<'a, T>(&'a [T]);

impl<T: fmt::Display> fmt::Display for List<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }
}

fn write_op<V: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    value: Option<V>,
) -> fmt::Result {
    match value {
        Some(v) => write!(f, "{}={}, ", name, v),
        None => Ok(()),
    }
}

// ============================================================================
// RangeFilter
// ============================================================================

/// Filter over a totally ordered value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeFilter<T: OrderedOperand> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equals: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_equals: Option<T>,
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub in_: Option<Vec<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_in: Option<Vec<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greater_than: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greater_than_or_equal: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub less_than: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub less_than_or_equal: Option<T>,
}

pub type LongFilter = RangeFilter<i64>;
pub type IntegerFilter = RangeFilter<i32>;
pub type InstantFilter = RangeFilter<DateTime<Utc>>;
pub type ZonedDateTimeFilter = RangeFilter<DateTime<FixedOffset>>;

impl<T: OrderedOperand> Default for RangeFilter<T> {
    fn default() -> Self {
        Self {
            equals: None,
            not_equals: None,
            in_: None,
            not_in: None,
            specified: None,
            greater_than: None,
            greater_than_or_equal: None,
            less_than: None,
            less_than_or_equal: None,
        }
    }
}

impl<T: OrderedOperand> RangeFilter<T> {
    pub fn equals(mut self, value: T) -> Self {
        self.equals = Some(value);
        self
    }

    pub fn not_equals(mut self, value: T) -> Self {
        self.not_equals = Some(value);
        self
    }

    pub fn in_(mut self, values: Vec<T>) -> Self {
        self.in_ = Some(values);
        self
    }

    pub fn not_in(mut self, values: Vec<T>) -> Self {
        self.not_in = Some(values);
        self
    }

    pub fn specified(mut self, specified: bool) -> Self {
        self.specified = Some(specified);
        self
    }

    pub fn greater_than(mut self, value: T) -> Self {
        self.greater_than = Some(value);
        self
    }

    pub fn greater_than_or_equal(mut self, value: T) -> Self {
        self.greater_than_or_equal = Some(value);
        self
    }

    pub fn less_than(mut self, value: T) -> Self {
        self.less_than = Some(value);
        self
    }

    pub fn less_than_or_equal(mut self, value: T) -> Self {
        self.less_than_or_equal = Some(value);
        self
    }
}

impl<T: OrderedOperand> Filter for RangeFilter<T> {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn push_conditions(&self, column: &'static str, predicate: &mut Predicate) {
        if let Some(v) = &self.equals {
            predicate.push(column, Op::Eq(v.to_value()));
        }
        if let Some(v) = &self.not_equals {
            predicate.push(column, Op::Ne(v.to_value()));
        }
        if let Some(v) = &self.in_ {
            predicate.push(column, Op::In(values(v)));
        }
        if let Some(v) = &self.not_in {
            predicate.push(column, Op::NotIn(values(v)));
        }
        if let Some(v) = self.specified {
            predicate.push(column, Op::Specified(v));
        }
        if let Some(v) = &self.greater_than {
            predicate.push(column, Op::Gt(v.to_value()));
        }
        if let Some(v) = &self.greater_than_or_equal {
            predicate.push(column, Op::Gte(v.to_value()));
        }
        if let Some(v) = &self.less_than {
            predicate.push(column, Op::Lt(v.to_value()));
        }
        if let Some(v) = &self.less_than_or_equal {
            predicate.push(column, Op::Lte(v.to_value()));
        }
    }

    fn apply(&mut self, operation: &str, raw: &str) -> Result<(), FilterError> {
        match operation {
            "equals" => self.equals = Some(parse_one(operation, raw)?),
            "notEquals" => self.not_equals = Some(parse_one(operation, raw)?),
            "in" => self.in_ = Some(parse_list(operation, raw)?),
            "notIn" => self.not_in = Some(parse_list(operation, raw)?),
            "specified" => self.specified = Some(parse_specified(operation, raw)?),
            "greaterThan" => self.greater_than = Some(parse_one(operation, raw)?),
            "greaterThanOrEqual" => self.greater_than_or_equal = Some(parse_one(operation, raw)?),
            "lessThan" => self.less_than = Some(parse_one(operation, raw)?),
            "lessThanOrEqual" => self.less_than_or_equal = Some(parse_one(operation, raw)?),
            _ => return Err(FilterError::unsupported(operation, T::FILTER_NAME)),
        }
        Ok(())
    }
}

impl<T: OrderedOperand> fmt::Display for RangeFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", T::FILTER_NAME)?;
        write_op(f, "equals", self.equals.as_ref())?;
        write_op(f, "notEquals", self.not_equals.as_ref())?;
        write_op(f, "in", self.in_.as_deref().map(List))?;
        write_op(f, "notIn", self.not_in.as_deref().map(List))?;
        write_op(f, "specified", self.specified.as_ref())?;
        write_op(f, "greaterThan", self.greater_than.as_ref())?;
        write_op(
            f,
            "greaterThanOrEqual",
            self.greater_than_or_equal.as_ref(),
        )?;
        write_op(f, "lessThan", self.less_than.as_ref())?;
        write_op(
            f,
            "lessThanOrEqual",
            self.less_than_or_equal.as_ref(),
        )?;
        write!(f, "]")
    }
}

// ============================================================================
// StringFilter
// ============================================================================

/// Filter over free text; substring tests are case-sensitive
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equals: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_equals: Option<String>,
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub in_: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_in: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub does_not_contain: Option<String>,
}

impl StringFilter {
    pub fn equals(mut self, value: impl Into<String>) -> Self {
        self.equals = Some(value.into());
        self
    }

    pub fn not_equals(mut self, value: impl Into<String>) -> Self {
        self.not_equals = Some(value.into());
        self
    }

    pub fn in_(mut self, values: Vec<String>) -> Self {
        self.in_ = Some(values);
        self
    }

    pub fn not_in(mut self, values: Vec<String>) -> Self {
        self.not_in = Some(values);
        self
    }

    pub fn specified(mut self, specified: bool) -> Self {
        self.specified = Some(specified);
        self
    }

    pub fn contains(mut self, value: impl Into<String>) -> Self {
        self.contains = Some(value.into());
        self
    }

    pub fn does_not_contain(mut self, value: impl Into<String>) -> Self {
        self.does_not_contain = Some(value.into());
        self
    }
}

fn text_values(items: &[String]) -> Vec<FieldValue> {
    items.iter().map(|s| FieldValue::Text(s.clone())).collect()
}

impl Filter for StringFilter {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn push_conditions(&self, column: &'static str, predicate: &mut Predicate) {
        if let Some(v) = &self.equals {
            predicate.push(column, Op::Eq(FieldValue::Text(v.clone())));
        }
        if let Some(v) = &self.not_equals {
            predicate.push(column, Op::Ne(FieldValue::Text(v.clone())));
        }
        if let Some(v) = &self.in_ {
            predicate.push(column, Op::In(text_values(v)));
        }
        if let Some(v) = &self.not_in {
            predicate.push(column, Op::NotIn(text_values(v)));
        }
        if let Some(v) = self.specified {
            predicate.push(column, Op::Specified(v));
        }
        if let Some(v) = &self.contains {
            predicate.push(column, Op::Contains(v.clone()));
        }
        if let Some(v) = &self.does_not_contain {
            predicate.push(column, Op::NotContains(v.clone()));
        }
    }

    fn apply(&mut self, operation: &str, raw: &str) -> Result<(), FilterError> {
        match operation {
            "equals" => self.equals = Some(raw.to_string()),
            "notEquals" => self.not_equals = Some(raw.to_string()),
            "in" => self.in_ = Some(string_list(operation, raw)?),
            "notIn" => self.not_in = Some(string_list(operation, raw)?),
            "specified" => self.specified = Some(parse_specified(operation, raw)?),
            "contains" => self.contains = Some(raw.to_string()),
            "doesNotContain" => self.does_not_contain = Some(raw.to_string()),
            _ => return Err(FilterError::unsupported(operation, "StringFilter")),
        }
        Ok(())
    }
}

impl fmt::Display for StringFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StringFilter [")?;
        write_op(f, "equals", self.equals.as_ref())?;
        write_op(f, "notEquals", self.not_equals.as_ref())?;
        write_op(f, "in", self.in_.as_deref().map(List))?;
        write_op(f, "notIn", self.not_in.as_deref().map(List))?;
        write_op(f, "specified", self.specified.as_ref())?;
        write_op(f, "contains", self.contains.as_ref())?;
        write_op(
            f,
            "doesNotContain",
            self.does_not_contain.as_ref(),
        )?;
        write!(f, "]")
    }
}

// ============================================================================
// EnumFilter
// ============================================================================

/// Filter over an enumeration: equality, membership and presence only
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumFilter<E: FilterOperand> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equals: Option<E>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_equals: Option<E>,
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub in_: Option<Vec<E>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_in: Option<Vec<E>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specified: Option<bool>,
}

impl<E: FilterOperand> Default for EnumFilter<E> {
    fn default() -> Self {
        Self {
            equals: None,
            not_equals: None,
            in_: None,
            not_in: None,
            specified: None,
        }
    }
}

impl<E: FilterOperand> EnumFilter<E> {
    pub fn equals(mut self, value: E) -> Self {
        self.equals = Some(value);
        self
    }

    pub fn not_equals(mut self, value: E) -> Self {
        self.not_equals = Some(value);
        self
    }

    pub fn in_(mut self, values: Vec<E>) -> Self {
        self.in_ = Some(values);
        self
    }

    pub fn not_in(mut self, values: Vec<E>) -> Self {
        self.not_in = Some(values);
        self
    }

    pub fn specified(mut self, specified: bool) -> Self {
        self.specified = Some(specified);
        self
    }
}

impl<E: FilterOperand> Filter for EnumFilter<E> {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn push_conditions(&self, column: &'static str, predicate: &mut Predicate) {
        if let Some(v) = &self.equals {
            predicate.push(column, Op::Eq(v.to_value()));
        }
        if let Some(v) = &self.not_equals {
            predicate.push(column, Op::Ne(v.to_value()));
        }
        if let Some(v) = &self.in_ {
            predicate.push(column, Op::In(values(v)));
        }
        if let Some(v) = &self.not_in {
            predicate.push(column, Op::NotIn(values(v)));
        }
        if let Some(v) = self.specified {
            predicate.push(column, Op::Specified(v));
        }
    }

    fn apply(&mut self, operation: &str, raw: &str) -> Result<(), FilterError> {
        match operation {
            "equals" => self.equals = Some(parse_one(operation, raw)?),
            "notEquals" => self.not_equals = Some(parse_one(operation, raw)?),
            "in" => self.in_ = Some(parse_list(operation, raw)?),
            "notIn" => self.not_in = Some(parse_list(operation, raw)?),
            "specified" => self.specified = Some(parse_specified(operation, raw)?),
            _ => return Err(FilterError::unsupported(operation, E::FILTER_NAME)),
        }
        Ok(())
    }
}

impl<E: FilterOperand> fmt::Display for EnumFilter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", E::FILTER_NAME)?;
        write_op(f, "equals", self.equals.as_ref())?;
        write_op(f, "notEquals", self.not_equals.as_ref())?;
        write_op(f, "in", self.in_.as_deref().map(List))?;
        write_op(f, "notIn", self.not_in.as_deref().map(List))?;
        write_op(f, "specified", self.specified.as_ref())?;
        write!(f, "]")
    }
}
