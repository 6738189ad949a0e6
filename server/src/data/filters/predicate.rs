//! Composite predicates
//!
//! A [`Predicate`] is the AND of zero or more column [`Condition`]s. The same
//! value is rendered into a parameterised SQL `WHERE` clause by the SQLite
//! store and evaluated directly against records by the in-memory store, and
//! both follow SQL's three-valued logic: a condition on a null column is never
//! satisfied unless it explicitly asks for null.

use crate::data::traits::Record;
use crate::data::types::value::FieldValue;

/// Operation applied to a single column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Eq(FieldValue),
    Ne(FieldValue),
    In(Vec<FieldValue>),
    NotIn(Vec<FieldValue>),
    /// `true` requires a value, `false` requires null
    Specified(bool),
    Gt(FieldValue),
    Gte(FieldValue),
    Lt(FieldValue),
    Lte(FieldValue),
    Contains(String),
    NotContains(String),
}

/// One constraint on one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub column: &'static str,
    pub op: Op,
}

/// Collects SQL parameters during query building (maintains insertion order)
#[derive(Debug, Default)]
pub struct SqlParams {
    pub values: Vec<FieldValue>,
}

impl SqlParams {
    fn bind(&mut self, value: &FieldValue) -> &'static str {
        self.values.push(value.clone());
        "?"
    }

    fn bind_list(&mut self, values: &[FieldValue]) -> String {
        values
            .iter()
            .map(|v| self.bind(v))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Condition {
    /// Evaluate against a column value
    pub fn matches(&self, value: &FieldValue) -> bool {
        use std::cmp::Ordering::{Equal, Greater, Less};

        match (&self.op, value) {
            (Op::Specified(specified), value) => value.is_null() != *specified,
            (_, FieldValue::Null) => false,
            (Op::Eq(v), value) => value == v,
            (Op::Ne(v), value) => value != v,
            (Op::In(vs), value) => vs.contains(value),
            (Op::NotIn(vs), value) => !vs.contains(value),
            (Op::Gt(v), value) => value.compare(v) == Some(Greater),
            (Op::Gte(v), value) => matches!(value.compare(v), Some(Greater | Equal)),
            (Op::Lt(v), value) => value.compare(v) == Some(Less),
            (Op::Lte(v), value) => matches!(value.compare(v), Some(Less | Equal)),
            (Op::Contains(needle), FieldValue::Text(text)) => text.contains(needle.as_str()),
            (Op::NotContains(needle), FieldValue::Text(text)) => !text.contains(needle.as_str()),
            (Op::Contains(_) | Op::NotContains(_), _) => false,
        }
    }

    /// Render as a SQL fragment with `?` placeholders
    pub fn to_sql(&self, params: &mut SqlParams) -> String {
        let col = self.column;
        match &self.op {
            Op::Eq(v) => format!("{} = {}", col, params.bind(v)),
            Op::Ne(v) => format!("{} <> {}", col, params.bind(v)),
            Op::In(vs) if vs.is_empty() => "1 = 0".to_string(),
            Op::In(vs) => format!("{} IN ({})", col, params.bind_list(vs)),
            Op::NotIn(vs) if vs.is_empty() => format!("{} IS NOT NULL", col),
            Op::NotIn(vs) => format!("{} NOT IN ({})", col, params.bind_list(vs)),
            Op::Specified(true) => format!("{} IS NOT NULL", col),
            Op::Specified(false) => format!("{} IS NULL", col),
            Op::Gt(v) => format!("{} > {}", col, params.bind(v)),
            Op::Gte(v) => format!("{} >= {}", col, params.bind(v)),
            Op::Lt(v) => format!("{} < {}", col, params.bind(v)),
            Op::Lte(v) => format!("{} <= {}", col, params.bind(v)),
            // instr() is case-sensitive where LIKE is not
            Op::Contains(s) => format!(
                "instr({}, {}) > 0",
                col,
                params.bind(&FieldValue::Text(s.clone()))
            ),
            Op::NotContains(s) => format!(
                "instr({}, {}) = 0",
                col,
                params.bind(&FieldValue::Text(s.clone()))
            ),
        }
    }
}

/// AND of column conditions plus the distinct flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    conditions: Vec<Condition>,
    distinct: bool,
}

impl Default for Predicate {
    fn default() -> Self {
        Self {
            conditions: Vec::new(),
            distinct: true,
        }
    }
}

impl Predicate {
    /// Predicate matching every record
    pub fn all() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: &'static str, op: Op) {
        self.conditions.push(Condition { column, op });
    }

    pub fn with_distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Evaluate against a record
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.conditions
            .iter()
            .all(|c| c.matches(&record.value(c.column)))
    }

    /// Render as a SQL boolean expression (`1 = 1` when unconstrained)
    pub fn to_sql(&self, params: &mut SqlParams) -> String {
        if self.conditions.is_empty() {
            return "1 = 1".to_string();
        }
        self.conditions
            .iter()
            .map(|c| c.to_sql(params))
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cond(op: Op) -> Condition {
        Condition { column: "age", op }
    }

    #[test]
    fn not_equals_and_not_in_exclude_null() {
        let null = FieldValue::Null;
        assert!(!cond(Op::Ne(FieldValue::Integer(1))).matches(&null));
        assert!(!cond(Op::NotIn(vec![FieldValue::Integer(1)])).matches(&null));
        assert!(!cond(Op::NotContains("x".to_string())).matches(&null));
        assert!(cond(Op::Ne(FieldValue::Integer(1))).matches(&FieldValue::Integer(2)));
    }

    #[test]
    fn specified_checks_presence() {
        assert!(cond(Op::Specified(false)).matches(&FieldValue::Null));
        assert!(!cond(Op::Specified(true)).matches(&FieldValue::Null));
        assert!(cond(Op::Specified(true)).matches(&FieldValue::Integer(0)));
    }

    #[test]
    fn ordered_comparisons() {
        let one = FieldValue::Integer(1);
        assert!(cond(Op::Gte(FieldValue::Integer(1))).matches(&one));
        assert!(!cond(Op::Gt(FieldValue::Integer(1))).matches(&one));
        assert!(cond(Op::Lte(FieldValue::Integer(1))).matches(&one));
        assert!(!cond(Op::Lt(FieldValue::Integer(1))).matches(&one));
        assert!(!cond(Op::Lt(FieldValue::Integer(5))).matches(&FieldValue::Null));
    }

    #[test]
    fn contains_is_case_sensitive() {
        let rex = FieldValue::from("Rex");
        assert!(cond(Op::Contains("Re".to_string())).matches(&rex));
        assert!(!cond(Op::Contains("re".to_string())).matches(&rex));
        assert!(cond(Op::NotContains("re".to_string())).matches(&rex));
    }

    #[test]
    fn empty_sets() {
        assert!(!cond(Op::In(vec![])).matches(&FieldValue::Integer(1)));
        assert!(cond(Op::NotIn(vec![])).matches(&FieldValue::Integer(1)));
    }

    #[test]
    fn to_sql_binds_in_order() {
        let mut predicate = Predicate::all();
        predicate.push("age", Op::Gte(FieldValue::Integer(1)));
        predicate.push(
            "name",
            Op::In(vec![FieldValue::from("a"), FieldValue::from("b")]),
        );
        predicate.push("breed", Op::Specified(false));
        predicate.push("name", Op::Contains("x".to_string()));

        let mut params = SqlParams::default();
        let sql = predicate.to_sql(&mut params);

        assert_eq!(
            sql,
            "age >= ? AND name IN (?, ?) AND breed IS NULL AND instr(name, ?) > 0"
        );
        assert_eq!(
            params.values,
            vec![
                FieldValue::Integer(1),
                FieldValue::from("a"),
                FieldValue::from("b"),
                FieldValue::from("x"),
            ]
        );
    }

    #[test]
    fn empty_predicate_sql() {
        let mut params = SqlParams::default();
        assert_eq!(Predicate::all().to_sql(&mut params), "1 = 1");
        assert!(params.values.is_empty());
    }

    #[test]
    fn empty_set_sql() {
        let mut params = SqlParams::default();
        assert_eq!(cond(Op::In(vec![])).to_sql(&mut params), "1 = 0");
        assert_eq!(cond(Op::NotIn(vec![])).to_sql(&mut params), "age IS NOT NULL");
    }
}
