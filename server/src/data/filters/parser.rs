//! Query-string parsing
//!
//! Turns flat `<field>.<operation>=<value>` pairs into a populated criteria.
//! Every pair narrows the result (AND); `in`/`notIn` values are
//! comma-separated and `distinct=<bool>` sets the distinct flag.

use super::criteria::Criteria;
use super::error::FilterError;

/// Maximum number of filter parameters in one request
pub const MAX_FILTER_PARAMS: usize = 50;

/// Maximum number of comma-separated values in one `in`/`notIn` operand
pub const MAX_FILTER_LIST_ITEMS: usize = 100;

/// Query key carrying the distinct flag
pub const DISTINCT_KEY: &str = "distinct";

/// Split `field.operation`
pub fn split_key(key: &str) -> Result<(&str, &str), FilterError> {
    key.split_once('.')
        .filter(|(field, operation)| !field.is_empty() && !operation.is_empty())
        .ok_or_else(|| FilterError::MalformedKey(key.to_string()))
}

/// Build criteria from query pairs
pub fn parse_criteria<C, K, V>(params: impl IntoIterator<Item = (K, V)>) -> Result<C, FilterError>
where
    C: Criteria,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut criteria = C::default();

    for (count, (key, value)) in params.into_iter().enumerate() {
        if count >= MAX_FILTER_PARAMS {
            return Err(FilterError::TooManyFilters(MAX_FILTER_PARAMS));
        }

        let (key, value) = (key.as_ref(), value.as_ref());
        if key == DISTINCT_KEY {
            let distinct = value
                .parse::<bool>()
                .map_err(|_| FilterError::invalid(key, value, "expected true or false"))?;
            criteria.set_distinct(distinct);
            continue;
        }

        let (field, operation) = split_key(key)?;
        if !C::FIELDS.contains(&field) {
            return Err(FilterError::UnknownField(field.to_string()));
        }
        criteria.apply(field, operation, value)?;
    }

    Ok(criteria)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_key_valid() {
        assert_eq!(split_key("petId.greaterThan").unwrap(), ("petId", "greaterThan"));
    }

    #[test]
    fn split_key_rejects_missing_operation() {
        assert_eq!(
            split_key("name").unwrap_err(),
            FilterError::MalformedKey("name".to_string())
        );
        assert!(split_key("name.").is_err());
        assert!(split_key(".equals").is_err());
    }
}
