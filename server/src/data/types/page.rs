//! Paging and sorting for record queries

use std::fmt;

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// Sort on a single storage column; ties always fall back to id ascending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub column: &'static str,
    pub direction: SortDirection,
}

impl Sort {
    pub fn by_id() -> Self {
        Self {
            column: "id",
            direction: SortDirection::Asc,
        }
    }

    /// SQL `ORDER BY` body for this sort
    pub fn to_sql(&self) -> String {
        if self.column == "id" {
            format!("id {}", self.direction.as_sql())
        } else {
            format!("{} {}, id ASC", self.column, self.direction.as_sql())
        }
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::by_id()
    }
}

/// A window over a sorted result set (1-based page number)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
    pub sort: Sort,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32, sort: Sort) -> Self {
        Self { page, limit, sort }
    }

    /// Number of rows skipped before this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

/// One page of records plus the total matching the same predicate
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(1, 20, Sort::by_id()).offset(), 0);
        assert_eq!(PageRequest::new(3, 20, Sort::by_id()).offset(), 40);
        assert_eq!(PageRequest::new(0, 20, Sort::by_id()).offset(), 0);
    }

    #[test]
    fn test_sort_sql_adds_id_tiebreak() {
        let sort = Sort {
            column: "age",
            direction: SortDirection::Desc,
        };
        assert_eq!(sort.to_sql(), "age DESC, id ASC");
        assert_eq!(Sort::by_id().to_sql(), "id ASC");
    }
}
