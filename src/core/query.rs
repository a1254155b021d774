//! List queries and pagination utilities

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Facet value meaning "no constraint on this field"
pub const ALL: &str = "all";

/// Sort direction of a list column
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction '{}'", other)),
        }
    }
}

/// A sort column together with its direction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,

    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Parse `field`, `field:asc` or `field:desc`
    ///
    /// # Example
    /// ```
    /// # use assetdesk::core::query::{SortDirection, SortSpec};
    /// let spec = SortSpec::parse("cost:desc").unwrap();
    /// assert_eq!(spec.field, "cost");
    /// assert_eq!(spec.direction, SortDirection::Desc);
    /// ```
    pub fn parse(expr: &str) -> Result<Self, String> {
        let expr = expr.trim();
        let (field, direction) = match expr.split_once(':') {
            Some((field, dir)) => (field, dir.parse()?),
            None => (expr, SortDirection::Asc),
        };
        if field.is_empty() {
            return Err("empty sort field".to_string());
        }
        Ok(Self {
            field: field.to_string(),
            direction,
        })
    }
}

/// The state of one list page, as the view hands it to the engine
///
/// A query is rebuilt on every interaction and carries no identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Query {
    /// Free-text term; empty matches everything
    pub search_term: String,

    /// Field name -> accepted value; [`ALL`] disables the facet
    pub facets: IndexMap<String, String>,

    /// Sort column; `None` keeps the filtered order
    pub sort_key: Option<String>,

    pub sort_direction: SortDirection,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn facet(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.facets.insert(field.into(), value.into());
        self
    }

    pub fn sort(mut self, key: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_key = Some(key.into());
        self.sort_direction = direction;
        self
    }

    pub fn sort_by(self, spec: &SortSpec) -> Self {
        self.sort(spec.field.clone(), spec.direction)
    }

    /// Facets that actually constrain the result
    pub fn active_facets(&self) -> impl Iterator<Item = (&str, &str)> {
        self.facets
            .iter()
            .filter(|(_, value)| value.as_str() != ALL)
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(limit) };
        let start = (page - 1).saturating_mul(limit);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: start.saturating_add(limit) < total,
            has_prev: page > 1,
        }
    }
}

/// One page of an already filtered and sorted view
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Maximum rows per page
pub const MAX_PAGE_SIZE: usize = 100;

/// Slice a view into a page; `page` starts at 1, `limit` is clamped to 1..=100
pub fn paginate<T: Clone>(rows: &[T], page: usize, limit: usize) -> Page<T> {
    let meta = PaginationMeta::new(page, limit.clamp(1, MAX_PAGE_SIZE), rows.len());
    let start = (meta.page - 1).saturating_mul(meta.limit);
    let data = rows.iter().skip(start).take(meta.limit).cloned().collect();

    Page {
        data,
        pagination: meta,
    }
}
