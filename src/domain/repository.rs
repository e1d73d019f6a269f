//! Generic repository contracts shared by every entity store.
//!
//! `Repository` covers plain CRUD; `SearchableRepository` extends it with the
//! paginated/sortable/filterable `search` operation. Both the in-memory test
//! double and the Postgres-backed store implement the same contracts, so use
//! cases never know which one they are talking to.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use uuid::Uuid;

use crate::domain::DomainError;

/// Generic CRUD contract. `find_by_id`, `update` and `delete` fail with
/// `DomainError::NotFound` when the id is absent.
#[async_trait]
pub trait Repository<E>: Send + Sync + Debug
where
    E: Send + Sync,
{
    /// Persist a new entity. No uniqueness checks happen at this layer.
    async fn insert(&self, entity: E) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<E, DomainError>;

    async fn find_all(&self) -> Result<Vec<E>, DomainError>;

    /// Full replace of the stored entity with the same id.
    async fn update(&self, entity: E) -> Result<(), DomainError>;

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}

/// Repository extension for paginated, sortable, filterable listing.
#[async_trait]
pub trait SearchableRepository<E>: Repository<E>
where
    E: Send + Sync,
{
    async fn search(&self, params: SearchParams) -> Result<SearchResult<E>, DomainError>;
}

/// Direction applied to the sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Case-insensitive parse; anything that is not `asc`/`desc` becomes `Desc`.
    fn parse_lossy(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "asc" => Self::Asc,
            _ => Self::Desc,
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// Raw, untrusted search input as it arrives from the outside.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchInput {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub sort: Option<String>,
    pub sort_dir: Option<String>,
    pub filter: Option<String>,
}

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_PER_PAGE: u64 = 10;

/// Normalized search query.
///
/// Invariant: `sort_dir` is `Some` iff `sort` is `Some`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    page: u64,
    per_page: u64,
    sort: Option<String>,
    sort_dir: Option<SortDirection>,
    filter: Option<String>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self::from_input(SearchInput::default())
    }
}

impl SearchParams {
    /// Normalize untrusted input:
    /// - `page`: non-positive falls back to 1
    /// - `per_page`: non-positive falls back to 10
    /// - `sort`/`filter`: empty strings become `None`
    /// - `sort_dir`: forced to `None` without a sort, otherwise defaults to
    ///   `desc` unless the input is (case-insensitively) `asc` or `desc`
    pub fn from_input(input: SearchInput) -> Self {
        let page = match input.page {
            Some(p) if p > 0 => p as u64,
            _ => DEFAULT_PAGE,
        };

        let per_page = match input.per_page {
            Some(p) if p > 0 => p as u64,
            _ => DEFAULT_PER_PAGE,
        };

        let sort = input.sort.filter(|s| !s.is_empty());

        let sort_dir = if sort.is_some() {
            Some(
                input
                    .sort_dir
                    .as_deref()
                    .map(SortDirection::parse_lossy)
                    .unwrap_or(SortDirection::Desc),
            )
        } else {
            None
        };

        let filter = input.filter.filter(|f| !f.is_empty());

        Self {
            page,
            per_page,
            sort,
            sort_dir,
            filter,
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn sort_dir(&self) -> Option<SortDirection> {
        self.sort_dir
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Zero-indexed offset of the requested page window. Saturates instead
    /// of overflowing on absurd page/per_page combinations; a saturated
    /// offset lands past the end of any collection and yields an empty page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// One page of search results plus the pagination metadata derived from the
/// filtered (pre-pagination) total. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<E> {
    items: Vec<E>,
    total: u64,
    current_page: u64,
    per_page: u64,
    last_page: u64,
    sort: Option<String>,
    sort_dir: Option<SortDirection>,
    filter: Option<String>,
}

impl<E> SearchResult<E> {
    pub fn new(items: Vec<E>, total: u64, params: &SearchParams) -> Self {
        Self {
            items,
            total,
            current_page: params.page(),
            per_page: params.per_page(),
            last_page: total.div_ceil(params.per_page()),
            sort: params.sort().map(String::from),
            sort_dir: params.sort_dir(),
            filter: params.filter().map(String::from),
        }
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn into_items(self) -> Vec<E> {
        self.items
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn last_page(&self) -> u64 {
        self.last_page
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn sort_dir(&self) -> Option<SortDirection> {
        self.sort_dir
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }
}
