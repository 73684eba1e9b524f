use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ListingConfig;

/// Alphabetical direction of a list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "a-z")]
    AToZ,
    #[serde(rename = "z-a")]
    ZToA,
}

impl SortOrder {
    fn parse(value: &Value) -> Self {
        match value.as_str() {
            Some("z-a") => Self::ZToA,
            _ => Self::AToZ,
        }
    }
}

/// Tab selector on the users page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserTab {
    #[default]
    Judges,
    Managers,
}

/// Search parameters of a list page.
///
/// Deserialization never fails on a bad field: anything missing or malformed
/// falls back to its default, so a hand-edited query string still renders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawListQuery")]
pub struct ListQuery {
    /// 1-based page number.
    pub page: u64,
    /// Items per page. `None` uses the configured default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Case-insensitive substring filter.
    pub filter: String,
    pub sort: SortOrder,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: None,
            filter: String::new(),
            sort: SortOrder::AToZ,
        }
    }
}

impl ListQuery {
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit.max(1));
        self
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawListQuery {
    page: Value,
    limit: Value,
    filter: Value,
    sort: Value,
}

/// Read a positive integer from a JSON number or a numeric string.
fn positive_int(value: &Value) -> Option<u64> {
    let n = match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0 && *f >= 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;
    (n >= 1).then_some(n)
}

impl From<RawListQuery> for ListQuery {
    fn from(raw: RawListQuery) -> Self {
        let defaults = ListQuery::default();
        Self {
            page: positive_int(&raw.page).unwrap_or(defaults.page),
            limit: positive_int(&raw.limit).or(defaults.limit),
            filter: raw.filter.as_str().map(str::to_string).unwrap_or_default(),
            sort: SortOrder::parse(&raw.sort),
        }
    }
}

/// Users page query: the list query plus the selected tab.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawUserListQuery")]
pub struct UserListQuery {
    #[serde(flatten)]
    pub query: ListQuery,
    pub tab: UserTab,
}

#[derive(Deserialize)]
struct RawUserListQuery {
    #[serde(flatten)]
    query: ListQuery,
    #[serde(default)]
    tab: Value,
}

impl From<RawUserListQuery> for UserListQuery {
    fn from(raw: RawUserListQuery) -> Self {
        let tab = match raw.tab.as_str() {
            Some("managers") => UserTab::Managers,
            _ => UserTab::Judges,
        };
        Self {
            query: raw.query,
            tab,
        }
    }
}

/// Pagination metadata included in list responses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct Pagination {
    /// Current page number (1-based).
    #[schema(example = 1)]
    pub page: u64,
    /// Number of items per page.
    #[schema(example = 20)]
    pub per_page: u64,
    /// Total number of matching items across all pages.
    #[schema(example = 47)]
    pub total: u64,
    /// Total number of pages. Never less than 1.
    #[schema(example = 3)]
    pub total_pages: u64,
}

impl Pagination {
    pub fn new(page: u64, per_page: u64, total: u64) -> Self {
        let per_page = per_page.max(1);
        Self {
            page,
            per_page,
            total,
            total_pages: total.div_ceil(per_page).max(1),
        }
    }
}

/// One page of a filtered, sorted list.
#[derive(Clone, Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Records that can be listed on a settings page.
pub trait Listable {
    /// Text the list is sorted by (name, username, ...).
    fn sort_key(&self) -> &str;

    /// Whether the record matches an already lowercased filter.
    fn matches(&self, needle: &str) -> bool {
        self.sort_key().to_lowercase().contains(needle)
    }
}

/// Filter, sort and slice `items` according to `query`.
///
/// Sorting is case-insensitive and stable. The page size comes from the
/// query, bounded by `listing`. A page past the end yields no data but
/// still reports the real totals.
pub fn paginate<T: Listable + Clone>(
    items: &[T],
    query: &ListQuery,
    listing: &ListingConfig,
) -> Page<T> {
    let needle = query.filter.trim().to_lowercase();
    let mut matched: Vec<&T> = items
        .iter()
        .filter(|item| needle.is_empty() || item.matches(&needle))
        .collect();

    matched.sort_by_cached_key(|item| item.sort_key().to_lowercase());
    if query.sort == SortOrder::ZToA {
        matched.reverse();
    }

    let per_page = listing.page_size(query.limit);
    let pagination = Pagination::new(query.page.max(1), per_page, matched.len() as u64);
    let start = (pagination.page - 1).saturating_mul(per_page);
    let data = matched
        .into_iter()
        .skip(usize::try_from(start).unwrap_or(usize::MAX))
        .take(usize::try_from(per_page).unwrap_or(usize::MAX))
        .cloned()
        .collect::<Vec<_>>();

    tracing::debug!(
        filter = %needle,
        page = pagination.page,
        total = pagination.total,
        returned = data.len(),
        "Paginated list"
    );

    Page { data, pagination }
}
