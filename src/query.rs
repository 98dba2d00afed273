//! List queries: filtering and pagination over the full collection.

use serde::{Deserialize, Serialize};

use crate::model::Character;
use crate::request::Request;

/// Records per page.
pub const PAGE_SIZE: usize = 5;

/// `?name=&status=&page=` as understood by the list endpoint.
///
/// Empty filter strings mean "no filter", like absent ones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub name: Option<String>,
    pub status: Option<String>,
    pub page: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self { name: None, status: None, page: 1 }
    }
}

impl ListQuery {
    pub fn from_request(req: &Request) -> Self {
        Self {
            name: non_empty(req.query("name")),
            status: non_empty(req.query("status")),
            page: parse_page(req.query("page").as_deref()),
        }
    }

    /// Status: case-insensitive equality. Name: case-insensitive substring.
    pub fn matches(&self, character: &Character) -> bool {
        let status_ok = self.status.as_deref().is_none_or(|status| {
            character.status.to_lowercase() == status.to_lowercase()
        });
        let name_ok = self.name.as_deref().is_none_or(|name| {
            character.name.to_lowercase().contains(&name.to_lowercase())
        });
        status_ok && name_ok
    }

    /// Query-string pairs for this query, omitting empty filters.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(name) = &self.name {
            pairs.push(("name", name.clone()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status", status.clone()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Leading decimal digits of `raw`, like a lenient integer parse. Anything
/// missing, unparsable or below 1 is page 1. A number too large for `usize`
/// saturates, so it still lands past the last page.
pub fn parse_page(raw: Option<&str>) -> usize {
    let Some(raw) = raw else { return 1 };
    let digits: &str = {
        let trimmed = raw.trim_start();
        let end = trimmed.find(|c: char| !c.is_ascii_digit()).unwrap_or(trimmed.len());
        &trimmed[..end]
    };
    if digits.is_empty() {
        return 1;
    }
    digits.parse::<usize>().unwrap_or(usize::MAX).max(1)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub pages: usize,
}

/// Body of `GET /api/character`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterPage {
    pub info: PageInfo,
    pub results: Vec<Character>,
}

/// `max(1, ceil(filtered / PAGE_SIZE))`.
pub fn total_pages(filtered: usize) -> usize {
    filtered.div_ceil(PAGE_SIZE).max(1)
}

/// Filters `collection` and cuts out the requested page. A page past the end
/// is empty, not an error.
pub fn paginate(collection: Vec<Character>, query: &ListQuery) -> CharacterPage {
    let filtered: Vec<Character> = collection.into_iter().filter(|c| query.matches(c)).collect();
    let pages = total_pages(filtered.len());
    let start = query.page.saturating_sub(1).saturating_mul(PAGE_SIZE);
    let results = filtered.into_iter().skip(start).take(PAGE_SIZE).collect();
    CharacterPage { info: PageInfo { pages }, results }
}
