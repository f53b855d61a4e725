//! Dashboard listing: search filter and column sort
//!
//! Applied in memory on top of [`LinkStore::list`](crate::storage::LinkStore::list),
//! whose newest-first order breaks ties since the sort is stable.

use std::cmp::Ordering;

use crate::storage::ShortLink;

/// Sortable dashboard column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Code,
    Url,
    #[default]
    TotalClicks,
    LastClicked,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::Code,
        SortField::Url,
        SortField::TotalClicks,
        SortField::LastClicked,
    ];

    /// Unknown names yield `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "code" => Some(Self::Code),
            "url" => Some(Self::Url),
            "total_clicks" => Some(Self::TotalClicks),
            "last_clicked" => Some(Self::LastClicked),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Url => "url",
            Self::TotalClicks => "total_clicks",
            Self::LastClicked => "last_clicked",
        }
    }

    fn compare(&self, a: &ShortLink, b: &ShortLink) -> Ordering {
        match self {
            Self::Code => a.code.cmp(&b.code),
            Self::Url => a.url.cmp(&b.url),
            Self::TotalClicks => a.total_clicks.cmp(&b.total_clicks),
            // None < Some，从未点击的排在升序最前
            Self::LastClicked => a.last_clicked.cmp(&b.last_clicked),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Search and sort options for the dashboard table.
///
/// The default shows every link, most clicked first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Case-insensitive substring matched against code and URL
    pub search: Option<String>,
    pub sort: SortField,
    pub order: SortOrder,
}

impl ListOptions {
    /// Build from raw query values; blank or unknown values fall back to the
    /// defaults.
    pub fn from_params(search: Option<&str>, sort: Option<&str>, order: Option<&str>) -> Self {
        Self {
            search: search
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            sort: sort.and_then(SortField::parse).unwrap_or_default(),
            order: order.and_then(SortOrder::parse).unwrap_or_default(),
        }
    }

    /// Filter and sort `links` in place of the store order
    pub fn apply(&self, links: Vec<ShortLink>) -> Vec<ShortLink> {
        let mut links: Vec<ShortLink> = match &self.search {
            Some(search) => {
                let needle = search.to_lowercase();
                links
                    .into_iter()
                    .filter(|link| {
                        link.code.to_lowercase().contains(&needle)
                            || link.url.to_lowercase().contains(&needle)
                    })
                    .collect()
            }
            None => links,
        };

        links.sort_by(|a, b| {
            let ord = self.sort.compare(a, b);
            match self.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        links
    }

    /// Order a header click on `field` should request: flips the current
    /// order on the active column, starts descending on any other.
    pub fn next_order_for(&self, field: SortField) -> SortOrder {
        if self.sort == field {
            self.order.toggled()
        } else {
            SortOrder::Desc
        }
    }
}
