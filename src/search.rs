use crate::model::RecipeSummary;

/// Characters of a title shown in result lists before it is shortened
pub const TITLE_LIMIT: usize = 17;

/// A submitted query and the full, unpaginated result list
#[derive(Debug, Clone)]
pub struct Search {
    pub query: String,
    pub result: Vec<RecipeSummary>,
}

impl Search {
    pub fn new(query: impl Into<String>, result: Vec<RecipeSummary>) -> Self {
        Search {
            query: query.into(),
            result,
        }
    }

    /// Results on 1-based `page`, `per_page` at a time. Pages past the end
    /// are empty.
    pub fn page(&self, page: usize, per_page: usize) -> &[RecipeSummary] {
        let start = page.saturating_sub(1).saturating_mul(per_page);
        let end = page.saturating_mul(per_page);
        let len = self.result.len();
        &self.result[start.min(len)..end.min(len)]
    }

    pub fn pagination(&self, page: usize, per_page: usize) -> PageButtons {
        PageButtons::new(page, self.result.len(), per_page)
    }
}

/// Navigation controls to show under a page of results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageButtons {
    None,
    Next { goto: usize },
    Prev { goto: usize },
    Both { prev: usize, next: usize },
}

impl PageButtons {
    pub fn new(page: usize, total: usize, per_page: usize) -> Self {
        let pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(per_page)
        };

        if page == 1 && pages > 1 {
            PageButtons::Next { goto: page + 1 }
        } else if page > 1 && page < pages {
            PageButtons::Both {
                prev: page - 1,
                next: page + 1,
            }
        } else if page == pages && pages > 1 {
            PageButtons::Prev { goto: page - 1 }
        } else {
            PageButtons::None
        }
    }

    pub fn prev(&self) -> Option<usize> {
        match *self {
            PageButtons::Prev { goto } => Some(goto),
            PageButtons::Both { prev, .. } => Some(prev),
            _ => None,
        }
    }

    pub fn next(&self) -> Option<usize> {
        match *self {
            PageButtons::Next { goto } => Some(goto),
            PageButtons::Both { next, .. } => Some(next),
            _ => None,
        }
    }
}

/// Cuts a title to its first `limit` characters, appending "..." when
/// anything was cut.
pub fn limit_title(title: &str, limit: usize) -> String {
    if title.chars().count() <= limit {
        return title.to_string();
    }

    let cut: String = title.chars().take(limit).collect();
    format!("{}...", cut)
}
