//! Pagination controls for the book listing

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Books per page when the request leaves paging unspecified
pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// Style class of the button pointing at the page being displayed
pub const ACTIVE_CLASS: &str = "active";

/// One control per page of results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationButton {
    /// 1-based number shown to the user
    pub index: i64,
    /// 0-based page this button links to
    pub page_offset: i64,
    pub page_size: i64,
    pub style_class: String,
}

/// Number of pages needed to show `total` rows, `per_page` at a time.
pub fn page_count(total: i64, per_page: i64) -> i64 {
    if total <= 0 || per_page <= 0 {
        return 0;
    }
    total / per_page + i64::from(total % per_page != 0)
}

/// Build one button per page, marking `current_page` as active.
pub fn pagination_buttons(total: i64, current_page: i64, per_page: i64) -> Vec<PaginationButton> {
    (1..=page_count(total, per_page))
        .map(|index| {
            let page_offset = index - 1;
            PaginationButton {
                index,
                page_offset,
                page_size: per_page,
                style_class: if page_offset == current_page {
                    ACTIVE_CLASS.to_string()
                } else {
                    String::new()
                },
            }
        })
        .collect()
}
