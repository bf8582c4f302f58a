//! Pagination applied after filter + sort, plus the list-state rule that a
//! changed filter or sort resets the page to 1.

use marblecraft_shared::{PaginatedResponse, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Slice an already filtered and sorted collection. Page numbers are
/// 1-based; out-of-range pages yield an empty data set rather than an error.
pub fn paginate<T>(items: Vec<T>, params: PageParams) -> PaginatedResponse<T> {
    let page = params.page.unwrap_or(1).max(1);
    let per_page = params
        .per_page
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let total = items.len() as i64;
    let offset = (page - 1) * per_page;

    let data: Vec<T> = items
        .into_iter()
        .skip(offset.max(0) as usize)
        .take(per_page as usize)
        .collect();

    PaginatedResponse {
        has_more: offset + (data.len() as i64) < total,
        data,
        total,
        page,
        per_page,
    }
}

/// Client-style list state: filter/sort parameters plus the current page.
/// Changing any parameter resets the page to 1 so the subsequent slice can
/// never be out of range for the new view.
#[derive(Debug, Clone)]
pub struct ListState<P: PartialEq> {
    params: P,
    page: i64,
}

impl<P: PartialEq> ListState<P> {
    pub fn new(params: P) -> Self {
        Self { params, page: 1 }
    }

    pub fn params(&self) -> &P {
        &self.params
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn set_page(&mut self, page: i64) {
        self.page = page.max(1);
    }

    pub fn set_params(&mut self, params: P) {
        if params != self.params {
            self.page = 1;
        }
        self.params = params;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::enquiries::EnquiryFilterParams;
    use marblecraft_shared::StatusFilter;

    #[test]
    fn slices_after_the_fact() {
        let items: Vec<i32> = (1..=25).collect();
        let page = paginate(
            items,
            PageParams {
                page: Some(2),
                per_page: Some(10),
            },
        );
        assert_eq!(page.data, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.total, 25);
        assert!(page.has_more);
    }

    #[test]
    fn last_page_reports_no_more() {
        let items: Vec<i32> = (1..=25).collect();
        let page = paginate(
            items,
            PageParams {
                page: Some(3),
                per_page: Some(10),
            },
        );
        assert_eq!(page.data, (21..=25).collect::<Vec<_>>());
        assert!(!page.has_more);
    }

    #[test]
    fn out_of_range_page_yields_empty_slice() {
        let items: Vec<i32> = (1..=5).collect();
        let page = paginate(
            items,
            PageParams {
                page: Some(99),
                per_page: Some(10),
            },
        );
        assert!(page.data.is_empty());
        assert_eq!(page.total, 5);
    }

    #[test]
    fn defaults_apply_when_params_absent() {
        let items: Vec<i32> = (1..=15).collect();
        let page = paginate(items, PageParams::default());
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 10);
        assert_eq!(page.data.len(), 10);
    }

    #[test]
    fn changing_a_filter_resets_the_page() {
        let mut state = ListState::new(EnquiryFilterParams::default());
        state.set_page(4);
        assert_eq!(state.page(), 4);

        state.set_params(EnquiryFilterParams {
            status: StatusFilter::Pending,
            ..Default::default()
        });
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn setting_identical_params_keeps_the_page() {
        let params = EnquiryFilterParams {
            search: Some("granite".to_string()),
            ..Default::default()
        };
        let mut state = ListState::new(params.clone());
        state.set_page(3);
        state.set_params(params);
        assert_eq!(state.page(), 3);
    }
}
