//! This modules defines the common functionality for paging data.

use std::num::NonZeroUsize;

use maud::{Markup, html};

/// The number of expenses shown on each page of the expense list.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::new(10).unwrap();

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The maximum number of items to display per page.
    pub page_size: NonZeroUsize,
    /// The maximum number of pages to show in the pagination indicator.
    pub max_pages: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: 5,
        }
    }
}

/// Split `items` into consecutive pages of `page_size` items.
///
/// Every page holds exactly `page_size` items except the last page, which
/// holds the remainder. The pages borrow from `items` and keep their order,
/// so concatenating the pages gives back `items`. An empty slice has no pages.
pub fn split_into_pages<T>(items: &[T], page_size: NonZeroUsize) -> Vec<&[T]> {
    let page_size = page_size.get();
    let page_count = items.len().div_ceil(page_size);
    let mut pages = Vec::with_capacity(page_count);

    for page_index in 0..page_count {
        let start = page_index * page_size;
        let end = (start + page_size).min(items.len());
        pages.push(&items[start..end]);
    }

    pages
}

#[derive(Debug, PartialEq, Eq)]
pub enum PaginationIndicator {
    Page(u64),
    CurrPage(u64),
    Ellipsis,
    NextButton(u64),
    BackButton(u64),
}

pub fn create_pagination_indicators(
    curr_page: u64,
    page_count: u64,
    max_pages: u64,
) -> Vec<PaginationIndicator> {
    let map_page = |page| {
        if page == curr_page {
            PaginationIndicator::CurrPage(page)
        } else {
            PaginationIndicator::Page(page)
        }
    };

    let mut indicators: Vec<PaginationIndicator> = if page_count <= max_pages {
        (1..=page_count).map(map_page).collect()
    } else if curr_page <= (max_pages / 2) {
        (1..=max_pages).map(map_page).collect()
    } else if curr_page > (page_count - max_pages / 2) {
        ((page_count - max_pages + 1)..=page_count)
            .map(map_page)
            .collect()
    } else {
        ((curr_page - max_pages / 2)..=(curr_page + max_pages / 2))
            .map(map_page)
            .collect()
    };

    if page_count > max_pages {
        if curr_page > (max_pages / 2) + 1 {
            indicators.insert(0, PaginationIndicator::Page(1));
            indicators.insert(1, PaginationIndicator::Ellipsis);
        }

        if curr_page < (page_count - max_pages / 2) {
            indicators.push(PaginationIndicator::Ellipsis);
            indicators.push(PaginationIndicator::Page(page_count));
        }
    }

    if curr_page > 1 {
        indicators.insert(0, PaginationIndicator::BackButton(curr_page - 1));
    }

    if curr_page < page_count {
        indicators.push(PaginationIndicator::NextButton(curr_page + 1));
    }

    indicators
}

const PAGE_LINK_STYLE: &str = "flex items-center justify-center px-3 h-8 leading-tight \
    text-gray-500 bg-white border border-gray-300 hover:bg-gray-100 \
    hover:text-gray-700 dark:bg-gray-800 dark:border-gray-700 \
    dark:text-gray-400 dark:hover:bg-gray-700 dark:hover:text-white";

const CURRENT_PAGE_STYLE: &str = "flex items-center justify-center px-3 h-8 \
    text-blue-600 border border-gray-300 bg-blue-50 dark:border-gray-700 \
    dark:bg-gray-700 dark:text-white";

/// Render the page selector for `indicators`.
///
/// `page_url` gives the URL of a page number. Links carry the page number in
/// `data-goto-page` so that `static/app.js` can switch to an already
/// rendered page; the URL is used when scripts are unavailable.
pub fn pagination_view(
    indicators: &[PaginationIndicator],
    page_url: impl Fn(u64) -> String,
) -> Markup {
    let page_link = |page: u64, text: String| {
        html!(
            a
                href=(page_url(page))
                data-goto-page=(page)
                class=(PAGE_LINK_STYLE)
            {
                (text)
            }
        )
    };

    html!(
        nav aria-label="Pagination" class="flex justify-center my-4"
        {
            ul class="inline-flex -space-x-px text-sm"
            {
                @for indicator in indicators {
                    li
                    {
                        @match indicator {
                            PaginationIndicator::Page(page) => { (page_link(*page, page.to_string())) }
                            PaginationIndicator::CurrPage(page) => {
                                span aria-current="page" class=(CURRENT_PAGE_STYLE) { (page) }
                            }
                            PaginationIndicator::Ellipsis => {
                                span class=(PAGE_LINK_STYLE) { "..." }
                            }
                            PaginationIndicator::BackButton(page) => { (page_link(*page, "Back".to_owned())) }
                            PaginationIndicator::NextButton(page) => { (page_link(*page, "Next".to_owned())) }
                        }
                    }
                }
            }
        }
    )
}
