//! Page-number sequences and range labels for paginated tables.

use crate::error::{validation_error, AppResult};
use std::fmt;

/// Sentinel used where a page sequence is flattened to integers
pub const ELLIPSIS: i64 = -1;

/// Page totals up to this size are listed without gaps
const MAX_UNCOMPRESSED_PAGES: usize = 7;

/// One slot of a page selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    Page(usize),
    Ellipsis,
}

impl PageSlot {
    /// Page index, or [`ELLIPSIS`] for a gap
    pub fn to_sentinel(self) -> i64 {
        match self {
            PageSlot::Page(index) => index as i64,
            PageSlot::Ellipsis => ELLIPSIS,
        }
    }
}

/// Compressed page sequence for a selector showing `current` of `total_pages`.
///
/// First and last page are always present and at most two gaps appear.
pub fn page_numbers(current: usize, total_pages: usize) -> Vec<PageSlot> {
    use PageSlot::{Ellipsis, Page};

    if total_pages <= MAX_UNCOMPRESSED_PAGES {
        return (0..total_pages).map(Page).collect();
    }

    let last = total_pages - 1;
    if current < 4 {
        vec![Page(0), Page(1), Page(2), Page(3), Ellipsis, Page(last)]
    } else if current + 5 > total_pages {
        vec![
            Page(0),
            Ellipsis,
            Page(total_pages - 4),
            Page(total_pages - 3),
            Page(total_pages - 2),
            Page(last),
        ]
    } else {
        vec![
            Page(0),
            Ellipsis,
            Page(current - 1),
            Page(current),
            Page(current + 1),
            Ellipsis,
            Page(last),
        ]
    }
}

/// [`page_numbers`] flattened to indices with `-1` for gaps
pub fn page_number_sentinels(current: usize, total_pages: usize) -> Vec<i64> {
    page_numbers(current, total_pages)
        .into_iter()
        .map(PageSlot::to_sentinel)
        .collect()
}

/// Paging position of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    page_number: usize,
    page_size: usize,
    total_results: usize,
}

impl PaginationState {
    /// Start on the first page; `page_size` must be positive
    pub fn new(page_size: usize, total_results: usize) -> AppResult<Self> {
        if page_size == 0 {
            return Err(validation_error("page size must be greater than zero"));
        }
        Ok(Self {
            page_number: 0,
            page_size,
            total_results,
        })
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_results(&self) -> usize {
        self.total_results
    }

    pub fn total_pages(&self) -> usize {
        self.total_results.div_ceil(self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 0
    }

    pub fn has_next(&self) -> bool {
        self.page_number + 1 < self.total_pages()
    }

    /// Move back one page; no-op on the first page
    pub fn previous(&mut self) {
        if self.has_previous() {
            self.page_number -= 1;
        }
    }

    /// Move forward one page; no-op on the last page
    pub fn next(&mut self) {
        if self.has_next() {
            self.page_number += 1;
        }
    }

    /// Jump to `page`, clamped to the last page
    pub fn go_to(&mut self, page: usize) {
        self.page_number = page.min(self.total_pages().saturating_sub(1));
    }

    /// Back to the first page, e.g. after a filter change
    pub fn reset(&mut self) {
        self.page_number = 0;
    }

    /// Update the result count without moving the page
    pub fn set_total_results(&mut self, total_results: usize) {
        self.total_results = total_results;
    }

    /// Selector slots for the current position
    pub fn slots(&self) -> Vec<PageSlot> {
        page_numbers(self.page_number, self.total_pages())
    }

    /// Index range of the rows on the current page
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = (self.page_number * self.page_size).min(self.total_results);
        start..self.showing_to()
    }

    /// 1-based index of the first row shown, 0 when nothing is shown
    pub fn showing_from(&self) -> usize {
        if self.showing_to() == 0 {
            0
        } else {
            self.page_number * self.page_size + 1
        }
    }

    /// 1-based index of the last row shown
    pub fn showing_to(&self) -> usize {
        ((self.page_number + 1) * self.page_size).min(self.total_results)
    }

    /// `Showing X - Y of Z results`
    pub fn summary(&self) -> String {
        format!(
            "Showing {} - {} of {} results",
            self.showing_from(),
            self.showing_to(),
            group_thousands(self.total_results)
        )
    }

    /// Text page selector, current page in brackets
    pub fn render_controls(&self) -> String {
        let mut parts = Vec::new();
        parts.push(if self.has_previous() { "< Previous" } else { "  Previous" }.to_string());
        for slot in self.slots() {
            parts.push(match slot {
                PageSlot::Ellipsis => "...".to_string(),
                PageSlot::Page(index) if index == self.page_number => format!("[{}]", index + 1),
                PageSlot::Page(index) => (index + 1).to_string(),
            });
        }
        parts.push(if self.has_next() { "Next >" } else { "Next  " }.to_string());
        parts.join(" ")
    }
}

impl fmt::Display for PaginationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
