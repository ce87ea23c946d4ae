//! source/paged.rs
//! Page-at-a-time retrieval.
//!
//! Summary: holds at most one fetched page. The next page is requested only
//! when the current one is drained and someone asks for another record.

use std::collections::VecDeque;

use crate::source::types::RecordSource;
use crate::types::SourceError;

pub struct PagedSource<R, F>
where
    F: FnMut(usize) -> Result<Option<Vec<R>>, SourceError>,
{
    fetch: F,
    page: VecDeque<R>,
    next_page: usize,
    exhausted: bool,
}

impl<R, F> PagedSource<R, F>
where
    F: FnMut(usize) -> Result<Option<Vec<R>>, SourceError>,
{
    /// `fetch(page_index)` returns the page, or `None` past the last one.
    /// An empty page also ends the sequence.
    pub fn new(fetch: F) -> Self {
        Self {
            fetch,
            page: VecDeque::new(),
            next_page: 0,
            exhausted: false,
        }
    }

    /// Number of pages requested so far.
    pub fn pages_fetched(&self) -> usize {
        self.next_page
    }

    /// Records of the current page not yet handed out.
    pub fn buffered(&self) -> usize {
        self.page.len()
    }

    fn refill(&mut self) -> Result<(), SourceError> {
        if !self.page.is_empty() || self.exhausted {
            return Ok(());
        }

        let index = self.next_page;
        self.next_page += 1;
        match (self.fetch)(index)? {
            Some(records) if !records.is_empty() => {
                tracing::debug!(page = index, records = records.len(), "fetched page");
                self.page.extend(records);
            }
            _ => {
                tracing::debug!(page = index, "no more pages");
                self.exhausted = true;
            }
        }
        Ok(())
    }
}

impl<R, F> RecordSource for PagedSource<R, F>
where
    F: FnMut(usize) -> Result<Option<Vec<R>>, SourceError>,
{
    type Record = R;

    fn has_next(&mut self) -> Result<bool, SourceError> {
        self.refill()?;
        Ok(!self.page.is_empty())
    }

    fn next_record(&mut self) -> Result<Option<R>, SourceError> {
        self.refill()?;
        Ok(self.page.pop_front())
    }

    fn close(&mut self) {
        self.page.clear();
        self.exhausted = true;
    }
}
