use std::sync::atomic::{AtomicU64, Ordering};

use crate::query::ListQuery;

/// What the catalog is currently showing: filters, page, and page count.
///
/// Changing a filter goes back to page 1. Paging wraps around in both
/// directions instead of stopping at the ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    name: String,
    status: String,
    page: usize,
    pages: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self { name: String::new(), status: String::new(), page: 1, pages: 1 }
    }
}

impl ViewState {
    pub fn name(&self) -> &str { &self.name }
    pub fn status(&self) -> &str { &self.status }
    pub fn page(&self) -> usize { self.page }
    pub fn pages(&self) -> usize { self.pages }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.trim().to_owned();
        self.page = 1;
    }

    /// An empty status shows every status.
    pub fn set_status(&mut self, status: &str) {
        self.status = status.trim().to_owned();
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Page count reported by the last applied listing.
    pub fn set_pages(&mut self, pages: usize) {
        self.pages = pages.max(1);
    }

    pub fn next_page(&mut self) {
        self.page = if self.page >= self.pages { 1 } else { self.page + 1 };
    }

    pub fn previous_page(&mut self) {
        self.page = if self.page <= 1 || self.page > self.pages {
            self.pages
        } else {
            self.page - 1
        };
    }

    pub fn query(&self) -> ListQuery {
        ListQuery {
            name: Some(self.name.clone()).filter(|n| !n.is_empty()),
            status: Some(self.status.clone()).filter(|s| !s.is_empty()),
            page: self.page,
        }
    }
}

/// Orders overlapping fetches so a slow, superseded reply never replaces a
/// newer one.
#[derive(Debug, Default)]
pub struct Sequencer {
    issued: AtomicU64,
    applied: AtomicU64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Sequencer {
    pub fn issue(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// `true` if `ticket` is newer than every ticket accepted so far.
    pub fn accept(&self, ticket: Ticket) -> bool {
        self.applied.fetch_max(ticket.0, Ordering::SeqCst) < ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn view_with_pages(pages: usize) -> ViewState {
        let mut view = ViewState::default();
        view.set_pages(pages);
        view
    }

    #[test]
    fn next_wraps_to_first_page() {
        let mut view = view_with_pages(3);
        view.next_page();
        view.next_page();
        assert_eq!(view.page(), 3);
        view.next_page();
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn previous_wraps_to_last_page() {
        let mut view = view_with_pages(3);
        view.previous_page();
        assert_eq!(view.page(), 3);
        view.previous_page();
        assert_eq!(view.page(), 2);
    }

    #[test]
    fn single_page_stays_put() {
        let mut view = view_with_pages(0);
        assert_eq!(view.pages(), 1);
        view.next_page();
        assert_eq!(view.page(), 1);
        view.previous_page();
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn paging_recovers_when_page_count_shrinks() {
        let mut view = view_with_pages(4);
        view.set_page(4);
        view.set_pages(2);
        view.previous_page();
        assert_eq!(view.page(), 2);

        view.set_page(4);
        view.next_page();
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn filters_reset_the_page() {
        let mut view = view_with_pages(5);
        view.set_page(3);
        view.set_name("  rick ");
        assert_eq!(view.page(), 1);
        assert_eq!(view.name(), "rick");

        view.set_page(2);
        view.set_status("Dead");
        assert_eq!(
            view.query(),
            ListQuery { name: Some("rick".into()), status: Some("Dead".into()), page: 1 }
        );

        view.set_status("");
        view.set_name("");
        assert_eq!(view.query(), ListQuery::default());
    }

    #[test]
    fn stale_tickets_are_rejected() {
        let seq = Sequencer::default();
        let first = seq.issue();
        let second = seq.issue();
        let third = seq.issue();

        assert!(seq.accept(second));
        assert!(!seq.accept(first));
        assert!(seq.accept(third));
        assert!(!seq.accept(third));
    }
}
