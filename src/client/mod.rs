//! Catalog client: view state, HTTP calls, and text rendering.
//!
//! Every change to the view re-fetches the current page from the server;
//! adds and removes are followed by a re-fetch instead of patching the
//! displayed list locally.

mod remote;
pub mod render;
mod view;

pub use remote::CatalogClient;
pub use view::{Sequencer, Ticket, ViewState};

use crate::query::CharacterPage;

/// What the list area shows after a fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Listing {
    Page(CharacterPage),
    /// The fetch failed; show a placeholder and keep the view as it was.
    Unavailable,
}

impl Listing {
    /// Folds the reported page count into `view`.
    pub fn apply_to(&self, view: &mut ViewState) {
        if let Self::Page(page) = self {
            view.set_pages(page.info.pages);
        }
    }
}
