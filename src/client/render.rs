//! Plain-text rendering of listings.

use std::fmt::Write;

use super::view::ViewState;
use super::Listing;
use crate::model::Character;

pub const EMPTY: &str = "No characters.";
pub const UNAVAILABLE: &str = "Could not load characters.";

pub fn card(character: &Character) -> String {
    format!(
        "#{id} {name}\n    Status:  {status}\n    Species: {species}\n    Image:   {image}\n",
        id = character.id,
        name = character.name,
        status = character.status,
        species = character.species,
        image = character.image,
    )
}

/// One card per record, or a placeholder line.
pub fn listing(listing: &Listing) -> String {
    match listing {
        Listing::Unavailable => format!("{UNAVAILABLE}\n"),
        Listing::Page(page) if page.results.is_empty() => format!("{EMPTY}\n"),
        Listing::Page(page) => page.results.iter().map(card).collect::<Vec<_>>().join("\n"),
    }
}

/// `Page 2 of 3` plus whichever filters are active.
pub fn footer(view: &ViewState) -> String {
    let mut out = format!("Page {} of {}", view.page(), view.pages());
    if !view.name().is_empty() {
        let _ = write!(out, "  name~\"{}\"", view.name());
    }
    if !view.status().is_empty() {
        let _ = write!(out, "  status={}", view.status());
    }
    out
}
