use serde::de::DeserializeOwned;

use super::view::Sequencer;
use super::Listing;
use crate::api::{InitReply, Message};
use crate::error::Error;
use crate::model::{Character, NewCharacter};
use crate::query::{CharacterPage, ListQuery};

/// HTTP client for the catalog API.
pub struct CatalogClient {
    http: reqwest::Client,
    endpoint: String,
    sequence: Sequencer,
}

impl CatalogClient {
    /// `base_url` is the server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/api/character", base_url.trim_end_matches('/')),
            sequence: Sequencer::default(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn fetch_page(&self, query: &ListQuery) -> Result<CharacterPage, Error> {
        let res = self.http.get(&self.endpoint).query(&query.to_pairs()).send().await?;
        decode(res).await
    }

    pub async fn get(&self, id: u64) -> Result<Character, Error> {
        let res = self.http.get(format!("{}/{id}", self.endpoint)).send().await?;
        decode(res).await
    }

    pub async fn create(&self, new: &NewCharacter) -> Result<Character, Error> {
        let res = self.http.post(&self.endpoint).json(new).send().await?;
        decode(res).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), Error> {
        let res = self.http.delete(format!("{}/{id}", self.endpoint)).send().await?;
        decode::<Message>(res).await.map(|_| ())
    }

    /// Replaces the whole collection; the server renumbers from 1.
    pub async fn init(&self, records: &[NewCharacter]) -> Result<Vec<Character>, Error> {
        let res = self.http.post(format!("{}/init", self.endpoint)).json(records).send().await?;
        decode::<InitReply>(res).await.map(|reply| reply.characters)
    }

    /// Fetches one page for display.
    ///
    /// Returns `None` when a fetch issued later has already been applied, so
    /// the caller keeps showing the newer result. A failed fetch becomes
    /// [`Listing::Unavailable`] rather than an error.
    pub async fn load(&self, query: &ListQuery) -> Option<Listing> {
        let ticket = self.sequence.issue();
        let listing = match self.fetch_page(query).await {
            Ok(page) => Listing::Page(page),
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch characters");
                Listing::Unavailable
            }
        };
        if self.sequence.accept(ticket) {
            Some(listing)
        } else {
            tracing::debug!(?ticket, "discarding superseded listing");
            None
        }
    }
}

/// Success bodies decode as `T`; anything else becomes [`Error::Api`] carrying
/// the server's `{ message }` when there is one.
async fn decode<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, Error> {
    let status = res.status();
    if status.is_success() {
        return Ok(res.json().await?);
    }
    let message = match res.json::<Message>().await {
        Ok(body) => body.message,
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_owned(),
    };
    Err(Error::Api { status: status.as_u16(), message })
}
