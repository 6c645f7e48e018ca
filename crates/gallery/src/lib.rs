//! Read-only access to the remote gallery service.
//!
//! The service publishes three documents:
//! - the target dataset
//! - the player roster
//! - per-player completion status (a JSON object keyed by collected target id)
//!
//! [`GallerySource`] abstracts the transport; [`InMemoryGallery`] serves fixed
//! data and [`http::HttpGallery`] talks to the real endpoints.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use targets::collected::CollectedSet;
use targets::target::Target;

pub mod completion;
pub mod http;
pub mod roster;

pub use completion::*;
pub use roster::*;

/// Boxed future so the source trait stays dyn-compatible.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, reset, timeout).
    Network(String),
    /// The service answered with a non-success status.
    Status { url: String, status: u16 },
    /// The body could not be decoded into the expected document.
    Format(String),
    /// No document is available for this request.
    NotFound(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "gallery unreachable: {msg}"),
            FetchError::Status { url, status } => write!(f, "gallery returned {status} for {url}"),
            FetchError::Format(msg) => write!(f, "gallery sent an unreadable document: {msg}"),
            FetchError::NotFound(what) => write!(f, "gallery has no {what}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<targets::wire::DatasetError> for FetchError {
    fn from(err: targets::wire::DatasetError) -> Self {
        FetchError::Format(err.to_string())
    }
}

pub trait GallerySource: Send + Sync {
    fn fetch_targets(&self) -> BoxFuture<'_, Result<Vec<Target>, FetchError>>;

    fn fetch_roster(&self) -> BoxFuture<'_, Result<Vec<Player>, FetchError>>;

    /// Collected ids for `uid`. Never partial: either the whole document was
    /// decoded or an error is returned.
    fn fetch_completion<'a>(&'a self, uid: &'a str)
    -> BoxFuture<'a, Result<CollectedSet, FetchError>>;
}

/// Fixed in-memory gallery, mostly for tests and offline demos.
#[derive(Debug, Default, Clone)]
pub struct InMemoryGallery {
    targets: Vec<Target>,
    roster: Vec<Player>,
    completions: BTreeMap<String, Result<CollectedSet, FetchError>>,
}

impl InMemoryGallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_targets(mut self, targets: Vec<Target>) -> Self {
        self.targets = targets;
        self
    }

    pub fn with_player(mut self, player: Player, collected: CollectedSet) -> Self {
        self.completions.insert(player.uid.clone(), Ok(collected));
        self.roster.push(player);
        self
    }

    /// Makes completion fetches for `uid` fail with `err`.
    pub fn with_failing_completion(mut self, uid: impl Into<String>, err: FetchError) -> Self {
        self.completions.insert(uid.into(), Err(err));
        self
    }
}

impl GallerySource for InMemoryGallery {
    fn fetch_targets(&self) -> BoxFuture<'_, Result<Vec<Target>, FetchError>> {
        Box::pin(async move { Ok(self.targets.clone()) })
    }

    fn fetch_roster(&self) -> BoxFuture<'_, Result<Vec<Player>, FetchError>> {
        Box::pin(async move { Ok(self.roster.clone()) })
    }

    fn fetch_completion<'a>(
        &'a self,
        uid: &'a str,
    ) -> BoxFuture<'a, Result<CollectedSet, FetchError>> {
        Box::pin(async move {
            self.completions
                .get(uid)
                .cloned()
                .unwrap_or_else(|| Err(FetchError::NotFound(format!("completion for {uid}"))))
        })
    }
}
