//! HTTP transport for the gallery service.

use serde::{Deserialize, Serialize};
use targets::collected::CollectedSet;
use targets::target::Target;
use targets::wire::parse_targets;

use crate::completion::parse_completion;
use crate::roster::{Player, parse_roster};
use crate::{BoxFuture, FetchError, GallerySource};

/// Placeholder replaced by the URL-encoded player UID.
pub const UID_PLACEHOLDER: &str = "{uid}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryEndpoints {
    pub dataset_url: String,
    pub roster_url: String,
    /// Must contain [`UID_PLACEHOLDER`].
    pub completion_url_template: String,
}

impl GalleryEndpoints {
    pub fn completion_url(&self, uid: &str) -> String {
        self.completion_url_template
            .replace(UID_PLACEHOLDER, &urlencoding::encode(uid))
    }
}

pub struct HttpGallery {
    endpoints: GalleryEndpoints,
    http: reqwest::Client,
}

impl HttpGallery {
    pub fn new(endpoints: GalleryEndpoints) -> Self {
        Self::with_client(endpoints, reqwest::Client::new())
    }

    pub fn with_client(endpoints: GalleryEndpoints, http: reqwest::Client) -> Self {
        Self { endpoints, http }
    }

    pub fn endpoints(&self) -> &GalleryEndpoints {
        &self.endpoints
    }

    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        tracing::debug!(url = url, "gallery request");
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        resp.text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }
}

impl GallerySource for HttpGallery {
    fn fetch_targets(&self) -> BoxFuture<'_, Result<Vec<Target>, FetchError>> {
        Box::pin(async move {
            let body = self.get_text(&self.endpoints.dataset_url).await?;
            let targets = parse_targets(&body)?;
            tracing::info!(count = targets.len(), "dataset fetched");
            Ok(targets)
        })
    }

    fn fetch_roster(&self) -> BoxFuture<'_, Result<Vec<Player>, FetchError>> {
        Box::pin(async move {
            let body = self.get_text(&self.endpoints.roster_url).await?;
            parse_roster(&body)
        })
    }

    fn fetch_completion<'a>(
        &'a self,
        uid: &'a str,
    ) -> BoxFuture<'a, Result<CollectedSet, FetchError>> {
        Box::pin(async move {
            let url = self.endpoints.completion_url(uid);
            let body = self.get_text(&url).await?;
            let collected = parse_completion(&body)?;
            tracing::debug!(uid = uid, collected = collected.len(), "completion fetched");
            Ok(collected)
        })
    }
}
