//! Best-effort cover image downloads.
//!
//! Maps each image descriptor on a master release to its downloaded bytes.
//! Individual failures skip that image and are counted; a single bad image
//! never aborts the batch. Downloads run through a bounded concurrent pool.

use std::collections::HashMap;

use futures::stream::{self, StreamExt};

use super::client::DiscogsClient;
use super::dto::{Image, MasterRelease};

/// How many image downloads may be in flight at once
const MAX_IN_FLIGHT: usize = 4;

/// Result of a batch download: successes keyed by descriptor, plus how many
/// images were skipped over errors.
#[derive(Debug, Default)]
pub struct ImageDownloads {
    /// Downloaded bytes per image descriptor
    pub images: HashMap<Image, Vec<u8>>,
    /// Number of images that failed to download and were skipped
    pub failed: usize,
}

impl DiscogsClient {
    /// Download every image attached to a master release, best effort.
    ///
    /// `None` means there was nothing to keep - the release carries no
    /// images, or every download failed. An empty map is never returned.
    pub async fn download_all_images(
        &self,
        master: &MasterRelease,
        token: Option<&str>,
    ) -> Option<ImageDownloads> {
        if master.images.is_empty() {
            return None;
        }

        let results: Vec<(Image, Option<Vec<u8>>)> = stream::iter(master.images.iter().cloned())
            .map(|image| async move {
                let data = self.fetch_one(&image, token).await;
                (image, data)
            })
            .buffer_unordered(MAX_IN_FLIGHT)
            .collect()
            .await;

        let mut downloads = ImageDownloads::default();
        for (image, data) in results {
            match data {
                Some(bytes) => {
                    downloads.images.insert(image, bytes);
                }
                None => downloads.failed += 1,
            }
        }

        (!downloads.images.is_empty()).then_some(downloads)
    }

    /// One best-effort download; any error becomes a skip.
    async fn fetch_one(&self, image: &Image, token: Option<&str>) -> Option<Vec<u8>> {
        let Some(url) = image.uri.as_deref() else {
            tracing::warn!(kind = image.kind.as_str(), "image has no source URL, skipping");
            return None;
        };

        match self.download_image(url, token).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!(url, error = %e, "image download failed, skipping");
                None
            }
        }
    }
}
