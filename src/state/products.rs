//! Product cache: local mirror of the backend catalog.
//!
//! Confirm-then-apply: every mutation talks to the backend first and touches
//! the local collection only after the call succeeds. The collection is never
//! persisted; it can be rebuilt from the backend at any time.

use crate::api::{self, ApiClient, ApiError};
use crate::models::{ImageAsset, Product, ProductPayload};

/// Page size used by [`ProductCache::load_all`].
pub const DEFAULT_PAGE_SIZE: u32 = 50;

pub struct ProductCache {
    client: ApiClient,
    products: Vec<Product>,
}

impl ProductCache {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            products: Vec::new(),
        }
    }

    /// Read-only view of the cached collection, in server order for loads and
    /// append order for creates.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub async fn load_all(&mut self) -> Result<(), ApiError> {
        self.load_with_limit(DEFAULT_PAGE_SIZE).await
    }

    /// Full replace: the server result becomes the collection, no merge with
    /// prior state.
    pub async fn load_with_limit(&mut self, limit: u32) -> Result<(), ApiError> {
        let page = api::products::list(&self.client, limit).await?;
        tracing::debug!("Loaded {} products", page.products.len());
        self.products = page.products;
        Ok(())
    }

    /// Creates on the backend, then mirrors the returned product locally.
    /// Returns the created product to the caller.
    pub async fn add(&mut self, category_id: &str, name: &str) -> Result<Product, ApiError> {
        let payload = ProductPayload {
            name: name.to_string(),
            category: category_id.to_string(),
        };
        let created = api::products::create(&self.client, &payload).await?;

        // Creates mint fresh ids, so this appends; the replace arm keeps the
        // one-entry-per-id invariant if the backend ever returns a known id.
        match self.products.iter_mut().find(|p| p.id == created.id) {
            Some(slot) => *slot = created.clone(),
            None => self.products.push(created.clone()),
        }
        Ok(created)
    }

    /// Updates on the backend, then replaces the matching local entry. An id
    /// absent from the cache is not an error here; the collection is simply
    /// left unchanged.
    pub async fn update(&mut self, category_id: &str, name: &str, id: &str) -> Result<(), ApiError> {
        let payload = ProductPayload {
            name: name.to_string(),
            category: category_id.to_string(),
        };
        let updated = api::products::update(&self.client, id, &payload).await?;

        if let Some(slot) = self.products.iter_mut().find(|p| p.id == id) {
            *slot = updated;
        }
        Ok(())
    }

    /// Deletes on the backend, then filters the id out of the collection.
    pub async fn remove(&mut self, id: &str) -> Result<(), ApiError> {
        api::products::delete(&self.client, id).await?;
        self.products.retain(|p| p.id != id);
        Ok(())
    }

    /// Fetches one product for detail and edit views without touching the
    /// cached collection.
    pub async fn load_by_id(&self, id: &str) -> Result<Product, ApiError> {
        api::products::get(&self.client, id).await
    }

    /// Uploads one picked image for a product. Failures on this path are
    /// logged and swallowed; neither the collection nor the caller sees them.
    pub async fn upload_image(&self, asset: ImageAsset, id: &str) {
        if let Err(err) = api::products::upload_image(&self.client, id, asset).await {
            tracing::warn!("Image upload for product {} failed: {}", id, err);
        }
    }
}
