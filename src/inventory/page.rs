use async_trait::async_trait;
use tracing::{info, warn};

use super::models::{Product, ProductId, ProductInput};
use super::service;
use super::validators::ProductValidator;
use crate::auth::Route;
use crate::common::{AppContext, ClientError, Notification, Validator};
use crate::pages::PageView;
use crate::realtime::Resource;

/// Inventory view: cached product list with local edits saved explicitly
pub struct InventoryPage {
    ctx: AppContext,
    products: Vec<Product>,
}

impl InventoryPage {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            ctx: ctx.clone(),
            products: Vec::new(),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Mutable access to the cached copy; nothing is sent until [`save`](Self::save)
    pub fn edit(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    /// Persist the locally edited product
    pub async fn save(&mut self, id: ProductId) -> Result<Product, ClientError> {
        let input = match self.product(id) {
            Some(p) => p.input(),
            None => {
                let err = ClientError::ValidationFailed(format!("product {} is not loaded", id));
                self.ctx.surface(&err, "Failed to save");
                return Err(err);
            }
        };
        self.validate(&input)?;

        match service::update_product(&self.ctx.api, id, &input).await {
            Ok(saved) => {
                info!(product_id = id, "Product saved");
                self.ctx
                    .notifier
                    .notify(Notification::success("Saved", saved.name.clone()));
                self.refresh().await;
                Ok(saved)
            }
            Err(e) => {
                self.ctx.surface(&e, "Failed to save");
                Err(e)
            }
        }
    }

    pub async fn create(&mut self, input: ProductInput) -> Result<Product, ClientError> {
        self.validate(&input)?;

        match service::create_product(&self.ctx.api, &input).await {
            Ok(created) => {
                info!(product_id = created.id, "Product created");
                self.ctx
                    .notifier
                    .notify(Notification::success("Product added", created.name.clone()));
                self.refresh().await;
                Ok(created)
            }
            Err(e) => {
                self.ctx.surface(&e, "Failed to create");
                Err(e)
            }
        }
    }

    /// Delete a product; on failure the cached list is left as it was
    pub async fn delete(&mut self, id: ProductId) -> Result<(), ClientError> {
        match service::delete_product(&self.ctx.api, id).await {
            Ok(()) => {
                info!(product_id = id, "Product deleted");
                self.ctx.notifier.notify(Notification::info("Product deleted"));
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                self.ctx.surface(&e, "Failed to delete");
                Err(e)
            }
        }
    }

    fn validate(&self, input: &ProductInput) -> Result<(), ClientError> {
        let result = ProductValidator.validate(input).into_result();
        if let Err(e) = &result {
            self.ctx.surface(e, "Invalid product");
        }
        result
    }

    async fn refresh(&mut self) {
        if let Err(e) = self.load().await {
            warn!(error = %e, "Inventory refresh failed");
        }
    }
}

#[async_trait]
impl PageView for InventoryPage {
    fn route(&self) -> Route {
        Route::Inventory
    }

    fn resource(&self) -> Option<Resource> {
        Some(Resource::Inventory)
    }

    async fn load(&mut self) -> Result<(), ClientError> {
        match service::list_products(&self.ctx.api).await {
            Ok(products) => {
                self.products = products;
                Ok(())
            }
            Err(e) => {
                self.ctx.surface(&e, "Failed to load inventory");
                Err(e)
            }
        }
    }
}
