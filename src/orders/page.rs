use async_trait::async_trait;
use tracing::{info, warn};

use super::draft::OrderDraft;
use super::models::{Order, OrderFilter, OrderId};
use super::service;
use crate::auth::Route;
use crate::common::{AppContext, ClientError, Notification};
use crate::pages::PageView;
use crate::realtime::Resource;

/// Orders view: order list, detail panel, and the draft being built
pub struct OrdersPage {
    ctx: AppContext,
    orders: Vec<Order>,
    filter: OrderFilter,
    draft: OrderDraft,
    selected: Option<Order>,
}

impl OrdersPage {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            ctx: ctx.clone(),
            orders: Vec::new(),
            filter: OrderFilter::default(),
            draft: OrderDraft::new(),
            selected: None,
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut OrderDraft {
        &mut self.draft
    }

    pub fn selected(&self) -> Option<&Order> {
        self.selected.as_ref()
    }

    pub fn filter(&self) -> &OrderFilter {
        &self.filter
    }

    pub async fn set_filter(&mut self, filter: OrderFilter) -> Result<(), ClientError> {
        self.filter = filter;
        self.load().await
    }

    /// Whether the cancel action should be offered for `id`
    pub fn can_cancel(&self, id: OrderId) -> bool {
        self.order(id).map(Order::can_cancel).unwrap_or(false)
    }

    /// Submit the draft. An empty draft is rejected locally without any
    /// request; on success the draft is reset.
    pub async fn create_order(&mut self) -> Result<Order, ClientError> {
        let request = match self.draft.to_request() {
            Ok(r) => r,
            Err(e) => {
                self.ctx.surface(&e, "Cannot create order");
                return Err(e);
            }
        };

        match service::create_order(&self.ctx.api, &request).await {
            Ok(order) => {
                info!(order_id = order.id, lines = request.items.len(), "Order created");
                self.draft.reset();
                self.ctx
                    .notifier
                    .notify(Notification::success("Order created", format!("#{}", order.id)));
                self.refresh().await;
                Ok(order)
            }
            Err(e) => {
                self.ctx.surface(&e, "Failed to create order");
                Err(e)
            }
        }
    }

    pub async fn cancel(&mut self, id: OrderId) -> Result<Order, ClientError> {
        let refusal = match self.order(id) {
            None => Some(format!("order #{} is not loaded", id)),
            Some(o) if !o.can_cancel() => Some(format!("order #{} is already {}", id, o.status)),
            Some(_) => None,
        };
        if let Some(reason) = refusal {
            let err = ClientError::ValidationFailed(reason);
            self.ctx.surface(&err, "Cannot cancel order");
            return Err(err);
        }

        match service::cancel_order(&self.ctx.api, id).await {
            Ok(order) => {
                info!(order_id = id, "Order cancelled");
                self.ctx
                    .notifier
                    .notify(Notification::success("Order cancelled", format!("#{}", id)));
                if self.selected.as_ref().map(|o| o.id) == Some(id) {
                    self.selected = Some(order.clone());
                }
                self.refresh().await;
                Ok(order)
            }
            Err(e) => {
                self.ctx.surface(&e, "Failed to cancel order");
                Err(e)
            }
        }
    }

    /// Load one order with its items into the detail panel
    pub async fn open(&mut self, id: OrderId) -> Result<&Order, ClientError> {
        match service::get_order(&self.ctx.api, id).await {
            Ok(order) => Ok(self.selected.insert(order)),
            Err(e) => {
                self.ctx.surface(&e, "Failed to load order");
                Err(e)
            }
        }
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    async fn refresh(&mut self) {
        if let Err(e) = self.load().await {
            warn!(error = %e, "Orders refresh failed");
        }
    }
}

#[async_trait]
impl PageView for OrdersPage {
    fn route(&self) -> Route {
        Route::Orders
    }

    fn resource(&self) -> Option<Resource> {
        Some(Resource::Orders)
    }

    async fn load(&mut self) -> Result<(), ClientError> {
        match service::list_orders(&self.ctx.api, &self.filter).await {
            Ok(orders) => {
                self.orders = orders;
                Ok(())
            }
            Err(e) => {
                self.ctx.surface(&e, "Failed to load orders");
                Err(e)
            }
        }
    }
}
