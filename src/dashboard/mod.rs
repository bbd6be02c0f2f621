//! Landing view: sales total and the most recent orders

use async_trait::async_trait;
use serde::Deserialize;

use crate::api::ApiClient;
use crate::auth::Route;
use crate::common::{AppContext, ClientError};
use crate::orders::Order;
use crate::pages::PageView;
use crate::realtime::Resource;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct DashboardSummary {
    #[serde(rename = "totalSales", default)]
    pub total_sales: f64,
    #[serde(rename = "recentOrders", default)]
    pub recent_orders: Vec<Order>,
}

pub async fn get_summary(api: &ApiClient) -> Result<DashboardSummary, ClientError> {
    api.get("/dashboard/summary").await
}

pub struct DashboardPage {
    ctx: AppContext,
    summary: DashboardSummary,
}

impl DashboardPage {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            ctx: ctx.clone(),
            summary: DashboardSummary::default(),
        }
    }

    pub fn summary(&self) -> &DashboardSummary {
        &self.summary
    }
}

#[async_trait]
impl PageView for DashboardPage {
    fn route(&self) -> Route {
        Route::Dashboard
    }

    fn resource(&self) -> Option<Resource> {
        Some(Resource::Dashboard)
    }

    async fn load(&mut self) -> Result<(), ClientError> {
        match get_summary(&self.ctx.api).await {
            Ok(summary) => {
                self.summary = summary;
                Ok(())
            }
            Err(e) => {
                self.ctx.surface(&e, "Failed to load dashboard");
                Err(e)
            }
        }
    }
}
