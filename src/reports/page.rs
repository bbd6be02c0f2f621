use async_trait::async_trait;

use super::models::{ReportPeriod, SalesReport};
use crate::api::ApiClient;
use crate::auth::Route;
use crate::common::{AppContext, ClientError};
use crate::pages::PageView;

pub async fn list_reports(api: &ApiClient, period: ReportPeriod) -> Result<Vec<SalesReport>, ClientError> {
    api.get(&format!("/reports/{}", period)).await
}

/// Sales reports with a daily/weekly/monthly tab
pub struct ReportsPage {
    ctx: AppContext,
    period: ReportPeriod,
    reports: Vec<SalesReport>,
}

impl ReportsPage {
    pub fn new(ctx: &AppContext, period: ReportPeriod) -> Self {
        Self {
            ctx: ctx.clone(),
            period,
            reports: Vec::new(),
        }
    }

    pub fn period(&self) -> ReportPeriod {
        self.period
    }

    pub fn reports(&self) -> &[SalesReport] {
        &self.reports
    }

    pub fn total_sales(&self) -> f64 {
        self.reports.iter().map(|r| r.total_sales).sum()
    }

    /// Switch tab; every switch fetches the period again
    pub async fn select(&mut self, period: ReportPeriod) -> Result<(), ClientError> {
        self.period = period;
        self.load().await
    }
}

#[async_trait]
impl PageView for ReportsPage {
    fn route(&self) -> Route {
        Route::Reports
    }

    async fn load(&mut self) -> Result<(), ClientError> {
        match list_reports(&self.ctx.api, self.period).await {
            Ok(reports) => {
                self.reports = reports;
                Ok(())
            }
            Err(e) => {
                self.ctx.surface(&e, "Failed to load reports");
                Err(e)
            }
        }
    }
}
