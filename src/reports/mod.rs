pub mod models;
pub mod page;

pub use models::{ReportPeriod, SalesReport};
pub use page::ReportsPage;
