//! shopdesk - back office for the coffee shop API
//!
//! ```bash
//! shopdesk login -u manager -p secret
//! shopdesk inventory list
//! shopdesk orders create --item 5:2 --item 7:1
//! shopdesk watch orders
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use shopdesk::auth::{service as auth, FileTokenStore, Route, NAV_ITEMS};
use shopdesk::dashboard::DashboardPage;
use shopdesk::inventory::{InventoryPage, ProductId, ProductInput};
use shopdesk::orders::{Order, OrderFilter, OrderId, OrderStatus, OrdersPage};
use shopdesk::reports::{ReportPeriod, ReportsPage};
use shopdesk::users::{UserId, UsersPage};
use shopdesk::{mount, AppContext, ClientConfig, ClientError, MountedPage, Notification, PageView};

#[derive(Parser)]
#[command(name = "shopdesk")]
#[command(author, version, about = "Coffee shop back office")]
struct Cli {
    /// REST origin, e.g. http://localhost:8000
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Realtime origin; derived from the API origin when omitted
    #[arg(long, global = true)]
    socket_url: Option<String>,

    /// Session storage file
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Exchange credentials for a session token
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long, env = "SHOPDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Sales total and recent orders
    Dashboard,
    /// Manage products
    Inventory {
        #[command(subcommand)]
        action: InventoryAction,
    },
    /// Browse, place and cancel orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Manage staff accounts (managers only)
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// Sales reports for a period (`daily`, `weekly`, `monthly`)
    Reports {
        #[arg(default_value = "daily")]
        period: ReportPeriod,
        /// Walk through every period tab in turn
        #[arg(long)]
        all: bool,
    },
    /// Keep a page open and reload it on realtime events until Ctrl-C
    Watch {
        #[arg(value_enum)]
        page: WatchTarget,
    },
}

#[derive(Subcommand)]
enum InventoryAction {
    List,
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        price: f64,
        #[arg(short, long, default_value_t = 0)]
        stock: i64,
    },
    /// Change fields of an existing product
    Update {
        id: ProductId,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        price: Option<f64>,
        #[arg(short, long)]
        stock: Option<i64>,
    },
    Delete {
        id: ProductId,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    List {
        #[arg(long)]
        status: Option<OrderStatus>,
        /// Only orders created on this day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    Show {
        id: OrderId,
    },
    /// Place an order from `PRODUCT_ID:QUANTITY` lines
    Create {
        #[arg(short, long = "item", value_parser = parse_line, required = true)]
        items: Vec<(ProductId, i64)>,
        #[arg(long, default_value = "pending")]
        status: OrderStatus,
    },
    Cancel {
        id: OrderId,
    },
}

#[derive(Subcommand)]
enum UsersAction {
    List,
    Add {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "SHOPDESK_NEW_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        manager: bool,
    },
    Delete {
        id: UserId,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum WatchTarget {
    Dashboard,
    Inventory,
    Orders,
}

fn parse_line(raw: &str) -> Result<(ProductId, i64), String> {
    let (id, qty) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected PRODUCT_ID:QUANTITY, got '{}'", raw))?;
    let id = id.trim().parse().map_err(|_| format!("bad product id '{}'", id))?;
    let qty = qty.trim().parse().map_err(|_| format!("bad quantity '{}'", qty))?;
    Ok((id, qty))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(api_url) = cli.api_url.as_deref() {
        config = config.with_api_url(api_url, cli.socket_url.as_deref());
    } else if let Some(socket_url) = cli.socket_url.as_deref() {
        config.realtime.socket_url = socket_url.trim_end_matches('/').to_string();
    }
    if let Some(storage) = cli.storage.clone() {
        config.storage_path = storage;
    }
    let store = Arc::new(FileTokenStore::new(config.storage_path.clone()));
    let (ctx, mut notifications) =
        AppContext::new(config, store.clone()).context("failed to build client")?;
    info!(api_url = %ctx.api.base_url(), storage = %store.path().display(), "Configuration loaded");

    let result = run(cli.command, &ctx, &mut notifications).await;
    drain(&mut notifications);
    result
}

async fn run(
    command: Commands,
    ctx: &AppContext,
    notifications: &mut UnboundedReceiver<Notification>,
) -> anyhow::Result<()> {
    match command {
        Commands::Login { username, password } => {
            auth::login(ctx, &username, &password).await?;
            println!("Signed in as {}", username);
            print_nav();
        }
        Commands::Logout => {
            auth::logout(ctx)?;
            println!("Signed out");
        }
        Commands::Whoami => {
            ctx.guard().activate().map_err(login_hint)?;
            let user = auth::current_user(ctx).await?;
            let role = if user.is_manager { "manager" } else { "staff" };
            println!("{} (#{}, {})", user.username, user.id, role);
        }
        Commands::Dashboard => {
            let page = open(ctx, DashboardPage::new(ctx)).await?;
            print_dashboard(page.view());
        }
        Commands::Inventory { action } => inventory(ctx, action).await?,
        Commands::Orders { action } => orders(ctx, action).await?,
        Commands::Users { action } => users(ctx, action).await?,
        Commands::Reports { period, all } => {
            let mut page = open(ctx, ReportsPage::new(ctx, period)).await?;
            print_reports(page.view());
            if all {
                for next in ReportPeriod::ALL.into_iter().filter(|p| *p != period) {
                    page.view_mut().select(next).await?;
                    print_reports(page.view());
                }
            }
        }
        Commands::Watch { page } => match page {
            WatchTarget::Dashboard => {
                let page = open(ctx, DashboardPage::new(ctx)).await?;
                watch(page, notifications, print_dashboard).await?;
            }
            WatchTarget::Inventory => {
                let page = open(ctx, InventoryPage::new(ctx)).await?;
                watch(page, notifications, print_inventory).await?;
            }
            WatchTarget::Orders => {
                let page = open(ctx, OrdersPage::new(ctx)).await?;
                watch(page, notifications, print_orders).await?;
            }
        },
    }
    Ok(())
}

async fn inventory(ctx: &AppContext, action: InventoryAction) -> anyhow::Result<()> {
    let mut page = open(ctx, InventoryPage::new(ctx)).await?;
    let view = page.view_mut();

    match action {
        InventoryAction::List => {}
        InventoryAction::Add { name, price, stock } => {
            view.create(ProductInput { name, price, stock }).await?;
        }
        InventoryAction::Update {
            id,
            name,
            price,
            stock,
        } => {
            let product = view
                .edit(id)
                .ok_or_else(|| anyhow!("product {} not found", id))?;
            if let Some(name) = name {
                product.name = name;
            }
            if let Some(price) = price {
                product.price = price;
            }
            if let Some(stock) = stock {
                product.stock = stock;
            }
            view.save(id).await?;
        }
        InventoryAction::Delete { id } => view.delete(id).await?,
    }

    print_inventory(page.view());
    Ok(())
}

async fn orders(ctx: &AppContext, action: OrdersAction) -> anyhow::Result<()> {
    let mut page = open(ctx, OrdersPage::new(ctx)).await?;
    let view = page.view_mut();

    match action {
        OrdersAction::List { status, date } => {
            if status.is_some() || date.is_some() {
                view.set_filter(OrderFilter { status, date }).await?;
            }
            print_orders(view);
        }
        OrdersAction::Show { id } => {
            let order = view.open(id).await?;
            print_order_detail(order);
        }
        OrdersAction::Create { items, status } => {
            let draft = view.draft_mut();
            for (product_id, quantity) in items {
                draft.set_quantity(product_id, quantity);
            }
            draft.set_status(status);
            let order = view.create_order().await?;
            print_order_detail(&order);
        }
        OrdersAction::Cancel { id } => {
            let order = view.cancel(id).await?;
            println!("Order #{} is now {}", order.id, order.status);
        }
    }
    Ok(())
}

async fn users(ctx: &AppContext, action: UsersAction) -> anyhow::Result<()> {
    let mut page = open(ctx, UsersPage::new(ctx)).await?;
    let view = page.view_mut();

    match action {
        UsersAction::List => {}
        UsersAction::Add {
            username,
            password,
            manager,
        } => {
            let form = view.form_mut();
            form.username = username;
            form.password = password;
            form.is_manager = manager;
            view.create().await?;
        }
        UsersAction::Delete { id } => view.delete(id).await?,
    }

    print_users(page.view());
    Ok(())
}

/// Mount a page, turning a rejected session into a login hint
async fn open<P: PageView>(ctx: &AppContext, page: P) -> anyhow::Result<MountedPage<P>> {
    mount(ctx, page).await.map_err(login_hint)
}

fn login_hint(err: ClientError) -> anyhow::Error {
    if err.is_auth_invalid() {
        anyhow!("{}; sign in with `shopdesk login` first", err)
    } else {
        err.into()
    }
}

async fn watch<P: PageView>(
    mut page: MountedPage<P>,
    notifications: &mut UnboundedReceiver<Notification>,
    render: fn(&P),
) -> anyhow::Result<()> {
    drain(notifications);
    render(page.view());

    page.go_live().await?;
    println!("Watching {} (Ctrl-C to stop)", page.view().route());

    loop {
        tokio::select! {
            event = page.pump() => match event {
                Some(event) => {
                    info!(event = %event, "Realtime event handled");
                    drain(notifications);
                    render(page.view());
                }
                None => {
                    warn!("Realtime connection ended");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    page.unmount().await;
    Ok(())
}

fn drain(notifications: &mut UnboundedReceiver<Notification>) {
    while let Ok(notification) = notifications.try_recv() {
        eprintln!("{}", notification);
    }
}

fn print_nav() {
    let items: Vec<&str> = NAV_ITEMS.iter().map(Route::label).collect();
    println!("Pages: {}", items.join(" | "));
}

fn print_dashboard(page: &DashboardPage) {
    let summary = page.summary();
    println!("Total sales: {:.2}", summary.total_sales);
    println!("Recent orders:");
    for order in &summary.recent_orders {
        print_order_row(order);
    }
}

fn print_inventory(page: &InventoryPage) {
    println!("{:>6}  {:<30} {:>10} {:>6}", "ID", "NAME", "PRICE", "STOCK");
    for p in page.products() {
        println!("{:>6}  {:<30} {:>10.2} {:>6}", p.id, p.name, p.price, p.stock);
    }
}

fn print_orders(page: &OrdersPage) {
    for order in page.orders() {
        print_order_row(order);
    }
}

fn print_order_row(order: &Order) {
    println!(
        "#{:<6} {:<10} {}  {} item(s)",
        order.id,
        order.status,
        order.created_at.format("%Y-%m-%d %H:%M"),
        order.items.len()
    );
}

fn print_order_detail(order: &Order) {
    print_order_row(order);
    for item in &order.items {
        let name = item
            .product
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("?");
        println!("    {} x {} (#{})", item.quantity, name, item.product_id);
    }
}

fn print_users(page: &UsersPage) {
    for user in page.users() {
        let role = if user.is_manager { "manager" } else { "staff" };
        println!("#{:<5} {:<24} {}", user.id, user.username, role);
    }
}

fn print_reports(page: &ReportsPage) {
    println!("{} reports", page.period());
    for report in page.reports() {
        let when = report
            .created_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("#{:<5} {:<10} {:>10.2}", report.id, when, report.total_sales);
    }
    println!("Total: {:.2}", page.total_sales());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("5:2"), Ok((5, 2)));
        assert_eq!(parse_line(" 7 : 0 "), Ok((7, 0)));
        assert!(parse_line("5").is_err());
        assert!(parse_line("x:1").is_err());
    }

    #[test]
    fn test_cli_parses_order_lines() {
        let cli = Cli::try_parse_from([
            "shopdesk", "orders", "create", "--item", "5:2", "--item", "7:1",
        ])
        .unwrap();
        match cli.command {
            Commands::Orders {
                action: OrdersAction::Create { items, status },
            } => {
                assert_eq!(items, vec![(5, 2), (7, 1)]);
                assert_eq!(status, OrderStatus::Pending);
            }
            _ => panic!("wrong command"),
        }
    }
}
