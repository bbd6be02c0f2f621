//! Client routes and navigation

use std::fmt;

use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Orders,
    Inventory,
    Reports,
    Users,
}

/// Navbar entries, in display order. Login is not part of the navbar.
pub const NAV_ITEMS: [Route; 5] = [
    Route::Dashboard,
    Route::Orders,
    Route::Inventory,
    Route::Reports,
    Route::Users,
];

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::Orders => "/orders",
            Route::Inventory => "/inventory",
            Route::Reports => "/reports",
            Route::Users => "/users",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Dashboard => "Dashboard",
            Route::Orders => "Orders",
            Route::Inventory => "Inventory",
            Route::Reports => "Reports",
            Route::Users => "Users",
        }
    }

    /// The navbar is hidden on the login view
    pub fn shows_nav(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Current route of the client
#[derive(Clone)]
pub struct Navigator {
    current: watch::Sender<Route>,
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        let (current, _) = watch::channel(initial);
        Self { current }
    }

    pub fn push(&self, route: Route) {
        let previous = self.current.send_replace(route);
        if previous != route {
            debug!(from = %previous, to = %route, "Navigated");
        }
    }

    pub fn current(&self) -> Route {
        *self.current.borrow()
    }
}
