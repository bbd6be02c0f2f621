//! Realtime invalidation events and the resources they invalidate

use std::fmt;

use crate::common::Notification;

/// Server-pushed events. Payloads are ignored; each event only means
/// "the resources it names are stale".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RealtimeEvent {
    StockUpdate,
    NewOrder,
    OrderCancelled,
}

/// Client-side resources a page can hold a copy of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Dashboard,
    Inventory,
    Orders,
}

impl RealtimeEvent {
    pub const ALL: [RealtimeEvent; 3] = [
        RealtimeEvent::StockUpdate,
        RealtimeEvent::NewOrder,
        RealtimeEvent::OrderCancelled,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RealtimeEvent::StockUpdate => "stock_update",
            RealtimeEvent::NewOrder => "new_order",
            RealtimeEvent::OrderCancelled => "order_cancelled",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.name() == name)
    }

    pub fn invalidates(&self) -> &'static [Resource] {
        match self {
            RealtimeEvent::StockUpdate => &[Resource::Inventory],
            RealtimeEvent::NewOrder => &[Resource::Orders, Resource::Dashboard],
            RealtimeEvent::OrderCancelled => &[Resource::Orders, Resource::Dashboard],
        }
    }

    /// Toast shown when a mounted page reloads because of this event
    pub fn notice(&self) -> Notification {
        match self {
            RealtimeEvent::StockUpdate => Notification::info("Inventory Changed"),
            RealtimeEvent::NewOrder => Notification::info("New Order"),
            RealtimeEvent::OrderCancelled => Notification::info("Order Cancelled"),
        }
    }
}

impl fmt::Display for RealtimeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Resource {
    /// Events a page holding this resource must subscribe to
    pub fn invalidated_by(&self) -> Vec<RealtimeEvent> {
        RealtimeEvent::ALL
            .into_iter()
            .filter(|e| e.invalidates().contains(self))
            .collect()
    }
}
