// src/common/id_generator.rs
//! Short prefixed ids for correlating log lines
//! Format: PREFIX_XXXXXXXX (e.g., N_3F2A9C1D for a realtime connection)

use uuid::Uuid;

#[derive(Debug, Clone, Copy)]
pub enum IdPrefix {
    /// Realtime connection (N_)
    Connection,
    /// Mounted page view (P_)
    Page,
}

impl IdPrefix {
    fn as_str(&self) -> &'static str {
        match self {
            IdPrefix::Connection => "N",
            IdPrefix::Page => "P",
        }
    }
}

pub fn generate_id(prefix: IdPrefix) -> String {
    let raw = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("{}_{}", prefix.as_str(), &raw[..8])
}

/// Generate a realtime connection ID (N_XXXXXXXX)
pub fn generate_connection_id() -> String {
    generate_id(IdPrefix::Connection)
}

/// Generate a page mount ID (P_XXXXXXXX)
pub fn generate_page_id() -> String {
    generate_id(IdPrefix::Page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_format() {
        let id = generate_connection_id();
        assert!(id.starts_with("N_"));
        assert_eq!(id.len(), 10);

        assert!(generate_page_id().starts_with("P_"));
        assert_ne!(generate_page_id(), generate_page_id());
    }
}
