#[cfg(test)]
mod tests {
    use crate::common::ClientError;
    use crate::orders::draft::OrderDraft;
    use crate::orders::models::*;
    use serde_json::json;

    fn order_with_status(status: &str) -> Order {
        serde_json::from_value(json!({
            "id": 1,
            "user_id": 2,
            "status": status,
            "created_at": "2024-05-01T08:15:00",
            "items": []
        }))
        .unwrap()
    }

    #[test]
    fn test_non_positive_quantity_removes_line() {
        let mut draft = OrderDraft::new();
        draft.set_quantity(5, 2);
        draft.set_quantity(7, 1);
        draft.set_quantity(7, 0);
        draft.set_quantity(9, -4);

        assert_eq!(draft.quantity(5), Some(2));
        assert_eq!(draft.quantity(7), None);
        assert_eq!(draft.quantity(9), None);
        assert!(draft.lines().all(|(_, qty)| qty > 0));
    }

    #[test]
    fn test_request_contains_only_positive_lines() {
        let mut draft = OrderDraft::new();
        draft.set_quantity(5, 2);
        draft.set_quantity(7, 0);

        let request = draft.to_request().unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"status": "pending", "items": [{"product_id": 5, "quantity": 2}]})
        );
    }

    #[test]
    fn test_empty_draft_is_rejected() {
        let draft = OrderDraft::new();
        match draft.to_request() {
            Err(ClientError::ValidationFailed(msg)) => assert!(msg.contains("items")),
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_reset_restores_pending_status() {
        let mut draft = OrderDraft::new();
        draft.set_quantity(1, 3);
        draft.set_status(OrderStatus::InProgress);

        draft.reset();

        assert!(draft.is_empty());
        assert_eq!(draft.status(), OrderStatus::Pending);
    }

    #[test]
    fn test_cancel_offered_only_for_open_orders() {
        assert!(order_with_status("pending").can_cancel());
        assert!(order_with_status("in_progress").can_cancel());
        assert!(!order_with_status("completed").can_cancel());
        assert!(!order_with_status("cancelled").can_cancel());
    }

    #[test]
    fn test_order_deserialization() {
        let order: Order = serde_json::from_value(json!({
            "id": 12,
            "user_id": 1,
            "status": null,
            "created_at": "2024-05-01T08:15:00.250000",
            "items": [{
                "id": 3,
                "product_id": 5,
                "quantity": 2,
                "product": {"id": 5, "name": "Flat White", "price": 3.8, "stock": 18}
            }]
        }))
        .unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items[0].product.as_ref().unwrap().name, "Flat White");

        let odd = order_with_status("on_hold");
        assert_eq!(odd.status, OrderStatus::Unknown);
        assert!(odd.can_cancel());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("in-progress".parse::<OrderStatus>(), Ok(OrderStatus::InProgress));
        assert_eq!("Cancelled".parse::<OrderStatus>(), Ok(OrderStatus::Cancelled));
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_filter_query_serialization() {
        let filter = OrderFilter {
            status: Some(OrderStatus::Completed),
            date: chrono::NaiveDate::from_ymd_opt(2024, 5, 1),
        };
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({"status": "completed", "date_filter": "2024-05-01"})
        );
        assert!(OrderFilter::default().is_empty());
    }
}
