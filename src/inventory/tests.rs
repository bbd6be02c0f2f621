#[cfg(test)]
mod tests {
    use crate::common::Validator;
    use crate::inventory::models::*;
    use crate::inventory::validators::ProductValidator;

    fn input(name: &str, price: f64, stock: i64) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            price,
            stock,
        }
    }

    #[test]
    fn test_validate_product_input() {
        // Valid product
        assert!(ProductValidator.validate(&input("Latte", 4.5, 10)).is_valid());
        assert!(ProductValidator.validate(&input("Water", 0.0, 0)).is_valid());

        // Empty name
        let result = ProductValidator.validate(&input("   ", 4.5, 10));
        assert!(!result.is_valid());
        assert_eq!(result.errors[0].field, "name");

        // Negative price and stock
        let result = ProductValidator.validate(&input("Mocha", -1.0, -3));
        let fields: Vec<&str> = result.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["price", "stock"]);

        // Not a number
        assert!(!ProductValidator.validate(&input("Mocha", f64::NAN, 1)).is_valid());
    }

    #[test]
    fn test_product_deserialization() {
        let products: Vec<Product> =
            serde_json::from_str(r#"[{"id":5,"name":"Espresso","price":2.5,"stock":40}]"#).unwrap();
        assert_eq!(products[0].id, 5);
        assert_eq!(products[0].input(), input("Espresso", 2.5, 40));
    }

    #[test]
    fn test_product_rejects_untyped_fields() {
        let result = serde_json::from_str::<Product>(r#"{"id":"five","name":"x","price":1,"stock":1}"#);
        assert!(result.is_err());
    }
}
