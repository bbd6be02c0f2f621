use super::models::ProductInput;
use crate::common::validation::require_non_blank;
use crate::common::{ValidationResult, Validator};

pub struct ProductValidator;

impl Validator<ProductInput> for ProductValidator {
    fn validate(&self, data: &ProductInput) -> ValidationResult {
        let mut result = ValidationResult::new();

        require_non_blank(&mut result, "name", &data.name);

        if !data.price.is_finite() {
            result.add_error("price", "must be a number");
        } else if data.price < 0.0 {
            result.add_error("price", "must not be negative");
        }

        if data.stock < 0 {
            result.add_error("stock", "must not be negative");
        }

        result
    }
}
