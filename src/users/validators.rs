use super::models::NewUser;
use crate::common::validation::require_non_blank;
use crate::common::{ValidationResult, Validator};

pub struct NewUserValidator;

impl Validator<NewUser> for NewUserValidator {
    fn validate(&self, data: &NewUser) -> ValidationResult {
        let mut result = ValidationResult::new();
        require_non_blank(&mut result, "username", &data.username);
        if data.password.is_empty() {
            result.add_error("password", "must not be empty");
        }
        result
    }
}
