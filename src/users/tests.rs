#[cfg(test)]
mod tests {
    use crate::common::Validator;
    use crate::users::models::*;
    use crate::users::validators::NewUserValidator;

    #[test]
    fn test_validate_new_user() {
        let valid = NewUser {
            username: "sam".to_string(),
            password: "hunter2".to_string(),
            is_manager: false,
        };
        assert!(NewUserValidator.validate(&valid).is_valid());

        let blank = NewUser::default();
        let result = NewUserValidator.validate(&blank);
        let fields: Vec<&str> = result.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["username", "password"]);
    }

    #[test]
    fn test_password_never_debug_printed() {
        let user = NewUser {
            username: "sam".to_string(),
            password: "hunter2".to_string(),
            is_manager: true,
        };
        let printed = format!("{:?}", user);
        assert!(printed.contains("sam"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn test_user_missing_manager_flag_defaults_false() {
        let user: User =
            serde_json::from_str(r#"{"id":3,"username":"kim","is_manager":null}"#).unwrap();
        assert!(!user.is_manager);

        let user: User = serde_json::from_str(r#"{"id":4,"username":"lee"}"#).unwrap();
        assert!(!user.is_manager);
    }
}
