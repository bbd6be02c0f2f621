use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::helpers::bool_or_false;

pub type UserId = i64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default, deserialize_with = "bool_or_false")]
    pub is_manager: bool,
}

/// Body of `POST /users`. The password is write-only.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub is_manager: bool,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("password", &"***")
            .field("is_manager", &self.is_manager)
            .finish()
    }
}
