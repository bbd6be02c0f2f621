use async_trait::async_trait;
use tracing::{info, warn};

use super::models::{NewUser, User, UserId};
use super::service;
use super::validators::NewUserValidator;
use crate::auth::Route;
use crate::common::{AppContext, ClientError, Notification, Validator};
use crate::pages::PageView;

/// User management view (manager only on the server side)
pub struct UsersPage {
    ctx: AppContext,
    users: Vec<User>,
    form: NewUser,
}

impl UsersPage {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            ctx: ctx.clone(),
            users: Vec::new(),
            form: NewUser::default(),
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn form(&self) -> &NewUser {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut NewUser {
        &mut self.form
    }

    /// Submit the form; it is cleared once the user exists
    pub async fn create(&mut self) -> Result<User, ClientError> {
        if let Err(e) = NewUserValidator.validate(&self.form).into_result() {
            self.ctx.surface(&e, "Failed to create");
            return Err(e);
        }

        match service::create_user(&self.ctx.api, &self.form).await {
            Ok(user) => {
                info!(user_id = user.id, is_manager = user.is_manager, "User created");
                self.ctx
                    .notifier
                    .notify(Notification::success("User created", user.username.clone()));
                self.form = NewUser::default();
                self.refresh().await;
                Ok(user)
            }
            Err(e) => {
                self.ctx.surface(&e, "Failed to create");
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, id: UserId) -> Result<(), ClientError> {
        match service::delete_user(&self.ctx.api, id).await {
            Ok(()) => {
                info!(user_id = id, "User deleted");
                self.ctx.notifier.notify(Notification::info("User deleted"));
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                self.ctx.surface(&e, "Failed to delete");
                Err(e)
            }
        }
    }

    async fn refresh(&mut self) {
        if let Err(e) = self.load().await {
            warn!(error = %e, "Users refresh failed");
        }
    }
}

#[async_trait]
impl PageView for UsersPage {
    fn route(&self) -> Route {
        Route::Users
    }

    async fn load(&mut self) -> Result<(), ClientError> {
        match service::list_users(&self.ctx.api).await {
            Ok(users) => {
                self.users = users;
                Ok(())
            }
            Err(e) => {
                self.ctx.surface(&e, "Manager only");
                Err(e)
            }
        }
    }
}
