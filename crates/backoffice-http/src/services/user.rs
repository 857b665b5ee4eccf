//! Back-office users, corporate users and their roles.

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, info, instrument};

use backoffice_core::models::{
    CorpUser, CorpUserRole, CorpUserRoleUpdate, CorpUserUpdate, NewCorpUser, NewCorpUserRole,
    NewUser, RoleOption, User, UserUpdate,
};
use backoffice_core::{
    ApiRequest, ListQuery, MutationIntent, Page, PageSource, RecordStatus, Result, StatusUpdater,
    validation,
};

use super::ServiceContext;
use crate::endpoints::{
    CORP_USER_ROLES, CORP_USER_ROLES_DROPDOWN, CORP_USER_ROLES_FIELD, CORP_USERS,
    CORP_USERS_FIELD, USERS, USERS_FIELD, user, user_reset_password, user_toggle_status,
};
use crate::fallback;

#[derive(Debug, Clone)]
pub struct UserService {
    ctx: ServiceContext,
}

impl UserService {
    pub(crate) fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    // ========================================================================
    // Back-office users
    // ========================================================================

    #[instrument(skip(self), fields(page = query.page(), search = query.search_term()))]
    pub async fn list_users(&self, query: &ListQuery) -> Result<Page<User>> {
        let result = self.ctx.fetch_page(USERS, USERS_FIELD, query).await;
        self.ctx
            .fallback()
            .recover_read("list_users", result, fallback::users)
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: &str) -> Result<User> {
        validation::require("user id", id)?;
        let result = self.ctx.fetch(ApiRequest::get(user(id))).await;
        self.ctx.fallback().recover_read_with("get_user", result, || {
            fallback::users().items.into_iter().find(|u| u.id == id)
        })
    }

    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn create_user(&self, form: &NewUser) -> Result<User> {
        validation::check(form)?;
        let request = ApiRequest::post(USERS).with_json(form)?;
        let result = self.ctx.fetch(request).await;
        self.ctx.fallback().recover_write("create_user", result, || {
            fallback::created_user(self.ctx.next_synthetic_id(), form)
        })
    }

    #[instrument(skip(self, update))]
    pub async fn update_user(&self, id: &str, update: &UserUpdate) -> Result<User> {
        validation::require("user id", id)?;
        validation::check(update)?;
        let request = ApiRequest::put(user(id)).with_json(update)?;
        let result = self.ctx.fetch(request).await;
        self.ctx
            .fallback()
            .recover_write("update_user", result, || fallback::updated_user(id, update))
    }

    /// Never falls back.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &str) -> Result<()> {
        validation::require("user id", id)?;
        info!("Deleting user");
        self.ctx.send(ApiRequest::delete(user(id))).await.map(drop)
    }

    /// Flip a user's active flag server-side. Never falls back.
    #[instrument(skip(self))]
    pub async fn toggle_user_status(&self, id: &str) -> Result<User> {
        validation::require("user id", id)?;
        self.ctx
            .fetch(ApiRequest::patch(user_toggle_status(id)))
            .await
    }

    /// Never falls back.
    #[instrument(skip(self))]
    pub async fn reset_user_password(&self, id: &str) -> Result<()> {
        validation::require("user id", id)?;
        self.ctx
            .send(ApiRequest::post(user_reset_password(id)))
            .await
            .map(drop)
    }

    // ========================================================================
    // Corporate users
    // ========================================================================

    #[instrument(skip(self), fields(page = query.page(), search = query.search_term()))]
    pub async fn list_corp_users(&self, query: &ListQuery) -> Result<Page<CorpUser>> {
        let result = self
            .ctx
            .fetch_page(CORP_USERS, CORP_USERS_FIELD, query)
            .await;
        self.ctx
            .fallback()
            .recover_read("list_corp_users", result, fallback::corp_users)
    }

    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn create_corp_user(&self, form: &NewCorpUser) -> Result<CorpUser> {
        validation::check(form)?;
        let request = ApiRequest::post(CORP_USERS).with_json(form)?;
        let result = self.ctx.fetch(request).await;
        self.ctx.fallback().recover_write("create_corp_user", result, || {
            fallback::created_corp_user(self.ctx.next_synthetic_id(), form)
        })
    }

    #[instrument(skip(self, update), fields(no = update.no))]
    pub async fn update_corp_user(&self, update: &CorpUserUpdate) -> Result<CorpUser> {
        validation::check(update)?;
        let request = ApiRequest::put(CORP_USERS).with_json(update)?;
        let result = self.ctx.fetch(request).await;
        self.ctx
            .fallback()
            .recover_write("update_corp_user", result, || fallback::updated_corp_user(update))
    }

    /// Never falls back.
    #[instrument(skip(self))]
    pub async fn set_corp_user_status(
        &self,
        no: u64,
        status: RecordStatus,
    ) -> Result<Option<CorpUser>> {
        debug!(status = status.code(), "Updating corporate user status");
        let request =
            ApiRequest::put(CORP_USERS).with_json(&json!({ "no": no, "status": status }))?;
        self.ctx.fetch_optional(request).await
    }

    // ========================================================================
    // Corporate user roles
    // ========================================================================

    #[instrument(skip(self), fields(page = query.page(), search = query.search_term()))]
    pub async fn list_corp_user_roles(&self, query: &ListQuery) -> Result<Page<CorpUserRole>> {
        let result = self
            .ctx
            .fetch_page(CORP_USER_ROLES, CORP_USER_ROLES_FIELD, query)
            .await;
        self.ctx
            .fallback()
            .recover_read("list_corp_user_roles", result, fallback::corp_user_roles)
    }

    #[instrument(skip(self, form), fields(name = %form.name))]
    pub async fn create_corp_user_role(&self, form: &NewCorpUserRole) -> Result<CorpUserRole> {
        validation::check(form)?;
        let request = ApiRequest::post(CORP_USER_ROLES).with_json(form)?;
        let result = self.ctx.fetch(request).await;
        self.ctx.fallback().recover_write("create_corp_user_role", result, || {
            fallback::created_corp_user_role(self.ctx.next_synthetic_id(), form)
        })
    }

    #[instrument(skip(self, update), fields(no = update.no))]
    pub async fn update_corp_user_role(
        &self,
        update: &CorpUserRoleUpdate,
    ) -> Result<CorpUserRole> {
        if let Some(name) = &update.name {
            validation::require("role name", name)?;
        }
        let request = ApiRequest::put(CORP_USER_ROLES).with_json(update)?;
        let result = self.ctx.fetch(request).await;
        self.ctx.fallback().recover_write("update_corp_user_role", result, || {
            fallback::updated_corp_user_role(update)
        })
    }

    /// Never falls back.
    #[instrument(skip(self))]
    pub async fn set_corp_user_role_status(
        &self,
        no: u64,
        status: RecordStatus,
    ) -> Result<Option<CorpUserRole>> {
        debug!(status = status.code(), "Updating role status");
        let update = CorpUserRoleUpdate {
            no,
            status: Some(status),
            ..Default::default()
        };
        let request = ApiRequest::put(CORP_USER_ROLES).with_json(&update)?;
        self.ctx.fetch_optional(request).await
    }

    /// Mark a role inactive. Never falls back.
    pub async fn disable_corp_user_role(&self, no: u64) -> Result<Option<CorpUserRole>> {
        self.set_corp_user_role_status(no, RecordStatus::Inactive)
            .await
    }

    /// Every role, as `{ no, name }` pairs for a picker.
    #[instrument(skip(self))]
    pub async fn corp_user_roles_dropdown(&self) -> Result<Vec<RoleOption>> {
        let result = self.fetch_role_options().await;
        self.ctx
            .fallback()
            .recover_read("corp_user_roles_dropdown", result, fallback::role_options)
    }

    async fn fetch_role_options(&self) -> Result<Vec<RoleOption>> {
        let payload = self
            .ctx
            .send(ApiRequest::get(CORP_USER_ROLES_DROPDOWN))
            .await?;
        let options = match payload {
            Value::Object(mut map) => map.remove(CORP_USER_ROLES_FIELD).unwrap_or(Value::Null),
            other => other,
        };
        Ok(serde_json::from_value(options)?)
    }
}

#[async_trait]
impl PageSource<User> for UserService {
    async fn fetch(&self, query: &ListQuery) -> Result<Page<User>> {
        self.list_users(query).await
    }
}

#[async_trait]
impl PageSource<CorpUser> for UserService {
    async fn fetch(&self, query: &ListQuery) -> Result<Page<CorpUser>> {
        self.list_corp_users(query).await
    }
}

#[async_trait]
impl PageSource<CorpUserRole> for UserService {
    async fn fetch(&self, query: &ListQuery) -> Result<Page<CorpUserRole>> {
        self.list_corp_user_roles(query).await
    }
}

#[async_trait]
impl StatusUpdater<CorpUser> for UserService {
    async fn push(&self, intent: &MutationIntent<u64, RecordStatus>) -> Result<Option<CorpUser>> {
        self.set_corp_user_status(intent.target_id, intent.new_value)
            .await
    }
}

#[async_trait]
impl StatusUpdater<CorpUserRole> for UserService {
    async fn push(
        &self,
        intent: &MutationIntent<u64, RecordStatus>,
    ) -> Result<Option<CorpUserRole>> {
        self.set_corp_user_role_status(intent.target_id, intent.new_value)
            .await
    }
}
