//! Corporate accounts.

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, instrument};

use backoffice_core::models::{Corporate, CorporateUpdate, NewCorporate};
use backoffice_core::{
    ApiRequest, ListQuery, MutationIntent, Page, PageSource, RecordStatus, Result, StatusUpdater,
    validation,
};

use super::ServiceContext;
use crate::endpoints::{CORPORATES, CORPORATES_FIELD};
use crate::fallback;

#[derive(Debug, Clone)]
pub struct CorporateService {
    ctx: ServiceContext,
}

impl CorporateService {
    pub(crate) fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self), fields(page = query.page(), search = query.search_term()))]
    pub async fn list_corporates(&self, query: &ListQuery) -> Result<Page<Corporate>> {
        let result = self.ctx.fetch_page(CORPORATES, CORPORATES_FIELD, query).await;
        self.ctx
            .fallback()
            .recover_read("list_corporates", result, fallback::corporates)
    }

    /// Onboard a corporate together with its contact person and EWA settings.
    #[instrument(skip(self, form), fields(name = %form.corporation_name))]
    pub async fn create_corporate(&self, form: &NewCorporate) -> Result<Corporate> {
        validation::check(form)?;
        let request = ApiRequest::post(CORPORATES).with_json(form)?;
        let result = self.ctx.fetch(request).await;
        self.ctx.fallback().recover_write("create_corporate", result, || {
            fallback::created_corporate(self.ctx.next_synthetic_id(), form)
        })
    }

    #[instrument(skip(self, update), fields(no = update.no))]
    pub async fn update_corporate(&self, update: &CorporateUpdate) -> Result<Corporate> {
        validation::check(update)?;
        let request = ApiRequest::put(CORPORATES).with_json(update)?;
        let result = self.ctx.fetch(request).await;
        self.ctx
            .fallback()
            .recover_write("update_corporate", result, || fallback::updated_corporate(update))
    }

    /// Change a corporate's status. Never falls back.
    ///
    /// Returns the server's copy of the record when it sends one.
    #[instrument(skip(self))]
    pub async fn set_corporate_status(
        &self,
        no: u64,
        status: RecordStatus,
    ) -> Result<Option<Corporate>> {
        debug!(status = status.code(), "Updating corporate status");
        let request =
            ApiRequest::put(CORPORATES).with_json(&json!({ "no": no, "status": status }))?;
        self.ctx.fetch_optional(request).await
    }
}

#[async_trait]
impl PageSource<Corporate> for CorporateService {
    async fn fetch(&self, query: &ListQuery) -> Result<Page<Corporate>> {
        self.list_corporates(query).await
    }
}

#[async_trait]
impl StatusUpdater<Corporate> for CorporateService {
    async fn push(&self, intent: &MutationIntent<u64, RecordStatus>) -> Result<Option<Corporate>> {
        self.set_corporate_status(intent.target_id, intent.new_value)
            .await
    }
}
