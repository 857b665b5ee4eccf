//! Corporate employees and the employee request queue.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Value, json};
use tracing::{debug, info, instrument};

use backoffice_core::models::{
    CorpEmployee, CorpEmployeeUpdate, Employee, EmployeeRequest, EmployeeStats,
    EmployeeTransaction, NewCorpEmployee, RequestStatusUpdate,
};
use backoffice_core::{
    ApiRequest, ListQuery, MutationIntent, Page, PageSource, RecordStatus, Result, StatusUpdater,
    validation,
};

use super::ServiceContext;
use crate::endpoints::{
    CORP_EMPLOYEES, CORP_EMPLOYEES_FIELD, EMPLOYEE_REQUESTS, EMPLOYEE_REQUESTS_FIELD,
    EMPLOYEE_STATS, EMPLOYEE_TRANSACTIONS_FIELD, EMPLOYEES, EMPLOYEES_FIELD, employee,
    employee_request, employee_request_status, employee_toggle_status, employee_transactions,
    employee_verify,
};
use crate::fallback;

#[derive(Debug, Clone)]
pub struct EmployeeService {
    ctx: ServiceContext,
}

impl EmployeeService {
    pub(crate) fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// One page of the corporate's enrolled employees.
    #[instrument(skip(self), fields(page = query.page(), search = query.search_term()))]
    pub async fn list_corp_employees(&self, query: &ListQuery) -> Result<Page<CorpEmployee>> {
        let result = self
            .ctx
            .fetch_page(CORP_EMPLOYEES, CORP_EMPLOYEES_FIELD, query)
            .await;
        self.ctx
            .fallback()
            .recover_read("list_corp_employees", result, fallback::corp_employees)
    }

    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn create_corp_employee(&self, form: &NewCorpEmployee) -> Result<CorpEmployee> {
        validation::check(form)?;
        let request = ApiRequest::post(CORP_EMPLOYEES).with_json(form)?;
        let result = self.ctx.fetch(request).await;
        self.ctx.fallback().recover_write("create_corp_employee", result, || {
            fallback::created_corp_employee(self.ctx.next_synthetic_id(), form)
        })
    }

    #[instrument(skip(self, update), fields(no = update.no))]
    pub async fn update_corp_employee(&self, update: &CorpEmployeeUpdate) -> Result<CorpEmployee> {
        validation::check(update)?;
        let request = ApiRequest::put(CORP_EMPLOYEES).with_json(update)?;
        let result = self.ctx.fetch(request).await;
        self.ctx.fallback().recover_write("update_corp_employee", result, || {
            fallback::updated_corp_employee(update)
        })
    }

    /// Change an employee's status. Never falls back.
    #[instrument(skip(self))]
    pub async fn set_corp_employee_status(
        &self,
        no: u64,
        status: RecordStatus,
    ) -> Result<Option<CorpEmployee>> {
        debug!(status = status.code(), "Updating employee status");
        let request =
            ApiRequest::put(CORP_EMPLOYEES).with_json(&json!({ "no": no, "status": status }))?;
        self.ctx.fetch_optional(request).await
    }

    /// One page of the request queue.
    #[instrument(skip(self), fields(page = query.page(), search = query.search_term()))]
    pub async fn list_employee_requests(
        &self,
        query: &ListQuery,
    ) -> Result<Page<EmployeeRequest>> {
        let result = self
            .ctx
            .fetch_page(EMPLOYEE_REQUESTS, EMPLOYEE_REQUESTS_FIELD, query)
            .await;
        self.ctx
            .fallback()
            .recover_read("list_employee_requests", result, fallback::employee_requests)
    }

    /// A single request. The synthetic fallback only knows its own requests.
    #[instrument(skip(self))]
    pub async fn get_employee_request(&self, request_id: &str) -> Result<EmployeeRequest> {
        validation::require("request id", request_id)?;
        let result = self
            .ctx
            .fetch(ApiRequest::get(employee_request(request_id)))
            .await;
        self.ctx
            .fallback()
            .recover_read_with("get_employee_request", result, || {
                fallback::employee_requests()
                    .items
                    .into_iter()
                    .find(|r| r.request_id == request_id)
            })
    }

    /// Record a decision on a request, stamped with the current time.
    ///
    /// Never falls back: the caller needs to know whether the decision was
    /// actually recorded.
    #[instrument(skip(self, update), fields(status = %update.process_status))]
    pub async fn update_request_status(
        &self,
        request_id: &str,
        update: &RequestStatusUpdate,
    ) -> Result<EmployeeRequest> {
        validation::require("request id", request_id)?;
        validation::require("processed by", &update.processed_by)?;
        info!(request_id, "Processing employee request");

        let mut body = serde_json::to_value(update)?;
        if let Value::Object(map) = &mut body {
            map.insert("processedDate".to_string(), json!(Utc::now()));
        }
        let request = ApiRequest::patch(employee_request_status(request_id)).with_json(&body)?;
        self.ctx.fetch(request).await
    }

    pub async fn approve_request(
        &self,
        request_id: &str,
        processed_by: &str,
        remark: Option<String>,
    ) -> Result<EmployeeRequest> {
        let update = RequestStatusUpdate::approve(processed_by, remark);
        self.update_request_status(request_id, &update).await
    }

    pub async fn reject_request(
        &self,
        request_id: &str,
        processed_by: &str,
        remark: Option<String>,
    ) -> Result<EmployeeRequest> {
        let update = RequestStatusUpdate::reject(processed_by, remark);
        self.update_request_status(request_id, &update).await
    }

    // ========================================================================
    // Employee directory
    // ========================================================================

    #[instrument(skip(self), fields(page = query.page(), search = query.search_term()))]
    pub async fn list_employees(&self, query: &ListQuery) -> Result<Page<Employee>> {
        let result = self.ctx.fetch_page(EMPLOYEES, EMPLOYEES_FIELD, query).await;
        self.ctx
            .fallback()
            .recover_read("list_employees", result, fallback::employees)
    }

    #[instrument(skip(self))]
    pub async fn get_employee(&self, id: &str) -> Result<Employee> {
        validation::require("employee id", id)?;
        let result = self.ctx.fetch(ApiRequest::get(employee(id))).await;
        self.ctx.fallback().recover_read_with("get_employee", result, || {
            fallback::employees().items.into_iter().find(|e| e.id == id)
        })
    }

    /// Head counts for the dashboard.
    #[instrument(skip(self))]
    pub async fn get_employee_stats(&self) -> Result<EmployeeStats> {
        let result = self.ctx.fetch(ApiRequest::get(EMPLOYEE_STATS)).await;
        self.ctx
            .fallback()
            .recover_read("get_employee_stats", result, fallback::employee_stats)
    }

    /// An employee's transaction history as a [`PageSource`].
    pub fn transactions(&self, employee_id: impl Into<String>) -> EmployeeTransactions {
        EmployeeTransactions {
            service: self.clone(),
            employee_id: employee_id.into(),
        }
    }

    /// One page of an employee's account movements.
    #[instrument(skip(self), fields(page = query.page()))]
    pub async fn list_employee_transactions(
        &self,
        id: &str,
        query: &ListQuery,
    ) -> Result<Page<EmployeeTransaction>> {
        validation::require("employee id", id)?;
        let result = self
            .ctx
            .fetch_page(&employee_transactions(id), EMPLOYEE_TRANSACTIONS_FIELD, query)
            .await;
        self.ctx
            .fallback()
            .recover_read("list_employee_transactions", result, || {
                fallback::employee_transactions(id)
            })
    }

    /// Mark an employee as verified. Never falls back.
    #[instrument(skip(self))]
    pub async fn verify_employee(&self, id: &str) -> Result<Employee> {
        validation::require("employee id", id)?;
        info!("Verifying employee");
        self.ctx.fetch(ApiRequest::patch(employee_verify(id))).await
    }

    /// Flip an employee's active flag server-side. Never falls back.
    #[instrument(skip(self))]
    pub async fn toggle_employee_status(&self, id: &str) -> Result<Employee> {
        validation::require("employee id", id)?;
        self.ctx
            .fetch(ApiRequest::patch(employee_toggle_status(id)))
            .await
    }

    /// Remove an employee. Never falls back.
    #[instrument(skip(self))]
    pub async fn delete_employee(&self, id: &str) -> Result<()> {
        validation::require("employee id", id)?;
        info!("Deleting employee");
        self.ctx.send(ApiRequest::delete(employee(id))).await.map(drop)
    }
}

#[async_trait]
impl PageSource<CorpEmployee> for EmployeeService {
    async fn fetch(&self, query: &ListQuery) -> Result<Page<CorpEmployee>> {
        self.list_corp_employees(query).await
    }
}

/// The transaction history of one employee.
#[derive(Debug, Clone)]
pub struct EmployeeTransactions {
    service: EmployeeService,
    employee_id: String,
}

#[async_trait]
impl PageSource<EmployeeTransaction> for EmployeeTransactions {
    async fn fetch(&self, query: &ListQuery) -> Result<Page<EmployeeTransaction>> {
        self.service
            .list_employee_transactions(&self.employee_id, query)
            .await
    }
}

#[async_trait]
impl PageSource<Employee> for EmployeeService {
    async fn fetch(&self, query: &ListQuery) -> Result<Page<Employee>> {
        self.list_employees(query).await
    }
}

#[async_trait]
impl PageSource<EmployeeRequest> for EmployeeService {
    async fn fetch(&self, query: &ListQuery) -> Result<Page<EmployeeRequest>> {
        self.list_employee_requests(query).await
    }
}

#[async_trait]
impl StatusUpdater<CorpEmployee> for EmployeeService {
    async fn push(
        &self,
        intent: &MutationIntent<u64, RecordStatus>,
    ) -> Result<Option<CorpEmployee>> {
        self.set_corp_employee_status(intent.target_id, intent.new_value)
            .await
    }
}
