//! Actions
//!
//! Project-wide view of asynchronous operations.

use crate::http::HttpDispatcher;
use crate::query::append_query;
use crate::result::ApiResult;
use crate::types::{ActionResponse, ActionsResponse, ListActionsParams};
use anyhow::Result;

#[derive(Debug, Clone)]
pub struct Actions {
    http: HttpDispatcher,
}

impl Actions {
    pub(crate) fn new(http: HttpDispatcher) -> Self {
        Self { http }
    }

    /// List actions, usually filtered by `id`
    pub async fn list(
        &self,
        params: Option<&ListActionsParams>,
    ) -> Result<ApiResult<ActionsResponse>> {
        let path = append_query("/actions", params)?;
        self.http.get(&path).await
    }

    pub async fn get(&self, id: u64) -> Result<ApiResult<ActionResponse>> {
        self.http.get(&format!("/actions/{}", id)).await
    }
}
