//! Resource Action Namespaces
//!
//! Most resource groups expose an `actions` namespace with the same four
//! read operations plus resource-specific commands. [`ResourceActions`] is
//! generic over an [`ActionScope`] marker that names the collection path, so
//! each resource module can add its own commands in an `impl` block for its
//! scope only.

use crate::http::HttpDispatcher;
use crate::query::append_query;
use crate::result::ApiResult;
use crate::types::{ActionResponse, ActionsResponse, ListActionsParams};
use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;

/// Names the collection an action namespace belongs to
pub trait ActionScope {
    /// Collection path, e.g. `/networks`
    const PATH: &'static str;
}

/// `actions` namespace of one resource group
pub struct ResourceActions<S> {
    http: HttpDispatcher,
    _scope: PhantomData<fn() -> S>,
}

impl<S> Clone for ResourceActions<S> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            _scope: PhantomData,
        }
    }
}

impl<S: ActionScope> fmt::Debug for ResourceActions<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceActions")
            .field("path", &S::PATH)
            .finish()
    }
}

impl<S: ActionScope> ResourceActions<S> {
    pub(crate) fn new(http: HttpDispatcher) -> Self {
        Self {
            http,
            _scope: PhantomData,
        }
    }

    pub fn http(&self) -> &HttpDispatcher {
        &self.http
    }

    /// List actions across every resource of this kind
    pub async fn list(
        &self,
        params: Option<&ListActionsParams>,
    ) -> Result<ApiResult<ActionsResponse>> {
        let path = append_query(&format!("{}/actions", S::PATH), params)?;
        self.http.get(&path).await
    }

    /// Get one action by ID
    pub async fn get(&self, action_id: u64) -> Result<ApiResult<ActionResponse>> {
        self.http
            .get(&format!("{}/actions/{}", S::PATH, action_id))
            .await
    }

    /// List actions for a single resource
    pub async fn list_for(
        &self,
        resource_id: u64,
        params: Option<&ListActionsParams>,
    ) -> Result<ApiResult<ActionsResponse>> {
        let path = append_query(&format!("{}/{}/actions", S::PATH, resource_id), params)?;
        self.http.get(&path).await
    }

    /// Get one action of a single resource
    pub async fn get_for(
        &self,
        resource_id: u64,
        action_id: u64,
    ) -> Result<ApiResult<ActionResponse>> {
        self.http
            .get(&format!("{}/{}/actions/{}", S::PATH, resource_id, action_id))
            .await
    }

    /// POST `/{collection}/{id}/actions/{command}` with a JSON body
    pub(crate) async fn command<T, B>(
        &self,
        resource_id: u64,
        command: &str,
        body: &B,
    ) -> Result<ApiResult<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        tracing::info!("{} {} on {}", S::PATH, command, resource_id);
        self.http
            .post(&Self::command_path(resource_id, command), body)
            .await
    }

    /// POST `/{collection}/{id}/actions/{command}` without a body
    pub(crate) async fn command_empty<T>(
        &self,
        resource_id: u64,
        command: &str,
    ) -> Result<ApiResult<T>>
    where
        T: DeserializeOwned,
    {
        tracing::info!("{} {} on {}", S::PATH, command, resource_id);
        self.http
            .post_empty(&Self::command_path(resource_id, command))
            .await
    }

    fn command_path(resource_id: u64, command: &str) -> String {
        format!("{}/{}/actions/{}", S::PATH, resource_id, command)
    }
}
