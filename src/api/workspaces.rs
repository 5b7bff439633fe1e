//! Workspace endpoints.

use super::models::{AccessDelta, EntityAccess, Workspace};
use crate::client::GristClient;
use crate::context::RequestContext;
use crate::error::GristResult;
use crate::response::ApiResponse;
use crate::transport::{HttpMethod, Transport};
use log::debug;
use serde::Serialize;

#[derive(Serialize)]
struct NewWorkspace<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct AccessPatch<'a> {
    delta: UsersDelta<'a>,
}

#[derive(Serialize)]
struct UsersDelta<'a> {
    users: &'a AccessDelta,
}

impl<T: Transport> GristClient<T> {
    pub async fn get_workspace(
        &self,
        ctx: &RequestContext,
        workspace_id: i64,
    ) -> GristResult<ApiResponse<Workspace>> {
        self.get_json(ctx, &format!("workspaces/{}", workspace_id))
            .await
    }

    pub async fn get_workspace_access(
        &self,
        ctx: &RequestContext,
        workspace_id: i64,
    ) -> GristResult<ApiResponse<EntityAccess>> {
        self.get_json(ctx, &format!("workspaces/{}/access", workspace_id))
            .await
    }

    /// Create a workspace in an organization and return its id.
    pub async fn create_workspace(
        &self,
        ctx: &RequestContext,
        org_id: i64,
        name: &str,
    ) -> GristResult<ApiResponse<i64>> {
        let path = format!("orgs/{}/workspaces", org_id);
        self.exchange_json(ctx, HttpMethod::Post, &path, &NewWorkspace { name })
            .await
    }

    pub async fn delete_workspace(
        &self,
        ctx: &RequestContext,
        workspace_id: i64,
    ) -> GristResult<ApiResponse<String>> {
        self.send_empty(ctx, HttpMethod::Delete, &format!("workspaces/{}", workspace_id))
            .await
    }

    /// Grant, change or revoke roles on a workspace.
    ///
    /// Each entry maps an email to a role name, or to `None` to remove the
    /// user. Unknown emails are invited by the server.
    pub async fn update_workspace_access(
        &self,
        ctx: &RequestContext,
        workspace_id: i64,
        users: &AccessDelta,
    ) -> GristResult<ApiResponse<String>> {
        debug!(
            "Updating {} access entries on workspace {} (request: '{}')",
            users.len(),
            workspace_id,
            ctx.request_id
        );
        let path = format!("workspaces/{}/access", workspace_id);
        let patch = AccessPatch {
            delta: UsersDelta { users },
        };
        self.send_json(ctx, HttpMethod::Patch, &path, &patch).await
    }
}
