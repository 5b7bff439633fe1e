//! Organization endpoints.
//!
//! `org` arguments accept a numeric id, a site domain or `current`.

use super::models::{EntityAccess, Org, OrgUsage, User, Workspace};
use crate::client::GristClient;
use crate::context::RequestContext;
use crate::error::GristResult;
use crate::response::ApiResponse;
use crate::transport::{HttpMethod, Transport};
use serde::Serialize;

#[derive(Serialize)]
struct NewOrg<'a> {
    name: &'a str,
    domain: &'a str,
}

impl<T: Transport> GristClient<T> {
    /// List the organizations the caller can see.
    pub async fn list_orgs(&self, ctx: &RequestContext) -> GristResult<ApiResponse<Vec<Org>>> {
        self.get_json(ctx, "orgs").await
    }

    pub async fn get_org(&self, ctx: &RequestContext, org: &str) -> GristResult<ApiResponse<Org>> {
        self.get_json(ctx, &format!("orgs/{}", org)).await
    }

    /// Users with access to an organization.
    pub async fn get_org_access(
        &self,
        ctx: &RequestContext,
        org: &str,
    ) -> GristResult<ApiResponse<Vec<User>>> {
        let response: ApiResponse<EntityAccess> =
            self.get_json(ctx, &format!("orgs/{}/access", org)).await?;
        Ok(response.map(|access| access.users))
    }

    pub async fn get_org_workspaces(
        &self,
        ctx: &RequestContext,
        org: &str,
    ) -> GristResult<ApiResponse<Vec<Workspace>>> {
        self.get_json(ctx, &format!("orgs/{}/workspaces", org)).await
    }

    pub async fn get_org_usage(
        &self,
        ctx: &RequestContext,
        org: &str,
    ) -> GristResult<ApiResponse<OrgUsage>> {
        self.get_json(ctx, &format!("orgs/{}/usage", org)).await
    }

    /// Create an organization and return its id (0 unless the status is 200).
    pub async fn create_org(
        &self,
        ctx: &RequestContext,
        name: &str,
        domain: &str,
    ) -> GristResult<ApiResponse<i64>> {
        self.exchange_json(ctx, HttpMethod::Post, "orgs", &NewOrg { name, domain })
            .await
    }

    /// Delete an organization. Grist requires the name as confirmation.
    pub async fn delete_org(
        &self,
        ctx: &RequestContext,
        org_id: i64,
        org_name: &str,
    ) -> GristResult<ApiResponse<String>> {
        let path = format!("orgs/{}/{}", org_id, org_name);
        self.send_empty(ctx, HttpMethod::Delete, &path).await
    }
}
