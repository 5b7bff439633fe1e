//! User account endpoints.

use crate::client::GristClient;
use crate::context::RequestContext;
use crate::error::GristResult;
use crate::response::ApiResponse;
use crate::transport::{HttpMethod, Transport};
use serde::Serialize;

#[derive(Serialize)]
struct DeleteConfirmation<'a> {
    name: &'a str,
}

impl<T: Transport> GristClient<T> {
    /// Delete a user account.
    ///
    /// `name` must match the account's name. The server answers 400 on a
    /// mismatch, 403 when the caller may not delete the account and 404 when
    /// the user does not exist.
    pub async fn delete_user(
        &self,
        ctx: &RequestContext,
        user_id: i64,
        name: &str,
    ) -> GristResult<ApiResponse<String>> {
        let path = format!("users/{}", user_id);
        self.send_json(ctx, HttpMethod::Delete, &path, &DeleteConfirmation { name })
            .await
    }
}
