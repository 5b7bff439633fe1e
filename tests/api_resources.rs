//! Site, document, webhook and attachment endpoint tests.

mod common;

use common::{MockTransport, client, context};
use gristctl::api::{AccessDelta, AttachmentQueryOptions, WebhookPartialFields};
use gristctl::transport::HttpMethod;
use serde_json::json;

#[tokio::test]
async fn test_connection_check() {
    let client = client(
        MockTransport::new()
            .with_response(200, "[]")
            .with_response(401, r#"{"error":"unauthorized"}"#),
    );

    assert!(client.test_connection(&context()).await.unwrap());
    assert!(!client.test_connection(&context()).await.unwrap());
    assert_eq!(client.transport().last_request().path, "orgs");
}

#[tokio::test]
async fn test_list_orgs() {
    let client = client(MockTransport::new().with_response(
        200,
        r#"[{"id":1,"name":"Personal","domain":null,"createdAt":"2024-05-01T00:00:00Z"},
           {"id":2,"name":"Acme","domain":"acme","createdAt":"2024-05-02T00:00:00Z"}]"#,
    ));

    let response = client.list_orgs(&context()).await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.data.len(), 2);
    assert!(response.data[0].domain.is_none());
    assert_eq!(response.data[1].domain.as_deref(), Some("acme"));
}

#[tokio::test]
async fn test_get_org_failure_yields_default() {
    let client = client(MockTransport::new().with_response(404, r#"{"error":"not found"}"#));

    let response = client.get_org(&context(), "42").await.unwrap();

    assert_eq!(response.status, 404);
    assert_eq!(response.data.id, 0);
    assert_eq!(client.transport().last_request().path, "orgs/42");
}

#[tokio::test]
async fn test_get_org_access_extracts_users() {
    let client = client(MockTransport::new().with_response(
        200,
        r#"{"maxInheritedRole":null,"users":[
            {"id":5,"name":"Ada","email":"ada@example.com","access":"owners"},
            {"id":6,"name":"Bob","email":"bob@example.com","access":"viewers","parentAccess":"editors"}
        ]}"#,
    ));

    let response = client.get_org_access(&context(), "acme").await.unwrap();

    assert_eq!(response.data.len(), 2);
    assert_eq!(response.data[1].parent_access.as_deref(), Some("editors"));
    assert_eq!(client.transport().last_request().path, "orgs/acme/access");
}

#[tokio::test]
async fn test_org_workspaces_and_usage_paths() {
    let client = client(
        MockTransport::new()
            .with_response(200, r#"[{"id":9,"name":"Home","docs":[{"id":"d1","name":"Budget"}]}]"#)
            .with_response(
                200,
                r#"{"countsByDataLimitStatus":{"gracePeriod":1},"attachments":{"totalBytes":10}}"#,
            ),
    );

    let workspaces = client.get_org_workspaces(&context(), "3").await.unwrap();
    assert_eq!(workspaces.data[0].docs[0].id, "d1");

    let usage = client.get_org_usage(&context(), "3").await.unwrap();
    assert_eq!(usage.data.counts_by_data_limit_status.grace_period, 1);
    assert_eq!(usage.data.attachments.total_bytes, 10);

    let paths: Vec<String> = client
        .transport()
        .requests()
        .into_iter()
        .map(|r| r.path)
        .collect();
    assert_eq!(paths, vec!["orgs/3/workspaces", "orgs/3/usage"]);
}

#[tokio::test]
async fn test_create_org_parses_bare_id() {
    let client = client(
        MockTransport::new()
            .with_response(200, "17")
            .with_response(400, r#"{"error":"domain taken"}"#),
    );

    let created = client.create_org(&context(), "Acme", "acme").await.unwrap();
    assert_eq!(created.status, 200);
    assert_eq!(created.data, 17);
    assert_eq!(
        client.transport().last_request().json(),
        json!({"name": "Acme", "domain": "acme"})
    );

    let rejected = client.create_org(&context(), "Acme", "acme").await.unwrap();
    assert_eq!(rejected.status, 400);
    assert_eq!(rejected.data, 0);
}

#[tokio::test]
async fn test_delete_org_confirms_by_name() {
    let client = client(MockTransport::new().with_response(200, ""));

    let response = client.delete_org(&context(), 17, "Acme").await.unwrap();

    assert!(response.is_ok());
    let request = client.transport().last_request();
    assert_eq!(request.method, HttpMethod::Delete);
    assert_eq!(request.path, "orgs/17/Acme");
}

#[tokio::test]
async fn test_workspace_lifecycle() {
    let client = client(
        MockTransport::new()
            .with_response(200, "31")
            .with_response(200, r#"{"id":31,"name":"Reports","docs":[]}"#)
            .with_response(200, ""),
    );

    let created = client.create_workspace(&context(), 3, "Reports").await.unwrap();
    assert_eq!(created.data, 31);

    let workspace = client.get_workspace(&context(), 31).await.unwrap();
    assert_eq!(workspace.data.name, "Reports");

    let deleted = client.delete_workspace(&context(), 31).await.unwrap();
    assert!(deleted.is_ok());

    let requests = client.transport().requests();
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert_eq!(requests[0].path, "orgs/3/workspaces");
    assert_eq!(requests[0].json(), json!({"name": "Reports"}));
    assert_eq!(requests[1].path, "workspaces/31");
    assert_eq!(requests[2].method, HttpMethod::Delete);
    assert_eq!(requests[2].path, "workspaces/31");
}

#[tokio::test]
async fn test_workspace_access_listing() {
    let client = client(
        MockTransport::new()
            .with_response(
                200,
                r#"{"maxInheritedRole":"owners","users":[
                    {"id":5,"name":"Ada","email":"ada@example.com","access":"editors","parentAccess":"viewers"}
                ]}"#,
            )
            .with_response(403, r#"{"error":"access denied"}"#),
    );

    let access = client.get_workspace_access(&context(), 31).await.unwrap();
    assert_eq!(access.data.max_inherited_role.as_deref(), Some("owners"));
    assert_eq!(access.data.users.len(), 1);
    assert_eq!(access.data.users[0].email, "ada@example.com");
    assert_eq!(access.data.users[0].parent_access.as_deref(), Some("viewers"));
    assert_eq!(client.transport().last_request().path, "workspaces/31/access");

    let denied = client.get_workspace_access(&context(), 31).await.unwrap();
    assert_eq!(denied.status, 403);
    assert!(denied.data.users.is_empty());
}

#[tokio::test]
async fn test_update_workspace_access_delta() {
    let client = client(MockTransport::new().with_response(200, ""));
    let mut users = AccessDelta::new();
    users.insert("ada@example.com".to_string(), Some("editors".to_string()));
    users.insert("bob@example.com".to_string(), None);

    client
        .update_workspace_access(&context(), 31, &users)
        .await
        .unwrap();

    let request = client.transport().last_request();
    assert_eq!(request.method, HttpMethod::Patch);
    assert_eq!(request.path, "workspaces/31/access");
    assert_eq!(
        request.json(),
        json!({"delta": {"users": {"ada@example.com": "editors", "bob@example.com": null}}})
    );
}

#[tokio::test]
async fn test_doc_metadata_reads() {
    let client = client(
        MockTransport::new()
            .with_response(200, r#"{"id":"d1","name":"Budget","workspace":{"id":9,"name":"Home"}}"#)
            .with_response(200, r#"{"tables":[{"id":"Table1","fields":{"primaryViewId":1}}]}"#)
            .with_response(200, r#"{"columns":[{"id":"Amount","fields":{"type":"Numeric"}}]}"#)
            .with_response(200, r#"{"maxInheritedRole":"owners","users":[]}"#),
    );
    let ctx = context();

    let doc = client.get_doc(&ctx, "d1").await.unwrap();
    assert_eq!(doc.data.workspace.unwrap().id, 9);

    let tables = client.get_doc_tables(&ctx, "d1").await.unwrap();
    assert_eq!(tables.data.tables[0].id, "Table1");

    let columns = client.get_table_columns(&ctx, "d1", "Table1").await.unwrap();
    assert_eq!(columns.data.columns[0].fields["type"], json!("Numeric"));

    let access = client.get_doc_access(&ctx, "d1").await.unwrap();
    assert_eq!(access.data.max_inherited_role.as_deref(), Some("owners"));

    let paths: Vec<String> = client
        .transport()
        .requests()
        .into_iter()
        .map(|r| r.path)
        .collect();
    assert_eq!(
        paths,
        vec![
            "docs/d1",
            "docs/d1/tables",
            "docs/d1/tables/Table1/columns",
            "docs/d1/access"
        ]
    );
}

#[tokio::test]
async fn test_doc_writes() {
    let client = client(MockTransport::new().with_default_response(200, ""));
    let ctx = context();

    client.move_doc(&ctx, "d1", 12).await.unwrap();
    client.purge_doc_history(&ctx, "d1", 3).await.unwrap();
    client.delete_doc(&ctx, "d1").await.unwrap();

    let requests = client.transport().requests();
    assert_eq!(requests[0].method, HttpMethod::Patch);
    assert_eq!(requests[0].path, "docs/d1/move");
    assert_eq!(requests[0].json(), json!({"workspace": 12}));
    assert_eq!(requests[1].method, HttpMethod::Post);
    assert_eq!(requests[1].path, "docs/d1/states/remove");
    assert_eq!(requests[1].json(), json!({"keep": 3}));
    assert_eq!(requests[2].method, HttpMethod::Delete);
    assert_eq!(requests[2].path, "docs/d1");
}

#[tokio::test]
async fn test_download_table_csv() {
    let csv = "name,age\nAda,36\n";
    let client = client(MockTransport::new().with_response(200, csv));

    let response = client
        .download_table_csv(&context(), "d1", "People")
        .await
        .unwrap();

    assert_eq!(response.data, csv);
    assert_eq!(
        client.transport().last_request().path,
        "docs/d1/download/csv?tableId=People"
    );
}

#[tokio::test]
async fn test_delete_user_sends_name() {
    let client = client(MockTransport::new().with_response(400, "name mismatch"));

    let response = client.delete_user(&context(), 8, "Ada").await.unwrap();

    assert_eq!(response.status, 400);
    assert_eq!(response.data, "name mismatch");
    let request = client.transport().last_request();
    assert_eq!(request.method, HttpMethod::Delete);
    assert_eq!(request.path, "users/8");
    assert_eq!(request.json(), json!({"name": "Ada"}));
}

#[tokio::test]
async fn test_webhook_lifecycle() {
    let client = client(
        MockTransport::new()
            .with_response(200, r#"{"webhooks":[{"id":"wh-1"},{"id":"wh-2"}]}"#)
            .with_response(
                200,
                r#"{"webhooks":[{"id":"wh-1","fields":{"url":"https://a.example","tableId":"Orders","enabled":true,"eventTypes":["add"]}}]}"#,
            )
            .with_response(200, "")
            .with_response(200, r#"{"success":true}"#)
            .with_response(200, ""),
    );
    let ctx = context();

    let hooks = vec![
        WebhookPartialFields::new("Orders", "https://a.example", vec!["add".to_string()]),
        WebhookPartialFields::new("Orders", "https://b.example", vec!["update".to_string()])
            .with_name("updates")
            .with_enabled(false),
    ];
    let created = client.create_webhooks(&ctx, "d1", &hooks).await.unwrap();
    assert_eq!(created.data, vec!["wh-1".to_string(), "wh-2".to_string()]);

    let listed = client.list_webhooks(&ctx, "d1").await.unwrap();
    assert_eq!(listed.data.len(), 1);
    assert_eq!(listed.data[0].fields.table_id, "Orders");
    assert!(listed.data[0].usage.is_none());

    let patch = WebhookPartialFields {
        enabled: Some(true),
        ..WebhookPartialFields::default()
    };
    client.update_webhook(&ctx, "d1", "wh-2", &patch).await.unwrap();

    let deleted = client.delete_webhook(&ctx, "d1", "wh-2").await.unwrap();
    assert!(deleted.data.success);

    client.clear_webhook_queue(&ctx, "d1").await.unwrap();

    let requests = client.transport().requests();
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert_eq!(requests[0].path, "docs/d1/webhooks");
    assert_eq!(
        requests[0].json()["webhooks"][1]["fields"],
        json!({
            "name": "updates",
            "url": "https://b.example",
            "enabled": false,
            "eventTypes": ["update"],
            "tableId": "Orders"
        })
    );
    assert_eq!(requests[1].method, HttpMethod::Get);
    assert_eq!(requests[2].method, HttpMethod::Patch);
    assert_eq!(requests[2].path, "docs/d1/webhooks/wh-2");
    assert_eq!(requests[2].json(), json!({"enabled": true}));
    assert_eq!(requests[3].method, HttpMethod::Delete);
    assert_eq!(requests[3].path, "docs/d1/webhooks/wh-2");
    assert_eq!(requests[4].path, "docs/d1/webhooks/queue");
}

#[tokio::test]
async fn test_attachments() {
    let client = client(
        MockTransport::new()
            .with_response(
                200,
                r#"{"records":[{"id":1,"fields":{"fileName":"a.png","fileSize":512,"timeUploaded":"2024-06-01T10:00:00.000Z"}}]}"#,
            )
            .with_response(200, r#"{"fileName":"a.png","fileSize":512,"timeUploaded":"2024-06-01T10:00:00.000Z"}"#)
            .with_response(200, ""),
    );
    let ctx = context();
    let options = AttachmentQueryOptions::new().with_sort("-fileSize").with_limit(1);

    let listed = client
        .list_attachments(&ctx, "d1", Some(&options))
        .await
        .unwrap();
    assert_eq!(listed.data[0].fields.file_name, "a.png");

    let metadata = client.get_attachment_metadata(&ctx, "d1", 1).await.unwrap();
    assert_eq!(metadata.data.file_size, 512);

    client.remove_unused_attachments(&ctx, "d1").await.unwrap();

    let requests = client.transport().requests();
    assert_eq!(requests[0].route(), "docs/d1/attachments");
    assert_eq!(requests[0].query_value("sort").as_deref(), Some("-fileSize"));
    assert_eq!(requests[0].query_value("limit").as_deref(), Some("1"));
    assert_eq!(requests[1].path, "docs/d1/attachments/1");
    assert_eq!(requests[2].method, HttpMethod::Post);
    assert_eq!(requests[2].path, "docs/d1/attachments/removeUnused");
}
