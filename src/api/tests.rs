use super::*;
use crate::error::ApiErrorKind;
use crate::request::MockHttpClient;
use crate::storage::MemoryTokenStore;
use serde_json::json;
use std::rc::Rc;
use thatnewai_shared::{SearchResult, ToolType};

// =========================================================
// 辅助函数
// =========================================================

const BASE: &str = "http://localhost:8000/api";

fn url(path: &str) -> String {
    format!("{BASE}{path}")
}

fn create_api(
    tokens: MemoryTokenStore,
) -> (Rc<MockHttpClient>, CatalogApi<Rc<MockHttpClient>, MemoryTokenStore>) {
    let client = Rc::new(MockHttpClient::new());
    let api = CatalogApi::new(BASE, Rc::clone(&client), tokens).unwrap();
    (client, api)
}

// =========================================================
// 请求管道
// =========================================================

#[tokio::test]
async fn test_bearer_token_attached_when_stored() {
    let (client, api) = create_api(MemoryTokenStore::with_token("secret"));
    client.mock_response(&url("/categories"), 200, json!([{ "name": "Chat" }]));

    api.get_categories().await.unwrap();

    let req = client.last_request().unwrap();
    assert_eq!(req.method, HttpMethod::Get);
    assert_eq!(req.header("Authorization"), Some("Bearer secret"));
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let (client, api) = create_api(MemoryTokenStore::new());
    client.mock_response(&url("/categories"), 200, json!([{ "name": "Chat" }]));

    api.get_categories().await.unwrap();

    assert_eq!(client.last_request().unwrap().header("Authorization"), None);
}

#[tokio::test]
async fn test_server_message_is_surfaced() {
    let (client, api) = create_api(MemoryTokenStore::new());
    client.mock_response(&url("/tools/x"), 500, json!({ "detail": "database is down" }));

    let err = api.get_tool("x").await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Status(500));
    assert_eq!(err.message(), "database is down");
    // 不重试
    assert_eq!(client.request_count(), 1);
}

#[tokio::test]
async fn test_network_failure_is_distinct_from_invalid_data() {
    let (client, api) = create_api(MemoryTokenStore::new());
    client.mock_network_error(&url("/categories"));
    let err = api.get_categories().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Network);

    let (client, api) = create_api(MemoryTokenStore::new());
    client.mock_response(&url("/categories"), 200, json!({ "items": [] }));
    let err = api.get_categories().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::InvalidData);
    assert!(err.message().contains("invalid data format"));
}

#[tokio::test]
async fn test_non_json_body_is_invalid_data() {
    let (client, api) = create_api(MemoryTokenStore::new());
    client.mock_raw(&url("/categories"), 200, "<html>oops</html>");

    let err = api.get_categories().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::InvalidData);
}

#[tokio::test]
async fn test_generic_request_encodes_segments() {
    let (client, api) = create_api(MemoryTokenStore::new());
    client.mock_response(&url("/tools/a%20b"), 200, json!({ "ok": true }));

    let value = api.request(HttpMethod::Get, "/tools/a b", None).await.unwrap();
    assert_eq!(value, json!({ "ok": true }));
}

#[tokio::test]
async fn test_invalid_base_url_is_rejected() {
    let result = CatalogApi::new("not a url", MockHttpClient::new(), MemoryTokenStore::new());
    assert_eq!(result.err().map(|e| e.kind), Some(ApiErrorKind::InvalidInput));
}

// =========================================================
// 公开目录
// =========================================================

#[tokio::test]
async fn test_get_tools_normalizes_and_paginates() {
    let (client, api) = create_api(MemoryTokenStore::new());
    client.mock_response(
        &url("/tools?page=1&per_page=2"),
        200,
        json!({
            "items": [
                { "id": "1", "name": "My Tool", "category": "X", "type": "freemium" },
                { "id": "2", "name": "Other", "logo_url": "https://cdn/o.png" }
            ],
            "total": 5,
            "total_pages": 99
        }),
    );

    let page = api.get_tools(1, 2).await.unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].slug, "my-tool");
    assert_eq!(page.data[0].categories, vec!["X".to_string()]);
    assert_eq!(page.data[0].logo, "/placeholder.svg");
    assert_eq!(page.data[1].logo, "https://cdn/o.png");
    assert_eq!(page.total, 5);
    assert_eq!(page.total_pages, 3);
}

#[tokio::test]
async fn test_get_tools_without_total_estimates() {
    let (client, api) = create_api(MemoryTokenStore::new());
    client.mock_response(
        &url("/tools?page=2&per_page=2"),
        200,
        json!([{ "name": "A" }, { "name": "B" }]),
    );

    let page = api.get_tools(2, 2).await.unwrap();
    // 满页：(2-1)*2 + 2 + 2
    assert_eq!(page.total, 6);
    assert_eq!(page.total_pages, 3);
    assert!(page.pager().has_next());
}

#[tokio::test]
async fn test_get_tools_empty_is_invalid_data() {
    let (client, api) = create_api(MemoryTokenStore::new());
    client.mock_response(&url("/tools?page=1&per_page=10"), 200, json!({ "items": [] }));

    let err = api.get_tools(1, 10).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::InvalidData);
}

#[tokio::test]
async fn test_get_tools_by_category_uses_slug_path() {
    let (client, api) = create_api(MemoryTokenStore::new());
    client.mock_response(
        &url("/categories/image-generation/tools"),
        200,
        json!({ "data": [{ "id": "1", "name": "Painter" }] }),
    );

    let tools = api.get_tools_by_category("image-generation").await.unwrap();
    assert_eq!(tools[0].name, "Painter");
}

#[tokio::test]
async fn test_get_tool_without_id_is_not_found() {
    let (client, api) = create_api(MemoryTokenStore::new());
    client.mock_response(&url("/tools/ghost"), 200, json!({ "name": "Ghost" }));

    let err = api.get_tool("ghost").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_get_tool_404_is_not_found() {
    let (_client, api) = create_api(MemoryTokenStore::new());
    let err = api.get_tool("missing").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_blank_search_never_hits_the_network() {
    let (client, api) = create_api(MemoryTokenStore::new());

    let response = api.search("   ", 1, 10).await.unwrap();
    assert!(response.items.is_empty());
    assert_eq!(response.total_pages, 1);
    assert_eq!(client.request_count(), 0);
}

#[tokio::test]
async fn test_search_sends_relevance_ranking() {
    let (client, api) = create_api(MemoryTokenStore::new());
    client.mock_response(
        &url("/search?query=image+gen&page=1&per_page=10&sort_by=relevance&sort_order=-1"),
        200,
        json!({
            "items": [
                { "type": "tool", "name": "Painter" },
                { "type": "news", "title": "Launch", "slug": "launch" },
                { "type": "mystery" }
            ],
            "total": 2
        }),
    );

    let response = api.search(" image gen ", 1, 10).await.unwrap();
    assert_eq!(response.query, "image gen");
    assert_eq!(response.items.len(), 2);
    assert!(matches!(&response.items[0], SearchResult::Tool(hit) if hit.url == "/tool/painter"));
    assert!(matches!(&response.items[1], SearchResult::News(hit) if hit.url == "/news/launch"));
}

#[tokio::test]
async fn test_news_allows_empty_pages() {
    let (client, api) = create_api(MemoryTokenStore::new());
    client.mock_response(&url("/news?page=4&per_page=10"), 200, json!({ "items": [] }));

    let page = api.get_news(4, 10).await.unwrap();
    assert!(page.is_empty());
    assert_eq!(page.settle_empty_page(), Some(3));
}

#[tokio::test]
async fn test_news_item_requires_id() {
    let (client, api) = create_api(MemoryTokenStore::new());
    client.mock_response(&url("/news/launch"), 200, json!({ "slug": "launch" }));
    assert!(api.get_news_item("launch").await.unwrap_err().is_not_found());

    client.mock_response(
        &url("/news/ok"),
        200,
        json!({ "id": "n1", "title": "Ok", "content": "# hi" }),
    );
    let item = api.get_news_item("ok").await.unwrap();
    assert_eq!(item.content, "# hi");
}

#[tokio::test]
async fn test_home_reports_failures_independently() {
    let (client, api) = create_api(MemoryTokenStore::new());
    client.mock_response(&url("/categories"), 200, json!([{ "name": "Chat" }]));
    client.mock_response(&url("/tools?page=1&per_page=6"), 503, json!({}));

    let feed = api.home(6).await;
    assert_eq!(feed.categories.unwrap().len(), 1);
    assert_eq!(feed.latest.unwrap_err().kind, ApiErrorKind::Status(503));
}

// =========================================================
// 认证
// =========================================================

#[tokio::test]
async fn test_exchange_credentials_posts_json() {
    let (client, api) = create_api(MemoryTokenStore::new());
    client.mock_response(
        &url("/auth/login/json"),
        200,
        json!({ "access_token": "abc", "token_type": "bearer" }),
    );

    let login = api
        .exchange_credentials(&LoginRequest {
            email: "a@b.c".into(),
            password: "pw".into(),
        })
        .await
        .unwrap();
    assert_eq!(login.access_token, "abc");

    let req = client.last_request().unwrap();
    assert_eq!(req.method, HttpMethod::Post);
    assert_eq!(req.json_body().unwrap()["email"], "a@b.c");
    assert_eq!(req.header("Content-Type"), Some("application/json"));
}

#[tokio::test]
async fn test_exchange_credentials_rejects_empty_token() {
    let (client, api) = create_api(MemoryTokenStore::new());
    client.mock_response(&url("/auth/login/json"), 200, json!({ "access_token": "" }));

    let err = api
        .exchange_credentials(&LoginRequest {
            email: "a@b.c".into(),
            password: "pw".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::InvalidData);
}

#[tokio::test]
async fn test_current_user_with_explicit_token() {
    let (client, api) = create_api(MemoryTokenStore::with_token("old"));
    client.mock_response(&url("/auth/me"), 200, json!({ "id": 1, "email": "a@b.c" }));

    let user = api.current_user_with_token("fresh").await.unwrap();
    assert_eq!(user.email, "a@b.c");
    assert_eq!(
        client.last_request().unwrap().header("Authorization"),
        Some("Bearer fresh")
    );
}

#[tokio::test]
async fn test_register_returns_user() {
    let (client, api) = create_api(MemoryTokenStore::new());
    client.mock_response(
        &url("/auth/register"),
        201,
        json!({ "id": "u1", "email": "new@b.c", "full_name": "New" }),
    );

    let user = api
        .register(&RegisterRequest {
            email: "new@b.c".into(),
            password: "pw".into(),
            full_name: "New".into(),
        })
        .await
        .unwrap();
    assert_eq!(user.full_name, "New");
    assert!(!user.is_admin);
}

// =========================================================
// 后台管理
// =========================================================

#[tokio::test]
async fn test_admin_calls_require_a_token() {
    let (client, api) = create_api(MemoryTokenStore::new());

    let err = api.delete_tool("x").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(client.request_count(), 0);
}

#[tokio::test]
async fn test_update_tool_patches_public_path() {
    let (client, api) = create_api(MemoryTokenStore::with_token("t"));
    client.mock_response(&url("/tools/my-tool"), 200, json!({}));

    let draft = ToolDraft {
        name: "My Tool".into(),
        kind: ToolType::Paid,
        ..Default::default()
    }
    .with_generated_slug();
    api.update_tool("my-tool", &draft).await.unwrap();

    let req = client.last_request().unwrap();
    assert_eq!(req.method, HttpMethod::Patch);
    assert_eq!(req.json_body().unwrap()["type"], "paid");
}

#[tokio::test]
async fn test_delete_tool_uses_admin_path() {
    let (client, api) = create_api(MemoryTokenStore::with_token("t"));
    client.mock_raw(&url("/admin/tools/my-tool"), 204, "");

    api.delete_tool("my-tool").await.unwrap();
    assert_eq!(client.last_request().unwrap().method, HttpMethod::Delete);
}

#[tokio::test]
async fn test_post_crud_paths() {
    let (client, api) = create_api(MemoryTokenStore::with_token("t"));
    client.mock_response(&url("/admin/inventions"), 201, json!({}));
    client.mock_response(
        &url("/admin/inventions/robot"),
        200,
        json!({ "title": "Robot", "slug": "robot", "type": "free" }),
    );

    let post = InventionPost {
        title: "Robot".into(),
        ..Default::default()
    };
    api.create_post(&post).await.unwrap();
    assert_eq!(client.last_request().unwrap().method, HttpMethod::Post);

    let loaded = api.get_post("robot").await.unwrap();
    assert_eq!(loaded.title, "Robot");

    api.update_post("robot", &loaded).await.unwrap();
    assert_eq!(client.last_request().unwrap().method, HttpMethod::Put);

    api.delete_post("robot").await.unwrap();
    assert_eq!(client.last_request().unwrap().method, HttpMethod::Delete);
}

#[tokio::test]
async fn test_get_tool_draft_for_edit_form() {
    let (client, api) = create_api(MemoryTokenStore::with_token("t"));
    client.mock_response(
        &url("/tools/alpha"),
        200,
        json!({ "name": "Alpha", "slug": "alpha", "category": "LLM", "type": "freemium" }),
    );

    let draft = api.get_tool_draft("alpha").await.unwrap();
    assert_eq!(draft.category, "LLM");
    assert_eq!(draft.kind, ToolType::Freemium);
}
