use super::*;
use chrono::TimeZone;
use rstest::rstest;
use serde_json::json;

// =========================================================
// 辅助函数
// =========================================================

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn tool(raw: Value) -> Tool {
    parse_tool_at(&raw, fixed_now()).unwrap()
}

// =========================================================
// Tool
// =========================================================

#[test]
fn test_tool_without_any_logo_gets_placeholder() {
    let t = tool(json!({ "id": "1", "name": "Alpha" }));
    assert_eq!(t.logo, "/placeholder.svg");

    let t = tool(json!({ "id": "1", "name": "Alpha", "logo": "", "logo_url": "  " }));
    assert_eq!(t.logo, "/placeholder.svg");
}

#[test]
fn test_tool_logo_precedence() {
    let t = tool(json!({
        "id": "1",
        "name": "Alpha",
        "logo_url": "https://cdn/logo.png",
        "resource_url": "https://alpha.ai"
    }));
    assert_eq!(t.logo, "https://cdn/logo.png");

    let t = tool(json!({ "id": "1", "name": "Alpha", "resource_url": "https://alpha.ai" }));
    assert_eq!(t.logo, "https://alpha.ai");
    assert_eq!(t.website_url, "https://alpha.ai");
}

#[test]
fn test_tool_single_category_string_becomes_list() {
    let t = tool(json!({ "id": "1", "name": "Alpha", "category": "X" }));
    assert_eq!(t.categories, vec!["X".to_string()]);
}

#[test]
fn test_tool_categories_array_wins_over_category() {
    let t = tool(json!({
        "id": "1",
        "name": "Alpha",
        "categories": ["A", "B"],
        "category": "X"
    }));
    assert_eq!(t.categories, vec!["A".to_string(), "B".to_string()]);

    let t = tool(json!({ "id": "1", "name": "Alpha", "category": ["C"] }));
    assert_eq!(t.categories, vec!["C".to_string()]);

    let t = tool(json!({ "id": "1", "name": "Alpha" }));
    assert!(t.categories.is_empty());
}

#[rstest]
#[case(json!("free"), PricingType::Free)]
#[case(json!("freemium"), PricingType::Freemium)]
#[case(json!("paid"), PricingType::Paid)]
#[case(json!("subscription"), PricingType::Unknown)]
#[case(json!(null), PricingType::Unknown)]
fn test_tool_pricing_from_type(#[case] kind: Value, #[case] expected: PricingType) {
    let t = tool(json!({ "id": "1", "name": "Alpha", "type": kind }));
    assert_eq!(t.pricing_type, expected);
}

#[test]
fn test_tool_pricing_type_string_takes_precedence() {
    let t = tool(json!({ "id": "1", "name": "Alpha", "pricing_type": "Paid", "type": "free" }));
    assert_eq!(t.pricing_type, PricingType::Paid);

    let t = tool(json!({ "id": "1", "name": "Alpha" }));
    assert_eq!(t.pricing_type, PricingType::Unknown);
}

#[test]
fn test_tool_slug_derived_from_name() {
    let t = tool(json!({ "id": "1", "name": "My Tool" }));
    assert_eq!(t.slug, "my-tool");

    let t = tool(json!({ "id": "1", "name": "My Tool", "slug": "custom" }));
    assert_eq!(t.slug, "custom");
}

#[test]
fn test_tool_defaults() {
    let t = tool(json!({ "name": "My Tool", "rating": "4.5" }));
    assert_eq!(t.id, "my-tool");
    assert_eq!(t.rating, 0.0);
    assert_eq!(t.short_description, "");
    assert_eq!(t.website_url, "");
    assert_eq!(t.created_at, fixed_now());
}

#[test]
fn test_tool_description_and_rating() {
    let t = tool(json!({
        "id": 42,
        "name": "Alpha",
        "short_description": "short",
        "rating": 4.5,
        "created_at": "2024-03-02T10:00:00Z"
    }));
    assert_eq!(t.id, "42");
    assert_eq!(t.short_description, "short");
    assert_eq!(t.rating, 4.5);
    assert_eq!(t.created_at, Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap());

    let t = tool(json!({ "id": "1", "name": "Alpha", "description": "long", "short_description": "short" }));
    assert_eq!(t.short_description, "long");
}

#[test]
fn test_tool_requires_name_and_object() {
    assert_eq!(
        parse_tool(&json!({ "id": "1" })),
        Err(NormalizeError::MissingField("name"))
    );
    assert!(matches!(
        parse_tool(&json!("Alpha")),
        Err(NormalizeError::InvalidFormat(_))
    ));
}

#[test]
fn test_tool_detail_requires_id() {
    assert_eq!(
        parse_tool_detail(&json!({ "name": "Alpha" })),
        Err(NormalizeError::MissingId)
    );
    assert_eq!(parse_tool_detail(&Value::Null), Err(NormalizeError::MissingId));
    assert!(parse_tool_detail(&json!({ "_id": { "$oid": "abc" }, "name": "Alpha" })).is_ok());
}

#[test]
fn test_tool_draft_reads_write_fields() {
    let draft = parse_tool_draft(&json!({
        "name": "Alpha",
        "category": "LLM",
        "description": "desc",
        "tags": ["a", 1, "b"],
        "type": "paid",
        "resource_url": "https://alpha.ai",
        "featured": true
    }))
    .unwrap();

    assert_eq!(draft.slug, "alpha");
    assert_eq!(draft.category, "LLM");
    assert_eq!(draft.tags, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(draft.kind, ToolType::Paid);
    assert_eq!(draft.resource_url.as_deref(), Some("https://alpha.ai"));
    assert!(draft.featured);
}

// =========================================================
// Category
// =========================================================

#[test]
fn test_category_defaults() {
    let c = parse_category(&json!({ "name": "Image Generation" })).unwrap();
    assert_eq!(c.slug, "image-generation");
    assert_eq!(c.icon, "default-icon");
    assert_eq!(c.count, 0);
    assert!(c.id.starts_with("category-"));
    assert_eq!(c.id.len(), "category-".len() + 9);
}

#[test]
fn test_category_keeps_server_values() {
    let c = parse_category(&json!({
        "id": "c1",
        "name": "Chat",
        "slug": "chat-bots",
        "icon": "brain",
        "count": 12
    }))
    .unwrap();
    assert_eq!(c.id, "c1");
    assert_eq!(c.slug, "chat-bots");
    assert_eq!(c.icon, "brain");
    assert_eq!(c.count, 12);
}

// =========================================================
// 集合提取
// =========================================================

#[test]
fn test_extract_collection_accepts_array_items_and_data() {
    assert_eq!(extract_collection(&json!([1])).unwrap().len(), 1);
    assert_eq!(extract_collection(&json!({ "items": [1, 2] })).unwrap().len(), 2);
    assert_eq!(extract_collection(&json!({ "data": [1, 2, 3] })).unwrap().len(), 3);
}

#[test]
fn test_extract_collection_rejects_empty_and_wrong_shape() {
    assert_eq!(
        extract_collection(&json!({ "items": [] })),
        Err(NormalizeError::EmptyCollection)
    );
    assert_eq!(extract_collection(&json!([])), Err(NormalizeError::EmptyCollection));
    assert!(matches!(
        extract_collection(&json!({ "items": "nope" })),
        Err(NormalizeError::InvalidFormat(_))
    ));
    assert!(matches!(
        extract_collection(&json!(7)),
        Err(NormalizeError::InvalidFormat(_))
    ));
}

#[test]
fn test_extract_list_allows_empty() {
    assert!(extract_list(&json!({ "items": [] })).unwrap().is_empty());
}

#[test]
fn test_parse_each_skips_bad_items() {
    let items = vec![json!({ "name": "A" }), json!({ "nope": true }), json!({ "name": "B" })];
    let parsed = parse_each(&items, "category", parse_category);
    let names: Vec<_> = parsed.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
}

// =========================================================
// News / User / Invention
// =========================================================

#[test]
fn test_news_item_defaults_and_slug() {
    let n = parse_news_item(&json!({ "title": "Big News Today" })).unwrap();
    assert_eq!(n.slug, "big-news-today");
    assert_eq!(n.id, "big-news-today");
    assert_eq!(n.content, "");

    assert_eq!(parse_news_item(&json!({})), Err(NormalizeError::MissingId));
    assert_eq!(
        parse_news_detail(&json!({ "slug": "x", "title": "X" })),
        Err(NormalizeError::MissingId)
    );
}

#[test]
fn test_user_parsing() {
    let user = parse_user(&json!({
        "id": 7,
        "email": "admin@example.com",
        "full_name": null,
        "is_admin": true,
        "last_login": null
    }))
    .unwrap();
    assert_eq!(user.id, "7");
    assert_eq!(user.full_name, "");
    assert!(user.is_admin);
    assert!(user.is_active);
    assert_eq!(user.last_login, None);

    assert_eq!(
        parse_user(&json!({ "email": "x@y.z" })),
        Err(NormalizeError::MissingId)
    );
    assert_eq!(
        parse_user(&json!({ "id": "1" })),
        Err(NormalizeError::MissingField("email"))
    );
}

#[test]
fn test_invention_post_is_lenient() {
    let post = parse_invention_post(&json!({
        "title": "Robot",
        "type": "freemium",
        "tags": ["x"],
        "processed_at": { "$date": "2024-05-01T12:00:00Z" }
    }))
    .unwrap();
    assert_eq!(post.title, "Robot");
    assert_eq!(post.kind, ToolType::Freemium);
    assert!(post.processed_at.is_some());
}

#[rstest]
#[case::naive_string(json!("2024-05-01T12:00:00"))]
#[case::mongo_epoch_millis(json!({ "$date": 1_714_564_800_000i64 }))]
#[case::bare_epoch_millis(json!(1_714_564_800_000i64))]
fn test_invention_post_accepts_any_timestamp_shape(#[case] processed_at: Value) {
    let post = parse_invention_post(&json!({ "title": "Robot", "processed_at": processed_at })).unwrap();
    let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    assert_eq!(post.processed_at, Some(MongoDate { date: expected }));
}

#[test]
fn test_invention_post_type_is_case_insensitive() {
    let post = parse_invention_post(&json!({ "title": "Robot", "type": "Free" })).unwrap();
    assert_eq!(post.kind, ToolType::Free);

    let post = parse_invention_post(&json!({ "title": "Robot", "type": "FREEMIUM" })).unwrap();
    assert_eq!(post.kind, ToolType::Freemium);
}

#[test]
fn test_invention_post_tolerates_unreadable_fields() {
    let post = parse_invention_post(&json!({
        "title": "Robot",
        "type": "enterprise",
        "tags": "not-a-list",
        "processed_at": "someday",
        "thumbnails": { "small": "s.png", "broken": 3 }
    }))
    .unwrap();
    assert_eq!(post.kind, ToolType::Free);
    assert!(post.tags.is_empty());
    assert_eq!(post.processed_at, None);
    assert_eq!(post.thumbnails.len(), 1);
    assert_eq!(post.thumbnails["small"], "s.png");
}
