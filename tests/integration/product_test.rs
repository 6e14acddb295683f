//! Integration tests for product ownership, search and the admin view.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_create_sets_seller_from_token() {
    let app = TestApp::new();
    let token = app.register_seller("ann@example.com").await;
    let profile = app
        .request("GET", "/api/users/profile", None, Some(&token))
        .await;

    let response = app
        .request(
            "POST",
            "/api/products",
            Some(json!({
                "name": "Desk Lamp",
                "sku": "LAMP-1",
                "quantity": 3,
                "price": 19.5,
                "sellerId": "00000000-0000-0000-0000-000000000000",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["sellerId"], profile.body["id"]);
    assert_eq!(response.body["name"], "Desk Lamp");
}

#[tokio::test]
async fn test_create_requires_token() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/products",
            Some(json!({ "name": "x", "sku": "X-1", "quantity": 1, "price": 1.0 })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_validates_body() {
    let app = TestApp::new();
    let token = app.register_seller("val@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/products",
            Some(json!({ "name": "", "sku": "V-1", "quantity": -2, "price": 1.0 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_duplicate_sku_conflicts() {
    let app = TestApp::new();
    let a = app.register_seller("a@example.com").await;
    let b = app.register_seller("b@example.com").await;
    app.create_product(&a, "Chair", "SKU-1", 40.0).await;

    let response = app
        .request(
            "POST",
            "/api/products",
            Some(json!({ "name": "Other", "sku": "SKU-1", "quantity": 1, "price": 2.0 })),
            Some(&b),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_only_owner_or_admin_may_mutate() {
    let app = TestApp::new();
    let owner = app.register_seller("owner@example.com").await;
    let other = app.register_seller("other@example.com").await;
    let admin = app.seed_admin("admin@example.com").await;
    let id = app.create_product(&owner, "Table", "TBL-1", 120.0).await;
    let path = format!("/api/products/{id}");

    let denied = app
        .request("PUT", &path, Some(json!({ "price": 1.0 })), Some(&other))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let denied_delete = app.request("DELETE", &path, None, Some(&other)).await;
    assert_eq!(denied_delete.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.body, denied_delete.body);

    let updated = app
        .request("PUT", &path, Some(json!({ "price": 99.0 })), Some(&owner))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["price"], 99.0);

    let by_admin = app
        .request("PUT", &path, Some(json!({ "quantity": 7 })), Some(&admin))
        .await;
    assert_eq!(by_admin.status, StatusCode::OK);
    assert_eq!(by_admin.body["quantity"], 7);
    assert_eq!(by_admin.body["sellerId"], updated.body["sellerId"]);

    let deleted = app.request("DELETE", &path, None, Some(&admin)).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["id"], id.as_str());

    let gone = app.request("GET", &path, None, None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_cannot_change_seller() {
    let app = TestApp::new();
    let owner = app.register_seller("keep@example.com").await;
    let id = app.create_product(&owner, "Rug", "RUG-1", 60.0).await;
    let path = format!("/api/products/{id}");
    let before = app.request("GET", &path, None, None).await;

    let response = app
        .request(
            "PUT",
            &path,
            Some(json!({ "sellerId": "00000000-0000-0000-0000-000000000000", "name": "Big Rug" })),
            Some(&owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "Big Rug");
    assert_eq!(response.body["sellerId"], before.body["sellerId"]);
}

#[tokio::test]
async fn test_missing_product_is_not_found_before_ownership() {
    let app = TestApp::new();
    let token = app.register_seller("nf@example.com").await;

    let missing = app
        .request(
            "DELETE",
            "/api/products/7a1c3e52-4f0b-4c1e-9b8e-2d6f0a9c1b11",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let malformed = app
        .request("GET", "/api/products/not-a-uuid", None, None)
        .await;
    assert_eq!(malformed.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_is_public_and_includes_seller() {
    let app = TestApp::new();
    let token = app.register_seller("pub@example.com").await;
    let id = app.create_product(&token, "Vase", "VASE-1", 15.0).await;

    let response = app
        .request("GET", &format!("/api/products/{id}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["seller"]["email"], "pub@example.com");
}

#[tokio::test]
async fn test_list_shows_only_own_products() {
    let app = TestApp::new();
    let a = app.register_seller("list-a@example.com").await;
    let b = app.register_seller("list-b@example.com").await;
    let admin = app.seed_admin("list-admin@example.com").await;
    app.create_product(&a, "A1", "A-1", 1.0).await;
    app.create_product(&a, "A2", "A-2", 2.0).await;
    app.create_product(&b, "B1", "B-1", 3.0).await;

    let mine = app.request("GET", "/api/products", None, Some(&a)).await;
    assert_eq!(mine.status, StatusCode::OK);
    assert_eq!(mine.body.as_array().unwrap().len(), 2);

    let all = app.request("GET", "/api/products", None, Some(&admin)).await;
    assert_eq!(all.body.as_array().unwrap().len(), 3);

    let anonymous = app.request("GET", "/api/products", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_search_filters_without_token() {
    let app = TestApp::new();
    let token = app.register_seller("search@example.com").await;
    app.create_product(&token, "Blue Mug", "MUG-B", 8.0).await;
    app.create_product(&token, "Red Mug", "MUG-R", 12.0).await;
    app.create_product(&token, "Teapot", "POT-1", 30.0).await;

    let by_name = app
        .request("GET", "/api/products/search?name=mug", None, None)
        .await;
    assert_eq!(by_name.status, StatusCode::OK);
    assert_eq!(by_name.body.as_array().unwrap().len(), 2);

    let by_price = app
        .request(
            "GET",
            "/api/products/search?name=mug&minPrice=10",
            None,
            None,
        )
        .await;
    let hits = by_price.body.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["sku"], "MUG-R");

    let by_sku = app
        .request("GET", "/api/products/search?sku=POT-1", None, None)
        .await;
    assert_eq!(by_sku.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_admin_view_is_admin_only() {
    let app = TestApp::new();
    let seller = app.register_seller("seller@example.com").await;
    let admin = app.seed_admin("boss@example.com").await;
    app.create_product(&seller, "Clock", "CLK-1", 25.0).await;

    let denied = app
        .request("GET", "/api/products/admin", None, Some(&seller))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let response = app
        .request("GET", "/api/products/admin", None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let views = response.body.as_array().unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0]["seller"]["email"], "seller@example.com");
}
