mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

async fn create_item(app: &axum::Router, token: &str) -> Result<String> {
    let (status, body) = common::request(
        app,
        Method::POST,
        "/items",
        Some(token),
        Some(json!({
            "item": {
                "name": "Rice",
                "storage": "cabinet",
                "expiration": "2027-01-01T00:00:00Z",
                "volume": 5.0,
                "unit": "kg"
            }
        })),
    )
    .await?;
    anyhow::ensure!(status == StatusCode::CREATED, "item create failed: {} {}", status, body);
    Ok(body["item"]["id"].as_str().unwrap().to_string())
}

#[tokio::test]
async fn create_pantry_with_entries() -> Result<()> {
    let app = common::app();
    let (user_id, token) = common::register_and_login(&app, "caleb@example.com").await?;
    let item_id = create_item(&app, &token).await?;

    let (status, body) = common::request(
        &app,
        Method::POST,
        "/pantries",
        Some(&token),
        Some(json!({ "pantry": { "items": [{ "item": item_id, "quantity": 2 }] } })),
    )
    .await?;

    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["pantry"]["owner"], json!(user_id));
    assert_eq!(body["pantry"]["items"], json!([{ "item": item_id, "quantity": 2 }]));

    Ok(())
}

#[tokio::test]
async fn empty_pantry_is_allowed() -> Result<()> {
    let app = common::app();
    let (_, token) = common::register_and_login(&app, "caleb@example.com").await?;

    let (status, body) = common::request(
        &app,
        Method::POST,
        "/pantries",
        Some(&token),
        Some(json!({ "pantry": {} })),
    )
    .await?;

    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["pantry"]["items"], json!([]));

    Ok(())
}

#[tokio::test]
async fn incomplete_entries_are_unprocessable() -> Result<()> {
    let app = common::app();
    let (_, token) = common::register_and_login(&app, "caleb@example.com").await?;

    let (status, body) = common::request(
        &app,
        Method::POST,
        "/pantries",
        Some(&token),
        Some(json!({ "pantry": { "items": [{ "quantity": 2 }] } })),
    )
    .await?;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", body);
    assert!(body["field_errors"].get("items[0].item").is_some(), "{}", body);

    Ok(())
}

#[tokio::test]
async fn patch_replaces_entry_list() -> Result<()> {
    let app = common::app();
    let (_, token) = common::register_and_login(&app, "caleb@example.com").await?;
    let item_id = create_item(&app, &token).await?;

    let (_, created) = common::request(
        &app,
        Method::POST,
        "/pantries",
        Some(&token),
        Some(json!({ "pantry": { "items": [{ "item": item_id, "quantity": 2 }] } })),
    )
    .await?;
    let id = created["pantry"]["id"].as_str().unwrap().to_string();

    let (status, body) = common::request(
        &app,
        Method::PATCH,
        &format!("/pantries/{}", id),
        Some(&token),
        Some(json!({ "pantry": { "items": [{ "item": item_id, "quantity": 7 }] } })),
    )
    .await?;
    assert_eq!(status, StatusCode::NO_CONTENT, "{}", body);

    // Shows are public
    let (status, body) =
        common::request(&app, Method::GET, &format!("/pantries/{}", id), None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pantry"]["items"], json!([{ "item": item_id, "quantity": 7 }]));

    Ok(())
}

#[tokio::test]
async fn pantry_mutations_are_owner_gated() -> Result<()> {
    let app = common::app();
    let (_, owner_token) = common::register_and_login(&app, "caleb@example.com").await?;
    let (_, other_token) = common::register_and_login(&app, "mallory@example.com").await?;

    let (_, created) = common::request(
        &app,
        Method::POST,
        "/pantries",
        Some(&owner_token),
        Some(json!({ "pantry": {} })),
    )
    .await?;
    let id = created["pantry"]["id"].as_str().unwrap().to_string();

    let (status, _) = common::request(
        &app,
        Method::PATCH,
        &format!("/pantries/{}", id),
        Some(&other_token),
        Some(json!({ "pantry": { "items": [] } })),
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = common::request(
        &app,
        Method::DELETE,
        &format!("/pantries/{}", id),
        Some(&other_token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = common::request(
        &app,
        Method::DELETE,
        &format!("/pantries/{}", id),
        Some(&owner_token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) =
        common::request(&app, Method::GET, &format!("/pantries/{}", id), None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn deleting_an_item_leaves_pantry_entries_alone() -> Result<()> {
    let app = common::app();
    let (_, token) = common::register_and_login(&app, "caleb@example.com").await?;
    let item_id = create_item(&app, &token).await?;

    let (_, created) = common::request(
        &app,
        Method::POST,
        "/pantries",
        Some(&token),
        Some(json!({ "pantry": { "items": [{ "item": item_id, "quantity": 1 }] } })),
    )
    .await?;
    let pantry_id = created["pantry"]["id"].as_str().unwrap().to_string();

    let (status, _) = common::request(
        &app,
        Method::DELETE,
        &format!("/items/{}", item_id),
        Some(&token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // No cascade: the entry still references the removed item
    let (status, body) = common::request(
        &app,
        Method::GET,
        &format!("/pantries/{}", pantry_id),
        None,
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pantry"]["items"][0]["item"], json!(item_id));

    Ok(())
}
