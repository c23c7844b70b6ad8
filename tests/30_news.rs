mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::TestServer;
use newsroom_api::config::AppConfig;

#[tokio::test]
async fn create_returns_full_projection() -> Result<()> {
    let server = TestServer::spawn().await?;
    let category = server.create_category("Tech").await?;

    let res = server
        .client
        .post(server.url("/news"))
        .json(&json!({
            "title": "A",
            "content": "B",
            "images": ["cover.png", null],
            "category_id": category
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: Value = res.json().await?;
    assert!(body.get("id").is_none());
    assert_eq!(body["title"], "A");
    assert_eq!(body["content"], "B");
    assert_eq!(body["images"], json!(["cover.png", null]));
    assert_eq!(body["category_id"], category);
    assert!(body["created"].is_string());
    assert!(body["updated"].is_string());
    Ok(())
}

#[tokio::test]
async fn list_uses_abbreviated_projection() -> Result<()> {
    let server = TestServer::spawn().await?;
    let category = server.create_category("Tech").await?;
    server.create_news("first", Some(category)).await?;
    server.create_news("second", Some(category)).await?;

    let list: Vec<Value> = server.client.get(server.url("/news")).send().await?.json().await?;
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["id"], 1);
    assert_eq!(list[0]["title"], "first");
    assert!(list[0]["created"].is_string());
    assert!(list[0].get("content").is_none());
    Ok(())
}

#[tokio::test]
async fn unresolvable_category_is_not_found() -> Result<()> {
    let server = TestServer::spawn().await?;

    for category_id in [json!(42), Value::Null] {
        let res = server
            .client
            .post(server.url("/news"))
            .json(&json!({ "title": "A", "content": "B", "images": [], "category_id": category_id }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(res.json::<Value>().await?["message"], "Category not found");
    }

    let list: Vec<Value> = server.client.get(server.url("/news")).send().await?.json().await?;
    assert!(list.is_empty());
    Ok(())
}

#[tokio::test]
async fn categoryless_news_when_not_required() -> Result<()> {
    let mut config = AppConfig::development();
    config.news.require_category = false;
    let server = TestServer::spawn_with(config).await?;

    let id = server.create_news("loose", None).await?;
    let body: Value = server
        .client
        .get(server.url(&format!("/news/{}", id)))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["category_id"], Value::Null);
    Ok(())
}

#[tokio::test]
async fn put_overwrites_every_field() -> Result<()> {
    let server = TestServer::spawn().await?;
    let category = server.create_category("Tech").await?;
    let id = server.create_news("A", Some(category)).await?;

    let res = server
        .client
        .put(server.url(&format!("/news/{}", id)))
        .json(&json!({ "title": "A2", "content": "B2", "images": ["x"] }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["title"], "A2");
    assert_eq!(body["content"], "B2");
    assert_eq!(body["images"], json!(["x"]));
    assert_eq!(body["category_id"], Value::Null);
    Ok(())
}

#[tokio::test]
async fn patch_ignores_falsy_values() -> Result<()> {
    let server = TestServer::spawn().await?;
    let category = server.create_category("Tech").await?;
    let id = server.create_news("A", Some(category)).await?;
    let path = format!("/news/{}", id);

    let res = server
        .client
        .patch(server.url(&path))
        .json(&json!({ "title": "", "content": "", "images": [], "category_id": 0 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["title"], "A");
    assert_eq!(body["content"], "body");
    assert_eq!(body["category_id"], category);

    let body: Value = server
        .client
        .patch(server.url(&path))
        .json(&json!({ "title": "New" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["title"], "New");
    assert_eq!(body["content"], "body");

    let res = server.client.patch(server.url(&path)).json(&json!({ "category_id": 99 })).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn deleting_category_keeps_news_with_null_reference() -> Result<()> {
    let server = TestServer::spawn().await?;
    let category = server.create_category("Tech").await?;
    assert_eq!(category, 1);
    let news = server.create_news("A", Some(category)).await?;
    assert_eq!(news, 1);

    let res = server.client.delete(server.url("/categories/1")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server.client.get(server.url("/news/1")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["category_id"], Value::Null);
    Ok(())
}

#[tokio::test]
async fn deleting_news_removes_its_comments() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.login_as("writer@example.com").await?;
    let category = server.create_category("Tech").await?;
    let news = server.create_news("A", Some(category)).await?;

    let res = server
        .client
        .post(server.url("/comments"))
        .bearer_auth(&token)
        .json(&json!({ "text": "hi", "news_id": news }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let comment_id = res.json::<Value>().await?["id"].as_i64().unwrap_or_default();

    let res = server.client.delete(server.url(&format!("/news/{}", news))).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server.client.get(server.url(&format!("/comments/{}", comment_id))).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let res = server.client.get(server.url(&format!("/news/{}", news))).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn oversized_fields_are_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    let category = server.create_category("Tech").await?;

    let res = server
        .client
        .post(server.url("/news"))
        .json(&json!({ "title": "t".repeat(101), "content": "B", "images": [], "category_id": category }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(res.json::<Value>().await?["field_errors"]["title"].is_string());
    Ok(())
}
