mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::TestServer;

#[tokio::test]
async fn create_then_get_round_trips() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/categories"))
        .json(&json!({ "name": "Tech" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await?;
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "Tech");
    assert!(created["created"].is_string());

    let fetched: Value = server.client.get(server.url("/categories/1")).send().await?.json().await?;
    assert_eq!(fetched, created);
    Ok(())
}

#[tokio::test]
async fn list_is_ordered_and_paginated() -> Result<()> {
    let server = TestServer::spawn().await?;
    for name in ["a", "b", "c"] {
        server.create_category(name).await?;
    }

    let page: Vec<Value> = server
        .client
        .get(server.url("/categories?offset=1&limit=1"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["name"], "b");

    // invalid values fall back to offset 0, limit 10
    let all: Vec<Value> = server
        .client
        .get(server.url("/categories?offset=-3&limit=0"))
        .send()
        .await?
        .json()
        .await?;
    let names: Vec<&str> = all.iter().filter_map(|c| c["name"].as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    Ok(())
}

#[tokio::test]
async fn put_replaces_and_patch_skips_empty_values() -> Result<()> {
    let server = TestServer::spawn().await?;
    let id = server.create_category("Tech").await?;
    let path = format!("/categories/{}", id);

    let res = server
        .client
        .put(server.url(&path))
        .json(&json!({ "name": "Science" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["name"], "Science");

    let res = server.client.patch(server.url(&path)).json(&json!({ "name": "" })).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["name"], "Science");

    let res = server.client.patch(server.url(&path)).json(&json!({})).send().await?;
    assert_eq!(res.json::<Value>().await?["name"], "Science");

    let res = server.client.patch(server.url(&path)).json(&json!({ "name": "Space" })).send().await?;
    assert_eq!(res.json::<Value>().await?["name"], "Space");
    Ok(())
}

#[tokio::test]
async fn delete_then_get_is_not_found() -> Result<()> {
    let server = TestServer::spawn().await?;
    let id = server.create_category("Tech").await?;
    let path = format!("/categories/{}", id);

    let res = server.client.delete(server.url(&path)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server.client.get(server.url(&path)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Category not found");
    assert_eq!(body["code"], "NOT_FOUND");

    let res = server.client.delete(server.url(&path)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn boundary_validation_failures() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.client.post(server.url("/categories")).json(&json!({ "name": "" })).send().await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = res.json().await?;
    assert!(body["field_errors"]["name"].is_string());

    let res = server.client.post(server.url("/categories")).json(&json!({})).send().await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let res = server
        .client
        .post(server.url("/categories"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server.client.get(server.url("/categories/abc")).send().await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let res = server.client.get(server.url("/categories?limit=many")).send().await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}
