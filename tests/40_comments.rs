mod common;

use anyhow::Result;
use reqwest::{header, StatusCode};
use serde_json::{json, Value};

use common::TestServer;

async fn seeded_news(server: &TestServer) -> Result<i64> {
    let category = server.create_category("Tech").await?;
    server.create_news("A", Some(category)).await
}

#[tokio::test]
async fn writes_require_a_bearer_token() -> Result<()> {
    let server = TestServer::spawn().await?;
    let news = seeded_news(&server).await?;

    let res = server
        .client
        .post(server.url("/comments"))
        .json(&json!({ "text": "hi", "news_id": news }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.headers()[header::WWW_AUTHENTICATE], "Bearer");

    let res = server
        .client
        .post(server.url("/comments"))
        .bearer_auth("not-a-jwt")
        .json(&json!({ "text": "hi", "news_id": news }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = server.client.delete(server.url("/comments/1")).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // reads stay public
    let res = server.client.get(server.url("/comments")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn create_binds_author_to_caller() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.login_as("author@example.com").await?;
    let news = seeded_news(&server).await?;

    let me: Value = server
        .client
        .get(server.url("/users/me"))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;

    let res = server
        .client
        .post(server.url("/comments"))
        .bearer_auth(&token)
        .json(&json!({ "text": "first!", "news_id": news }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let comment: Value = res.json().await?;
    assert_eq!(comment["text"], "first!");
    assert_eq!(comment["news_id"], news);
    assert_eq!(comment["user_id"], me["id"]);

    let fetched: Value = server
        .client
        .get(server.url(&format!("/comments/{}", comment["id"])))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(fetched, comment);
    Ok(())
}

#[tokio::test]
async fn comment_on_missing_news_persists_nothing() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.login_as("author@example.com").await?;

    let res = server
        .client
        .post(server.url("/comments"))
        .bearer_auth(&token)
        .json(&json!({ "text": "hello", "news_id": 404 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["message"], "News not found");

    let list: Vec<Value> = server.client.get(server.url("/comments")).send().await?.json().await?;
    assert!(list.is_empty());
    Ok(())
}

#[tokio::test]
async fn only_the_owner_may_modify() -> Result<()> {
    let server = TestServer::spawn().await?;
    let owner = server.login_as("owner@example.com").await?;
    let other = server.login_as("other@example.com").await?;
    let news = seeded_news(&server).await?;

    let comment: Value = server
        .client
        .post(server.url("/comments"))
        .bearer_auth(&owner)
        .json(&json!({ "text": "mine", "news_id": news }))
        .send()
        .await?
        .json()
        .await?;
    let path = format!("/comments/{}", comment["id"]);

    let res = server
        .client
        .put(server.url(&path))
        .bearer_auth(&other)
        .json(&json!({ "text": "hijacked" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(res.json::<Value>().await?["message"], "Not enough permissions");

    let res = server.client.delete(server.url(&path)).bearer_auth(&other).send().await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let unchanged: Value = server.client.get(server.url(&path)).send().await?.json().await?;
    assert_eq!(unchanged["text"], "mine");

    let res = server
        .client
        .put(server.url(&path))
        .bearer_auth(&owner)
        .json(&json!({ "text": "edited" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["text"], "edited");

    let res = server.client.delete(server.url(&path)).bearer_auth(&owner).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server.client.get(server.url(&path)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["message"], "Comment not found");
    Ok(())
}

#[tokio::test]
async fn missing_comment_is_not_found_before_ownership() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.login_as("author@example.com").await?;

    let res = server
        .client
        .put(server.url("/comments/77"))
        .bearer_auth(&token)
        .json(&json!({ "text": "x" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
