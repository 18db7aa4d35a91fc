mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn post_transform(server: &common::TestServer, body: &str) -> Result<reqwest::Response> {
    let res = reqwest::Client::new()
        .post(server.url("/transform_data"))
        .header("X-API-Key", common::VALID_KEY)
        .header("content-type", "application/json")
        .body(body.to_string())
        .send()
        .await?;
    Ok(res)
}

#[tokio::test]
async fn enriches_good_and_bad_emails() -> Result<()> {
    let server = common::spawn().await?;

    let res = post_transform(&server, r#"[{"Email":"a@gmail.com"},{"Email":"bad-email"}]"#).await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(
        body,
        json!([
            {"Email": "a@gmail.com", "Email Provider": "gmail.com"},
            {"Email": "bad-email", "Email Provider": ""}
        ])
    );

    Ok(())
}

#[tokio::test]
async fn provider_field_is_appended_last() -> Result<()> {
    let server = common::spawn().await?;

    let res = post_transform(&server, r#"[{"Name":"Ada","Email":"ada@example.com","Id":7}]"#).await?;

    assert_eq!(res.status(), StatusCode::OK);
    // Compare raw text so field order is checked too
    assert_eq!(
        res.text().await?,
        r#"[{"Name":"Ada","Email":"ada@example.com","Id":7,"Email Provider":"example.com"}]"#
    );

    Ok(())
}

#[tokio::test]
async fn get_with_body_is_accepted() -> Result<()> {
    let server = common::spawn().await?;

    let res = reqwest::Client::new()
        .get(server.url("/transform_data"))
        .header("X-API-Key", common::VALID_KEY)
        .body(r#"[{"Email":"x@a@b.com"},{"Email":null}]"#)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body[0]["Email Provider"], "");
    assert_eq!(body[1]["Email Provider"], "");

    Ok(())
}

#[tokio::test]
async fn transform_output_is_stable_on_second_pass() -> Result<()> {
    let server = common::spawn().await?;

    let first = post_transform(&server, r#"[{"Email":"u@corp.io"},{"Name":"no email"}]"#)
        .await?
        .text()
        .await?;
    let second = post_transform(&server, &first).await?;

    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(second.text().await?, first);

    Ok(())
}

#[tokio::test]
async fn malformed_json_is_500_with_generic_message() -> Result<()> {
    let server = common::spawn().await?;

    let res = post_transform(&server, "[{\"Email\": ").await?;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await?;
    assert_eq!(body, json!({"error": "Unable to process the submitted data."}));

    Ok(())
}

#[tokio::test]
async fn missing_email_column_is_500() -> Result<()> {
    let server = common::spawn().await?;

    let res = post_transform(&server, r#"[{"Name":"A"}]"#).await?;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await?;
    assert!(body.get("error").is_some(), "missing error field: {}", body);
    assert!(!body.to_string().contains("Email"), "detail leaked: {}", body);

    Ok(())
}

#[tokio::test]
async fn column_form_payload_is_accepted() -> Result<()> {
    let server = common::spawn().await?;

    let res = post_transform(&server, r#"{"Email":["a@x.org","b@y.org"]}"#).await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(
        body,
        json!([
            {"Email": "a@x.org", "Email Provider": "x.org"},
            {"Email": "b@y.org", "Email Provider": "y.org"}
        ])
    );

    Ok(())
}

async fn assert_generic_failure(res: reqwest::Response) -> Result<()> {
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await?;
    assert_eq!(body, json!({"error": "Unable to process the submitted data."}));
    Ok(())
}

#[tokio::test]
async fn empty_payloads_are_500() -> Result<()> {
    let server = common::spawn().await?;

    for body in ["[]", "{}"] {
        assert_generic_failure(post_transform(&server, body).await?).await?;
    }

    Ok(())
}

#[tokio::test]
async fn non_record_entries_are_500() -> Result<()> {
    let server = common::spawn().await?;

    assert_generic_failure(post_transform(&server, r#"[{"Email":"a@b.c"},3]"#).await?).await?;

    Ok(())
}

#[tokio::test]
async fn scalar_payload_is_500() -> Result<()> {
    let server = common::spawn().await?;

    assert_generic_failure(post_transform(&server, r#""x""#).await?).await?;

    Ok(())
}

#[tokio::test]
async fn ragged_columns_are_500() -> Result<()> {
    let server = common::spawn().await?;

    assert_generic_failure(post_transform(&server, r#"{"Email":["a"],"N":[]}"#).await?).await?;

    Ok(())
}
