mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

fn fields(body: &Value) -> Vec<&str> {
    body["field_errors"]
        .as_array()
        .map(|errors| errors.iter().filter_map(|e| e["field"].as_str()).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn login_scenarios() -> Result<()> {
    let server = common::start_server_with(&[("VALIDATION_LOCALE", "ko")]).await?;

    let res = server
        .client
        .post(server.url("/login"))
        .json(&json!({ "account": "abc123", "password": "1234" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await?, "로그인 성공");

    let res = server
        .client
        .post(server.url("/login"))
        .json(&json!({ "account": "ab1", "password": "1234" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(fields(&body), vec!["account"]);
    assert_eq!(body["field_errors"][0]["message"], "영어 대/소문자, 숫자, 4~8 글자 허용");
    Ok(())
}

#[tokio::test]
async fn registration_checks_name_alphabet() -> Result<()> {
    let server = common::start_server_with(&[("VALIDATION_LOCALE", "ko")]).await?;

    let res = server
        .client
        .post(server.url("/registration"))
        .json(&json!({ "account": "abc123", "password": "1234", "name": "A1" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(fields(&body), vec!["name"]);
    assert_eq!(body["field_errors"][0]["message"], "한글 2~30글자 허용");

    let res = server
        .client
        .post(server.url("/registration"))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("account=abc123&password=ab%21%40&name=+%EA%B0%80%EB%9E%8C+")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await?, "회원가입 성공");
    Ok(())
}

#[tokio::test]
async fn english_locale_and_latin_names() -> Result<()> {
    let server = common::start_server_with(&[
        ("VALIDATION_LOCALE", "en"),
        ("VALIDATION_NAME_ALPHABET", "latin"),
    ])
    .await?;

    let res = server
        .client
        .post(server.url("/registration"))
        .json(&json!({ "account": "abc123", "password": "1234", "name": "가람" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["field_errors"][0]["message"], "Upper/lower case letters only, 2 to 30 characters");

    let res = server
        .client
        .post(server.url("/registration"))
        .json(&json!({ "account": "abc123", "password": "1234", "name": "Garam" }))
        .send()
        .await?;
    assert_eq!(res.text().await?, "Registration succeeded");
    Ok(())
}
