mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn placeholder_routes_answer_with_text() -> Result<()> {
    let server = common::start_server_with(&[("VALIDATION_LOCALE", "ko")]).await?;

    let res = server.client.get(server.url("/users")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await?, "전체 유저 정보 조회 완료");

    let res = server.client.put(server.url("/users/3")).send().await?;
    assert_eq!(res.text().await?, "유저 정보 수정 완료");

    let res = server.client.delete(server.url("/users/3")).send().await?;
    assert_eq!(res.text().await?, "유저 정보 삭제 완료");
    Ok(())
}

#[tokio::test]
async fn non_numeric_id_is_null_without_database() -> Result<()> {
    let server = common::start_server().await?;

    let res = server.client.get(server.url("/users/abc")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, Value::Null);
    Ok(())
}

#[tokio::test]
async fn missing_employee_is_null() -> Result<()> {
    if !common::database_configured() {
        eprintln!("DATABASE_URL not set; skipping");
        return Ok(());
    }
    common::migrate()?;
    let server = common::start_server().await?;

    let res = server
        .client
        .get(server.url(&format!("/users/{}", i64::MAX)))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, Value::Null);
    Ok(())
}
