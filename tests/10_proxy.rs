mod common;

use anyhow::Result;
use reqwest::header::SET_COOKIE;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn success_envelope_relays_verbatim_with_200() -> Result<()> {
    let ctx = common::TestContext::spawn().await?;

    let res = ctx
        .client
        .post(ctx.url("/api/generic"))
        .json(&json!({ "url": "/guards", "method": "get" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"][0]["license"], "TX-1042");
    assert_eq!(body["data"][1]["id"], "g-2");
    assert_eq!(body["metadata"]["count"], 45);
    Ok(())
}

#[tokio::test]
async fn post_instruction_forwards_the_data_payload() -> Result<()> {
    let ctx = common::TestContext::spawn().await?;

    let res = ctx
        .client
        .post(ctx.url("/api/generic"))
        .json(&json!({
            "url": "/echo",
            "method": "post",
            "data": { "rating": 5, "comment": "reliable on night shifts" },
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["received"]["rating"], 5);
    assert_eq!(
        body["data"]["received"]["comment"],
        "reliable on night shifts"
    );
    Ok(())
}

#[tokio::test]
async fn structured_backend_error_relays_status_and_details() -> Result<()> {
    let ctx = common::TestContext::spawn().await?;

    let res = ctx
        .client
        .post(ctx.url("/api/generic"))
        .json(&json!({ "url": "/missing", "method": "get" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(
        body,
        json!({ "error": "Not found", "details": { "resource": "license" } })
    );
    Ok(())
}

#[tokio::test]
async fn malformed_backend_reply_becomes_a_generic_500() -> Result<()> {
    let ctx = common::TestContext::spawn().await?;

    let res = ctx
        .client
        .post(ctx.url("/api/generic"))
        .json(&json!({ "url": "/garbled", "method": "get" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "Internal Server Error");
    assert!(body["details"].as_str().unwrap().contains("malformed JSON"));
    Ok(())
}

#[tokio::test]
async fn unknown_method_is_rejected_with_400() -> Result<()> {
    let ctx = common::TestContext::spawn().await?;

    for method in ["patch", "head", "GET", ""] {
        let res = ctx
            .client
            .post(ctx.url("/api/generic"))
            .json(&json!({ "url": "/guards", "method": method }))
            .send()
            .await?;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "method {method:?}");
        let body = res.json::<Value>().await?;
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .contains("unsupported method"),
            "method {method:?}"
        );
    }
    Ok(())
}

#[tokio::test]
async fn backend_401_clears_the_access_token_cookie() -> Result<()> {
    let ctx = common::TestContext::spawn().await?;

    let res = ctx
        .client
        .post(ctx.url("/api/generic"))
        .header("Cookie", common::session_cookie("stale-token"))
        .json(&json!({ "url": "/private", "method": "get" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let removals: Vec<_> = res
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter(|v| v.starts_with("access-token=;"))
        .collect();
    assert_eq!(removals.len(), 1, "expected one access-token removal cookie");
    assert!(removals[0].contains("Max-Age=0"));

    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "token expired");
    Ok(())
}

#[tokio::test]
async fn successful_call_with_a_valid_token_does_not_touch_cookies() -> Result<()> {
    let ctx = common::TestContext::spawn().await?;

    let res = ctx
        .client
        .post(ctx.url("/api/generic"))
        .header("Cookie", common::session_cookie("acc-1"))
        .json(&json!({ "url": "/private", "method": "get" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get(SET_COOKIE).is_none());
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["secret"], "clearance-granted");
    Ok(())
}
