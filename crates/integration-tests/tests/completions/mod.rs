use indoc::indoc;
use integration_tests::TestServer;
use reqwest::Method;
use serde_json::json;

const PATH: &str = "/v1/chat/completions";

#[tokio::test]
async fn chat_completions() {
    let server = TestServer::start("").await;
    let client = server.completions_client(PATH);

    let body = client
        .completions(json!({
            "model": "gpt-4",
            "messages": [{ "content": "hello" }]
        }))
        .await;

    insta::assert_json_snapshot!(body, {
        ".id" => "[id]",
        ".created" => "[created]"
    }, @r#"
    {
      "choices": [
        {
          "finish_reason": "STOP",
          "index": 0,
          "message": {
            "content": "Blank response from OpenAI API emulator.",
            "role": "assistant"
          }
        }
      ],
      "created": "[created]",
      "id": "[id]",
      "model": "gpt-4",
      "object": "chat.completion",
      "usage": {
        "completion_tokens": 8,
        "prompt_tokens": 1,
        "total_tokens": 9
      }
    }
    "#);
}

#[tokio::test]
async fn chat_completions_chunk() {
    let server = TestServer::start("").await;
    let client = server.completions_client(PATH);

    let body = client.completions(json!({ "stream": true })).await;

    insta::assert_json_snapshot!(body, {
        ".id" => "[id]",
        ".created" => "[created]"
    }, @r#"
    {
      "choices": [
        {
          "delta": {
            "content": "Blank response from OpenAI API emulator."
          },
          "finish_reason": "STOP",
          "index": 0
        }
      ],
      "created": "[created]",
      "id": "[id]",
      "model": "gpt-3.5-turbo",
      "object": "chat.completion.chunk",
      "usage": {
        "completion_tokens": 8,
        "prompt_tokens": 57,
        "total_tokens": 65
      }
    }
    "#);
}

#[tokio::test]
async fn empty_body_uses_defaults() {
    let server = TestServer::start("").await;
    let client = server.completions_client(PATH);

    let reply = client.raw(Method::POST, "").await;

    assert_eq!(reply.status, 200);
    assert_eq!(reply.body["model"], "gpt-3.5-turbo");
    assert_eq!(reply.body["object"], "chat.completion");
    assert_eq!(reply.body["usage"], json!({
        "prompt_tokens": 57,
        "completion_tokens": 8,
        "total_tokens": 65
    }));
}

#[tokio::test]
async fn json_content_type() {
    let server = TestServer::start("").await;
    let client = server.completions_client(PATH);

    let reply = client.raw(Method::POST, "{}").await;

    assert_eq!(reply.headers["content-type"], "application/json");
}

#[tokio::test]
async fn malformed_body_is_answered() {
    let server = TestServer::start("").await;
    let client = server.completions_client(PATH);

    for body in ["{\"model\": \"gpt-4\"", "not json at all", "[1, 2, 3]", "42"] {
        let reply = client.raw(Method::POST, body).await;

        assert_eq!(reply.status, 200, "{body}");
        assert_eq!(reply.body["model"], "gpt-3.5-turbo", "{body}");
        assert_eq!(reply.body["usage"]["prompt_tokens"], 57, "{body}");
    }
}

#[tokio::test]
async fn wrong_typed_fields_are_ignored() {
    let server = TestServer::start("").await;
    let client = server.completions_client(PATH);

    let body = client
        .completions(json!({
            "model": { "name": "gpt-4" },
            "messages": { "content": "hello" },
            "stream": "true"
        }))
        .await;

    assert_eq!(body["model"], "gpt-3.5-turbo");
    assert_eq!(body["object"], "chat.completion");
    assert_eq!(body["usage"]["prompt_tokens"], 57);
}

#[tokio::test]
async fn prompt_tokens_follow_message_length() {
    let server = TestServer::start("").await;
    let client = server.completions_client(PATH);

    let body = client
        .completions(json!({
            "messages": [
                { "role": "system", "content": "You are a helpful assistant." },
                { "role": "user", "content": "What is the weather like today?" },
                { "role": "user" },
                "garbage"
            ]
        }))
        .await;

    // 28 + 31 bytes = 59, 59 / 3.5 = 16.86
    assert_eq!(body["usage"]["prompt_tokens"], 16);
    assert_eq!(body["usage"]["total_tokens"], 24);
}

#[tokio::test]
async fn usage_total_is_always_the_sum() {
    let server = TestServer::start("").await;
    let client = server.completions_client(PATH);

    let requests = [
        json!({}),
        json!({ "messages": [] }),
        json!({ "messages": [{ "content": "a".repeat(1000) }], "stream": true }),
        json!({ "messages": [{ "content": "ünïcödé" }] }),
    ];

    for request in requests {
        let body = client.completions(request).await;
        let usage = &body["usage"];

        assert_eq!(
            usage["total_tokens"].as_u64().unwrap(),
            usage["prompt_tokens"].as_u64().unwrap() + usage["completion_tokens"].as_u64().unwrap()
        );
    }
}

#[tokio::test]
async fn identifiers_are_fresh() {
    let server = TestServer::start("").await;
    let client = server.completions_client(PATH);

    let first = client.completions(json!({})).await;
    let second = client.completions(json!({})).await;

    for body in [&first, &second] {
        let id = body["id"].as_str().unwrap();
        let random = id.strip_prefix("chatcmpl-").unwrap();

        assert_eq!(random.len(), 30);
        assert!(random.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    assert_ne!(first["id"], second["id"]);
}

#[tokio::test]
async fn any_method_is_accepted() {
    let server = TestServer::start("").await;
    let client = server.completions_client(PATH);

    for method in [Method::GET, Method::PUT, Method::PATCH, Method::DELETE] {
        let reply = client.raw(method.clone(), r#"{"stream": true}"#).await;

        assert_eq!(reply.status, 200, "{method}");
        assert_eq!(reply.body["object"], "chat.completion.chunk", "{method}");
    }
}

#[tokio::test]
async fn custom_path() {
    let config = indoc! {r#"
        [completions]
        path = "/custom/completions"
    "#};

    let server = TestServer::start(config).await;

    let body = server
        .completions_client("/custom/completions")
        .completions(json!({ "model": "gpt-4o" }))
        .await;

    assert_eq!(body["model"], "gpt-4o");

    let response = server.client.post(PATH, &json!({})).await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn debug_mode_returns_the_same_shape() {
    let config = indoc! {r#"
        [completions]
        debug = true
    "#};

    let server = TestServer::start(config).await;
    let client = server.completions_client(PATH);

    let body = client
        .completions(json!({ "model": "gpt-4", "messages": [{ "content": "hello" }] }))
        .await;

    assert_eq!(body["object"], "chat.completion");
    assert_eq!(body["usage"]["total_tokens"], 9);
}
