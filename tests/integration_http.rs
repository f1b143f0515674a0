//! HTTP 接口集成测试
//!
//! 测试范围:
//! - api::server::http - 路由、扩展调用、错误响应、健康检查
//!
//! 通过 `tower::ServiceExt::oneshot` 在进程内驱动路由，不监听端口。

mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::assertions::{assert_contains, assert_keys, assert_not_contains};
use common::data_fixtures::{described_graph, people_graph, query_from};
use common::TestGraph;

use cypher_plugin::api::server::{create_router, AppState, HttpServer};
use cypher_plugin::config::{Config, SyntaxErrorPolicy};

const ENDPOINT: &str = "/db/data/ext/CypherPlugin/graphdb/execute_query";

fn app(graph: TestGraph, policy: SyntaxErrorPolicy) -> Router {
    let mut config = Config::default();
    config.plugin.syntax_errors = policy;
    let server = Arc::new(HttpServer::new(Arc::new(graph.graph), config));
    create_router(AppState::new(server))
}

fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::HOST, "localhost:7474")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("构造请求失败")
}

fn query_request(query: &str) -> Request<Body> {
    post(ENDPOINT, json!({ "query": query }).to_string())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.expect("请求处理失败");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("读取响应体失败");
    (status, String::from_utf8(bytes.to_vec()).expect("响应体不是 UTF-8"))
}

fn parse(body: &str) -> Value {
    serde_json::from_str(body).expect("响应体不是 JSON")
}

// ==================== 查询 ====================

#[tokio::test]
async fn test_send_query() {
    let graph = people_graph();
    let query = query_from(&graph, "I", "match (x) --> (n) return n.name?, n.age?");

    let (status, body) = send(app(graph, SyntaxErrorPolicy::Reject), query_request(&query)).await;

    assert_eq!(status, StatusCode::OK);
    assert_contains(&body, "you");
    assert_contains(&body, "him");
    assert_contains(&body, "25");
    assert_not_contains(&body, "\"x\"");
}

#[tokio::test]
async fn test_return_paths() {
    let graph = described_graph(&["I know you"]);
    let query = query_from(&graph, "I", "match path = (x--friend) return path");

    let (status, body) = send(app(graph, SyntaxErrorPolicy::Reject), query_request(&query)).await;

    assert_eq!(status, StatusCode::OK);
    assert_contains(&body, "data");
    let json = parse(&body);
    assert_keys(&json, &["columns", "data"]);
    assert_eq!(json["columns"], json!(["path"]));
    assert_contains(
        json["data"][0][0]["start"].as_str().expect("路径起点应为 URI"),
        "http://localhost:7474/db/data/node/",
    );
}

#[tokio::test]
async fn test_error_gets_returned_as_json() {
    let graph = described_graph(&["I know you"]);
    let query = query_from(&graph, "I", "return x.dummy");

    let (status, body) = send(app(graph, SyntaxErrorPolicy::Reject), query_request(&query)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json = parse(&body);
    assert_keys(&json, &["message", "exception", "causes"]);
    assert_eq!(json["exception"], "ExecutionError");
}

// ==================== 语法错误 ====================

#[tokio::test]
async fn test_syntax_error_rejected() {
    let graph = people_graph();
    let (status, body) = send(
        app(graph, SyntaxErrorPolicy::Reject),
        query_request("start x = (0) retrun x"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json = parse(&body);
    assert_keys(&json, &["message", "exception", "causes"]);
    assert_eq!(json["exception"], "SyntaxError");
}

#[tokio::test]
async fn test_syntax_error_swallowed() {
    let graph = people_graph();
    let (status, body) = send(
        app(graph, SyntaxErrorPolicy::Swallow),
        query_request("start x = (0) retrun x"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty(), "空表示应返回空响应体, 实际是 '{}'", body);
}

// ==================== 请求校验 ====================

#[tokio::test]
async fn test_missing_query_parameter() {
    let graph = people_graph();
    let (status, body) = send(app(graph, SyntaxErrorPolicy::Reject), post(ENDPOINT, "{}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json = parse(&body);
    assert_keys(&json, &["message", "exception", "causes"]);
    assert_eq!(json["exception"], "BadInputError");
}

#[tokio::test]
async fn test_malformed_body() {
    let graph = people_graph();
    let (status, body) = send(app(graph, SyntaxErrorPolicy::Reject), post(ENDPOINT, "query=x")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parse(&body)["exception"], "BadInputError");
}

#[tokio::test]
async fn test_unknown_extension() {
    let graph = people_graph();
    let (status, body) = send(
        app(graph, SyntaxErrorPolicy::Reject),
        post(
            "/db/data/ext/GremlinPlugin/graphdb/execute_script",
            json!({ "query": "g.v(0)" }).to_string(),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_keys(&parse(&body), &["message", "exception", "causes"]);
}

#[tokio::test]
async fn test_unknown_route() {
    let graph = people_graph();
    let (status, _) = send(app(graph, SyntaxErrorPolicy::Reject), post("/db/data/cypher", "{}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unsupported_method() {
    let graph = people_graph();
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(ENDPOINT)
        .body(Body::empty())
        .expect("构造请求失败");

    let (status, body) = send(app(graph, SyntaxErrorPolicy::Reject), request).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    let json = parse(&body);
    assert_keys(&json, &["message", "exception", "causes"]);
    assert_eq!(json["exception"], "MethodNotAllowedError");
}

// ==================== 其他接口 ====================

#[tokio::test]
async fn test_describe_extension() {
    let graph = people_graph();
    let request = Request::builder()
        .method(Method::GET)
        .uri(ENDPOINT)
        .body(Body::empty())
        .expect("构造请求失败");

    let (status, body) = send(app(graph, SyntaxErrorPolicy::Reject), request).await;

    assert_eq!(status, StatusCode::OK);
    let json = parse(&body);
    assert_eq!(json["name"], "execute_query");
    assert_eq!(json["parameters"][0]["name"], "query");
}

#[tokio::test]
async fn test_health_check() {
    let graph = people_graph();
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("构造请求失败");

    let (status, body) = send(app(graph, SyntaxErrorPolicy::Reject), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["status"], "healthy");
}
