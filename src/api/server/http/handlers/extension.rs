//! 服务端扩展的调用入口
//!
//! `POST /db/data/ext/{plugin}/{target}/{method}`，请求体为 `{"query": "..."}`

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tokio::task;

use crate::api::core::PluginError;
use crate::api::plugin::CypherPlugin;
use crate::api::server::http::{error::HttpError, state::AppState};
use crate::storage::GraphDatabase;

/// 扩展调用的路径参数
type ExtensionPath = (String, String, String);

fn ensure_known_extension(plugin: &str, target: &str, method: &str) -> Result<(), HttpError> {
    if plugin != CypherPlugin::NAME {
        return Err(HttpError::NotFound(format!("扩展不存在: {}", plugin)));
    }
    if target != CypherPlugin::TARGET || method != CypherPlugin::EXECUTE_QUERY {
        return Err(HttpError::NotFound(format!(
            "扩展 {} 没有方法: {}/{}",
            plugin, target, method
        )));
    }
    Ok(())
}

/// 根据 Host 头构造实体 URI 的前缀
fn base_uri(headers: &HeaderMap, fallback_host: &str) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or(fallback_host);
    format!("http://{}/db/data", host)
}

/// 从请求体中取出必需的 `query` 参数
fn query_parameter(body: &[u8]) -> Result<String, HttpError> {
    let payload: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| HttpError::BadRequest(format!("请求体不是有效的 JSON: {}", e)))?;

    match payload.get("query") {
        Some(serde_json::Value::String(query)) => Ok(query.clone()),
        Some(_) => Err(PluginError::InvalidParameter("参数 'query' 必须是字符串".to_string()).into()),
        None => Err(PluginError::InvalidParameter("缺少必需参数 'query'".to_string()).into()),
    }
}

pub async fn execute<G: GraphDatabase + ?Sized + 'static>(
    State(state): State<AppState<G>>,
    Path((plugin, target, method)): Path<ExtensionPath>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, HttpError> {
    ensure_known_extension(&plugin, &target, &method)?;
    let query = query_parameter(&body)?;
    let base_uri = base_uri(&headers, &state.server.config().bind_address());

    let server = state.server.clone();
    let representation = task::spawn_blocking(move || {
        server.plugin().execute_query(server.graph().as_ref(), &query)
    })
    .await
    .map_err(|e| HttpError::InternalError(format!("任务执行失败: {}", e)))??;

    match representation.serialize(&base_uri) {
        Some(body) => Ok((StatusCode::OK, Json(body)).into_response()),
        None => Ok(StatusCode::OK.into_response()),
    }
}

/// 扩展方法的描述
pub async fn describe(
    Path((plugin, target, method)): Path<ExtensionPath>,
) -> Result<Json<serde_json::Value>, HttpError> {
    ensure_known_extension(&plugin, &target, &method)?;
    Ok(Json(json!({
        "name": CypherPlugin::EXECUTE_QUERY,
        "description": "execute a query",
        "extends": CypherPlugin::TARGET,
        "parameters": [{
            "name": "query",
            "type": "string",
            "optional": false,
            "description": "The query string",
        }],
    })))
}

pub async fn not_found() -> HttpError {
    HttpError::NotFound("资源不存在".to_string())
}

/// 扩展路径只接受 GET 和 POST
pub async fn method_not_allowed(method: Method) -> HttpError {
    HttpError::MethodNotAllowed(format!("扩展路径不支持方法: {}", method))
}
