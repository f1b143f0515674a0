//! 自定义断言辅助模块

use serde_json::Value;

/// 断言响应文本包含指定片段
pub fn assert_contains(text: &str, expected: &str) {
    assert!(
        text.contains(expected),
        "响应应包含 '{}', 实际是 '{}'",
        expected,
        text
    );
}

/// 断言响应文本不包含指定片段
pub fn assert_not_contains(text: &str, unexpected: &str) {
    assert!(
        !text.contains(unexpected),
        "响应不应包含 '{}', 实际是 '{}'",
        unexpected,
        text
    );
}

/// 断言 JSON 是恰好包含指定键的对象
pub fn assert_keys(json: &Value, expected: &[&str]) {
    let object = json.as_object().expect("响应应为 JSON 对象");
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    let mut expected: Vec<&str> = expected.to_vec();
    expected.sort_unstable();
    assert_eq!(keys, expected, "JSON 键不匹配");
}
