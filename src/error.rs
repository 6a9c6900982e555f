use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thatnewai_shared::normalize::NormalizeError;

// =========================================================
// 错误类型枚举
// =========================================================

/// 错误类型
/// 页面据此决定是否显示 "重试"、是否需要重新登录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiErrorKind {
    /// 网络不可达 / 请求未完成
    Network,
    /// 后端返回的非 2xx 状态（401 / 404 除外）
    Status(u16),
    /// 401: 未登录或令牌失效
    Unauthorized,
    /// 响应结构不符合预期（包括空集合）
    InvalidData,
    /// 404 或实体缺少 id
    NotFound,
    /// 请求体序列化失败
    Serialization,
    /// 令牌存储读写失败
    Storage,
    /// 调用方输入不合法（例如空令牌）
    InvalidInput,
}

impl ApiErrorKind {
    /// 由 HTTP 状态码得出错误类型
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            404 => Self::NotFound,
            other => Self::Status(other),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Network => "NETWORK_ERROR",
            Self::Status(_) => "HTTP_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidData => "INVALID_DATA",
            Self::NotFound => "RESOURCE_NOT_FOUND",
            Self::Serialization => "JSON_ENCODE_ERROR",
            Self::Storage => "STORAGE_ERROR",
            Self::InvalidInput => "INVALID_INPUT",
        }
    }

    /// 是否值得给用户一个 "重试" 按钮
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network | Self::InvalidData)
            || matches!(self, Self::Status(code) if *code >= 500)
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSpan {
    /// 操作名称，如 "api.get_tool", "session.restore"
    pub operation: String,
    /// 额外的细节信息，如 slug、页码
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

// =========================================================
// 核心错误类型
// =========================================================

/// 客户端错误
///
/// - kind: 错误类型
/// - message: 面向用户的错误消息（尽量取自后端的 `detail` / `message`）
/// - spans: 结构化的调用追踪栈
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    spans: Vec<ErrorSpan>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unauthorized, message)
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::InvalidData, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::NotFound, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Serialization, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Storage, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::InvalidInput, message)
    }

    /// 非 2xx 响应 -> 错误，消息优先取 JSON 的 `detail` / `message`
    pub fn from_response(status: u16, body: &str) -> Self {
        Self::new(ApiErrorKind::from_status(status), server_message(status, body))
    }

    // --- Context builders (Builder Pattern) ---

    /// 添加操作追踪（无额外细节）
    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan {
            operation: operation.into(),
            detail: None,
        });
        self
    }

    /// 添加操作追踪（带额外细节）
    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan {
            operation: operation.into(),
            detail: Some(detail.into()),
        });
        self
    }

    // --- Accessors ---

    pub fn status_code(&self) -> Option<u16> {
        match self.kind {
            ApiErrorKind::Status(code) => Some(code),
            ApiErrorKind::Unauthorized => Some(401),
            ApiErrorKind::NotFound => Some(404),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ApiErrorKind::NotFound
    }

    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }
}

/// `{"detail": "..."}` / `{"message": "..."}` / 原始文本 / `HTTP 500`
fn server_message(status: u16, body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        ["detail", "message"]
            .iter()
            .find_map(|k| v.get(*k).and_then(Value::as_str).map(str::to_string))
    });

    match from_json {
        Some(msg) => msg,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => format!("HTTP {status}"),
    }
}

// =========================================================
// Display & Error trait 实现
// =========================================================

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.error_code(), self.message)?;

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

// =========================================================
// 类型转换实现
// =========================================================

impl From<NormalizeError> for ApiError {
    fn from(e: NormalizeError) -> Self {
        match e {
            NormalizeError::MissingId => ApiError::not_found(e.to_string()),
            other => ApiError::invalid_data(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(401, ApiErrorKind::Unauthorized)]
    #[case(404, ApiErrorKind::NotFound)]
    #[case(500, ApiErrorKind::Status(500))]
    #[case(422, ApiErrorKind::Status(422))]
    fn test_kind_from_status(#[case] status: u16, #[case] expected: ApiErrorKind) {
        assert_eq!(ApiErrorKind::from_status(status), expected);
    }

    #[rstest]
    #[case(r#"{"detail": "Incorrect email or password"}"#, "Incorrect email or password")]
    #[case(r#"{"message": "boom"}"#, "boom")]
    #[case("Bad Gateway", "Bad Gateway")]
    #[case("", "HTTP 502")]
    fn test_server_message(#[case] body: &str, #[case] expected: &str) {
        assert_eq!(ApiError::from_response(502, body).message(), expected);
    }

    #[test]
    fn test_display_includes_trace() {
        let err = ApiError::not_found("tool not found")
            .in_op_with("api.get_tool", "my-tool")
            .in_op("page.tool_detail");
        assert_eq!(
            err.to_string(),
            "[RESOURCE_NOT_FOUND] tool not found | trace: api.get_tool(my-tool) -> page.tool_detail"
        );
    }

    #[test]
    fn test_normalize_errors_map_to_kinds() {
        assert_eq!(
            ApiError::from(NormalizeError::MissingId).kind,
            ApiErrorKind::NotFound
        );
        let err = ApiError::from(NormalizeError::EmptyCollection);
        assert_eq!(err.kind, ApiErrorKind::InvalidData);
        assert!(err.message().contains("invalid data format"));
    }

    #[test]
    fn test_retryable() {
        assert!(ApiError::network("offline").is_retryable());
        assert!(ApiError::from_response(503, "").is_retryable());
        assert!(!ApiError::from_response(401, "").is_retryable());
        assert!(!ApiError::from_response(400, "").is_retryable());
    }
}
