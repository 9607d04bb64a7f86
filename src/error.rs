use std::fmt;

use crate::request::HttpError;

// =========================================================
// 错误类别枚举
// =========================================================

/// 错误类别
/// 包含错误对应的语义（状态码）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 400: 表单校验失败（提交前拦截，不发请求）
    Validation,
    /// 401: 凭据无效（登录 / 注册时）
    Unauthorized,
    /// 401: 已登录会话的令牌失效或缺失
    SessionExpired,
    /// 0: 网络 / 传输层失败
    Network,
    /// 非 2xx 的其它服务端响应
    Server,
    /// 响应体无法解析
    Serialization,
    /// 409: 同类请求仍在进行中
    Busy,
}

impl ErrorKind {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::Validation => 400,
            ErrorKind::Unauthorized | ErrorKind::SessionExpired => 401,
            ErrorKind::Busy => 409,
            ErrorKind::Serialization | ErrorKind::Server => 500,
            ErrorKind::Network => 0,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::SessionExpired => "SESSION_EXPIRED",
            ErrorKind::Network => "NETWORK_ERROR",
            ErrorKind::Server => "SERVER_ERROR",
            ErrorKind::Serialization => "INVALID_RESPONSE",
            ErrorKind::Busy => "REQUEST_IN_FLIGHT",
        }
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSpan {
    /// 操作名称，如 "api.send", "session.login"
    pub operation: String,
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 客户端领域错误
///
/// - kind: 错误类别
/// - message: 可直接显示在表单旁的人类可读消息
/// - status: 服务端返回的 HTTP 状态码（如有）
/// - spans: 结构化的调用追踪栈
#[derive(Debug, Clone)]
pub struct HomeError {
    kind: ErrorKind,
    message: String,
    status: Option<u16>,
    spans: Vec<ErrorSpan>,
}

impl HomeError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn session_expired() -> Self {
        Self::new(ErrorKind::SessionExpired, "Session expired, please log in again")
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        let mut err = Self::new(ErrorKind::Server, message);
        err.status = Some(status);
        err
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization, message)
    }

    pub fn busy(operation: impl Into<String>) -> Self {
        Self::new(ErrorKind::Busy, "Request already in progress").in_op(operation)
    }

    // --- Context builders ---

    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    // --- Accessors ---

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// 服务端实际返回的状态码，没有响应时退回到类别的语义状态码
    pub fn status_code(&self) -> u16 {
        self.status.unwrap_or_else(|| self.kind.status_code())
    }

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }

    pub fn is_session_expired(&self) -> bool {
        self.kind == ErrorKind::SessionExpired
    }
}

impl fmt::Display for HomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;

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

impl std::error::Error for HomeError {}

impl From<HttpError> for HomeError {
    fn from(e: HttpError) -> Self {
        HomeError::network(e.to_string())
    }
}

impl From<serde_json::Error> for HomeError {
    fn from(e: serde_json::Error) -> Self {
        HomeError::serialization(e.to_string())
    }
}

pub type HomeResult<T> = std::result::Result<T, HomeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_trace() {
        let err = HomeError::server(503, "Service Unavailable")
            .in_op_with("api.send", "/api/bookmarks")
            .in_op("bookmarks.fetch");

        assert_eq!(
            err.to_string(),
            "[SERVER_ERROR] Service Unavailable | trace: api.send(/api/bookmarks) -> bookmarks.fetch"
        );
        assert_eq!(err.status_code(), 503);
    }

    #[test]
    fn transport_errors_become_network() {
        let err: HomeError = HttpError::Network("connection refused".into()).into();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.status_code(), 0);
        assert!(err.message().contains("connection refused"));
    }

    #[test]
    fn session_expired_is_flagged() {
        assert!(HomeError::session_expired().is_session_expired());
        assert!(!HomeError::unauthorized("bad password").is_session_expired());
    }
}
