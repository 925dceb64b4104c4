use thiserror::Error;

/// 最后兜底的提示文本
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong!";

// =========================================================
// 错误类别
// =========================================================

/// 错误类别
///
/// 视图根据类别决定如何展示；`Unauthorized` 已在客户端层处理过会话，
/// 视图只需要给出提示。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 本地校验失败，没有发出任何请求
    Validation,
    /// 请求未能送达或没有收到响应
    Transport,
    /// 后端返回的 `code` 不在 [200, 300) 内
    Backend,
    /// 令牌过期或格式错误
    Unauthorized,
    /// 响应体不是预期的 JSON
    Decode,
}

impl ApiErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiErrorKind::Validation => "VALIDATION",
            ApiErrorKind::Transport => "TRANSPORT",
            ApiErrorKind::Backend => "BACKEND",
            ApiErrorKind::Unauthorized => "UNAUTHORIZED",
            ApiErrorKind::Decode => "DECODE",
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 所有 API 客户端操作统一返回的错误
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[{}] {}", .kind.as_str(), .message)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// 后端消息或本地校验消息，可能为空
    pub message: String,
    /// 后端给出的业务码或 HTTP 状态码
    pub code: Option<u16>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Validation, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Transport, message)
    }

    pub fn backend(code: u16, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            ..Self::new(ApiErrorKind::Backend, message)
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unauthorized, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Decode, message)
    }

    pub fn is_validation(&self) -> bool {
        self.kind == ApiErrorKind::Validation
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }

    /// 面向用户的提示文本
    ///
    /// 优先使用后端（或校验）消息，其次是调用方给出的兜底文本，最后是全局默认文本。
    /// 传输层与解析错误的消息只用于日志，不展示给用户。
    pub fn user_message(&self, fallback: &str) -> String {
        let own = match self.kind {
            ApiErrorKind::Transport | ApiErrorKind::Decode => "",
            _ => self.message.trim(),
        };
        [own, fallback.trim()]
            .into_iter()
            .find(|m| !m.is_empty())
            .unwrap_or(DEFAULT_ERROR_MESSAGE)
            .to_string()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::decode(e.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_backend_text() {
        let err = ApiError::backend(409, "Book already in cart");
        assert_eq!(err.user_message("Failed to add"), "Book already in cart");
        assert_eq!(err.code, Some(409));
    }

    #[test]
    fn user_message_falls_back_in_order() {
        let err = ApiError::backend(500, "  ");
        assert_eq!(err.user_message("Failed to place order"), "Failed to place order");
        assert_eq!(err.user_message(""), DEFAULT_ERROR_MESSAGE);
    }

    #[test]
    fn transport_details_stay_out_of_user_text() {
        let err = ApiError::transport("TypeError: Failed to fetch");
        assert_eq!(err.user_message("Failed to fetch cart"), "Failed to fetch cart");
    }

    #[test]
    fn display_includes_kind() {
        let err = ApiError::unauthorized("jwt expired");
        assert_eq!(err.to_string(), "[UNAUTHORIZED] jwt expired");
        assert!(err.is_unauthorized());
    }
}
