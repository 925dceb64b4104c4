//! 登录 / 注册
//!
//! 表单校验在本地完成，第一个缺失的字段决定提示并阻止请求。

use tracing::{debug, info};

use crate::client::{StoreClient, Transport};
use crate::error::{ApiError, ApiResult, DEFAULT_ERROR_MESSAGE};
use crate::notice::Notice;
use crate::protocol::RegisterRequest;
use crate::session::TokenStore;

pub const MSG_CREDENTIALS_REQUIRED: &str = "Email and Password are required";
pub const MSG_FULL_NAME_REQUIRED: &str = "Full Name is required";
pub const MSG_MOBILE_REQUIRED: &str = "Mobile Number is required";
pub const MSG_LOGIN_OK: &str = "Login successful";
pub const MSG_SIGNUP_OK: &str = "Signup successful";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

impl AuthMode {
    pub fn is_login(&self) -> bool {
        matches!(self, AuthMode::Login)
    }

    /// 提交按钮上的文字
    pub fn action_label(&self) -> &'static str {
        match self {
            AuthMode::Login => "Login",
            AuthMode::Signup => "Signup",
        }
    }
}

/// 登录与注册共用的表单，切换模式不清空任何字段
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub mobile: String,
}

impl AuthForm {
    pub fn validate(&self, mode: AuthMode) -> ApiResult<()> {
        if self.email.trim().is_empty() || self.password.trim().is_empty() {
            return Err(ApiError::validation(MSG_CREDENTIALS_REQUIRED));
        }
        if mode == AuthMode::Signup {
            if self.full_name.trim().is_empty() {
                return Err(ApiError::validation(MSG_FULL_NAME_REQUIRED));
            }
            if self.mobile.trim().is_empty() {
                return Err(ApiError::validation(MSG_MOBILE_REQUIRED));
            }
        }
        Ok(())
    }

    pub fn to_register(&self, role: &str) -> RegisterRequest {
        let (first_name, last_name) = split_full_name(&self.full_name);
        RegisterRequest {
            role: role.to_string(),
            first_name,
            last_name,
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

/// 按第一个空格拆分姓名，没有空格时姓氏为空
pub fn split_full_name(full_name: &str) -> (String, String) {
    match full_name.trim().split_once(' ') {
        Some((first, last)) => (first.to_string(), last.trim().to_string()),
        None => (full_name.trim().to_string(), String::new()),
    }
}

/// 一次提交的结果
#[derive(Debug, Clone, PartialEq)]
pub struct AuthOutcome {
    pub notice: Notice,
    /// 令牌已保存，调用方应在短暂延迟后跳转到书目页
    pub logged_in: bool,
}

impl AuthOutcome {
    fn failed(notice: Notice) -> Self {
        Self {
            notice,
            logged_in: false,
        }
    }
}

/// 校验并提交表单
pub async fn submit<T, S>(
    client: &StoreClient<T, S>,
    role: &str,
    mode: AuthMode,
    form: &AuthForm,
) -> AuthOutcome
where
    T: Transport,
    S: TokenStore,
{
    if let Err(e) = form.validate(mode) {
        debug!(reason = %e.message, "auth form rejected locally");
        return AuthOutcome::failed(Notice::from_error(&e, DEFAULT_ERROR_MESSAGE));
    }

    match mode {
        AuthMode::Login => match client.login(role, &form.email, &form.password).await {
            Ok(reply) if !reply.data.token.is_empty() => {
                client.session().persist(&reply.data.token);
                info!(role, "logged in");
                AuthOutcome {
                    notice: Notice::success(non_empty(reply.message, MSG_LOGIN_OK)),
                    logged_in: true,
                }
            }
            Ok(_) => AuthOutcome::failed(Notice::error(DEFAULT_ERROR_MESSAGE)),
            Err(e) => AuthOutcome::failed(Notice::from_error(&e, DEFAULT_ERROR_MESSAGE)),
        },
        AuthMode::Signup => match client.register(&form.to_register(role)).await {
            Ok(reply) => {
                info!(role, "registered");
                AuthOutcome::failed(Notice::success(non_empty(reply.message, MSG_SIGNUP_OK)))
            }
            Err(e) => AuthOutcome::failed(Notice::from_error(&e, DEFAULT_ERROR_MESSAGE)),
        },
    }
}

fn non_empty(message: Option<String>, fallback: &str) -> String {
    message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::Severity;
    use crate::testing::{MockTransport, client_with};
    use serde_json::json;

    fn form(email: &str, password: &str, full_name: &str, mobile: &str) -> AuthForm {
        AuthForm {
            email: email.into(),
            password: password.into(),
            full_name: full_name.into(),
            mobile: mobile.into(),
        }
    }

    #[tokio::test]
    async fn empty_login_never_calls_backend() {
        let transport = MockTransport::new();
        let (client, _) = client_with(&transport, None);

        let outcome = submit(&client, "user", AuthMode::Login, &form("", "", "", "")).await;

        assert_eq!(outcome.notice, Notice::error(MSG_CREDENTIALS_REQUIRED));
        assert!(!outcome.logged_in);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn signup_checks_full_name_before_mobile() {
        let transport = MockTransport::new();
        let (client, _) = client_with(&transport, None);

        let no_name = submit(&client, "user", AuthMode::Signup, &form("a@b.c", "pw", " ", "")).await;
        let no_mobile =
            submit(&client, "user", AuthMode::Signup, &form("a@b.c", "pw", "John", "  ")).await;

        assert_eq!(no_name.notice.message, MSG_FULL_NAME_REQUIRED);
        assert_eq!(no_mobile.notice.message, MSG_MOBILE_REQUIRED);
        assert_eq!(transport.call_count(), 0);
    }

    #[test]
    fn login_ignores_signup_fields() {
        assert!(form("a@b.c", "pw", "", "").validate(AuthMode::Login).is_ok());
        assert!(form("a@b.c", "  ", "", "").validate(AuthMode::Login).is_err());
    }

    #[test]
    fn full_name_splits_on_first_space() {
        assert_eq!(split_full_name("John"), ("John".into(), "".into()));
        assert_eq!(split_full_name("John Doe"), ("John".into(), "Doe".into()));
        assert_eq!(
            split_full_name("John Ronald Tolkien"),
            ("John".into(), "Ronald Tolkien".into())
        );
    }

    #[tokio::test]
    async fn successful_login_persists_token() {
        let transport = MockTransport::new();
        transport.respond(200, json!({ "code": 200, "message": "Welcome back", "data": { "token": "abc123" } }));
        let (client, store) = client_with(&transport, None);

        let outcome = submit(&client, "user", AuthMode::Login, &form("a@b.c", "pw", "", "")).await;

        assert!(outcome.logged_in);
        assert_eq!(outcome.notice, Notice::success("Welcome back"));
        assert_eq!(store.load().as_deref(), Some("abc123"));
        assert_eq!(transport.calls(), vec!["POST /user/login"]);
    }

    #[tokio::test]
    async fn login_without_message_uses_default_text() {
        let transport = MockTransport::new();
        transport.respond(200, json!({ "code": 200, "data": { "token": "abc123" } }));
        let (client, _) = client_with(&transport, None);

        let outcome = submit(&client, "user", AuthMode::Login, &form("a@b.c", "pw", "", "")).await;

        assert_eq!(outcome.notice.message, MSG_LOGIN_OK);
    }

    #[tokio::test]
    async fn rejected_login_stores_nothing() {
        let transport = MockTransport::new();
        transport.respond(401, json!({ "code": 401, "message": "Invalid credentials" }));
        transport.fail("offline");
        let (client, store) = client_with(&transport, None);

        let rejected = submit(&client, "user", AuthMode::Login, &form("a@b.c", "bad", "", "")).await;
        let offline = submit(&client, "user", AuthMode::Login, &form("a@b.c", "pw", "", "")).await;

        assert_eq!(rejected.notice, Notice::error("Invalid credentials"));
        assert!(!rejected.logged_in);
        assert_eq!(offline.notice.message, DEFAULT_ERROR_MESSAGE);
        assert_eq!(store.load(), None);
    }

    #[tokio::test]
    async fn signup_sends_split_name_and_stays_on_page() {
        let transport = MockTransport::new();
        transport.respond(201, json!({ "code": 201, "data": { "id": 1 } }));
        let (client, store) = client_with(&transport, None);

        let outcome = submit(
            &client,
            "admin",
            AuthMode::Signup,
            &form("j@d.com", "pw", "John Doe", "9876543210"),
        )
        .await;

        assert_eq!(outcome.notice.severity, Severity::Success);
        assert_eq!(outcome.notice.message, MSG_SIGNUP_OK);
        assert!(!outcome.logged_in);
        assert_eq!(store.load(), None);

        let req = &transport.requests()[0];
        assert!(req.url.ends_with("/admin/register"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["firstName"], "John");
        assert_eq!(body["lastName"], "Doe");
    }
}
