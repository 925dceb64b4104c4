//! API 客户端装配
//!
//! `StoreClient` 内部持有 `Rc`，不能放进信号或跨越响应式闭包；
//! 组件持有可 `Copy` 的 [`Api`] 句柄，在 `spawn_local` 内按需构造客户端。

use bookstore_shared::{ClientConfig, Session, StoreClient};

use crate::config::{AppConfig, use_config};
use crate::session::{SessionContext, use_session};
use crate::web::route::AppRoute;
use crate::web::router::{RouterService, use_router};
use crate::web::{FetchTransport, LocalTokenStore};

pub type BookstoreClient = StoreClient<FetchTransport, LocalTokenStore>;

#[derive(Clone, Copy)]
pub struct Api {
    config: AppConfig,
    session: SessionContext,
    router: RouterService,
}

impl Api {
    /// 构造客户端；令牌被拒绝时结束会话并跳转到登录页
    pub fn client(&self) -> BookstoreClient {
        let session_ctx = self.session;
        let router = self.router;
        let login = AppRoute::auth(self.config.default_role).to_path();

        let session = Session::new(session_ctx.token_store()).with_on_unauthorized(move || {
            session_ctx.mark_logged_out();
            router.navigate(&login);
        });

        StoreClient::new(
            FetchTransport,
            session,
            ClientConfig::new(self.config.api_base),
        )
    }

    pub fn session(&self) -> SessionContext {
        self.session
    }

    pub fn router(&self) -> RouterService {
        self.router
    }

    pub fn config(&self) -> AppConfig {
        self.config
    }
}

/// 从 Context 组装 API 句柄
pub fn use_api() -> Api {
    Api {
        config: use_config(),
        session: use_session(),
        router: use_router(),
    }
}
