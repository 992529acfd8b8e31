pub mod login;
pub mod logout;
pub mod me;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::auth::requests::LoginRequest;
use crate::models::auth::responses::SessionUser;
use crate::models::users::entities::Credential;
use crate::storage::Storage;

/// 未设置头像时使用的默认图片
pub const DEFAULT_AVATAR: &str = "/noAvatar.png";

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::common::storage_from(&self.storage, request)
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 登录验证
    pub async fn login(
        &self,
        login_request: LoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, login_request, request).await
    }

    pub async fn logout(&self) -> ActixResult<HttpResponse> {
        logout::handle_logout().await
    }

    // 当前会话用户
    pub async fn me(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::handle_me(self, request).await
    }
}

/// 会话展示信息：名称与头像取自角色档案，档案缺失时退回用户名
pub(crate) async fn session_user(
    storage: &Arc<dyn Storage>,
    credential: &Credential,
) -> Result<SessionUser> {
    let summary = storage
        .get_profile_summary(credential.id, credential.role)
        .await?;
    let (name, picture) = match summary {
        Some(summary) => (
            summary.name,
            summary.img.unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
        ),
        None => (credential.username.clone(), DEFAULT_AVATAR.to_string()),
    };

    Ok(SessionUser {
        id: credential.id,
        username: credential.username.clone(),
        role: credential.role,
        name,
        picture,
        home_path: credential.role.home_path(),
    })
}
