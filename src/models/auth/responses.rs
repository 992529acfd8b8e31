use serde::Serialize;

use crate::models::users::entities::Role;

/// 会话中的用户信息
#[derive(Debug, Clone, Serialize)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub name: String,
    pub picture: String,
    pub home_path: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub user: SessionUser,
}
