use crate::config::AppConfig;
use crate::models::users::entities::Role;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// 会话令牌载荷
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,     // 用户 ID
    pub role: String,    // 角色
    pub name: String,    // 显示名称
    pub picture: String, // 头像地址
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }

    pub fn role(&self) -> Option<Role> {
        self.role.parse().ok()
    }
}

pub struct JwtUtils;

impl JwtUtils {
    fn get_secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    /// 生成会话令牌，有效期取自 `jwt.session_expiry`
    pub fn generate_session_token(
        user_id: i64,
        role: Role,
        name: &str,
        picture: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let expiry = chrono::Duration::seconds(AppConfig::get().jwt.session_expiry);
        Self::generate_token_with_expiry(user_id, role, name, picture, expiry)
    }

    pub fn generate_token_with_expiry(
        user_id: i64,
        role: Role,
        name: &str,
        picture: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            name: name.to_string(),
            picture: picture.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let encoding_key = EncodingKey::from_secret(Self::get_secret().as_ref());
        encode(&Header::default(), &claims, &encoding_key)
    }

    /// 校验签名与过期时间
    pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(Self::get_secret().as_ref());
        decode::<Claims>(token, &decoding_key, &Validation::default())
            .map(|token_data| token_data.claims)
    }

    /// 会话 Cookie
    pub fn create_session_cookie(token: &str) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(config.jwt.cookie_name.clone(), token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(
                config.jwt.session_expiry,
            ))
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 空 Cookie（用于注销）
    pub fn create_empty_session_cookie() -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(config.jwt.cookie_name.clone(), "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 依次从 `Authorization: Bearer` 与会话 Cookie 中取令牌
    pub fn extract_token(req: &actix_web::HttpRequest) -> Option<String> {
        let from_header = req
            .headers()
            .get(actix_web::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        from_header.or_else(|| {
            req.cookie(&AppConfig::get().jwt.cookie_name)
                .map(|cookie| cookie.value().to_string())
                .filter(|t| !t.is_empty())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_session_token_round_trip() {
        let token = JwtUtils::generate_session_token(7, Role::Teacher, "Ada Byron", "/a.png")
            .unwrap();
        let claims = JwtUtils::verify_token(&token).unwrap();
        assert_eq!(claims.user_id(), Some(7));
        assert_eq!(claims.role(), Some(Role::Teacher));
        assert_eq!(claims.name, "Ada Byron");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = JwtUtils::generate_token_with_expiry(
            1,
            Role::Admin,
            "admin",
            "",
            chrono::Duration::seconds(-3600),
        )
        .unwrap();
        assert!(JwtUtils::verify_token(&token).is_err());
    }

    #[test]
    fn test_extract_token_prefers_header() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer from-header"))
            .cookie(Cookie::new("session", "from-cookie"))
            .to_http_request();
        assert_eq!(JwtUtils::extract_token(&req).as_deref(), Some("from-header"));

        let req = TestRequest::default()
            .cookie(Cookie::new("session", "from-cookie"))
            .to_http_request();
        assert_eq!(JwtUtils::extract_token(&req).as_deref(), Some("from-cookie"));

        let req = TestRequest::default().to_http_request();
        assert!(JwtUtils::extract_token(&req).is_none());
    }
}
