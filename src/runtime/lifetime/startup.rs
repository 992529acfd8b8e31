use crate::config::AppConfig;
use crate::errors::Result;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 生成随机密码，保证包含字母、数字与特殊字符
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
    const DIGITS: &[u8] = b"0123456789";
    const SPECIALS: &[u8] = b"!@#$%";
    const CHARSET: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";

    let mut rng = rand::rng();
    let mut pick = |set: &[u8]| set[rng.random_range(0..set.len())] as char;
    let mut password: String = [pick(LETTERS), pick(DIGITS), pick(SPECIALS)]
        .into_iter()
        .collect();
    password.extend((3..length.max(3)).map(|_| pick(CHARSET)));
    password
}

/// 初始化默认管理员账号
/// 如果数据库中没有任何凭据，则创建一个管理员
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_credentials().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} credential(s), skipping admin seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No users found in database, creating default admin account...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping admin seed", e);
            return;
        }
    }

    let config = &AppConfig::get().admin;
    // 获取密码：优先使用配置（ADMIN_PASSWORD），否则生成随机密码
    let password = if config.password.is_empty() {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    } else {
        config.password.clone()
    };

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    match storage.create_admin(&config.username, &password_hash).await {
        Ok(admin) => {
            info!(
                "Default admin account created successfully (ID: {}, username: {})",
                admin.id, admin.username
            );
        }
        Err(e) => {
            warn!("Failed to create admin account: {}", e);
        }
    }
}

/// 准备服务器启动的上下文：存储、迁移与默认管理员
pub async fn prepare_server_startup() -> Result<StartupContext> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    // 初始化默认管理员账号（如果需要）
    seed_admin(&storage).await;

    Ok(StartupContext { storage })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validate::validate_password;

    #[test]
    fn test_generated_password_passes_policy() {
        for _ in 0..20 {
            let password = generate_random_password(16);
            assert_eq!(password.chars().count(), 16);
            assert!(validate_password(&password).is_ok(), "{password}");
        }
    }
}
