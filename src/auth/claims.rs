use chrono::Utc;
use uuid::Uuid;

use crate::config::Config;

use super::token::{Claims, TokenType};

/// 基础载荷：一次登录生成一份，访问/刷新令牌共享
#[derive(Debug, Clone)]
pub struct BaseClaims {
    pub sub: String,
    pub iat: i64,
    pub jti: String,
}

/// 生成基础载荷
///
/// 会话ID取 128 位随机值的十六进制形式。它既是缓存键的判别部分
/// 也是吊销句柄，必须以压倒性概率全局唯一。
pub fn base_claims(identity: &str) -> BaseClaims {
    BaseClaims {
        sub: identity.to_string(),
        iat: Utc::now().timestamp(),
        jti: Uuid::new_v4().simple().to_string(),
    }
}

/// 由基础载荷派生访问令牌载荷
pub fn access_claims(base: &BaseClaims, config: &Config) -> Claims {
    Claims {
        token_type: TokenType::Access,
        sub: base.sub.clone(),
        jti: base.jti.clone(),
        iat: base.iat,
        exp: base.iat + config.access_token_ttl_secs as i64,
    }
}

/// 由基础载荷派生刷新令牌载荷（有效期长于访问令牌）
pub fn refresh_claims(base: &BaseClaims, config: &Config) -> Claims {
    Claims {
        token_type: TokenType::Refresh,
        sub: base.sub.clone(),
        jti: base.jti.clone(),
        iat: base.iat,
        exp: base.iat + config.refresh_token_ttl_secs as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            redis_url: "redis://127.0.0.1/".into(),
            jwt_secret: "test-secret".into(),
            auth_scheme: "Token".into(),
            access_token_ttl_secs: 86400,
            refresh_token_ttl_secs: 86400 * 5,
            session_ttl_secs: 3600,
        }
    }

    #[test]
    fn session_id_is_unique_128_bit_hex() {
        let a = base_claims("u1");
        let b = base_claims("u1");

        assert_ne!(a.jti, b.jti);
        assert_eq!(a.jti.len(), 32);
        assert!(a.jti.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn pair_shares_subject_and_session_id() {
        let config = test_config();
        let base = base_claims("u1");

        let access = access_claims(&base, &config);
        let refresh = refresh_claims(&base, &config);

        assert_eq!(access.sub, refresh.sub);
        assert_eq!(access.jti, refresh.jti);
        assert_eq!(access.iat, refresh.iat);
        assert_eq!(access.token_type, TokenType::Access);
        assert_eq!(refresh.token_type, TokenType::Refresh);
    }

    #[test]
    fn refresh_token_outlives_access_token() {
        let config = test_config();
        let base = base_claims("u1");

        let access = access_claims(&base, &config);
        let refresh = refresh_claims(&base, &config);

        assert!(refresh.exp > access.exp);
    }
}
