// 认证模块
// 纯令牌编解码（token/claims）与缓存绑定的会话校验（authenticator/
// session_manager）是两个独立层，由上层组合

pub mod authenticator;
pub mod claims;
pub mod session_manager;
pub mod token;

// 重新导出常用类型和函数，方便其他模块使用
pub use authenticator::{AuthUser, Authenticator, Identity, UserDirectory};
pub use session_manager::{SessionManager, TokenPair};
pub use token::{Claims, TokenCodec, TokenType};
