/// 生成会话缓存键
///
/// 身份和会话ID共同构成键，会话ID是唯一的吊销句柄：
/// 不知道会话ID就无法吊销对应会话，也没有按身份枚举全部会话的索引。
pub fn session_key(identity: &str, session_id: &str) -> String {
    format!("{}|{}", identity, session_id)
}
