use async_trait::async_trait;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    /// 命中
    Found(T),
    /// 键不存在
    NotFound,
    /// 后端异常等导致取不到值（与不存在区分开，调用方可选择回源）
    ExistsButNoValue,
}

/// 统一的对象缓存抽象
///
/// 值以序列化后的字符串存取；TTL 单位为秒，0 表示使用后端默认值。
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}
