//! 缓存层
//!
//! `ObjectCache` 是统一的字符串键值缓存抽象；具体后端（Moka 内存缓存、
//! Redis）通过 `declare_object_cache_plugin!` 在进程启动时注册到插件表，
//! 运行时按配置选择并支持回退。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明并注册一个缓存后端插件
///
/// 用法：`declare_object_cache_plugin!("moka", MokaCacheWrapper);`
/// 要求类型提供 `fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $cache_type:ident) => {
        paste::paste! {
            #[ctor::ctor]
            fn [<__register_ $cache_type:snake _plugin>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    std::sync::Arc::new(
                        || -> $crate::cache::register::BoxedObjectCacheFuture {
                            Box::pin(async {
                                let cache = $cache_type::new().map_err(|e| {
                                    $crate::errors::DocReviewError::cache_connection(e)
                                })?;
                                Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                            })
                        },
                    ),
                );
            }
        }
    };
}
