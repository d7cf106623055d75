//! Cache Backend Implementations
//!
//! | Backend | Type | Needs close |
//! |---------|------|-------------|
//! | [`NullCacheBackend`] | Testing | no |
//! | [`MokaCacheBackend`] | Local | no |
//! | [`RedisCacheBackend`] | Distributed | yes |

#[cfg(feature = "cache-moka")]
pub mod moka;
pub mod null;
#[cfg(feature = "cache-redis")]
pub mod redis;

#[cfg(feature = "cache-moka")]
pub use moka::MokaCacheBackend;
pub use null::NullCacheBackend;
#[cfg(feature = "cache-redis")]
pub use redis::RedisCacheBackend;
