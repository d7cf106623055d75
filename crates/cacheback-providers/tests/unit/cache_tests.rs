//! Cache backend tests

use cacheback_application::registry::{CacheBackendConfig, list_cache_backends, resolve_cache_backend};
use cacheback_domain::ports::{CacheBackend, CacheEntryConfig};
use cacheback_providers::cache::NullCacheBackend;

#[tokio::test]
async fn test_null_backend_stores_nothing() {
    let cache = NullCacheBackend::new();

    cache
        .set_json("user:1", "{\"name\":\"ada\"}", CacheEntryConfig::default())
        .await
        .unwrap();

    assert_eq!(cache.get_json("user:1").await.unwrap(), None);
    assert!(!cache.exists("user:1").await.unwrap());
    assert_eq!(cache.size().await.unwrap(), 0);
    assert!(!cache.supports_close());
}

#[test]
fn test_registered_backends() {
    let names: Vec<&str> = list_cache_backends().iter().map(|(name, _)| *name).collect();

    assert!(names.contains(&"null"), "Available: {names:?}");
    #[cfg(feature = "cache-moka")]
    assert!(names.contains(&"moka"), "Available: {names:?}");
    #[cfg(feature = "cache-redis")]
    assert!(names.contains(&"redis"), "Available: {names:?}");
}

#[cfg(feature = "cache-moka")]
mod moka_tests {
    use super::*;
    use cacheback_providers::cache::MokaCacheBackend;

    #[tokio::test]
    async fn test_set_get_delete() {
        let cache = MokaCacheBackend::with_capacity(100);

        cache
            .set_json("report:daily", "[1,2,3]", CacheEntryConfig::default())
            .await
            .unwrap();

        assert_eq!(
            cache.get_json("report:daily").await.unwrap(),
            Some("[1,2,3]".to_string())
        );
        assert!(cache.exists("report:daily").await.unwrap());
        assert!(cache.delete("report:daily").await.unwrap());
        assert!(!cache.delete("report:daily").await.unwrap());
        assert_eq!(cache.get_json("report:daily").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_stats_track_hits_and_misses() {
        let cache = MokaCacheBackend::new();
        cache
            .set_json("k", "1", CacheEntryConfig::default())
            .await
            .unwrap();

        cache.get_json("k").await.unwrap();
        cache.get_json("missing").await.unwrap();

        let stats = cache.stats().await.unwrap();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
        assert!((stats.hit_rate - 0.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_namespaces_are_isolated() {
        let config = CacheBackendConfig::new("moka").with_namespace("a");
        let first = resolve_cache_backend(&config).unwrap();
        first
            .set_json("k", "1", CacheEntryConfig::default())
            .await
            .unwrap();

        // Separate instances never share storage
        let second = resolve_cache_backend(&config).unwrap();
        assert_eq!(second.get_json("k").await.unwrap(), None);
        assert_eq!(first.get_json("k").await.unwrap(), Some("1".to_string()));
    }

    #[tokio::test]
    async fn test_clear_empties_cache() {
        let cache = MokaCacheBackend::new();
        cache
            .set_json("k", "1", CacheEntryConfig::default())
            .await
            .unwrap();

        cache.clear().await.unwrap();
        assert_eq!(cache.size().await.unwrap(), 0);
    }

    #[test]
    fn test_factory_honours_max_size() {
        let cache = resolve_cache_backend(&CacheBackendConfig::new("moka").with_max_size(42)).unwrap();
        assert_eq!(cache.backend_name(), "moka");
        assert!(!cache.supports_close());
    }
}

#[cfg(feature = "cache-redis")]
mod redis_tests {
    use super::*;
    use cacheback_domain::error::Error;
    use cacheback_providers::cache::RedisCacheBackend;

    #[tokio::test]
    async fn test_construction_does_not_connect() {
        let cache = RedisCacheBackend::new("redis://127.0.0.1:1").unwrap();

        assert!(!cache.is_connected().await);
        assert!(cache.supports_close());
        assert_eq!(cache.backend_name(), "redis");
    }

    #[tokio::test]
    async fn test_close_without_connection_is_ok() {
        let cache = RedisCacheBackend::new("redis://127.0.0.1:1").unwrap();

        cache.close().await.unwrap();
        cache.close().await.unwrap();
        assert!(!cache.is_connected().await);
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let err = RedisCacheBackend::new("not a url").unwrap_err();
        assert!(matches!(err, Error::Infrastructure { .. }));
    }

    #[test]
    fn test_factory_needs_close() {
        let cache = resolve_cache_backend(
            &CacheBackendConfig::new("redis").with_uri("redis://127.0.0.1:1"),
        )
        .unwrap();
        assert!(cache.supports_close());
    }
}
