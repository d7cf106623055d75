//! Configuration loader tests

use cacheback_infrastructure::config::{CacheConfig, ConfigBuilder, ConfigLoader};
use cacheback_infrastructure::constants::{DEFAULT_LOG_LEVEL, DEFAULT_NATS_URL};
use std::io::Write;
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("cacheback.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let config = ConfigLoader::new()
        .with_env_prefix("CACHEBACK_TEST_MISSING")
        .with_config_path(dir.path().join("absent.toml"))
        .load()
        .unwrap();

    assert_eq!(config.task_queue, None);
    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    assert_eq!(config.queues.nats.url, DEFAULT_NATS_URL);
}

#[test]
fn test_toml_file_sets_task_queue() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
task_queue = "redis"

[queues.redis]
url = "redis://queue-host:6380"
default_timeout_secs = 60

[cache]
backend = "redis"
uri = "redis://cache-host:6379"
"#,
    );

    let config = ConfigLoader::new()
        .with_env_prefix("CACHEBACK_TEST_TOML")
        .with_config_path(&path)
        .load()
        .unwrap();

    assert_eq!(config.task_queue.as_deref(), Some("redis"));
    assert_eq!(config.queues.redis.url, "redis://queue-host:6380");
    assert_eq!(config.queues.redis.default_timeout_secs, 60);
    assert_eq!(config.cache.backend, "redis");
    assert_eq!(config.cache.uri.as_deref(), Some("redis://cache-host:6379"));
}

#[test]
fn test_unknown_task_queue_is_accepted_at_load() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "task_queue = \"kafka\"\n");

    let config = ConfigLoader::new()
        .with_env_prefix("CACHEBACK_TEST_UNKNOWN")
        .with_config_path(&path)
        .load()
        .unwrap();

    assert_eq!(config.task_queue.as_deref(), Some("kafka"));
}

#[test]
fn test_invalid_values_are_configuration_errors() {
    let dir = TempDir::new().unwrap();

    let path = write_config(&dir, "[cache]\ndefault_ttl_secs = 0\n");
    let err = ConfigLoader::new()
        .with_env_prefix("CACHEBACK_TEST_INVALID")
        .with_config_path(&path)
        .load()
        .unwrap_err();
    assert!(err.is_configuration());

    let path = write_config(&dir, "[logging]\nlevel = \"loud\"\n");
    let err = ConfigLoader::new()
        .with_env_prefix("CACHEBACK_TEST_INVALID")
        .with_config_path(&path)
        .load()
        .unwrap_err();
    assert!(err.to_string().contains("Invalid log level: loud"));

    let path = write_config(&dir, "[queues.nats]\nurl = \"\"\n");
    assert!(
        ConfigLoader::new()
            .with_env_prefix("CACHEBACK_TEST_INVALID")
            .with_config_path(&path)
            .load()
            .is_err()
    );
}

#[test]
fn test_disabled_cache_skips_ttl_check() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[cache]\nenabled = false\ndefault_ttl_secs = 0\n");

    let config = ConfigLoader::new()
        .with_env_prefix("CACHEBACK_TEST_DISABLED")
        .with_config_path(&path)
        .load()
        .unwrap();

    assert!(!config.cache.enabled);
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved.toml");
    let original = ConfigBuilder::new()
        .with_task_queue("nats")
        .with_cache(CacheConfig {
            max_size: 42,
            ..CacheConfig::default()
        })
        .build();

    let loader = ConfigLoader::new()
        .with_env_prefix("CACHEBACK_TEST_SAVE")
        .with_config_path(&path);
    loader.save_to_file(&original, &path).unwrap();

    assert_eq!(loader.load().unwrap(), original);
}

#[test]
#[ignore = "mutates process environment"]
fn test_environment_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "task_queue = \"nats\"\n");

    // SAFETY: ignored by default; run single-threaded
    unsafe {
        std::env::set_var("CACHEBACK_ENVTEST_TASK_QUEUE", "redis");
        std::env::set_var("CACHEBACK_ENVTEST_QUEUES__REDIS__URL", "redis://env-host:6379");
    }

    let config = ConfigLoader::new()
        .with_env_prefix("CACHEBACK_ENVTEST")
        .with_config_path(&path)
        .load();

    unsafe {
        std::env::remove_var("CACHEBACK_ENVTEST_TASK_QUEUE");
        std::env::remove_var("CACHEBACK_ENVTEST_QUEUES__REDIS__URL");
    }

    let config = config.unwrap();
    assert_eq!(config.task_queue.as_deref(), Some("redis"));
    assert_eq!(config.queues.redis.url, "redis://env-host:6379");
}
