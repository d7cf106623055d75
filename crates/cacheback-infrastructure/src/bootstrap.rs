//! Application bootstrap
//!
//! Turns an [`AppConfig`] into a ready [`CachebackContext`]: request
//! lifecycle, cache factory, job registry and the task dispatcher bound to
//! the integrations compiled into this build.

use crate::config::{AppConfig, QueueConfig};
use cacheback_application::registry::{JobRegistry, list_cache_backends};
use cacheback_application::services::TaskQueueIntegrations;
use cacheback_application::{CacheFactory, RefreshWorker, RequestLifecycle, TaskDispatcher};
use cacheback_domain::constants::LOG_TARGET;
use cacheback_domain::error::Result;
use cacheback_domain::ports::CacheBackend;
use std::sync::Arc;
use tracing::info;

/// Everything a host process needs at run time
#[derive(Debug, Clone)]
pub struct CachebackContext {
    config: AppConfig,
    caches: CacheFactory,
    jobs: Arc<JobRegistry>,
    dispatcher: TaskDispatcher,
}

impl CachebackContext {
    /// The configuration this context was built from
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Cache client factory
    pub fn cache_factory(&self) -> &CacheFactory {
        &self.caches
    }

    /// Request lifecycle that closes caches at the end of each request
    pub fn lifecycle(&self) -> &Arc<RequestLifecycle> {
        self.caches.lifecycle()
    }

    /// Job classes known to this process
    pub fn job_registry(&self) -> &Arc<JobRegistry> {
        &self.jobs
    }

    /// Dispatcher bound to the active task queue
    pub fn dispatcher(&self) -> &TaskDispatcher {
        &self.dispatcher
    }

    /// Worker-side entry point sharing this context's job registry
    pub fn refresh_worker(&self) -> RefreshWorker {
        RefreshWorker::new(Arc::clone(&self.jobs))
    }

    /// Build the configured default cache
    pub fn default_cache(&self) -> Result<Arc<dyn CacheBackend>> {
        self.caches
            .get_cache(&self.config.cache.to_backend_config())
    }

    /// Run the end-of-request hooks
    pub async fn request_finished(&self) -> usize {
        self.lifecycle().request_finished().await
    }
}

/// Build the application context
pub fn init_app(config: AppConfig) -> Result<CachebackContext> {
    let caches = CacheFactory::new(Arc::new(RequestLifecycle::new()));
    let jobs = Arc::new(JobRegistry::from_registered());
    let integrations = build_integrations(&config.queues)?;
    let dispatcher = TaskDispatcher::resolve(config.task_queue.as_deref(), integrations);

    let backends: Vec<&str> = list_cache_backends()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    info!(
        target: LOG_TARGET,
        task_queue = dispatcher.selection(),
        cache_backends = ?backends,
        job_classes = jobs.list_classes().len(),
        "Cacheback initialized"
    );

    Ok(CachebackContext {
        config,
        caches,
        jobs,
        dispatcher,
    })
}

/// Integrations compiled into this build, configured from `queues`
#[cfg_attr(
    not(any(feature = "queue-redis", feature = "queue-nats")),
    allow(unused_variables, clippy::unnecessary_wraps)
)]
pub fn build_integrations(queues: &QueueConfig) -> Result<TaskQueueIntegrations> {
    #[allow(unused_mut)]
    let mut integrations = TaskQueueIntegrations::none();

    #[cfg(feature = "queue-redis")]
    {
        use cacheback_providers::task_queue::RedisQueueFactory;

        let factory = RedisQueueFactory::new(&queues.redis.url)?
            .with_default_timeout(queues.redis.default_timeout_secs);
        integrations = integrations.with_redis(Arc::new(factory));
    }

    #[cfg(feature = "queue-nats")]
    {
        use cacheback_providers::task_queue::NatsTaskSubmitter;

        let mut submitter = NatsTaskSubmitter::new(&queues.nats.url);
        if let Some(name) = &queues.nats.client_name {
            submitter = submitter.with_client_name(name);
        }
        integrations = integrations.with_nats(Arc::new(submitter));
    }

    Ok(integrations)
}
