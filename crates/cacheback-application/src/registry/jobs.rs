//! Job Class Registry
//!
//! Maps dotted class paths (`"app.jobs.UserCountJob"`) to job factories.
//! Classes are registered at compile time through [`JOB_CLASSES`] and copied
//! into a [`JobRegistry`] at startup; more can be added at runtime.
//!
//! Resolution failures are configuration mistakes, not programming errors:
//! they are logged on the `cacheback` target and reported as `None`.

use cacheback_domain::constants::LOG_TARGET;
use cacheback_domain::error::Result;
use cacheback_domain::ports::Job;
use cacheback_domain::value_objects::{ClassPath, JobArgs};
use dashmap::DashMap;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Builds a job instance from its constructor arguments
pub type JobFactory = fn(&JobArgs) -> Result<Arc<dyn Job>>;

/// Compile-time registry entry for a job class
pub struct JobClassEntry {
    /// Module path (e.g., "app.jobs")
    pub module: &'static str,
    /// Class name within the module (e.g., "UserCountJob")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create job instances
    pub factory: JobFactory,
}

#[linkme::distributed_slice]
pub static JOB_CLASSES: [JobClassEntry] = [..];

/// A resolved job class
#[derive(Clone)]
pub struct JobClass {
    path: ClassPath,
    description: String,
    factory: JobFactory,
}

impl JobClass {
    /// Create a job class
    pub fn new<S: Into<String>>(path: ClassPath, description: S, factory: JobFactory) -> Self {
        Self {
            path,
            description: description.into(),
            factory,
        }
    }

    /// Create a job class from a compile-time entry
    pub fn from_entry(entry: &JobClassEntry) -> Self {
        Self::new(
            ClassPath::new(entry.module, entry.name),
            entry.description,
            entry.factory,
        )
    }

    /// Full class path
    pub fn path(&self) -> &ClassPath {
        &self.path
    }

    /// Module path
    pub fn module(&self) -> &str {
        self.path.module()
    }

    /// Class name
    pub fn name(&self) -> &str {
        self.path.name()
    }

    /// Human-readable description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Build a job instance
    pub fn instantiate(&self, args: &JobArgs) -> Result<Arc<dyn Job>> {
        (self.factory)(args)
    }
}

impl PartialEq for JobClass {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && std::ptr::fn_addr_eq(self.factory, other.factory)
    }
}

impl fmt::Debug for JobClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobClass")
            .field("path", &self.path.to_string())
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Registry of job classes grouped by module
#[derive(Default)]
pub struct JobRegistry {
    modules: DashMap<String, HashMap<String, JobClass>>,
}

impl JobRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with every compile-time registration
    pub fn from_registered() -> Self {
        let registry = Self::new();
        for entry in JOB_CLASSES {
            registry.register(JobClass::from_entry(entry));
        }
        debug!(
            target: LOG_TARGET,
            classes = JOB_CLASSES.len(),
            "Job registry seeded from compile-time registrations"
        );
        registry
    }

    /// Register a job class, replacing any class with the same path
    pub fn register(&self, class: JobClass) {
        let mut module = self
            .modules
            .entry(class.module().to_string())
            .or_default();
        if module.contains_key(class.name()) {
            warn!(target: LOG_TARGET, path = %class.path(), "Job class already registered, replacing");
        }
        module.insert(class.name().to_string(), class);
    }

    /// Declare a module that has no classes yet
    pub fn register_module(&self, module: &str) {
        self.modules.entry(module.to_string()).or_default();
    }

    /// Whether a module is known to the registry
    pub fn contains_module(&self, module: &str) -> bool {
        self.modules.contains_key(module)
    }

    /// Sorted dotted paths of every registered class
    pub fn list_classes(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .modules
            .iter()
            .flat_map(|module| {
                module
                    .value()
                    .values()
                    .map(|class| class.path().to_string())
                    .collect::<Vec<_>>()
            })
            .collect();
        paths.sort();
        paths
    }

    /// Resolve a dotted class path
    ///
    /// Logs one error entry and returns `None` when the path is malformed,
    /// the module is unknown, or the module does not define the class.
    pub fn resolve(&self, path: &str) -> Option<JobClass> {
        let class_path = match ClassPath::parse(path) {
            Ok(class_path) => class_path,
            Err(e) => {
                error!(target: LOG_TARGET, path = path, "Error parsing job class path {path}: '{e}'");
                return None;
            }
        };

        let mod_name = class_path.module();
        let klass_name = class_path.name();

        let Some(module) = self.modules.get(mod_name) else {
            error!(
                target: LOG_TARGET,
                module = mod_name,
                "Error importing job module {mod_name}: 'no job module named {mod_name} is registered'"
            );
            return None;
        };

        let Some(class) = module.get(klass_name) else {
            error!(
                target: LOG_TARGET,
                module = mod_name,
                class = klass_name,
                "Module '{mod_name}' does not define a '{klass_name}' class"
            );
            return None;
        };

        Some(class.clone())
    }
}

impl fmt::Debug for JobRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobRegistry")
            .field("classes", &self.list_classes())
            .finish()
    }
}

/// Return the job class registered under `klass_str`, if any
pub fn get_job_class(registry: &JobRegistry, klass_str: &str) -> Option<JobClass> {
    registry.resolve(klass_str)
}
