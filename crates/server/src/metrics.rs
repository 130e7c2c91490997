use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use service::errors::ServiceError;

/// Prometheus counters for inventory traffic, on a registry owned by the app.
pub struct InventoryMetrics {
    registry: Registry,
    mutations: IntCounterVec,
    guard_rejections: IntCounterVec,
    validation_failures: IntCounter,
}

impl InventoryMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let mutations = IntCounterVec::new(
            Opts::new("inventory_mutations_total", "Successful inventory writes"),
            &["entity", "op"],
        )?;
        let guard_rejections = IntCounterVec::new(
            Opts::new("inventory_delete_blocked_total", "Deletes refused because items still reference the target"),
            &["entity"],
        )?;
        let validation_failures =
            IntCounter::with_opts(Opts::new("inventory_validation_failures_total", "Submissions rejected by validation"))?;
        registry.register(Box::new(mutations.clone()))?;
        registry.register(Box::new(guard_rejections.clone()))?;
        registry.register(Box::new(validation_failures.clone()))?;
        Ok(Self { registry, mutations, guard_rejections, validation_failures })
    }

    /// Count the outcome of a write operation.
    pub fn observe<T>(&self, entity: &str, op: &str, result: &Result<T, ServiceError>) {
        match result {
            Ok(_) => self.mutations.with_label_values(&[entity, op]).inc(),
            Err(ServiceError::Validation(_)) => self.validation_failures.inc(),
            Err(ServiceError::Conflict(_)) => self.guard_rejections.with_label_values(&[entity]).inc(),
            Err(_) => {}
        }
    }

    pub fn mutations(&self, entity: &str, op: &str) -> u64 {
        self.mutations.with_label_values(&[entity, op]).get()
    }

    /// Text exposition format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
