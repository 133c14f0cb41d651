//! Prometheus counters for the dispatch loop.

use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub commands_total: IntCounter,
    pub denied_total: IntCounter,
    pub fallback_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let commands_total =
            IntCounter::new("vox_commands_total", "Commands processed").expect("counter");
        let denied_total =
            IntCounter::new("vox_denied_total", "Commands denied by the access gate")
                .expect("counter");
        let fallback_total =
            IntCounter::new("vox_fallback_total", "Utterances resolved to the fallback intent")
                .expect("counter");

        registry
            .register(Box::new(commands_total.clone()))
            .expect("register");
        registry
            .register(Box::new(denied_total.clone()))
            .expect("register");
        registry
            .register(Box::new(fallback_total.clone()))
            .expect("register");

        Self {
            registry,
            commands_total,
            denied_total,
            fallback_total,
        }
    }

    pub fn observe(&self, reply: &vox_dispatch::Reply) {
        self.commands_total.inc();
        if reply.is_denied() {
            self.denied_total.inc();
        }
        if reply.is_fallback() {
            self.fallback_total.inc();
        }
    }

    pub fn encode(&self) -> String {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        if encoder.encode(&self.registry.gather(), &mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8_lossy(&buffer).to_string()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
