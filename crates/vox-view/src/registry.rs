//! View builder registry.
//!
//! App types map to builders through a registry rather than a conditional
//! chain; an unregistered app type falls through to the generic view, so
//! the mapping is total.

use crate::views::{
    generic_view, AnalyticsView, CamerasView, DocumentsView, HomeView, SalesView, SystemView,
    WeatherView,
};
use serde_json::Value;
use std::collections::HashMap;
use vox_core::{AppType, DomainData, HelpCategory, Intent, ViewDescriptor};

pub trait ViewBuilder: Send + Sync {
    fn app(&self) -> AppType;

    /// Build the view and the stats context shared with the response
    /// renderer. Mismatched data degrades to a generic view.
    fn build(&self, intent: &Intent, data: &DomainData) -> (ViewDescriptor, Value);
}

pub struct ViewRegistry {
    builders: HashMap<AppType, Box<dyn ViewBuilder>>,
}

impl ViewRegistry {
    pub fn empty() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// Registry with every built-in view; `help` feeds the system help view.
    pub fn with_defaults(help: Vec<HelpCategory>) -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(DocumentsView));
        registry.register(Box::new(CamerasView));
        registry.register(Box::new(SalesView));
        registry.register(Box::new(HomeView));
        registry.register(Box::new(AnalyticsView));
        registry.register(Box::new(WeatherView));
        registry.register(Box::new(SystemView::new(help)));
        registry
    }

    pub fn register(&mut self, builder: Box<dyn ViewBuilder>) {
        self.builders.insert(builder.app(), builder);
    }

    pub fn build(&self, intent: &Intent, data: &DomainData) -> (ViewDescriptor, Value) {
        match self.builders.get(&intent.app) {
            Some(builder) => builder.build(intent, data),
            None => (generic_view(intent.app), Value::Null),
        }
    }
}
