use crate::routes::Route;
use std::collections::HashMap;

/// What the controller can see and do on the current page.
pub trait Page {
    /// Path of the current location, e.g. `/add-order-page/3`.
    fn path(&self) -> String;
    /// Value of a form field; `None` when the field is absent.
    fn field(&self, id: &str) -> Option<String>;
    fn set_field(&mut self, id: &str, value: &str);
    fn alert(&mut self, message: &str);
    /// Replaces the current page with `route`.
    fn navigate(&mut self, route: Route);
    fn reload(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    Alert(String),
    Navigate(String),
    Reload,
}

/// Headless page that records every visible effect in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingPage {
    path: String,
    fields: HashMap<String, String>,
    events: Vec<PageEvent>,
}

impl RecordingPage {
    pub fn at(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_field(mut self, id: &str, value: &str) -> Self {
        self.fields.insert(id.to_string(), value.to_string());
        self
    }

    pub fn events(&self) -> &[PageEvent] {
        &self.events
    }

    pub fn alerts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PageEvent::Alert(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Page for RecordingPage {
    fn path(&self) -> String {
        if self.path.is_empty() {
            "/".to_string()
        } else {
            self.path.clone()
        }
    }

    fn field(&self, id: &str) -> Option<String> {
        self.fields.get(id).cloned()
    }

    fn set_field(&mut self, id: &str, value: &str) {
        self.fields.insert(id.to_string(), value.to_string());
    }

    fn alert(&mut self, message: &str) {
        self.events.push(PageEvent::Alert(message.to_string()));
    }

    fn navigate(&mut self, route: Route) {
        self.path = route.path();
        self.events.push(PageEvent::Navigate(self.path.clone()));
    }

    fn reload(&mut self) {
        self.events.push(PageEvent::Reload);
    }
}
