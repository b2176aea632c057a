//! Recording doubles for the host primitives a transport connects through.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use eventpush_core::client::{
    ConnectionEvent, EventSourceFactory, EventSourceHandle, LegacyDocument, LegacyElement, Listener,
};

// ================= Standard =================

#[derive(Default)]
pub struct SourceState {
    pub url: String,
    pub with_credentials: bool,
    pub listeners: Vec<(String, Listener)>,
    pub closed: bool,
}

/// Handle returned by [`FakeFactory`]; clones share state.
#[derive(Clone, Default)]
pub struct FakeSource(pub Arc<Mutex<SourceState>>);

impl FakeSource {
    pub fn fire(&self, event: &ConnectionEvent) {
        let targets: Vec<Listener> = self
            .0
            .lock()
            .unwrap()
            .listeners
            .iter()
            .filter(|(name, _)| *name == event.kind)
            .map(|(_, l)| l.clone())
            .collect();
        for l in targets {
            l.call(event);
        }
    }

    pub fn listener_names(&self) -> Vec<String> {
        self.0.lock().unwrap().listeners.iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn is_closed(&self) -> bool {
        self.0.lock().unwrap().closed
    }

    pub fn url(&self) -> String {
        self.0.lock().unwrap().url.clone()
    }

    pub fn with_credentials(&self) -> bool {
        self.0.lock().unwrap().with_credentials
    }
}

impl EventSourceHandle for FakeSource {
    fn add_listener(&mut self, event: &str, listener: Listener) {
        self.0.lock().unwrap().listeners.push((event.to_owned(), listener));
    }

    fn remove_listener(&mut self, event: &str, listener: &Listener) {
        self.0
            .lock()
            .unwrap()
            .listeners
            .retain(|(n, l)| !(n == event && l.same(listener)));
    }

    fn close(&mut self) {
        self.0.lock().unwrap().closed = true;
    }
}

#[derive(Default)]
pub struct FakeFactory {
    pub opened: Mutex<Vec<FakeSource>>,
    pub no_credentials: bool,
}

impl FakeFactory {
    pub fn sources(&self) -> Vec<FakeSource> {
        self.opened.lock().unwrap().clone()
    }
}

impl EventSourceFactory for FakeFactory {
    fn open(&self, url: &str, with_credentials: bool) -> Box<dyn EventSourceHandle> {
        let source = FakeSource::default();
        {
            let mut state = source.0.lock().unwrap();
            state.url = url.to_owned();
            state.with_credentials = with_credentials;
        }
        self.opened.lock().unwrap().push(source.clone());
        Box::new(source)
    }

    fn supports_credentials(&self) -> bool {
        !self.no_credentials
    }
}

// ================= Legacy =================

#[derive(Default)]
pub struct ElementState {
    pub listeners: Vec<(String, Listener)>,
    pub event_source_removed: bool,
    pub removed_attributes: Vec<String>,
}

#[derive(Clone, Default)]
pub struct FakeElement(pub Arc<Mutex<ElementState>>);

impl FakeElement {
    pub fn fire(&self, event: &ConnectionEvent) {
        let targets: Vec<Listener> = self
            .0
            .lock()
            .unwrap()
            .listeners
            .iter()
            .filter(|(name, _)| *name == event.kind)
            .map(|(_, l)| l.clone())
            .collect();
        for l in targets {
            l.call(event);
        }
    }

    pub fn listener_names(&self) -> Vec<String> {
        self.0.lock().unwrap().listeners.iter().map(|(n, _)| n.clone()).collect()
    }
}

impl LegacyElement for FakeElement {
    fn add_listener(&mut self, event: &str, listener: Listener) {
        self.0.lock().unwrap().listeners.push((event.to_owned(), listener));
    }

    fn remove_listener(&mut self, event: &str, listener: &Listener) {
        self.0
            .lock()
            .unwrap()
            .listeners
            .retain(|(n, l)| !(n == event && l.same(listener)));
    }

    fn remove_event_source(&mut self) {
        self.0.lock().unwrap().event_source_removed = true;
    }

    fn remove_attribute(&mut self, name: &str) {
        self.0.lock().unwrap().removed_attributes.push(name.to_owned());
    }
}

/// Document that creates an element for every `id="..."` it is handed.
#[derive(Default)]
pub struct FakeDocument {
    pub markup: Mutex<Vec<String>>,
    pub elements: Mutex<HashMap<String, FakeElement>>,
    /// Simulate a host that never materialises the element.
    pub drop_elements: bool,
}

impl FakeDocument {
    pub fn element(&self, id: &str) -> Option<FakeElement> {
        self.elements.lock().unwrap().get(id).cloned()
    }

    pub fn mounted(&self) -> Vec<String> {
        self.markup.lock().unwrap().clone()
    }
}

impl LegacyDocument for FakeDocument {
    fn mount(&self, markup: &str) {
        self.markup.lock().unwrap().push(markup.to_owned());
        if self.drop_elements {
            return;
        }
        if let Some(rest) = markup.split(" id=\"").nth(1) {
            if let Some(id) = rest.split('"').next() {
                self.elements.lock().unwrap().insert(id.to_owned(), FakeElement::default());
            }
        }
    }

    fn element_by_id(&self, id: &str) -> Option<Box<dyn LegacyElement>> {
        self.element(id).map(|e| Box::new(e) as Box<dyn LegacyElement>)
    }
}
