//! A scripted provider that records every request it receives.

use crate::{Error, Provider};
use async_trait::async_trait;
use serde_json::Value;
use std::cell::RefCell;

type Handler = Box<dyn Fn(&str, &Value) -> Result<Value, Error>>;

pub struct MockProvider {
    calls: RefCell<Vec<(String, Value)>>,
    handler: Handler,
}

impl MockProvider {
    pub fn new(handler: impl Fn(&str, &Value) -> Result<Value, Error> + 'static) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            handler: Box::new(handler),
        }
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.borrow().clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|(method, _)| method.clone())
            .collect()
    }
}

#[async_trait(?Send)]
impl Provider for MockProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, Error> {
        let response = (self.handler)(method, &params);
        self.calls.borrow_mut().push((method.to_string(), params));
        response
    }
}
