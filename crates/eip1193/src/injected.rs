use crate::{types::RequestArguments, Error, Provider};
use async_trait::async_trait;
use send_wrapper::SendWrapper;
use serde::Serialize;
use serde_json::Value;
use std::rc::Rc;
use tracing::{trace, warn};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    js_sys,
    wasm_bindgen::{closure::Closure, JsCast, JsValue},
};

/// The provider object a wallet extension injects as `window.ethereum`.
#[derive(Debug, Clone)]
pub struct InjectedProvider {
    inner: SendWrapper<Rc<JsValue>>,
}

impl From<JsValue> for InjectedProvider {
    fn from(value: JsValue) -> Self {
        Self {
            inner: SendWrapper::new(Rc::new(value)),
        }
    }
}

impl InjectedProvider {
    pub fn detect() -> Option<Self> {
        web_sys::window()
            .and_then(|window| js_sys::Reflect::get(&window, &JsValue::from_str("ethereum")).ok())
            .filter(|ethereum| !ethereum.is_undefined() && !ethereum.is_null())
            .map(Self::from)
    }

    fn ethereum(&self) -> &JsValue {
        &self.inner
    }

    fn method(&self, name: &str) -> Result<js_sys::Function, Error> {
        js_sys::Reflect::get(self.ethereum(), &JsValue::from_str(name))
            .map_err(Error::js)?
            .dyn_into::<js_sys::Function>()
            .map_err(|_| Error::generic(format!("provider has no `{name}` method")))
    }

    /// Registers `callback` for a provider event such as `accountsChanged` or `chainChanged`.
    /// The listener is removed when the returned [`Subscription`] is dropped.
    pub fn on(
        &self,
        event: &str,
        callback: impl FnMut(JsValue) + 'static,
    ) -> Result<Subscription, Error> {
        let closure = Closure::<dyn FnMut(JsValue)>::new(callback);

        self.method("on")?
            .call2(
                self.ethereum(),
                &JsValue::from_str(event),
                closure.as_ref().unchecked_ref(),
            )
            .map_err(Error::js)?;

        Ok(Subscription {
            provider: self.clone(),
            event: event.to_string(),
            closure: SendWrapper::new(closure),
        })
    }
}

#[async_trait(?Send)]
impl Provider for InjectedProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, Error> {
        trace!(method, %params, "provider request");

        // Plain objects, not `Map`s, so the provider can read the fields.
        let arguments = RequestArguments {
            method,
            params: &params,
        }
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())?;

        let promise = self
            .method("request")?
            .call1(self.ethereum(), &arguments)
            .map_err(Error::js)?;

        let response = JsFuture::from(js_sys::Promise::from(promise))
            .await
            .map_err(Error::js)?;

        Ok(serde_wasm_bindgen::from_value(response)?)
    }
}

pub struct Subscription {
    provider: InjectedProvider,
    event: String,
    closure: SendWrapper<Closure<dyn FnMut(JsValue)>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let removed = self.provider.method("removeListener").and_then(|remove| {
            remove
                .call2(
                    self.provider.ethereum(),
                    &JsValue::from_str(&self.event),
                    self.closure.as_ref().unchecked_ref(),
                )
                .map_err(Error::js)
        });

        if let Err(error) = removed {
            warn!("failed to remove `{}` listener: {error}", self.event);
        }
    }
}
