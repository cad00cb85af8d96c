use serde::{Deserialize, Serialize};
use web_sys::{js_sys, wasm_bindgen::JsValue};

/// EIP-1193 error code for a request the user declined in the wallet.
pub const USER_REJECTED_REQUEST: i64 = 4001;

#[derive(thiserror::Error, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("The request was rejected in the wallet")]
    UserRejected,

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("{0}")]
    Js(String),

    #[error("Serialization Error: {0}")]
    Serialization(String),

    #[error("{0}")]
    Generic(String),
}

impl Error {
    pub fn js(value: JsValue) -> Self {
        value.into()
    }
    pub fn generic(value: impl std::fmt::Display) -> Self {
        Self::Generic(value.to_string())
    }
    pub fn rpc(code: i64, message: impl Into<String>) -> Self {
        match code {
            USER_REJECTED_REQUEST => Self::UserRejected,
            code => Self::Rpc {
                code,
                message: message.into(),
            },
        }
    }
}

// Providers reject with a plain object `{ code, message }` rather than an `Error` instance.
impl From<JsValue> for Error {
    fn from(error: JsValue) -> Self {
        let field = |name: &str| js_sys::Reflect::get(&error, &JsValue::from_str(name)).ok();

        let message = field("message")
            .and_then(|message| message.as_string())
            .or_else(|| error.as_string())
            .unwrap_or("unknown JS error".to_string());

        match field("code").and_then(|code| code.as_f64()) {
            Some(code) => Error::rpc(code as i64, message),
            None => Error::Js(message),
        }
    }
}

impl From<serde_wasm_bindgen::Error> for Error {
    fn from(error: serde_wasm_bindgen::Error) -> Self {
        Error::Serialization(error.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Serialization(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_4001_is_a_user_rejection() {
        assert_eq!(Error::rpc(4001, "User denied"), Error::UserRejected);
    }

    #[test]
    fn other_codes_keep_their_message() {
        assert_eq!(
            Error::rpc(-32603, "execution reverted"),
            Error::Rpc {
                code: -32603,
                message: "execution reverted".to_string()
            }
        );
    }
}
