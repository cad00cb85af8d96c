use crate::Error;
use alloy_primitives::{Address, Bytes, B256, U256, U64};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameters of `eth_call` and `eth_sendTransaction`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    pub to: Address,
    pub data: Bytes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
}

impl TransactionRequest {
    pub fn new(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            to,
            data: data.into(),
            ..Default::default()
        }
    }

    pub fn from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    pub fn value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    #[serde(default)]
    pub block_number: Option<U64>,
    /// `0x1` on success, `0x0` on revert. Absent on pre-Byzantium chains.
    #[serde(default)]
    pub status: Option<U64>,
    #[serde(default)]
    pub logs: Vec<Log>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        self.status.map_or(true, |status| status == U64::from(1))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Log {
    pub address: Address,
    #[serde(default)]
    pub topics: Vec<B256>,
    pub data: Bytes,
}

#[derive(Serialize)]
pub(crate) struct RequestArguments<'a> {
    pub method: &'a str,
    pub params: &'a Value,
}

/// Parses a JSON-RPC hex quantity such as `"0x61"`.
pub fn parse_quantity(value: &Value) -> Result<u64, Error> {
    let text = value
        .as_str()
        .ok_or_else(|| Error::Serialization(format!("expected a hex quantity, got {value}")))?;
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);

    u64::from_str_radix(digits, 16)
        .map_err(|error| Error::Serialization(format!("invalid quantity {text:?}: {error}")))
}

pub fn format_quantity(value: u64) -> String {
    format!("{value:#x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use serde_json::json;

    #[test]
    fn quantities_are_hex() {
        assert_eq!(parse_quantity(&json!("0x61")).unwrap(), 97);
        assert_eq!(format_quantity(97), "0x61");
        assert!(parse_quantity(&json!(97)).is_err());
        assert!(parse_quantity(&json!("0xzz")).is_err());
    }

    #[test]
    fn transaction_request_omits_missing_fields() {
        let to = address!("b7f335F8898274b954895a4291Fa19f81B7173fD");
        let request = TransactionRequest::new(to, vec![0xde, 0xad]);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["data"], json!("0xdead"));
        assert!(value.get("from").is_none());
        assert!(value.get("value").is_none());
    }

    #[test]
    fn receipt_status_decides_success() {
        let receipt: TransactionReceipt = serde_json::from_value(json!({
            "transactionHash": format!("0x{}", "11".repeat(32)),
            "blockNumber": "0x10",
            "status": "0x0",
            "logs": [],
        }))
        .unwrap();
        assert!(!receipt.succeeded());

        let receipt = TransactionReceipt {
            status: Some(U64::from(1)),
            ..receipt
        };
        assert!(receipt.succeeded());
    }
}
