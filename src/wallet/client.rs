//! JSON-RPC Wallet Client
//!
//! Speaks JSON-RPC 2.0 over HTTP to a wallet endpoint that holds the user's
//! keys (a desktop wallet, or a dev node with unlocked accounts).

use crate::consts::cli_consts::wallet::CONNECT_TIMEOUT_SECS;
use crate::wallet::WalletProvider;
use crate::wallet::error::WalletError;
use crate::wallet::types::{
    Address, CallRequest, TransactionReceipt, TransactionRequest, TxHash, format_data,
    format_quantity, parse_data, parse_quantity,
};
use reqwest::{Client, ClientBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("ico-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReceipt {
    transaction_hash: String,
    block_number: Option<String>,
    status: Option<String>,
}

impl TryFrom<RawReceipt> for TransactionReceipt {
    type Error = WalletError;

    fn try_from(raw: RawReceipt) -> Result<Self, Self::Error> {
        Ok(TransactionReceipt {
            transaction_hash: raw.transaction_hash.parse()?,
            block_number: raw.block_number.as_deref().map(parse_quantity).transpose()?,
            status: raw.status.as_deref().map(parse_quantity).transpose()?,
        })
    }
}

#[derive(Debug)]
pub struct JsonRpcWallet {
    client: Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcWallet {
    pub fn new(url: impl Into<String>) -> Result<Self, WalletError> {
        Ok(Self {
            client: ClientBuilder::new()
                .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
                .build()?,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn handle_response_status(response: Response) -> Result<Response, WalletError> {
        if !response.status().is_success() {
            return Err(WalletError::from_response(response).await);
        }
        Ok(response)
    }

    /// Decode a JSON-RPC response body into the method's result type.
    fn decode_response<T: DeserializeOwned>(
        method: &str,
        response: RpcResponse,
    ) -> Result<T, WalletError> {
        if let Some(error) = response.error {
            return Err(WalletError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        let result = response.result.unwrap_or(Value::Null);
        serde_json::from_value(result)
            .map_err(|e| WalletError::Malformed(format!("{} result: {}", method, e)))
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, WalletError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        log::debug!("-> {} #{} {}", method, id, params);

        let response = self
            .client
            .post(&self.url)
            .header("User-Agent", USER_AGENT)
            .json(&body)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response: RpcResponse = response.json().await?;
        let decoded = Self::decode_response(method, response);
        if let Err(e) = &decoded {
            log::debug!("<- {} #{} failed: {}", method, id, e);
        }
        decoded
    }
}

#[async_trait::async_trait]
impl WalletProvider for JsonRpcWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        let accounts: Vec<String> = self.request("eth_requestAccounts", json!([])).await?;
        accounts
            .iter()
            .map(|a| a.parse::<Address>().map_err(WalletError::Malformed))
            .collect()
    }

    async fn chain_id(&self) -> Result<u64, WalletError> {
        let chain_id: String = self.request("eth_chainId", json!([])).await?;
        parse_quantity(&chain_id)
    }

    async fn call(&self, request: CallRequest) -> Result<Vec<u8>, WalletError> {
        let params = json!([
            {
                "to": request.to,
                "data": format_data(&request.data),
            },
            "latest"
        ]);
        let data: String = self.request("eth_call", params).await?;
        parse_data(&data)
    }

    async fn send_transaction(&self, request: TransactionRequest) -> Result<TxHash, WalletError> {
        let params = json!([{
            "from": request.from,
            "to": request.to,
            "value": format_quantity(request.value),
            "data": format_data(&request.data),
        }]);
        let hash: String = self.request("eth_sendTransaction", params).await?;
        hash.parse()
    }

    async fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, WalletError> {
        let raw: Option<RawReceipt> = self
            .request("eth_getTransactionReceipt", json!([hash.to_string()]))
            .await?;
        raw.map(TransactionReceipt::try_from).transpose()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn decode<T: DeserializeOwned>(body: &str) -> Result<T, WalletError> {
        let response: RpcResponse = serde_json::from_str(body).unwrap();
        JsonRpcWallet::decode_response("test_method", response)
    }

    #[test]
    fn decodes_result_values() {
        let chain_id: String = decode(r#"{"jsonrpc":"2.0","id":1,"result":"0x4"}"#).unwrap();
        assert_eq!(chain_id, "0x4");
    }

    #[test]
    /// A wallet rejection comes back as an RPC error with code 4001.
    fn decodes_error_objects() {
        let result: Result<String, _> = decode(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":4001,"message":"User rejected the request."}}"#,
        );
        let err = result.unwrap_err();
        assert!(err.is_user_rejection());
    }

    #[test]
    /// A null result decodes as `None` for optional results such as pending receipts.
    fn decodes_null_result_as_none() {
        let receipt: Option<RawReceipt> =
            decode(r#"{"jsonrpc":"2.0","id":7,"result":null}"#).unwrap();
        assert!(receipt.is_none());
    }

    #[test]
    fn wrong_result_shape_is_malformed() {
        let result: Result<String, _> = decode(r#"{"jsonrpc":"2.0","id":1,"result":[1,2]}"#);
        assert!(matches!(result, Err(WalletError::Malformed(_))));
    }

    #[test]
    fn converts_raw_receipts() {
        let raw = RawReceipt {
            transaction_hash: format!("0x{}", "11".repeat(32)),
            block_number: Some("0x10".to_string()),
            status: Some("0x0".to_string()),
        };
        let receipt = TransactionReceipt::try_from(raw).unwrap();
        assert_eq!(receipt.block_number, Some(16));
        assert!(receipt.is_mined());
        assert!(receipt.is_reverted());
    }

    #[tokio::test]
    /// Requests to an unreachable endpoint fail with a transport error.
    async fn unreachable_endpoint_is_transport_error() {
        let wallet = JsonRpcWallet::new("http://127.0.0.1:9").unwrap();
        let result = wallet.chain_id().await;
        assert!(matches!(result, Err(WalletError::Reqwest(_))));
    }
}
