use crate::error::{NornError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::marker::PhantomData;
use strum::{Display, EnumString};

/// Cardano network the oracle service submits to, sent as numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Network {
    #[strum(to_string = "testnet", serialize = "0")]
    Testnet = 0,
    #[strum(to_string = "mainnet", serialize = "1")]
    Mainnet = 1,
}

impl Network {
    pub fn id(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for Network {
    type Error = NornError;

    fn try_from(id: u8) -> Result<Self> {
        match id {
            0 => Ok(Network::Testnet),
            1 => Ok(Network::Mainnet),
            _ => Err(NornError::Config(format!("unknown network id: {id}"))),
        }
    }
}

impl Serialize for Network {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.id())
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = u8::deserialize(deserializer)?;
        Network::try_from(id).map_err(serde::de::Error::custom)
    }
}

/// Uniform response wrapper returned by the oracle service.
///
/// The body is kept as the service sent it: `data`, `error` and any other
/// top level field stay raw JSON. `T` names the data shape of the call and is
/// only applied by `into_data`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(bound = "")]
pub struct BaseResponse<T> {
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: serde_json::Value,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
    #[serde(skip)]
    shape: PhantomData<T>,
}

impl<T> BaseResponse<T> {
    pub fn new(data: serde_json::Value, success: bool, error: serde_json::Value) -> Self {
        BaseResponse {
            data,
            success,
            error,
            extra: serde_json::Map::new(),
            shape: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> BaseResponse<T> {
    /// Unwraps the envelope, turning a reported failure into `NornError::Server`.
    pub fn into_data(self) -> Result<T> {
        if !self.success {
            return Err(NornError::Server(self.error));
        }
        if self.data.is_null() {
            return Err(NornError::Request(
                "response envelope carries no data".to_string(),
            ));
        }
        Ok(serde_json::from_value(self.data)?)
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InitRequest<'a> {
    pub network: Network,
    pub blockfrost_api_key: &'a str,
    pub wallet_seed: &'a str,
    #[serde(rename = "CBORhex")]
    pub cbor_hex: &'a str,
    pub rngfid: &'a str,
    pub rnlen: u32,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MintRequest<'a> {
    pub network: Network,
    pub blockfrost_api_key: &'a str,
    pub wallet_seed: &'a str,
    #[serde(rename = "oracleDIDName")]
    pub oracle_did_name: &'a str,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest<'a> {
    pub network: Network,
    pub blockfrost_api_key: &'a str,
    pub wallet_seed: &'a str,
    #[serde(rename = "CBORhex")]
    pub cbor_hex: &'a str,
    pub ogmios_url: &'a str,
    pub rngfid: &'a str,
    pub rnlen: u32,
    #[serde(rename = "initRNGTx")]
    pub init_rng_tx: &'a str,
    #[serde(rename = "oracleDIDUnit")]
    pub oracle_did_unit: &'a str,
}

#[derive(Serialize, Debug)]
pub struct UpdateRequest<'a> {
    #[serde(flatten)]
    pub register: RegisterRequest<'a>,
    #[serde(rename = "currUpdatedOracleDIDTx")]
    pub curr_updated_oracle_did_tx: &'a str,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest<'a> {
    pub network: Network,
    pub blockfrost_api_key: &'a str,
    #[serde(rename = "currUpdatedOracleDIDTx")]
    pub curr_updated_oracle_did_tx: &'a str,
}

/// Result of `/api/rng/generate`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InitData {
    pub tx_hash: String,
    /// datum hash
    pub datum: String,
    pub rngfid: String,
    pub rnlen: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MintData {
    pub tx_hash: String,
    #[serde(rename = "oracleDIDUnit")]
    pub oracle_did_unit: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterData {
    pub tx_hash: String,
    #[serde(rename = "oracleDIDUnit")]
    pub oracle_did_unit: String,
    pub rng_output: String,
}

/// `/api/oracle/update` answers with the same shape as a registration.
pub type UpdateData = RegisterData;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QueryData {
    pub rng_output: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn network_is_sent_as_number() {
        assert_eq!(serde_json::to_value(Network::Testnet).unwrap(), json!(0));
        assert_eq!(serde_json::to_value(Network::Mainnet).unwrap(), json!(1));
        assert_eq!(
            serde_json::from_value::<Network>(json!(1)).unwrap(),
            Network::Mainnet
        );
        assert!(serde_json::from_value::<Network>(json!(2)).is_err());
    }

    #[test]
    fn network_parses_names_and_ids() {
        assert_eq!(Network::from_str("0").unwrap(), Network::Testnet);
        assert_eq!(Network::from_str("Mainnet").unwrap(), Network::Mainnet);
        assert_eq!(Network::Testnet.to_string(), "testnet");
        assert!(Network::from_str("preview").is_err());
    }

    #[test]
    fn update_request_extends_register_fields() {
        let req = UpdateRequest {
            register: RegisterRequest {
                network: Network::Testnet,
                blockfrost_api_key: "key",
                wallet_seed: "seed",
                cbor_hex: "4e4d01",
                ogmios_url: "ws://localhost:1337",
                rngfid: "rngfid_abc",
                rnlen: 4,
                init_rng_tx: "tx_init",
                oracle_did_unit: "unit",
            },
            curr_updated_oracle_did_tx: "tx_curr",
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "network": 0,
                "blockfrostApiKey": "key",
                "walletSeed": "seed",
                "CBORhex": "4e4d01",
                "ogmiosUrl": "ws://localhost:1337",
                "rngfid": "rngfid_abc",
                "rnlen": 4,
                "initRNGTx": "tx_init",
                "oracleDIDUnit": "unit",
                "currUpdatedOracleDIDTx": "tx_curr",
            })
        );
    }

    #[test]
    fn failed_envelope_without_data() {
        let resp: BaseResponse<QueryData> =
            serde_json::from_value(json!({"success": false, "error": "no utxo"})).unwrap();
        assert_eq!(resp.data, serde_json::Value::Null);
        match resp.into_data() {
            Err(NornError::Server(e)) => assert_eq!(e, json!("no utxo")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn failed_envelope_with_partial_data() {
        let body = json!({"data": {}, "success": false, "error": "utxo not found"});
        let resp: BaseResponse<QueryData> = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(serde_json::to_value(&resp).unwrap(), body);
        assert!(matches!(resp.into_data(), Err(NornError::Server(_))));
    }

    #[test]
    fn unknown_fields_are_kept() {
        let body = json!({
            "data": {"rngOutput": "42", "slot": 123},
            "success": true,
            "error": null,
            "requestId": "r-17"
        });
        let resp: BaseResponse<QueryData> = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(resp.extra.get("requestId"), Some(&json!("r-17")));
        assert_eq!(serde_json::to_value(&resp).unwrap(), body);
        assert_eq!(resp.into_data().unwrap().rng_output, "42");
    }

    #[test]
    fn missing_success_and_error_default() {
        let resp: BaseResponse<QueryData> =
            serde_json::from_value(json!({"data": {"rngOutput": "42"}})).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.error, serde_json::Value::Null);
        assert_eq!(resp.data, json!({"rngOutput": "42"}));
    }

    #[test]
    fn success_without_data_is_rejected() {
        let resp = BaseResponse::<QueryData>::new(serde_json::Value::Null, true, json!(null));
        assert!(matches!(resp.into_data(), Err(NornError::Request(_))));
    }

    #[test]
    fn mistyped_data_fails_on_conversion_only() {
        let resp: BaseResponse<InitData> =
            serde_json::from_value(json!({"data": {"txHash": 7}, "success": true})).unwrap();
        assert!(matches!(resp.into_data(), Err(NornError::Request(_))));
    }

    #[test]
    fn successful_envelope_into_data() {
        let resp: BaseResponse<InitData> = serde_json::from_value(json!({
            "data": {"txHash": "abc", "datum": "d4", "rngfid": "rngfid_1", "rnlen": 4},
            "success": true,
            "error": null
        }))
        .unwrap();
        let data = resp.into_data().unwrap();
        assert_eq!(data.tx_hash, "abc");
        assert_eq!(data.rnlen, 4);
    }
}
