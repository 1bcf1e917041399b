use crate::config::ClientConfig;
use crate::error::Result;
use crate::models::*;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Serialize;

pub const GENERATE_PATH: &str = "/api/rng/generate";
pub const MINT_PATH: &str = "/api/oracle/mint";
pub const REGISTER_PATH: &str = "/api/oracle/register";
pub const UPDATE_PATH: &str = "/api/oracle/update";
pub const QUERY_PATH: &str = "/api/oracle/query";

/// Blocking client for the RNG oracle service.
///
/// Every operation is a single JSON `POST` against the configured service
/// URL. Transaction building and submission happen on the service side, the
/// client only assembles the payload from its configuration and hands back
/// the response envelope as it was received. Requests are not retried.
pub struct OracleClient {
    config: ClientConfig,
    http: Client,
}

impl OracleClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = Client::builder().default_headers(headers).build()?;
        log::debug!(
            "oracle client for '{}' with rngfid '{}'",
            config.api_url(),
            config.rngfid()
        );

        Ok(OracleClient { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn rngfid(&self) -> &str {
        self.config.rngfid()
    }

    /// Registers a new rngfid on chain with the rng contract.
    ///
    /// Returns the transaction hash, the datum hash, the rngfid and the
    /// random output length.
    pub fn initiate(&self) -> Result<BaseResponse<InitData>> {
        let c = &self.config;
        let body = InitRequest {
            network: c.network(),
            blockfrost_api_key: c.blockfrost_api_key(),
            wallet_seed: c.wallet_seed(),
            cbor_hex: c.rng_cbor(),
            rngfid: c.rngfid(),
            rnlen: c.output_len(),
        };
        self.post(GENERATE_PATH, &body)
    }

    /// Mints the Oracle DID token `name` (UTF-8 asset name).
    pub fn mint_oracle_did(&self, name: &str) -> Result<BaseResponse<MintData>> {
        let c = &self.config;
        let body = MintRequest {
            network: c.network(),
            blockfrost_api_key: c.blockfrost_api_key(),
            wallet_seed: c.wallet_seed(),
            oracle_did_name: name,
        };
        self.post(MINT_PATH, &body)
    }

    /// Locks the Oracle DID in the oracle contract together with the first random output.
    pub fn did_register(
        &self,
        oracle_did_unit: &str,
        init_rng_tx: &str,
    ) -> Result<BaseResponse<RegisterData>> {
        let body = self.register_request(oracle_did_unit, init_rng_tx);
        self.post(REGISTER_PATH, &body)
    }

    /// Produces a new random output, `curr_tx` is the latest Oracle DID
    /// transaction used as UTXO reference in the contract.
    pub fn update_oracle(
        &self,
        oracle_did_unit: &str,
        init_rng_tx: &str,
        curr_tx: &str,
    ) -> Result<BaseResponse<UpdateData>> {
        let body = UpdateRequest {
            register: self.register_request(oracle_did_unit, init_rng_tx),
            curr_updated_oracle_did_tx: curr_tx,
        };
        self.post(UPDATE_PATH, &body)
    }

    pub fn query(&self, curr_tx: &str) -> Result<BaseResponse<QueryData>> {
        let c = &self.config;
        let body = QueryRequest {
            network: c.network(),
            blockfrost_api_key: c.blockfrost_api_key(),
            curr_updated_oracle_did_tx: curr_tx,
        };
        self.post(QUERY_PATH, &body)
    }

    fn register_request<'a>(
        &'a self,
        oracle_did_unit: &'a str,
        init_rng_tx: &'a str,
    ) -> RegisterRequest<'a> {
        let c = &self.config;
        RegisterRequest {
            network: c.network(),
            blockfrost_api_key: c.blockfrost_api_key(),
            wallet_seed: c.wallet_seed(),
            cbor_hex: c.oracle_cbor(),
            ogmios_url: c.ogmios_url(),
            rngfid: c.rngfid(),
            rnlen: c.output_len(),
            init_rng_tx,
            oracle_did_unit,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url().trim_end_matches('/'), path)
    }

    fn post<B, T>(&self, path: &str, body: &B) -> Result<BaseResponse<T>>
    where
        B: Serialize,
    {
        let url = self.endpoint(path);
        log::debug!("POST {}", url);
        let response = self.send(&url, body);
        if let Err(e) = &response {
            log::error!("Error on request to '{}': {}", url, e);
        }
        response
    }

    fn send<B, T>(&self, url: &str, body: &B) -> Result<BaseResponse<T>>
    where
        B: Serialize,
    {
        let resp = self.http.post(url).json(body).send()?.error_for_status()?;
        let text = resp.text()?;
        // the envelope stays raw json, typed data is only read by `into_data`
        let envelope: BaseResponse<T> = serde_json::from_str(&text)?;
        log::debug!("Response: success={}", envelope.success);

        Ok(envelope)
    }
}

impl std::fmt::Debug for OracleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleClient")
            .field("config", &self.config)
            .finish()
    }
}
