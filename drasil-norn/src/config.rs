use crate::error::{NornError, Result};
use crate::models::Network;
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

pub const RNGFID_PREFIX: &str = "rngfid_";
const RNGFID_RANDOM_LEN: usize = 24;
pub const DEFAULT_OUTPUT_LEN: u32 = 4;
pub const DEFAULT_API_URL: &str = "http://localhost:7000";

/// Creates a new oracle identifier: `rngfid_` followed by 24 hex characters
/// taken from a v4 uuid.
pub fn random_rngfid() -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    format!("{}{}", RNGFID_PREFIX, &uuid[..RNGFID_RANDOM_LEN])
}

/// Settings shared by every request of an `OracleClient`.
#[derive(Clone)]
pub struct ClientConfig {
    network: Network,
    blockfrost_api_key: Zeroizing<String>,
    wallet_seed: Zeroizing<String>,
    oracle_cbor: String,
    rng_cbor: String,
    ogmios_url: String,
    api_url: String,
    rngfid: String,
    output_len: u32,
}

impl ClientConfig {
    pub fn new(
        network: Network,
        blockfrost_api_key: &str,
        wallet_seed: &str,
        oracle_cbor: &str,
        rng_cbor: &str,
        ogmios_url: &str,
        api_url: &str,
    ) -> Self {
        ClientConfig {
            network,
            blockfrost_api_key: Zeroizing::new(blockfrost_api_key.to_owned()),
            wallet_seed: Zeroizing::new(wallet_seed.to_owned()),
            oracle_cbor: oracle_cbor.to_owned(),
            rng_cbor: rng_cbor.to_owned(),
            ogmios_url: ogmios_url.to_owned(),
            api_url: api_url.to_owned(),
            rngfid: random_rngfid(),
            output_len: DEFAULT_OUTPUT_LEN,
        }
    }

    /// Reuses an existing identifier instead of the generated one.
    pub fn with_rngfid(mut self, rngfid: &str) -> Self {
        self.rngfid = rngfid.to_owned();
        self
    }

    pub fn with_output_len(mut self, output_len: u32) -> Result<Self> {
        if output_len == 0 {
            return Err(NornError::new("random output length must be at least 1"));
        }
        self.output_len = output_len;
        Ok(self)
    }

    /// Loads the configuration from the environment, a `.env` file is read first if present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_vars(|key| std::env::var(key))
    }

    pub(crate) fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
    {
        let network = Network::from_str(var("RNG_NETWORK")?.trim())
            .map_err(|e| NornError::Config(format!("RNG_NETWORK: {e}")))?;
        let api_url = var("RNG_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let mut config = ClientConfig::new(
            network,
            &var("BLOCKFROST_API_KEY")?,
            &var("WALLET_SEED")?,
            &var("ORACLE_CBOR")?,
            &var("RNG_CBOR")?,
            &var("OGMIOS_URL")?,
            &api_url,
        );
        if let Ok(rngfid) = var("RNGFID") {
            config = config.with_rngfid(&rngfid);
        }
        if let Ok(len) = var("RNG_OUTPUT_LEN") {
            let len = len
                .trim()
                .parse::<u32>()
                .map_err(|e| NornError::Config(format!("RNG_OUTPUT_LEN: {e}")))?;
            config = config.with_output_len(len)?;
        }
        Ok(config)
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn blockfrost_api_key(&self) -> &str {
        &self.blockfrost_api_key
    }

    pub fn wallet_seed(&self) -> &str {
        &self.wallet_seed
    }

    pub fn oracle_cbor(&self) -> &str {
        &self.oracle_cbor
    }

    pub fn rng_cbor(&self) -> &str {
        &self.rng_cbor
    }

    pub fn ogmios_url(&self) -> &str {
        &self.ogmios_url
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn rngfid(&self) -> &str {
        &self.rngfid
    }

    pub fn output_len(&self) -> u32 {
        self.output_len
    }
}

const REDACTED: &str = "<redacted>";

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("network", &self.network)
            .field("blockfrost_api_key", &REDACTED)
            .field("wallet_seed", &REDACTED)
            .field("oracle_cbor", &self.oracle_cbor)
            .field("rng_cbor", &self.rng_cbor)
            .field("ogmios_url", &self.ogmios_url)
            .field("api_url", &self.api_url)
            .field("rngfid", &self.rngfid)
            .field("output_len", &self.output_len)
            .finish()
    }
}

impl fmt::Display for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        writeln!(f, "  \"network\": {},", self.network.id())?;
        writeln!(f, "  \"blockfrostApiKey\": {REDACTED:?},")?;
        writeln!(f, "  \"walletSeed\": {REDACTED:?},")?;
        writeln!(f, "  \"oracleCBOR\": {:?},", self.oracle_cbor)?;
        writeln!(f, "  \"rngCBOR\": {:?},", self.rng_cbor)?;
        writeln!(f, "  \"ogmiosUrl\": {:?},", self.ogmios_url)?;
        writeln!(f, "  \"rngAPIURL\": {:?},", self.api_url)?;
        writeln!(f, "  \"rngfid\": {:?},", self.rngfid)?;
        writeln!(f, "  \"rngOutputLen\": {}", self.output_len)?;
        write!(f, "}}")
    }
}
