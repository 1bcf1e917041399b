//! Client library for the Drasil RNG Oracle service.
//!
//! The oracle service builds and submits the Cardano transactions, this crate
//! only sends the requests for initiating an rngfid, minting and registering
//! an Oracle DID, updating the oracle and querying its random output.
pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::OracleClient;
pub use config::{random_rngfid, ClientConfig};
pub use error::{NornError, Result};
pub use models::*;
