extern crate pretty_env_logger;

use drasil_norn::{ClientConfig, NornError, OracleClient};
use serde::Serialize;
use std::env;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "norn",
    about = "Talks to the RNG Oracle service, configuration is read from the environment"
)]
struct Opt {
    #[structopt(long, help = "Optional: use an existing rngfid instead of a generated one")]
    rngfid: Option<String>,

    #[structopt(long, help = "Optional: length of the random output")]
    rnlen: Option<u32>,

    #[structopt(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, StructOpt)]
enum Cmd {
    /// Initiate a new rngfid
    Init,
    /// Mint an Oracle DID
    Mint {
        #[structopt(short, long)]
        name: String,
    },
    /// Register an Oracle DID with the oracle contract
    Register {
        #[structopt(short, long)]
        unit: String,
        #[structopt(short, long)]
        init_tx: String,
    },
    /// Update the oracle with a new random output
    Update {
        #[structopt(short, long)]
        unit: String,
        #[structopt(short, long)]
        init_tx: String,
        #[structopt(short, long)]
        current_tx: String,
    },
    /// Query the latest random output
    Query {
        #[structopt(short, long)]
        current_tx: String,
    },
}

fn print<T: Serialize>(response: &T) -> Result<(), NornError> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}

fn main() -> Result<(), NornError> {
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "norn=info");
    }
    pretty_env_logger::init();
    let opt = Opt::from_args();

    let mut config = ClientConfig::from_env()?;
    if let Some(rngfid) = &opt.rngfid {
        config = config.with_rngfid(rngfid);
    }
    if let Some(rnlen) = opt.rnlen {
        config = config.with_output_len(rnlen)?;
    }
    log::info!("Oracle service: {}", config.api_url());
    log::debug!("{}", config);

    let client = OracleClient::new(config)?;
    match opt.cmd {
        Cmd::Init => {
            log::info!("Initiating rngfid '{}'", client.rngfid());
            print(&client.initiate()?)
        }
        Cmd::Mint { name } => {
            log::info!("Minting Oracle DID '{}'", name);
            print(&client.mint_oracle_did(&name)?)
        }
        Cmd::Register { unit, init_tx } => {
            log::info!("Registering Oracle DID '{}'", unit);
            print(&client.did_register(&unit, &init_tx)?)
        }
        Cmd::Update {
            unit,
            init_tx,
            current_tx,
        } => {
            log::info!("Updating Oracle DID '{}'", unit);
            print(&client.update_oracle(&unit, &init_tx, &current_tx)?)
        }
        Cmd::Query { current_tx } => print(&client.query(&current_tx)?),
    }
}
