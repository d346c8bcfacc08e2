use std::{net::IpAddr, sync::Arc};

use namenode::{
    api_service::rocket,
    client_handler::ClientHandler,
    config::CONFIG,
    datanode::selection_policy::round_robin_selection_policy::RoundRobinSelectionPolicy,
    ledger::{json_ledger::JsonLedger, replayer::Replayer},
};
use utilities::{
    logger::{error, info, init_logger},
    result::Result,
};

#[tokio::main]
async fn main() -> Result<()> {
    let _gaurd = init_logger(
        "Namenode",
        &CONFIG.id,
        &CONFIG.log_level,
        &CONFIG.log_base,
        CONFIG.apm_endpoint.as_deref(),
    )?;
    info!(path = %CONFIG.metadata_file, "Opening the metadata ledger");
    let ledger = match JsonLedger::new(&CONFIG.metadata_file).await {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "Error while intiating the ledger Hence shuting down");
            return Err(e.into());
        }
    };
    let state = match ledger.replay() {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "Error while reading the metadata Hence shuting down");
            return Err(e.into());
        }
    };
    let datanode_selector = RoundRobinSelectionPolicy::new(CONFIG.datanodes.clone())?;
    let handler = Arc::new(ClientHandler::new(
        state,
        Box::new(datanode_selector),
        Box::new(ledger),
    ));
    info!(datanodes = ?handler.datanodes(), files = handler.list_files().await.len(), "Namenode state ready");

    let address: IpAddr = CONFIG.address.parse()?;
    info!(%address, port = CONFIG.port, "Starting : rocket server");
    if let Err(e) = rocket(handler, address, CONFIG.port).launch().await {
        error!(error = %e, "Rocket service has returned error");
        return Err(format!("rocket server failed : {e}").into());
    }
    Ok(())
}
