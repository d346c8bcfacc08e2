use std::net::IpAddr;

use datanode::{api_service::rocket, config::CONFIG};
use storage::{file_storage::FileStorage, storage::Storage};
use utilities::{
    logger::{error, info, init_logger},
    result::Result,
};

#[tokio::main]
async fn main() -> Result<()> {
    let node_id = CONFIG.node_id();
    let _gaurd = init_logger(
        "Datanode",
        &node_id,
        &CONFIG.log_level,
        &CONFIG.log_base,
        CONFIG.apm_endpoint.as_deref(),
    )?;
    info!(port = CONFIG.port, storage = %CONFIG.storage_path, "Starting datanode");
    let store = match FileStorage::new(&CONFIG.storage_path) {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "Error while creating the storage Hence shuting down");
            return Err(e.into());
        }
    };
    match store.available_blocks().await {
        Ok(blocks) => info!(count = blocks.len(), "Blocks already present in storage"),
        Err(e) => error!(error = %e, "Error while listing the blocks in storage"),
    }
    let address: IpAddr = CONFIG.address.parse()?;
    info!(%address, port = CONFIG.port, "Starting : rocket server");
    if let Err(e) = rocket(store, address, CONFIG.port).launch().await {
        error!(error = %e, "Rocket service has returned error");
        return Err(format!("rocket server failed : {e}").into());
    }
    Ok(())
}
