use client::{
    command_runner::CommandRunner, config::CONFIG, datanode::service::DatanodeService,
    namenode::service::NamenodeService,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use utilities::{
    logger::{error, info, init_logger},
    result::Result,
};

#[tokio::main]
async fn main() -> Result<()> {
    let _gaurd = init_logger(
        "Client",
        &CONFIG.client_id,
        &CONFIG.log_level,
        &CONFIG.log_base,
        CONFIG.apm_endpoint.as_deref(),
    )?;
    let command_executer = CommandRunner::new(
        NamenodeService::new(CONFIG.namenode_addrs.clone()),
        DatanodeService::new(),
        CONFIG.block_size,
        CONFIG.datanode_addrs.clone(),
    );
    info!(namenode = %CONFIG.namenode_addrs, "starting the Client");

    // one-shot mode
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        return match command_executer.handle_args(&args).await {
            Ok(message) => {
                println!("Success : {}", message);
                Ok(())
            }
            Err(e) => {
                println!("Error : {}", e);
                Err(e.into())
            }
        };
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(input)) if input.trim().is_empty() => continue,
            Ok(Some(input)) => match command_executer.handle_input(&input).await {
                Ok(message) => {
                    println!("Success : {}", message);
                }
                Err(message) => {
                    println!("Error : {}", message);
                }
            },
            Ok(None) => break,
            Err(e) => {
                error!(error = %e, "error while reading the command");
                return Err(e.into());
            }
        }
    }
    Ok(())
}
