mod cluster_status_handler;
mod fetch_file_handler;
mod store_file_handler;
pub mod test_file;

use std::sync::Arc;

use cluster_status_handler::ClusterStatusHandler;
use fetch_file_handler::FetchFileHandler;
use proto::{DfsError, error::Result};
use store_file_handler::StoreFileHandler;
use test_file::{DEFAULT_TEST_FILE_MB, create_test_file};

use crate::{datanode::Datanode, namenode::Namenode};

const HELP: &str = "\nadd command : add local_file_path\nread command : read remote_file_name output_file_path\nlist command : list\nstatus command : status\ncreate_testfile command : create_testfile file_path [size_mb]\n";

pub struct CommandRunner<N, D> {
    namenode: Arc<N>,
    store_file_handler: StoreFileHandler<N, D>,
    fetch_file_handler: FetchFileHandler<N, D>,
    cluster_status_handler: ClusterStatusHandler<N, D>,
}
impl<N, D> CommandRunner<N, D>
where
    N: Namenode + Send + Sync,
    D: Datanode + Send + Sync,
{
    pub fn new(namenode: N, datanode: D, block_size: u64, datanode_addrs: Vec<String>) -> Self {
        let namenode = Arc::new(namenode);
        let datanode = Arc::new(datanode);
        CommandRunner {
            store_file_handler: StoreFileHandler::new(
                namenode.clone(),
                datanode.clone(),
                block_size,
            ),
            fetch_file_handler: FetchFileHandler::new(namenode.clone(), datanode.clone()),
            cluster_status_handler: ClusterStatusHandler::new(
                namenode.clone(),
                datanode,
                datanode_addrs,
            ),
            namenode,
        }
    }

    pub async fn add(&self, local_file_path: &str) -> Result<String> {
        self.store_file_handler.store_file(local_file_path).await
    }

    pub async fn read(&self, file_name: &str, output_path: &str) -> Result<String> {
        self.fetch_file_handler
            .fetch_file(file_name, output_path)
            .await
    }

    /// Runs one line typed at the prompt. Arguments are separated by whitespace.
    pub async fn handle_input(&self, command: &str) -> Result<String> {
        let inputs: Vec<&str> = command.split_whitespace().collect();
        self.handle_args(&inputs).await
    }

    /// Runs one command given as already separated arguments, so paths may contain spaces.
    pub async fn handle_args(&self, inputs: &[&str]) -> Result<String> {
        match inputs {
            ["add", local_file_path] => self.add(local_file_path).await,
            ["add", ..] => Err(usage("add")),
            ["read", file_name, output_path] => self.read(file_name, output_path).await,
            ["read", ..] => Err(usage("read")),
            ["list"] => {
                let files = self.namenode.list_files().await?;
                if files.is_empty() {
                    Ok("no files stored".to_owned())
                } else {
                    Ok(files.join("\n"))
                }
            }
            ["status"] => Ok(self.cluster_status_handler.cluster_status().await),
            ["create_testfile", path] => create_test_file(path, DEFAULT_TEST_FILE_MB).await,
            ["create_testfile", path, size_mb] => {
                let size_mb = size_mb.parse::<u64>().map_err(|e| {
                    DfsError::InvalidArgument(format!("Invalid size {size_mb:?} : {e}"))
                })?;
                create_test_file(path, size_mb).await
            }
            ["create_testfile", ..] => Err(usage("create_testfile")),
            ["help"] => Ok(HELP.to_owned()),
            _ => Err(DfsError::InvalidArgument(
                "Invalid Command Please use valid command use :help to list available commands"
                    .to_owned(),
            )),
        }
    }
}

fn usage(command: &str) -> DfsError {
    DfsError::InvalidArgument(format!(
        "Invalid {command} command usage please use <help> to get help"
    ))
}
