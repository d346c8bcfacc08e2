use std::sync::Arc;

use utilities::logger::{instrument, tracing, warn};

use crate::{datanode::Datanode, namenode::Namenode};

pub struct ClusterStatusHandler<N, D> {
    namenode: Arc<N>,
    datanode: Arc<D>,
    datanode_addrs: Vec<String>,
}
impl<N, D> ClusterStatusHandler<N, D>
where
    N: Namenode + Send + Sync,
    D: Datanode + Send + Sync,
{
    pub fn new(namenode: Arc<N>, datanode: Arc<D>, datanode_addrs: Vec<String>) -> Self {
        Self {
            namenode,
            datanode,
            datanode_addrs,
        }
    }

    /// One line per node. An unreachable node is reported, not treated as a failure.
    #[instrument(name = "client_cluster_status", skip(self))]
    pub async fn cluster_status(&self) -> String {
        let mut report = vec![match self.namenode.health().await {
            Ok(health) => format!("namenode : up ({})", health.status),
            Err(e) => {
                warn!(error = %e, "namenode health check failed");
                format!("namenode : down ({e})")
            }
        }];
        for address in &self.datanode_addrs {
            report.push(match self.datanode.health(address).await {
                Ok(health) => format!("datanode {address} : up ({})", health.status),
                Err(e) => {
                    warn!(error = %e, %address, "datanode health check failed");
                    format!("datanode {address} : down ({e})")
                }
            });
        }
        report.join("\n")
    }
}
