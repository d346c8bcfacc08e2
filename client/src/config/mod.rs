use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use once_cell::sync::Lazy;
use proto::types::BLOCK_SIZE;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    pub client_id: String,
    pub namenode_addrs: String,
    pub block_size: u64,
    // only probed by the status command, placement comes from the namenode
    pub datanode_addrs: Vec<String>,
    pub log_level: String,
    pub log_base: String,
    pub apm_endpoint: Option<String>,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            client_id: "client_0".to_string(),
            namenode_addrs: "http://127.0.0.1:5000".to_string(),
            block_size: BLOCK_SIZE,
            datanode_addrs: (5001..=5004)
                .map(|port| format!("http://127.0.0.1:{port}"))
                .collect(),
            log_level: "info".to_string(),
            log_base: "./temp/logs".to_string(),
            apm_endpoint: None,
        }
    }
}
impl Config {
    pub fn figment() -> Figment {
        let env = std::env::var("ENV").unwrap_or_else(|_| "default".to_owned());
        let config_file_path = std::env::var("CONFIG_PATH")
            .unwrap_or_else(|_| format!("./client/config/{}.yaml", env));
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(config_file_path))
            .merge(Env::prefixed("CLIENT_"))
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    Config::figment()
        .extract()
        .unwrap_or_else(|e| panic!("Error while reading client config : {e}"))
});
