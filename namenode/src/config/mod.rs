use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    pub id: String,
    pub address: String,
    pub port: u16,
    // single json document holding every committed file
    pub metadata_file: String,
    // static cluster membership, in placement order
    pub datanodes: Vec<String>,
    pub log_level: String,
    pub log_base: String,
    pub apm_endpoint: Option<String>,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            id: "namenode_0".to_string(),
            address: "127.0.0.1".to_string(),
            port: 5000,
            metadata_file: "namenode_data/metadata.json".to_string(),
            datanodes: (5001..=5004)
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
            .unwrap_or_else(|_| format!("./namenode/config/{}.yaml", env));
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(config_file_path))
            .merge(Env::prefixed("NAMENODE_"))
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    Config::figment()
        .extract()
        .unwrap_or_else(|e| panic!("Error while reading namenode config : {e}"))
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_four_worker_cluster() {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .extract()
            .unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.datanodes.len(), 4);
        assert_eq!(config.datanodes[0], "http://127.0.0.1:5001");
    }

    #[test]
    fn yaml_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "namenode.yaml",
                "port: 7000\ndatanodes:\n  - http://10.0.0.1:9000\n  - http://10.0.0.2:9000\n",
            )?;
            let config: Config = Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Yaml::file("namenode.yaml"))
                .extract()?;
            assert_eq!(config.port, 7000);
            assert_eq!(config.datanodes, vec!["http://10.0.0.1:9000", "http://10.0.0.2:9000"]);
            assert_eq!(config.metadata_file, "namenode_data/metadata.json");
            Ok(())
        });
    }
}
