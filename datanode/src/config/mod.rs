use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    // defaults to datanode_<port> so several workers on one host log to separate files
    pub id: Option<String>,
    pub address: String,
    pub port: u16,
    // flat directory holding one file per block
    pub storage_path: String,
    pub log_level: String,
    pub log_base: String,
    pub apm_endpoint: Option<String>,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            id: None,
            address: "127.0.0.1".to_string(),
            port: 5001,
            storage_path: "./temp/datanode_5001".to_string(),
            log_level: "info".to_string(),
            log_base: "./temp/logs".to_string(),
            apm_endpoint: None,
        }
    }
}
impl Config {
    pub fn node_id(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| format!("datanode_{}", self.port))
    }
    /// Layers defaults, the yaml file, `DATANODE_` env vars and finally the positional
    /// `<port> <storage_dir>` arguments.
    pub fn load(args: &[String]) -> figment::error::Result<Self> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "default".to_owned());
        let config_file_path = std::env::var("CONFIG_PATH")
            .unwrap_or_else(|_| format!("./datanode/config/{}.yaml", env));
        let mut figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(config_file_path))
            .merge(Env::prefixed("DATANODE_"));
        if let Some(port) = args.first() {
            let port: u16 = port
                .parse()
                .map_err(|e| figment::Error::from(format!("invalid port {port:?} : {e}")))?;
            figment = figment.merge(("port", port));
        }
        if let Some(storage_path) = args.get(1) {
            figment = figment.merge(("storage_path", storage_path));
        }
        figment.extract()
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    let args: Vec<String> = std::env::args().skip(1).collect();
    Config::load(&args).unwrap_or_else(|e| panic!("Error while reading datanode config : {e}"))
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_arguments_override_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("datanode.yaml", "port: 6001\nstorage_path: ./from_file\n")?;
            jail.set_env("CONFIG_PATH", "datanode.yaml");
            let config = Config::load(&[])?;
            assert_eq!(config.port, 6001);
            assert_eq!(config.storage_path, "./from_file");
            assert_eq!(config.node_id(), "datanode_6001");

            let args = vec!["5003".to_owned(), "slavenode_3".to_owned()];
            let config = Config::load(&args)?;
            assert_eq!(config.port, 5003);
            assert_eq!(config.storage_path, "slavenode_3");
            assert_eq!(config.node_id(), "datanode_5003");
            Ok(())
        });
    }

    #[test]
    fn bad_port_argument_is_an_error() {
        figment::Jail::expect_with(|_jail| {
            assert!(Config::load(&["not-a-port".to_owned()]).is_err());
            Ok(())
        });
    }
}
