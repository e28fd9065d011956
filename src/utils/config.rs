use crate::error::ConfigError;
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.testnet.cspr.cloud";
pub const DEFAULT_NODE_ADDRESS: &str = "https://node.testnet.casper.network/rpc";
pub const DEFAULT_CHAIN_NAME: &str = "casper-test";
pub const DEFAULT_PAYMENT_AMOUNT_MOTES: u64 = 400_000_000_000;
pub const DEFAULT_ENTRY_POINT: &str = "update_risk";
pub const DEFAULT_OVERRIDE_TARGET: &str = "validator_1";
pub const DEFAULT_VALIDATOR_LIMIT: usize = 100;
const MAX_VALIDATOR_LIMIT: usize = 250;

/// Resolved, immutable agent configuration. Built once at startup and handed to each
/// component's constructor.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    pub api_base_url: Url,
    pub api_key: String,
    pub http_timeout: Duration,
    pub validator_limit: usize,

    pub node_address: String,
    pub chain_name: String,
    pub secret_key_path: PathBuf,
    pub client_binary: String,
    pub payment_amount_motes: u64,
    /// Hex contract hash without the `hash-` prefix.
    pub contract_hash: String,
    pub entry_point: String,

    pub override_file: PathBuf,
    pub override_default_target: String,
    pub bridge_state_file: PathBuf,
    pub log_file: PathBuf,

    pub cycle_interval: Duration,
    pub override_repoll_interval: Duration,
    pub era_retry_interval: Duration,

    pub dry_run: bool,
    pub rng_seed: Option<u64>,
    pub blackbox_dump_dir: PathBuf,
}

pub fn parse_bool_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn validate_http_url(name: &str, raw: &str) -> Result<Url, ConfigError> {
    let parsed = raw.parse::<Url>().map_err(|e| {
        ConfigError::InvalidConfig(format!("{name} must be a valid URL, got `{raw}`: {e}"))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ConfigError::InvalidConfig(format!(
            "{name} must use http(s) scheme, got `{other}`"
        ))),
    }
}

fn normalize_contract_hash(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let hex = trimmed.strip_prefix("hash-").unwrap_or(trimmed);
    let valid = hex.len() == 64 && hex.bytes().all(|b| b.is_ascii_hexdigit());
    if !valid {
        return Err(ConfigError::InvalidConfig(format!(
            "RISK_CONTRACT_HASH must be 64 hex chars (optionally `hash-` prefixed), got `{trimmed}`"
        )));
    }
    Ok(hex.to_ascii_lowercase())
}

impl OracleConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration from any key/value source (the process environment in
    /// production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());
        let get_u64 = |key: &str, default: u64, min: u64, max: u64| -> Result<u64, ConfigError> {
            match get(key) {
                None => Ok(default),
                Some(raw) => {
                    let value = raw.parse::<u64>().map_err(|_| {
                        ConfigError::InvalidConfig(format!(
                            "{key} must be a valid u64, got `{raw}`"
                        ))
                    })?;
                    if !(min..=max).contains(&value) {
                        return Err(ConfigError::InvalidConfig(format!(
                            "{key} must be within {min}..={max}, got {value}"
                        )));
                    }
                    Ok(value)
                }
            }
        };
        let get_flag = |key: &str| -> Result<bool, ConfigError> {
            match get(key) {
                None => Ok(false),
                Some(raw) => parse_bool_flag(&raw).ok_or_else(|| {
                    ConfigError::InvalidConfig(format!("{key} must be a boolean, got `{raw}`"))
                }),
            }
        };

        let api_base_url = validate_http_url(
            "CSPR_CLOUD_API_URL",
            &get_or("CSPR_CLOUD_API_URL", DEFAULT_API_URL),
        )?;
        let api_key = get("CSPR_CLOUD_API_KEY").ok_or_else(|| {
            ConfigError::MissingConfig("CSPR_CLOUD_API_KEY must be set".to_string())
        })?;

        let node_address = get_or("CASPER_NODE_ADDRESS", DEFAULT_NODE_ADDRESS);
        validate_http_url("CASPER_NODE_ADDRESS", &node_address)?;

        let contract_hash = get("RISK_CONTRACT_HASH").ok_or_else(|| {
            ConfigError::MissingConfig("RISK_CONTRACT_HASH must be set".to_string())
        })?;
        let contract_hash = normalize_contract_hash(&contract_hash)?;

        let rng_seed = match get("ORACLE_RNG_SEED") {
            None => None,
            Some(raw) => Some(raw.parse::<u64>().map_err(|_| {
                ConfigError::InvalidConfig(format!(
                    "ORACLE_RNG_SEED must be a valid u64, got `{raw}`"
                ))
            })?),
        };

        Ok(Self {
            api_base_url,
            api_key,
            http_timeout: Duration::from_secs(get_u64("HTTP_TIMEOUT_SECS", 10, 1, 120)?),
            validator_limit: get_u64(
                "VALIDATOR_FETCH_LIMIT",
                DEFAULT_VALIDATOR_LIMIT as u64,
                1,
                MAX_VALIDATOR_LIMIT as u64,
            )? as usize,
            node_address,
            chain_name: get_or("CASPER_CHAIN_NAME", DEFAULT_CHAIN_NAME),
            secret_key_path: PathBuf::from(get_or("CASPER_SECRET_KEY_PATH", "secret_key.pem")),
            client_binary: get_or("CASPER_CLIENT_BIN", "casper-client"),
            payment_amount_motes: get_u64(
                "PAYMENT_AMOUNT_MOTES",
                DEFAULT_PAYMENT_AMOUNT_MOTES,
                1,
                u64::MAX,
            )?,
            contract_hash,
            entry_point: get_or("RISK_ENTRY_POINT", DEFAULT_ENTRY_POINT),
            override_file: PathBuf::from(get_or("OVERRIDE_FILE", "override.txt")),
            override_default_target: get_or("OVERRIDE_DEFAULT_TARGET", DEFAULT_OVERRIDE_TARGET),
            bridge_state_file: PathBuf::from(get_or(
                "BRIDGE_STATE_FILE",
                "risk-dashboard/public/risk_status.json",
            )),
            log_file: PathBuf::from(get_or(
                "AGENT_LOG_FILE",
                "risk-dashboard/public/agent_logs.txt",
            )),
            cycle_interval: Duration::from_secs(get_u64("CYCLE_INTERVAL_SECS", 30, 1, 3_600)?),
            override_repoll_interval: Duration::from_secs(get_u64(
                "OVERRIDE_REPOLL_SECS",
                10,
                1,
                3_600,
            )?),
            era_retry_interval: Duration::from_secs(get_u64("ERA_RETRY_SECS", 5, 1, 3_600)?),
            dry_run: get_flag("ORACLE_DRY_RUN")?,
            rng_seed,
            blackbox_dump_dir: PathBuf::from(get_or("BLACKBOX_DUMP_DIR", ".")),
        })
    }
}
