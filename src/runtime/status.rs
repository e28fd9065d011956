use crate::runtime::RuntimeArgs;
use crate::utils::config::OracleConfig;

fn redact(secret: &str) -> String {
    let visible = secret.chars().take(4).collect::<String>();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}

/// Logs the resolved configuration with secrets redacted.
pub fn emit_config_status(config: &OracleConfig, args: &RuntimeArgs) {
    tracing::info!(
        "[OPS] Data source: api={} key={} timeout={}s validator_limit={}",
        config.api_base_url,
        redact(&config.api_key),
        config.http_timeout.as_secs(),
        config.validator_limit
    );
    tracing::info!(
        "[OPS] Deploy target: node={} chain={} contract=hash-{} entry_point={} payment={} motes",
        config.node_address,
        config.chain_name,
        config.contract_hash,
        config.entry_point,
        config.payment_amount_motes
    );
    tracing::info!(
        "[OPS] Side channels: override={} (default target {}) bridge={} log={}",
        config.override_file.display(),
        config.override_default_target,
        config.bridge_state_file.display(),
        config.log_file.display()
    );
    tracing::info!(
        "[OPS] Cadence: cycle={}s override_repoll={}s era_retry={}s max_cycles={}",
        config.cycle_interval.as_secs(),
        config.override_repoll_interval.as_secs(),
        config.era_retry_interval.as_secs(),
        args.max_cycles
            .map(|n| n.to_string())
            .unwrap_or_else(|| "unbounded".to_string())
    );

    if config.dry_run {
        tracing::info!("[OPS] ORACLE_DRY_RUN=true: deploys are logged, not broadcast.");
    } else if !config.secret_key_path.exists() {
        tracing::warn!(
            "[OPS] Secret key {} not found; every deploy will fail until it exists.",
            config.secret_key_path.display()
        );
    }
    if let Some(seed) = config.rng_seed {
        tracing::info!("[OPS] Signal RNG seeded with {}.", seed);
    }
}
