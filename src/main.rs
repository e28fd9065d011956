use risk_oracle::agent::{Agent, CycleTiming, SignalScheduler};
use risk_oracle::cspr_cloud::CsprCloudClient;
use risk_oracle::executor::casper_client::CasperClientSubmitter;
use risk_oracle::executor::dry_run::DryRunSubmitter;
use risk_oracle::executor::Submitter;
use risk_oracle::operator::file_channel::FileChannel;
use risk_oracle::risk::{RandomSignals, SignalSource};
use risk_oracle::runtime::{emit_config_status, parse_runtime_args};
use risk_oracle::utils::blackbox;
use risk_oracle::utils::config::OracleConfig;
use risk_oracle::utils::env_guard::harden_env_setup;
use risk_oracle::utils::logging::init_tracing;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    harden_env_setup();
    let runtime_args = parse_runtime_args()?;
    let config = OracleConfig::load()?;

    init_tracing(Some(&config.log_file))?;
    emit_config_status(&config, &runtime_args);
    if runtime_args.explain_config {
        tracing::info!("[OPS] ORACLE_EXPLAIN_CONFIG=true: exiting after config report.");
        return Ok(());
    }

    blackbox::install_panic_hook_once(config.blackbox_dump_dir.clone());
    blackbox::record("startup", "agent starting", None);

    let source = CsprCloudClient::new(
        config.api_base_url.clone(),
        config.api_key.clone(),
        config.http_timeout,
    );
    let signals: Box<dyn SignalSource> = match config.rng_seed {
        Some(seed) => Box::new(RandomSignals::seeded(seed)),
        None => Box::new(RandomSignals::from_entropy()),
    };
    let submitter: Box<dyn Submitter> = if config.dry_run {
        Box::new(DryRunSubmitter)
    } else {
        Box::new(CasperClientSubmitter::from_config(&config))
    };
    let channel = FileChannel::new(
        config.override_file.clone(),
        config.bridge_state_file.clone(),
        config.override_default_target.clone(),
    );

    let mut agent = Agent::new(
        Box::new(source),
        signals,
        submitter,
        Box::new(channel),
        CycleTiming::from_config(&config),
        config.validator_limit,
    );

    // SHUTDOWN SIGNAL
    let (shutdown_tx, shutdown_rx) = tokio::sync::broadcast::channel(1);

    {
        let shutdown_tx_ctrl_c = shutdown_tx.clone();
        let dump_dir = config.blackbox_dump_dir.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_err() {
                return;
            }
            tracing::info!("[CYCLE] Ctrl+C received. Finishing current cycle...");
            blackbox::record("signal", "ctrl_c_received", None);
            let _ = blackbox::dump("ctrl_c", &dump_dir);
            let _ = shutdown_tx_ctrl_c.send(());
        });
    }

    #[cfg(unix)]
    {
        let shutdown_tx_sigterm = shutdown_tx.clone();
        let dump_dir = config.blackbox_dump_dir.clone();
        tokio::spawn(async move {
            use tokio::signal::unix::{signal, SignalKind};
            let Ok(mut term_signal) = signal(SignalKind::terminate()) else {
                return;
            };
            let _ = term_signal.recv().await;
            tracing::info!("[CYCLE] SIGTERM received. Finishing current cycle...");
            blackbox::record("signal", "sigterm_received", None);
            let _ = blackbox::dump("sigterm", &dump_dir);
            let _ = shutdown_tx_sigterm.send(());
        });
    }

    let mut scheduler = SignalScheduler::new(shutdown_rx, runtime_args.max_cycles);
    let cycles = agent.run(&mut scheduler).await;
    drop(shutdown_tx);

    tracing::info!("[OPS] Risk oracle stopped after {} cycles. Goodbye.", cycles);
    Ok(())
}
