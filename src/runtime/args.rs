use crate::utils::config::parse_bool_flag;

/// Process-level switches. Like the rest of the configuration these come from the
/// environment; command-line arguments are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuntimeArgs {
    pub explain_config: bool,
    pub max_cycles: Option<u64>,
}

fn parse_max_cycles(raw: Option<String>) -> anyhow::Result<Option<u64>> {
    match raw {
        Some(value) if !value.trim().is_empty() => {
            let trimmed = value.trim();
            let parsed = trimmed.parse::<u64>().map_err(|err| {
                anyhow::anyhow!(
                    "invalid ORACLE_MAX_CYCLES '{}': {} (set a positive integer or leave empty)",
                    trimmed,
                    err
                )
            })?;
            if parsed == 0 {
                return Err(anyhow::anyhow!(
                    "invalid ORACLE_MAX_CYCLES '0' (set a positive integer or leave empty)"
                ));
            }
            Ok(Some(parsed))
        }
        _ => Ok(None),
    }
}

fn parse_runtime_args_from<I, S, F>(args: I, lookup: F) -> anyhow::Result<RuntimeArgs>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: Fn(&str) -> Option<String>,
{
    let supplied_args = args
        .into_iter()
        .map(|arg| arg.as_ref().to_string())
        .collect::<Vec<_>>();
    if !supplied_args.is_empty() {
        let joined = supplied_args.join(" ");
        return Err(anyhow::anyhow!(
            "CLI arguments are not supported. Configure .env keys instead (ORACLE_EXPLAIN_CONFIG, ORACLE_MAX_CYCLES, ORACLE_DRY_RUN, ...). Received args: {}",
            joined
        ));
    }

    let explain_config = lookup("ORACLE_EXPLAIN_CONFIG")
        .and_then(|raw| parse_bool_flag(&raw))
        .unwrap_or(false);
    let max_cycles = parse_max_cycles(lookup("ORACLE_MAX_CYCLES"))?;

    Ok(RuntimeArgs {
        explain_config,
        max_cycles,
    })
}

pub fn parse_runtime_args() -> anyhow::Result<RuntimeArgs> {
    parse_runtime_args_from(std::env::args().skip(1), |key| std::env::var(key).ok())
}
