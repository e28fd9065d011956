use std::fs;
use std::path::Path;

fn write_env_template(file: &mut fs::File) -> std::io::Result<()> {
    use std::io::Write;
    writeln!(file, "# Risk oracle agent configuration")?;
    writeln!(file)?;
    writeln!(file, "CSPR_CLOUD_API_URL=\"https://api.testnet.cspr.cloud\"")?;
    writeln!(file, "CSPR_CLOUD_API_KEY=\"CHANGE_ME\"")?;
    writeln!(file, "RISK_CONTRACT_HASH=\"CHANGE_ME\"")?;
    writeln!(file, "CASPER_SECRET_KEY_PATH=\"secret_key.pem\"")?;
    writeln!(file, "CASPER_CHAIN_NAME=\"casper-test\"")?;
    writeln!(file)?;
    writeln!(file, "OVERRIDE_FILE=\"override.txt\"")?;
    writeln!(file, "BRIDGE_STATE_FILE=\"risk-dashboard/public/risk_status.json\"")?;
    writeln!(file, "AGENT_LOG_FILE=\"risk-dashboard/public/agent_logs.txt\"")?;
    writeln!(file)?;
    writeln!(file, "RUST_LOG=\"info\"")?;
    Ok(())
}

/// Parses `.env` content into key/value pairs. Quotes and trailing comments are
/// stripped; malformed lines are skipped.
pub fn parse_env_lines(content: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
        let Some((key, value)) = trimmed.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        let value = value.trim();
        let parsed = if value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')))
        {
            &value[1..value.len() - 1]
        } else {
            value.split('#').next().unwrap_or("").trim()
        };
        pairs.push((key.to_string(), parsed.to_string()));
    }
    pairs
}

/// Exports every pair of the given `.env` file that the process environment does not
/// already define.
pub fn load_dot_env_from(path: &Path) {
    if !path.exists() {
        return;
    }

    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[ENV] Failed to read {}: {}", path.display(), e);
            return;
        }
    };

    for (key, value) in parse_env_lines(&content) {
        // Explicit process environment wins over the file.
        if std::env::var_os(&key).is_some() {
            continue;
        }
        std::env::set_var(key, value);
    }
}

fn ensure_env_example_exists() {
    let env_example = Path::new(".env.example");
    if !env_example.exists() {
        if let Ok(mut file) = fs::File::create(env_example) {
            let _ = write_env_template(&mut file);
        }
    }
}

/// Loads `.env`. Runs before anything reads configuration from the environment.
pub fn harden_env_setup() {
    ensure_env_example_exists();
    load_dot_env_from(Path::new(".env"));
    if std::env::var("CSPR_CLOUD_API_KEY").is_err() {
        eprintln!("[ENV] WARN: CSPR_CLOUD_API_KEY is not set");
    }
    if std::env::var("RISK_CONTRACT_HASH").is_err() {
        eprintln!("[ENV] WARN: RISK_CONTRACT_HASH is not set");
    }
}
