use std::fs;

#[test]
fn dot_env_is_loaded_before_runtime_switches_are_read() {
    let main_source = fs::read_to_string("src/main.rs").expect("main source must be readable");
    let env_load = main_source
        .find("harden_env_setup();")
        .expect("main must load .env");
    let args_parse = main_source
        .find("parse_runtime_args()?")
        .expect("main must parse runtime switches");
    let config_load = main_source
        .find("OracleConfig::load()?")
        .expect("main must load configuration");
    assert!(
        env_load < args_parse,
        ".env must be loaded before ORACLE_MAX_CYCLES / ORACLE_EXPLAIN_CONFIG are read"
    );
    assert!(env_load < config_load, ".env must be loaded before OracleConfig");
}
