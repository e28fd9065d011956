//! Risk oracle agent for Casper validators.
//!
//! Every cycle the agent pulls the latest era's top validators from CSPR.cloud, scores
//! each one from stake concentration, reward volatility and an unstake-pressure signal,
//! and pushes significant score changes on-chain through `casper-client`. A local
//! override file lets an operator force a score, and a bridge JSON file mirrors the
//! last accepted submission for the dashboard.

pub mod agent;
pub mod cspr_cloud;
pub mod error;
pub mod executor;
pub mod gate;
pub mod model;
pub mod operator;
pub mod risk;
pub mod runtime;
pub mod utils;
