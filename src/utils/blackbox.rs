//! Flight recorder for the agent loop.
//!
//! Keeps the most recent agent events (override pushes, submissions, fetch failures)
//! in a bounded ring buffer and writes them to `crash_report_<ms>.json` on panic or
//! shutdown signal.

use serde::Serialize;
use serde_json::Value;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

pub const BLACKBOX_CAPACITY: usize = 512;

#[derive(Debug, Clone, Serialize)]
pub struct BlackboxEvent {
    ts_ms: u64,
    category: String,
    message: String,
    details: Option<Value>,
}

#[derive(Debug, Serialize)]
struct BlackboxDump {
    reason: String,
    dumped_at_ms: u64,
    events: Vec<BlackboxEvent>,
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_millis().min(u64::MAX as u128) as u64)
        .unwrap_or(0)
}

fn state() -> MutexGuard<'static, VecDeque<BlackboxEvent>> {
    static STATE: OnceLock<Mutex<VecDeque<BlackboxEvent>>> = OnceLock::new();
    let lock = STATE
        .get_or_init(|| Mutex::new(VecDeque::with_capacity(BLACKBOX_CAPACITY)))
        .lock();
    match lock {
        Ok(g) => g,
        Err(p) => p.into_inner(),
    }
}

pub fn record(category: impl Into<String>, message: impl Into<String>, details: Option<Value>) {
    let mut events = state();
    if events.len() >= BLACKBOX_CAPACITY {
        let _ = events.pop_front();
    }
    events.push_back(BlackboxEvent {
        ts_ms: now_ms(),
        category: category.into(),
        message: message.into(),
        details,
    });
}

pub fn len() -> usize {
    state().len()
}

/// Writes the buffered events to `dir`. Returns the dump path on success.
pub fn dump(reason: &str, dir: &Path) -> Option<PathBuf> {
    let events = state().iter().cloned().collect::<Vec<_>>();
    let payload = BlackboxDump {
        reason: reason.to_string(),
        dumped_at_ms: now_ms(),
        events,
    };
    let path = dir.join(format!("crash_report_{}.json", payload.dumped_at_ms));
    let json = serde_json::to_vec_pretty(&payload).ok()?;
    let _ = fs::create_dir_all(dir);
    fs::write(&path, json).ok().map(|_| path)
}

pub fn install_panic_hook_once(dump_dir: PathBuf) {
    static INSTALLED: OnceLock<()> = OnceLock::new();
    if INSTALLED.set(()).is_err() {
        return;
    }
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        record("panic", panic_info.to_string(), None);
        if let Some(path) = dump("panic", &dump_dir) {
            eprintln!("[BLACKBOX] panic dump written to {}", path.display());
        }
        previous(panic_info);
    }));
}
