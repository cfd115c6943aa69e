use std::sync::atomic::{AtomicU32, Ordering};

use crate::utils::time::now_millis;

static FALLBACK_COUNTER: AtomicU32 = AtomicU32::new(0);

fn random_suffix() -> String {
    let mut bytes = [0u8; 4];
    match getrandom::fill(&mut bytes) {
        Ok(()) => bytes.iter().map(|b| format!("{b:02x}")).collect(),
        Err(err) => {
            tracing::debug!("getrandom unavailable ({err}), using counter suffix");
            format!("{:08x}", FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed))
        }
    }
}

/// Build an id of the form `<prefix>_<epoch millis>_<8 hex chars>`.
pub fn generate_id(prefix: &str) -> String {
    format!("{prefix}_{}_{}", now_millis(), random_suffix())
}
