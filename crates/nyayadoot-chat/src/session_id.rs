use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_CHARS: usize = 8;

/// Highest millisecond stamp handed out so far in this process
static LAST_STAMP: AtomicU64 = AtomicU64::new(0);

/// Generate an opaque session id: a base-36 millisecond stamp followed by
/// eight random base-36 characters.
///
/// The stamp never repeats within a process, even when the clock stalls or
/// steps backwards, so ids from one process are distinct before the random
/// part is even considered.
pub fn generate_session_id() -> String {
    let stamp = next_stamp();
    let mut rng = rand::thread_rng();
    let suffix: String = (0..RANDOM_CHARS)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}{}", to_base36(stamp), suffix)
}

fn next_stamp() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut prev = LAST_STAMP.load(Ordering::Relaxed);
    loop {
        let next = now.max(prev + 1);
        match LAST_STAMP.compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => prev = actual,
        }
    }
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}
