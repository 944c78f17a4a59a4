//! Protocol ID generation.
//!
//! Every accepted complaint gets a human-readable, time-ordered id of the
//! form `PROTO-<YYYYmmddHHMMSSffffff>` (UTC, microsecond resolution). A
//! process-wide high-water mark bumps the stamp forward when two calls
//! land in the same microsecond, so concurrent intake requests can never
//! collide and ids are strictly increasing.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Local, Utc};

static LAST_STAMP_US: AtomicI64 = AtomicI64::new(0);

/// Generate a fresh protocol id.
pub fn generate() -> String {
    let stamp_us = next_stamp_micros(Utc::now().timestamp_micros());
    let when = DateTime::<Utc>::from_timestamp_micros(stamp_us).unwrap_or_else(Utc::now);
    format!("PROTO-{}", when.format("%Y%m%d%H%M%S%6f"))
}

/// Creation stamp in the display format used everywhere a record is
/// shown: `DD/MM/YYYY HH:MM`, local time.
pub fn display_timestamp() -> String {
    Local::now().format("%d/%m/%Y %H:%M").to_string()
}

fn next_stamp_micros(now_us: i64) -> i64 {
    loop {
        let prev = LAST_STAMP_US.load(Ordering::SeqCst);
        let candidate = if now_us > prev { now_us } else { prev + 1 };
        if LAST_STAMP_US
            .compare_exchange(prev, candidate, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_shape() {
        let id = generate();
        assert!(id.starts_with("PROTO-"));
        // 14 date-time digits plus 6 fractional digits.
        let digits = &id["PROTO-".len()..];
        assert_eq!(digits.len(), 20);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_rapid_calls_never_collide() {
        let ids: Vec<String> = (0..1000).map(|_| generate()).collect();
        let unique: HashSet<&String> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_ids_strictly_increase_lexically() {
        let ids: Vec<String> = (0..100).map(|_| generate()).collect();
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_next_stamp_bumps_on_same_tick() {
        let a = next_stamp_micros(1_700_000_000_000_000);
        let b = next_stamp_micros(1_700_000_000_000_000);
        assert!(b > a);
    }

    #[test]
    fn test_display_timestamp_shape() {
        let stamp = display_timestamp();
        // DD/MM/YYYY HH:MM
        assert_eq!(stamp.len(), 16);
        assert_eq!(&stamp[2..3], "/");
        assert_eq!(&stamp[5..6], "/");
        assert_eq!(&stamp[10..11], " ");
        assert_eq!(&stamp[13..14], ":");
    }
}
