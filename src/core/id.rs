//! Identifier and timestamp generation for new records.

use chrono::{DateTime, SubsecRound, Utc};
use rand::Rng;

const SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generates a new record identifier of the form `<epoch-millis>-<9 base-36 chars>`.
///
/// The random suffix keeps ids generated within the same millisecond apart. Ids are
/// unique within a session with overwhelming probability; they are not suitable as
/// secrets.
#[must_use]
pub fn new_id() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| char::from(BASE36[rng.random_range(0..BASE36.len())]))
        .collect();
    format!("{}-{suffix}", Utc::now().timestamp_millis())
}

/// Current time truncated to the millisecond precision records are persisted with.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_id_shape() {
        let id = new_id();
        let (millis, suffix) = id.split_once('-').unwrap_or_default();

        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn test_new_id_unique_in_tight_loop() {
        let ids: HashSet<String> = (0..1_000).map(|_| new_id()).collect();
        assert_eq!(ids.len(), 1_000);
    }

    #[test]
    fn test_now_has_millisecond_precision() {
        let t = now();
        assert_eq!(t.timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
