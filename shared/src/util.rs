/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms)
///
/// The backend mints ids in the same shape, so client-side ids stay
/// sortable alongside server ones.
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

/// Generate a local id for a guest cart line.
///
/// Guest lines never touch the backend, so their ids are negated
/// snowflakes. The two id spaces stay disjoint: server rows are
/// positive, local rows are negative, and a line survives reordering
/// or removal of its neighbours without changing identity.
pub fn guest_line_id() -> i64 {
    -snowflake_id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snowflake_is_js_safe() {
        for _ in 0..100 {
            let id = snowflake_id();
            assert!(id > 0);
            assert!(id <= 9_007_199_254_740_991); // Number.MAX_SAFE_INTEGER
        }
    }

    #[test]
    fn test_guest_ids_are_negative() {
        for _ in 0..100 {
            assert!(guest_line_id() < 0);
        }
    }

    #[test]
    fn test_snowflake_ordering() {
        let a = snowflake_id();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = snowflake_id();
        assert!(b > a);
    }
}
