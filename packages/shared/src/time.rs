//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, FixedOffset};

/// JST is UTC+9
const JST_OFFSET_SECS: i32 = 9 * 3600;

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp in JST (milliseconds)
    fn now_jst_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_jst_millis(&self) -> i64 {
        get_jst_timestamp()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_jst_millis(&self) -> i64 {
        self.fixed_time
    }
}

fn to_jst(timestamp_millis: i64) -> Option<DateTime<FixedOffset>> {
    let jst = FixedOffset::east_opt(JST_OFFSET_SECS)?;
    DateTime::from_timestamp_millis(timestamp_millis).map(|dt| dt.with_timezone(&jst))
}

/// Get current Unix timestamp in JST (milliseconds)
///
/// A Unix timestamp does not depend on the offset, so this is the UTC instant.
pub fn get_jst_timestamp() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Convert Unix timestamp (milliseconds) to JST RFC 3339 format
///
/// Returns `None` when the timestamp is outside chrono's representable range.
pub fn timestamp_to_jst_rfc3339(timestamp_millis: i64) -> Option<String> {
    to_jst(timestamp_millis).map(|dt| dt.to_rfc3339())
}

/// Convert Unix timestamp (milliseconds) to a `HH:MM:SS` wall clock string in JST
pub fn timestamp_to_jst_clock(timestamp_millis: i64) -> Option<String> {
    to_jst(timestamp_millis).map(|dt| dt.format("%H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_returns_non_zero_timestamp() {
        // テスト項目: SystemClock が 0 以外のタイムスタンプを返す
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let timestamp = clock.now_jst_millis();

        // then (期待する結果):
        assert!(timestamp > 0);
    }

    #[test]
    fn test_fixed_clock_returns_consistent_timestamp() {
        // テスト項目: FixedClock が複数回呼び出しても同じタイムスタンプを返す
        // given (前提条件):
        let fixed_time = 9876543210987;
        let clock = FixedClock::new(fixed_time);

        // when (操作):
        let timestamp1 = clock.now_jst_millis();
        let timestamp2 = clock.now_jst_millis();

        // then (期待する結果):
        assert_eq!(timestamp1, fixed_time);
        assert_eq!(timestamp2, fixed_time);
    }

    #[test]
    fn test_timestamp_to_jst_rfc3339_format() {
        // テスト項目: タイムスタンプが正しく RFC 3339 形式に変換される
        // given (前提条件):
        // 2023-01-01 00:00:00 JST in milliseconds
        let timestamp = 1672498800000;

        // when (操作):
        let result = timestamp_to_jst_rfc3339(timestamp).unwrap();

        // then (期待する結果):
        assert!(result.starts_with("2023-01-01T00:00:00"));
        assert!(result.contains("+09:00"));
    }

    #[test]
    fn test_timestamp_to_jst_clock_format() {
        // テスト項目: タイムスタンプが JST の HH:MM:SS 形式に変換される
        // given (前提条件):
        // 2023-01-01 12:34:56.789 JST
        let timestamp = 1672544096789;

        // when (操作):
        let result = timestamp_to_jst_clock(timestamp);

        // then (期待する結果):
        assert_eq!(result.as_deref(), Some("12:34:56"));
    }

    #[test]
    fn test_timestamp_out_of_range_is_rejected() {
        // テスト項目: 表現できないタイムスタンプは None になる
        // given (前提条件):
        let timestamp = i64::MAX;

        // when (操作):
        let result = timestamp_to_jst_rfc3339(timestamp);

        // then (期待する結果):
        assert!(result.is_none());
    }
}
