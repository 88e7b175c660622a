use chrono::Utc;

/// Clock seam. Use cases read "now" through the context instead of
/// calling `Utc::now` directly, so tests can pin the clock when
/// asserting reminder scheduling boundaries.
pub trait ISys: Send + Sync {
    /// Current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;
}

/// Wall-clock implementation used outside of tests.
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
