use std::time::SystemTime;

use crate::ttl::TimeToLive;

/// One stored secret: the opaque payload plus what is needed to decide
/// expiry. Entries are immutable once stored; the store removes them, it
/// never mutates them.
#[derive(Debug, Clone)]
pub struct Entry {
    payload: String,
    stored_at: SystemTime,
    ttl: TimeToLive,
}

impl Entry {
    /// Creates a new entry. `stored_at` should come from the store's clock.
    pub fn new(payload: impl Into<String>, stored_at: SystemTime, ttl: TimeToLive) -> Self {
        Self {
            payload: payload.into(),
            stored_at,
            ttl,
        }
    }

    /// The stored payload. The store never inspects it.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub(crate) fn into_payload(self) -> String {
        self.payload
    }

    /// Timestamp captured when the entry was stored.
    pub fn stored_at(&self) -> SystemTime {
        self.stored_at
    }

    /// TTL class chosen at store time.
    pub fn ttl(&self) -> TimeToLive {
        self.ttl
    }

    /// Instant after which the entry is no longer retrievable, or `None`
    /// when that instant is beyond what `SystemTime` can represent (the
    /// entry then simply never expires).
    pub fn expires_at(&self) -> Option<SystemTime> {
        self.stored_at.checked_add(self.ttl.duration())
    }

    /// True once `now` is strictly past the expiry instant. The boundary
    /// instant itself still counts as alive.
    ///
    /// Compared via elapsed time rather than an absolute deadline, so a
    /// `stored_at` near the edge of the representable range cannot
    /// overflow; a `now` earlier than `stored_at` counts as not expired.
    pub fn is_expired(&self, now: SystemTime) -> bool {
        match now.duration_since(self.stored_at) {
            Ok(elapsed) => elapsed > self.ttl.duration(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn t0() -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
    }

    #[test]
    fn test_expires_at() {
        let entry = Entry::new("payload", t0(), TimeToLive::Day);
        assert_eq!(
            entry.expires_at(),
            Some(t0() + Duration::from_secs(86_400))
        );
    }

    #[test]
    fn test_stored_at_near_range_edge_does_not_overflow() {
        // A timestamp so late that adding any TTL overflows SystemTime.
        let edge = SystemTime::UNIX_EPOCH + Duration::from_secs(i64::MAX as u64 - 10);
        let entry = Entry::new("payload", edge, TimeToLive::TwoWeeks);

        assert_eq!(entry.expires_at(), None);
        assert!(!entry.is_expired(edge));
        assert!(!entry.is_expired(SystemTime::UNIX_EPOCH));
    }

    #[test]
    fn test_not_expired_before_deadline() {
        let entry = Entry::new("payload", t0(), TimeToLive::Hour);
        assert!(!entry.is_expired(t0()));
        assert!(!entry.is_expired(t0() + Duration::from_secs(3_599)));
    }

    #[test]
    fn test_boundary_instant_is_still_alive() {
        let entry = Entry::new("payload", t0(), TimeToLive::Hour);
        assert!(!entry.is_expired(t0() + Duration::from_secs(3_600)));
    }

    #[test]
    fn test_expired_past_deadline() {
        let entry = Entry::new("payload", t0(), TimeToLive::Hour);
        assert!(entry.is_expired(t0() + Duration::from_secs(3_601)));
    }

    #[test]
    fn test_accessors() {
        let entry = Entry::new("payload", t0(), TimeToLive::Week);
        assert_eq!(entry.payload(), "payload");
        assert_eq!(entry.stored_at(), t0());
        assert_eq!(entry.ttl(), TimeToLive::Week);
    }
}
