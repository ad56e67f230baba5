//! Fixed-offset wall clock
//!
//! Every "now" in the pipeline flows through one clock source so that
//! default date windows and upstream date fallbacks agree. The service
//! operates on Korea Standard Time (+09:00), a fixed offset with no DST.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// The +09:00 offset used for all civil-date handling
pub fn kst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).expect("static offset is in range")
}

/// Clock abstraction so date defaulting stays deterministic under test
pub trait Clock: Send + Sync {
    /// Current instant in the service's fixed +09:00 zone
    fn now(&self) -> DateTime<FixedOffset>;

    /// Today's civil date in the service zone
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// System clock converted to the fixed +09:00 zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&kst())
    }
}

/// Clock pinned to a single instant, for deterministic tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
