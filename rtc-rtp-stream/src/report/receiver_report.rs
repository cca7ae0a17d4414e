//! Interval loss accounting for receiver reports.

/// Snapshots of the expected and received counts taken when the previous
/// receiver report was built.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IntervalCounters {
    expected_prior: u32,
    received_prior: u32,
}

/// Loss figures for one reporting interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IntervalLoss {
    pub(crate) expected: u32,
    pub(crate) received: u32,
    pub(crate) lost: i32,
    pub(crate) fraction_lost: u8,
}

impl IntervalCounters {
    /// Consume the interval that ends at the given cumulative counts.
    pub(crate) fn advance(&mut self, expected: u32, received: u32) -> IntervalLoss {
        let expected_interval = expected.wrapping_sub(self.expected_prior);
        self.expected_prior = expected;

        let received_interval = received.wrapping_sub(self.received_prior);
        self.received_prior = received;

        let lost_interval = expected_interval.wrapping_sub(received_interval) as i32;

        IntervalLoss {
            expected: expected_interval,
            received: received_interval,
            lost: lost_interval,
            fraction_lost: fraction_lost(expected_interval, lost_interval),
        }
    }
}

/// Fraction of lost packets as a fixed point number out of 256.
///
/// Non-positive or undefined interval loss reports as 0.
pub(crate) fn fraction_lost(expected_interval: u32, lost_interval: i32) -> u8 {
    if expected_interval == 0 || lost_interval <= 0 {
        return 0;
    }

    (((lost_interval as u64) << 8) / expected_interval as u64) as u8
}
