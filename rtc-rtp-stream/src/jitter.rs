/// Interarrival jitter estimator (RFC 3550 section 6.4.1).
///
/// Transit times are kept in milliseconds: the RTP timestamp is converted with
/// the stream's clock rate and subtracted from the local arrival time. The
/// smoothed jitter is an `f64` accumulator with gain 1/16.
#[derive(Debug, Default, Clone)]
pub(crate) struct JitterEstimator {
    transit: i64,
    jitter: f64,
}

impl JitterEstimator {
    /// Account for a packet that arrived at `now_ms` on the local timescale.
    ///
    /// A zero `clock_rate` disables the estimator. The transit starts at 0, so
    /// the first sample is measured against it like every other one.
    pub(crate) fn update(&mut self, now_ms: i64, timestamp: u32, clock_rate: u32) {
        if clock_rate == 0 {
            return;
        }

        let transit = now_ms - (timestamp as u64 * 1000 / clock_rate as u64) as i64;
        let d = transit - self.transit;
        self.transit = transit;
        self.apply(d);
    }

    fn apply(&mut self, d: i64) {
        self.jitter += (1. / 16.) * (d.unsigned_abs() as f64 - self.jitter);
    }

    pub(crate) fn transit(&self) -> i64 {
        self.transit
    }

    /// Smoothed jitter in milliseconds.
    pub(crate) fn jitter(&self) -> f64 {
        self.jitter
    }

    /// Smoothed jitter in RTP timestamp units, truncated.
    pub(crate) fn jitter_rtp_units(&self, clock_rate: u32) -> u32 {
        (self.jitter * clock_rate as f64 / 1000.) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jitter_update_law() {
        let table: &[(f64, i64)] = &[
            (0.0, 0),
            (0.0, 16),
            (0.0, -16),
            (10.0, 0),
            (10.0, 26),
            (10.0, -26),
            (3.25, 7),
            (123.456, -1000),
            (1e6, 1),
        ];

        for &(j, d) in table {
            let mut je = JitterEstimator {
                transit: 0,
                jitter: j,
            };
            je.apply(d);

            let expected = j + (d.unsigned_abs() as f64 - j) / 16.0;
            assert_eq!(je.jitter().to_bits(), expected.to_bits(), "J={j} d={d}");
        }
    }

    #[test]
    fn test_jitter_constant_delay_converges_to_zero() {
        let mut je = JitterEstimator {
            transit: 1000,
            jitter: 40.0,
        };

        // 20ms packetization at 48kHz, arriving exactly on time
        let mut prev = je.jitter();
        for i in 0..200u32 {
            je.update(1000 + i as i64 * 20, i * 960, 48000);
            assert!(je.jitter() <= prev);
            assert!(je.jitter() >= 0.0);
            prev = je.jitter();
        }
        assert!(je.jitter() < 0.01);
    }

    #[test]
    fn test_jitter_first_sample_measured_against_zero_transit() {
        let mut je = JitterEstimator::default();
        je.update(1000, 200, 1000);

        assert_eq!(je.transit(), 800);
        assert_eq!(je.jitter(), 50.0);

        // arrives 32ms later than the previous transit
        je.update(1032, 200, 1000);
        assert_eq!(je.transit(), 832);
        assert_eq!(je.jitter(), 50.0 + (32.0 - 50.0) / 16.0);
    }

    #[test]
    fn test_jitter_rtp_units() {
        let mut je = JitterEstimator::default();
        je.update(0, 0, 90000);
        assert_eq!(je.jitter(), 0.0);

        je.update(32, 0, 90000);
        assert_eq!(je.transit(), 32);
        assert_eq!(je.jitter(), 2.0);
        assert_eq!(je.jitter_rtp_units(90000), 180);
    }

    #[test]
    fn test_jitter_zero_clock_rate_is_noop() {
        let mut je = JitterEstimator::default();
        je.update(1000, 1234, 0);
        je.update(9000, 1, 0);

        assert_eq!(je.transit(), 0);
        assert_eq!(je.jitter(), 0.0);
        assert_eq!(je.jitter_rtp_units(0), 0);
    }

    #[test]
    fn test_jitter_large_timestamps_do_not_wrap() {
        let mut je = JitterEstimator::default();
        je.update(0, u32::MAX - 89999, 90000);
        let transit = je.transit();
        let jitter = je.jitter();
        assert!(transit < 0);

        // exactly one second apart on both clocks
        je.update(1000, u32::MAX, 90000);
        assert_eq!(je.transit(), transit);
        assert_eq!(je.jitter(), jitter - jitter / 16.0);
    }
}
