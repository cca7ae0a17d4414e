use std::time::Instant;

/// Arrival time and compact NTP timestamp of the last sender report received
/// from the remote source.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct SenderReportCorrelator {
    last_sr_received: Option<Instant>,
    last_sr_timestamp: u32,
}

impl SenderReportCorrelator {
    pub(crate) fn record(&mut self, now: Instant, ntp_time: u64) {
        self.last_sr_received = Some(now);
        self.last_sr_timestamp = ntp_middle_bits(ntp_time);
    }

    pub(crate) fn last_sr_received(&self) -> Option<Instant> {
        self.last_sr_received
    }

    /// LSR and DLSR fields for a report sent at `now`, both 0 when no sender
    /// report was received yet.
    pub(crate) fn lsr_dlsr(&self, now: Instant) -> (u32, u32) {
        match self.last_sr_received {
            Some(received) => {
                let delay_ms = u32::try_from(now.saturating_duration_since(received).as_millis())
                    .unwrap_or(u32::MAX);
                (self.last_sr_timestamp, dlsr_from_millis(delay_ms))
            }
            None => (0, 0),
        }
    }
}

/// Middle 32 bits of a 64-bit NTP timestamp.
pub(crate) fn ntp_middle_bits(ntp_time: u64) -> u32 {
    (ntp_time >> 16) as u32
}

/// Express a delay in milliseconds in units of 1/65536 seconds.
///
/// Whole seconds and the millisecond remainder are converted separately so the
/// fractional part keeps full precision.
pub(crate) fn dlsr_from_millis(delay_ms: u32) -> u32 {
    let secs = (delay_ms / 1000) << 16;
    let frac = ((delay_ms % 1000) * 65536 + 500) / 1000;
    secs | frac
}
