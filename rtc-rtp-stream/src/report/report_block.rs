use serde::Serialize;

/// Bounds of the 24-bit signed cumulative lost field.
const TOTAL_LOST_MAX: i32 = 0x7F_FFFF;
const TOTAL_LOST_MIN: i32 = -0x80_0000;

/// Reception statistics for one remote source, as carried by an RTCP
/// reception report block (RFC 3550 section 6.4.1).
///
/// `total_lost` keeps the full signed count: it goes negative when duplicates
/// push the received count above the expected count. It is only narrowed to
/// the 24-bit wire field when converted into an
/// [`rtcp::reception_report::ReceptionReport`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBlock {
    pub ssrc: u32,
    /// Fraction of packets lost since the previous report, out of 256.
    pub fraction_lost: u8,
    /// Packets lost since the beginning of reception.
    pub total_lost: i32,
    /// Cycle count in the high 16 bits, highest sequence number received in
    /// the low 16 bits.
    pub last_sequence_number: u32,
    /// Interarrival jitter in timestamp units.
    pub jitter: u32,
    /// Middle 32 bits of the NTP timestamp of the last sender report, 0 if
    /// none was received.
    pub last_sender_report: u32,
    /// Delay since the last sender report in 1/65536 seconds, 0 if none was
    /// received.
    pub delay: u32,
}

impl ReportBlock {
    /// Cumulative lost clamped to the signed 24-bit range, in the two's
    /// complement form the wire field uses.
    pub fn wire_total_lost(&self) -> u32 {
        self.total_lost.clamp(TOTAL_LOST_MIN, TOTAL_LOST_MAX) as u32 & 0xFF_FFFF
    }
}

impl From<ReportBlock> for rtcp::reception_report::ReceptionReport {
    fn from(block: ReportBlock) -> Self {
        rtcp::reception_report::ReceptionReport {
            ssrc: block.ssrc,
            fraction_lost: block.fraction_lost,
            total_lost: block.wire_total_lost(),
            last_sequence_number: block.last_sequence_number,
            jitter: block.jitter,
            last_sender_report: block.last_sender_report,
            delay: block.delay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtcp::reception_report::ReceptionReport;
    use shared::marshal::Marshal;

    #[test]
    fn test_report_block_into_reception_report() {
        let block = ReportBlock {
            ssrc: 0x902f9e2e,
            fraction_lost: 0x40,
            total_lost: 5,
            last_sequence_number: 0x0001_0002,
            jitter: 0x10,
            last_sender_report: 0x1234_5678,
            delay: 0x0001_8000,
        };

        let rr = ReceptionReport::from(block);
        assert_eq!(
            rr,
            ReceptionReport {
                ssrc: 0x902f9e2e,
                fraction_lost: 0x40,
                total_lost: 5,
                last_sequence_number: 0x0001_0002,
                jitter: 0x10,
                last_sender_report: 0x1234_5678,
                delay: 0x0001_8000,
            }
        );
    }

    #[test]
    fn test_report_block_negative_total_lost() {
        let block = ReportBlock {
            total_lost: -3,
            ..Default::default()
        };
        assert_eq!(block.wire_total_lost(), 0xFF_FFFD);

        let raw = ReceptionReport::from(block).marshal().unwrap();
        assert_eq!(&raw[5..8], &[0xff, 0xff, 0xfd]);
    }

    #[test]
    fn test_report_block_total_lost_is_clamped_to_24_bits() {
        let too_many = ReportBlock {
            total_lost: 0x0100_0000,
            ..Default::default()
        };
        assert_eq!(too_many.wire_total_lost(), 0x7F_FFFF);
        assert!(ReceptionReport::from(too_many).marshal().is_ok());

        let too_few = ReportBlock {
            total_lost: i32::MIN,
            ..Default::default()
        };
        assert_eq!(too_few.wire_total_lost(), 0x80_0000);
        let raw = ReceptionReport::from(too_few).marshal().unwrap();
        assert_eq!(&raw[5..8], &[0x80, 0x00, 0x00]);
    }

    #[test]
    fn test_report_block_serialize() {
        let block = ReportBlock {
            ssrc: 1,
            total_lost: -2,
            ..Default::default()
        };
        let json = serde_json::to_value(block).unwrap();
        assert_eq!(json["totalLost"], -2);
        assert_eq!(json["lastSenderReport"], 0);
    }
}
