//! RTCP receiver report building blocks.
//!
//! - [`ReportBlock`]: the reception statistics value, convertible into an
//!   `rtcp` reception report.
//! - Interval loss accounting used to derive the fraction lost.
//! - Sender report correlation used to derive LSR/DLSR.

pub(crate) mod receiver_report;
pub(crate) mod report_block;
pub(crate) mod sender_report;

pub use report_block::ReportBlock;
