//! RTC RTP Stream - Sans-IO receive side of an inbound RTP stream.
//!
//! This crate tracks a single inbound RTP stream (one SSRC) inside a media
//! relay. It keeps the statistics an RTCP receiver report needs, correlates
//! the remote sender reports for round-trip estimation and decides when
//! retransmissions (NACK) or keyframes (PLI) have to be requested.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`RtpStreamRecv`] | Per-stream state: packet acceptance, reports, NACK/PLI coordination |
//! | [`SequenceTracker`] | Sequence number validation, wraparound and counting (RFC 3550 A.1) |
//! | [`ReportBlock`] | Reception statistics for RTCP, convertible into `rtcp::reception_report::ReceptionReport` |
//! | [`NackGenerator`] | Seam for the retransmission estimator fed with accepted packets |
//! | [`Listener`] | Receives PLI and NACK requests issued by a stream |
//!
//! # Data Flow
//!
//! ```text
//! RTP:  packet → SequenceTracker → jitter / max timestamp → NackGenerator
//!                                                              │
//!                       Listener::on_nack_required  ←──────────┘
//! RTCP: sender report → LSR/DLSR state
//!       report request → ReportBlock (fraction lost, total lost, jitter, LSR, DLSR)
//! ```
//!
//! # No Clock, No I/O
//!
//! Every operation takes `now: Instant` as input, building a stream included.
//! The stream never reads a clock, never sleeps and never sends anything;
//! requests go out through the [`Listener`] synchronously, from within the call
//! that triggered them. Packets arrive already parsed as `rtp::packet::Packet`
//! and sender reports as `rtcp::sender_report::SenderReport`.
//!
//! # Quick Start
//!
//! ```ignore
//! use rtc_rtp_stream::{RtpStreamRecvBuilder, StreamInfo, StreamParams};
//! use shared::marshal::Marshal;
//! use std::time::Instant;
//!
//! let params = StreamParams::try_from(&stream_info)?;
//! let mut stream = RtpStreamRecvBuilder::new(params)
//!     .with_nack_generator(MyNackGenerator::new)
//!     .build(Instant::now(), &listener)?;
//!
//! if stream.receive_packet(Instant::now(), &rtp_packet) {
//!     // forward the packet
//! }
//!
//! stream.receive_rtcp_sender_report(Instant::now(), &sender_report);
//! let block = stream.get_rtcp_receiver_report(Instant::now());
//! let raw = rtcp::reception_report::ReceptionReport::from(block).marshal()?;
//! ```

#![warn(rust_2018_idioms)]

mod error;
mod jitter;
mod listener;
mod nack;
mod params;
pub(crate) mod report;
mod seq;
mod stream;
mod stream_info;

pub use error::{Error, Result};
pub use listener::Listener;
pub use nack::{NackGenerator, NackGeneratorFactory};
pub use params::{
    ABS_SEND_TIME_URI, HeaderExtensionUri, MediaType, SSRC_AUDIO_LEVEL_URI, StreamParams,
};
pub use report::ReportBlock;
pub use seq::{SeqUpdate, SequenceTracker};
pub use stream::{RtpStreamRecv, RtpStreamRecvBuilder, RtpStreamRecvStats};
pub use stream_info::{RTCPFeedback, RTPHeaderExtension, StreamInfo};
