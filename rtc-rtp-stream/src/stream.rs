//! Receive side of a single inbound RTP stream.

use crate::error::{Error, Result};
use crate::jitter::JitterEstimator;
use crate::listener::Listener;
use crate::nack::{NackGenerator, NackGeneratorFactory};
use crate::params::{HeaderExtensionUri, MediaType, StreamParams};
use crate::report::ReportBlock;
use crate::report::receiver_report::IntervalCounters;
use crate::report::sender_report::SenderReportCorrelator;
use crate::seq::{SeqUpdate, SequenceTracker};
use log::{debug, trace, warn};
use rtp::extension::abs_send_time_extension::AbsSendTimeExtension;
use rtp::extension::audio_level_extension::AudioLevelExtension;
use serde::Serialize;
use shared::marshal::Unmarshal;
use std::time::Instant;

/// Builder for [`RtpStreamRecv`].
///
/// # Example
///
/// ```ignore
/// use rtc_rtp_stream::{MediaType, RtpStreamRecvBuilder, StreamParams};
///
/// let params = StreamParams::new(0x1234_5678, MediaType::Video, 90000)
///     .with_nack(true)
///     .with_pli(true);
///
/// let stream = RtpStreamRecvBuilder::new(params)
///     .with_nack_generator(MyNackGenerator::new)
///     .build(Instant::now(), &listener)?;
/// ```
pub struct RtpStreamRecvBuilder {
    params: StreamParams,
    nack_generator_factory: Option<NackGeneratorFactory>,
}

impl RtpStreamRecvBuilder {
    pub fn new(params: StreamParams) -> Self {
        Self {
            params,
            nack_generator_factory: None,
        }
    }

    /// Set the factory used to (re)create the stream's NACK generator.
    ///
    /// Required when the parameters enable NACK, ignored otherwise.
    pub fn with_nack_generator<F, G>(mut self, factory: F) -> Self
    where
        F: Fn() -> G + 'static,
        G: NackGenerator + 'static,
    {
        self.nack_generator_factory = Some(Box::new(move || -> Box<dyn NackGenerator> {
            Box::new(factory())
        }));
        self
    }

    /// Create the stream. `now` is the origin of the stream's local timescale.
    pub fn build<'a>(self, now: Instant, listener: &'a dyn Listener) -> Result<RtpStreamRecv<'a>> {
        let nack_generator_factory = if self.params.use_nack {
            Some(
                self.nack_generator_factory
                    .ok_or(Error::ErrNackGeneratorRequired)?,
            )
        } else {
            None
        };
        let nack_generator = nack_generator_factory.as_ref().map(|factory| factory());

        Ok(RtpStreamRecv {
            params: self.params,
            listener,
            epoch: now,
            seq: SequenceTracker::new(),
            counters: IntervalCounters::default(),
            jitter: JitterEstimator::default(),
            max_timestamp: 0,
            sender_report: SenderReportCorrelator::default(),
            nack_generator,
            nack_generator_factory,
        })
    }
}

/// Diagnostics snapshot of a receive stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RtpStreamRecvStats {
    pub params: StreamParams,
    pub received: u32,
    pub max_timestamp: u32,
    pub transit: i64,
    pub jitter: u32,
}

/// Statistics and feedback state of one inbound RTP stream.
///
/// The stream validates and counts inbound packets, estimates jitter and loss,
/// correlates the remote sender reports and builds the reception report for the
/// remote source. NACK and PLI requests are forwarded to the [`Listener`]
/// according to the negotiated capabilities.
///
/// All operations are synchronous and take the current time as input; nothing
/// in here reads a clock or performs I/O.
pub struct RtpStreamRecv<'a> {
    params: StreamParams,
    listener: &'a dyn Listener,
    /// Origin of the stream-local millisecond timescale.
    epoch: Instant,

    seq: SequenceTracker,
    counters: IntervalCounters,
    jitter: JitterEstimator,
    max_timestamp: u32,
    sender_report: SenderReportCorrelator,

    nack_generator: Option<Box<dyn NackGenerator>>,
    nack_generator_factory: Option<NackGeneratorFactory>,
}

impl RtpStreamRecv<'_> {
    pub fn params(&self) -> &StreamParams {
        &self.params
    }

    pub fn ssrc(&self) -> u32 {
        self.params.ssrc
    }

    pub fn received(&self) -> u32 {
        self.seq.received()
    }

    pub fn max_timestamp(&self) -> u32 {
        self.max_timestamp
    }

    /// Arrival time of the last sender report from the remote source.
    pub fn last_sr_received(&self) -> Option<Instant> {
        self.sender_report.last_sr_received()
    }

    /// Smoothed interarrival jitter in milliseconds.
    pub fn jitter(&self) -> f64 {
        self.jitter.jitter()
    }

    /// Process an inbound RTP packet.
    ///
    /// Returns `false` when the packet does not belong to this stream or is
    /// rejected by sequence validation.
    pub fn receive_packet(&mut self, now: Instant, pkt: &rtp::packet::Packet) -> bool {
        let header = &pkt.header;
        if header.ssrc != self.params.ssrc {
            warn!(
                "packet for another stream [ssrc:{}, packet ssrc:{}]",
                self.params.ssrc, header.ssrc
            );
            return false;
        }

        match self.seq.update(header.sequence_number) {
            SeqUpdate::Rejected => {
                warn!(
                    "invalid packet [ssrc:{}, seq:{}]",
                    header.ssrc, header.sequence_number
                );
                return false;
            }
            SeqUpdate::Init => {
                self.max_timestamp = header.timestamp;
                self.on_init_seq();
            }
            SeqUpdate::Accepted => {
                let diff = header.timestamp.wrapping_sub(self.max_timestamp);
                if diff != 0 && diff < (1 << 31) {
                    self.max_timestamp = header.timestamp;
                }
            }
        }

        let now_ms = self.local_time_ms(now);
        self.jitter
            .update(now_ms, header.timestamp, self.params.clock_rate);

        if let Some(nack_generator) = self.nack_generator.as_mut() {
            nack_generator.receive_packet(now, header.sequence_number);
        }
        self.drain_nacks();

        true
    }

    /// Audio level carried by `header` under the negotiated extension id.
    pub fn audio_level(&self, header: &rtp::header::Header) -> Option<AudioLevelExtension> {
        self.header_extension(header, HeaderExtensionUri::SsrcAudioLevel)
    }

    /// Absolute send time carried by `header` under the negotiated extension id.
    pub fn abs_send_time(&self, header: &rtp::header::Header) -> Option<AbsSendTimeExtension> {
        self.header_extension(header, HeaderExtensionUri::AbsSendTime)
    }

    /// Record a sender report received from the remote source.
    pub fn receive_rtcp_sender_report(
        &mut self,
        now: Instant,
        sr: &rtcp::sender_report::SenderReport,
    ) {
        self.sender_report.record(now, sr.ntp_time);
    }

    /// Build the reception report for the remote source.
    ///
    /// Every call closes the current reporting interval: the fraction lost
    /// covers the packets since the previous call. Must not be called before
    /// the first packet was accepted. Convert the result into an
    /// [`rtcp::reception_report::ReceptionReport`] to put it on the wire.
    pub fn get_rtcp_receiver_report(&mut self, now: Instant) -> ReportBlock {
        let expected = self.seq.expected();
        let received = self.seq.received();
        let total_lost = expected.wrapping_sub(received) as i32;

        let interval = self.counters.advance(expected, received);
        let (last_sender_report, delay) = self.sender_report.lsr_dlsr(now);

        trace!(
            "receiver report [ssrc:{}, expected:{}, received:{}, lost:{}, fraction lost:{}]",
            self.params.ssrc,
            interval.expected,
            interval.received,
            interval.lost,
            interval.fraction_lost
        );

        ReportBlock {
            ssrc: self.params.ssrc,
            fraction_lost: interval.fraction_lost,
            total_lost,
            last_sequence_number: self.seq.extended_max_seq(),
            jitter: self.jitter.jitter_rtp_units(self.params.clock_rate),
            last_sender_report,
            delay,
        }
    }

    /// Request a full frame from the sender, e.g. on an administrative trigger.
    ///
    /// Does nothing unless PLI was negotiated. Pending NACK state is discarded
    /// since the keyframe supersedes it.
    pub fn request_full_frame(&mut self) {
        if !self.params.use_pli {
            return;
        }

        self.reset_nack_generator();

        debug!("triggering PLI [ssrc:{}]", self.params.ssrc);
        let listener = self.listener;
        listener.on_pli_required(self);
    }

    /// A full frame is required by someone else (peer or downstream consumer).
    pub fn on_full_frame_required(&self) {
        if !self.params.use_pli {
            warn!("PLI required but not supported by the endpoint");
            return;
        }

        debug!("triggering PLI [ssrc:{}]", self.params.ssrc);
        self.listener.on_pli_required(self);
    }

    /// Forward a batch of lost sequence numbers reported by the NACK generator.
    ///
    /// # Panics
    ///
    /// If NACK was not negotiated for this stream: a generator must never
    /// exist, let alone report, without it.
    pub fn on_nack_required(&self, seq_numbers: &[u16]) {
        assert!(self.params.use_nack, "NACK required but not supported");

        warn!(
            "triggering NACK [ssrc:{}, first seq:{}, num packets:{}]",
            self.params.ssrc,
            seq_numbers.first().copied().unwrap_or_default(),
            seq_numbers.len()
        );

        self.listener.on_nack_required(self, seq_numbers);
    }

    /// Drive the NACK generator timers.
    pub fn handle_timeout(&mut self, now: Instant) {
        if let Some(nack_generator) = self.nack_generator.as_mut() {
            nack_generator.handle_timeout(now);
        }
        self.drain_nacks();
    }

    /// Next instant at which [`handle_timeout`](Self::handle_timeout) should run.
    pub fn poll_timeout(&self) -> Option<Instant> {
        self.nack_generator
            .as_ref()
            .and_then(|nack_generator| nack_generator.poll_timeout())
    }

    pub fn stats(&self) -> RtpStreamRecvStats {
        RtpStreamRecvStats {
            params: self.params.clone(),
            received: self.seq.received(),
            max_timestamp: self.max_timestamp,
            transit: self.jitter.transit(),
            jitter: self.jitter.jitter() as u32,
        }
    }

    /// Sequence numbering (re)started.
    fn on_init_seq(&mut self) {
        self.counters = IntervalCounters::default();
        self.reset_nack_generator();

        // request a full frame so dropped video packets don't cause lag
        if self.params.media_type == MediaType::Video {
            debug!(
                "stream initialized, triggering PLI [ssrc:{}]",
                self.params.ssrc
            );
            let listener = self.listener;
            listener.on_pli_required(self);
        }
    }

    fn reset_nack_generator(&mut self) {
        if let Some(factory) = self.nack_generator_factory.as_ref() {
            self.nack_generator = Some(factory());
        }
    }

    fn drain_nacks(&mut self) {
        while let Some(seq_numbers) = self
            .nack_generator
            .as_mut()
            .and_then(|nack_generator| nack_generator.poll_nack())
        {
            self.on_nack_required(&seq_numbers);
        }
    }

    fn header_extension<T: Unmarshal>(
        &self,
        header: &rtp::header::Header,
        uri: HeaderExtensionUri,
    ) -> Option<T> {
        let id = self.params.header_extension_id(uri)?;
        let mut payload = header.get_extension(id)?;
        match T::unmarshal(&mut payload) {
            Ok(extension) => Some(extension),
            Err(err) => {
                debug!(
                    "malformed header extension [ssrc:{}, id:{}]: {}",
                    self.params.ssrc, id, err
                );
                None
            }
        }
    }

    fn local_time_ms(&self, now: Instant) -> i64 {
        match now.checked_duration_since(self.epoch) {
            Some(elapsed) => elapsed.as_millis() as i64,
            None => -(self.epoch.duration_since(now).as_millis() as i64),
        }
    }
}
