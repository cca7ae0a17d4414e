//! Retransmission estimator seam.
//!
//! A receive stream with NACK negotiated feeds every accepted sequence number
//! into a [`NackGenerator`] and forwards the batches it reports as lost to the
//! stream [`Listener`](crate::Listener). When and how often a gap is reported is
//! entirely up to the generator.
//!
//! The generator is never reset in place: whenever the stream's sequence
//! numbering restarts, or a full frame is requested, the stream drops it and
//! builds a fresh one from its factory.

use std::time::Instant;

/// Detects missing RTP packets of a single stream.
///
/// Follows the sans-I/O pattern: input through `receive_packet` and
/// `handle_timeout`, output through `poll_nack`, with `poll_timeout` telling the
/// driver when `handle_timeout` wants to run next.
pub trait NackGenerator {
    /// Record an accepted sequence number.
    fn receive_packet(&mut self, now: Instant, seq: u16);

    /// Advance internal timers.
    fn handle_timeout(&mut self, _now: Instant) {}

    /// Next instant at which `handle_timeout` should be called.
    fn poll_timeout(&self) -> Option<Instant> {
        None
    }

    /// Next batch of sequence numbers judged lost, in order. Batches are never
    /// empty.
    fn poll_nack(&mut self) -> Option<Vec<u16>>;
}

/// Builds fresh [`NackGenerator`] instances for a stream.
pub type NackGeneratorFactory = Box<dyn Fn() -> Box<dyn NackGenerator>>;
