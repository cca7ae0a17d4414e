//! RTP sequence number validation and counting (RFC 3550 Appendix A.1).

use log::trace;

/// Largest forward jump still treated as the same sequence space.
const MAX_DROPOUT: u16 = 3000;
/// Largest backward jump treated as reordering rather than a restart.
const MAX_MISORDER: u16 = 100;
const RTP_SEQ_MOD: u32 = 1 << 16;

/// Outcome of feeding one sequence number to the [`SequenceTracker`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SeqUpdate {
    /// Sequence state was (re)initialized from this packet.
    Init,
    /// Packet belongs to the current sequence space.
    Accepted,
    /// Packet is too far away from the current sequence space.
    Rejected,
}

/// Tracks wraparound, base and highest sequence numbers and the received count
/// of one RTP stream.
#[derive(Debug, Clone)]
pub struct SequenceTracker {
    started: bool,
    /// Number of times the 16-bit sequence number wrapped.
    cycles: u32,
    base_seq: u16,
    max_seq: u16,
    /// Sequence number that would confirm a restart, `RTP_SEQ_MOD + 1` when none.
    bad_seq: u32,
    received: u32,
}

impl Default for SequenceTracker {
    fn default() -> Self {
        Self {
            started: false,
            cycles: 0,
            base_seq: 0,
            max_seq: 0,
            bad_seq: RTP_SEQ_MOD + 1,
            received: 0,
        }
    }
}

impl SequenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the sequence number of an inbound packet.
    ///
    /// Accepted packets (including duplicates and reordered ones) are counted
    /// as received. Rejected packets leave every counter untouched.
    pub fn update(&mut self, seq: u16) -> SeqUpdate {
        if !self.started {
            self.started = true;
            self.init(seq);
            self.received = 1;
            return SeqUpdate::Init;
        }

        let udelta = seq.wrapping_sub(self.max_seq);
        let update = if udelta < MAX_DROPOUT {
            // in order, with permissible gap
            if seq < self.max_seq {
                self.cycles = self.cycles.wrapping_add(1);
            }
            self.max_seq = seq;
            SeqUpdate::Accepted
        } else if udelta as u32 <= RTP_SEQ_MOD - MAX_MISORDER as u32 {
            // the sequence number made a very large jump
            if seq as u32 == self.bad_seq {
                // two sequential packets, assume the other side restarted
                trace!(
                    "sequence restart detected [max seq:{}, new seq:{}]",
                    self.max_seq, seq
                );
                self.init(seq);
                SeqUpdate::Init
            } else {
                self.bad_seq = (seq as u32 + 1) & (RTP_SEQ_MOD - 1);
                return SeqUpdate::Rejected;
            }
        } else {
            // duplicate or reordered packet
            SeqUpdate::Accepted
        };

        self.received = self.received.wrapping_add(1);
        update
    }

    fn init(&mut self, seq: u16) {
        self.base_seq = seq;
        self.max_seq = seq;
        self.bad_seq = RTP_SEQ_MOD + 1;
        self.cycles = 0;
        self.received = 0;
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn base_seq(&self) -> u16 {
        self.base_seq
    }

    pub fn max_seq(&self) -> u16 {
        self.max_seq
    }

    pub fn received(&self) -> u32 {
        self.received
    }

    /// `cycles * 65536 + max_seq`
    pub fn extended_max_seq(&self) -> u32 {
        self.cycles.wrapping_shl(16).wrapping_add(self.max_seq as u32)
    }

    /// Number of packets expected since the base sequence number.
    pub fn expected(&self) -> u32 {
        self.extended_max_seq()
            .wrapping_sub(self.base_seq as u32)
            .wrapping_add(1)
    }
}
