use crate::stream::RtpStreamRecv;

/// Receives the feedback requests issued by a [`RtpStreamRecv`].
///
/// Calls are synchronous and made from within the stream operation that
/// triggered them. The stream is handed out by shared reference, so a listener
/// can inspect it but cannot feed packets back into it from the callback.
pub trait Listener {
    /// A full frame (keyframe) is needed for this stream, typically sent as
    /// an RTCP PLI.
    fn on_pli_required(&self, stream: &RtpStreamRecv<'_>);

    /// The given sequence numbers were lost and should be requested again,
    /// typically with an RTCP generic NACK.
    fn on_nack_required(&self, stream: &RtpStreamRecv<'_>, seq_numbers: &[u16]);
}
