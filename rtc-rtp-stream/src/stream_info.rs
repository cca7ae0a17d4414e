/// RTP header extension as negotiated via SDP (RFC 5285).
#[derive(Default, Debug, Clone)]
pub struct RTPHeaderExtension {
    /// URI identifying the extension type (e.g., "urn:ietf:params:rtp-hdrext:ssrc-audio-level")
    pub uri: String,
    /// Local identifier (1-14) used in RTP packets to reference this extension
    pub id: u16,
}

/// RTCP feedback mechanism negotiated for the stream.
///
/// See: <https://draft.ortc.org/#dom-rtcrtcpfeedback>
#[derive(Default, Debug, Clone)]
pub struct RTCPFeedback {
    /// Type of feedback mechanism.
    ///
    /// Valid values: "ack", "ccm", "nack", "goog-remb", "transport-cc"
    pub typ: String,

    /// Parameter value that depends on the feedback type.
    ///
    /// For example, `typ="nack"` with `parameter="pli"` enables Picture Loss Indicator packets.
    pub parameter: String,
}

/// Negotiated description of a remote stream.
///
/// This is what signaling hands over once SDP negotiation is done. It is
/// turned into [`StreamParams`](crate::StreamParams) before a
/// [`RtpStreamRecv`](crate::RtpStreamRecv) is created for it.
#[derive(Default, Debug, Clone)]
pub struct StreamInfo {
    /// Synchronization Source identifier (SSRC) of the stream
    pub ssrc: u32,
    /// RTP payload type (e.g., 96 for VP8, 111 for Opus)
    pub payload_type: u8,
    /// Negotiated RTP header extensions for this stream
    pub rtp_header_extensions: Vec<RTPHeaderExtension>,
    /// MIME type of the codec (e.g., "video/VP8", "audio/opus")
    pub mime_type: String,
    /// Clock rate in Hz (e.g., 90000 for video, 48000 for audio)
    pub clock_rate: u32,
    /// RTCP feedback mechanisms negotiated for this stream
    pub rtcp_feedback: Vec<RTCPFeedback>,
}

impl StreamInfo {
    /// Returns `true` if generic NACK (`nack` with empty parameter) was negotiated.
    pub fn supports_nack(&self) -> bool {
        self.rtcp_feedback
            .iter()
            .any(|fb| fb.typ == "nack" && fb.parameter.is_empty())
    }

    /// Returns `true` if PLI (`nack pli`) was negotiated.
    pub fn supports_pli(&self) -> bool {
        self.rtcp_feedback
            .iter()
            .any(|fb| fb.typ == "nack" && fb.parameter == "pli")
    }

    /// Negotiated id for the header extension with the given URI, if any.
    pub fn header_extension_id(&self, uri: &str) -> Option<u16> {
        self.rtp_header_extensions
            .iter()
            .find(|ext| ext.uri == uri)
            .map(|ext| ext.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback(typ: &str, parameter: &str) -> RTCPFeedback {
        RTCPFeedback {
            typ: typ.to_string(),
            parameter: parameter.to_string(),
        }
    }

    #[test]
    fn test_stream_supports_nack() {
        let info_with_nack = StreamInfo {
            ssrc: 12345,
            rtcp_feedback: vec![feedback("nack", "")],
            ..Default::default()
        };
        assert!(info_with_nack.supports_nack());
        assert!(!info_with_nack.supports_pli());

        // nack-pli is not generic nack
        let info_with_nack_pli = StreamInfo {
            ssrc: 12345,
            rtcp_feedback: vec![feedback("nack", "pli")],
            ..Default::default()
        };
        assert!(!info_with_nack_pli.supports_nack());
        assert!(info_with_nack_pli.supports_pli());

        let info_without_nack = StreamInfo {
            ssrc: 12345,
            rtcp_feedback: vec![feedback("goog-remb", "")],
            ..Default::default()
        };
        assert!(!info_without_nack.supports_nack());
        assert!(!info_without_nack.supports_pli());
    }

    #[test]
    fn test_header_extension_id() {
        let info = StreamInfo {
            rtp_header_extensions: vec![RTPHeaderExtension {
                uri: "urn:ietf:params:rtp-hdrext:ssrc-audio-level".to_string(),
                id: 1,
            }],
            ..Default::default()
        };

        assert_eq!(
            info.header_extension_id("urn:ietf:params:rtp-hdrext:ssrc-audio-level"),
            Some(1)
        );
        assert_eq!(
            info.header_extension_id("http://www.webrtc.org/experiments/rtp-hdrext/abs-send-time"),
            None
        );
    }
}
