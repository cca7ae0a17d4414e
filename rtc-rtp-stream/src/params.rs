//! Negotiated, immutable parameters of a receive stream.

use crate::error::{Error, Result};
use crate::stream_info::StreamInfo;
use serde::Serialize;
use std::fmt;

/// URI of the client-to-mixer audio level header extension (RFC 6464).
pub const SSRC_AUDIO_LEVEL_URI: &str = "urn:ietf:params:rtp-hdrext:ssrc-audio-level";
/// URI of the absolute send time header extension.
pub const ABS_SEND_TIME_URI: &str = "http://www.webrtc.org/experiments/rtp-hdrext/abs-send-time";

/// Kind of media carried by a stream.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Audio,
    Video,
}

impl MediaType {
    /// Parse the media type from the top-level part of a MIME type
    /// (`"video/VP8"` → `Video`). Matching is case-insensitive.
    pub fn from_mime_type(mime_type: &str) -> Result<Self> {
        let top_level = mime_type.split('/').next().unwrap_or_default();
        if top_level.eq_ignore_ascii_case("audio") {
            Ok(MediaType::Audio)
        } else if top_level.eq_ignore_ascii_case("video") {
            Ok(MediaType::Video)
        } else {
            Err(Error::ErrUnknownMediaType(mime_type.to_string()))
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            MediaType::Audio => "audio",
            MediaType::Video => "video",
        };
        write!(f, "{s}")
    }
}

/// RTP header extensions a receive stream can resolve on inbound packets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum HeaderExtensionUri {
    SsrcAudioLevel,
    AbsSendTime,
}

/// Parameters of a receive stream, fixed for the lifetime of the stream.
///
/// Header extension ids use `0` for "not negotiated".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamParams {
    pub ssrc: u32,
    pub payload_type: u8,
    pub media_type: MediaType,
    pub clock_rate: u32,
    pub use_nack: bool,
    pub use_pli: bool,
    pub ssrc_audio_level_id: u8,
    pub abs_send_time_id: u8,
}

impl StreamParams {
    /// Parameters for a stream without NACK, PLI or header extensions.
    pub fn new(ssrc: u32, media_type: MediaType, clock_rate: u32) -> Self {
        Self {
            ssrc,
            payload_type: 0,
            media_type,
            clock_rate,
            use_nack: false,
            use_pli: false,
            ssrc_audio_level_id: 0,
            abs_send_time_id: 0,
        }
    }

    pub fn with_nack(mut self, use_nack: bool) -> Self {
        self.use_nack = use_nack;
        self
    }

    pub fn with_pli(mut self, use_pli: bool) -> Self {
        self.use_pli = use_pli;
        self
    }

    pub fn with_ssrc_audio_level_id(mut self, id: u8) -> Self {
        self.ssrc_audio_level_id = id;
        self
    }

    pub fn with_abs_send_time_id(mut self, id: u8) -> Self {
        self.abs_send_time_id = id;
        self
    }

    /// Negotiated id of the given header extension, `None` when not in use.
    pub fn header_extension_id(&self, uri: HeaderExtensionUri) -> Option<u8> {
        let id = match uri {
            HeaderExtensionUri::SsrcAudioLevel => self.ssrc_audio_level_id,
            HeaderExtensionUri::AbsSendTime => self.abs_send_time_id,
        };
        (id != 0).then_some(id)
    }
}

fn extension_id(info: &StreamInfo, uri: &str) -> Result<u8> {
    match info.header_extension_id(uri) {
        // one-byte and two-byte header forms together allow 1..=255
        Some(id) if id == 0 || id > u8::MAX as u16 => Err(Error::ErrInvalidHeaderExtensionId(id)),
        Some(id) => Ok(id as u8),
        None => Ok(0),
    }
}

impl TryFrom<&StreamInfo> for StreamParams {
    type Error = Error;

    fn try_from(info: &StreamInfo) -> Result<Self> {
        Ok(Self {
            ssrc: info.ssrc,
            payload_type: info.payload_type,
            media_type: MediaType::from_mime_type(&info.mime_type)?,
            clock_rate: info.clock_rate,
            use_nack: info.supports_nack(),
            use_pli: info.supports_pli(),
            ssrc_audio_level_id: extension_id(info, SSRC_AUDIO_LEVEL_URI)?,
            abs_send_time_id: extension_id(info, ABS_SEND_TIME_URI)?,
        })
    }
}
