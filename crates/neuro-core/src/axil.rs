//! AXI-Lite-style channel signal types.
//!
//! The register bridge talks to its host over five independent valid/ready
//! channels: write address, write data, write response, read address and
//! read data. Each struct here is the per-tick snapshot of one channel's
//! request side; ready/response signals travel the other way and are plain
//! outputs on the bridge.
//!
//! Data width is fixed at 32 bits with byte (8-bit) strobe granularity.

/// Bytes per data word.
pub const WORD_BYTES: usize = 4;

/// Width of the write strobe in bits (one per byte lane).
pub const STRB_WIDTH: usize = WORD_BYTES;

/// Strobe value selecting every byte lane.
pub const STRB_ALL: u8 = (1 << STRB_WIDTH) - 1;

/// Write response code.
///
/// The bridge models no error conditions: malformed addresses alias onto
/// the flag register rather than being rejected, so every response is
/// `Okay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RespCode {
    /// Transaction completed successfully (AXI OKAY).
    #[default]
    Okay,
}

/// Write-address channel request (`aw*`).
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteAddrChannel {
    pub valid: bool,
    pub addr: u32,
}

/// Write-data channel request (`w*`).
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteDataChannel {
    pub valid: bool,
    pub data: u32,
    /// Byte strobe: bit `i` set means byte lane `i` of `data` is written.
    pub strb: u8,
}

/// Write-response channel, requester side (`bready`).
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteRespChannel {
    pub ready: bool,
}

/// Read-address channel request (`ar*`).
///
/// The bridge has a single read register, so `addr` is accepted but not
/// decoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadAddrChannel {
    pub valid: bool,
    pub addr: u32,
}

/// Read-data channel, requester side (`rready`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadDataChannel {
    pub ready: bool,
}
