//! Hides a project blob in the low bits of a cover image.
//!
//! The payload is prefixed with its length as a little-endian `u32` and the
//! resulting bit stream is spread over the flattened RGBA channel bytes:
//! channel byte `i` stores stream bits `i * bits .. (i + 1) * bits` in its
//! lowest `bits` bits. Bits are read from the stream least significant first
//! and written from bit 0 upward, which is the layout existing cart images use.

use crate::{
    codec::{ImageContainer, RasterImage},
    Result, StudioError,
};

/// Size of the length prefix written ahead of the payload.
pub const LENGTH_PREFIX: usize = std::mem::size_of::<u32>();

pub const CARRIER_WIDTH: u32 = 256;
pub const CARRIER_HEIGHT: u32 = 256;

pub const MIN_BITS: u8 = 1;
pub const MAX_BITS: u8 = 8;

fn check_bits(bits: u8) -> Result<usize> {
    if (MIN_BITS..=MAX_BITS).contains(&bits) {
        Ok(bits as usize)
    } else {
        Err(StudioError::InvalidBitDensity(bits))
    }
}

/// Largest payload `channel_bytes` carrier bytes can hold at `bits` density.
pub fn capacity(channel_bytes: usize, bits: u8) -> usize {
    (channel_bytes * bits as usize / 8).saturating_sub(LENGTH_PREFIX)
}

/// Writes `payload` into the low bits of `channels`.
///
/// Channel bytes past the end of the payload keep their original value.
pub fn embed(channels: &mut [u8], payload: &[u8], bits: u8) -> Result<()> {
    let bits = check_bits(bits)?;
    let available = capacity(channels.len(), bits as u8);
    if payload.len() > available {
        return Err(StudioError::PayloadTooLarge {
            len: payload.len(),
            capacity: available,
        });
    }

    let mut stream = Vec::with_capacity(LENGTH_PREFIX + payload.len());
    stream.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    stream.extend_from_slice(payload);

    let stream_bits = stream.len() * 8;
    let groups = stream_bits.div_ceil(bits);
    let mask = ((1u16 << bits) - 1) as u8;

    for (index, channel) in channels.iter_mut().take(groups).enumerate() {
        let mut value = 0u8;
        for k in 0..bits {
            let from = index * bits + k;
            if from < stream_bits && stream[from >> 3] & (1 << (from & 7)) != 0 {
                value |= 1 << k;
            }
        }
        *channel = (*channel & !mask) | value;
    }

    Ok(())
}

/// Reads back a payload written by [`embed`] at the same density.
pub fn extract(channels: &[u8], bits: u8) -> Result<Vec<u8>> {
    let bits = check_bits(bits)?;
    let reader = BitReader { channels, bits };
    let available = channels.len() * bits / 8;

    if available < LENGTH_PREFIX {
        return Err(StudioError::CorruptPayload {
            declared: LENGTH_PREFIX,
            available,
        });
    }

    let mut prefix = [0u8; LENGTH_PREFIX];
    for (offset, byte) in prefix.iter_mut().enumerate() {
        *byte = reader.byte(offset);
    }

    let declared = u32::from_le_bytes(prefix) as usize;
    if declared > available - LENGTH_PREFIX {
        return Err(StudioError::CorruptPayload {
            declared,
            available: available - LENGTH_PREFIX,
        });
    }

    Ok((0..declared)
        .map(|offset| reader.byte(LENGTH_PREFIX + offset))
        .collect())
}

struct BitReader<'a> {
    channels: &'a [u8],
    bits: usize,
}

impl BitReader<'_> {
    fn bit(&self, index: usize) -> u8 {
        (self.channels[index / self.bits] >> (index % self.bits)) & 1
    }

    fn byte(&self, offset: usize) -> u8 {
        (0..8).fold(0, |byte, k| byte | self.bit(offset * 8 + k) << k)
    }
}

/// Cover image used when a project is exported as an image.
///
/// 256x256 RGBA is large enough for the biggest project at every density.
pub fn default_carrier() -> RasterImage {
    let mut channels = Vec::with_capacity((CARRIER_WIDTH * CARRIER_HEIGHT * 4) as usize);

    for y in 0..CARRIER_HEIGHT {
        for x in 0..CARRIER_WIDTH {
            let stripe = ((x + y) / 16) % 2 == 0;
            let shade = if stripe { 0x33 } else { 0x1a };
            let glow = (255 - (x.abs_diff(128) + y.abs_diff(128)).min(255)) as u8 / 4;
            channels.extend_from_slice(&[shade + glow / 2, shade, shade + glow, 0xff]);
        }
    }

    RasterImage::new(CARRIER_WIDTH, CARRIER_HEIGHT, channels)
}

/// Embeds `payload` in `carrier` and encodes the result as a still image.
pub fn encode_cart(
    container: &dyn ImageContainer,
    carrier: &RasterImage,
    payload: &[u8],
    bits: u8,
) -> Result<Vec<u8>> {
    let mut image = carrier.clone();
    embed(&mut image.channels, payload, bits)?;
    container.encode_still(&image)
}

/// Decodes a still image and extracts the payload hidden in it.
pub fn decode_cart(container: &dyn ImageContainer, bytes: &[u8], bits: u8) -> Result<Vec<u8>> {
    let image = container.decode(bytes)?;
    extract(&image.channels, bits)
}
