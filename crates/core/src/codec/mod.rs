//! Image and animation container codecs.
//!
//! The shell only ever needs RGBA8 rasters in and out of encoded bytes; the
//! [`ImageContainer`] trait keeps the concrete format library at the edge.

use std::io::Cursor;

use image::{
    codecs::{
        gif::{GifEncoder, Repeat},
        png::PngEncoder,
    },
    imageops::{self, FilterType},
    ColorType, Delay, ImageEncoder, RgbaImage,
};

use crate::{Result, StudioError};

/// Decoded raster with tightly packed RGBA8 channel bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub channels: Vec<u8>,
}

impl RasterImage {
    pub fn new(width: u32, height: u32, channels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            channels,
        }
    }
}

pub trait ImageContainer {
    /// Decodes any supported still image into RGBA8.
    fn decode(&self, bytes: &[u8]) -> Result<RasterImage>;

    /// Encodes a lossless still image.
    fn encode_still(&self, image: &RasterImage) -> Result<Vec<u8>>;

    /// Encodes `frames` (each `width * height` RGBA8888 pixels, back to back)
    /// as a looping animation upscaled by `scale`.
    fn encode_animation(
        &self,
        width: u32,
        height: u32,
        frames: &[u32],
        frame_rate: u32,
        scale: u32,
    ) -> Result<Vec<u8>>;
}

/// PNG stills and GIF animations backed by the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCrateCodec;

impl ImageCrateCodec {
    pub fn new() -> Self {
        Self
    }
}

impl ImageContainer for ImageCrateCodec {
    fn decode(&self, bytes: &[u8]) -> Result<RasterImage> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = image.dimensions();
        Ok(RasterImage::new(width, height, image.into_raw()))
    }

    fn encode_still(&self, image: &RasterImage) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        PngEncoder::new(&mut out).write_image(
            &image.channels,
            image.width,
            image.height,
            ColorType::Rgba8,
        )?;
        Ok(out)
    }

    fn encode_animation(
        &self,
        width: u32,
        height: u32,
        frames: &[u32],
        frame_rate: u32,
        scale: u32,
    ) -> Result<Vec<u8>> {
        let frame_len = (width * height) as usize;
        if frame_len == 0 || frames.len() % frame_len != 0 {
            return Err(StudioError::msg(format!(
                "animation buffer of {} pixels is not a whole number of {width}x{height} frames",
                frames.len()
            )));
        }

        let scale = scale.max(1);
        let delay = Delay::from_numer_denom_ms(1000, frame_rate.max(1));
        let mut out = Cursor::new(Vec::new());

        {
            let mut encoder = GifEncoder::new_with_speed(&mut out, 10);
            encoder.set_repeat(Repeat::Infinite)?;

            for pixels in frames.chunks_exact(frame_len) {
                let raw: Vec<u8> = pixels.iter().flat_map(|pixel| pixel.to_le_bytes()).collect();
                let mut buffer = RgbaImage::from_raw(width, height, raw)
                    .ok_or_else(|| StudioError::msg("frame buffer size mismatch"))?;

                if scale > 1 {
                    buffer = imageops::resize(
                        &buffer,
                        width * scale,
                        height * scale,
                        FilterType::Nearest,
                    );
                }

                encoder.encode_frame(image::Frame::from_parts(buffer, 0, 0, delay))?;
            }
        }

        Ok(out.into_inner())
    }
}
