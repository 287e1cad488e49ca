//! Encoding distance field images, with the codec chosen by the output file extension.

use std::path::Path;
use image::{ ExtendedColorType, GrayImage, ImageEncoder };
use image::codecs::png::PngEncoder;
use image::codecs::jpeg::JpegEncoder;
use crate::error::{ Error, Result };


/// The image formats a distance field can be written as.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OutputFormat {
    /// Lossless.
    Png,

    /// Indexed with a 256 level grey palette, so no quantization or dithering happens.
    Gif,

    /// Lossy, at maximum quality.
    Jpeg,
}

const JPEG_QUALITY: u8 = 100;

impl OutputFormat {

    /// Select the format by the case-insensitive extension of the path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path.extension()
            .map(|extension| extension.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "png" => Ok(OutputFormat::Png),
            "gif" => Ok(OutputFormat::Gif),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            _ => Err(Error::UnsupportedOutputType { extension }),
        }
    }

    /// Encode the whole image into memory.
    pub fn encode(self, image: &GrayImage) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();

        match self {
            OutputFormat::Png => PngEncoder::new(&mut bytes)
                .write_image(image.as_raw(), image.width(), image.height(), ExtendedColorType::L8)?,

            OutputFormat::Jpeg => JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY)
                .write_image(image.as_raw(), image.width(), image.height(), ExtendedColorType::L8)?,

            OutputFormat::Gif => encode_gif(image, &mut bytes)?,
        }

        Ok(bytes)
    }
}

fn encode_gif(image: &GrayImage, bytes: &mut Vec<u8>) -> Result<()> {
    let too_large = || Error::ImageTooLarge { width: image.width(), height: image.height() };
    let width = u16::try_from(image.width()).map_err(|_| too_large())?;
    let height = u16::try_from(image.height()).map_err(|_| too_large())?;

    // palette index equals grey level
    let palette: Vec<u8> = (0 ..= u8::MAX)
        .flat_map(|level| [level, level, level])
        .collect();

    let mut encoder = gif::Encoder::new(bytes, width, height, &palette)?;

    let mut frame = gif::Frame::from_indexed_pixels(width, height, image.as_raw().as_slice(), None);
    frame.palette = None;

    encoder.write_frame(&frame)?;
    Ok(())
}
