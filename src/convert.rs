//! The whole conversion from an alpha mask to a distance field image.
//! Each stage consumes the previous one completely:
//! classify, build, normalize, downsample, rasterize, encode.

use crate::binary_image::BinaryImage;
use crate::distance_field::{ DistanceStorage, SignedDistanceField };
use crate::normalized_field::NormalizedField;
use crate::options::ConversionOptions;
use crate::error::Result;


/// Build, normalize, and optionally downsample the distance field of a binary image.
/// The options are validated before the field is built.
pub fn normalized_distance_field<D: DistanceStorage>(
    binary_image: &impl BinaryImage, options: &ConversionOptions
) -> Result<NormalizedField<D>>
{
    options.validate(binary_image.width(), binary_image.height())?;

    let field = SignedDistanceField::<D>::compute(binary_image, options.spread)?;
    let normalized = field.normalize()?;

    match options.output_size {
        Some(size) if size != normalized.width || size != normalized.height => normalized.downsample(size),
        _ => Ok(normalized),
    }
}

#[cfg(feature = "piston_image")]
pub use self::piston_image::*;

#[cfg(feature = "piston_image")]
mod piston_image {
    use std::io::Write;
    use std::path::{ Path, PathBuf };
    use image::{ DynamicImage, GrayImage };
    use log::{ debug, info };
    use super::normalized_distance_field;
    use crate::binary_image::piston_image::of_alpha;
    use crate::codec::OutputFormat;
    use crate::distance_field::{ F16DistanceStorage, F32DistanceStorage };
    use crate::error::Result;
    use crate::options::{ ConversionOptions, Precision };

    /// What a finished file conversion produced.
    #[derive(Clone, PartialEq, Eq, Debug)]
    pub struct Conversion {
        pub output: PathBuf,
        pub format: OutputFormat,
        pub width: u32,
        pub height: u32,
    }

    /// Convert a decoded image into a grey-scale distance field image.
    pub fn convert_image(image: &DynamicImage, options: &ConversionOptions) -> Result<GrayImage> {
        let binary_image = of_alpha(image, options.threshold);
        debug!(
            "classified {}x{} image with {:?}, {} pixels inside",
            image.width(), image.height(), options.threshold, binary_image.count_inside()
        );

        Ok(match options.precision {
            Precision::F32 => normalized_distance_field::<F32DistanceStorage>(&binary_image, options)?.to_gray_u8_image(),
            Precision::F16 => normalized_distance_field::<F16DistanceStorage>(&binary_image, options)?.to_gray_u8_image(),
        })
    }

    /// Read the input image, convert it, and write the result to the output path.
    /// The output format is checked before anything is read,
    /// and nothing is written if any stage fails.
    pub fn convert_file(input: &Path, output: &Path, options: &ConversionOptions) -> Result<Conversion> {
        let format = OutputFormat::from_path(output)?;

        let image = image::open(input)?;
        let distance_image = convert_image(&image, options)?;

        let bytes = format.encode(&distance_image)?;
        write_replacing(output, &bytes)?;

        info!(
            "wrote {}x{} {:?} distance field to {}",
            distance_image.width(), distance_image.height(), format, output.display()
        );

        Ok(Conversion {
            output: output.to_path_buf(),
            format,
            width: distance_image.width(),
            height: distance_image.height(),
        })
    }

    /// Write into a temporary file next to the output, then move it into place,
    /// so that a failed write never leaves a truncated output behind.
    fn write_replacing(output: &Path, bytes: &[u8]) -> Result<()> {
        let directory = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = tempfile::NamedTempFile::new_in(directory)?;
        file.write_all(bytes)?;
        file.as_file().sync_all()?;
        file.persist(output).map_err(|error| error.error)?;

        Ok(())
    }
}
