
use crate::distance_field::DistanceStorage;
use crate::error::{ Error, Result };
use log::debug;


/// A distance field rescaled into `0.0 ..= 1.0`,
/// where `0.0` is the most outside pixel and `1.0` the most inside pixel.
#[derive(Clone, PartialEq, Debug)]
pub struct NormalizedField<D: DistanceStorage> {
    pub width: u32,
    pub height: u32,
    pub values: D,
}

/// Checks that a square output of `size` pixels per side
/// partitions the input into equally sized blocks.
/// Returns the horizontal and vertical block size.
pub fn validate_output_size(width: u32, height: u32, size: u32) -> Result<(u32, u32)> {
    if size == 0 {
        return Err(Error::InvalidOutputSize { size });
    }

    if width % size != 0 || height % size != 0 {
        return Err(Error::IndivisibleOutputSize { width, height, size });
    }

    Ok((width / size, height / size))
}

impl<D> NormalizedField<D> where D: DistanceStorage {
    pub fn new(width: u32, height: u32, values: D) -> Self {
        NormalizedField { width, height, values }
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.values.get(self.width as usize * y as usize + x as usize)
    }

    /// Average non-overlapping blocks into a `size` by `size` field.
    /// Each output value is the mean of exactly one block of input values.
    pub fn downsample(&self, size: u32) -> Result<Self> {
        let (block_width, block_height) = validate_output_size(self.width, self.height, size)?;
        debug!("downsampling {}x{} to {}x{} with {}x{} blocks", self.width, self.height, size, size, block_width, block_height);

        let block_area = block_width as f64 * block_height as f64;
        let mut values = D::new(size as usize * size as usize);

        for block_y in 0..size {
            for block_x in 0..size {
                let mut sum = 0.0_f64;

                for y in block_y * block_height .. (block_y + 1) * block_height {
                    for x in block_x * block_width .. (block_x + 1) * block_width {
                        sum += self.get(x, y) as f64;
                    }
                }

                values.set(size as usize * block_y as usize + block_x as usize, (sum / block_area) as f32);
            }
        }

        Ok(NormalizedField::new(size, size, values))
    }

    /// One grey byte per pixel, rounding `value * 255`.
    pub fn to_gray_bytes(&self) -> Vec<u8> {
        (0 .. self.width as usize * self.height as usize)
            .map(|index| to_gray(self.values.get(index)))
            .collect()
    }

    /// Convert to a grey-scale piston image.
    #[cfg(feature = "piston_image")]
    pub fn to_gray_u8_image(&self) -> image::GrayImage {
        image::GrayImage::from_fn(self.width, self.height, |x, y| image::Luma([ to_gray(self.get(x, y)) ]))
    }
}

#[inline]
fn to_gray(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance_field::{ F16DistanceStorage, F32DistanceStorage };

    fn field(width: u32, height: u32, values: &[f32]) -> NormalizedField<F32DistanceStorage> {
        NormalizedField::new(width, height, values.to_vec())
    }

    #[test]
    fn output_size_must_divide_both_dimensions(){
        assert_eq!(validate_output_size(8, 4, 4).unwrap(), (2, 1));
        assert_eq!(validate_output_size(8, 8, 8).unwrap(), (1, 1));

        assert!(matches!(
            validate_output_size(8, 6, 4),
            Err(Error::IndivisibleOutputSize { width: 8, height: 6, size: 4 })
        ));

        assert!(matches!(validate_output_size(8, 8, 0), Err(Error::InvalidOutputSize { size: 0 })));
    }

    #[test]
    fn downsample_averages_blocks(){
        let source = field(4, 4, &[
            0.0, 1.0,   0.5, 0.5,
            1.0, 0.0,   0.5, 0.5,

            0.0, 0.0,   1.0, 1.0,
            0.0, 0.25,  1.0, 1.0,
        ]);

        let downsampled = source.downsample(2).unwrap();
        assert_eq!((downsampled.width, downsampled.height), (2, 2));
        assert_eq!(downsampled.values, vec![ 0.5, 0.5, 0.0625, 1.0 ]);
    }

    #[test]
    fn downsample_to_full_size_is_identity(){
        let values = [0.0, 0.125, 0.3, 0.7, 0.9, 1.0, 0.5, 0.25, 0.75];
        let source = field(3, 3, &values);
        assert_eq!(source.downsample(3).unwrap(), source);
    }

    #[test]
    fn downsample_non_square_input_into_square(){
        let source = field(4, 2, &[
            0.0, 1.0, 1.0, 1.0,
            1.0, 0.0, 1.0, 1.0,
        ]);

        let downsampled = source.downsample(1).unwrap();
        assert_eq!(downsampled.values, vec![ 0.75 ]);

        let downsampled = source.downsample(2).unwrap();
        assert_eq!(downsampled.values, vec![ 0.5, 1.0, 0.5, 1.0 ]);
    }

    #[test]
    fn downsample_f16_storage(){
        let values: F16DistanceStorage = [0.0, 1.0, 0.5, 0.5].iter()
            .map(|&value| half::f16::from_f32(value)).collect();

        let downsampled = NormalizedField::new(2, 2, values).downsample(1).unwrap();
        assert_eq!(downsampled.get(0, 0), 0.5);
    }

    #[test]
    fn gray_bytes_are_rounded(){
        let source = field(4, 1, &[0.0, 0.5, 0.999, 1.0]);
        assert_eq!(source.to_gray_bytes(), vec![0, 128, 255, 255]);
    }
}
