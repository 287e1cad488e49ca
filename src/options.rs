
use crate::binary_image::ThresholdPolicy;
use crate::distance_field::{ DistanceStorage, F16DistanceStorage, F32DistanceStorage };
use crate::error::{ Error, Result };
use crate::normalized_field::validate_output_size;

/// The search radius used when none is configured.
pub const DEFAULT_SPREAD: u32 = 20;

/// How distances are stored while the field is built.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Precision {
    #[default]
    F32,

    /// Halves memory, normalized values keep about three decimal digits.
    F16,
}

impl Precision {
    /// The largest spread whose distances are stored without rounding.
    pub fn max_spread(self) -> u32 {
        match self {
            Precision::F32 => F32DistanceStorage::MAX_EXACT_DISTANCE,
            Precision::F16 => F16DistanceStorage::MAX_EXACT_DISTANCE,
        }
    }
}

/// Everything that controls a conversion.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ConversionOptions {
    /// Maximum search radius, and the distance of pixels without a boundary in reach.
    pub spread: u32,

    pub threshold: ThresholdPolicy,

    /// Downsample the field to a square of this many pixels per side.
    pub output_size: Option<u32>,

    pub precision: Precision,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        ConversionOptions {
            spread: DEFAULT_SPREAD,
            threshold: ThresholdPolicy::default(),
            output_size: None,
            precision: Precision::default(),
        }
    }
}

impl ConversionOptions {
    pub fn with_spread(self, spread: u32) -> Self {
        ConversionOptions { spread, ..self }
    }

    pub fn with_threshold(self, threshold: ThresholdPolicy) -> Self {
        ConversionOptions { threshold, ..self }
    }

    pub fn with_output_size(self, output_size: Option<u32>) -> Self {
        ConversionOptions { output_size, ..self }
    }

    pub fn with_precision(self, precision: Precision) -> Self {
        ConversionOptions { precision, ..self }
    }

    /// Check these options against an input of the specified dimensions.
    /// Runs before the distance field is built, so that invalid requests fail early.
    pub fn validate(&self, width: u32, height: u32) -> Result<()> {
        if self.spread == 0 {
            return Err(Error::InvalidSpread(self.spread));
        }

        let max = self.precision.max_spread();
        if self.spread > max {
            return Err(Error::SpreadTooLarge { spread: self.spread, max });
        }

        if let Some(size) = self.output_size {
            validate_output_size(width, height, size)?;
        }

        Ok(())
    }
}
