//! This crate converts a binary image, usually the alpha mask
//! of a glyph or sprite, into a normalized signed distance field.
//! Every pixel searches square rings of growing radius for the
//! nearest pixel of the opposite class, up to a fixed `spread`.
//! The signed distances are then rescaled into `0.0 ..= 1.0`
//! using the smallest and largest distance of the whole image.

pub mod binary_image;
pub mod distance_field;
pub mod normalized_field;
pub mod options;
pub mod convert;
pub mod error;

#[cfg(feature = "piston_image")]
pub mod codec;

pub use error::{ Error, Result };

pub mod prelude {
    pub use crate::{
        compute_distance_field,
        compute_f16_distance_field,
        compute_f32_distance_field,
        Error, Result,
    };

    pub use crate::binary_image::{
        BinaryImage, BinaryGrid, ThresholdPolicy
    };

    pub use crate::distance_field::{
        SignedDistanceField, DistanceStorage, DistanceRange,
        F16DistanceStorage, F32DistanceStorage,
        nearest_opposite,
    };

    pub use crate::normalized_field::{ NormalizedField, validate_output_size };
    pub use crate::options::{ ConversionOptions, Precision, DEFAULT_SPREAD };
    pub use crate::convert::normalized_distance_field;

    #[cfg(feature = "piston_image")]
    pub use crate::binary_image::piston_image as binary_piston_image;

    #[cfg(feature = "piston_image")]
    pub use crate::codec::OutputFormat;

    #[cfg(feature = "piston_image")]
    pub use crate::convert::{ convert_file, convert_image, Conversion };
}


use prelude::*;

/// Compute the signed distance field with the specified distance storage of the specified binary image.
pub fn compute_distance_field<D: DistanceStorage>(image: &impl BinaryImage, spread: u32) -> Result<SignedDistanceField<D>> {
    SignedDistanceField::compute(image, spread)
}

/// Compute the signed distance field with an `f16` distance storage of the specified binary image.
pub fn compute_f16_distance_field(image: &impl BinaryImage, spread: u32) -> Result<SignedDistanceField<F16DistanceStorage>> {
    compute_distance_field(image, spread)
}

/// Compute the signed distance field with an `f32` distance storage of the specified binary image.
pub fn compute_f32_distance_field(image: &impl BinaryImage, spread: u32) -> Result<SignedDistanceField<F32DistanceStorage>> {
    compute_distance_field(image, spread)
}
