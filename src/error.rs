
use thiserror::Error;

/// Everything that can go wrong while turning an alpha mask into a distance field image.
#[derive(Error, Debug)]
pub enum Error {
    /// The search radius must be at least one pixel.
    #[error("invalid spread {0}: the search radius must be at least 1")]
    InvalidSpread(u32),

    /// The search radius is larger than the distance storage can represent exactly.
    #[error("spread {spread} is too large for the distance storage, at most {max} is supported")]
    SpreadTooLarge { spread: u32, max: u32 },

    /// An output size of zero was requested.
    #[error("invalid output size {size}: must be at least 1")]
    InvalidOutputSize { size: u32 },

    /// The requested output size does not evenly divide the input dimensions.
    #[error("output size {size} does not evenly divide input dimensions {width}x{height}")]
    IndivisibleOutputSize { width: u32, height: u32, size: u32 },

    /// Every pixel ended up with the same signed distance,
    /// so there is no range to normalize into.
    #[error("uniform distance field: every pixel has distance {distance}, no boundary within spread")]
    UniformField { distance: i32 },

    /// The output path has an extension no encoder is registered for.
    #[error("unsupported output type: {extension:?}")]
    UnsupportedOutputType { extension: String },

    /// The image is too large for the selected output format.
    #[error("image of {width}x{height} is too large for the output format")]
    ImageTooLarge { width: u32, height: u32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "piston_image")]
    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[cfg(feature = "piston_image")]
    #[error("gif encoding failed: {0}")]
    Gif(#[from] gif::EncodingError),
}

pub type Result<T> = std::result::Result<T, Error>;
