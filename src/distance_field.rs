
use crate::binary_image::BinaryImage;
use crate::error::{ Error, Result };
use crate::normalized_field::NormalizedField;
use log::debug;


/// Signed distances of every pixel to the nearest pixel of the opposite class,
/// positive inside the shape and negative outside.
/// Must be normalized before it can be rasterized.
#[derive(Clone, PartialEq, Debug)]
pub struct SignedDistanceField<D: DistanceStorage> {
    pub width: u32,
    pub height: u32,
    pub spread: u32,
    pub distances: D,

    /// The smallest and largest signed distance in `distances`.
    pub range: DistanceRange,
}

/// The global extrema of a signed distance field.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DistanceRange {
    pub min: i32,
    pub max: i32,
}

/// Needs less storage with sufficient precision, but takes longer
/// because of conversions between f16 and f32.
pub type F16DistanceStorage = Vec<half::f16>;

/// Needs more storage with high precision, but no conversions must be made.
pub type F32DistanceStorage = Vec<f32>;

pub trait DistanceStorage {
    /// The largest integer distance this storage holds exactly.
    /// Larger spreads would round saturated distances.
    const MAX_EXACT_DISTANCE: u32;

    fn new(length: usize) -> Self;

    fn get(&self, index: usize) -> f32;

    fn set(&mut self, index: usize, distance: f32);
}


impl DistanceRange {
    fn of(distance: i32) -> Self {
        DistanceRange { min: distance, max: distance }
    }

    fn including(self, distance: i32) -> Self {
        DistanceRange {
            min: self.min.min(distance),
            max: self.max.max(distance),
        }
    }

    /// A range with no extent cannot be normalized.
    pub fn is_uniform(&self) -> bool {
        self.min == self.max
    }
}

impl<D> SignedDistanceField<D> where D: DistanceStorage {

    /// Search the neighbourhood of every pixel for the nearest pixel of the opposite class,
    /// looking at most `spread` pixels far. Pixels without any such neighbour
    /// saturate at `spread`. Also records the global extrema needed for normalization.
    /// The spread must not exceed what the storage can hold exactly.
    pub fn compute(binary_image: &impl BinaryImage, spread: u32) -> Result<Self> {
        if spread == 0 {
            return Err(Error::InvalidSpread(spread));
        }

        if spread > D::MAX_EXACT_DISTANCE {
            return Err(Error::SpreadTooLarge { spread, max: D::MAX_EXACT_DISTANCE });
        }

        let width = binary_image.width();
        let height = binary_image.height();
        let mut distances = D::new(width as usize * height as usize);
        let mut range: Option<DistanceRange> = None;

        for y in 0..height {
            for x in 0..width {
                let distance = nearest_opposite(binary_image, x, y, spread);

                range = Some(match range {
                    Some(range) => range.including(distance),
                    None => DistanceRange::of(distance),
                });

                distances.set(width as usize * y as usize + x as usize, distance as f32);
            }
        }

        // an empty canvas has nothing to normalize
        let range = range.unwrap_or(DistanceRange::of(0));
        debug!("built {}x{} distance field with spread {}, range {}..={}", width, height, spread, range.min, range.max);

        Ok(SignedDistanceField { width, height, spread, distances, range })
    }

    /// Rescale every distance into `0.0 ..= 1.0` using the global extrema,
    /// so that the most outside pixel becomes `0.0` and the most inside pixel becomes `1.0`.
    /// Fails if all pixels have the same distance.
    pub fn normalize(mut self) -> Result<NormalizedField<D>> {
        let DistanceRange { min, max } = self.range;

        if self.range.is_uniform() {
            return Err(Error::UniformField { distance: min });
        }

        let min = min as f32;
        let extent = (max as f32) - min;

        for index in 0 .. self.width as usize * self.height as usize {
            let distance = self.distances.get(index);
            self.distances.set(index, (distance - min) / extent);
        }

        Ok(NormalizedField::new(self.width, self.height, self.distances))
    }

    #[inline]
    pub fn get_distance(&self, x: u32, y: u32) -> f32 {
        self.distances.get(self.flatten_index(x, y))
    }

    #[inline]
    pub fn flatten_index(&self, x: u32, y: u32) -> usize {
        self.width as usize * y as usize + x as usize
    }
}

/// The signed distance from the pixel at `(x, y)` to the nearest pixel of the opposite class,
/// found by scanning square rings of growing radius around the pixel.
/// Each ring is scanned top, bottom, left, then right edge, and the first hit ends the search.
/// Coordinates outside of the canvas never match, so the canvas border is not an edge.
/// The magnitude saturates at `spread`, which is capped at `i32::MAX`.
/// The sign is positive for inside pixels.
pub fn nearest_opposite(image: &impl BinaryImage, x: u32, y: u32, spread: u32) -> i32 {
    let inside = image.is_inside(x, y);
    let (x, y) = (x as i64, y as i64);
    let spread = i32::try_from(spread).unwrap_or(i32::MAX);

    let distance = (1 .. spread)
        .find(|&radius| ring_contains(image, x, y, radius as i64, !inside))
        .unwrap_or(spread);

    if inside { distance } else { -distance }
}

#[inline]
fn ring_contains(image: &impl BinaryImage, x: i64, y: i64, radius: i64, target: bool) -> bool {
    let is_target = |x: i64, y: i64| image.class_at(x, y) == Some(target);

    let mut columns = x - radius ..= x + radius;
    let mut rows = y - radius + 1 ..= y + radius - 1;

    columns.clone().any(|column| is_target(column, y - radius))
        || columns.any(|column| is_target(column, y + radius))
        || rows.clone().any(|row| is_target(x - radius, row))
        || rows.any(|row| is_target(x + radius, row))
}


impl DistanceStorage for F16DistanceStorage {
    const MAX_EXACT_DISTANCE: u32 = 1 << 11;

    fn new(length: usize) -> Self {
        vec![half::f16::ZERO; length]
    }

    #[inline]
    fn get(&self, index: usize) -> f32 {
        self[index].to_f32()
    }

    #[inline]
    fn set(&mut self, index: usize, distance: f32) {
        self[index] = half::f16::from_f32(distance)
    }
}

impl DistanceStorage for F32DistanceStorage {
    const MAX_EXACT_DISTANCE: u32 = 1 << 24;

    fn new(length: usize) -> Self {
        vec![0.0; length]
    }

    #[inline]
    fn get(&self, index: usize) -> f32 {
        self[index]
    }

    #[inline]
    fn set(&mut self, index: usize, distance: f32) {
        self[index] = distance
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary_image::BinaryGrid;

    #[test]
    fn nearest_on_first_ring(){
        let image = BinaryGrid::from_fn(3, 3, |x, y| x == 1 && y == 1);

        assert_eq!(nearest_opposite(&image, 1, 1, 20), 1);
        assert_eq!(nearest_opposite(&image, 0, 0, 20), -1);
        assert_eq!(nearest_opposite(&image, 2, 1, 20), -1);
    }

    #[test]
    fn ring_distance_is_chebyshev(){
        // a single inside pixel in the corner, the opposite corner is 4 rings away
        let image = BinaryGrid::from_fn(5, 5, |x, y| x == 0 && y == 0);

        assert_eq!(nearest_opposite(&image, 4, 4, 20), -4);
        assert_eq!(nearest_opposite(&image, 4, 1, 20), -4);
        assert_eq!(nearest_opposite(&image, 2, 3, 20), -3);
    }

    #[test]
    fn saturates_beyond_last_ring(){
        let image = BinaryGrid::from_fn(9, 1, |x, _| x == 0);

        // rings up to `spread - 1` are searched, so the pixel at radius 3 is found with spread 4
        assert_eq!(nearest_opposite(&image, 3, 0, 4), -3);
        assert_eq!(nearest_opposite(&image, 4, 0, 4), -4);
        assert_eq!(nearest_opposite(&image, 8, 0, 4), -4);
    }

    #[test]
    fn spread_of_one_searches_nothing(){
        let image = BinaryGrid::from_fn(2, 1, |x, _| x == 0);
        assert_eq!(nearest_opposite(&image, 0, 0, 1), 1);
        assert_eq!(nearest_opposite(&image, 1, 0, 1), -1);
    }

    #[test]
    fn zero_spread_is_rejected(){
        let image = BinaryGrid::from_fn(2, 1, |x, _| x == 0);
        let result = SignedDistanceField::<F32DistanceStorage>::compute(&image, 0);
        assert!(matches!(result, Err(Error::InvalidSpread(0))));
    }

    #[test]
    fn spread_is_bounded_by_exact_storage(){
        let image = BinaryGrid::from_fn(2, 1, |x, _| x == 0);

        let result = SignedDistanceField::<F16DistanceStorage>::compute(&image, 2049);
        assert!(matches!(result, Err(Error::SpreadTooLarge { spread: 2049, max: 2048 })));

        let result = SignedDistanceField::<F32DistanceStorage>::compute(&image, u32::MAX);
        assert!(matches!(result, Err(Error::SpreadTooLarge { max: 16_777_216, .. })));

        // the largest allowed spread is stored without rounding
        let max = <F16DistanceStorage as DistanceStorage>::MAX_EXACT_DISTANCE as f32;
        let mut storage = <F16DistanceStorage as DistanceStorage>::new(2);
        DistanceStorage::set(&mut storage, 0, -max);
        DistanceStorage::set(&mut storage, 1, max - 1.0);
        assert_eq!(DistanceStorage::get(&storage, 0), -2048.0);
        assert_eq!(DistanceStorage::get(&storage, 1), 2047.0);

        let field = SignedDistanceField::<F16DistanceStorage>::compute(&image, 2048).unwrap();
        assert_eq!(field.range, DistanceRange { min: -1, max: 1 });
    }

    #[test]
    fn range_tracks_negative_only_fields(){
        // one inside pixel, everything else far outside
        let image = BinaryGrid::from_fn(12, 1, |x, _| x == 0);
        let field = SignedDistanceField::<F32DistanceStorage>::compute(&image, 5).unwrap();

        assert_eq!(field.range, DistanceRange { min: -5, max: 1 });
        assert_eq!(field.get_distance(0, 0), 1.0);
        assert_eq!(field.get_distance(11, 0), -5.0);
    }

    #[test]
    fn f16_storage_holds_integer_distances(){
        let image = BinaryGrid::from_fn(40, 1, |x, _| x < 20);
        let field_16 = SignedDistanceField::<F16DistanceStorage>::compute(&image, 30).unwrap();
        let field_32 = SignedDistanceField::<F32DistanceStorage>::compute(&image, 30).unwrap();

        for x in 0..40 {
            assert_eq!(field_16.get_distance(x, 0), field_32.get_distance(x, 0));
        }
    }
}
