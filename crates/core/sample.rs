//! Built-in sample POIs around lower Manhattan.

use hexnear_types::{Coordinate, Poi};
use once_cell::sync::Lazy;

/// Coordinate used when a request comes from a loopback address.
pub const NYC: Coordinate = Coordinate::new(40.7128, -74.0060);

static SAMPLE_POIS: Lazy<Vec<Poi>> = Lazy::new(|| {
    vec![
        Poi::new(1, "World Trade Center", Coordinate::new(40.7127, -74.0134)),
        Poi::new(2, "City Hall", Coordinate::new(40.7128, -74.0060)),
        Poi::new(3, "Brooklyn Bridge", Coordinate::new(40.7061, -73.9969)),
    ]
});

/// The three sample POIs, all within about a kilometre of [`NYC`].
pub fn sample_pois() -> Vec<Poi> {
    SAMPLE_POIS.clone()
}
