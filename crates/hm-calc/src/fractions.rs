//! Sand / silt / clay split from the two interpolated percent-finer values.

/// Upper clay diameter (2 µm) in centimetres.
pub const CLAY_DIAMETER: f64 = 0.0002;
/// Upper silt diameter (50 µm) in centimetres.
pub const SILT_DIAMETER: f64 = 0.0050;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeFractions {
    pub sand: f64,
    pub silt: f64,
    pub clay: f64,
}

impl SizeFractions {
    /// Silt is the residual, so the three always sum to 100.
    pub fn from_percent_finer(finer_2um: f64, finer_50um: f64) -> Self {
        let clay = finer_2um;
        let sand = 100.0 - finer_50um;
        let silt = 100.0 - (sand + clay);
        Self { sand, silt, clay }
    }

    pub fn total(&self) -> f64 {
        self.sand + self.silt + self.clay
    }
}
