/// Smooth pseudo-random field built from three phase-shifted sinusoid
/// products.
///
/// Not gradient noise: it is periodic and has no isotropy guarantees, only
/// smooth organic variation. Each product lies in `[-1, 1]`, so the mean of
/// the three does too.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseField {
    /// Spatial frequency applied to `x` and `y` before sampling.
    pub frequency: f32,
    /// Temporal speed applied to `t` before sampling.
    pub speed: f32,
}

impl Default for NoiseField {
    fn default() -> Self {
        Self {
            frequency: 0.01,
            speed: 1.0,
        }
    }
}

impl NoiseField {
    pub const fn new(frequency: f32, speed: f32) -> Self {
        Self { frequency, speed }
    }

    pub fn sample(&self, x: f32, y: f32, t: f32) -> f32 {
        let x = x * self.frequency;
        let y = y * self.frequency;
        let t = t * self.speed;
        let a = (x + t).sin() * (y * 0.8 + t * 0.7).cos();
        let b = (x * 1.7 - t * 0.6 + 1.3).sin() * (y * 1.3 + t * 1.1).sin();
        let c = ((x + y) * 0.6 + t * 0.5 + 2.1).cos() * ((x - y) * 0.9 - t * 0.8).sin();
        (a + b + c) / 3.0
    }
}
