/// Linear RGBA with the color channels already multiplied by alpha, which is
/// what the overlay's `One, OneMinusSrcAlpha` blend expects.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color([f32; 4]);

impl Color {
    pub const WHITE: Color = Color([1.0; 4]);
    pub const TRANSPARENT: Color = Color([0.0; 4]);

    /// From channels that are already premultiplied.
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self([r, g, b, a])
    }

    /// From straight-alpha channels; each is clamped to `[0, 1]` first.
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let [r, g, b, a] = [r, g, b, a].map(|c| c.clamp(0.0, 1.0));
        Self([r * a, g * a, b * a, a])
    }

    pub fn alpha(self) -> f32 {
        self.0[3]
    }

    /// Scales opacity by `factor`, clamped to `[0, 1]`.
    pub fn faded(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self(self.0.map(|c| c * f))
    }

    pub fn to_array(self) -> [f32; 4] {
        self.0
    }

    pub fn to_wgpu(self) -> wgpu::Color {
        let [r, g, b, a] = self.0.map(f64::from);
        wgpu::Color { r, g, b, a }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_alpha_is_premultiplied() {
        assert_eq!(Color::from_straight(1.0, 0.5, 0.0, 0.5), Color::from_premul(0.5, 0.25, 0.0, 0.5));
        assert_eq!(Color::from_straight(2.0, 0.0, 0.0, 1.5), Color::from_premul(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn fading_keeps_channels_below_alpha() {
        let c = Color::WHITE.faded(0.25);
        assert_eq!(c.alpha(), 0.25);
        assert!(c.to_array()[..3].iter().all(|&v| v <= c.alpha()));
        assert_eq!(Color::WHITE.faded(-1.0), Color::TRANSPARENT);
    }

    #[test]
    fn converts_to_wgpu_clear_color() {
        let c = Color::from_premul(0.05, 0.05, 0.05, 1.0).to_wgpu();
        assert!((c.r - 0.05).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }
}
