/// Sequential and diverging color schemes for surface shading
use image::Rgb;

/// Named color scheme. The choice per view is cosmetic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Viridis,
    Plasma,
    Coolwarm,
    Inferno,
}

const VIRIDIS: [[u8; 3]; 5] = [
    [0x44, 0x01, 0x54],
    [0x3b, 0x52, 0x8b],
    [0x21, 0x91, 0x8c],
    [0x5e, 0xc9, 0x62],
    [0xfd, 0xe7, 0x25],
];

const PLASMA: [[u8; 3]; 5] = [
    [0x0d, 0x08, 0x87],
    [0x7e, 0x03, 0xa8],
    [0xcc, 0x47, 0x78],
    [0xf8, 0x95, 0x40],
    [0xf0, 0xf9, 0x21],
];

const COOLWARM: [[u8; 3]; 5] = [
    [0x3b, 0x4c, 0xc0],
    [0x8d, 0xb0, 0xfe],
    [0xdd, 0xdd, 0xdd],
    [0xf4, 0x9a, 0x7b],
    [0xb4, 0x04, 0x26],
];

const INFERNO: [[u8; 3]; 5] = [
    [0x00, 0x00, 0x04],
    [0x57, 0x10, 0x6e],
    [0xbc, 0x37, 0x54],
    [0xf9, 0x8e, 0x09],
    [0xfc, 0xff, 0xa4],
];

impl ColorScheme {
    /// Schemes assigned to the four canonical views, in preset order
    pub const VIEW_SCHEMES: [ColorScheme; 4] =
        [Self::Viridis, Self::Plasma, Self::Coolwarm, Self::Inferno];

    fn stops(self) -> &'static [[u8; 3]] {
        match self {
            Self::Viridis => &VIRIDIS,
            Self::Plasma => &PLASMA,
            Self::Coolwarm => &COOLWARM,
            Self::Inferno => &INFERNO,
        }
    }

    /// Sample the scheme at `t`, clamped to `[0, 1]`
    pub fn sample(self, t: f64) -> Rgb<u8> {
        let stops = self.stops();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let scaled = t * (stops.len() - 1) as f64;
        let lower = (scaled.floor() as usize).min(stops.len() - 2);
        let frac = scaled - lower as f64;

        let (a, b) = (stops[lower], stops[lower + 1]);
        Rgb([0, 1, 2].map(|c| {
            (a[c] as f64 + (b[c] as f64 - a[c] as f64) * frac).round() as u8
        }))
    }
}
