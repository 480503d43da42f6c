//! Palettes mapping an 8-bit intensity to an RGB color.

use image::Rgb;
use serde::{Deserialize, Serialize};

/// A fixed palette. `Option<Colormap>::None` stands for grayscale
/// passthrough wherever a colormap is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Colormap {
    Autumn,
    Bone,
    Jet,
    Winter,
    Summer,
    Spring,
    Cool,
    Hsv,
    Pink,
    Hot,
    Viridis,
    Turbo,
}

impl Colormap {
    pub const ALL: [Colormap; 12] = [
        Colormap::Autumn,
        Colormap::Bone,
        Colormap::Jet,
        Colormap::Winter,
        Colormap::Summer,
        Colormap::Spring,
        Colormap::Cool,
        Colormap::Hsv,
        Colormap::Pink,
        Colormap::Hot,
        Colormap::Viridis,
        Colormap::Turbo,
    ];

    /// Color of intensity `index` (0 = low end, 255 = high end).
    pub fn color(self, index: u8) -> Rgb<u8> {
        let t = f64::from(index) / 255.0;
        let [r, g, b] = self.evaluate(t);
        Rgb([to_byte(r), to_byte(g), to_byte(b)])
    }

    /// The full 256-entry lookup table.
    pub fn lut(self) -> [Rgb<u8>; 256] {
        let mut lut = [Rgb([0, 0, 0]); 256];
        for (i, entry) in lut.iter_mut().enumerate() {
            *entry = self.color(i as u8);
        }
        lut
    }

    /// Channels in `[0, 1]` for `t` in `[0, 1]`.
    fn evaluate(self, t: f64) -> [f64; 3] {
        match self {
            Colormap::Autumn => [1.0, t, 0.0],
            Colormap::Winter => [0.0, t, 1.0 - t / 2.0],
            Colormap::Summer => [t, 0.5 + t / 2.0, 0.4],
            Colormap::Spring => [1.0, t, 1.0 - t],
            Colormap::Cool => [t, 1.0 - t, 1.0],
            Colormap::Jet => [
                1.5 - (4.0 * t - 3.0).abs(),
                1.5 - (4.0 * t - 2.0).abs(),
                1.5 - (4.0 * t - 1.0).abs(),
            ],
            Colormap::Hot => hot(t),
            Colormap::Bone => {
                let [r, g, b] = hot(t);
                // Gray tinted with a reversed hot map.
                [
                    (7.0 * t + b) / 8.0,
                    (7.0 * t + g) / 8.0,
                    (7.0 * t + r) / 8.0,
                ]
            }
            Colormap::Pink => {
                let [r, g, b] = hot(t);
                [
                    ((2.0 * t + r) / 3.0).sqrt(),
                    ((2.0 * t + g) / 3.0).sqrt(),
                    ((2.0 * t + b) / 3.0).sqrt(),
                ]
            }
            Colormap::Hsv => hue(t),
            Colormap::Viridis => viridis(t),
            Colormap::Turbo => turbo(t),
        }
    }
}

fn to_byte(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn hot(t: f64) -> [f64; 3] {
    [3.0 * t, 3.0 * t - 1.0, 3.0 * t - 2.0]
}

/// Fully saturated hue wheel, red at both ends.
fn hue(t: f64) -> [f64; 3] {
    let h = (t * 6.0) % 6.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    match h as u8 {
        0 => [1.0, x, 0.0],
        1 => [x, 1.0, 0.0],
        2 => [0.0, 1.0, x],
        3 => [0.0, x, 1.0],
        4 => [x, 0.0, 1.0],
        _ => [1.0, 0.0, x],
    }
}

/// Polynomial fit of matplotlib's viridis.
fn viridis(t: f64) -> [f64; 3] {
    const C: [[f64; 3]; 7] = [
        [0.277_727_327_223_417_7, 0.005_407_344_544_966_578, 0.334_099_805_335_306_1],
        [0.105_093_043_108_577_4, 1.404_613_529_898_575, 1.384_590_162_594_685],
        [-0.330_861_828_725_556_3, 0.214_847_559_468_213, 0.095_095_163_028_236_59],
        [-4.634_230_498_983_486, -5.799_100_973_351_585, -19.332_440_956_279_87],
        [6.228_269_936_347_081, 14.179_933_366_805_09, 56.690_552_600_681_05],
        [4.776_384_997_670_288, -13.745_145_377_746_01, -65.353_032_633_372_34],
        [-5.435_455_855_934_631, 4.645_852_612_178_535, 26.312_435_249_583_2],
    ];
    let mut rgb = [0.0; 3];
    for (channel, value) in rgb.iter_mut().enumerate() {
        *value = C.iter().rev().fold(0.0, |acc, c| acc * t + c[channel]);
    }
    rgb
}

/// Polynomial fit of the Turbo rainbow map.
fn turbo(t: f64) -> [f64; 3] {
    const C: [[f64; 3]; 6] = [
        [0.135_721_38, 0.091_402_61, 0.106_673_30],
        [4.615_392_60, 2.194_188_39, 12.641_946_08],
        [-42.660_322_58, 4.842_966_58, -60.582_048_36],
        [132.131_082_34, -14.185_033_33, 110.362_767_71],
        [-152.942_393_96, 4.277_298_57, -89.903_109_12],
        [59.286_379_43, 2.829_566_04, 27.348_249_73],
    ];
    let mut rgb = [0.0; 3];
    for (channel, value) in rgb.iter_mut().enumerate() {
        *value = C.iter().rev().fold(0.0, |acc, c| acc * t + c[channel]);
    }
    rgb
}
