use std::collections::HashMap;

use palette::rgb::Rgb as PaletteRgb;
use palette::stimulus::FromStimulus;
use palette::{FromColor, Lch};

use tile48::engine::{Tile, WIN_TILE};

#[derive(Clone, Debug, Default)]
pub(crate) struct Rgb {
    color: PaletteRgb,
}

impl Rgb {
    pub(crate) fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            color: PaletteRgb::new(
                f32::from_stimulus(r),
                f32::from_stimulus(g),
                f32::from_stimulus(b),
            ),
        }
    }

    fn from_lch(lch: Lch) -> Self {
        Self {
            color: PaletteRgb::from_color(lch),
        }
    }

    #[inline(always)]
    pub(crate) fn r(&self) -> u8 {
        u8::from_stimulus(self.color.red)
    }

    #[inline(always)]
    pub(crate) fn g(&self) -> u8 {
        u8::from_stimulus(self.color.green)
    }

    #[inline(always)]
    pub(crate) fn b(&self) -> u8 {
        u8::from_stimulus(self.color.blue)
    }
}

impl From<&Rgb> for crossterm::style::Color {
    fn from(f: &Rgb) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: f.r(),
            g: f.g(),
            b: f.b(),
        }
    }
}

/// Theme holds the background/foreground pairs used to draw the board.
pub(crate) struct Theme {
    tiles: HashMap<Tile, (Rgb, Rgb)>,
    empty: (Rgb, Rgb),
    fallback: (Rgb, Rgb),
    pub(crate) text: Rgb,
    pub(crate) background: Rgb,
}

impl Theme {
    pub(crate) fn new(dark: bool) -> Self {
        let (bg_lightness, fg_lightness) = if dark { (45.0, 90.0) } else { (80.0, 20.0) };
        let fg_hue: f32 = 28.0 + 180.0;
        let steps = WIN_TILE.trailing_zeros();
        let tiles = HashMap::from_iter((1..=steps).map(|i| {
            let bg = Lch::new(bg_lightness, 40.0, i as f32 * 360.0 / steps as f32);
            let fg = Lch::new(fg_lightness, 30.0, fg_hue);
            (2u32.pow(i), (Rgb::from_lch(bg), Rgb::from_lch(fg)))
        }));
        if dark {
            Self {
                tiles,
                empty: (Rgb::new(60, 58, 55), Rgb::new(60, 58, 55)),
                fallback: (Rgb::new(20, 20, 20), Rgb::new(255, 215, 0)),
                text: Rgb::new(230, 230, 230),
                background: Rgb::new(25, 25, 25),
            }
        } else {
            Self {
                tiles,
                empty: (Rgb::new(205, 193, 180), Rgb::new(205, 193, 180)),
                fallback: (Rgb::new(255, 255, 255), Rgb::new(90, 0, 0)),
                text: Rgb::new(40, 40, 40),
                background: Rgb::new(250, 248, 239),
            }
        }
    }

    /// Background and foreground colors for a slot value.
    pub(crate) fn tile(&self, value: Tile) -> &(Rgb, Rgb) {
        if value == 0 {
            return &self.empty;
        }
        self.tiles.get(&value).unwrap_or(&self.fallback)
    }
}
