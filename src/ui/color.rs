//! Color mapping for terrain and pheromone cells.
//!
//! Terrain uses a discrete palette. Pheromone intensity spans several orders of
//! magnitude, so it is normalized on a log scale and its opacity follows a
//! sub-linear power curve, which keeps weak trails visible next to hot ones.

use crate::replay::error::ConfigError;
use crate::replay::grid::Terrain;
use crate::replay::params::{ALPHA_EXPONENT, MAX_INTENSITY, MIN_INTENSITY};

/// Opaque color with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const YELLOW: Rgb = Rgb::new(1.0, 1.0, 0.0);
    pub const RED: Rgb = Rgb::new(1.0, 0.0, 0.0);
    pub const DARK_RED: Rgb = Rgb::new(139.0 / 255.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        Rgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    #[must_use]
    pub fn with_alpha(self, a: f64) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// 8-bit channels for display.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_u8(self) -> (u8, u8, u8) {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b))
    }
}

/// Straight (non-premultiplied) color with alpha, channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    #[must_use]
    pub fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Porter-Duff "over": `self` drawn on top of `below`.
    #[must_use]
    pub fn over(self, below: Rgba) -> Rgba {
        let a = self.a + below.a * (1.0 - self.a);
        if a <= 0.0 {
            return Rgba::TRANSPARENT;
        }
        let mix = |top: f64, bottom: f64| (top * self.a + bottom * below.a * (1.0 - self.a)) / a;
        Rgba {
            r: mix(self.r, below.r),
            g: mix(self.g, below.g),
            b: mix(self.b, below.b),
            a,
        }
    }

    /// Resolves against an opaque background.
    #[must_use]
    pub fn flatten(self, background: Rgb) -> Rgb {
        background.lerp(self.rgb(), self.a.clamp(0.0, 1.0))
    }
}

/// Fixed color for each terrain category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StructuralPalette {
    pub wall: Rgb,
    pub food: Rgb,
    pub nest: Rgb,
}

impl Default for StructuralPalette {
    fn default() -> Self {
        Self {
            wall: Rgb::new(0.2, 0.2, 0.2),
            food: Rgb::new(0.5, 1.0, 0.5),
            nest: Rgb::new(0.1, 0.1, 1.0),
        }
    }
}

impl StructuralPalette {
    #[must_use]
    pub fn color(&self, terrain: Terrain) -> Rgb {
        match terrain {
            Terrain::Wall => self.wall,
            Terrain::Food => self.food,
            Terrain::Nest => self.nest,
        }
    }
}

/// Normalization bounds and opacity curve for intensity cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntensityBounds {
    min: f64,
    max: f64,
    alpha_exponent: f64,
}

impl Default for IntensityBounds {
    fn default() -> Self {
        Self {
            min: MIN_INTENSITY,
            max: MAX_INTENSITY,
            alpha_exponent: ALPHA_EXPONENT,
        }
    }
}

impl IntensityBounds {
    /// # Errors
    ///
    /// `min` must be positive, `max` above `min`, and the exponent positive; all finite.
    pub fn new(min: f64, max: f64, alpha_exponent: f64) -> Result<Self, ConfigError> {
        if !(min.is_finite() && min > 0.0) {
            return Err(ConfigError::MinIntensity(min));
        }
        if !(max.is_finite() && max > min) {
            return Err(ConfigError::MaxIntensity { min, max });
        }
        if !(alpha_exponent.is_finite() && alpha_exponent > 0.0) {
            return Err(ConfigError::AlphaExponent(alpha_exponent));
        }
        Ok(Self {
            min,
            max,
            alpha_exponent,
        })
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn alpha_exponent(&self) -> f64 {
        self.alpha_exponent
    }
}

/// Log-normalized color ramp for pheromone intensity.
#[derive(Clone, Debug, PartialEq)]
pub struct IntensityRamp {
    bounds: IntensityBounds,
    stops: Vec<Rgb>,
}

impl Default for IntensityRamp {
    fn default() -> Self {
        Self::new(IntensityBounds::default())
    }
}

impl IntensityRamp {
    /// White, yellow, red, dark red, evenly spaced.
    #[must_use]
    pub fn new(bounds: IntensityBounds) -> Self {
        Self {
            bounds,
            stops: vec![Rgb::WHITE, Rgb::YELLOW, Rgb::RED, Rgb::DARK_RED],
        }
    }

    /// Custom ramp with evenly spaced stops.
    ///
    /// # Errors
    ///
    /// At least one stop is required.
    pub fn with_stops(bounds: IntensityBounds, stops: Vec<Rgb>) -> Result<Self, ConfigError> {
        if stops.is_empty() {
            return Err(ConfigError::EmptyRamp);
        }
        Ok(Self { bounds, stops })
    }

    #[must_use]
    pub fn bounds(&self) -> &IntensityBounds {
        &self.bounds
    }

    /// Position of `value` on the ramp, in `[0, 1]`.
    ///
    /// Zero never reaches the logarithm; it and anything at or below the floor map to 0.
    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        if value <= 0.0 {
            return 0.0;
        }
        let IntensityBounds { min, max, .. } = self.bounds;
        let v = value.clamp(min, max);
        ((v.ln() - min.ln()) / (max.ln() - min.ln())).clamp(0.0, 1.0)
    }

    /// Linear interpolation between evenly spaced stops.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn sample(&self, t: f64) -> Rgb {
        let last = self.stops.len() - 1;
        if last == 0 {
            return self.stops[0];
        }
        let pos = t.clamp(0.0, 1.0) * last as f64;
        let idx = (pos.floor() as usize).min(last - 1);
        self.stops[idx].lerp(self.stops[idx + 1], pos - idx as f64)
    }

    #[must_use]
    pub fn alpha(&self, t: f64) -> f64 {
        if t <= 0.0 {
            0.0
        } else {
            t.powf(self.bounds.alpha_exponent)
        }
    }

    #[must_use]
    pub fn color(&self, value: f64) -> Rgba {
        let t = self.normalize(value);
        self.sample(t).with_alpha(self.alpha(t))
    }
}

/// Both color policies, built once and shared read-only by every render.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorPolicy {
    pub palette: StructuralPalette,
    pub ramp: IntensityRamp,
}

impl ColorPolicy {
    #[must_use]
    pub fn new(bounds: IntensityBounds) -> Self {
        Self {
            palette: StructuralPalette::default(),
            ramp: IntensityRamp::new(bounds),
        }
    }

    #[must_use]
    pub fn structural(&self, terrain: Terrain) -> Rgba {
        self.palette.color(terrain).with_alpha(1.0)
    }

    #[must_use]
    pub fn intensity(&self, value: f64) -> Rgba {
        self.ramp.color(value)
    }
}
