use rayon::prelude::*;

use crate::replay::grid::{Cell, Grid};
use crate::ui::color::{ColorPolicy, Rgb, Rgba};

/// One color layer; `None` where the layer does not cover a cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Option<Rgba>>,
}

/// Composited RGBA frame, row-major, same shape as its grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl Image {
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn pixel(&self, row: usize, col: usize) -> Option<Rgba> {
        if row < self.height && col < self.width {
            Some(self.pixels[row * self.width + col])
        } else {
            None
        }
    }

    /// Pixels of one row, left to right; `None` past the last row.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[Rgba]> {
        if row < self.height {
            Some(&self.pixels[row * self.width..(row + 1) * self.width])
        } else {
            None
        }
    }

    /// Nearest-neighbour resample to `width x height`.
    ///
    /// Sample positions are aligned on both ends, so the corner pixels of the
    /// source always survive.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn resample(&self, width: usize, height: usize) -> Image {
        let width = width.max(1);
        let height = height.max(1);
        let source_index = |out: usize, out_len: usize, src_len: usize| {
            if out_len <= 1 || src_len <= 1 {
                0
            } else {
                let pos = out as f64 * (src_len - 1) as f64 / (out_len - 1) as f64;
                (pos.round() as usize).min(src_len - 1)
            }
        };

        let pixels = (0..height)
            .into_par_iter()
            .flat_map_iter(move |r| {
                let sr = source_index(r, height, self.height);
                (0..width).map(move |c| {
                    let sc = source_index(c, width, self.width);
                    self.pixels[sr * self.width + sc]
                })
            })
            .collect();

        Image {
            width,
            height,
            pixels,
        }
    }

    /// Opaque rendition of the frame over `background`.
    #[must_use]
    pub fn flatten(&self, background: Rgb) -> Vec<Rgb> {
        self.pixels.iter().map(|p| p.flatten(background)).collect()
    }
}

/// Renders a cell through exactly one policy: `(base, overlay)`.
fn cell_layers(cell: Cell, policy: &ColorPolicy) -> (Option<Rgba>, Option<Rgba>) {
    match cell {
        Cell::Structural(terrain) => (Some(policy.structural(terrain)), None),
        Cell::Intensity(value) => (None, Some(policy.intensity(value))),
    }
}

/// Partitions `grid` into an opaque terrain layer and an intensity overlay.
#[must_use]
pub fn split_layers(grid: &Grid, policy: &ColorPolicy) -> (Layer, Layer) {
    let (base, overlay): (Vec<_>, Vec<_>) = grid
        .cells()
        .par_iter()
        .map(|&cell| cell_layers(cell, policy))
        .unzip();

    let layer = |pixels| Layer {
        width: grid.width(),
        height: grid.height(),
        pixels,
    };
    (layer(base), layer(overlay))
}

/// Composites the overlay layer on top of the terrain base.
///
/// Both layers come from [`split_layers`]; rows are blended in parallel.
#[must_use]
pub fn compose_frame(grid: &Grid, policy: &ColorPolicy) -> Image {
    let (base, overlay) = split_layers(grid, policy);
    let width = grid.width().max(1);

    let pixels = base
        .pixels
        .par_chunks(width)
        .zip(overlay.pixels.par_chunks(width))
        .flat_map_iter(|(base_row, overlay_row)| {
            base_row.iter().zip(overlay_row).map(|(&below, &top)| {
                let below = below.unwrap_or(Rgba::TRANSPARENT);
                top.map_or(below, |top| top.over(below))
            })
        })
        .collect();

    Image {
        width: grid.width(),
        height: grid.height(),
        pixels,
    }
}
