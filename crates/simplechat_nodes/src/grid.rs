//! Image grid node.

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage, imageops};
use serde::{Deserialize, Serialize};
use simplechat_core::ImageData;
use simplechat_error::ImageError;
use std::io::Cursor;
use tracing::{debug, instrument};

/// Fill color for padding and empty cells.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PadColor {
    /// Opaque black
    #[default]
    Black,
    /// Opaque white
    White,
}

impl PadColor {
    fn pixel(self) -> Rgba<u8> {
        match self {
            PadColor::Black => Rgba([0, 0, 0, 255]),
            PadColor::White => Rgba([255, 255, 255, 255]),
        }
    }
}

/// Upper bound on grid columns.
pub const MAX_COLUMNS: u32 = 64;

/// Upper bound on padding between cells, in pixels.
pub const MAX_PADDING: u32 = 256;

/// Length of `cells` tiles of `size` pixels with `padding` between them.
fn span(cells: u32, size: u32, padding: u32) -> Result<u32, ImageError> {
    cells
        .checked_mul(size)
        .and_then(|tiles| tiles.checked_add((cells - 1).checked_mul(padding)?))
        .ok_or_else(|| ImageError::new("Image grid canvas is too large"))
}

/// Stitches a batch of equally sized images into one PNG grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageGridNode;

impl ImageGridNode {
    /// Lays `images` out row by row, `columns` per row.
    ///
    /// The canvas always spans `columns` cells horizontally; missing cells in
    /// the last row are left in the pad color. `columns` is clamped to
    /// `1..=`[`MAX_COLUMNS`] and `padding` to [`MAX_PADDING`].
    ///
    /// # Errors
    ///
    /// An [`ImageError`] for an empty batch, undecodable input, images of
    /// differing sizes, or a canvas too large to address.
    #[instrument(skip(self, images), fields(count = images.len()))]
    pub fn run(
        &self,
        images: &[ImageData],
        columns: u32,
        padding: u32,
        pad_color: PadColor,
    ) -> Result<ImageData, ImageError> {
        let tiles = images
            .iter()
            .enumerate()
            .map(|(i, image)| {
                image::load_from_memory(image.data())
                    .map(|decoded| decoded.to_rgba8())
                    .map_err(|e| ImageError::new(format!("Failed to decode image {}: {}", i, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let first = tiles
            .first()
            .ok_or_else(|| ImageError::new("Image grid needs at least one image"))?;
        let (width, height) = first.dimensions();
        if let Some((i, tile)) = tiles
            .iter()
            .enumerate()
            .find(|(_, tile)| tile.dimensions() != (width, height))
        {
            return Err(ImageError::new(format!(
                "Image {} is {}x{}, expected {}x{}",
                i,
                tile.width(),
                tile.height(),
                width,
                height
            )));
        }

        let columns = columns.clamp(1, MAX_COLUMNS);
        let padding = padding.min(MAX_PADDING);
        let count = u32::try_from(tiles.len())
            .map_err(|_| ImageError::new("Too many images for one grid"))?;
        let rows = count.div_ceil(columns);
        let canvas_width = span(columns, width, padding)?;
        let canvas_height = span(rows, height, padding)?;

        let mut canvas = RgbaImage::from_pixel(canvas_width, canvas_height, pad_color.pixel());
        for (index, tile) in (0u32..).zip(&tiles) {
            let x = (index % columns) * (width + padding);
            let y = (index / columns) * (height + padding);
            imageops::replace(&mut canvas, tile, i64::from(x), i64::from(y));
        }
        debug!(canvas_width, canvas_height, rows, "Stitched image grid");

        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(canvas)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .map_err(|e| ImageError::new(format!("PNG encode failed: {}", e)))?;
        Ok(ImageData::png(buf))
    }
}
