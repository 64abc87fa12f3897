//! Color-coded terrain bitmaps: one pixel per cell.
//!
//! | Color | Terrain |
//! |---|---|
//! | `#0000FF` | [`Terrain::Water`] |
//! | `#00FF00` | [`Terrain::Walkable`] |
//! | `#FFFF00` | [`Terrain::Marsh`] |
//! | anything else | [`Terrain::Obstacle`] (exported as black) |

use std::path::Path;

use image::{ImageReader, Rgb, RgbImage};

use crate::cell::{Cell, Terrain};
use crate::error::MapError;
use crate::tilemap::TileGrid;

impl TileGrid {
    /// Replace the map with the terrain encoded in an image file.
    ///
    /// The image width becomes the map size. Camera and cells are reset.
    pub fn load_from_image(&mut self, path: impl AsRef<Path>) -> Result<(), MapError> {
        let path = path.as_ref();
        let open_err = |source| MapError::Open {
            path: path.to_path_buf(),
            source,
        };
        // sniff the header too, so a mislabeled extension still loads
        let reader = ImageReader::open(path)
            .map_err(open_err)?
            .with_guessed_format()
            .map_err(open_err)?;
        let decoded = reader.decode().map_err(|source| MapError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_from_rgb(&decoded.to_rgb8())?;
        log::debug!("loaded {0}x{0} map from {1}", self.size(), path.display());
        Ok(())
    }

    /// Replace the map with the terrain encoded in an in-memory image.
    pub fn load_from_rgb(&mut self, img: &RgbImage) -> Result<(), MapError> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(MapError::EmptyImage);
        }
        if width != height {
            return Err(MapError::NotSquare { width, height });
        }
        // row-major, matching the grid layout
        let cells = img
            .pixels()
            .map(|px| Cell::of(Terrain::from_rgb(px.0)))
            .collect();
        self.replace_cells(width as i32, cells);
        Ok(())
    }

    /// Encode the terrain of every cell as an image.
    pub fn to_rgb(&self) -> RgbImage {
        let n = self.size().max(0) as u32;
        let mut img = RgbImage::new(n, n);
        for (p, cell) in self.iter() {
            img.put_pixel(p.x as u32, p.y as u32, Rgb(cell.terrain.to_rgb()));
        }
        img
    }

    /// Write the terrain bitmap. The format follows the file extension.
    pub fn save_to_image(&self, path: impl AsRef<Path>) -> Result<(), MapError> {
        let path = path.as_ref();
        self.to_rgb().save(path).map_err(|source| MapError::Encode {
            path: path.to_path_buf(),
            source,
        })
    }
}
