//! Camera image decoding.

use std::path::Path;

use super::camera::{ImageFrame, ImageSize};
use crate::error::PandasetError;

/// Decodes an image file into an RGB8 frame.
pub fn read_image(path: &Path) -> Result<ImageFrame, PandasetError> {
    let decoded = image::open(path).map_err(|source| PandasetError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(ImageFrame::new(decoded.into_rgb8()))
}

/// Reads an image's dimensions from its header without decoding pixels.
pub fn read_image_size(path: &Path) -> Result<ImageSize, PandasetError> {
    let size = imagesize::size(path).map_err(|source| PandasetError::ImageDimensionRead {
        path: path.to_path_buf(),
        source,
    })?;

    let width: u32 = size
        .width
        .try_into()
        .map_err(|_| PandasetError::LayoutInvalid {
            path: path.to_path_buf(),
            message: format!("image width {} does not fit in u32", size.width),
        })?;

    let height: u32 = size
        .height
        .try_into()
        .map_err(|_| PandasetError::LayoutInvalid {
            path: path.to_path_buf(),
            message: format!("image height {} does not fit in u32", size.height),
        })?;

    Ok(ImageSize::new(width, height))
}
