//! PNG heat-map export of a distance field

use std::path::Path;

use image::{ImageBuffer, Rgba};

use crate::algorithm::board::Board;
use crate::io::configuration::MAX_IMAGE_PIXELS;
use crate::io::error::{BoardError, Result, invalid_parameter};

/// Exit cells
pub const EXIT_COLOR: Rgba<u8> = Rgba([46, 204, 113, 255]);
/// Obstacles
pub const OBSTACLE_COLOR: Rgba<u8> = Rgba([30, 30, 30, 255]);
/// Open cells with no route to an exit
pub const UNREACHABLE_COLOR: Rgba<u8> = Rgba([0, 0, 0, 0]);

const NEAR_COLOR: [u8; 3] = [255, 236, 139];
const FAR_COLOR: [u8; 3] = [178, 34, 52];

// Linear blend from near to far as the cost approaches the board maximum
fn gradient(cost: u32, max_cost: u32) -> Rgba<u8> {
    let t = if max_cost <= 1 {
        0.0
    } else {
        f64::from(cost - 1) / f64::from(max_cost - 1)
    };
    let blend = |near: u8, far: u8| {
        (f64::from(near) + (f64::from(far) - f64::from(near)) * t).round() as u8
    };
    Rgba([
        blend(NEAR_COLOR[0], FAR_COLOR[0]),
        blend(NEAR_COLOR[1], FAR_COLOR[1]),
        blend(NEAR_COLOR[2], FAR_COLOR[2]),
        255,
    ])
}

/// Color for one cell given the board's largest cost
pub fn cell_color(cost: Option<u32>, blocked: bool, max_cost: u32) -> Rgba<u8> {
    match (blocked, cost) {
        (true, _) => OBSTACLE_COLOR,
        (false, None) => UNREACHABLE_COLOR,
        (false, Some(0)) => EXIT_COLOR,
        (false, Some(c)) => gradient(c, max_cost),
    }
}

/// Render the field as an image with `scale` pixels per cell edge
///
/// # Errors
///
/// Returns `InvalidParameter` if `scale` is zero, the image would not fit
/// in `u32` dimensions, or it would exceed `MAX_IMAGE_PIXELS`
pub fn render_heat_map(board: &Board, scale: u32) -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>> {
    if scale == 0 {
        return Err(invalid_parameter("scale", &scale, &"must be positive"));
    }
    let pixels = |cells: usize, parameter: &'static str| {
        u32::try_from(cells)
            .ok()
            .and_then(|c| c.checked_mul(scale))
            .ok_or_else(|| invalid_parameter(parameter, &cells, &"image would be too large"))
    };
    let width = pixels(board.width(), "width")?;
    let height = pixels(board.height(), "height")?;
    if u64::from(width) * u64::from(height) > MAX_IMAGE_PIXELS {
        return Err(invalid_parameter(
            "scale",
            &scale,
            &format!("{width}x{height} image exceeds {MAX_IMAGE_PIXELS} pixels"),
        ));
    }

    let grid = board.grid();
    let max_cost = board.costs().iter().flatten().copied().max().unwrap_or(0);

    Ok(ImageBuffer::from_fn(width, height, |px, py| {
        let position = [(px / scale) as usize, (py / scale) as usize];
        cell_color(
            grid.get_cost(position).ok().flatten(),
            grid.is_blocked(position).unwrap_or(false),
            max_cost,
        )
    }))
}

/// Export the field as a PNG heat map
///
/// # Errors
///
/// Returns an error if:
/// - `scale` is zero or the image would be too large
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_field_as_png(board: &Board, scale: u32, output_path: &Path) -> Result<()> {
    let img = render_heat_map(board, scale)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| BoardError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path).map_err(|e| BoardError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
