//! Canvas fitting: map raw layout coordinates into a requested drawing area.

use crate::error::PlotError;
use crate::ir::{CanvasSpec, Coordinate, Margin};

/// Fit coordinates into the canvas, honoring margins and the aspect-ratio
/// lock. Without a canvas this is the identity.
pub fn fit(
    coords: Vec<Coordinate>,
    canvas: Option<CanvasSpec>,
    margin: Margin,
    keep_aspect_ratio: bool,
) -> Result<Vec<Coordinate>, PlotError> {
    let canvas = match canvas {
        Some(canvas) => canvas,
        None => return Ok(coords),
    };
    if canvas.width <= 0.0 || canvas.height <= 0.0 {
        return Err(PlotError::InvalidCanvas {
            width: canvas.width,
            height: canvas.height,
        });
    }
    if coords.is_empty() {
        return Ok(coords);
    }

    let (min_x, max_x) = bounds(coords.iter().map(|c| c.x));
    let (min_y, max_y) = bounds(coords.iter().map(|c| c.y));
    let usable_w = canvas.width - margin.left - margin.right;
    let usable_h = canvas.height - margin.top - margin.bottom;
    let span_x = max_x - min_x;
    let span_y = max_y - min_y;

    // A zero-extent axis cannot be scaled; center it instead.
    let scale_x = if span_x > 0.0 { usable_w / span_x } else { 0.0 };
    let scale_y = if span_y > 0.0 { usable_h / span_y } else { 0.0 };

    let (scale_x, scale_y, offset_x, offset_y) = if keep_aspect_ratio {
        let scale = match (span_x > 0.0, span_y > 0.0) {
            (true, true) => scale_x.min(scale_y),
            (true, false) => scale_x,
            (false, true) => scale_y,
            (false, false) => 0.0,
        };
        // Center the scaled bounding box in the usable rectangle
        let offset_x = (usable_w - span_x * scale) / 2.0;
        let offset_y = (usable_h - span_y * scale) / 2.0;
        (scale, scale, offset_x, offset_y)
    } else {
        let offset_x = if span_x > 0.0 { 0.0 } else { usable_w / 2.0 };
        let offset_y = if span_y > 0.0 { 0.0 } else { usable_h / 2.0 };
        (scale_x, scale_y, offset_x, offset_y)
    };

    Ok(coords
        .into_iter()
        .map(|c| Coordinate {
            x: margin.left + offset_x + (c.x - min_x) * scale_x,
            y: margin.bottom + offset_y + (c.y - min_y) * scale_y,
        })
        .collect())
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Coordinate> {
        vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(2.0, 0.0),
            Coordinate::new(2.0, 1.0),
            Coordinate::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_identity_without_canvas() {
        let coords = square();
        let out = fit(coords.clone(), None, Margin::default(), true).unwrap();
        assert_eq!(out, coords);
    }

    #[test]
    fn test_invalid_canvas() {
        let err = fit(
            square(),
            Some(CanvasSpec {
                width: 0.0,
                height: 6.0,
            }),
            Margin::default(),
            true,
        )
        .unwrap_err();
        assert!(matches!(err, PlotError::InvalidCanvas { .. }));
    }

    #[test]
    fn test_independent_axes_fill_canvas() {
        let out = fit(
            square(),
            Some(CanvasSpec {
                width: 8.0,
                height: 8.0,
            }),
            Margin::uniform(1.0),
            false,
        )
        .unwrap();
        let (min_x, max_x) = bounds(out.iter().map(|c| c.x));
        let (min_y, max_y) = bounds(out.iter().map(|c| c.y));
        assert!((min_x - 1.0).abs() < 1e-9);
        assert!((max_x - 7.0).abs() < 1e-9);
        assert!((min_y - 1.0).abs() < 1e-9);
        assert!((max_y - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_keep_aspect_ratio_preserves_proportions() {
        // Bounding box is 2:1; the fitted box must keep that ratio.
        let out = fit(
            square(),
            Some(CanvasSpec {
                width: 10.0,
                height: 10.0,
            }),
            Margin::default(),
            true,
        )
        .unwrap();
        let (min_x, max_x) = bounds(out.iter().map(|c| c.x));
        let (min_y, max_y) = bounds(out.iter().map(|c| c.y));
        let ratio = (max_x - min_x) / (max_y - min_y);
        assert!((ratio - 2.0).abs() < 1e-9);
        // Fitted along x, centered along y
        assert!((max_x - min_x - 10.0).abs() < 1e-9);
        assert!((min_y - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_per_side_margins() {
        let margin = Margin {
            top: 5.0,
            bottom: 8.0,
            left: 5.0,
            right: 5.0,
        };
        let out = fit(
            square(),
            Some(CanvasSpec {
                width: 100.0,
                height: 60.0,
            }),
            margin,
            false,
        )
        .unwrap();
        let (min_x, max_x) = bounds(out.iter().map(|c| c.x));
        let (min_y, max_y) = bounds(out.iter().map(|c| c.y));
        assert!((min_x - 5.0).abs() < 1e-9);
        assert!((max_x - 95.0).abs() < 1e-9);
        assert!((min_y - 8.0).abs() < 1e-9);
        assert!((max_y - 55.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_axis_is_centered() {
        let coords = vec![Coordinate::new(3.0, 1.0), Coordinate::new(3.0, 2.0)];
        let out = fit(
            coords,
            Some(CanvasSpec {
                width: 4.0,
                height: 4.0,
            }),
            Margin::default(),
            true,
        )
        .unwrap();
        assert!((out[0].x - 2.0).abs() < 1e-9);
        assert!((out[1].x - 2.0).abs() < 1e-9);
    }
}
