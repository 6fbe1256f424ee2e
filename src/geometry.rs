//! Box geometry: format conversion and intersection-over-union.
//!
//! Boxes are raw `[f32; 4]` records in one of two encodings: corner
//! `(y1, x1, y2, x2)` or center `(xc, yc, w, h)`. Nothing here validates
//! coordinates; a malformed box (`x2 < x1` or `y2 < y1`) passes through
//! unchanged and its negative area flows into the IoU denominator as-is.

/// Encoding of a raw box record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoxFormat {
    /// `(y1, x1, y2, x2)` opposite corners.
    Corner,
    /// `(xc, yc, w, h)` center point plus extents.
    Center,
}

/// Corner-form box used by the suppression loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CornerBox {
    pub(crate) y1: f32,
    pub(crate) x1: f32,
    pub(crate) y2: f32,
    pub(crate) x2: f32,
}

impl CornerBox {
    /// Decodes a raw record into corner form.
    pub(crate) fn from_raw(raw: [f32; 4], format: BoxFormat) -> Self {
        match format {
            BoxFormat::Corner => Self {
                y1: raw[0],
                x1: raw[1],
                y2: raw[2],
                x2: raw[3],
            },
            BoxFormat::Center => {
                let [xc, yc, w, h] = raw;
                Self {
                    y1: yc - h / 2.0,
                    x1: xc - w / 2.0,
                    y2: yc + h / 2.0,
                    x2: xc + w / 2.0,
                }
            }
        }
    }

    /// Signed area; negative for malformed corners.
    fn area(&self) -> f32 {
        (self.x2 - self.x1) * (self.y2 - self.y1)
    }
}

/// Converts a raw box between encodings. Identity when `from == to`.
pub fn convert_format(raw: [f32; 4], from: BoxFormat, to: BoxFormat) -> [f32; 4] {
    if from == to {
        return raw;
    }
    match from {
        BoxFormat::Center => {
            let corner = CornerBox::from_raw(raw, from);
            [corner.y1, corner.x1, corner.y2, corner.x2]
        }
        BoxFormat::Corner => {
            let [y1, x1, y2, x2] = raw;
            [(x1 + x2) / 2.0, (y1 + y2) / 2.0, x2 - x1, y2 - y1]
        }
    }
}

/// Intersection-over-union of two raw boxes in the given encoding.
///
/// Returns `inter / union` when the union area is positive, `0` otherwise
/// (disjoint boxes, degenerate boxes, and malformed unions all land on `0`).
pub fn iou(a: [f32; 4], b: [f32; 4], format: BoxFormat) -> f32 {
    iou_corner(
        &CornerBox::from_raw(a, format),
        &CornerBox::from_raw(b, format),
    )
}

pub(crate) fn iou_corner(a: &CornerBox, b: &CornerBox) -> f32 {
    let iy1 = a.y1.max(b.y1);
    let ix1 = a.x1.max(b.x1);
    let iy2 = a.y2.min(b.y2);
    let ix2 = a.x2.min(b.x2);

    let iw = (ix2 - ix1).max(0.0);
    let ih = (iy2 - iy1).max(0.0);
    let inter = iw * ih;

    let union = a.area() + b.area() - inter;
    if union > 0.0 {
        inter / union
    } else {
        0.0
    }
}

/// True when the rectangles cannot overlap.
///
/// Disjoint boxes always score an IoU of exactly `0`, so the suppression
/// loop may skip the full computation for them.
pub(crate) fn disjoint(a: &CornerBox, b: &CornerBox) -> bool {
    a.y2 < b.y1 || b.y2 < a.y1 || a.x2 < b.x1 || b.x2 < a.x1
}
