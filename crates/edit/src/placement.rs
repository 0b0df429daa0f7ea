//! Where floating editor surfaces go relative to their cell.

use crate::layout::{Point, Rect, Size};

/// Gap kept between a flipped surface and the cell edge.
const EDGE_GAP: f32 = 2.0;

/// Picker anchored under the cell's left edge.
pub fn anchored_below(rect: Rect) -> Point {
    Point::new(rect.left, rect.bottom())
}

/// Rich-text editor: opens over the cell, flipping up and left when it
/// would leave the viewport.
pub fn floating_rich_text(rect: Rect, size: Size, viewport: Size) -> Point {
    let top = if rect.bottom() + size.height > viewport.height {
        rect.bottom() - (size.height + EDGE_GAP)
    } else {
        rect.top
    };
    let left = if rect.left + size.width > viewport.width {
        rect.right() - (size.width + EDGE_GAP)
    } else {
        rect.left
    };
    Point::new(left, top)
}

/// Image editor: flips above the cell when it would overflow the bottom.
/// Always left-aligned with the cell.
pub fn floating_image(rect: Rect, size: Size, viewport: Size) -> Point {
    let top = if rect.bottom() + size.height > viewport.height {
        rect.top - (size.height + EDGE_GAP)
    } else {
        rect.top
    };
    Point::new(rect.left, top)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size { width: 800.0, height: 600.0 };

    #[test]
    fn test_rich_text_fits() {
        let rect = Rect::new(100.0, 100.0, 100.0, 24.0);
        let at = floating_rich_text(rect, Size::new(300.0, 200.0), VIEWPORT);
        assert_eq!(at, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_rich_text_flips_both_ways() {
        let rect = Rect::new(600.0, 500.0, 100.0, 24.0);
        let at = floating_rich_text(rect, Size::new(300.0, 200.0), VIEWPORT);
        assert_eq!(at, Point::new(700.0 - 302.0, 524.0 - 202.0));
    }

    #[test]
    fn test_image_flips_above_and_keeps_left() {
        let rect = Rect::new(700.0, 500.0, 100.0, 24.0);
        let at = floating_image(rect, Size::new(240.0, 240.0), VIEWPORT);
        assert_eq!(at, Point::new(700.0, 500.0 - 242.0));
    }

    #[test]
    fn test_anchored_below() {
        assert_eq!(anchored_below(Rect::new(10.0, 20.0, 100.0, 24.0)), Point::new(10.0, 44.0));
    }
}
