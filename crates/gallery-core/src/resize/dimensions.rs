//! Parsing of `{w}x{h}` specs and pure target-size calculations.

use std::fmt;

use crate::error::{CoreError, CoreResult};

/// One requested side of a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    /// Derive this side from the other one, preserving the aspect ratio.
    Auto,
    /// An explicit size in pixels, always non-zero.
    Pixels(u32),
}

impl Extent {
    fn parse(side: &str, spec: &str, max: u32) -> CoreResult<Self> {
        if side.is_empty() {
            return Ok(Extent::Auto);
        }
        if !side.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::InvalidDimensions(spec.to_string()));
        }
        let value: u32 = side
            .parse()
            .map_err(|_| CoreError::InvalidDimensions(spec.to_string()))?;
        match value {
            0 => Ok(Extent::Auto),
            v if v > max => Err(CoreError::InvalidDimensions(spec.to_string())),
            v => Ok(Extent::Pixels(v)),
        }
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extent::Auto => f.write_str("0"),
            Extent::Pixels(v) => write!(f, "{v}"),
        }
    }
}

/// Requested width and height of a derivative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: Extent,
    pub height: Extent,
}

impl Dimensions {
    /// Parses a `{w}x{h}` spec such as `100x0` or `640x480`.
    ///
    /// An empty or zero side means [`Extent::Auto`]. Both sides being auto is
    /// accepted here and rejected by the resize service once the source image
    /// has been located.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidDimensions`] if the spec has no `x`, a side is not
    /// a decimal number, or a side exceeds `max`.
    pub fn parse(spec: &str, max: u32) -> CoreResult<Self> {
        let (w, h) = spec
            .split_once('x')
            .ok_or_else(|| CoreError::InvalidDimensions(spec.to_string()))?;
        Ok(Self {
            width: Extent::parse(w, spec, max)?,
            height: Extent::parse(h, spec, max)?,
        })
    }

    /// `true` when neither side is explicit.
    pub fn is_auto(&self) -> bool {
        self.width == Extent::Auto && self.height == Extent::Auto
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

fn scale(value: u32, numerator: u32, denominator: u32) -> u32 {
    let scaled = (value as f64 * numerator as f64 / denominator.max(1) as f64).round();
    (scaled as u32).max(1)
}

/// Computes the output size for a source of `source` pixels.
///
/// Explicit sides are used as given; an auto side is derived from the
/// explicit one so the source aspect ratio is kept (rounded, at least 1px).
/// When both sides are auto the source size is returned.
///
/// ```
/// # use gallery_core::resize::{target_dimensions, Dimensions, Extent};
/// let dims = Dimensions { width: Extent::Pixels(100), height: Extent::Auto };
/// assert_eq!(target_dimensions((400, 300), &dims), (100, 75));
/// ```
pub fn target_dimensions(source: (u32, u32), requested: &Dimensions) -> (u32, u32) {
    let (src_w, src_h) = source;
    match (requested.width, requested.height) {
        (Extent::Pixels(w), Extent::Pixels(h)) => (w, h),
        (Extent::Pixels(w), Extent::Auto) => (w, scale(w, src_h, src_w)),
        (Extent::Auto, Extent::Pixels(h)) => (scale(h, src_w, src_h), h),
        (Extent::Auto, Extent::Auto) => source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: u32 = 10_000;

    #[test]
    fn parse_explicit_sides() {
        let dims = Dimensions::parse("640x480", MAX).unwrap();
        assert_eq!(dims.width, Extent::Pixels(640));
        assert_eq!(dims.height, Extent::Pixels(480));
    }

    #[test]
    fn parse_zero_and_empty_mean_auto() {
        let dims = Dimensions::parse("100x0", MAX).unwrap();
        assert_eq!(dims.height, Extent::Auto);

        let dims = Dimensions::parse("x200", MAX).unwrap();
        assert_eq!(dims.width, Extent::Auto);
        assert_eq!(dims.height, Extent::Pixels(200));
    }

    #[test]
    fn parse_both_zero_is_accepted_but_auto() {
        let dims = Dimensions::parse("0x0", MAX).unwrap();
        assert!(dims.is_auto());
        assert!(Dimensions::parse("x", MAX).unwrap().is_auto());
    }

    #[test]
    fn parse_rejects_garbage() {
        for spec in ["100", "axb", "10x-5", "+5x5", "1.5x2", "100X100"] {
            assert!(
                matches!(Dimensions::parse(spec, MAX), Err(CoreError::InvalidDimensions(_))),
                "{spec} should be rejected"
            );
        }
    }

    #[test]
    fn parse_rejects_oversized_side() {
        assert!(Dimensions::parse("10001x1", MAX).is_err());
        assert!(Dimensions::parse("99999999999x1", MAX).is_err());
        assert!(Dimensions::parse("10000x1", MAX).is_ok());
    }

    #[test]
    fn display_round_trips_spec() {
        assert_eq!(Dimensions::parse("100x0", MAX).unwrap().to_string(), "100x0");
    }

    #[test]
    fn auto_height_keeps_aspect_ratio() {
        let dims = Dimensions { width: Extent::Pixels(100), height: Extent::Auto };
        assert_eq!(target_dimensions((200, 100), &dims), (100, 50));
        assert_eq!(target_dimensions((300, 200), &dims), (100, 67));
    }

    #[test]
    fn auto_width_keeps_aspect_ratio() {
        let dims = Dimensions { width: Extent::Auto, height: Extent::Pixels(50) };
        assert_eq!(target_dimensions((200, 100), &dims), (100, 50));
    }

    #[test]
    fn auto_side_is_at_least_one_pixel() {
        let dims = Dimensions { width: Extent::Pixels(1), height: Extent::Auto };
        assert_eq!(target_dimensions((1000, 10), &dims), (1, 1));
    }

    #[test]
    fn explicit_sides_ignore_aspect_ratio() {
        let dims = Dimensions { width: Extent::Pixels(10), height: Extent::Pixels(90) };
        assert_eq!(target_dimensions((200, 100), &dims), (10, 90));
    }
}
