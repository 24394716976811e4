//! # Parametric Curves
//!
//! Curves evaluable over `t ∈ [0, 1]`: single cubic beziers and multi-segment
//! paths parsed from SVG-style path data.
//!
//! ## Path Syntax
//!
//! ```text
//! path    := command*
//! command := 'M' point | 'L' point+ | 'C' (point point point)+
//! point   := number [','] number
//! ```
//!
//! Coordinates are absolute and two-dimensional (`z = 0`). A path that does
//! not begin with `M` starts at the origin.

use glam::{DVec2, DVec3};

use crate::error::{CsgError, CsgResult};

// =============================================================================
// TRAIT
// =============================================================================

/// A curve evaluable at a normalized parameter.
pub trait ParametricCurve: Send + Sync {
    /// Point on the curve at `t`, with `t` clamped to `[0, 1]`.
    fn evaluate(&self, t: f64) -> DVec3;
}

// =============================================================================
// CUBIC BEZIER
// =============================================================================

/// A cubic bezier segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    /// Start point.
    pub start: DVec3,
    /// First control point.
    pub control_a: DVec3,
    /// Second control point.
    pub control_b: DVec3,
    /// End point.
    pub end: DVec3,
}

impl CubicBezier {
    /// Create a segment from its four control points.
    pub fn new(start: DVec3, control_a: DVec3, control_b: DVec3, end: DVec3) -> Self {
        Self {
            start,
            control_a,
            control_b,
            end,
        }
    }

    /// Straight segment, with controls on the chord.
    pub fn line(start: DVec3, end: DVec3) -> Self {
        Self::new(start, start.lerp(end, 1.0 / 3.0), start.lerp(end, 2.0 / 3.0), end)
    }
}

impl ParametricCurve for CubicBezier {
    fn evaluate(&self, t: f64) -> DVec3 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        self.start * (u * u * u)
            + self.control_a * (3.0 * u * u * t)
            + self.control_b * (3.0 * u * t * t)
            + self.end * (t * t * t)
    }
}

// =============================================================================
// BEZIER PATH
// =============================================================================

/// A chain of bezier segments. The parameter is spread uniformly over the
/// segments, so each segment spans `1 / segment_count` of `t`.
///
/// # Example
///
/// ```rust
/// use csg_kernel::{BezierPath, ParametricCurve};
/// use glam::DVec3;
///
/// let path = BezierPath::parse("C 0,0 5,5 5,5").unwrap();
/// assert_eq!(path.evaluate(0.0), DVec3::ZERO);
/// assert!((path.evaluate(1.0) - DVec3::new(5.0, 5.0, 0.0)).length() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BezierPath {
    segments: Vec<CubicBezier>,
}

impl BezierPath {
    /// Builds a path from segments.
    ///
    /// # Errors
    ///
    /// Fails for an empty segment list.
    pub fn from_segments(segments: Vec<CubicBezier>) -> CsgResult<Self> {
        if segments.is_empty() {
            return Err(CsgError::invalid_path(0, "path has no segments"));
        }
        Ok(Self { segments })
    }

    /// Parses SVG-style path data.
    pub fn parse(source: &str) -> CsgResult<Self> {
        PathParser::new(source).parse()
    }

    /// The path's segments.
    pub fn segments(&self) -> &[CubicBezier] {
        &self.segments
    }
}

impl ParametricCurve for BezierPath {
    fn evaluate(&self, t: f64) -> DVec3 {
        let t = t.clamp(0.0, 1.0);
        let count = self.segments.len();
        let scaled = t * count as f64;
        let index = (scaled.floor() as usize).min(count - 1);
        self.segments[index].evaluate(scaled - index as f64)
    }
}

// =============================================================================
// PARSER
// =============================================================================

struct PathParser<'a> {
    source: &'a str,
    position: usize,
    current: DVec2,
    segments: Vec<CubicBezier>,
}

impl<'a> PathParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            current: DVec2::ZERO,
            segments: Vec::new(),
        }
    }

    fn parse(mut self) -> CsgResult<BezierPath> {
        while let Some(command) = self.next_command()? {
            match command {
                'M' => self.current = self.point()?,
                'L' => loop {
                    let end = self.point()?;
                    self.push_segment(CubicBezier::line(lift(self.current), lift(end)));
                    self.current = end;
                    if !self.number_follows() {
                        break;
                    }
                },
                'C' => loop {
                    let control_a = self.point()?;
                    let control_b = self.point()?;
                    let end = self.point()?;
                    self.push_segment(CubicBezier::new(
                        lift(self.current),
                        lift(control_a),
                        lift(control_b),
                        lift(end),
                    ));
                    self.current = end;
                    if !self.number_follows() {
                        break;
                    }
                },
                other => {
                    return Err(CsgError::invalid_path(
                        self.position - other.len_utf8(),
                        format!("unsupported path command '{other}'"),
                    ))
                }
            }
        }

        if self.segments.is_empty() {
            return Err(CsgError::invalid_path(self.position, "path has no segments"));
        }
        Ok(BezierPath {
            segments: self.segments,
        })
    }

    fn push_segment(&mut self, segment: CubicBezier) {
        self.segments.push(segment);
    }

    fn rest(&self) -> &'a str {
        &self.source[self.position..]
    }

    fn skip_separators(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
        self.position += rest.len() - trimmed.len();
    }

    fn number_follows(&mut self) -> bool {
        self.skip_separators();
        self.rest()
            .starts_with(|c: char| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
    }

    fn next_command(&mut self) -> CsgResult<Option<char>> {
        self.skip_separators();
        let Some(c) = self.rest().chars().next() else {
            return Ok(None);
        };
        if !c.is_ascii_alphabetic() {
            return Err(CsgError::invalid_path(
                self.position,
                format!("expected a path command, found '{c}'"),
            ));
        }
        self.position += c.len_utf8();
        Ok(Some(c))
    }

    fn point(&mut self) -> CsgResult<DVec2> {
        let x = self.number()?;
        let y = self.number()?;
        Ok(DVec2::new(x, y))
    }

    fn number(&mut self) -> CsgResult<f64> {
        self.skip_separators();
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(i, c)| {
                !(c.is_ascii_digit()
                    || c == '.'
                    || c == 'e'
                    || c == 'E'
                    || (matches!(c, '-' | '+') && (i == 0 || rest[..i].ends_with(|e: char| e == 'e' || e == 'E'))))
            })
            .map_or(rest.len(), |(i, _)| i);

        let token = &rest[..len];
        let value = token.parse::<f64>().map_err(|_| {
            CsgError::invalid_path(
                self.position,
                if token.is_empty() {
                    "expected a number".to_string()
                } else {
                    format!("invalid number '{token}'")
                },
            )
        })?;
        self.position += len;
        Ok(value)
    }
}

#[inline]
fn lift(point: DVec2) -> DVec3 {
    point.extend(0.0)
}
