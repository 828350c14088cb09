//! Square-spiral coordinate paths.
//!
//! A spiral is produced in two passes:
//! 1. [`walk::boundary_walk`] steps around a rectangle at a fixed spacing,
//!    turning at every corner without losing any distance.
//! 2. [`SpiralType::scales`] shrinks each vertex toward the origin, which is
//!    what turns the repeated loop into an inward spiral.
//!
//! The result is two index-aligned coordinate lists, ready to be paired with
//! sequence values for rendering.

mod scale;
mod walk;

use std::fmt;
use std::str::FromStr;

use log::debug;
use thiserror::Error;

use crate::geometry::{Point, Rect};

pub use walk::{Direction, boundary_walk};

/// Errors from spiral generation.
///
/// Every failure happens before any vertex is produced, so a caller never
/// sees a partial path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpiralError {
    #[error("height and width must be positive and finite (got height={height}, width={width})")]
    InvalidDimensions { height: f64, width: f64 },

    #[error("a spiral needs at least 2 points (got {0})")]
    TooFewPoints(usize),

    #[error("num_spirals must be positive and finite (got {0})")]
    InvalidSpiralCount(f64),

    #[error("unknown {kind} '{value}', expected one of: {allowed}")]
    UnknownMode {
        kind: &'static str,
        value: String,
        allowed: String,
    },

    #[error("{kind} '{value}' is not implemented, supported: {allowed}")]
    NotImplemented {
        kind: &'static str,
        value: String,
        allowed: String,
    },
}

pub type Result<T> = std::result::Result<T, SpiralError>;

/// Point-spacing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquiType {
    /// Fixed spacing so that `num_spirals` laps use exactly `num_points` points.
    Revolution,
    /// Equal physical distance between the final (scaled) points.
    ///
    /// Recognized but not implemented; generating with it always fails.
    Distant,
}

/// Radial scaling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpiralType {
    /// Scale falls evenly from 1.0 to exactly 0.0.
    Linear,
    /// Scale decays geometrically, ending near 1% of the starting radius.
    Multiplicative,
}

impl EquiType {
    pub fn all() -> &'static [EquiType] {
        &[EquiType::Revolution, EquiType::Distant]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquiType::Revolution => "revolution",
            EquiType::Distant => "distant",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EquiType::Revolution => "Fixed step from perimeter, spiral count and point count",
            EquiType::Distant => "Equal distance between points (not implemented)",
        }
    }

    /// Step length between consecutive raw vertices.
    pub fn spacing(&self, params: &SpiralParams) -> Result<f64> {
        match self {
            EquiType::Revolution => Ok(2.0 * (params.height + params.width) * params.num_spirals
                / params.num_points as f64),
            EquiType::Distant => Err(SpiralError::NotImplemented {
                kind: "equi_type",
                value: self.name().to_string(),
                allowed: EquiType::Revolution.name().to_string(),
            }),
        }
    }
}

impl SpiralType {
    pub fn all() -> &'static [SpiralType] {
        &[SpiralType::Linear, SpiralType::Multiplicative]
    }

    pub fn name(&self) -> &'static str {
        match self {
            SpiralType::Linear => "linear",
            SpiralType::Multiplicative => "multiplicative",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SpiralType::Linear => "Radius shrinks evenly to the center",
            SpiralType::Multiplicative => "Radius shrinks geometrically to ~1%",
        }
    }

    /// Per-vertex scale factors, one for each of `num_points` vertices.
    pub fn scales(&self, num_points: usize) -> Vec<f64> {
        match self {
            SpiralType::Linear => scale::linear(num_points),
            SpiralType::Multiplicative => scale::multiplicative(num_points),
        }
    }
}

fn allowed_names<T>(all: &[T], name: fn(&T) -> &'static str) -> String {
    all.iter().map(name).collect::<Vec<_>>().join(", ")
}

impl FromStr for EquiType {
    type Err = SpiralError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "revolution" => Ok(EquiType::Revolution),
            "distant" => Ok(EquiType::Distant),
            _ => Err(SpiralError::UnknownMode {
                kind: "equi_type",
                value: s.to_string(),
                allowed: allowed_names(EquiType::all(), EquiType::name),
            }),
        }
    }
}

impl FromStr for SpiralType {
    type Err = SpiralError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(SpiralType::Linear),
            "multiplicative" => Ok(SpiralType::Multiplicative),
            _ => Err(SpiralError::UnknownMode {
                kind: "spiral_type",
                value: s.to_string(),
                allowed: allowed_names(SpiralType::all(), SpiralType::name),
            }),
        }
    }
}

impl fmt::Display for EquiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for SpiralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything needed to generate one spiral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralParams {
    pub height: f64,
    pub width: f64,
    pub num_points: usize,
    /// Target number of laps around the rectangle.
    pub num_spirals: f64,
    pub equi_type: EquiType,
    pub spiral_type: SpiralType,
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self {
            height: 10.0,
            width: 10.0,
            num_points: 100,
            num_spirals: 1.0,
            equi_type: EquiType::Revolution,
            spiral_type: SpiralType::Linear,
        }
    }
}

impl SpiralParams {
    /// Check the numeric parameters.
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.height)
            || !positive(self.width)
            || !self.rect().perimeter().is_finite()
        {
            return Err(SpiralError::InvalidDimensions {
                height: self.height,
                width: self.width,
            });
        }
        if self.num_points < 2 {
            return Err(SpiralError::TooFewPoints(self.num_points));
        }
        if !positive(self.num_spirals) {
            return Err(SpiralError::InvalidSpiralCount(self.num_spirals));
        }
        Ok(())
    }

    /// The rectangle walked by the spiral.
    pub fn rect(&self) -> Rect {
        Rect::centered(self.height, self.width)
    }
}

/// A generated spiral.
///
/// Keeps the raw boundary vertices and scale factors alongside the final
/// coordinates so callers can inspect how each point was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralPath {
    rect: Rect,
    spacing: f64,
    vertices: Vec<Point>,
    scales: Vec<f64>,
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl SpiralPath {
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Distance between consecutive raw vertices along the boundary.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Unscaled vertices on the rectangle boundary.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn scales(&self) -> &[f64] {
        &self.scales
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Final coordinates as points.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.xs.iter().zip(&self.ys).map(|(&x, &y)| Point::new(x, y))
    }

    pub fn into_xy(self) -> (Vec<f64>, Vec<f64>) {
        (self.xs, self.ys)
    }
}

/// Generate a spiral path.
pub fn generate_spiral(params: &SpiralParams) -> Result<SpiralPath> {
    params.validate()?;
    let spacing = params.equi_type.spacing(params)?;
    if !spacing.is_finite() {
        return Err(SpiralError::InvalidSpiralCount(params.num_spirals));
    }
    let rect = params.rect();

    debug!(
        "spiral: {}x{} rect, {} points, {} laps, spacing {:.4} ({}/{})",
        params.width,
        params.height,
        params.num_points,
        params.num_spirals,
        spacing,
        params.equi_type,
        params.spiral_type,
    );

    let vertices = boundary_walk(rect, spacing, params.num_points);
    let scales = params.spiral_type.scales(params.num_points);

    let (xs, ys): (Vec<f64>, Vec<f64>) = vertices
        .iter()
        .zip(&scales)
        .map(|(v, &s)| {
            let p = v.scaled(s);
            (p.x, p.y)
        })
        .unzip();

    Ok(SpiralPath {
        rect,
        spacing,
        vertices,
        scales,
        xs,
        ys,
    })
}

/// Flat form of [`generate_spiral`]: just the x and y coordinate lists.
pub fn spiral_coordinates(
    height: f64,
    width: f64,
    num_points: usize,
    num_spirals: f64,
    equi_type: EquiType,
    spiral_type: SpiralType,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let params = SpiralParams {
        height,
        width,
        num_points,
        num_spirals,
        equi_type,
        spiral_type,
    };
    generate_spiral(&params).map(SpiralPath::into_xy)
}
