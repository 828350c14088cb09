//! Spiral recipes.
//!
//! Recipes are YAML files describing one spiral drawing: the canvas, the
//! spiral shape, which sequence to plot and how to style it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use issa::{EquiType, SpiralParams, SpiralType, generate_spiral};

use super::common::{OutputFormat, Style, encode, load_sequence, take_terms, write_output};

/// A complete recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe name/title
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Spiral rectangle
    pub canvas: Canvas,

    #[serde(default)]
    pub spiral: SpiralSection,

    /// Sequence plotted along the spiral (plain path when absent)
    #[serde(default)]
    pub sequence: Option<SequenceSection>,

    #[serde(default)]
    pub style: Style,
}

/// Size of the rectangle the spiral walks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,

    /// Overrides `style.background`
    #[serde(default)]
    pub background: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpiralSection {
    /// Point count (defaults to the sequence length, or 100 without one)
    #[serde(default)]
    pub num_points: Option<usize>,

    #[serde(default = "default_num_spirals")]
    pub num_spirals: f64,

    #[serde(default = "default_equi_type")]
    pub equi_type: String,

    #[serde(default = "default_spiral_type")]
    pub spiral_type: String,
}

fn default_num_spirals() -> f64 {
    1.0
}

fn default_equi_type() -> String {
    EquiType::Revolution.name().to_string()
}

fn default_spiral_type() -> String {
    SpiralType::Linear.name().to_string()
}

impl Default for SpiralSection {
    fn default() -> Self {
        Self {
            num_points: None,
            num_spirals: default_num_spirals(),
            equi_type: default_equi_type(),
            spiral_type: default_spiral_type(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceSection {
    /// OEIS id, e.g. `A000045`
    pub id: String,

    /// b-file directory, relative to the recipe file
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

const DEFAULT_POINTS: usize = 100;

impl Recipe {
    /// Load a recipe from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read recipe file {}", path.display()))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse recipe YAML")
    }

    /// Spiral parameters for `num_points` points.
    pub fn params(&self, num_points: usize) -> Result<SpiralParams> {
        Ok(SpiralParams {
            height: self.canvas.height,
            width: self.canvas.width,
            num_points,
            num_spirals: self.spiral.num_spirals,
            equi_type: self.spiral.equi_type.parse()?,
            spiral_type: self.spiral.spiral_type.parse()?,
        })
    }

    /// Style with the canvas background applied.
    pub fn style(&self) -> Style {
        let mut style = self.style.clone();
        if let Some(bg) = &self.canvas.background {
            style.background = bg.clone();
        }
        style
    }

    /// Render the recipe; relative sequence directories resolve against `base_dir`.
    pub fn render(&self, base_dir: &Path, format: OutputFormat) -> Result<Vec<u8>> {
        let values = match &self.sequence {
            Some(section) => {
                let seq = load_sequence(&base_dir.join(&section.dir), &section.id)?;
                Some(take_terms(&seq, self.spiral.num_points)?)
            }
            None => None,
        };

        let num_points = values
            .as_ref()
            .map(Vec::len)
            .or(self.spiral.num_points)
            .unwrap_or(DEFAULT_POINTS);
        let path = generate_spiral(&self.params(num_points)?)
            .with_context(|| format!("recipe '{}'", self.name))?;

        encode(&path, values.as_deref(), format, &self.style())
    }
}

/// Execute the recipe command.
pub fn cmd_recipe(recipe_path: Option<&Path>, output: Option<&PathBuf>, example: bool) -> Result<()> {
    if example {
        print_example();
        return Ok(());
    }
    let recipe_path = recipe_path.context("No recipe file specified (try --example)")?;

    eprintln!("Loading recipe: {}", recipe_path.display());
    let recipe = Recipe::load(recipe_path)?;
    eprintln!("Recipe: {}", recipe.name);
    eprintln!("Canvas: {} x {}", recipe.canvas.width, recipe.canvas.height);

    let output = output.cloned().unwrap_or_else(|| PathBuf::from("output.svg"));
    let base_dir = recipe_path.parent().unwrap_or_else(|| Path::new("."));
    let bytes = recipe.render(base_dir, OutputFormat::from_path(&output))?;
    write_output(Some(&output), &bytes)
}

fn print_example() {
    println!(r##"# Example issa recipe
name: "Prime square spiral"
description: "First 500 primes on a multiplicative spiral"

canvas:
  width: 100
  height: 100
  background: "white"

spiral:
  num_points: 500      # defaults to the number of sequence terms
  num_spirals: 12
  equi_type: revolution
  spiral_type: multiplicative

sequence:
  id: A000040
  dir: bfiles          # holds b000040.txt

style:
  color: "#1f3a93"
  negative_color: "#c0392b"
  stroke_width: 0.2
  marker_scale: 1.5
  opacity: 0.9
  size_px: 1600
"##);
}
