//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

use issa::{
    BFileDirectory, EquiType, Sequence, SequenceId, SequenceSource, SpiralParams, SpiralPath,
    SpiralType,
};

/// Output format for generated spirals.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
    Svg,
    Png,
}

impl OutputFormat {
    /// Guess the format from a file extension, defaulting to SVG.
    pub fn from_path(path: &Path) -> OutputFormat {
        match path.extension().and_then(|e| e.to_str()).map(str::to_lowercase).as_deref() {
            Some("json") => OutputFormat::Json,
            Some("csv") => OutputFormat::Csv,
            Some("png") => OutputFormat::Png,
            _ => OutputFormat::Svg,
        }
    }
}

/// Spiral shape flags shared by `spiral` and `render`.
#[derive(Args, Debug, Clone)]
pub struct SpiralOpts {
    /// Rectangle height
    #[arg(long, default_value_t = 10.0)]
    pub height: f64,

    /// Rectangle width
    #[arg(long, default_value_t = 10.0)]
    pub width: f64,

    /// Number of points (render: defaults to the number of sequence terms)
    #[arg(short = 'n', long)]
    pub points: Option<usize>,

    /// Number of laps around the rectangle
    #[arg(short = 's', long, default_value_t = 1.0)]
    pub spirals: f64,

    /// Point spacing policy: revolution, distant
    #[arg(long = "equi", default_value = "revolution")]
    pub equi_type: EquiType,

    /// Radial scaling: linear, multiplicative
    #[arg(long = "scaling", default_value = "linear")]
    pub spiral_type: SpiralType,
}

impl SpiralOpts {
    pub fn params(&self, num_points: usize) -> SpiralParams {
        SpiralParams {
            height: self.height,
            width: self.width,
            num_points,
            num_spirals: self.spirals,
            equi_type: self.equi_type,
            spiral_type: self.spiral_type,
        }
    }
}

/// Drawing style for SVG and PNG output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Path and marker color for non-negative terms
    pub color: String,
    /// Marker color for negative terms
    pub negative_color: String,
    pub background: String,
    /// Line width as a percentage of the shorter rectangle side
    pub stroke_width: f64,
    /// Marker radius multiplier (0 hides markers)
    pub marker_scale: f64,
    pub opacity: f64,
    /// Width of PNG output in pixels
    pub size_px: u32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: "#222222".to_string(),
            negative_color: "#c0392b".to_string(),
            background: "white".to_string(),
            stroke_width: 0.3,
            marker_scale: 1.0,
            opacity: 1.0,
            size_px: 1200,
        }
    }
}

/// Style flags; unset flags keep the [`Style`] defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct StyleOpts {
    /// Path and marker color
    #[arg(long)]
    pub color: Option<String>,

    /// Line width (% of the shorter side)
    #[arg(long)]
    pub stroke_width: Option<f64>,

    /// Marker radius multiplier, 0 to hide markers
    #[arg(long)]
    pub marker_scale: Option<f64>,

    /// PNG width in pixels
    #[arg(long)]
    pub size: Option<u32>,
}

impl StyleOpts {
    pub fn style(&self) -> Style {
        let defaults = Style::default();
        Style {
            color: self.color.clone().unwrap_or(defaults.color),
            stroke_width: self.stroke_width.unwrap_or(defaults.stroke_width),
            marker_scale: self.marker_scale.unwrap_or(defaults.marker_scale),
            size_px: self.size.unwrap_or(defaults.size_px),
            ..defaults
        }
    }
}

/// Load a sequence from a directory of b-files.
pub fn load_sequence(dir: &Path, id: &str) -> Result<Sequence> {
    let id: SequenceId = id.parse()?;
    let source = BFileDirectory::new(dir);
    match source.fetch(&id)? {
        Some(seq) if !seq.is_empty() => Ok(seq),
        Some(_) => bail!("b-file {} holds no terms", source.path_for(&id).display()),
        None => bail!(
            "sequence {} not found in {}: expected {} (download it from {})",
            id,
            source.root().display(),
            id.bfile_name(),
            id.bfile_url()
        ),
    }
}

/// The first `points` terms of `seq` (all of them when `points` is `None`).
pub fn take_terms(seq: &Sequence, points: Option<usize>) -> Result<Vec<i128>> {
    let mut values = seq.values();
    let wanted = points.unwrap_or(values.len());
    if wanted > values.len() {
        bail!(
            "{} has only {} terms, cannot fill {} points",
            seq.id.map(|id| id.to_string()).unwrap_or_else(|| "sequence".to_string()),
            values.len(),
            wanted
        );
    }
    values.truncate(wanted);
    Ok(values)
}

#[derive(Serialize)]
struct SpiralJson<'a> {
    spacing: f64,
    x: &'a [f64],
    y: &'a [f64],
    #[serde(skip_serializing_if = "Option::is_none")]
    values: Option<&'a [i128]>,
}

/// Spiral coordinates as JSON: `{"spacing": .., "x": [..], "y": [..]}`.
pub fn spiral_to_json(path: &SpiralPath, values: Option<&[i128]>) -> Result<String> {
    let json = SpiralJson {
        spacing: path.spacing(),
        x: path.xs(),
        y: path.ys(),
        values,
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Spiral coordinates as CSV with an `index,x,y[,value]` header.
pub fn spiral_to_csv(path: &SpiralPath, values: Option<&[i128]>) -> String {
    let mut csv = String::from(if values.is_some() { "index,x,y,value\n" } else { "index,x,y\n" });
    for (i, p) in path.points().enumerate() {
        match values.and_then(|v| v.get(i)) {
            Some(v) => csv.push_str(&format!("{},{},{},{}\n", i, p.x, p.y, v)),
            None => csv.push_str(&format!("{},{},{}\n", i, p.x, p.y)),
        }
    }
    csv
}

/// Draw a spiral as SVG.
///
/// The path is drawn as one polyline. With `values`, each point also gets a
/// circle whose radius grows with `ln(1 + |value|)`, colored by sign.
pub fn spiral_to_svg(path: &SpiralPath, values: Option<&[i128]>, style: &Style) -> String {
    let rect = path.rect();
    let (w, h) = (rect.width(), rect.height());
    let unit = w.min(h) / 100.0;
    let pad = 4.0 * unit;
    let px_w = style.size_px.max(1);
    let px_h = ((px_w as f64) * (h + 2.0 * pad) / (w + 2.0 * pad)).round().max(1.0) as u32;

    let mut svg = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{:.4} {:.4} {:.4} {:.4}">
<rect x="{:.4}" y="{:.4}" width="100%" height="100%" fill="{}"/>
"#,
        px_w,
        px_h,
        rect.left - pad,
        -rect.top - pad,
        w + 2.0 * pad,
        h + 2.0 * pad,
        rect.left - pad,
        -rect.top - pad,
        style.background,
    );

    // SVG's y axis points down.
    let points: String = path
        .points()
        .map(|p| format!("{:.4},{:.4}", p.x, -p.y))
        .collect::<Vec<_>>()
        .join(" ");
    svg.push_str(&format!(
        "<polyline points=\"{}\" stroke=\"{}\" stroke-width=\"{:.4}\" fill=\"none\" opacity=\"{}\" stroke-linejoin=\"round\"/>\n",
        points,
        style.color,
        style.stroke_width * unit,
        style.opacity,
    ));

    if let Some(values) = values.filter(|_| style.marker_scale > 0.0) {
        let max_mag = values
            .iter()
            .map(|v| (v.unsigned_abs() as f64).ln_1p())
            .fold(0.0, f64::max);
        if max_mag > 0.0 {
            svg.push_str(&format!("<g opacity=\"{}\">\n", style.opacity));
            for (p, v) in path.points().zip(values) {
                let r = style.marker_scale * 2.0 * unit * (v.unsigned_abs() as f64).ln_1p() / max_mag;
                if r <= 0.0 {
                    continue;
                }
                let fill = if *v < 0 { &style.negative_color } else { &style.color };
                svg.push_str(&format!(
                    "  <circle cx=\"{:.4}\" cy=\"{:.4}\" r=\"{:.4}\" fill=\"{}\"/>\n",
                    p.x, -p.y, r, fill
                ));
            }
            svg.push_str("</g>\n");
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Rasterize an SVG document to PNG bytes.
pub fn svg_to_png(svg: &str) -> Result<Vec<u8>> {
    let options = resvg::usvg::Options::default();
    let tree = resvg::usvg::Tree::from_str(svg, &options).context("Failed to parse generated SVG")?;

    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .context("Failed to create pixmap")?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap.encode_png().context("Failed to encode PNG")
}

/// Encode a spiral in the requested format.
pub fn encode(
    path: &SpiralPath,
    values: Option<&[i128]>,
    format: OutputFormat,
    style: &Style,
) -> Result<Vec<u8>> {
    Ok(match format {
        OutputFormat::Json => spiral_to_json(path, values)?.into_bytes(),
        OutputFormat::Csv => spiral_to_csv(path, values).into_bytes(),
        OutputFormat::Svg => spiral_to_svg(path, values, style).into_bytes(),
        OutputFormat::Png => svg_to_png(&spiral_to_svg(path, values, style))?,
    })
}

/// Write to `output`, or stdout when it is `None` or `-`.
pub fn write_output(output: Option<&PathBuf>, bytes: &[u8]) -> Result<()> {
    match output {
        Some(path) if path.as_os_str() != "-" => {
            fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote: {}", path.display());
        }
        _ => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use issa::generate_spiral;

    fn square_path(n: usize) -> SpiralPath {
        generate_spiral(&SpiralParams {
            num_points: n,
            ..SpiralParams::default()
        })
        .unwrap()
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("a.PNG")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("a.json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_path(Path::new("a.csv")), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_path(Path::new("a")), OutputFormat::Svg);
    }

    #[test]
    fn json_has_aligned_arrays() {
        let path = square_path(5);
        let json: serde_json::Value = serde_json::from_str(&spiral_to_json(&path, None).unwrap()).unwrap();
        assert_eq!(json["x"].as_array().unwrap().len(), 5);
        assert_eq!(json["y"].as_array().unwrap().len(), 5);
        assert_eq!(json["spacing"], 8.0);
        assert!(json.get("values").is_none());
    }

    #[test]
    fn csv_rows_per_point() {
        let path = square_path(5);
        let csv = spiral_to_csv(&path, Some(&[1, 1, 2, 3, 5]));
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "index,x,y,value");
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "0,-5,-5,1");
        assert!(lines[5].starts_with("4,") && lines[5].ends_with(",5"));
    }

    #[test]
    fn svg_draws_markers_for_nonzero_terms() {
        let path = square_path(5);
        let svg = spiral_to_svg(&path, Some(&[0, 1, -2, 3, 5]), &Style::default());
        assert!(svg.contains("<polyline"));
        assert_eq!(svg.matches("<circle").count(), 4);
        assert!(svg.contains("#c0392b"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn svg_without_values_has_no_markers() {
        let svg = spiral_to_svg(&square_path(50), None, &Style::default());
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn png_has_signature() {
        let style = Style {
            size_px: 64,
            ..Style::default()
        };
        let png = svg_to_png(&spiral_to_svg(&square_path(40), None, &style)).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn take_terms_limits_and_checks() {
        let seq = Sequence::from_values(None, 0, &[1, 2, 3]);
        assert_eq!(take_terms(&seq, None).unwrap(), vec![1, 2, 3]);
        assert_eq!(take_terms(&seq, Some(2)).unwrap(), vec![1, 2]);
        assert!(take_terms(&seq, Some(4)).is_err());
    }
}
