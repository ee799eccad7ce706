use anyhow::{anyhow, Context};
use log::{debug, warn};
use plotters::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Range;
use std::path::Path;
pub mod plot;

pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// Fixed destination of the rendered figure.
pub const OUTPUT_SVG: &str = "/Users/alainashumate/Desktop/new_human_data.svg";

pub const DPI: u32 = 1200;
pub const FIGURE_INCHES: (f64, f64) = (6.4, 4.8);
pub const POINTS_PER_INCH: f64 = 72.;

/// marker area in pt^2
pub const MARKER_AREA_PT2: f64 = 100.;
pub const FONT_PT: f64 = 10.;
pub const AXIS_LINE_PT: f64 = 0.8;

/// data beyond this magnitude is clamped so the axis span stays finite
pub const AXIS_LIMIT: f64 = f64::MAX / 4.;

pub const X_LABEL: &str = "Precision (%)";
pub const Y_LABEL: &str = "# Annotated Transcripts Assembled";

/// blue, purple, red; cycled over the points
pub const PALETTE: [RGBColor; 3] = [
    RGBColor(0, 0, 255),
    RGBColor(128, 0, 128),
    RGBColor(255, 0, 0),
];

/// The paired observations: assembly precision and number of annotated transcripts.
/// Index i of `precision` goes with index i of `transcripts`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionTranscripts {
    pub precision: Vec<f64>,
    pub transcripts: Vec<f64>,
}

impl PrecisionTranscripts {
    pub fn new(capacity: usize) -> PrecisionTranscripts {
        PrecisionTranscripts {
            precision: Vec::with_capacity(capacity),
            transcripts: Vec::with_capacity(capacity),
        }
    }

    /// Init from the two csv files, taking the second column of each.
    /// Lengths are not checked here, see `pairs`.
    pub fn from_csv<P, Q>(precision_file: P, transcripts_file: Q) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let precision = read_second_column(precision_file)?;
        let transcripts = read_second_column(transcripts_file)?;
        Ok(PrecisionTranscripts {
            precision,
            transcripts,
        })
    }

    /// (precision, transcripts) pairs; the tail of the longer series is dropped
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.precision
            .iter()
            .copied()
            .zip(self.transcripts.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.precision.len().min(self.transcripts.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_paired(&self) -> bool {
        self.precision.len() == self.transcripts.len()
    }

    /// plots transcripts against precision to svg, without background
    pub fn plot_scatter<P: AsRef<Path>>(&self, fout: P) -> anyhow::Result<()> {
        let fout = fout.as_ref();
        if !self.is_paired() {
            warn!(
                "{} precision values but {} transcript counts, plotting the first {} pairs",
                self.precision.len(),
                self.transcripts.len(),
                self.len()
            );
        }
        let scale = DPI as f64 / POINTS_PER_INCH;
        let size = (
            (FIGURE_INCHES.0 * DPI as f64).round() as u32,
            (FIGURE_INCHES.1 * DPI as f64).round() as u32,
        );
        let font = (FONT_PT * scale).round() as u32;
        let radius = ((MARKER_AREA_PT2.sqrt() / 2.) * scale).round() as u32;
        let axis_width = (AXIS_LINE_PT * scale).round() as u32;
        let xrange = axis_range(&self.precision[..self.len()]);
        let yrange = axis_range(&self.transcripts[..self.len()]);
        debug!(
            "canvas {}x{} px, x range {:?}, y range {:?}",
            size.0, size.1, xrange, yrange
        );

        let root = SVGBackend::new(fout, size).into_drawing_area();
        let mut chart = ChartBuilder::on(&root)
            .margin(font)
            .x_label_area_size(font * 4)
            .y_label_area_size(font * 6)
            .build_cartesian_2d(xrange, yrange)
            .context("could not build the chart")?;
        chart
            .configure_mesh()
            .disable_mesh()
            .axis_style(BLACK.stroke_width(axis_width))
            .set_all_tick_mark_size(font / 3)
            .label_style(("sans-serif", font))
            .axis_desc_style(("sans-serif", font))
            .x_desc(X_LABEL)
            .y_desc(Y_LABEL)
            .draw()
            .context("could not draw the axes")?;

        // colours follow the input index, so a skipped non-finite pair keeps the others in place
        let points = self
            .pairs()
            .zip(PALETTE.iter().cycle())
            .filter(|&((x, y), _)| x.is_finite() && y.is_finite())
            .map(|((x, y), c)| Circle::new((x, y), radius, c.filled()));
        chart
            .draw_series(points)
            .context("could not draw the points")?;
        root.present()
            .with_context(|| format!("could not write {}", fout.display()))?;
        Ok(())
    }
}

impl std::fmt::Display for PrecisionTranscripts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "precision,transcripts")?;
        for (p, t) in self.pairs() {
            writeln!(f, "{},{}", p, t)?
        }
        Ok(())
    }
}

/// Reads the second comma separated field of every non-empty line as f64.
/// Fails on a missing or non-numeric field, reporting file and line number.
pub fn read_second_column<P: AsRef<Path>>(fin: P) -> anyhow::Result<Vec<f64>> {
    let fin = fin.as_ref();
    let file = File::open(fin).with_context(|| format!("could not open {}", fin.display()))?;
    let buf = BufReader::new(file);
    let mut values: Vec<f64> = Vec::new();
    for (i, l) in buf.lines().enumerate() {
        let l = l.with_context(|| format!("could not read line {} of {}", i + 1, fin.display()))?;
        let l = l.trim();
        if l.is_empty() {
            continue;
        }
        let field = l
            .split(',')
            .nth(1)
            .ok_or_else(|| anyhow!("line {} of {} has no second field", i + 1, fin.display()))?;
        let v: f64 = field.trim().parse().with_context(|| {
            format!(
                "invalid number {:?} at line {} of {}",
                field,
                i + 1,
                fin.display()
            )
        })?;
        values.push(v);
    }
    debug!("read {} values from {}", values.len(), fin.display());
    Ok(values)
}

/// None for an empty slice
pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> Option<(T, T)> {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => return None,
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    Some((min, max))
}

/// data span plus 5% on each side, ignoring non-finite values;
/// always finite, with data clamped to +-AXIS_LIMIT
pub fn axis_range(v: &[f64]) -> Range<f64> {
    let finite: Vec<f64> = v.iter().copied().filter(|x| x.is_finite()).collect();
    match min_and_max(&finite[..]) {
        None => 0.0..1.0,
        Some((min, max)) => {
            let min = min.max(-AXIS_LIMIT);
            let max = max.min(AXIS_LIMIT);
            let margin = if min == max {
                (min.abs() / 20.).max(0.5)
            } else {
                max / 20. - min / 20.
            };
            (min - margin)..(max + margin)
        }
    }
}
