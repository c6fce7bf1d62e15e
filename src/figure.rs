use anyhow::{anyhow, Context, Result};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

const TITLE: &str = "Position versus Score and Number of Sequences";
const SCORE_COLOR: &str = "#1f77b4";
const COUNT_COLOR: &str = "#d62728";

/// One parsed row of the tool's `foma.table`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FomaRow {
    pub position: i64,
    pub score: i64,
    pub sequences: i64,
}

/// Reads the tab separated table. Rows where any of `Position`, `Score` or
/// `NumberOfSequence` is not an integer are skipped.
pub fn read_foma_table<R: BufRead>(reader: R) -> Result<Vec<FomaRow>> {
    let mut lines = reader.lines();
    let header = lines.next().ok_or_else(|| anyhow!("foma table is empty"))??;
    let columns: Vec<&str> = header.split('\t').map(str::trim).collect();
    let column = |name: &str| {
        columns
            .iter()
            .position(|c| *c == name)
            .ok_or_else(|| anyhow!("foma table has no {} column", name))
    };
    let (pos_idx, score_idx, count_idx) = (
        column("Position")?,
        column("Score")?,
        column("NumberOfSequence")?,
    );

    let mut rows = Vec::new();
    for line in lines {
        let line = line?;
        let fields: Vec<&str> = line.split('\t').collect();
        let int_at = |idx: usize| fields.get(idx).and_then(|f| f.trim().parse::<i64>().ok());
        if let (Some(position), Some(score), Some(sequences)) =
            (int_at(pos_idx), int_at(score_idx), int_at(count_idx))
        {
            rows.push(FomaRow {
                position,
                score,
                sequences,
            });
        }
    }
    Ok(rows)
}

struct SvgTag {
    name: &'static str,
    attributes: BTreeMap<&'static str, String>,
}

impl SvgTag {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: BTreeMap::new(),
        }
    }

    fn attr(mut self, key: &'static str, value: impl ToString) -> Self {
        self.attributes.insert(key, value.to_string());
        self
    }

    fn attrs(&self) -> String {
        self.attributes
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, escape_xml(v)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn empty(&self) -> String {
        format!("<{} {}/>\n", self.name, self.attrs())
    }

    fn with_text(&self, text: &str) -> String {
        format!("<{} {}>{}</{}>\n", self.name, self.attrs(), escape_xml(text), self.name)
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('\'', "&apos;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Plot area and a linear mapping of data ranges onto it.
struct Frame {
    width: f64,
    height: f64,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl Frame {
    fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            left: 70.0,
            right: 70.0,
            top: 40.0,
            bottom: 50.0,
        }
    }

    fn plot_width(&self) -> f64 {
        self.width - self.left - self.right
    }

    fn plot_height(&self) -> f64 {
        self.height - self.top - self.bottom
    }

    fn x(&self, value: i64, (min, max): (i64, i64)) -> f64 {
        let span = (max - min).max(1) as f64;
        self.left + (value - min) as f64 / span * self.plot_width()
    }

    fn y(&self, value: i64, max: i64) -> f64 {
        let max = max.max(1) as f64;
        self.height - self.bottom - value.max(0) as f64 / max * self.plot_height()
    }
}

/// Score as bars on the left axis, number of sequences as a line on the
/// right axis.
pub fn render_svg(rows: &[FomaRow]) -> String {
    let frame = Frame::new(960.0, 480.0);
    let x_range = (
        rows.iter().map(|r| r.position).min().unwrap_or(0),
        rows.iter().map(|r| r.position).max().unwrap_or(1),
    );
    let max_score = rows.iter().map(|r| r.score).max().unwrap_or(0);
    let max_count = rows.iter().map(|r| r.sequences).max().unwrap_or(0);
    let bar_width = (frame.plot_width() / (x_range.1 - x_range.0 + 1).max(1) as f64).max(1.0);
    let baseline = frame.height - frame.bottom;

    let mut svg = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n");
    svg.push_str(&format!(
        "<svg {}>\n",
        SvgTag::new("svg")
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("width", frame.width)
            .attr("height", frame.height)
            .attr("font-family", "sans-serif")
            .attr("font-size", 12)
            .attrs()
    ));
    svg.push_str(&SvgTag::new("rect")
        .attr("width", "100%")
        .attr("height", "100%")
        .attr("fill", "#ffffff")
        .empty());

    for row in rows {
        let y = frame.y(row.score, max_score);
        svg.push_str(&SvgTag::new("rect")
            .attr("x", format!("{:.2}", frame.x(row.position, x_range) - bar_width / 2.0))
            .attr("y", format!("{:.2}", y))
            .attr("width", format!("{:.2}", bar_width))
            .attr("height", format!("{:.2}", baseline - y))
            .attr("fill", SCORE_COLOR)
            .empty());
    }

    if !rows.is_empty() {
        let points = rows
            .iter()
            .map(|r| format!("{:.2},{:.2}", frame.x(r.position, x_range), frame.y(r.sequences, max_count)))
            .collect::<Vec<_>>()
            .join(" ");
        svg.push_str(&SvgTag::new("polyline")
            .attr("points", points)
            .attr("fill", "none")
            .attr("stroke", COUNT_COLOR)
            .attr("stroke-width", 1.5)
            .empty());
    }

    // axes
    let right_edge = frame.width - frame.right;
    for (x, color) in [(frame.left, SCORE_COLOR), (right_edge, COUNT_COLOR)] {
        svg.push_str(&SvgTag::new("line")
            .attr("x1", x)
            .attr("y1", frame.top)
            .attr("x2", x)
            .attr("y2", baseline)
            .attr("stroke", color)
            .empty());
    }
    svg.push_str(&SvgTag::new("line")
        .attr("x1", frame.left)
        .attr("y1", baseline)
        .attr("x2", right_edge)
        .attr("y2", baseline)
        .attr("stroke", "#333333")
        .empty());

    let labels = [
        (frame.left, frame.top - 8.0, "end", SCORE_COLOR, max_score.to_string()),
        (right_edge, frame.top - 8.0, "start", COUNT_COLOR, max_count.to_string()),
        (frame.left, baseline + 16.0, "middle", "#333333", x_range.0.to_string()),
        (right_edge, baseline + 16.0, "middle", "#333333", x_range.1.to_string()),
    ];
    for (x, y, anchor, color, text) in labels {
        svg.push_str(&SvgTag::new("text")
            .attr("x", x)
            .attr("y", y)
            .attr("text-anchor", anchor)
            .attr("fill", color)
            .with_text(&text));
    }
    svg.push_str(&SvgTag::new("text")
        .attr("x", frame.width / 2.0)
        .attr("y", frame.height - 12.0)
        .attr("text-anchor", "middle")
        .with_text("Position"));
    svg.push_str(&SvgTag::new("text")
        .attr("x", 20)
        .attr("y", frame.height / 2.0)
        .attr("text-anchor", "middle")
        .attr("fill", SCORE_COLOR)
        .attr("transform", format!("rotate(-90 20 {})", frame.height / 2.0))
        .with_text("Score"));
    svg.push_str(&SvgTag::new("text")
        .attr("x", frame.width - 20.0)
        .attr("y", frame.height / 2.0)
        .attr("text-anchor", "middle")
        .attr("fill", COUNT_COLOR)
        .attr("transform", format!("rotate(90 {} {})", frame.width - 20.0, frame.height / 2.0))
        .with_text("Num of Seqs."));
    svg.push_str(&SvgTag::new("text")
        .attr("x", frame.width / 2.0)
        .attr("y", 24)
        .attr("text-anchor", "middle")
        .attr("font-size", 16)
        .with_text(TITLE));

    svg.push_str("</svg>\n");
    svg
}

/// Renders `table` to `<output_prefix>.svg`; returns the figure path and the
/// number of rows plotted.
pub fn write_figure(table: &Path, output_prefix: &str) -> Result<(PathBuf, usize)> {
    let file = File::open(table).with_context(|| format!("Failed to open {}", table.display()))?;
    let rows = read_foma_table(BufReader::new(file))
        .with_context(|| format!("Failed to read {}", table.display()))?;

    let svg_path = PathBuf::from(format!("{}.svg", output_prefix));
    fs::write(&svg_path, render_svg(&rows))
        .with_context(|| format!("Failed to write {}", svg_path.display()))?;
    Ok((svg_path, rows.len()))
}
