//! Minimal SVG document builder for the charts.

use senti_common::format_numeric;

pub(crate) const FONT_FAMILY: &str = "DejaVu Sans, Arial, sans-serif";
const AXIS_COLOR: &str = "#333333";
const GRID_COLOR: &str = "#e5e5e5";

/// Horizontal alignment of a text element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// An SVG document under construction.
pub(crate) struct Svg {
    width: u32,
    height: u32,
    body: String,
}

impl Svg {
    /// Starts a document with a white background.
    pub(crate) fn new(width: u32, height: u32) -> Self {
        let mut svg = Self {
            width,
            height,
            body: String::new(),
        };
        svg.rect(0.0, 0.0, width as f32, height as f32, "#ffffff");
        svg
    }

    pub(crate) fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, fill: &str) {
        self.body.push_str(&format!(
            r#"<rect x="{x:.1}" y="{y:.1}" width="{:.1}" height="{:.1}" fill="{fill}"/>"#,
            width.max(0.0),
            height.max(0.0)
        ));
        self.body.push('\n');
    }

    pub(crate) fn line(&mut self, from: (f32, f32), to: (f32, f32), stroke: &str, width: f32) {
        self.body.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{stroke}" stroke-width="{width}"/>"#,
            from.0, from.1, to.0, to.1
        ));
        self.body.push('\n');
    }

    pub(crate) fn polyline(&mut self, points: &[(f32, f32)], stroke: &str, width: f32) {
        if points.len() < 2 {
            return;
        }
        let coords: Vec<String> = points
            .iter()
            .map(|(x, y)| format!("{x:.1},{y:.1}"))
            .collect();
        self.body.push_str(&format!(
            r#"<polyline points="{}" fill="none" stroke="{stroke}" stroke-width="{width}"/>"#,
            coords.join(" ")
        ));
        self.body.push('\n');
    }

    pub(crate) fn circle(&mut self, center: (f32, f32), radius: f32, fill: &str, opacity: f32) {
        self.body.push_str(&format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="{radius}" fill="{fill}" fill-opacity="{opacity}"/>"#,
            center.0, center.1
        ));
        self.body.push('\n');
    }

    pub(crate) fn text(&mut self, position: (f32, f32), content: &str, size: f32, anchor: Anchor) {
        self.body.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-family="{FONT_FAMILY}" font-size="{size}" text-anchor="{}" fill="{AXIS_COLOR}">{}</text>"#,
            position.0,
            position.1,
            anchor.as_str(),
            escape(content)
        ));
        self.body.push('\n');
    }

    /// Bold text, used for titles.
    pub(crate) fn heading(&mut self, position: (f32, f32), content: &str, size: f32) {
        self.body.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-family="{FONT_FAMILY}" font-size="{size}" font-weight="bold" text-anchor="middle" fill="{AXIS_COLOR}">{}</text>"#,
            position.0,
            position.1,
            escape(content)
        ));
        self.body.push('\n');
    }

    /// Text rotated 90 degrees counter-clockwise around its anchor point.
    pub(crate) fn vertical_text(&mut self, position: (f32, f32), content: &str, size: f32) {
        self.body.push_str(&format!(
            r#"<text x="{x:.1}" y="{y:.1}" font-family="{FONT_FAMILY}" font-size="{size}" text-anchor="middle" fill="{AXIS_COLOR}" transform="rotate(-90 {x:.1} {y:.1})">{}</text>"#,
            escape(content),
            x = position.0,
            y = position.1,
        ));
        self.body.push('\n');
    }

    pub(crate) fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{}</svg>\n",
            self.body,
            w = self.width,
            h = self.height
        )
    }
}

/// Escapes text content for XML.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// A plotting area mapping data coordinates onto the document.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Panel {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl Panel {
    /// A panel inside the rectangle `(left, top, width, height)`, leaving room
    /// for the title and axis labels.
    pub(crate) fn inset(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left: left + 70.0,
            top: top + 50.0,
            width: (width - 100.0).max(1.0),
            height: (height - 110.0).max(1.0),
            x_range: (0.0, 1.0),
            y_range: (0.0, 1.0),
        }
    }

    #[must_use]
    pub(crate) fn with_x_range(mut self, min: f64, max: f64) -> Self {
        self.x_range = widen(min, max);
        self
    }

    #[must_use]
    pub(crate) fn with_y_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = widen(min, max);
        self
    }

    pub(crate) fn x(&self, value: f64) -> f32 {
        let (min, max) = self.x_range;
        self.left + ((value - min) / (max - min)) as f32 * self.width
    }

    pub(crate) fn y(&self, value: f64) -> f32 {
        let (min, max) = self.y_range;
        self.top + self.height - ((value - min) / (max - min)) as f32 * self.height
    }

    pub(crate) fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Left edge and width of the `index`-th of `count` equal category bands.
    pub(crate) fn band(&self, index: usize, count: usize) -> (f32, f32) {
        let band = self.width / count.max(1) as f32;
        (self.left + band * index as f32, band)
    }

    /// Draws the title, axis labels, horizontal grid lines and y tick labels.
    pub(crate) fn draw_frame(&self, svg: &mut Svg, title: &str, x_label: &str, y_label: &str) {
        svg.heading((self.left + self.width / 2.0, self.top - 20.0), title, 18.0);
        let (min, max) = self.y_range;
        for step in 0..=4 {
            let value = min + (max - min) * f64::from(step) / 4.0;
            let y = self.y(value);
            svg.line((self.left, y), (self.left + self.width, y), GRID_COLOR, 1.0);
            svg.text((self.left - 8.0, y + 4.0), &tick_label(value), 12.0, Anchor::End);
        }
        svg.line(
            (self.left, self.bottom()),
            (self.left + self.width, self.bottom()),
            AXIS_COLOR,
            1.5,
        );
        svg.line((self.left, self.top), (self.left, self.bottom()), AXIS_COLOR, 1.5);
        svg.text(
            (self.left + self.width / 2.0, self.bottom() + 50.0),
            x_label,
            14.0,
            Anchor::Middle,
        );
        svg.vertical_text((self.left - 55.0, self.top + self.height / 2.0), y_label, 14.0);
    }

    /// Writes a category label centered under the band.
    pub(crate) fn category_label(&self, svg: &mut Svg, index: usize, count: usize, label: &str) {
        let (start, band) = self.band(index, count);
        svg.text(
            (start + band / 2.0, self.bottom() + 20.0),
            label,
            12.0,
            Anchor::Middle,
        );
    }

    /// Writes a legend in the top-right corner of the panel.
    pub(crate) fn legend(&self, svg: &mut Svg, entries: &[(&str, &str)]) {
        let x = self.left + self.width - 130.0;
        for (idx, (label, color)) in entries.iter().enumerate() {
            let y = self.top + 10.0 + idx as f32 * 22.0;
            svg.rect(x, y, 14.0, 14.0, color);
            svg.text((x + 20.0, y + 12.0), label, 13.0, Anchor::Start);
        }
    }
}

fn widen(min: f64, max: f64) -> (f64, f64) {
    if !min.is_finite() || !max.is_finite() {
        (0.0, 1.0)
    } else if max > min {
        (min, max)
    } else {
        (min - 0.5, max + 0.5)
    }
}

fn tick_label(value: f64) -> String {
    format_numeric((value * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("P&L <up> \"x\""), "P&amp;L &lt;up&gt; &quot;x&quot;");
    }

    #[test]
    fn panel_maps_data_to_pixels() {
        let panel = Panel {
            left: 100.0,
            top: 50.0,
            width: 200.0,
            height: 100.0,
            x_range: (0.0, 1.0),
            y_range: (0.0, 1.0),
        }
        .with_x_range(0.0, 10.0)
        .with_y_range(0.0, 4.0);
        assert!((panel.x(5.0) - 200.0).abs() < 1e-3);
        assert!((panel.y(0.0) - 150.0).abs() < 1e-3);
        assert!((panel.y(4.0) - 50.0).abs() < 1e-3);
    }

    #[test]
    fn degenerate_ranges_are_widened() {
        assert_eq!(widen(3.0, 3.0), (2.5, 3.5));
        assert_eq!(widen(f64::NAN, 1.0), (0.0, 1.0));
    }

    #[test]
    fn tiny_document() {
        let mut svg = Svg::new(10, 10);
        svg.line((0.0, 0.0), (10.0, 10.0), "#000", 1.0);
        insta::assert_snapshot!(svg.finish(), @r##"
        <svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10">
        <rect x="0.0" y="0.0" width="10.0" height="10.0" fill="#ffffff"/>
        <line x1="0.0" y1="0.0" x2="10.0" y2="10.0" stroke="#000" stroke-width="1"/>
        </svg>
        "##);
    }
}
