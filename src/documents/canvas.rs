//! Page canvas: a fixed-size drawing surface that records draw commands.
//!
//! Coordinates use a top-left origin in points. The canvas only records
//! geometry; turning the recorded display list into bytes is the job of a
//! rendering backend (see [`super::pdf`]). Recording first keeps every
//! coordinate inspectable and identical across backends.

use super::metrics::{FontFace, TextMeasurer};

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub const A4_PORTRAIT: PageSize = PageSize {
        width: 595.28,
        height: 841.89,
    };

    pub const A4_LANDSCAPE: PageSize = PageSize {
        width: 841.89,
        height: 595.28,
    };

    pub fn center_x(&self) -> f64 {
        self.width / 2.0
    }
}

/// RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to the 0.0..=1.0 range used by PDF color operators.
    pub fn unit_components(&self) -> [f64; 3] {
        [
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Stroke color and line width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    pub const fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Font, size, color and optional alignment box for a text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: FontFace,
    pub size: f64,
    pub color: Color,
    /// Width of the alignment box starting at the text's `x`.
    pub width: Option<f64>,
    pub align: TextAlign,
    /// Clip rendering to the alignment box.
    pub clip: bool,
}

impl TextStyle {
    pub fn new(font: FontFace, size: f64, color: Color) -> Self {
        Self {
            font,
            size,
            color,
            width: None,
            align: TextAlign::Left,
            clip: false,
        }
    }

    /// Align inside a box of `width` points starting at the text's `x`.
    pub fn boxed(mut self, width: f64, align: TextAlign) -> Self {
        self.width = Some(width);
        self.align = align;
        self
    }

    pub fn clipped(mut self) -> Self {
        self.clip = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectCommand {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineCommand {
    pub points: Vec<Point>,
    pub stroke: Stroke,
}

impl LineCommand {
    /// Horizontal extent of the polyline.
    pub fn span_x(&self) -> (f64, f64) {
        self.points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.x), hi.max(p.x))
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleCommand {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub text: String,
    /// Requested position: left edge of the alignment box, top of the line.
    pub x: f64,
    pub y: f64,
    /// Resolved left edge of the glyphs after alignment.
    pub origin_x: f64,
    /// Measured width of `text` in the style's font and size.
    pub text_width: f64,
    pub style: TextStyle,
}

/// One recorded drawing operation, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect(RectCommand),
    Line(LineCommand),
    Circle(CircleCommand),
    Text(TextCommand),
}

/// Drawing surface for exactly one page.
#[derive(Debug, Clone)]
pub struct PageCanvas {
    page: PageSize,
    measurer: TextMeasurer,
    commands: Vec<DrawCommand>,
}

impl PageCanvas {
    pub fn new(page: PageSize) -> Self {
        Self::with_measurer(page, TextMeasurer::new())
    }

    pub fn with_measurer(page: PageSize, measurer: TextMeasurer) -> Self {
        assert_dimension(page.width, "page width");
        assert_dimension(page.height, "page height");
        Self {
            page,
            measurer,
            commands: Vec::new(),
        }
    }

    pub fn page(&self) -> PageSize {
        self.page
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn measure_text_width(&self, text: &str, font: FontFace, size: f64) -> f64 {
        self.measurer.width_of(text, font, size)
    }

    /// Record a rectangle; at least one of `fill` and `stroke` should be set
    /// for anything to be painted.
    pub fn draw_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    ) {
        assert_coordinate(x, "rect x");
        assert_coordinate(y, "rect y");
        assert_dimension(width, "rect width");
        assert_dimension(height, "rect height");
        if let Some(stroke) = stroke {
            assert_dimension(stroke.width, "stroke width");
        }

        self.commands.push(DrawCommand::Rect(RectCommand {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        }));
    }

    /// Record an open polyline through `points`.
    pub fn draw_line(&mut self, points: &[Point], color: Color, width: f64) {
        assert!(points.len() >= 2, "a line needs at least two points");
        for point in points {
            assert_coordinate(point.x, "line x");
            assert_coordinate(point.y, "line y");
        }
        assert_dimension(width, "line width");

        self.commands.push(DrawCommand::Line(LineCommand {
            points: points.to_vec(),
            stroke: Stroke::new(color, width),
        }));
    }

    pub fn draw_circle(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    ) {
        assert_coordinate(cx, "circle cx");
        assert_coordinate(cy, "circle cy");
        assert_dimension(radius, "circle radius");
        if let Some(stroke) = stroke {
            assert_dimension(stroke.width, "stroke width");
        }

        self.commands.push(DrawCommand::Circle(CircleCommand {
            cx,
            cy,
            radius,
            fill,
            stroke,
        }));
    }

    /// Record a single line of text. With a box width the glyphs are placed
    /// left, centered or right inside `[x, x + width]`.
    pub fn draw_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle) {
        assert_coordinate(x, "text x");
        assert_coordinate(y, "text y");

        let text_width = self.measure_text_width(text, style.font, style.size);
        let origin_x = match style.width {
            None => x,
            Some(width) => {
                assert_dimension(width, "text box width");
                match style.align {
                    TextAlign::Left => x,
                    TextAlign::Center => x + (width - text_width) / 2.0,
                    TextAlign::Right => x + width - text_width,
                }
            }
        };

        self.commands.push(DrawCommand::Text(TextCommand {
            text: text.to_string(),
            x,
            y,
            origin_x,
            text_width,
            style,
        }));
    }

    /// Text centered across the full page width.
    pub fn draw_centered_text(&mut self, text: &str, y: f64, style: TextStyle) {
        let style = style.boxed(self.page.width, TextAlign::Center);
        self.draw_text(text, 0.0, y, style);
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectCommand> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineCommand> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = &CircleCommand> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Circle(circle) => Some(circle),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextCommand> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text(text) => Some(text),
            _ => None,
        })
    }

    /// First text command whose content equals `text`.
    pub fn find_text(&self, text: &str) -> Option<&TextCommand> {
        self.texts().find(|command| command.text == text)
    }
}

fn assert_coordinate(value: f64, what: &str) {
    assert!(value.is_finite(), "{what} must be finite, got {value}");
}

fn assert_dimension(value: f64, what: &str) {
    assert!(
        value.is_finite() && value >= 0.0,
        "{what} must be finite and non-negative, got {value}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Color = Color::rgb(0, 0, 0);

    #[test]
    fn test_left_aligned_text_keeps_x() {
        let mut canvas = PageCanvas::new(PageSize::A4_PORTRAIT);
        canvas.draw_text("Hello", 50.0, 60.0, TextStyle::new(FontFace::Regular, 10.0, BLACK));
        let text = canvas.find_text("Hello").unwrap();
        assert_eq!(text.origin_x, 50.0);
        assert!((text.text_width - 22.78).abs() < 1e-9);
    }

    #[test]
    fn test_boxed_alignment() {
        let mut canvas = PageCanvas::new(PageSize::A4_PORTRAIT);
        let style = TextStyle::new(FontFace::Regular, 10.0, BLACK);
        canvas.draw_text("Hello", 100.0, 0.0, style.boxed(200.0, TextAlign::Center));
        canvas.draw_text("Hello", 100.0, 20.0, style.boxed(200.0, TextAlign::Right));

        let texts: Vec<_> = canvas.texts().collect();
        assert!((texts[0].origin_x - (100.0 + (200.0 - 22.78) / 2.0)).abs() < 1e-9);
        assert!((texts[1].origin_x - (300.0 - 22.78)).abs() < 1e-9);
    }

    #[test]
    fn test_centered_text_is_symmetric_about_page_center() {
        let mut canvas = PageCanvas::new(PageSize::A4_LANDSCAPE);
        canvas.draw_centered_text("Jean Paul", 240.0, TextStyle::new(FontFace::Bold, 32.0, BLACK));
        let text = canvas.find_text("Jean Paul").unwrap();
        let center = text.origin_x + text.text_width / 2.0;
        assert!((center - PageSize::A4_LANDSCAPE.center_x()).abs() < 1e-9);
    }

    #[test]
    fn test_commands_keep_paint_order() {
        let mut canvas = PageCanvas::new(PageSize::A4_PORTRAIT);
        canvas.draw_rect(0.0, 0.0, 10.0, 10.0, Some(BLACK), None);
        canvas.draw_circle(5.0, 5.0, 2.0, Some(Color::WHITE), None);
        canvas.draw_line(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)], BLACK, 1.0);

        let kinds: Vec<_> = canvas
            .commands()
            .iter()
            .map(|command| match command {
                DrawCommand::Rect(_) => "rect",
                DrawCommand::Line(_) => "line",
                DrawCommand::Circle(_) => "circle",
                DrawCommand::Text(_) => "text",
            })
            .collect();
        assert_eq!(kinds, vec!["rect", "circle", "line"]);
    }

    #[test]
    fn test_line_span() {
        let line = LineCommand {
            points: vec![Point::new(25.0, 65.0), Point::new(25.0, 25.0), Point::new(65.0, 25.0)],
            stroke: Stroke::new(BLACK, 4.0),
        };
        assert_eq!(line.span_x(), (25.0, 65.0));
    }

    #[test]
    #[should_panic(expected = "rect width")]
    fn test_negative_rect_panics() {
        PageCanvas::new(PageSize::A4_PORTRAIT).draw_rect(0.0, 0.0, -1.0, 5.0, Some(BLACK), None);
    }

    #[test]
    #[should_panic(expected = "circle cx")]
    fn test_nan_circle_panics() {
        PageCanvas::new(PageSize::A4_PORTRAIT).draw_circle(f64::NAN, 0.0, 5.0, None, None);
    }

    #[test]
    #[should_panic(expected = "at least two points")]
    fn test_single_point_line_panics() {
        PageCanvas::new(PageSize::A4_PORTRAIT).draw_line(&[Point::new(0.0, 0.0)], BLACK, 1.0);
    }
}
