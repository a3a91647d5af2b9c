//! PDF backend - encodes a recorded page into a single-page PDF using `lopdf`.
//!
//! Canvas coordinates are top-left based; PDF user space is bottom-left
//! based, so every y coordinate is flipped against the page height here and
//! nowhere else. Text uses the standard Helvetica faces with WinAnsi
//! encoding, so no font data is embedded.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use super::canvas::{
    CircleCommand, Color, DrawCommand, LineCommand, PageCanvas, RectCommand, Stroke, TextCommand,
};
use super::common::encode_win_ansi;
use super::metrics::FontFace;
use super::DocumentError;

const PDF_VERSION: &str = "1.7";
const PRODUCER: &str = "academy-docgen";
/// Control-point distance for approximating a quarter circle with a cubic Bézier.
const KAPPA: f64 = 0.552_284_749_8;
/// Height of the clip box around clipped text, relative to font size.
const CLIP_LINE_FACTOR: f64 = 1.2;

/// Encode `canvas` as a complete PDF file.
pub fn render_page(canvas: &PageCanvas, title: &str) -> Result<Vec<u8>, DocumentError> {
    let page = canvas.page();
    let mut doc = Document::with_version(PDF_VERSION);

    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(font_dictionary(FontFace::Regular));
    let bold_id = doc.add_object(font_dictionary(FontFace::Bold));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FontFace::Regular.resource_name() => regular_id,
            FontFace::Bold.resource_name() => bold_id,
        },
    });

    let content = Content {
        operations: content_operations(canvas),
    };
    let encoded = content
        .encode()
        .map_err(|err| DocumentError::Encode(err.to_string()))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![real(0.0), real(0.0), real(page.width), real(page.height)],
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1_i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(encode_win_ansi(title), StringFormat::Literal),
        "Producer" => Object::string_literal(PRODUCER),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|err| DocumentError::Encode(err.to_string()))?;

    log::debug!(
        "Encoded {} draw commands into {} PDF bytes",
        canvas.commands().len(),
        output.len()
    );

    Ok(output)
}

fn font_dictionary(face: FontFace) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => face.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Translate the display list into content stream operators, in paint order.
pub fn content_operations(canvas: &PageCanvas) -> Vec<Operation> {
    let height = canvas.page().height;
    let mut ops = Vec::new();

    for command in canvas.commands() {
        ops.push(Operation::new("q", vec![]));
        match command {
            DrawCommand::Rect(rect) => rect_ops(rect, height, &mut ops),
            DrawCommand::Line(line) => line_ops(line, height, &mut ops),
            DrawCommand::Circle(circle) => circle_ops(circle, height, &mut ops),
            DrawCommand::Text(text) => text_ops(text, height, &mut ops),
        }
        ops.push(Operation::new("Q", vec![]));
    }

    ops
}

fn rect_ops(rect: &RectCommand, height: f64, ops: &mut Vec<Operation>) {
    if !paint_style(rect.fill, rect.stroke, ops) {
        return;
    }
    ops.push(Operation::new(
        "re",
        vec![
            real(rect.x),
            real(height - rect.y - rect.height),
            real(rect.width),
            real(rect.height),
        ],
    ));
    ops.push(paint_operator(rect.fill, rect.stroke));
}

fn line_ops(line: &LineCommand, height: f64, ops: &mut Vec<Operation>) {
    set_stroke(line.stroke, ops);
    for (i, point) in line.points.iter().enumerate() {
        let operator = if i == 0 { "m" } else { "l" };
        ops.push(Operation::new(
            operator,
            vec![real(point.x), real(height - point.y)],
        ));
    }
    ops.push(Operation::new("S", vec![]));
}

fn circle_ops(circle: &CircleCommand, height: f64, ops: &mut Vec<Operation>) {
    if !paint_style(circle.fill, circle.stroke, ops) {
        return;
    }

    let cx = circle.cx;
    let cy = height - circle.cy;
    let r = circle.radius;
    let k = r * KAPPA;

    ops.push(Operation::new("m", vec![real(cx + r), real(cy)]));
    for segment in [
        [cx + r, cy + k, cx + k, cy + r, cx, cy + r],
        [cx - k, cy + r, cx - r, cy + k, cx - r, cy],
        [cx - r, cy - k, cx - k, cy - r, cx, cy - r],
        [cx + k, cy - r, cx + r, cy - k, cx + r, cy],
    ] {
        ops.push(Operation::new("c", segment.iter().copied().map(real).collect()));
    }
    ops.push(Operation::new("h", vec![]));
    ops.push(paint_operator(circle.fill, circle.stroke));
}

fn text_ops(text: &TextCommand, height: f64, ops: &mut Vec<Operation>) {
    let style = &text.style;

    if let (true, Some(width)) = (style.clip, style.width) {
        let box_height = style.size * CLIP_LINE_FACTOR;
        ops.push(Operation::new(
            "re",
            vec![
                real(text.x),
                real(height - text.y - box_height),
                real(width),
                real(box_height),
            ],
        ));
        ops.push(Operation::new("W", vec![]));
        ops.push(Operation::new("n", vec![]));
    }

    set_fill(style.color, ops);
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![style.font.resource_name().into(), real(style.size)],
    ));
    ops.push(Operation::new(
        "Td",
        vec![
            real(text.origin_x),
            real(height - text.y - style.font.ascent(style.size)),
        ],
    ));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(
            encode_win_ansi(&text.text),
            StringFormat::Literal,
        )],
    ));
    ops.push(Operation::new("ET", vec![]));
}

/// Emit color state for a shape; false when there is nothing to paint.
fn paint_style(fill: Option<Color>, stroke: Option<Stroke>, ops: &mut Vec<Operation>) -> bool {
    if let Some(color) = fill {
        set_fill(color, ops);
    }
    if let Some(stroke) = stroke {
        set_stroke(stroke, ops);
    }
    fill.is_some() || stroke.is_some()
}

fn paint_operator(fill: Option<Color>, stroke: Option<Stroke>) -> Operation {
    let operator = match (fill.is_some(), stroke.is_some()) {
        (true, true) => "B",
        (true, false) => "f",
        _ => "S",
    };
    Operation::new(operator, vec![])
}

fn set_fill(color: Color, ops: &mut Vec<Operation>) {
    ops.push(Operation::new("rg", color_operands(color)));
}

fn set_stroke(stroke: Stroke, ops: &mut Vec<Operation>) {
    ops.push(Operation::new("RG", color_operands(stroke.color)));
    ops.push(Operation::new("w", vec![real(stroke.width)]));
}

fn color_operands(color: Color) -> Vec<Object> {
    color.unit_components().into_iter().map(real).collect()
}

fn real(value: f64) -> Object {
    Object::from(value)
}
