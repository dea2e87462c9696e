// Copyright 2025 the Tandem Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG output for pictures.
//!
//! This is intended for exporting snapshots and report pages, not for
//! pixel-perfect rendering:
//! - Only solid brushes are supported; other brushes fall back to black.
//! - Nested pictures are flattened, with their transforms composed into
//!   each element's `transform` attribute.
//! - Text is emitted as `<text>` elements in a generic sans-serif font.

use alloc::format;
use alloc::string::String;
use core::fmt::{self, Write as _};

use kurbo::{Affine, BezPath, Cap, Join, PathEl, Rect, Stroke};
use peniko::{Brush, Color};

use crate::{DrawOp, PaintOp, Picture, StateOp};

/// Renders a picture as a standalone SVG document.
///
/// The picture's native size becomes the SVG `width`/`height` and
/// `viewBox="0 0 width height"`.
#[must_use]
pub fn to_svg(picture: &Picture) -> String {
    let mut writer = SvgWriter::default();
    writer.write_ops(picture.ops(), Affine::IDENTITY);

    let width = Num(picture.size().width);
    let height = Num(picture.size().height);
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    );
    if !writer.defs.is_empty() {
        svg.push_str("<defs>");
        svg.push_str(&writer.defs);
        svg.push_str("</defs>");
    }
    svg.push_str(&writer.body);
    svg.push_str("</svg>");
    svg
}

#[derive(Clone, Debug)]
struct SvgState {
    transform: Affine,
    brush: Option<Brush>,
    stroke: Option<Stroke>,
}

impl SvgState {
    fn new(transform: Affine) -> Self {
        Self {
            transform,
            brush: None,
            stroke: None,
        }
    }
}

#[derive(Default)]
struct SvgWriter {
    defs: String,
    body: String,
    clip_counter: u64,
}

enum PaintKind {
    Fill,
    Stroke,
}

impl SvgWriter {
    fn write_ops(&mut self, ops: &[PaintOp], base: Affine) {
        let mut state = SvgState::new(base);
        let mut open_clips = 0_usize;

        for op in ops {
            match op {
                PaintOp::State(state_op) => match state_op {
                    StateOp::SetTransform(xf) => state.transform = base * *xf,
                    StateOp::SetBrush(brush) => state.brush = Some(brush.clone()),
                    StateOp::SetStroke(stroke) => state.stroke = Some(stroke.clone()),
                    StateOp::PushClip(rect) => {
                        self.clip_counter += 1;
                        let id = self.clip_counter;
                        let _ = write!(
                            self.defs,
                            "<clipPath id=\"clip{id}\" clipPathUnits=\"userSpaceOnUse\">"
                        );
                        write_shape(&mut self.defs, Shape::Rect(*rect), state.transform, None);
                        self.defs.push_str("</clipPath>");
                        let _ = write!(self.body, "<g clip-path=\"url(#clip{id})\">");
                        open_clips += 1;
                    }
                    StateOp::PopClip => {
                        if open_clips > 0 {
                            open_clips -= 1;
                            self.body.push_str("</g>");
                        }
                    }
                },
                PaintOp::Draw(draw_op) => self.write_draw_op(draw_op, &state),
            }
        }

        for _ in 0..open_clips {
            self.body.push_str("</g>");
        }
    }

    fn write_draw_op(&mut self, op: &DrawOp, state: &SvgState) {
        let (shape, kind) = match op {
            DrawOp::FillRect(rect) => (Shape::Rect(*rect), PaintKind::Fill),
            DrawOp::StrokeRect(rect) => (Shape::Rect(*rect), PaintKind::Stroke),
            DrawOp::FillPath(path) => (Shape::Path(path), PaintKind::Fill),
            DrawOp::StrokePath(path) => (Shape::Path(path), PaintKind::Stroke),
            DrawOp::Text { origin, text, size } => {
                let _ = write!(
                    self.body,
                    "<text x=\"{}\" y=\"{}\" font-family=\"sans-serif\" font-size=\"{}\"",
                    Num(origin.x),
                    Num(origin.y),
                    Num(*size),
                );
                SolidPaint::of(state.brush.as_ref()).write(&mut self.body, "fill");
                write_transform(&mut self.body, state.transform);
                self.body.push('>');
                write_escaped(&mut self.body, text);
                self.body.push_str("</text>");
                return;
            }
            DrawOp::Picture { picture, transform } => {
                self.write_ops(picture.ops(), state.transform * *transform);
                return;
            }
        };
        write_shape(&mut self.body, shape, state.transform, Some((state, kind)));
    }
}

enum Shape<'a> {
    Rect(Rect),
    Path(&'a BezPath),
}

/// Writes one self-closing element, painted from `style` when given.
fn write_shape(
    out: &mut String,
    shape: Shape<'_>,
    transform: Affine,
    style: Option<(&SvgState, PaintKind)>,
) {
    match shape {
        Shape::Rect(rect) => {
            let rect = rect.abs();
            let _ = write!(
                out,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
                Num(rect.x0),
                Num(rect.y0),
                Num(rect.width()),
                Num(rect.height()),
            );
        }
        Shape::Path(path) => {
            out.push_str("<path d=\"");
            write_path_data(out, path);
            out.push('"');
        }
    }
    write_transform(out, transform);
    if let Some((state, kind)) = style {
        let paint = SolidPaint::of(state.brush.as_ref());
        match kind {
            PaintKind::Fill => {
                paint.write(out, "fill");
                out.push_str(" stroke=\"none\"");
            }
            PaintKind::Stroke => {
                out.push_str(" fill=\"none\"");
                paint.write(out, "stroke");
                if let Some(stroke) = &state.stroke {
                    write_stroke_style(out, stroke);
                }
            }
        }
    }
    out.push_str("/>");
}

/// Opaque RGB plus alpha, resolved from the current brush.
///
/// Only solid brushes map to a color; anything else paints black.
struct SolidPaint {
    rgb: [u8; 3],
    alpha: u8,
}

impl SolidPaint {
    fn of(brush: Option<&Brush>) -> Self {
        let color = match brush {
            Some(Brush::Solid(color)) => *color,
            _ => Color::BLACK,
        };
        let rgba = color.to_rgba8();
        Self {
            rgb: [rgba.r, rgba.g, rgba.b],
            alpha: rgba.a,
        }
    }

    /// Writes `attr="#rrggbb"`, followed by `attr-opacity` when translucent.
    fn write(&self, out: &mut String, attr: &str) {
        let [r, g, b] = self.rgb;
        let _ = write!(out, " {attr}=\"#{r:02x}{g:02x}{b:02x}\"");
        if self.alpha < u8::MAX {
            let opacity = f64::from(self.alpha) / f64::from(u8::MAX);
            let _ = write!(out, " {attr}-opacity=\"{}\"", Num(opacity));
        }
    }
}

fn write_stroke_style(out: &mut String, stroke: &Stroke) {
    let cap = match stroke.start_cap {
        Cap::Butt => "butt",
        Cap::Round => "round",
        Cap::Square => "square",
    };
    let join = match stroke.join {
        Join::Miter => "miter",
        Join::Round => "round",
        Join::Bevel => "bevel",
    };
    let _ = write!(
        out,
        " stroke-width=\"{}\" stroke-linecap=\"{cap}\" stroke-linejoin=\"{join}\"",
        Num(stroke.width),
    );
    if let Some((first, rest)) = stroke.dash_pattern.split_first() {
        let _ = write!(out, " stroke-dasharray=\"{}", Num(*first));
        for dash in rest {
            let _ = write!(out, " {}", Num(*dash));
        }
        out.push('"');
    }
}

fn write_transform(out: &mut String, transform: Affine) {
    if transform == Affine::IDENTITY {
        return;
    }
    let [a, b, c, d, e, f] = transform.as_coeffs().map(Num);
    let _ = write!(out, " transform=\"matrix({a} {b} {c} {d} {e} {f})\"");
}

fn write_path_data(out: &mut String, path: &BezPath) {
    for el in path.elements() {
        let (cmd, points) = match *el {
            PathEl::MoveTo(p) => ('M', [Some(p), None, None]),
            PathEl::LineTo(p) => ('L', [Some(p), None, None]),
            PathEl::QuadTo(p1, p2) => ('Q', [Some(p1), Some(p2), None]),
            PathEl::CurveTo(p1, p2, p3) => ('C', [Some(p1), Some(p2), Some(p3)]),
            PathEl::ClosePath => ('Z', [None; 3]),
        };
        out.push(cmd);
        for (i, p) in points.into_iter().flatten().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{} {}", Num(p.x), Num(p.y));
        }
    }
}

fn write_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

/// Number formatted with at most three decimals and no trailing zeros.
struct Num(f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if !v.is_finite() {
            return write!(f, "{v}");
        }
        let fixed = format!("{v:.3}");
        let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
        f.write_str(if trimmed == "-0" { "0" } else { trimmed })
    }
}
