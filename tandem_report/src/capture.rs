// Copyright 2025 the Tandem Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capturing snapshots of the current visual state.

use std::sync::Arc;

use kurbo::{Affine, BezPath, Point, Size, Stroke};
use peniko::{Brush, Color};
use tandem_nav::GuideMarker;
use tandem_picture::{Canvas, CanvasExt, DrawOp, Picture, Recorder, StateOp};
use tandem_view::{Viewport, ViewportId, ViewportSet};

/// Paints a scene into any canvas at a requested pixel size.
///
/// The same painter serves live rendering, file export, and snapshot
/// capture.
pub trait ScenePainter {
    /// Paints the scene scaled to fill `size`, with the origin at the
    /// canvas' top-left corner.
    fn paint(&self, canvas: &mut dyn Canvas, size: Size);
}

/// Records `painter` at `size` into an immutable picture.
///
/// Runs synchronously to completion.
pub fn capture(painter: &(impl ScenePainter + ?Sized), size: Size) -> Picture {
    let mut recorder = Recorder::new(size);
    painter.paint(&mut recorder, size);
    let picture = recorder.finish();
    log::debug!(
        "captured {}x{} snapshot with {} ops",
        size.width,
        size.height,
        picture.ops().len()
    );
    picture
}

/// A data series drawn as a polyline in one viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    /// Viewport the series belongs to.
    pub viewport: ViewportId,
    /// Points in plot coordinates.
    pub points: Arc<[Point]>,
    /// Line color.
    pub color: Color,
}

impl Series {
    /// Creates a series.
    pub fn new(viewport: ViewportId, points: impl Into<Arc<[Point]>>, color: Color) -> Self {
        Self {
            viewport,
            points: points.into(),
            color,
        }
    }
}

/// Colors and widths used by [`ViewportPainter`].
#[derive(Clone, Debug, PartialEq)]
pub struct PlotStyle {
    /// Fill behind every viewport.
    pub background: Color,
    /// Viewport frame color.
    pub frame: Color,
    /// Guide marker color.
    pub guide: Color,
    /// Series line width in device pixels.
    pub line_width: f64,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            frame: Color::from_rgba8(0x40, 0x40, 0x40, 0xff),
            guide: Color::from_rgba8(0x00, 0x00, 0xff, 0xff),
            line_width: 1.5,
        }
    }
}

/// Paints the viewports of a set: background, series, frame, and guides.
///
/// The union of the viewport bounds is mapped onto the requested size, so
/// capturing at a different size than the on-screen layout stretches the
/// whole scene.
#[derive(Debug)]
pub struct ViewportPainter<'a> {
    set: &'a ViewportSet,
    series: &'a [Series],
    guides: Vec<GuideMarker>,
    style: PlotStyle,
}

impl<'a> ViewportPainter<'a> {
    /// Creates a painter over `set` drawing `series`.
    #[must_use]
    pub fn new(set: &'a ViewportSet, series: &'a [Series]) -> Self {
        Self {
            set,
            series,
            guides: Vec::new(),
            style: PlotStyle::default(),
        }
    }

    /// Also paints the given selection guides.
    #[must_use]
    pub fn with_guides<'g>(mut self, guides: impl IntoIterator<Item = &'g GuideMarker>) -> Self {
        self.guides = guides.into_iter().cloned().collect();
        self
    }

    /// Replaces the style.
    #[must_use]
    pub fn with_style(mut self, style: PlotStyle) -> Self {
        self.style = style;
        self
    }

    fn paint_viewport(&self, canvas: &mut dyn Canvas, vp: &Viewport) {
        let bounds = vp.bounds();
        canvas.state(StateOp::SetBrush(Brush::Solid(self.style.background)));
        canvas.draw(DrawOp::FillRect(bounds));

        canvas.with_clip(bounds, |c| {
            c.state(StateOp::SetStroke(Stroke::new(self.style.line_width)));
            for series in self.series.iter().filter(|s| s.viewport == vp.id()) {
                let Some(path) = polyline(vp, &series.points) else {
                    continue;
                };
                c.state(StateOp::SetBrush(Brush::Solid(series.color)));
                c.draw(DrawOp::StrokePath(path));
            }

            c.state(StateOp::SetStroke(Stroke::new(1.0)));
            c.state(StateOp::SetBrush(Brush::Solid(self.style.guide)));
            for guide in self.guides.iter().filter(|g| g.target() == vp.id()) {
                let line = guide.line();
                let mut path = BezPath::new();
                path.move_to(line.p0);
                path.line_to(line.p1);
                c.draw(DrawOp::StrokePath(path));
            }
        });

        canvas.state(StateOp::SetStroke(Stroke::new(1.0)));
        canvas.state(StateOp::SetBrush(Brush::Solid(self.style.frame)));
        canvas.draw(DrawOp::StrokeRect(bounds));
    }
}

impl ScenePainter for ViewportPainter<'_> {
    fn paint(&self, canvas: &mut dyn Canvas, size: Size) {
        let Some(scene) = self.set.bounds() else {
            return;
        };
        if scene.width() <= 0.0 || scene.height() <= 0.0 {
            return;
        }
        let transform = Affine::scale_non_uniform(
            size.width / scene.width(),
            size.height / scene.height(),
        ) * Affine::translate(-scene.origin().to_vec2());

        canvas.with_transform(transform, Affine::IDENTITY, |c| {
            c.with_clip(scene, |c| {
                for vp in self.set.iter() {
                    self.paint_viewport(c, vp);
                }
            });
        });
    }
}

/// Maps plot-space points to a device-space path, or `None` for fewer than
/// two points.
fn polyline(vp: &Viewport, points: &[Point]) -> Option<BezPath> {
    let (first, rest) = points.split_first()?;
    if rest.is_empty() {
        return None;
    }
    let mut path = BezPath::new();
    path.move_to(vp.coords_to_pixel(*first));
    for p in rest {
        path.line_to(vp.coords_to_pixel(*p));
    }
    Some(path)
}
