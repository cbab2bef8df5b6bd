//! Canvas views for the setup diagrams
//!
//! Strokes the geometry from `copy_stand::diagram`, scaled to fit the canvas
//! with the y axis pointing up.
use iced::alignment;
use iced::widget::canvas::{self, LineDash, Path, Stroke};
use iced::{mouse, Color, Pixels, Point, Rectangle, Renderer, Size, Theme};

use copy_stand::diagram::{Bounds, LightingDiagram, LineStyle, Rect, SensorFitDiagram};

use crate::Message;

/// Empty space kept around a diagram (px)
const PADDING: f32 = 16.0;

const DASH: [f32; 2] = [6.0, 4.0];
const DOT: [f32; 2] = [1.5, 3.0];

const SENSOR_FILL: Color = Color::from_rgb(0.68, 0.85, 0.9);
const SENSOR_EDGE: Color = Color::from_rgb(1.0, 0.0, 0.0);
const SUBJECT_FILL: Color = Color::WHITE;
const SUBJECT_EDGE: Color = Color::from_rgb(0.0, 0.0, 1.0);

/// Maps diagram units onto canvas pixels, preserving aspect ratio
struct Viewport {
    scale: f32,
    origin: Point,
    world: Bounds,
}

impl Viewport {
    fn fit(world: Bounds, size: Size) -> Self {
        let available = Size::new(
            (size.width - 2.0 * PADDING).max(1.0),
            (size.height - 2.0 * PADDING).max(1.0),
        );
        let world_w = world.width().max(f64::EPSILON) as f32;
        let world_h = world.height().max(f64::EPSILON) as f32;
        let scale = (available.width / world_w).min(available.height / world_h);

        // Center the scaled diagram in the available area
        let origin = Point::new(
            PADDING + (available.width - world_w * scale) / 2.0,
            PADDING + (available.height - world_h * scale) / 2.0,
        );

        Self { scale, origin, world }
    }

    fn point(&self, p: cgmath::Point2<f64>) -> Point {
        Point::new(
            self.origin.x + (p.x - self.world.min.x) as f32 * self.scale,
            self.origin.y + (self.world.max.y - p.y) as f32 * self.scale,
        )
    }

    fn rect(&self, rect: &Rect) -> Path {
        // Canvas rectangles are anchored top-left, diagram ones bottom-left
        let top_left = self.point(cgmath::Point2::new(rect.origin.x, rect.origin.y + rect.height));
        Path::rectangle(
            top_left,
            Size::new(rect.width as f32 * self.scale, rect.height as f32 * self.scale),
        )
    }
}

fn stroke_for(style: LineStyle, color: Color) -> Stroke<'static> {
    let stroke = Stroke::default().with_color(color).with_width(1.5);
    let segments: &'static [f32] = match style {
        LineStyle::Solid => return stroke,
        LineStyle::Dashed => &DASH,
        LineStyle::Dotted => &DOT,
    };
    Stroke {
        line_dash: LineDash { segments, offset: 0 },
        ..stroke
    }
}

/// Subject projection on the sensor
#[derive(Debug, Clone)]
pub struct SensorFitView {
    pub diagram: SensorFitDiagram,
}

impl canvas::Program<Message> for SensorFitView {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let view = Viewport::fit(self.diagram.bounds(), bounds.size());

        let sensor = view.rect(&self.diagram.sensor);
        frame.fill(&sensor, SENSOR_FILL);
        frame.stroke(&sensor, Stroke::default().with_color(SENSOR_EDGE).with_width(1.5));

        let subject = view.rect(&self.diagram.subject);
        frame.fill(&subject, SUBJECT_FILL);
        frame.stroke(&subject, Stroke::default().with_color(SUBJECT_EDGE).with_width(1.5));

        vec![frame.into_geometry()]
    }
}

/// Camera and light layout around the artwork
#[derive(Debug, Clone)]
pub struct LightingView {
    pub diagram: LightingDiagram,
}

impl canvas::Program<Message> for LightingView {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let world = self.diagram.bounds();
        let view = Viewport::fit(world, bounds.size());
        let ink = theme.palette().text;

        let artwork = view.rect(&self.diagram.artwork);
        frame.fill(&artwork, SENSOR_FILL);
        frame.stroke(&artwork, Stroke::default().with_color(SUBJECT_EDGE).with_width(1.5));

        // Subject plane
        let plane = Path::line(
            view.point(cgmath::Point2::new(world.min.x, 0.0)),
            view.point(cgmath::Point2::new(world.max.x, 0.0)),
        );
        frame.stroke(&plane, Stroke::default().with_color(ink).with_width(1.0));

        for segment in &self.diagram.segments {
            let path = Path::line(view.point(segment.from), view.point(segment.to));
            frame.stroke(&path, stroke_for(segment.style, ink));
        }

        for label in &self.diagram.labels {
            frame.fill_text(canvas::Text {
                content: label.text.clone(),
                position: view.point(label.position),
                color: ink,
                size: Pixels(12.0),
                horizontal_alignment: alignment::Horizontal::Center,
                vertical_alignment: alignment::Vertical::Bottom,
                ..canvas::Text::default()
            });
        }

        vec![frame.into_geometry()]
    }
}
