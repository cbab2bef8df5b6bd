//! Schematic geometry for the two setup diagrams
//!
//! Only numbers live here: rectangles, segments and labels in world units.
//! Drawing them (canvas, plot, SVG, ...) is up to the caller.
//!
//! - Sensor fit: millimeters, origin at the sensor's lower left corner
//! - Lighting: inches, x along the subject, y away from the subject plane,
//!   origin at the center of the subject's top edge

use cgmath::Point2;

use crate::calc::Calculation;

/// Stroke pattern for a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

/// Axis-aligned rectangle anchored at its lower left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Point2<f64>,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point2::new(x, y),
            width,
            height,
        }
    }

    pub fn max(&self) -> Point2<f64> {
        Point2::new(self.origin.x + self.width, self.origin.y + self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point2<f64>,
    pub to: Point2<f64>,
    pub style: LineStyle,
}

impl Segment {
    fn new(from: (f64, f64), to: (f64, f64), style: LineStyle) -> Self {
        Self {
            from: Point2::new(from.0, from.1),
            to: Point2::new(to.0, to.1),
            style,
        }
    }
}

/// Text anchored by its bottom center
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub position: Point2<f64>,
    pub text: String,
}

/// Bounding box of a diagram, used to fit it to a drawing area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl Bounds {
    fn around(points: impl IntoIterator<Item = Point2<f64>>) -> Self {
        let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Self { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// The subject's projection centered on the sensor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorFitDiagram {
    pub sensor: Rect,
    pub subject: Rect,
}

impl SensorFitDiagram {
    pub fn new(sensor_w_mm: f64, sensor_h_mm: f64, projected_w_mm: f64, projected_h_mm: f64) -> Self {
        Self {
            sensor: Rect::new(0.0, 0.0, sensor_w_mm, sensor_h_mm),
            subject: Rect::new(
                sensor_w_mm / 2.0 - projected_w_mm / 2.0,
                sensor_h_mm / 2.0 - projected_h_mm / 2.0,
                projected_w_mm,
                projected_h_mm,
            ),
        }
    }

    pub fn from_calculation(calc: &Calculation) -> Self {
        Self::new(
            calc.sensor.width_mm,
            calc.sensor.height_mm,
            calc.framing.projected_width_mm,
            calc.framing.projected_height_mm,
        )
    }

    /// The sensor area; an oversized subject is clipped to it
    pub fn bounds(&self) -> Bounds {
        Bounds {
            min: self.sensor.origin,
            max: self.sensor.max(),
        }
    }
}

/// Top-down view of artwork, camera, field of view and lights
#[derive(Debug, Clone, PartialEq)]
pub struct LightingDiagram {
    pub artwork: Rect,
    pub segments: Vec<Segment>,
    pub labels: Vec<Label>,
}

impl LightingDiagram {
    pub fn from_calculation(calc: &Calculation) -> Self {
        let lighting = &calc.lighting;
        Self::new(
            calc.subject.width,
            calc.subject.height,
            calc.distance_inches,
            calc.frame_width_in,
            lighting.coverage_radius,
            lighting.light1,
        )
    }

    /// Lay out the diagram; `light` is the right-hand light, the left one mirrors it
    pub fn new(
        subject_width: f64,
        subject_height: f64,
        distance: f64,
        frame_width: f64,
        radius: f64,
        light: Point2<f64>,
    ) -> Self {
        let artwork = Rect::new(-subject_width / 2.0, -subject_height, subject_width, subject_height);
        let half_frame = frame_width / 2.0;

        let mut segments = vec![
            // Camera axis and field of view
            Segment::new((0.0, 0.0), (0.0, distance), LineStyle::Solid),
            Segment::new((half_frame, 0.0), (0.0, distance), LineStyle::Dashed),
            Segment::new((-half_frame, 0.0), (0.0, distance), LineStyle::Dashed),
        ];

        for side in [1.0, -1.0] {
            let x = light.x * side;
            let r = radius * side;
            segments.push(Segment::new((0.0, 0.0), (x, light.y), LineStyle::Solid));
            segments.push(Segment::new((r, 0.0), (x, light.y), LineStyle::Dashed));
            // Reflection of the beam edge off the artwork
            segments.push(Segment::new((r, 0.0), (r - (x - r), light.y), LineStyle::Dotted));
        }

        let labels = vec![
            Label {
                position: Point2::new(0.0, distance),
                text: "camera".to_string(),
            },
            Label {
                position: Point2::new(light.x, light.y * 1.025),
                text: "light".to_string(),
            },
            Label {
                position: Point2::new(-light.x, light.y * 1.025),
                text: "light".to_string(),
            },
        ];

        Self {
            artwork,
            segments,
            labels,
        }
    }

    /// Box containing the artwork, every segment and every label anchor
    pub fn bounds(&self) -> Bounds {
        let corners = [self.artwork.origin, self.artwork.max()];
        let ends = self.segments.iter().flat_map(|s| [s.from, s.to]);
        let anchors = self.labels.iter().map(|l| l.position);
        Bounds::around(corners.into_iter().chain(ends).chain(anchors))
    }
}
