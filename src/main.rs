use iced::widget::{button, canvas, column, container, pick_list, row, scrollable, slider, text, text_input, Column};
use iced::{Alignment, Color, Element, Length, Task, Theme};
use std::sync::Arc;
use tracing::{error, info};

use copy_stand::config::AppConfig;
use copy_stand::diagram::{LightingDiagram, SensorFitDiagram};
use copy_stand::report;
use copy_stand::sensor::loader::load_registry;
use copy_stand::units::Unit;
use copy_stand::{calculate, Calculation, CalculationInput, SensorRegistry};

mod ui;

use ui::diagram::{LightingView, SensorFitView};

const WARNING_COLOR: Color = Color::from_rgb(0.95, 0.65, 0.2);
const ERROR_COLOR: Color = Color::from_rgb(0.95, 0.35, 0.35);

/// Main application state
struct CopyStand {
    config: AppConfig,
    /// Camera table, `None` until the background load finishes
    registry: Option<Arc<SensorRegistry>>,
    camera: Option<String>,
    focal_length_mm: u32,
    unit: Unit,
    /// Raw text of the numeric fields, parsed on Calculate
    width: String,
    height: String,
    ppi: String,
    radius_multiplier: f64,
    /// Last successful calculation
    result: Option<Calculation>,
    /// Last rejected calculation or load failure
    error: Option<String>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Background camera table load completed
    RegistryLoaded(Result<Arc<SensorRegistry>, String>),
    CameraSelected(String),
    FocalLengthSelected(u32),
    UnitSelected(Unit),
    WidthChanged(String),
    HeightChanged(String),
    PpiChanged(String),
    MultiplierChanged(f64),
    /// User clicked the "Calculate" button
    Calculate,
}

impl CopyStand {
    /// Create the form from the config and start loading the camera table
    fn new(config: AppConfig) -> (Self, Task<Message>) {
        let defaults = config.defaults.clone();
        let cameras_path = config.cameras_path.clone();

        let app = CopyStand {
            camera: defaults.camera,
            focal_length_mm: defaults.focal_length_mm,
            unit: defaults.unit,
            width: format!("{:.2}", defaults.subject_width),
            height: format!("{:.2}", defaults.subject_height),
            ppi: defaults.target_ppi.to_string(),
            radius_multiplier: defaults.radius_multiplier,
            registry: None,
            result: None,
            error: None,
            config,
        };

        let load = Task::perform(load_registry(cameras_path), |result| {
            Message::RegistryLoaded(result.map(Arc::new).map_err(|e| e.to_string()))
        });

        (app, load)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::RegistryLoaded(Ok(registry)) => {
                info!(cameras = registry.len(), "Camera table ready");

                // Keep the configured camera only if the table knows it
                let known = self.camera.as_deref().is_some_and(|name| registry.get(name).is_ok());
                if !known {
                    self.camera = registry.names().next().map(str::to_string);
                }
                self.registry = Some(registry);
            }
            Message::RegistryLoaded(Err(e)) => {
                error!(error = %e, "Failed to load camera table");
                self.error = Some(format!("Could not load camera table: {}", e));
            }
            Message::CameraSelected(name) => self.camera = Some(name),
            Message::FocalLengthSelected(mm) => self.focal_length_mm = mm,
            Message::UnitSelected(unit) => self.unit = unit,
            Message::WidthChanged(value) => self.width = value,
            Message::HeightChanged(value) => self.height = value,
            Message::PpiChanged(value) => self.ppi = value,
            Message::MultiplierChanged(value) => self.radius_multiplier = value,
            Message::Calculate => self.run_calculation(),
        }

        Task::none()
    }

    fn run_calculation(&mut self) {
        let Some(registry) = self.registry.clone() else {
            self.error = Some("Camera table is still loading".to_string());
            return;
        };

        let outcome = self
            .input()
            .and_then(|input| calculate(&registry, &input, &self.config.placement).map_err(|e| e.to_string()));

        match outcome {
            Ok(calc) => {
                for warning in calc.warnings() {
                    info!(%warning, "Calculation warning");
                }
                self.result = Some(calc);
                self.error = None;
            }
            Err(e) => {
                error!(error = %e, "Calculation rejected");
                self.result = None;
                self.error = Some(e);
            }
        }
    }

    /// Collect the form into an engine request
    fn input(&self) -> Result<CalculationInput, String> {
        let sensor_id = self.camera.clone().ok_or("Select a camera body / digital back")?;
        let subject_width = parse_field("Object width", &self.width)?;
        let subject_height = parse_field("Object height", &self.height)?;
        let target_ppi = parse_field("Resolution (ppi)", &self.ppi)?;

        Ok(CalculationInput {
            sensor_id,
            subject_width,
            subject_height,
            subject_unit: self.unit.to_string(),
            target_ppi,
            focal_length_mm: self.focal_length_mm as f64,
            radius_multiplier: self.radius_multiplier,
        })
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let camera_names: Vec<String> = self
            .registry
            .as_ref()
            .map(|registry| registry.names().map(str::to_string).collect())
            .unwrap_or_default();

        let form: Column<Message> = column![
            text("Camera body / digital back"),
            pick_list(camera_names, self.camera.clone(), Message::CameraSelected)
                .placeholder("Loading cameras..."),
            text("Lens focal length"),
            pick_list(
                self.config.focal_lengths.as_slice(),
                Some(self.focal_length_mm),
                Message::FocalLengthSelected,
            ),
            text("Unit of measurement"),
            pick_list(Unit::ALL, Some(self.unit), Message::UnitSelected),
            text("Object width"),
            text_input("10.00", &self.width).on_input(Message::WidthChanged),
            text("Object height"),
            text_input("8.00", &self.height).on_input(Message::HeightChanged),
            text("Resolution (ppi)"),
            text_input("300", &self.ppi).on_input(Message::PpiChanged),
            text(format!("Light coverage: {:.2}", self.radius_multiplier)),
            slider(1.0..=2.0, self.radius_multiplier, Message::MultiplierChanged).step(0.01),
            button("Calculate").on_press(Message::Calculate).padding(10),
        ]
        .spacing(8)
        .padding(20)
        .width(Length::Fixed(300.0));

        let mut results: Column<Message> = column![
            text("Distance and Resolution").size(32),
            text("Calculate resolution, sensor usage, and camera and lighting distances for flat art / copywork setups."),
        ]
        .spacing(16)
        .padding(20);

        if let Some(e) = &self.error {
            results = results.push(text(e).color(ERROR_COLOR));
        }

        if let Some(calc) = &self.result {
            results = results.push(results_view(calc));
        }

        row![form, scrollable(results).width(Length::Fill)]
            .align_y(Alignment::Start)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Warnings, summaries and diagrams for one calculation
fn results_view(calc: &Calculation) -> Element<'_, Message> {
    let warnings = calc
        .warnings()
        .into_iter()
        .fold(Column::new().spacing(4), |col, warning| {
            col.push(text(warning.to_string()).color(WARNING_COLOR))
        });

    let sensor_fit = canvas(SensorFitView {
        diagram: SensorFitDiagram::from_calculation(calc),
    })
    .width(Length::Fill)
    .height(Length::Fixed(240.0));

    let lighting = canvas(LightingView {
        diagram: LightingDiagram::from_calculation(calc),
    })
    .width(Length::Fill)
    .height(Length::Fixed(360.0));

    column![
        warnings,
        row![
            container(text(report::resolution_summary(calc))).width(Length::FillPortion(1)),
            container(sensor_fit).width(Length::FillPortion(1)),
        ]
        .spacing(20),
        row![
            container(text(report::setup_summary(calc))).width(Length::FillPortion(1)),
            container(lighting).width(Length::FillPortion(1)),
        ]
        .spacing(20),
    ]
    .spacing(20)
    .into()
}

fn parse_field<T: std::str::FromStr>(label: &str, value: &str) -> Result<T, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("{} must be a number, got {:?}", label, value))
}

fn main() -> iced::Result {
    copy_stand::logging::init();

    let config = AppConfig::load();
    info!(?config, "Starting copy stand calculator");

    iced::application("Copy Stand Calculator", CopyStand::update, CopyStand::view)
        .theme(CopyStand::theme)
        .centered()
        .run_with(move || CopyStand::new(config))
}
