use std::collections::BTreeMap;

use tracing::info;

use super::Sensor;
use crate::error::{CalcError, CalcResult};

/// Camera table compiled into the binary
const EMBEDDED_CAMERAS: &str = include_str!("../../data/cameras.json");

/// Read-only table of camera bodies / digital backs keyed by display name
///
/// The table is built once at startup and only looked up afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorRegistry {
    sensors: BTreeMap<String, Sensor>,
}

impl SensorRegistry {
    /// Parse a camera table from JSON
    ///
    /// The expected shape is an object mapping camera names to sensors:
    /// `{"Nikon D850": {"sensor_w_mm": 35.9, "sensor_h_mm": 23.9, ...}}`.
    /// Every entry is validated so a bad row fails the whole load.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let sensors: BTreeMap<String, Sensor> = serde_json::from_str(json)?;
        for sensor in sensors.values() {
            sensor.validate()?;
        }

        info!(count = sensors.len(), "Loaded camera table");
        Ok(Self { sensors })
    }

    /// The camera table shipped with the application
    pub fn embedded() -> CalcResult<Self> {
        Self::from_json(EMBEDDED_CAMERAS)
    }

    /// Look up a sensor by camera name
    pub fn get(&self, name: &str) -> CalcResult<&Sensor> {
        self.sensors
            .get(name)
            .ok_or_else(|| CalcError::UnknownSensor(name.to_string()))
    }

    /// Camera names in display order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sensors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}
