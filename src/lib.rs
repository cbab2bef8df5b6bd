//! Copy stand calculator
//!
//! Works out camera distance, sensor usage, achievable resolution and key
//! light placement for flat art / copywork setups from a sensor, a lens,
//! the artwork size and a target resolution.
//!
//! The engine is made of pure functions over small value types:
//! - `units` / `format`: length conversion and display
//! - `sensor`: sensor description and camera table
//! - `calc`: framing, distance and lighting, plus the `calculate` entrypoint
//! - `diagram` / `report`: geometry and text for the presentation layer

pub mod calc;
pub mod config;
pub mod diagram;
pub mod error;
pub mod format;
pub mod logging;
pub mod report;
pub mod sensor;
pub mod units;

pub use calc::{calculate, Calculation, CalculationInput, Warning};
pub use error::{CalcError, CalcResult};
pub use sensor::registry::SensorRegistry;
pub use sensor::Sensor;
