//! Presentation widgets
//!
//! Canvas programs that draw the sensor fit and lighting diagrams.

pub mod diagram;
