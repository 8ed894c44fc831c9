//! Sweat glucose dashboard: the in-memory pipeline behind the egui window
//! and the sample data generator.

pub mod data;
