//! Audio input system

pub mod capture;

pub use capture::{AudioCapture, AudioHandle, WavCapture};
