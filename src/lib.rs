// src/lib.rs

pub mod animate;
pub mod config;
pub mod error;
pub mod frame;
pub mod grid;
pub mod output;
pub mod slices;
pub mod timing;
pub mod visualisation;

pub use error::{Result, SliceError};
