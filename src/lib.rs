//! A drifting "constellation" of particles for use as a decorative
//! backdrop: particles wander, flee the pointer and are linked by fading
//! lines when they come close.

pub mod backdrop;
pub mod config;
pub mod debounce;
pub mod error;
pub mod particle;
pub mod physics;
pub mod render;
pub mod schedule;
pub mod theme;

pub use crate::backdrop::{init, Backdrop, State, Visibility};
pub use crate::error::{Error, Result};
pub use crate::particle::{Parameters, Particle, Particles, Viewport};
pub use crate::render::{ColorPair, DisplayList, Rgb, Surface};
pub use crate::schedule::{FrameHandle, FrameQueue, FrameScheduler};
pub use crate::theme::{Palette, Theme, ThemeStore};
