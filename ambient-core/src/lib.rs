//! Shared types for the ambient dashboard: the validated sensor reading,
//! gauge geometry and color rules, and the render-target seam the UI
//! implements.

pub mod error;
pub mod gauge;
pub mod reading;
pub mod surface;

pub use error::{ReadingError, RenderError};
pub use gauge::{GaugeScale, Stroke};
pub use reading::{RawReading, Reading};
pub use surface::{DisplayUpdater, GaugeSurface};
