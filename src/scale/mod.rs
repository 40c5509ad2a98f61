//! Color scales mapping estimates to fills.

mod color;
mod ramp;
mod sequential;

pub use color::Rgb;
pub use ramp::ColorRamp;
pub use sequential::ColorScale;
