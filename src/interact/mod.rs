//! Pointer and zoom interaction state.

mod format;
mod tooltip;
mod zoom;

pub(crate) use format::{escape_markup, feature_lines, tooltip_html};
pub use format::format_estimate;
pub use tooltip::{PointerEvent, TooltipController, TooltipPhase, TooltipView, TOOLTIP_STYLE};
pub use zoom::{ZoomController, ZoomOutcome, ZoomTransform};
