//! Presentation helpers shared by front ends: date labels, overdue
//! detection, and the counter animation curve.

mod counter;
mod format;

pub use counter::{CounterTween, tween};
pub use format::{format_due_date, is_overdue};
