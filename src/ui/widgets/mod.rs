//! Reusable UI widgets

mod menu_list;
mod spinner;
mod step_progress;

pub use menu_list::MenuList;
pub use spinner::Spinner;
pub use step_progress::StepProgress;
