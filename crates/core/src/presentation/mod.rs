//! Data the settings screen renders and the intents it emits.
//!
//! Layout and styling live in the UI. This module only decides order,
//! derived flags and labels.

mod intents;
mod page;
mod sorting;
mod view_model;

pub use intents::{DispatchResult, UserIntent};
pub use page::{PageState, SettingsPage};
pub use sorting::{compare_platforms, sort_platforms, sorted};
pub use view_model::{logo_filename, PlatformStatus, PlatformView};
