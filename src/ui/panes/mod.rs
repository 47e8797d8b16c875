//! TUI pane rendering modules
//!
//! Each pane is a stateless render function over borrowed puzzle data.
//!
//! # Pane Modules
//!
//! - [`hanoi`], [`two_sum`], [`fibonacci`], [`river`]: the visualization of
//!   the active puzzle at the cursor
//! - [`code`]: pseudocode listing with the current frame's lines highlighted
//! - [`narration`]: narration of every step up to the cursor
//! - [`status`]: status bar with step counter, state badge, speed and
//!   keybindings, plus the inline input line used while editing

pub mod code;
pub mod fibonacci;
pub mod hanoi;
pub mod narration;
pub mod river;
pub mod status;
pub mod two_sum;

pub use code::{render_code_pane, CodeScrollState};
pub use fibonacci::render_fibonacci_pane;
pub use hanoi::render_hanoi_pane;
pub use narration::render_narration_pane;
pub use river::render_river_pane;
pub use status::{render_input_line, render_status_bar, StatusRenderData};
pub use two_sum::render_two_sum_pane;
