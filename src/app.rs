//! Terminal UI binding
//!
//! Maps crossterm key events onto the suggestion controller, keeps the
//! prompt's edit buffer in step with it and draws the whole screen.

mod events;
mod render;
mod state;

pub use events::run;
pub use state::App;
