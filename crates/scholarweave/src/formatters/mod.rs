//! Text formatters for the terminal views.
//!
//! Views are rendered as lightweight Markdown so they read well both raw in a
//! terminal and when piped into a Markdown viewer.

mod card;
mod health;
mod json;
mod markdown;

pub use card::*;
pub use health::*;
pub use self::json::*;
pub use markdown::*;
