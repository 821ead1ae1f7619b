//! Section-keyed RouterOS script documents.
//!
//! A [`RouterConfig`] maps RouterOS menu paths (`/ip pool`, `/ppp secret`,
//! ...) to ordered command lines. Generators build small documents, the
//! merger concatenates them section by section, the shortener drops blank
//! and repeated commands, and the writer flattens the result into script
//! text.

pub mod document;
pub mod format;
pub mod merge;
pub mod shorten;
pub mod writer;

pub use document::{RouterConfig, Section, COMMENT_SECTION};
pub use format::{format_array_value, format_boolean_value, ListValue};
pub use merge::merge_router_configs;
pub use shorten::{command_shortener, normalize_command};
pub use writer::{render_json, render_script, write_file, WriteError};
