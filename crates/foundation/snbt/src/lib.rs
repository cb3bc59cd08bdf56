//! Stringified NBT (SNBT): a tagged value model for Minecraft's NBT tag tree, a recursive-descent
//! parser from SNBT text into that model, and a configurable printer back into text.
//!
//! ```
//! use prismarine_anchor_snbt::{SnbtWriteOptions, parse, stringify_compound};
//!
//! let compound = parse("{name: \"Steve\", pos: [I; 1, 64, -3]}").unwrap();
//! let deflated = SnbtWriteOptions { deflate: true, ..SnbtWriteOptions::default() };
//!
//! assert_eq!(stringify_compound(&compound, &deflated), r#"{name:"Steve",pos:[I;1,64,-3]}"#);
//! ```

mod access; // Used by the typed accessors in the tag module
mod error;
mod settings;
mod tag;
// Note - the printer lives in `snbt::write`, and is re-exported below
pub mod snbt;


pub use self::access::*;
pub use self::error::*;
pub use self::settings::*;
pub use self::tag::*;
pub use self::snbt::{
    parse, parse_any, parse_any_with_options, parse_with_options, stringify, stringify_compound,
};
