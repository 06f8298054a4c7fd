//! lapidoc: the LAPI documentation in your terminal.
//!
//! LAPI is a Lua helper library layered over the GameSense UI, client and entity APIs. lapidoc
//! ships its documentation as a bundled corpus and provides a viewer, a navigation tree, and
//! ranked full-text search, including an interactive session with search-as-you-type.

#![warn(missing_docs)]

pub mod cli;
