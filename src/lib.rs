//! Ribbonrack - compose award ribbon shirts from badge images
//!
//! This library provides functionality to:
//! - Load ribbon and commendation badges from asset directories
//! - Arrange badges into outlined grids
//! - Print a name onto a nametape with a PIL bitmap font
//! - Composite everything onto a shirt template and save the result

pub mod assets;
pub mod blend;
pub mod cli;
pub mod config;
pub mod font;
pub mod grid;
pub mod nametape;
pub mod outline;
pub mod output;
pub mod session;
pub mod shirt;
