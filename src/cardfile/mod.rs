//! Core Cardfile reader module

pub mod codec;
pub mod format;
pub mod iter;
pub mod reader;
pub mod sink;
pub mod types;
pub mod utils;

pub use reader::{CardFileReader, decode};
pub use types::error::{CardFileError, Result};
