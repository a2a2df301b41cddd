//! Hardware target platform model.
//!
//! A platform directory is assembled from three definition files:
//! - **`boards.txt`** (mandatory): one [`Board`] per first-level key, plus
//!   the reserved `menu` namespace of custom menus
//! - **`platform.txt`** (optional): platform-wide preferences
//! - **`programmers.txt`** (optional): one [`Programmer`] per first-level key

pub mod board;
pub mod discovery;
pub mod error;
pub mod platform;

pub use board::{Board, Programmer};
pub use discovery::{discover_platforms, Discovery};
pub use error::{Result, TargetError};
pub use platform::{PlatformAssembler, TargetPlatform};
