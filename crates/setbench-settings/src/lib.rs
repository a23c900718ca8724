//! # setbench-settings
//!
//! Named, typed settings declared into an explicit [`SettingsRegistry`].
//!
//! Each [`Setting`] stores its value in a [`SettingCell`]; the cell decides
//! how concurrent reads are synchronized ([`LockedCell`] or
//! [`LockFreeCell`]), which is what the benchmarks compare.

pub mod cell;
pub mod error;
pub mod registry;
pub mod setting;

pub use cell::{LockFreeCell, LockedCell, SettingCell};
pub use error::SettingsError;
pub use registry::{SettingInfo, SettingsRegistry};
pub use setting::{CommandLine, Mutability, Setting, SettingHandle, SettingMeta, SettingValue};
