pub mod gamedata;
pub mod graph;
pub mod module;

pub use crate::domain::model::{CraftGraph, ItemPageData, LayoutData};
pub use crate::domain::ports::{CraftModule, DataSource, Loader, Storage};
pub use crate::utils::error::Result;
