pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::TomlConfig;

pub use adapters::{http::HttpDataSource, storage::LocalStorage};
pub use app::{
    export_game_data, ItemPageLoader, ItemPageParams, JsonLayoutLoader, ModuleLayoutLoader,
};
pub use core::{gamedata::GameData, graph::calculate_craft_graph, module::GameDataModule};
pub use domain::model::{CraftGraph, ItemPageData, LayoutData, RecipeItem, RecipeItems};
pub use domain::ports::{CraftModule, DataSource, Loader};
pub use utils::error::{CraftError, Result};
