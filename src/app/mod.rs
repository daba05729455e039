pub mod export;
pub mod loaders;

pub use export::{export_game_data, ExportSummary, DATA_FILE_NAME};
pub use loaders::{ItemPageLoader, ItemPageParams, JsonLayoutLoader, ModuleLayoutLoader};
