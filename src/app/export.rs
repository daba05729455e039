use crate::core::gamedata::GameData;
use crate::core::Storage;
use crate::utils::error::Result;
use std::path::PathBuf;

pub const DATA_FILE_NAME: &str = "data.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub file_name: String,
    pub items: usize,
    pub recipes: usize,
    pub tags: usize,
    pub bytes: usize,
}

/// Reads a game jar and writes its recipe data as `data.json` to `storage`.
pub async fn export_game_data<S: Storage>(jar: impl Into<PathBuf>, storage: &S) -> Result<ExportSummary> {
    let jar = jar.into();
    let game_data = tokio::task::spawn_blocking(move || GameData::load(jar)).await??;

    let json = game_data.to_json()?;
    tracing::debug!("Writing {} ({} bytes) to storage", DATA_FILE_NAME, json.len());
    storage.write_file(DATA_FILE_NAME, &json).await?;

    Ok(ExportSummary {
        file_name: DATA_FILE_NAME.to_string(),
        items: game_data.items().len(),
        recipes: game_data.recipes().len(),
        tags: game_data.tags().len(),
        bytes: json.len(),
    })
}
