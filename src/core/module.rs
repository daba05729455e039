use crate::core::gamedata::GameData;
use crate::core::graph::calculate_craft_graph;
use crate::domain::model::{CraftGraph, RecipeItem, RecipeItems};
use crate::domain::ports::{CraftModule, DataSource};
use crate::utils::error::{CraftError, Result};
use async_trait::async_trait;
use tokio::sync::OnceCell;

pub const DEFAULT_DATA_PATH: &str = "/data.json";
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// `stick` becomes `minecraft:stick`; ids that already carry a namespace are
/// left alone.
pub fn qualify_item(namespace: &str, item: &str) -> String {
    if item.contains(':') {
        item.to_string()
    } else {
        format!("{}:{}", namespace, item)
    }
}

/// Craft module backed by the exported game data.
///
/// The dataset is fetched once per module; a failed fetch leaves it unset so
/// the next call tries again.
pub struct GameDataModule<D: DataSource> {
    source: D,
    data_path: String,
    namespace: String,
    data: OnceCell<GameData>,
}

impl<D: DataSource> GameDataModule<D> {
    pub fn new(source: D) -> Self {
        Self {
            source,
            data_path: DEFAULT_DATA_PATH.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            data: OnceCell::new(),
        }
    }

    pub fn with_data_path(mut self, data_path: impl Into<String>) -> Self {
        self.data_path = data_path.into();
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.data.initialized()
    }

    async fn game_data(&self) -> Result<&GameData> {
        self.data
            .get_or_try_init(|| async {
                tracing::debug!("Fetching game data from {}", self.data_path);
                let json = self.source.fetch_json(&self.data_path).await?;
                let data = GameData::from_json(json)?;
                tracing::info!(
                    "Game data ready: {} items, {} recipes",
                    data.items().len(),
                    data.recipes().len()
                );
                Ok::<_, CraftError>(data)
            })
            .await
    }

    pub fn qualify(&self, item: &str) -> String {
        qualify_item(&self.namespace, item)
    }
}

#[async_trait]
impl<D: DataSource> CraftModule for GameDataModule<D> {
    async fn init(&self) -> Result<()> {
        self.game_data().await.map(|_| ())
    }

    async fn load_items(&self) -> Result<Vec<String>> {
        let game_data = self.game_data().await?;
        Ok(game_data.items().to_vec())
    }

    async fn get_craft_graph(&self, item: &str) -> Result<CraftGraph> {
        let game_data = self.game_data().await?;
        let start = RecipeItems::single(RecipeItem::Item(self.qualify(item)));
        calculate_craft_graph(game_data, start)
    }
}
