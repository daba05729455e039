//! Page loaders. Each one awaits its collaborator and hands the result back
//! unchanged; failures are never swallowed.

use crate::core::module::DEFAULT_DATA_PATH;
use crate::core::{CraftModule, DataSource, ItemPageData, LayoutData, Loader};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Layout loader that returns the raw JSON document at a fixed path.
pub struct JsonLayoutLoader<D: DataSource> {
    source: D,
    path: String,
}

impl<D: DataSource> JsonLayoutLoader<D> {
    pub fn new(source: D) -> Self {
        Self::with_path(source, DEFAULT_DATA_PATH)
    }

    pub fn with_path(source: D, path: impl Into<String>) -> Self {
        Self {
            source,
            path: path.into(),
        }
    }
}

#[async_trait]
impl<D: DataSource> Loader for JsonLayoutLoader<D> {
    type Params = ();
    type Output = serde_json::Value;

    async fn load(&self, _params: ()) -> Result<serde_json::Value> {
        self.source.fetch_json(&self.path).await
    }
}

/// Layout loader that lists the items known to the craft module.
pub struct ModuleLayoutLoader<M: CraftModule> {
    module: Arc<M>,
}

impl<M: CraftModule> ModuleLayoutLoader<M> {
    pub fn new(module: Arc<M>) -> Self {
        Self { module }
    }
}

#[async_trait]
impl<M: CraftModule> Loader for ModuleLayoutLoader<M> {
    type Params = ();
    type Output = LayoutData;

    async fn load(&self, _params: ()) -> Result<LayoutData> {
        self.module.init().await?;
        let items = self.module.load_items().await?;
        Ok(LayoutData { items })
    }
}

/// Route parameters of an item page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPageParams {
    pub item: String,
}

impl ItemPageParams {
    pub fn new(item: impl Into<String>) -> Self {
        Self { item: item.into() }
    }
}

pub struct ItemPageLoader<M: CraftModule> {
    module: Arc<M>,
}

impl<M: CraftModule> ItemPageLoader<M> {
    pub fn new(module: Arc<M>) -> Self {
        Self { module }
    }
}

#[async_trait]
impl<M: CraftModule> Loader for ItemPageLoader<M> {
    type Params = ItemPageParams;
    type Output = ItemPageData;

    async fn load(&self, params: ItemPageParams) -> Result<ItemPageData> {
        let craft_graph = self.module.get_craft_graph(&params.item).await?;
        tracing::debug!(item = %params.item, "craft graph:\n{}", craft_graph);
        Ok(ItemPageData {
            item: params.item,
            craft_graph,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CraftGraph, CraftNode, RecipeItem, RecipeItems};
    use crate::utils::error::CraftError;
    use num_rational::Ratio;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct StaticSource(serde_json::Value);

    #[async_trait]
    impl DataSource for StaticSource {
        async fn fetch_json(&self, path: &str) -> Result<serde_json::Value> {
            assert_eq!(path, "/data.json");
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl DataSource for FailingSource {
        async fn fetch_json(&self, path: &str) -> Result<serde_json::Value> {
            Err(CraftError::HttpStatus {
                url: path.to_string(),
                status: 500,
            })
        }
    }

    #[derive(Default)]
    struct StubModule {
        initialized: AtomicBool,
        fail_init: bool,
    }

    fn sword_graph() -> CraftGraph {
        CraftGraph {
            nodes: vec![CraftNode {
                items: RecipeItems::single(RecipeItem::Item("minecraft:sword".to_string())),
                ratio: Ratio::from_integer(1),
            }],
            ..CraftGraph::default()
        }
    }

    #[async_trait]
    impl CraftModule for StubModule {
        async fn init(&self) -> Result<()> {
            if self.fail_init {
                return Err(CraftError::ConfigError {
                    message: "module unavailable".to_string(),
                });
            }
            self.initialized.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn load_items(&self) -> Result<Vec<String>> {
            assert!(self.initialized.load(Ordering::SeqCst));
            Ok(vec!["sword".to_string(), "shield".to_string()])
        }

        async fn get_craft_graph(&self, item: &str) -> Result<CraftGraph> {
            match item {
                "sword" => Ok(sword_graph()),
                other => Err(CraftError::ValidationError {
                    message: format!("unknown item {other}"),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_json_layout_returns_document_unchanged() {
        let loader = JsonLayoutLoader::new(StaticSource(json!({"a": 1})));
        assert_eq!(loader.load(()).await.unwrap(), json!({"a": 1}));
    }

    #[tokio::test]
    async fn test_json_layout_propagates_fetch_error() {
        let loader = JsonLayoutLoader::new(FailingSource);
        assert!(matches!(
            loader.load(()).await,
            Err(CraftError::HttpStatus { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_module_layout_wraps_items() {
        let loader = ModuleLayoutLoader::new(Arc::new(StubModule::default()));
        let data = loader.load(()).await.unwrap();
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({"items": ["sword", "shield"]})
        );
    }

    #[tokio::test]
    async fn test_module_layout_propagates_init_error() {
        let module = StubModule {
            fail_init: true,
            ..StubModule::default()
        };
        let loader = ModuleLayoutLoader::new(Arc::new(module));
        assert!(matches!(
            loader.load(()).await,
            Err(CraftError::ConfigError { .. })
        ));
    }

    #[tokio::test]
    async fn test_item_page_returns_param_and_graph() {
        let loader = ItemPageLoader::new(Arc::new(StubModule::default()));
        let page = loader.load(ItemPageParams::new("sword")).await.unwrap();

        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["item"], "sword");
        assert_eq!(
            value["craftGraph"],
            serde_json::to_value(sword_graph()).unwrap()
        );
    }

    #[tokio::test]
    async fn test_item_page_propagates_lookup_error() {
        let loader = ItemPageLoader::new(Arc::new(StubModule::default()));
        assert!(loader.load(ItemPageParams::new("shield")).await.is_err());
    }
}
