use crate::domain::model::CraftGraph;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::Serialize;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Somewhere JSON documents can be fetched from by path.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_json(&self, path: &str) -> Result<serde_json::Value>;
}

/// The computation module page loaders call into.
#[async_trait]
pub trait CraftModule: Send + Sync {
    /// One-time setup. Calling it again after a success is a no-op.
    async fn init(&self) -> Result<()>;
    async fn load_items(&self) -> Result<Vec<String>>;
    async fn get_craft_graph(&self, item: &str) -> Result<CraftGraph>;
}

/// Produces the data context of a page before it is rendered.
#[async_trait]
pub trait Loader: Send + Sync {
    type Params: Send + 'static;
    type Output: Serialize + Send;

    async fn load(&self, params: Self::Params) -> Result<Self::Output>;
}
