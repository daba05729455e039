use clap::Parser;
use craftgraph::config::Command;
use craftgraph::core::module::qualify_item;
use craftgraph::utils::{logger, validation::Validate};
use craftgraph::{
    calculate_craft_graph, export_game_data, CliConfig, GameData, GameDataModule, HttpDataSource,
    ItemPageLoader, ItemPageParams, JsonLayoutLoader, LocalStorage, Loader, ModuleLayoutLoader,
    RecipeItem, RecipeItems, TomlConfig,
};
use serde::Serialize;
use std::sync::Arc;

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入 TOML 配置 (未指定時使用預設值)
    let config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                std::process::exit(1);
            }
        },
        None => TomlConfig::default(),
    };

    // 初始化日誌
    logger::init_cli_logger(cli.verbose, config.log_format());
    tracing::debug!("CLI config: {:?}", cli);

    // 驗證配置
    if let Err(e) = cli.validate().and_then(|_| config.validate()) {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let base_url = cli.command.base_url().unwrap_or(config.base_url()).to_string();
    let source = || HttpDataSource::with_timeout(&base_url, config.timeout());
    let module = || -> craftgraph::Result<GameDataModule<HttpDataSource>> {
        Ok(GameDataModule::new(source()?)
            .with_data_path(config.data_path())
            .with_namespace(config.namespace()))
    };

    match &cli.command {
        Command::Export { jar, output } => {
            let storage = LocalStorage::new(output.clone());
            let summary = export_game_data(jar, &storage).await?;
            tracing::info!(
                "Exported {} items, {} recipes, {} tags",
                summary.items,
                summary.recipes,
                summary.tags
            );
            println!("📁 Output saved to: {}/{}", output, summary.file_name);
        }
        Command::Tree { jar, item } => {
            let game_data = GameData::load(jar)?;
            let id = qualify_item(config.namespace(), item);
            let graph = calculate_craft_graph(&game_data, RecipeItems::single(RecipeItem::Item(id)))?;
            print!("{}", graph);
        }
        Command::Layout { .. } => {
            let loader = JsonLayoutLoader::with_path(source()?, config.data_path());
            print_json(&loader.load(()).await?)?;
        }
        Command::Items { .. } => {
            let loader = ModuleLayoutLoader::new(Arc::new(module()?));
            print_json(&loader.load(()).await?)?;
        }
        Command::Page { item, .. } => {
            let loader = ItemPageLoader::new(Arc::new(module()?));
            print_json(&loader.load(ItemPageParams::new(item.clone())).await?)?;
        }
    }

    Ok(())
}
