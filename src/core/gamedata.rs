use crate::core::module::DEFAULT_NAMESPACE;
use crate::domain::model::{Recipe, RecipeItem, Tag, TagValue};
use crate::utils::error::{CraftError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use zip::ZipArchive;

// Relative to `data/<namespace>/`
const RECIPE_DIRS: [&str; 2] = ["recipe/", "recipes/"];
const ITEM_TAG_DIRS: [&str; 2] = ["tags/item/", "tags/items/"];

/// Recipes and item tags extracted from a game jar.
///
/// This is also the shape of the exported `data.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "RawGameData")]
pub struct GameData {
    items: Vec<String>,
    recipes: Vec<Recipe>,
    tags: BTreeMap<String, Tag>,
    #[serde(skip)]
    by_result: HashMap<String, Vec<usize>>,
}

#[derive(Deserialize)]
struct RawGameData {
    #[serde(default)]
    items: Vec<String>,
    #[serde(default)]
    recipes: Vec<Recipe>,
    #[serde(default)]
    tags: BTreeMap<String, Tag>,
}

impl From<RawGameData> for GameData {
    fn from(raw: RawGameData) -> Self {
        let mut data = GameData::new(raw.recipes, raw.tags);
        if !raw.items.is_empty() {
            data.items = raw.items;
        }
        data
    }
}

fn strip_any_prefix<'a>(name: &'a str, prefixes: &[&str]) -> Option<&'a str> {
    prefixes.iter().find_map(|prefix| name.strip_prefix(prefix))
}

impl GameData {
    /// Builds the dataset, dropping recipes without a craftable result.
    pub fn new(recipes: Vec<Recipe>, tags: BTreeMap<String, Tag>) -> Self {
        let recipes: Vec<Recipe> = recipes
            .into_iter()
            .map(Recipe::normalized)
            .filter(|recipe| recipe.result().is_some())
            .collect();

        let mut by_result: HashMap<String, Vec<usize>> = HashMap::new();
        let mut items = BTreeSet::new();
        for (idx, recipe) in recipes.iter().enumerate() {
            if let Some(result) = recipe.result() {
                by_result.entry(result.id.clone()).or_default().push(idx);
                items.insert(result.id.clone());
            }
        }

        Self {
            items: items.into_iter().collect(),
            recipes,
            tags,
            by_result,
        }
    }

    pub fn load<P: AsRef<Path>>(jar_file_path: P) -> Result<Self> {
        let path = jar_file_path.as_ref();
        tracing::info!("Reading game data from {}", path.display());
        let file = File::open(path)?;
        Self::from_archive(file)
    }

    pub fn from_archive<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut recipes = Vec::new();
        let mut tags = BTreeMap::new();
        let mut skipped = 0usize;
        let data_dir = format!("data/{DEFAULT_NAMESPACE}/");

        for idx in 0..archive.len() {
            let mut file = archive.by_index(idx)?;
            let name = file.name().to_string();
            let Some(stem) = name
                .strip_suffix(".json")
                .and_then(|path| path.strip_prefix(data_dir.as_str()))
            else {
                continue;
            };

            if let Some(tag_path) = strip_any_prefix(stem, &ITEM_TAG_DIRS) {
                let tag: Tag = serde_json::from_reader(&mut file).map_err(|source| {
                    CraftError::InvalidTag {
                        entry: name.clone(),
                        source,
                    }
                })?;
                tags.insert(format!("{DEFAULT_NAMESPACE}:{tag_path}"), tag);
            } else if strip_any_prefix(stem, &RECIPE_DIRS).is_some() {
                let recipe: Recipe = serde_json::from_reader(&mut file).map_err(|source| {
                    CraftError::InvalidRecipe {
                        entry: name.clone(),
                        source,
                    }
                })?;
                if matches!(recipe, Recipe::Unsupported) {
                    skipped += 1;
                    continue;
                }
                recipes.push(recipe);
            }
        }

        tracing::info!(
            "Loaded {} recipes and {} item tags ({} unsupported recipes skipped)",
            recipes.len(),
            tags.len(),
            skipped
        );
        Ok(Self::new(recipes, tags))
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Every item id some recipe produces, sorted.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn tags(&self) -> &BTreeMap<String, Tag> {
        &self.tags
    }

    /// Flattens a tag into item ids, following nested `#tag` references in
    /// declaration order.
    pub fn resolve_tag<'a>(&'a self, tag_name: &str) -> Result<Vec<&'a str>> {
        let mut item_ids = Vec::new();
        let mut stack = Vec::new();
        self.collect_tag(tag_name, true, &mut stack, &mut item_ids)?;
        Ok(item_ids)
    }

    fn collect_tag<'a>(
        &'a self,
        tag_name: &str,
        required: bool,
        stack: &mut Vec<String>,
        item_ids: &mut Vec<&'a str>,
    ) -> Result<()> {
        if stack.iter().any(|name| name == tag_name) {
            return Err(CraftError::TagCycle(tag_name.to_string()));
        }
        let Some(tag) = self.tags.get(tag_name) else {
            if required {
                return Err(CraftError::TagNotFound(tag_name.to_string()));
            }
            tracing::debug!("Skipping optional tag '{}'", tag_name);
            return Ok(());
        };

        stack.push(tag_name.to_string());
        for value in &tag.values {
            let required = match value {
                TagValue::Entry { required, .. } => *required,
                TagValue::Id(_) => true,
            };
            match value.id().strip_prefix('#') {
                Some(nested) => self.collect_tag(nested, required, stack, item_ids)?,
                None => item_ids.push(value.id()),
            }
        }
        stack.pop();
        Ok(())
    }

    fn resolve_item<'a>(&'a self, item: &'a RecipeItem) -> Result<Vec<&'a str>> {
        match item {
            RecipeItem::Item(id) => Ok(vec![id.as_str()]),
            RecipeItem::Tag(id) => self.resolve_tag(id),
        }
    }

    /// Every recipe producing the item (or any item of the tag), in load order.
    pub fn get_recipes_for_item(&self, item: &RecipeItem) -> Result<Vec<&Recipe>> {
        let mut indices: Vec<usize> = self
            .resolve_item(item)?
            .into_iter()
            .filter_map(|id| self.by_result.get(id))
            .flatten()
            .copied()
            .collect();
        indices.sort_unstable();
        indices.dedup();
        Ok(indices.into_iter().map(|idx| &self.recipes[idx]).collect())
    }
}
