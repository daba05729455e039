use num_rational::Ratio;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const fn default_one() -> u32 {
    1
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRecipeResult")]
pub struct RecipeResult {
    pub count: u32,
    pub id: String,
}

/// Older data packs write cooking and stonecutting results as a bare id.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecipeResult {
    Id(String),
    Stack {
        #[serde(default = "default_one")]
        count: u32,
        #[serde(alias = "item")]
        id: String,
    },
}

impl From<RawRecipeResult> for RecipeResult {
    fn from(raw: RawRecipeResult) -> Self {
        match raw {
            RawRecipeResult::Id(id) => RecipeResult { count: 1, id },
            RawRecipeResult::Stack { count, id } => RecipeResult { count, id },
        }
    }
}

/// A single ingredient slot: either a concrete item or every item of a tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "RawRecipeItem")]
pub enum RecipeItem {
    Item(String),
    Tag(String),
}

/// Accepts both `{"item": ..}` / `{"tag": ..}` objects and the string
/// shorthand where tags carry a leading `#`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecipeItem {
    Id(String),
    Item { item: String },
    Tag { tag: String },
}

impl From<RawRecipeItem> for RecipeItem {
    fn from(raw: RawRecipeItem) -> Self {
        match raw {
            RawRecipeItem::Id(id) => match id.strip_prefix('#') {
                Some(tag) => RecipeItem::Tag(tag.to_string()),
                None => RecipeItem::Item(id),
            },
            RawRecipeItem::Item { item } => RecipeItem::Item(item),
            RawRecipeItem::Tag { tag } => RecipeItem::Tag(tag),
        }
    }
}

impl fmt::Display for RecipeItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipeItem::Item(id) => write!(f, "{}", id),
            RecipeItem::Tag(id) => write!(f, "#{}", id),
        }
    }
}

/// One ingredient or a list of interchangeable alternatives.
///
/// Equality is structural: `[a, b]` and `[b, a]` are different ingredients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeItems {
    Single(RecipeItem),
    Multiple(Vec<RecipeItem>),
}

impl RecipeItems {
    pub fn single(item: RecipeItem) -> Self {
        RecipeItems::Single(item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecipeItem> + '_ {
        let items: &[RecipeItem] = match self {
            RecipeItems::Single(item) => std::slice::from_ref(item),
            RecipeItems::Multiple(items) => items,
        };
        items.iter()
    }
}

impl fmt::Display for RecipeItems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipeItems::Single(item) => write!(f, "{}", item),
            RecipeItems::Multiple(items) => {
                write!(f, "[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Recipe {
    #[serde(rename = "minecraft:crafting_shaped")]
    Shaped {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        category: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        group: Option<String>,
        key: BTreeMap<String, RecipeItems>,
        pattern: Vec<String>,
        result: RecipeResult,
    },
    #[serde(rename = "minecraft:crafting_shapeless")]
    Shapeless {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        category: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        group: Option<String>,
        ingredients: Vec<RecipeItems>,
        result: RecipeResult,
    },
    #[serde(rename = "minecraft:stonecutting")]
    Stonecutting {
        ingredient: RecipeItems,
        result: RecipeResult,
        /// Legacy top-level output count; folded into `result` by
        /// [`Recipe::normalized`].
        #[serde(default, skip_serializing_if = "Option::is_none")]
        count: Option<u32>,
    },
    #[serde(rename = "minecraft:smelting")]
    Smelting {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        category: Option<String>,
        #[serde(default)]
        cookingtime: u32,
        #[serde(default)]
        experience: f32,
        ingredient: RecipeItems,
        result: RecipeResult,
    },
    /// Special, smithing and secondary cooking recipes.
    #[serde(other)]
    Unsupported,
}

impl Recipe {
    pub fn kind(&self) -> &'static str {
        match self {
            Recipe::Shaped { .. } => "crafting_shaped",
            Recipe::Shapeless { .. } => "crafting_shapeless",
            Recipe::Stonecutting { .. } => "stonecutting",
            Recipe::Smelting { .. } => "smelting",
            Recipe::Unsupported => "unsupported",
        }
    }

    /// Moves a legacy top-level stonecutting `count` into the result.
    pub fn normalized(self) -> Self {
        match self {
            Recipe::Stonecutting {
                ingredient,
                mut result,
                count: Some(count),
            } => {
                result.count = count;
                Recipe::Stonecutting {
                    ingredient,
                    result,
                    count: None,
                }
            }
            other => other,
        }
    }

    pub fn result(&self) -> Option<&RecipeResult> {
        match self {
            Recipe::Shaped { result, .. }
            | Recipe::Shapeless { result, .. }
            | Recipe::Stonecutting { result, .. }
            | Recipe::Smelting { result, .. } => Some(result),
            Recipe::Unsupported => None,
        }
    }

    /// Ingredients consumed by one craft, with the number of slots each fills.
    ///
    /// Shaped recipes merge identical keys (counted per pattern cell, in
    /// first-seen order); shapeless recipes keep one entry per slot.
    pub fn ingredients(&self) -> Vec<(RecipeItems, u32)> {
        match self {
            Recipe::Shaped { key, pattern, .. } => {
                let mut ingredients: Vec<(RecipeItems, u32)> = Vec::new();
                let mut buf = [0u8; 4];
                for row in pattern {
                    for c in row.chars() {
                        let Some(items) = key.get(c.encode_utf8(&mut buf) as &str) else {
                            continue;
                        };
                        match ingredients.iter_mut().find(|(i, _)| i == items) {
                            Some((_, count)) => *count += 1,
                            None => ingredients.push((items.clone(), 1)),
                        }
                    }
                }
                ingredients
            }
            Recipe::Shapeless { ingredients, .. } => {
                ingredients.iter().map(|i| (i.clone(), 1)).collect()
            }
            Recipe::Stonecutting { ingredient, .. } | Recipe::Smelting { ingredient, .. } => {
                vec![(ingredient.clone(), 1)]
            }
            Recipe::Unsupported => Vec::new(),
        }
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.result() {
            Some(result) => write!(f, "{}: {}x {}", self.kind(), result.count, result.id),
            None => write!(f, "{}", self.kind()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Id(String),
    Entry {
        id: String,
        #[serde(default = "default_true")]
        required: bool,
    },
}

impl TagValue {
    pub fn id(&self) -> &str {
        match self {
            TagValue::Id(id) | TagValue::Entry { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub values: Vec<TagValue>,
}

/// An ingredient in a craft graph and how much of it one unit of the root
/// requires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraftNode {
    pub items: RecipeItems,
    pub ratio: Ratio<u32>,
}

/// `ingredient` is consumed to make `product` through `recipe`. All three
/// are indices into the owning [`CraftGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftEdge {
    pub ingredient: usize,
    pub product: usize,
    pub recipe: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CraftGraph {
    pub nodes: Vec<CraftNode>,
    pub edges: Vec<CraftEdge>,
    pub recipes: Vec<Recipe>,
}

impl CraftGraph {
    pub fn root(&self) -> Option<&CraftNode> {
        self.nodes.first()
    }

    pub fn find_node(&self, items: &RecipeItems) -> Option<usize> {
        self.nodes.iter().position(|node| &node.items == items)
    }
}

impl fmt::Display for CraftGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "NODES:")?;
        for (idx, node) in self.nodes.iter().enumerate() {
            writeln!(f, "{idx}: {} x{}", node.items, node.ratio)?;
        }
        writeln!(f, "EDGES:")?;
        for edge in &self.edges {
            match self.recipes.get(edge.recipe) {
                Some(recipe) => writeln!(f, "{} -> {} ({})", edge.ingredient, edge.product, recipe)?,
                None => writeln!(f, "{} -> {}", edge.ingredient, edge.product)?,
            }
        }
        Ok(())
    }
}

/// Data context of the item listing layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutData {
    pub items: Vec<String>,
}

/// Data context of an item page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPageData {
    pub item: String,
    #[serde(rename = "craftGraph")]
    pub craft_graph: CraftGraph,
}
