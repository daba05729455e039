use crate::core::gamedata::GameData;
use crate::domain::model::{CraftEdge, CraftGraph, CraftNode, RecipeItems};
use crate::utils::error::{CraftError, Result};
use num_rational::Ratio;
use num_traits::CheckedMul;
use std::collections::VecDeque;

/// Expands `start` into everything needed to craft it, breadth first.
///
/// Each ingredient appears once, as a node holding the amount needed per unit
/// of `start`; the first recipe that reaches it decides its ratio. Recipe
/// cycles terminate because known ingredients are never enqueued again.
pub fn calculate_craft_graph(game_data: &GameData, start: RecipeItems) -> Result<CraftGraph> {
    let mut graph = CraftGraph::default();

    // (node index, ratio)
    let mut queue = VecDeque::new();
    graph.nodes.push(CraftNode {
        items: start,
        ratio: Ratio::from_integer(1),
    });
    queue.push_back((0usize, Ratio::from_integer(1u32)));

    while let Some((parent_idx, parent_ratio)) = queue.pop_front() {
        let items = graph.nodes[parent_idx].items.clone();
        tracing::trace!("[NODE] {} (x{})", items, parent_ratio);

        for item in items.iter() {
            for recipe in game_data.get_recipes_for_item(item)? {
                let Some(recipe_result) = recipe.result().filter(|r| r.count > 0) else {
                    tracing::warn!("Skipping recipe without output: {}", recipe);
                    continue;
                };
                graph.recipes.push(recipe.clone());
                let recipe_idx = graph.recipes.len() - 1;

                for (ingredient, item_ratio) in recipe.ingredients() {
                    if graph.find_node(&ingredient).is_some() {
                        continue;
                    }

                    let new_ratio = Ratio::new(item_ratio, recipe_result.count)
                        .checked_mul(&parent_ratio)
                        .ok_or_else(|| CraftError::RatioOverflow {
                            item: ingredient.to_string(),
                            root: graph.nodes[0].items.to_string(),
                        })?;
                    tracing::trace!(
                        "[EDGE] {} (x{}) -> {} (x{}) ratio={}",
                        ingredient,
                        item_ratio,
                        item,
                        recipe_result.count,
                        new_ratio
                    );

                    graph.nodes.push(CraftNode {
                        items: ingredient,
                        ratio: new_ratio,
                    });
                    let node_idx = graph.nodes.len() - 1;
                    graph.edges.push(CraftEdge {
                        ingredient: node_idx,
                        product: parent_idx,
                        recipe: recipe_idx,
                    });
                    queue.push_back((node_idx, new_ratio));
                }
            }
        }
    }

    tracing::debug!(
        "Craft graph has {} nodes, {} edges, {} recipes",
        graph.nodes.len(),
        graph.edges.len(),
        graph.recipes.len()
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RecipeItem;
    use serde_json::json;

    fn item(id: &str) -> RecipeItems {
        RecipeItems::single(RecipeItem::Item(id.to_string()))
    }

    fn tag(id: &str) -> RecipeItems {
        RecipeItems::single(RecipeItem::Tag(id.to_string()))
    }

    fn game_data() -> GameData {
        GameData::from_json(json!({
            "recipes": [
                {
                    "type": "minecraft:crafting_shaped",
                    "category": "equipment",
                    "key": {"#": {"item": "minecraft:stick"}, "X": {"tag": "minecraft:planks"}},
                    "pattern": ["X", "X", "#"],
                    "result": {"id": "minecraft:wooden_sword"}
                },
                {
                    "type": "minecraft:crafting_shaped",
                    "category": "misc",
                    "key": {"#": {"tag": "minecraft:planks"}},
                    "pattern": ["#", "#"],
                    "result": {"id": "minecraft:stick", "count": 4}
                },
                {
                    "type": "minecraft:crafting_shapeless",
                    "category": "building",
                    "ingredients": [{"item": "minecraft:oak_log"}],
                    "result": {"id": "minecraft:oak_planks", "count": 4}
                },
                {
                    "type": "minecraft:crafting_shapeless",
                    "category": "misc",
                    "ingredients": [{"item": "minecraft:iron_block"}],
                    "result": {"id": "minecraft:iron_ingot", "count": 9}
                },
                {
                    "type": "minecraft:crafting_shaped",
                    "category": "building",
                    "key": {"#": {"item": "minecraft:iron_ingot"}},
                    "pattern": ["###", "###", "###"],
                    "result": {"id": "minecraft:iron_block"}
                }
            ],
            "tags": {
                "minecraft:planks": {"values": ["minecraft:oak_planks"]}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_wooden_sword_graph() {
        let graph = calculate_craft_graph(&game_data(), item("minecraft:wooden_sword")).unwrap();

        let nodes: Vec<(String, Ratio<u32>)> = graph
            .nodes
            .iter()
            .map(|n| (n.items.to_string(), n.ratio))
            .collect();
        assert_eq!(
            nodes,
            vec![
                ("minecraft:wooden_sword".to_string(), Ratio::from_integer(1)),
                ("#minecraft:planks".to_string(), Ratio::from_integer(2)),
                ("minecraft:stick".to_string(), Ratio::from_integer(1)),
                ("minecraft:oak_log".to_string(), Ratio::new(1, 2)),
            ]
        );

        assert_eq!(
            graph.edges[0],
            CraftEdge {
                ingredient: 1,
                product: 0,
                recipe: 0
            }
        );
        let log_idx = graph.find_node(&item("minecraft:oak_log")).unwrap();
        let planks_idx = graph.find_node(&tag("minecraft:planks")).unwrap();
        assert!(graph
            .edges
            .iter()
            .any(|e| e.ingredient == log_idx && e.product == planks_idx));
    }

    #[test]
    fn test_recipe_cycle_terminates() {
        let graph = calculate_craft_graph(&game_data(), item("minecraft:iron_block")).unwrap();

        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[1].ratio, Ratio::from_integer(9));
        // iron_ingot -> iron_block is recorded, the way back is not a new node
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.recipes.len(), 2);
    }

    #[test]
    fn test_raw_item_has_single_node() {
        let graph = calculate_craft_graph(&game_data(), item("minecraft:oak_log")).unwrap();
        assert_eq!(graph.nodes.len(), 1);
        assert!(graph.edges.is_empty());
        assert!(graph.recipes.is_empty());
    }

    #[test]
    fn test_missing_tag_propagates() {
        let result = calculate_craft_graph(&game_data(), tag("minecraft:wool"));
        assert!(matches!(result, Err(CraftError::TagNotFound(_))));
    }

    #[test]
    fn test_deep_compression_chain_overflows_without_panic() {
        // c0 <- 9x c1 <- 9x c2 ... ; 9^11 no longer fits in u32
        let recipes = (0..12)
            .map(|level| {
                serde_json::from_value(json!({
                    "type": "minecraft:crafting_shaped",
                    "category": "building",
                    "key": {"#": {"item": format!("minecraft:c{}", level + 1)}},
                    "pattern": ["###", "###", "###"],
                    "result": {"id": format!("minecraft:c{}", level)}
                }))
                .unwrap()
            })
            .collect();
        let data = GameData::new(recipes, Default::default());

        match calculate_craft_graph(&data, item("minecraft:c0")) {
            Err(CraftError::RatioOverflow { item, root }) => {
                assert_eq!(item, "minecraft:c11");
                assert_eq!(root, "minecraft:c0");
            }
            other => panic!("expected RatioOverflow, got {:?}", other.map(|g| g.nodes.len())),
        }

        // Ten levels still fit
        let graph = calculate_craft_graph(&data, item("minecraft:c2")).unwrap();
        assert_eq!(graph.nodes.last().unwrap().ratio, Ratio::from_integer(3_486_784_401));
    }

    #[test]
    fn test_display_lists_nodes_and_edges() {
        let graph = calculate_craft_graph(&game_data(), item("minecraft:stick")).unwrap();
        let text = graph.to_string();
        assert!(text.starts_with("NODES:\n0: minecraft:stick x1\n"));
        assert!(text.contains("1: #minecraft:planks x1/2"));
        assert!(text.contains("1 -> 0 (crafting_shaped: 4x minecraft:stick)"));
    }
}
