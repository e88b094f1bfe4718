//! Recipe catalog — static, read-only collaborator data keyed by id.
//!
//! The core never mutates these. Recipes are authored in data files and
//! looked up by id when a cook starts or resumes.

use crate::types::{ItemId, RecipeId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientCost {
    pub item_id: ItemId,
    pub amount:  u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDefinition {
    pub id:    RecipeId,
    pub label: String,
    #[serde(default)]
    pub description: String,
    /// Cook duration in seconds. Authored data keeps this above zero.
    pub required_time: f64,
    /// Kept in authored order; order matters for display, not for checks.
    pub ingredient_costs: Vec<IngredientCost>,
}

#[derive(Debug, Clone, Deserialize)]
struct RecipesFile {
    recipes: Vec<RecipeDefinition>,
}

#[derive(Debug, Clone, Default)]
pub struct RecipeCatalog {
    recipes: HashMap<RecipeId, RecipeDefinition>,
}

impl RecipeCatalog {
    /// Load from the data/ directory. In tests, use from_recipes().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/recipes/recipes.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let file: RecipesFile = serde_json::from_str(&content)?;
        Ok(Self::from_recipes(file.recipes))
    }

    pub fn from_recipes(recipes: Vec<RecipeDefinition>) -> Self {
        Self {
            recipes: recipes
                .into_iter()
                .map(|recipe| (recipe.id.clone(), recipe))
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&RecipeDefinition> {
        self.recipes.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.recipes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
