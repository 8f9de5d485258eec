//! Recipe model and the lookup endpoint's wire shape.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Number of positional ingredient slots the lookup API exposes.
pub const INGREDIENT_SLOTS: usize = 15;

/// Opaque recipe identifier. The API sends it as a string, but numbers are
/// accepted on the wire too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RecipeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A cocktail recipe as shown on the detail screen.
///
/// `ingredients[0]` is API slot 1. Absent slots are `None`; a slot is never
/// `Some` of an empty or whitespace-only string when built from the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub alcoholic: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub ingredients: [Option<String>; INGREDIENT_SLOTS],
}

impl Recipe {
    /// An empty recipe carrying only its id.
    pub fn new(id: impl Into<RecipeId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            alcoholic: None,
            thumbnail: None,
            ingredients: Default::default(),
        }
    }

    /// Present ingredients in slot order, trimmed.
    pub fn ingredients(&self) -> impl Iterator<Item = &str> + '_ {
        self.ingredients
            .iter()
            .flatten()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// Body of `lookup.php?i=<id>`.
#[derive(Debug, Default, Deserialize)]
pub struct LookupResponse {
    #[serde(default, deserialize_with = "drinks_or_empty")]
    drinks: Vec<DrinkPayload>,
}

impl LookupResponse {
    /// Convert every drink in the response. `requested` stands in for drinks
    /// that arrive without an `idDrink`.
    pub fn into_recipes(self, requested: &RecipeId) -> Vec<Recipe> {
        self.drinks
            .into_iter()
            .map(|d| d.into_recipe(requested))
            .collect()
    }
}

/// Parse a lookup response body into recipes, in response order.
pub fn parse_lookup_body(body: &str, requested: &RecipeId) -> serde_json::Result<Vec<Recipe>> {
    let response: LookupResponse = serde_json::from_str(body)?;
    Ok(response.into_recipes(requested))
}

#[derive(Debug, Deserialize)]
struct DrinkPayload {
    #[serde(rename = "idDrink", default, deserialize_with = "string_or_number")]
    id: Option<String>,
    #[serde(rename = "strDrink", default)]
    name: Option<String>,
    #[serde(rename = "strAlcoholic", default)]
    alcoholic: Option<String>,
    #[serde(rename = "strDrinkThumb", default)]
    thumbnail: Option<String>,
    /// Everything else, including `strIngredient1..15`.
    #[serde(flatten)]
    rest: HashMap<String, Value>,
}

impl DrinkPayload {
    fn into_recipe(mut self, requested: &RecipeId) -> Recipe {
        let mut ingredients: [Option<String>; INGREDIENT_SLOTS] = Default::default();
        for (idx, slot) in ingredients.iter_mut().enumerate() {
            *slot = match self.rest.remove(&format!("strIngredient{}", idx + 1)) {
                Some(Value::String(s)) => present(s),
                _ => None,
            };
        }

        Recipe {
            id: self
                .id
                .and_then(present)
                .map(RecipeId::from)
                .unwrap_or_else(|| requested.clone()),
            name: self.name.and_then(present),
            alcoholic: self.alcoholic.and_then(present),
            thumbnail: self.thumbnail.and_then(present),
            ingredients,
        }
    }
}

fn present(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

/// `drinks` is an array on a hit and `null` on a miss; anything else (the API
/// has answered `"no data found"` before) is treated as a miss.
fn drinks_or_empty<'de, D>(deserializer: D) -> Result<Vec<DrinkPayload>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Drinks {
        List(Vec<DrinkPayload>),
        #[allow(dead_code)]
        Other(Value),
    }

    Ok(match Option::<Drinks>::deserialize(deserializer)? {
        Some(Drinks::List(list)) => list,
        _ => Vec::new(),
    })
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
