use std::time::Duration;

use async_trait::async_trait;
use larder_shared::{
    mealplan::{Meal, MealSlot},
    pantry::{NewPantryItem, PantryItem},
    provider::{IngredientCatalog, MealStore, PantryStore, ProfileStore, RecipeSearch},
    recipe::{Ingredient, Recipe},
    user::Allergen,
};
use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;

/// Either a bare JSON array or a paginated `{"results": [...]}` page.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    List(Vec<T>),
    Page { results: Vec<T> },
}

impl<T> Listing<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Listing::List(items) | Listing::Page { results: items } => items,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecipeMatches {
    List(Vec<Recipe>),
    Wrapped { recipes: Vec<Recipe> },
}

/// Profiles reference allergies either inline or by id.
#[derive(Deserialize)]
#[serde(untagged)]
enum AllergyRef {
    Named(Allergen),
    Id(u64),
}

#[derive(Deserialize)]
struct Profile {
    #[serde(default)]
    allergies: Vec<AllergyRef>,
    #[serde(default)]
    dietary_preference: Option<u64>,
    #[serde(default)]
    dietary_preferences: Vec<u64>,
}

/// Provider backed by the recipe REST API.
#[derive(Clone, Debug)]
pub struct HttpProvider {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpProvider {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.client.request(method, self.url(path));

        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> anyhow::Result<T> {
        let response = request.send().await?.error_for_status()?;

        Ok(response.json().await?)
    }

    async fn execute(&self, request: RequestBuilder) -> anyhow::Result<()> {
        request.send().await?.error_for_status()?;

        Ok(())
    }

    async fn profile(&self) -> anyhow::Result<Option<Profile>> {
        let profiles: Listing<Profile> = self
            .fetch(self.request(Method::GET, "user-profiles/"))
            .await?;

        Ok(profiles.into_vec().into_iter().next())
    }
}

/// Path of the ingredient endpoint for a catalog query.
pub fn ingredient_path(query: Option<&str>, diet_filtered: bool, limit: usize) -> String {
    let endpoint = if diet_filtered {
        "ingredient-search/"
    } else {
        "ingredient-all-data/"
    };

    match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(query) => format!(
            "{endpoint}?search={}&limit={limit}",
            urlencoding::encode(query)
        ),
        None => format!("{endpoint}?limit={limit}"),
    }
}

#[async_trait]
impl IngredientCatalog for HttpProvider {
    async fn get_ingredients(
        &self,
        query: Option<&str>,
        diet_filtered: bool,
        limit: usize,
    ) -> anyhow::Result<Vec<Ingredient>> {
        let path = ingredient_path(query, diet_filtered, limit);
        let listing: Listing<Ingredient> = self.fetch(self.request(Method::GET, &path)).await?;

        Ok(listing.into_vec())
    }
}

#[async_trait]
impl RecipeSearch for HttpProvider {
    async fn search_recipes_by_ingredients(
        &self,
        names: &[String],
    ) -> anyhow::Result<Vec<Recipe>> {
        let request = self
            .request(Method::POST, "matching-recipes/")
            .json(&json!({ "ingredients": names }));

        let matches: RecipeMatches = self.fetch(request).await?;
        Ok(match matches {
            RecipeMatches::List(recipes) | RecipeMatches::Wrapped { recipes } => recipes,
        })
    }
}

#[async_trait]
impl PantryStore for HttpProvider {
    async fn get_pantry(&self) -> anyhow::Result<Vec<PantryItem>> {
        let listing: Listing<PantryItem> = self
            .fetch(self.request(Method::GET, "ingredients/"))
            .await?;

        Ok(listing.into_vec())
    }

    async fn add_pantry_item(&self, item: &NewPantryItem) -> anyhow::Result<PantryItem> {
        self.fetch(self.request(Method::POST, "ingredients/").json(item))
            .await
    }

    async fn update_pantry_item(&self, item: &PantryItem) -> anyhow::Result<PantryItem> {
        let path = format!("ingredients/{}/", item.id);
        self.fetch(self.request(Method::PATCH, &path).json(item))
            .await
    }

    async fn remove_pantry_item(&self, id: u64) -> anyhow::Result<()> {
        self.execute(self.request(Method::DELETE, &format!("ingredients/{id}/")))
            .await
    }
}

#[async_trait]
impl ProfileStore for HttpProvider {
    async fn get_user_allergens(&self) -> anyhow::Result<Vec<String>> {
        let Some(profile) = self.profile().await? else {
            return Ok(vec![]);
        };

        let mut names = vec![];
        let mut ids = vec![];
        for allergy in profile.allergies {
            match allergy {
                AllergyRef::Named(allergen) => names.push(allergen.name),
                AllergyRef::Id(id) => ids.push(id),
            }
        }

        if !ids.is_empty() {
            let known: Listing<Allergen> = self
                .fetch(self.request(Method::GET, "allergies/"))
                .await?;
            names.extend(
                known
                    .into_vec()
                    .into_iter()
                    .filter(|a| ids.contains(&a.id))
                    .map(|a| a.name),
            );
        }

        Ok(names)
    }

    async fn get_dietary_preference(&self) -> anyhow::Result<Option<u64>> {
        Ok(self.profile().await?.and_then(|p| {
            p.dietary_preference
                .or_else(|| p.dietary_preferences.first().copied())
        }))
    }
}

#[async_trait]
impl MealStore for HttpProvider {
    async fn get_meals(&self, exclude_templates: bool) -> anyhow::Result<Vec<Meal>> {
        let path = if exclude_templates {
            "meals/?exclude_templates=true"
        } else {
            "meals/"
        };
        let listing: Listing<Meal> = self.fetch(self.request(Method::GET, path)).await?;

        Ok(listing.into_vec())
    }

    async fn create_meal(&self, recipe_id: u64, slot: Option<MealSlot>) -> anyhow::Result<Meal> {
        let body = json!({
            "recipe_id": recipe_id,
            "date": slot.map(|s| larder_shared::format_date(s.date)),
            "meal_type": slot.map(|s| s.meal_type.to_string()),
        });

        self.fetch(self.request(Method::POST, "meals/").json(&body))
            .await
    }

    async fn delete_meal(&self, id: u64) -> anyhow::Result<()> {
        self.execute(self.request(Method::DELETE, &format!("meals/{id}/")))
            .await
    }
}
