use larder_shared::{
    AllergenIndex, Result,
    pantry::{NewPantryItem, PantryItem},
    provider::PantryStore,
};
use time::{Date, Duration};
use validator::Validate;

/// Cached copy of the user's storage. Every mutation goes through the
/// provider first and the cache is only updated once it succeeds.
#[derive(Clone, Debug, Default)]
pub struct Pantry {
    items: Vec<PantryItem>,
}

impl Pantry {
    pub fn new(items: Vec<PantryItem>) -> Self {
        Self { items }
    }

    pub async fn load<P: PantryStore + ?Sized>(provider: &P) -> Result<Self> {
        Ok(Self::new(provider.get_pantry().await?))
    }

    /// Reloads from the provider. On failure the cached items stay.
    pub async fn refresh<P: PantryStore + ?Sized>(&mut self, provider: &P) -> Result<()> {
        let items = provider.get_pantry().await?;
        self.replace(items);

        Ok(())
    }

    pub fn replace(&mut self, items: Vec<PantryItem>) {
        self.items = items;
    }

    pub fn items(&self) -> &[PantryItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&PantryItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn names(&self) -> Vec<String> {
        self.items.iter().map(|i| i.name.to_owned()).collect()
    }

    /// Names usable for a pantry-driven recipe search.
    pub fn safe_names(&self, allergens: &AllergenIndex) -> Vec<String> {
        larder_recipe::safe_pantry_names(allergens, &self.items)
    }

    pub async fn add<P: PantryStore + ?Sized>(
        &mut self,
        provider: &P,
        input: NewPantryItem,
    ) -> Result<PantryItem> {
        input.validate()?;

        let item = provider.add_pantry_item(&input).await?;
        tracing::info!(id = item.id, name = %item.name, "pantry item added");
        self.items.push(item.clone());

        Ok(item)
    }

    pub async fn set_quantity<P: PantryStore + ?Sized>(
        &mut self,
        provider: &P,
        id: u64,
        quantity: u32,
    ) -> Result<PantryItem> {
        let mut item = self.find(id)?.clone();
        item.quantity = quantity;

        self.update(provider, item).await
    }

    pub async fn set_notes<P: PantryStore + ?Sized>(
        &mut self,
        provider: &P,
        id: u64,
        notes: Option<String>,
    ) -> Result<PantryItem> {
        let mut item = self.find(id)?.clone();
        item.notes = notes.map(|n| n.trim().to_owned()).filter(|n| !n.is_empty());

        self.update(provider, item).await
    }

    async fn update<P: PantryStore + ?Sized>(
        &mut self,
        provider: &P,
        item: PantryItem,
    ) -> Result<PantryItem> {
        NewPantryItem::new(&item.name)
            .quantity(item.quantity)
            .notes(item.notes.clone())
            .validate()?;

        let updated = provider.update_pantry_item(&item).await?;
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == updated.id) {
            *existing = updated.clone();
        }

        Ok(updated)
    }

    pub async fn remove<P: PantryStore + ?Sized>(&mut self, provider: &P, id: u64) -> Result<()> {
        self.find(id)?;
        provider.remove_pantry_item(id).await?;
        self.items.retain(|i| i.id != id);
        tracing::info!(id, "pantry item removed");

        Ok(())
    }

    /// Items expiring on or before `today + days`, soonest first. Already
    /// expired items are included.
    pub fn expiring_within(&self, today: Date, days: i64) -> Vec<&PantryItem> {
        let limit = today.saturating_add(Duration::days(days));
        let mut items = self
            .items
            .iter()
            .filter(|i| i.expiration_date.is_some_and(|d| d <= limit))
            .collect::<Vec<_>>();
        items.sort_by_key(|i| i.expiration_date);

        items
    }

    fn find(&self, id: u64) -> Result<&PantryItem> {
        let Some(item) = self.get(id) else {
            larder_shared::not_found!("pantry item {id}");
        };

        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    fn item(id: u64, name: &str, expires: Option<Date>) -> PantryItem {
        PantryItem {
            id,
            name: name.to_owned(),
            quantity: 1,
            expiration_date: expires,
            notes: None,
        }
    }

    #[test]
    fn test_expiring_within() {
        let pantry = Pantry::new(vec![
            item(1, "milk", Some(date!(2024 - 03 - 07))),
            item(2, "rice", None),
            item(3, "yogurt", Some(date!(2024 - 03 - 01))),
            item(4, "cheese", Some(date!(2024 - 04 - 01))),
        ]);

        let ids = pantry
            .expiring_within(date!(2024 - 03 - 05), 3)
            .iter()
            .map(|i| i.id)
            .collect::<Vec<_>>();

        assert_eq!(ids, [3, 1]);
    }
}
