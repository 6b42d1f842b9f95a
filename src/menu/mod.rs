//! Menu
//!
//! The catalog the cart draws from: categories in display order, their items, and the tag filter
//! and favourites state the menu browser keeps alongside.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rustc_hash::{FxHashMap, FxHashSet};
use rusty_money::iso::Currency;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{
    pricing::{Price, PricingError, ensure_same_currency},
    tags::Tags,
};

pub mod fixture;

use fixture::MenuFixture;

const BUNDLED_MENU: &str = include_str!("../../fixtures/menu/nonna-rosa.yml");

new_key_type! {
    /// Menu Item Key
    pub struct MenuItemKey;
}

/// Menu errors
#[derive(Debug, Error)]
pub enum MenuError {
    /// IO error reading a menu file
    #[error("Failed to read menu file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Price or currency problem
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Two items were given the same slug
    #[error("Duplicate menu item: {0}")]
    DuplicateItem(String),

    /// Two categories were given the same id
    #[error("Duplicate category: {0}")]
    DuplicateCategory(String),

    /// Item refers to a category that doesn't exist
    #[error("Unknown category {category} for menu item {item}")]
    UnknownCategory {
        /// Slug of the offending item
        item: String,
        /// Category it asked for
        category: String,
    },

    /// Lookup by slug failed
    #[error("Menu item not found: {0}")]
    ItemNotFound(String),
}

/// A menu section, such as "Pizzas".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Stable identifier (e.g. `pizzas`)
    pub id: String,

    /// Display name
    pub name: String,
}

/// A dish on the menu.
#[derive(Debug, Clone)]
pub struct MenuItem {
    key: MenuItemKey,
    slug: String,
    name: String,
    description: String,
    price: Price,
    category: String,
    tags: Tags,
}

impl MenuItem {
    /// Catalog key, used by the cart to identify the item
    pub fn key(&self) -> MenuItemKey {
        self.key
    }

    /// Stable string identifier from the menu file
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Short description of the dish
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Current price
    pub fn price(&self) -> Price {
        self.price
    }

    /// Id of the category the item is listed under
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Dietary and marketing tags
    pub fn tags(&self) -> &Tags {
        &self.tags
    }
}

/// Details of an item to add to a [`Menu`].
#[derive(Debug, Clone)]
pub struct NewMenuItem {
    /// Display name
    pub name: String,

    /// Short description
    pub description: String,

    /// Price
    pub price: Price,

    /// Category id; must already exist on the menu
    pub category: String,

    /// Tags
    pub tags: Tags,
}

/// The restaurant's menu.
#[derive(Debug)]
pub struct Menu {
    items: SlotMap<MenuItemKey, MenuItem>,
    order: Vec<MenuItemKey>,
    slugs: FxHashMap<String, MenuItemKey>,
    categories: SmallVec<[Category; 8]>,
    filter_tags: Tags,
    currency: &'static Currency,
}

impl Menu {
    /// Create an empty menu priced in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            items: SlotMap::with_key(),
            order: Vec::new(),
            slugs: FxHashMap::default(),
            categories: SmallVec::new(),
            filter_tags: Tags::empty(),
            currency,
        }
    }

    /// The Nonna Rosa's menu shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled menu file is invalid.
    pub fn bundled() -> Result<Self, MenuError> {
        Self::from_yaml_str(BUNDLED_MENU)
    }

    /// Parse a menu from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, a price fails to parse, currencies are mixed,
    /// or an item refers to an unknown category.
    pub fn from_yaml_str(contents: &str) -> Result<Self, MenuError> {
        let fixture: MenuFixture = serde_norway::from_str(contents)?;

        fixture.try_into()
    }

    /// Load a menu from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MenuError> {
        let path = path.as_ref();

        debug!(path = %path.display(), "loading menu");

        Self::from_yaml_str(&fs::read_to_string(path)?)
    }

    /// Load a named menu from `<base_path>/menu/<name>.yml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_set(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, MenuError> {
        Self::load(base_path.into().join("menu").join(format!("{name}.yml")))
    }

    /// Add a category to the end of the menu.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::DuplicateCategory`] if the id is already in use.
    pub fn add_category(&mut self, id: &str, name: &str) -> Result<&mut Self, MenuError> {
        if self.category(id).is_some() {
            return Err(MenuError::DuplicateCategory(id.to_string()));
        }

        self.categories.push(Category {
            id: id.to_string(),
            name: name.to_string(),
        });

        Ok(self)
    }

    /// Add an item under `slug`.
    ///
    /// # Errors
    ///
    /// - [`MenuError::DuplicateItem`]: the slug is already in use.
    /// - [`MenuError::UnknownCategory`]: the category hasn't been added.
    /// - [`MenuError::Pricing`]: the price isn't in the menu currency.
    pub fn add_item(&mut self, slug: &str, item: NewMenuItem) -> Result<MenuItemKey, MenuError> {
        if self.slugs.contains_key(slug) {
            return Err(MenuError::DuplicateItem(slug.to_string()));
        }

        if self.category(&item.category).is_none() {
            return Err(MenuError::UnknownCategory {
                item: slug.to_string(),
                category: item.category,
            });
        }

        ensure_same_currency(self.currency, item.price.currency())?;

        let key = self.items.insert_with_key(|key| MenuItem {
            key,
            slug: slug.to_string(),
            name: item.name,
            description: item.description,
            price: item.price,
            category: item.category,
            tags: item.tags,
        });

        self.order.push(key);
        self.slugs.insert(slug.to_string(), key);

        Ok(key)
    }

    /// Set the tags offered as menu filters.
    pub fn set_filter_tags(&mut self, tags: Tags) {
        self.filter_tags = tags;
    }

    /// Tags offered as menu filters.
    pub fn filter_tags(&self) -> &Tags {
        &self.filter_tags
    }

    /// Look up an item by key.
    pub fn get(&self, key: MenuItemKey) -> Option<&MenuItem> {
        self.items.get(key)
    }

    /// Look up an item by slug.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::ItemNotFound`] if no item has that slug.
    pub fn item(&self, slug: &str) -> Result<&MenuItem, MenuError> {
        self.slugs
            .get(slug)
            .and_then(|key| self.items.get(*key))
            .ok_or_else(|| MenuError::ItemNotFound(slug.to_string()))
    }

    /// Categories in display order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by id.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// All items in menu order.
    pub fn iter(&self) -> impl Iterator<Item = &MenuItem> {
        self.order.iter().filter_map(|key| self.items.get(*key))
    }

    /// Items of one category in menu order.
    pub fn category_items<'m>(&'m self, category: &'m str) -> impl Iterator<Item = &'m MenuItem> {
        self.iter().filter(move |item| item.category == category)
    }

    /// Number of items listed under a category.
    pub fn category_count(&self, category: &str) -> usize {
        self.category_items(category).count()
    }

    /// Items of a category that carry any of the selected tags.
    ///
    /// An empty selection shows the whole category.
    pub fn filter<'m>(
        &'m self,
        category: &'m str,
        selected: &'m Tags,
    ) -> impl Iterator<Item = &'m MenuItem> {
        self.category_items(category)
            .filter(move |item| selected.is_empty() || item.tags.intersects(selected))
    }

    /// Number of items on the menu.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the menu has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Currency every price on the menu is in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

/// Items the guest has hearted while browsing.
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    items: FxHashSet<MenuItemKey>,
}

impl Favorites {
    /// No favourites.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip an item in or out of the favourites. Returns true if it is now a favourite.
    pub fn toggle(&mut self, key: MenuItemKey) -> bool {
        if self.items.remove(&key) {
            false
        } else {
            self.items.insert(key);
            true
        }
    }

    /// Returns true if the item is a favourite.
    pub fn contains(&self, key: MenuItemKey) -> bool {
        self.items.contains(&key)
    }

    /// Number of favourites.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing has been hearted.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{
        Money,
        iso::{GBP, USD},
    };
    use testresult::TestResult;

    use super::*;

    fn pizza(name: &str, minor: i64, tags: &[&str]) -> NewMenuItem {
        NewMenuItem {
            name: name.to_string(),
            description: String::new(),
            price: Money::from_minor(minor, USD),
            category: "pizzas".to_string(),
            tags: Tags::from_strs(tags),
        }
    }

    fn small_menu() -> Result<Menu, MenuError> {
        let mut menu = Menu::new(USD);

        menu.add_category("pizzas", "Pizzas")?
            .add_category("desserts", "Desserts")?;

        menu.add_item("margherita", pizza("Margherita", 1600, &["vegetarian", "classic"]))?;
        menu.add_item("diavola", pizza("Diavola", 1900, &["spicy", "meat"]))?;
        menu.add_item("veggie", pizza("Veggie", 1700, &["vegetarian", "healthy"]))?;
        menu.add_item(
            "tiramisu",
            NewMenuItem {
                category: "desserts".to_string(),
                ..pizza("Tiramisu", 800, &[])
            },
        )?;

        Ok(menu)
    }

    #[test]
    fn add_item_stores_key_on_item() -> TestResult {
        let menu = small_menu()?;
        let item = menu.item("diavola")?;

        assert_eq!(menu.get(item.key()).map(MenuItem::name), Some("Diavola"));
        assert_eq!(item.price(), Money::from_minor(1900, USD));

        Ok(())
    }

    #[test]
    fn add_item_rejects_duplicate_slug() -> TestResult {
        let mut menu = small_menu()?;

        let result = menu.add_item("margherita", pizza("Again", 100, &[]));

        assert!(matches!(result, Err(MenuError::DuplicateItem(slug)) if slug == "margherita"));

        Ok(())
    }

    #[test]
    fn add_item_rejects_unknown_category() -> TestResult {
        let mut menu = small_menu()?;

        let result = menu.add_item(
            "calzone",
            NewMenuItem {
                category: "calzones".to_string(),
                ..pizza("Calzone", 1500, &[])
            },
        );

        assert!(matches!(result, Err(MenuError::UnknownCategory { .. })));

        Ok(())
    }

    #[test]
    fn add_item_rejects_other_currency() -> TestResult {
        let mut menu = small_menu()?;

        let result = menu.add_item(
            "import",
            NewMenuItem {
                price: Money::from_minor(1000, GBP),
                ..pizza("Import", 0, &[])
            },
        );

        assert!(matches!(result, Err(MenuError::Pricing(_))));

        Ok(())
    }

    #[test]
    fn add_category_rejects_duplicate() -> TestResult {
        let mut menu = small_menu()?;

        assert!(matches!(
            menu.add_category("pizzas", "More Pizzas"),
            Err(MenuError::DuplicateCategory(_))
        ));

        Ok(())
    }

    #[test]
    fn category_items_keep_menu_order() -> TestResult {
        let menu = small_menu()?;

        let names: Vec<&str> = menu.category_items("pizzas").map(MenuItem::name).collect();

        assert_eq!(names, vec!["Margherita", "Diavola", "Veggie"]);
        assert_eq!(menu.category_count("desserts"), 1);
        assert_eq!(menu.category_count("salads"), 0);

        Ok(())
    }

    #[test]
    fn filter_matches_any_selected_tag() -> TestResult {
        let menu = small_menu()?;
        let selected = Tags::from_strs(&["classic", "spicy"]);

        let names: Vec<&str> = menu
            .filter("pizzas", &selected)
            .map(MenuItem::name)
            .collect();

        assert_eq!(names, vec!["Margherita", "Diavola"]);

        Ok(())
    }

    #[test]
    fn filter_without_selection_shows_whole_category() -> TestResult {
        let menu = small_menu()?;
        let selected = Tags::empty();

        assert_eq!(menu.filter("pizzas", &selected).count(), 3);

        Ok(())
    }

    #[test]
    fn item_lookup_missing_errors() -> TestResult {
        let menu = small_menu()?;

        assert!(matches!(
            menu.item("calzone"),
            Err(MenuError::ItemNotFound(_))
        ));

        Ok(())
    }

    #[test]
    fn favorites_toggle() -> TestResult {
        let menu = small_menu()?;
        let key = menu.item("veggie")?.key();
        let mut favorites = Favorites::new();

        assert!(favorites.toggle(key));
        assert!(favorites.contains(key));
        assert_eq!(favorites.len(), 1);

        assert!(!favorites.toggle(key));
        assert!(favorites.is_empty());

        Ok(())
    }

    #[test]
    fn bundled_menu_loads() -> TestResult {
        let menu = Menu::bundled()?;

        assert_eq!(menu.currency(), USD);
        assert_eq!(menu.categories().len(), 4);
        assert_eq!(menu.category_count("pizzas"), 6);
        assert_eq!(menu.category_count("appetizers"), 3);
        assert_eq!(menu.category_count("salads"), 2);
        assert_eq!(menu.category_count("desserts"), 2);
        assert_eq!(menu.len(), 13);
        assert!(menu.filter_tags().contains("vegetarian"));
        assert_eq!(
            menu.item("brooklyn-margherita")?.price(),
            Money::from_minor(1600, USD)
        );

        Ok(())
    }
}
