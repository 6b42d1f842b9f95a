//! Menu Fixtures
//!
//! YAML representation of a [`Menu`].

use serde::Deserialize;

use crate::{
    menu::{Menu, MenuError, NewMenuItem},
    pricing::parse_price,
    tags::Tags,
};

/// Whole menu file
#[derive(Debug, Deserialize)]
pub struct MenuFixture {
    /// Currency code every price uses (e.g., "USD")
    pub currency: String,

    /// Categories in display order
    pub categories: Vec<CategoryFixture>,

    /// Items in display order
    pub items: Vec<MenuItemFixture>,

    /// Tags offered as filters
    #[serde(default)]
    pub filters: Vec<String>,
}

/// Category Fixture
#[derive(Debug, Deserialize)]
pub struct CategoryFixture {
    /// Category id
    pub id: String,

    /// Display name
    pub name: String,
}

/// Menu Item Fixture
#[derive(Debug, Deserialize)]
pub struct MenuItemFixture {
    /// Item slug
    pub id: String,

    /// Display name
    pub name: String,

    /// Category id
    pub category: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Price (e.g., "16.00 USD")
    pub price: String,

    /// Tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TryFrom<MenuFixture> for Menu {
    type Error = MenuError;

    fn try_from(fixture: MenuFixture) -> Result<Self, Self::Error> {
        // The currency code is validated by parsing a zero amount in it.
        let currency = parse_price(&format!("0 {}", fixture.currency))?.currency();
        let mut menu = Menu::new(currency);

        for category in &fixture.categories {
            menu.add_category(&category.id, &category.name)?;
        }

        for item in fixture.items {
            let price = parse_price(&item.price)?;

            menu.add_item(
                &item.id,
                NewMenuItem {
                    name: item.name,
                    description: item.description,
                    price,
                    category: item.category,
                    tags: item.tags.iter().map(String::as_str).collect(),
                },
            )?;
        }

        menu.set_filter_tags(fixture.filters.iter().map(String::as_str).collect::<Tags>());

        Ok(menu)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rusty_money::iso::EUR;
    use testresult::TestResult;

    use crate::pricing::PricingError;

    use super::*;

    const TRATTORIA: &str = r#"
currency: EUR
categories:
  - id: pasta
    name: Pasta
items:
  - id: carbonara
    name: Carbonara
    category: pasta
    price: "12.50 EUR"
    tags: [classic]
  - id: cacio-e-pepe
    name: Cacio e Pepe
    category: pasta
    price: "11 EUR"
filters: [classic]
"#;

    #[test]
    fn parses_menu_yaml() -> TestResult {
        let menu = Menu::from_yaml_str(TRATTORIA)?;

        assert_eq!(menu.currency(), EUR);
        assert_eq!(menu.len(), 2);
        assert_eq!(menu.item("carbonara")?.price().to_minor_units(), 1250);
        assert!(menu.item("carbonara")?.tags().contains("classic"));
        assert!(menu.item("cacio-e-pepe")?.tags().is_empty());
        assert!(menu.item("cacio-e-pepe")?.description().is_empty());
        assert!(menu.filter_tags().contains("classic"));

        Ok(())
    }

    #[test]
    fn rejects_unknown_currency() {
        let result = Menu::from_yaml_str("currency: XYZ\ncategories: []\nitems: []\n");

        assert!(matches!(
            result,
            Err(MenuError::Pricing(PricingError::UnknownCurrency(_)))
        ));
    }

    #[test]
    fn rejects_mixed_currencies() {
        let yaml = TRATTORIA.replace("\"11 EUR\"", "\"11 USD\"");

        let result = Menu::from_yaml_str(&yaml);

        assert!(matches!(
            result,
            Err(MenuError::Pricing(PricingError::CurrencyMismatch(
                "EUR", "USD"
            )))
        ));
    }

    #[test]
    fn rejects_malformed_yaml() {
        let result = Menu::from_yaml_str("currency: [");

        assert!(matches!(result, Err(MenuError::Yaml(_))));
    }

    #[test]
    fn from_set_reads_named_menu() -> TestResult {
        let dir = tempfile::tempdir()?;
        fs::create_dir_all(dir.path().join("menu"))?;
        fs::write(dir.path().join("menu").join("trattoria.yml"), TRATTORIA)?;

        let menu = Menu::from_set(dir.path(), "trattoria")?;

        assert_eq!(menu.category_count("pasta"), 2);

        Ok(())
    }

    #[test]
    fn from_set_missing_file_errors() -> TestResult {
        let dir = tempfile::tempdir()?;

        let result = Menu::from_set(dir.path(), "missing");

        assert!(matches!(result, Err(MenuError::Io(_))));

        Ok(())
    }
}
