use crate::error::{Result, StoreError};
use crate::version::Version;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    /// Object URL, data URL or plain link. Empty when the product has no image.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

/// The editable form of a product, as filled in by an admin.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category: String,
    pub in_stock: bool,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: 0.0,
            image: String::new(),
            category: String::new(),
            in_stock: true,
        }
    }
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            ..Self::default()
        }
    }

    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            image: product.image.clone(),
            category: product.category.clone(),
            in_stock: product.in_stock,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(StoreError::Validation("Product name is required".into()));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(StoreError::Validation(format!(
                "Price must be a non-negative number (got {})",
                self.price
            )));
        }
        Ok(())
    }

    pub fn select_image(&mut self, url: impl Into<String>) {
        self.image = url.into();
    }

    /// Clears the selected image if it points at `url`.
    /// Returns true when the selection was cleared.
    pub fn clear_image_if(&mut self, url: &str) -> bool {
        if !url.is_empty() && self.image == url {
            self.image.clear();
            true
        } else {
            false
        }
    }

    pub fn into_product(self, id: String) -> Result<Product> {
        self.validate()?;
        Ok(Product {
            id,
            name: self.name.trim().to_string(),
            description: self.description,
            price: self.price,
            image: self.image,
            category: self.category,
            in_stock: self.in_stock,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteSettings {
    pub site_name: String,
    pub tagline: String,
    pub about_text: String,
    pub contact_email: String,
    pub telegram: String,
    pub instagram: String,
    pub whatsapp: String,
    pub hero_title: String,
    pub hero_subtitle: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: "Your Store".to_string(),
            tagline: "Amazing products for amazing people".to_string(),
            about_text: "We offer high-quality products with excellent customer service."
                .to_string(),
            contact_email: "contact@yourstore.com".to_string(),
            telegram: "@yourstore".to_string(),
            instagram: "@yourstore".to_string(),
            whatsapp: "+1234567890".to_string(),
            hero_title: "Welcome to Your Store".to_string(),
            hero_subtitle: "Discover our amazing collection of products".to_string(),
        }
    }
}

/// Field names accepted by [`SiteSettings::set_field`], in display order.
pub const SETTINGS_FIELDS: &[&str] = &[
    "site-name",
    "tagline",
    "about-text",
    "contact-email",
    "telegram",
    "instagram",
    "whatsapp",
    "hero-title",
    "hero-subtitle",
];

impl SiteSettings {
    /// Look up a field by its kebab-case name.
    pub fn field(&self, key: &str) -> Option<&str> {
        let value = match key {
            "site-name" => &self.site_name,
            "tagline" => &self.tagline,
            "about-text" => &self.about_text,
            "contact-email" => &self.contact_email,
            "telegram" => &self.telegram,
            "instagram" => &self.instagram,
            "whatsapp" => &self.whatsapp,
            "hero-title" => &self.hero_title,
            "hero-subtitle" => &self.hero_subtitle,
            _ => return None,
        };
        Some(value.as_str())
    }

    pub fn set_field(&mut self, key: &str, value: String) -> Result<()> {
        let slot = match key {
            "site-name" => &mut self.site_name,
            "tagline" => &mut self.tagline,
            "about-text" => &mut self.about_text,
            "contact-email" => &mut self.contact_email,
            "telegram" => &mut self.telegram,
            "instagram" => &mut self.instagram,
            "whatsapp" => &mut self.whatsapp,
            "hero-title" => &mut self.hero_title,
            "hero-subtitle" => &mut self.hero_subtitle,
            other => {
                return Err(StoreError::Validation(format!(
                    "Unknown settings field: {} (expected one of: {})",
                    other,
                    SETTINGS_FIELDS.join(", ")
                )))
            }
        };
        *slot = value;
        Ok(())
    }
}

/// The unit of persistence and export: the whole catalog plus site settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppData {
    #[serde(default = "default_products")]
    pub products: Vec<Product>,
    #[serde(default)]
    pub settings: SiteSettings,
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            products: default_products(),
            settings: SiteSettings::default(),
        }
    }
}

impl AppData {
    pub fn find_product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Check every product against the same rules the editor applies.
    pub fn validate(&self) -> Result<()> {
        for product in &self.products {
            ProductDraft::from_product(product)
                .validate()
                .map_err(|e| StoreError::Validation(format!("Product {}: {}", product.id, e)))?;
        }
        Ok(())
    }
}

/// [`AppData`] plus its version, as held in the record store and written
/// to `store-data.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredData {
    #[serde(default = "default_products")]
    pub products: Vec<Product>,
    #[serde(default)]
    pub settings: SiteSettings,
    #[serde(default)]
    pub app_version: Version,
}

impl StoredData {
    pub fn new(data: AppData, version: Version) -> Self {
        Self {
            products: data.products,
            settings: data.settings,
            app_version: version,
        }
    }

    pub fn into_parts(self) -> (AppData, Version) {
        (
            AppData {
                products: self.products,
                settings: self.settings,
            },
            self.app_version,
        )
    }
}

pub fn default_products() -> Vec<Product> {
    vec![
        Product {
            id: "1".to_string(),
            name: "Premium Headphones".to_string(),
            description: "High-quality wireless headphones with noise cancellation".to_string(),
            price: 299.99,
            image: String::new(),
            category: "Electronics".to_string(),
            in_stock: true,
        },
        Product {
            id: "2".to_string(),
            name: "Smart Watch".to_string(),
            description: "Advanced fitness tracking and smart notifications".to_string(),
            price: 199.99,
            image: String::new(),
            category: "Electronics".to_string(),
            in_stock: true,
        },
        Product {
            id: "3".to_string(),
            name: "Wireless Speaker".to_string(),
            description: "Portable speaker with amazing sound quality".to_string(),
            price: 89.99,
            image: String::new(),
            category: "Electronics".to_string(),
            in_stock: false,
        },
    ]
}

/// Generate a millisecond timestamp id that is not already in `taken`.
///
/// Two creations inside the same millisecond get consecutive ids.
pub fn time_based_id<'a, I>(taken: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: HashSet<&str> = taken.into_iter().collect();
    let mut candidate = Utc::now().timestamp_millis();
    while taken.contains(candidate.to_string().as_str()) {
        candidate += 1;
    }
    candidate.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_fill_missing_fields_from_defaults() {
        let settings: SiteSettings =
            serde_json::from_str(r#"{"siteName": "Pineapple Shop"}"#).unwrap();
        assert_eq!(settings.site_name, "Pineapple Shop");
        assert_eq!(settings.tagline, SiteSettings::default().tagline);
        assert_eq!(settings.whatsapp, "+1234567890");
    }

    #[test]
    fn test_app_data_without_products_uses_default_catalog() {
        let data: AppData = serde_json::from_str(r#"{"settings": {}}"#).unwrap();
        assert_eq!(data.products.len(), 3);
        assert_eq!(data.products[2].name, "Wireless Speaker");
        assert!(!data.products[2].in_stock);
    }

    #[test]
    fn test_app_data_keeps_empty_product_list() {
        let data: AppData = serde_json::from_str(r#"{"products": []}"#).unwrap();
        assert!(data.products.is_empty());
    }

    #[test]
    fn test_product_json_field_names() {
        let product = &default_products()[0];
        let json = serde_json::to_value(product).unwrap();
        assert_eq!(json["inStock"], true);
        assert_eq!(json["price"], 299.99);
        assert!(json.get("in_stock").is_none());
    }

    #[test]
    fn test_stored_data_missing_version_is_initial() {
        let stored: StoredData = serde_json::from_str(r#"{"products": []}"#).unwrap();
        assert_eq!(stored.app_version, Version::INITIAL);
    }

    #[test]
    fn test_stored_data_serializes_app_version() {
        let stored = StoredData::new(AppData::default(), Version::from_tenths(14));
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["appVersion"], 1.4);
        assert_eq!(json["settings"]["siteName"], "Your Store");
    }

    #[test]
    fn test_draft_requires_name() {
        let draft = ProductDraft::new("   ", 10.0);
        assert!(matches!(
            draft.into_product("1".into()),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn test_app_data_validate_names_bad_product() {
        let mut data = AppData::default();
        assert!(data.validate().is_ok());

        data.products[1].price = -5.0;
        let err = data.validate().unwrap_err();
        assert!(err.to_string().starts_with("Product 2: Price must be"));
    }

    #[test]
    fn test_draft_rejects_negative_price() {
        let draft = ProductDraft::new("Mug", -1.0);
        assert!(draft.validate().is_err());
        let draft = ProductDraft::new("Mug", f64::NAN);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_draft_into_product_trims_name() {
        let product = ProductDraft::new("  Mug ", 12.5)
            .into_product("42".into())
            .unwrap();
        assert_eq!(product.name, "Mug");
        assert_eq!(product.id, "42");
        assert!(product.in_stock);
    }

    #[test]
    fn test_clear_image_if_selected() {
        let mut draft = ProductDraft::new("Mug", 1.0);
        draft.select_image("blob:shopkeep/abc");

        assert!(!draft.clear_image_if("blob:shopkeep/other"));
        assert_eq!(draft.image, "blob:shopkeep/abc");

        assert!(draft.clear_image_if("blob:shopkeep/abc"));
        assert!(draft.image.is_empty());
    }

    #[test]
    fn test_settings_set_field() {
        let mut settings = SiteSettings::default();
        settings
            .set_field("hero-title", "Summer sale".to_string())
            .unwrap();
        assert_eq!(settings.field("hero-title"), Some("Summer sale"));
        assert!(settings.set_field("colour", "red".into()).is_err());
    }

    #[test]
    fn test_time_based_id_skips_taken() {
        let first = time_based_id(std::iter::empty());
        let second = time_based_id([first.as_str()]);
        assert_ne!(first, second);
        assert!(second.parse::<i64>().is_ok());
    }
}
