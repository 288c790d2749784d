use crate::commands::helpers::{persist, require_auth};
use crate::commands::{CmdMessage, CmdResult};
use crate::download::Downloads;
use crate::error::{Result, StoreError};
use crate::model::{time_based_id, ProductDraft};
use crate::store::{ShopStore, StorageBackend};

/// Field changes for an existing product. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ProductEdit {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

impl ProductEdit {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.image.is_none()
            && self.category.is_none()
            && self.in_stock.is_none()
    }

    fn apply(self, draft: &mut ProductDraft) {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(price) = self.price {
            draft.price = price;
        }
        if let Some(image) = self.image {
            draft.image = image;
        }
        if let Some(category) = self.category {
            draft.category = category;
        }
        if let Some(in_stock) = self.in_stock {
            draft.in_stock = in_stock;
        }
    }
}

/// A gallery image id becomes that image's current URL; anything else is
/// taken as a literal link.
pub fn resolve_image<B: StorageBackend>(store: &ShopStore<B>, value: &str) -> String {
    store
        .images()
        .url_for(value)
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}

pub fn list<B: StorageBackend>(store: &ShopStore<B>) -> Result<CmdResult> {
    let products = store.data().products.clone();
    let mut result = CmdResult::default().with_products(products);
    if result.products.is_empty() {
        result.add_message(CmdMessage::info("No products."));
    }
    Ok(result)
}

pub fn add<B: StorageBackend, D: Downloads>(
    store: &mut ShopStore<B>,
    downloads: &D,
    mut draft: ProductDraft,
) -> Result<CmdResult> {
    require_auth(store)?;
    draft.image = resolve_image(store, &draft.image);

    let mut data = store.data().clone();
    let id = time_based_id(data.products.iter().map(|p| p.id.as_str()));
    let product = draft.into_product(id)?;
    data.products.push(product.clone());

    let mut result = CmdResult::default();
    persist(store, downloads, data, &mut result)?;
    result.add_message(CmdMessage::success(format!(
        "Added product {} ({})",
        product.name, product.id
    )));
    Ok(result.with_products(vec![product]))
}

pub fn update<B: StorageBackend, D: Downloads>(
    store: &mut ShopStore<B>,
    downloads: &D,
    id: &str,
    mut edit: ProductEdit,
) -> Result<CmdResult> {
    require_auth(store)?;

    let mut data = store.data().clone();
    let pos = data
        .products
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| StoreError::ProductNotFound(id.to_string()))?;

    if let Some(image) = edit.image.take() {
        edit.image = Some(resolve_image(store, &image));
    }
    let mut draft = ProductDraft::from_product(&data.products[pos]);
    edit.apply(&mut draft);
    let product = draft.into_product(id.to_string())?;
    data.products[pos] = product.clone();

    let mut result = CmdResult::default();
    persist(store, downloads, data, &mut result)?;
    result.add_message(CmdMessage::success(format!(
        "Updated product {} ({})",
        product.name, product.id
    )));
    Ok(result.with_products(vec![product]))
}

pub fn remove<B: StorageBackend, D: Downloads>(
    store: &mut ShopStore<B>,
    downloads: &D,
    id: &str,
) -> Result<CmdResult> {
    require_auth(store)?;

    let mut data = store.data().clone();
    let pos = data
        .products
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| StoreError::ProductNotFound(id.to_string()))?;
    let removed = data.products.remove(pos);

    let mut result = CmdResult::default();
    persist(store, downloads, data, &mut result)?;
    result.add_message(CmdMessage::success(format!(
        "Removed product {} ({})",
        removed.name, removed.id
    )));
    Ok(result.with_products(vec![removed]))
}
