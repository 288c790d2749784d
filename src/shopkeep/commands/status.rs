use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::{ShopStore, StorageBackend};
use crate::sync::DataOrigin;
use crate::version::Version;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub authenticated: bool,
    pub version: Version,
    pub origin: DataOrigin,
    pub products: usize,
    pub in_stock: usize,
    pub images: usize,
    pub has_changes: bool,
}

pub fn run<B: StorageBackend>(store: &ShopStore<B>) -> Result<CmdResult> {
    let products = &store.data().products;
    let report = StatusReport {
        authenticated: store.is_authenticated(),
        version: store.version(),
        origin: store.origin(),
        products: products.len(),
        in_stock: products.iter().filter(|p| p.in_stock).count(),
        images: store.images().len(),
        has_changes: store.has_changes(),
    };
    Ok(CmdResult::default().with_status(report))
}
