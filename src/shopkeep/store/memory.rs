use super::images::MAX_IMAGE_BYTES;
use super::mem_backend::MemBackend;
use super::shop_store::ShopStore;
use crate::source::StaticSource;

pub type InMemoryShop = ShopStore<MemBackend>;

impl InMemoryShop {
    /// A public session over empty memory storage.
    pub fn in_memory() -> Self {
        ShopStore::open(MemBackend::new(), &StaticSource::absent(), MAX_IMAGE_BYTES)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::ProductDraft;
    use crate::store::images::UploadedFile;
    use crate::store::local::LocalStore;

    pub struct ShopFixture {
        pub store: InMemoryShop,
    }

    impl Default for ShopFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ShopFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryShop::in_memory(),
            }
        }

        /// Logged-in session, reconciled the way `login` does it.
        pub fn admin() -> Self {
            let backend = MemBackend::new();
            LocalStore::new(&backend).set_authenticated(true).unwrap();
            Self {
                store: ShopStore::open(backend, &StaticSource::absent(), MAX_IMAGE_BYTES),
            }
        }

        pub fn with_product(mut self, name: &str, price: f64) -> Self {
            let mut data = self.store.data().clone();
            let id = format!("fixture-{}", data.products.len() + 1);
            data.products
                .push(ProductDraft::new(name, price).into_product(id).unwrap());
            self.store.commit(data).unwrap();
            self
        }

        pub fn with_image(mut self, name: &str, bytes: &[u8]) -> Self {
            self.store
                .upload_image(UploadedFile {
                    name: name.to_string(),
                    mime: "image/png".to_string(),
                    bytes: bytes.to_vec(),
                })
                .unwrap();
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::ShopFixture;
    use super::*;
    use crate::version::Version;

    #[test]
    fn test_in_memory_is_public() {
        let store = InMemoryShop::in_memory();
        assert!(!store.is_authenticated());
        assert_eq!(store.version(), Version::INITIAL);
    }

    #[test]
    fn test_fixture_builders() {
        let fixture = ShopFixture::admin()
            .with_product("Mug", 4.0)
            .with_image("a.png", &[1]);
        assert!(fixture.store.is_authenticated());
        assert_eq!(fixture.store.data().products.len(), 4);
        assert_eq!(fixture.store.images().len(), 1);
        assert_eq!(fixture.store.version(), Version::from_tenths(11));
    }
}
