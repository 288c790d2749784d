use shopkeep::model::ProductDraft;
use shopkeep::source::{FileSource, PUBLISHED_FILE_NAME};
use shopkeep::store::backend::{Area, StorageBackend};
use shopkeep::store::fs_backend::FsBackend;
use shopkeep::store::images::MAX_IMAGE_BYTES;
use shopkeep::store::ShopStore;
use shopkeep::sync::DataOrigin;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let root = TempDir::new().unwrap();
    let backend = FsBackend::new(root.path().to_path_buf());
    (root, backend)
}

#[test]
fn test_fs_backend_basic_io() {
    let (_root, backend) = setup();

    backend.put(Area::Local, "storeData", "{}").unwrap();
    assert_eq!(
        backend.get(Area::Local, "storeData").unwrap(),
        Some("{}".to_string())
    );
    // Areas are separate namespaces.
    assert_eq!(backend.get(Area::Records, "storeData").unwrap(), None);

    backend.remove(Area::Local, "storeData").unwrap();
    assert_eq!(backend.get(Area::Local, "storeData").unwrap(), None);
    // Removing a missing key is not an error.
    backend.remove(Area::Local, "storeData").unwrap();
}

#[test]
fn test_fs_backend_layout_and_no_tmp_leftovers() {
    let (root, backend) = setup();

    backend.put(Area::Records, "appData", "first").unwrap();
    backend.put(Area::Records, "appData", "second").unwrap();

    let path = root.path().join("records").join("appData.json");
    assert_eq!(fs::read_to_string(&path).unwrap(), "second");

    for entry in fs::read_dir(root.path().join("records")).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_fs_backend_one_file_per_key() {
    let (root, backend) = setup();
    backend.put(Area::Local, "storedImages", "[]").unwrap();
    backend.put(Area::Local, "adminAuthStatus", "true").unwrap();

    let mut names: Vec<String> = fs::read_dir(root.path().join("local"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["adminAuthStatus.json", "storedImages.json"]);
}

#[test]
fn test_fs_backend_rejects_escaping_keys() {
    let (_root, backend) = setup();
    assert!(backend.put(Area::Local, "../outside", "x").is_err());
    assert!(backend.get(Area::Local, "a/b").is_err());
}

#[test]
fn test_store_survives_restart_on_disk() {
    let (root, backend) = setup();
    let published = FileSource::new(root.path().join("public").join(PUBLISHED_FILE_NAME));

    let mut store = ShopStore::open(backend, &published, MAX_IMAGE_BYTES);
    store.set_authenticated(true).unwrap();
    store.reload(&published);

    let mut data = store.data().clone();
    data.products.push(
        ProductDraft::new("Teapot", 24.0)
            .into_product("77".into())
            .unwrap(),
    );
    store.commit(data).unwrap();

    let reopened = ShopStore::open(
        FsBackend::new(root.path().to_path_buf()),
        &published,
        MAX_IMAGE_BYTES,
    );
    assert_eq!(reopened.origin(), DataOrigin::Records);
    assert_eq!(reopened.version().to_string(), "1.1");
    assert!(reopened.data().find_product("77").is_some());
}

#[test]
fn test_newer_published_file_replaces_records_on_disk() {
    let (root, backend) = setup();
    let public_dir = root.path().join("public");
    fs::create_dir_all(&public_dir).unwrap();
    let published = FileSource::new(public_dir.join(PUBLISHED_FILE_NAME));

    let mut store = ShopStore::open(backend, &published, MAX_IMAGE_BYTES);
    store.set_authenticated(true).unwrap();
    store.reload(&published);
    let data = store.data().clone();
    store.commit(data).unwrap();
    assert_eq!(store.version().to_string(), "1.1");

    fs::write(
        public_dir.join(PUBLISHED_FILE_NAME),
        r#"{"products": [], "settings": {"siteName": "Deployed"}, "appVersion": 1.5}"#,
    )
    .unwrap();
    store.reload(&published);

    assert_eq!(store.origin(), DataOrigin::Published);
    assert_eq!(store.data().settings.site_name, "Deployed");
    let on_disk = fs::read_to_string(root.path().join("records").join("appData.json")).unwrap();
    assert!(on_disk.contains("Deployed"));
}
