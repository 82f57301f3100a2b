use super::*;
use std::fs;
use tempfile::TempDir;

fn write(path: &Path, bytes: usize) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, vec![0u8; bytes]).unwrap();
}

fn shop_fixture() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let shop = tmp.path().join("shop");
    write(&shop.join("a.png"), 10);
    write(&shop.join("notes.txt"), 3);
    write(&shop.join("summer").join("sandal.JPG"), 2048);
    write(&shop.join(".hidden.png"), 1);
    write(&shop.join(".git").join("x.png"), 1);
    (tmp, shop)
}

#[test]
fn test_mime_for_path() {
    assert_eq!(mime_for_path(Path::new("a.png")), "image/png");
    assert_eq!(mime_for_path(Path::new("a.JPEG")), "image/jpeg");
    assert_eq!(mime_for_path(Path::new("a.svg")), "image/svg+xml");
    assert_eq!(mime_for_path(Path::new("a.csv")), "text/csv");
    assert_eq!(mime_for_path(Path::new("a.xyz")), FALLBACK_MIME);
    assert_eq!(mime_for_path(Path::new("noext")), FALLBACK_MIME);
}

#[test]
fn test_scan_order_and_hidden() {
    let (_tmp, shop) = shop_fixture();
    let files = scan_uploads(&shop).unwrap();
    let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["a.png", "notes.txt", "sandal.JPG"]);
}

#[test]
fn test_scan_metadata() {
    let (_tmp, shop) = shop_fixture();
    let files = scan_uploads(&shop).unwrap();

    assert_eq!(files[0].mime_type, "image/png");
    assert_eq!(files[0].size_bytes, 10);
    assert_eq!(files[0].category.as_deref(), Some("shop"));
    assert!(files[0].last_modified.is_some());

    assert_eq!(files[1].mime_type, "text/plain");

    assert_eq!(files[2].mime_type, "image/jpeg");
    assert_eq!(files[2].size_bytes, 2048);
    assert_eq!(files[2].category.as_deref(), Some("summer"));
}

#[test]
fn test_scan_rejects_file_root() {
    let (_tmp, shop) = shop_fixture();
    assert!(matches!(
        scan_uploads(&shop.join("a.png")),
        Err(LibError::NotADirectory(_))
    ));
}

#[test]
fn test_uploads_from_paths_keeps_order() {
    let (_tmp, shop) = shop_fixture();
    let paths = vec![shop.join("summer").join("sandal.JPG"), shop.join("a.png")];
    let files = uploads_from_paths(&paths).unwrap();
    assert_eq!(files[0].name, "sandal.JPG");
    assert_eq!(files[0].category.as_deref(), Some("summer"));
    assert_eq!(files[1].name, "a.png");
    assert_eq!(files[1].category.as_deref(), Some("shop"));
}

#[test]
fn test_uploads_from_paths_rejects_missing() {
    let (_tmp, shop) = shop_fixture();
    let err = uploads_from_paths(&[shop.join("gone.png")]).unwrap_err();
    assert!(matches!(err, LibError::NotAFile(_)));
}

#[cfg(unix)]
#[test]
fn test_symlinked_folder_loop_is_not_followed() {
    let (_tmp, shop) = shop_fixture();
    std::os::unix::fs::symlink(&shop, shop.join("summer").join("back")).unwrap();
    std::os::unix::fs::symlink(shop.join("a.png"), shop.join("link.png")).unwrap();

    let files = scan_uploads(&shop).unwrap();
    let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["a.png", "link.png", "notes.txt", "sandal.JPG"]);
}
