// mediaconv-core/tests/discovery_tests.rs

use mediaconv_core::discovery::{ensure_input_dir, list_input_dir};
use mediaconv_core::error::CoreError;
use std::fs::{self, File};
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_list_input_dir() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input_dir = dir.path();

    File::create(input_dir.join("photo.png"))?;
    File::create(input_dir.join("clip.MP4"))?;
    File::create(input_dir.join("document.txt"))?;
    fs::create_dir(input_dir.join("subdir"))?;
    File::create(input_dir.join("subdir").join("nested.png"))?; // Not listed, no recursion

    let mut listing = list_input_dir(input_dir)?;
    listing.files.sort();

    // Unsupported files are still listed; classification happens later
    assert_eq!(listing.files.len(), 3);
    assert_eq!(listing.files[0].file_name().unwrap(), "clip.MP4"); // Original case preserved
    assert_eq!(listing.files[1].file_name().unwrap(), "document.txt");
    assert_eq!(listing.files[2].file_name().unwrap(), "photo.png");
    assert_eq!(listing.others, vec![input_dir.join("subdir")]);
    assert_eq!(listing.total(), 4);

    dir.close()?;
    Ok(())
}

#[test]
fn test_list_input_dir_empty() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    let listing = list_input_dir(dir.path())?;
    assert!(listing.files.is_empty());
    assert!(listing.others.is_empty());

    dir.close()?;
    Ok(())
}

#[test]
fn test_list_input_dir_nonexistent_dir() {
    let non_existent_path = PathBuf::from("surely_this_does_not_exist_42_integration");
    let result = list_input_dir(&non_existent_path);
    match result {
        Err(CoreError::InputDirectoryMissing(path)) => assert_eq!(path, non_existent_path),
        other => panic!("Expected InputDirectoryMissing, got {:?}", other),
    }
}

#[test]
fn test_ensure_input_dir_rejects_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let file = dir.path().join("photo.png");
    File::create(&file)?;

    assert!(ensure_input_dir(dir.path()).is_ok());
    assert!(matches!(
        ensure_input_dir(&file),
        Err(CoreError::InputDirectoryMissing(_))
    ));
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_followed() -> Result<(), Box<dyn std::error::Error>> {
    use std::os::unix::fs::symlink;

    let dir = tempdir()?;
    let target_dir = tempdir()?;
    let real_file = target_dir.path().join("real.jpg");
    File::create(&real_file)?;

    symlink(&real_file, dir.path().join("linked.jpg"))?;
    symlink(target_dir.path(), dir.path().join("linked_dir"))?;
    symlink(dir.path().join("missing.png"), dir.path().join("dangling.png"))?;

    let mut listing = list_input_dir(dir.path())?;
    listing.others.sort();

    assert_eq!(listing.files, vec![dir.path().join("linked.jpg")]);
    assert_eq!(
        listing.others,
        vec![dir.path().join("dangling.png"), dir.path().join("linked_dir")]
    );
    Ok(())
}
