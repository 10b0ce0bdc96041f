//! 업로드 이미지 수집 테스트

use smartfarm::error::SmartFarmError;
use smartfarm::scanner;
use std::path::PathBuf;
use tempfile::tempdir;

/// 빈 폴더는 에러가 아니라 빈 목록
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scanner::scan_folder(dir.path()).unwrap();
    assert!(result.is_empty());
}

/// 이미지만 파일명 순으로, 하위 폴더는 제외
#[test]
fn test_scan_folder_sorted_images_only() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("b.png"), b"x").unwrap();
    std::fs::write(dir.path().join("a.JPG"), b"x").unwrap();
    std::fs::write(dir.path().join("memo.txt"), b"x").unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    std::fs::write(dir.path().join("sub").join("c.jpg"), b"x").unwrap();

    let images = scanner::scan_folder(dir.path()).unwrap();
    let names: Vec<String> = images
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a.JPG", "b.png"]);
}

/// 파일과 폴더 혼합 입력
#[test]
fn test_collect_upload_files_mixed() {
    let dir = tempdir().expect("Failed to create temp dir");
    let folder = dir.path().join("photos");
    std::fs::create_dir(&folder).unwrap();
    std::fs::write(folder.join("1.jpg"), b"x").unwrap();
    std::fs::write(folder.join("2.webp"), b"x").unwrap();
    let single = dir.path().join("single.jpeg");
    std::fs::write(&single, b"x").unwrap();
    let text = dir.path().join("note.txt");
    std::fs::write(&text, b"x").unwrap();

    let files = scanner::collect_upload_files(&[single.clone(), folder, text]).unwrap();
    assert_eq!(files.len(), 3);
    assert_eq!(files[0], single);
}

/// 없는 경로
#[test]
fn test_collect_missing_file() {
    let result = scanner::collect_upload_files(&[PathBuf::from("/nonexistent/a.jpg")]);
    assert!(matches!(result, Err(SmartFarmError::FileNotFound(_))));
}

/// 이미지가 하나도 없으면 에러
#[test]
fn test_collect_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("data.json"), "{}").unwrap();

    let result = scanner::collect_upload_files(&[dir.path().to_path_buf()]);
    assert!(matches!(result, Err(SmartFarmError::NoImagesFound(_))));
}
