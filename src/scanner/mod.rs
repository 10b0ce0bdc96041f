//! 업로드할 이미지 수집

use crate::error::{Result, SmartFarmError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// 폴더 직하의 이미지 목록 (파일명 순)
pub fn scan_folder(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(SmartFarmError::FolderNotFound(folder.display().to_string()));
    }

    let mut images: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(1)  // 직하만
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && is_image_path(path))
        .collect();

    images.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));
    Ok(images)
}

/// 명령행 인자(파일 또는 폴더)를 업로드 파일 목록으로 펼친다
///
/// 폴더는 직하 이미지로 펼치고, 이미지가 아닌 파일은 건너뛴다.
pub fn collect_upload_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(scan_folder(input)?);
        } else if input.is_file() {
            if is_image_path(input) {
                files.push(input.clone());
            } else {
                tracing::warn!("이미지가 아니어서 건너뜀: {}", input.display());
            }
        } else {
            return Err(SmartFarmError::FileNotFound(input.display().to_string()));
        }
    }

    if files.is_empty() {
        let names: Vec<String> = inputs.iter().map(|p| p.display().to_string()).collect();
        return Err(SmartFarmError::NoImagesFound(names.join(", ")));
    }
    Ok(files)
}
