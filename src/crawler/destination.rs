use std::path::Path;

use tokio::fs;
use tracing::{error, info, instrument};

use crate::error::Result;

/// 准备下载目录: 已存在则删除其中的普通文件(不进入子目录)，不存在则创建
///
/// 单个文件删除失败只记录日志；目录创建失败直接返回错误。
#[instrument]
pub async fn prepare(folder: &Path) -> Result<()> {
    if fs::try_exists(folder).await? {
        info!("正在清理下载目录: {}", folder.display());
        let mut entries = fs::read_dir(folder).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_file = match fs::metadata(&path).await {
                Ok(meta) => meta.is_file(),
                Err(e) => {
                    error!("无法读取文件信息 {}: {}", path.display(), e);
                    continue;
                }
            };
            if !is_file {
                continue;
            }
            if let Err(e) = fs::remove_file(&path).await {
                error!("删除文件失败 {}: {}", path.display(), e);
            }
        }
        info!("下载目录已清理");
    } else {
        info!("正在创建下载目录: {}", folder.display());
        fs::create_dir_all(folder).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_directory_with_parents() {
        let root = tempfile::tempdir().unwrap();
        let folder = root.path().join("a").join("b");

        prepare(&folder).await.unwrap();

        assert!(folder.is_dir());
    }

    #[tokio::test]
    async fn removes_top_level_files_and_keeps_subdirectories() {
        let root = tempfile::tempdir().unwrap();
        let folder = root.path();
        std::fs::write(folder.join("page_001.jpg"), b"old").unwrap();
        std::fs::write(folder.join("Manual.pdf"), b"old").unwrap();
        std::fs::create_dir(folder.join("keep")).unwrap();
        std::fs::write(folder.join("keep").join("nested.txt"), b"nested").unwrap();

        prepare(folder).await.unwrap();

        assert!(!folder.join("page_001.jpg").exists());
        assert!(!folder.join("Manual.pdf").exists());
        assert!(folder.join("keep").is_dir());
        assert!(folder.join("keep").join("nested.txt").exists());
    }

    #[tokio::test]
    async fn second_run_starts_from_an_empty_folder() {
        let root = tempfile::tempdir().unwrap();
        let folder = root.path().join("downloaded_pages");

        prepare(&folder).await.unwrap();
        std::fs::write(folder.join("page_001.jpg"), b"first run").unwrap();
        std::fs::write(folder.join("page_002.jpg"), b"first run").unwrap();
        prepare(&folder).await.unwrap();

        assert_eq!(std::fs::read_dir(&folder).unwrap().count(), 0);
    }
}
