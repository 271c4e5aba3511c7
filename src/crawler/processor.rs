use std::path::PathBuf;

use bytes::Bytes;
use tokio::fs;
use tracing::{info, instrument};

use crate::error::Result;
use crate::utils::zero_pad;

/// 本地文件名中页码的最小位数
pub const FILE_INDEX_WIDTH: usize = 3;

pub fn page_file_name(index: u32) -> String {
    format!("page_{}.jpg", zero_pad(index, FILE_INDEX_WIDTH))
}

/// 负责把页面图片落盘
#[derive(Clone, Debug)]
pub struct Processor {
    page_dir: PathBuf,
}

impl Processor {
    pub fn new(page_dir: PathBuf) -> Self {
        Self { page_dir }
    }

    pub fn page_path(&self, index: u32) -> PathBuf {
        self.page_dir.join(page_file_name(index))
    }

    /// 同名文件直接覆盖
    #[instrument(skip(self, page_bytes))]
    pub async fn write_page(&self, index: u32, page_bytes: &Bytes) -> Result<PathBuf> {
        let page_path = self.page_path(index);
        fs::write(&page_path, page_bytes).await?;
        info!("已保存: {} ({} 字节)", page_path.display(), page_bytes.len());
        Ok(page_path)
    }
}
