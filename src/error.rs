use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// 示例链接不属于任何已知的页面命名规则
    #[error("不支持的URL格式: {0}")]
    UnsupportedPattern(String),

    #[error("URL无效 {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("配置无效: {0}")]
    InvalidSettings(String),

    #[error("配置加载失败: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("请求失败: {0}")]
    Http(#[from] reqwest::Error),

    #[error("图片处理失败 {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("PDF错误: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("没有可写入PDF的页面")]
    EmptyDocument,
}
