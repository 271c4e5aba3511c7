use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::{Error, Result};

static CONFIG_FILE: &str = "manual_fetch.toml";
static ENV_PREFIX: &str = "MANUAL_FETCH";

/// 移动版页面: .../page0001_i2.jpg
pub static BASE_URL_MOBILE: &str = "https://www.planetarypinball.com/reference/partsmanuals/BLY_Parts_1976/files/assets/mobile/page0001_i2.jpg";
/// SEO版页面: .../page1_images/0001.jpg
pub static BASE_URL_SEO: &str = "https://www.planetarypinball.com/reference/partsmanuals/BLY_Parts_1976/files/assets/seo/page1_images/0001.jpg";

/// 一次运行的全部参数，启动时构建一次，之后只读
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sample_url: String,
    pub total_pages: u32,
    pub min_delay_secs: f64,
    pub max_delay_secs: f64,
    pub dest_folder: PathBuf,
    pub pdf_name: String,
    pub jpeg_quality: u8,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sample_url: BASE_URL_MOBILE.to_owned(),
            total_pages: 220,
            min_delay_secs: 5.0,
            max_delay_secs: 15.0,
            dest_folder: PathBuf::from("downloaded_pages"),
            pdf_name: "Manual.pdf".to_owned(),
            jpeg_quality: 90,
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    /// 默认值 < manual_fetch.toml < MANUAL_FETCH_* 环境变量
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[instrument]
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let settings: Settings = config::Config::builder()
            .add_source(
                config::File::from(config_path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        debug!("配置加载完成: {:?}", settings);
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.total_pages == 0 {
            return Err(Error::InvalidSettings("total_pages 至少为 1".to_owned()));
        }
        if !(self.min_delay_secs.is_finite() && self.max_delay_secs.is_finite())
            || self.min_delay_secs < 0.0
            || self.min_delay_secs > self.max_delay_secs
        {
            return Err(Error::InvalidSettings(format!(
                "延迟区间无效: [{}, {}]",
                self.min_delay_secs, self.max_delay_secs
            )));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(Error::InvalidSettings(format!(
                "jpeg_quality 必须在 1..=100 之间: {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }

    pub fn delay_bounds(&self) -> (Duration, Duration) {
        (
            Duration::from_secs_f64(self.min_delay_secs),
            Duration::from_secs_f64(self.max_delay_secs),
        )
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn pdf_path(&self) -> PathBuf {
        self.dest_folder.join(&self.pdf_name)
    }
}
