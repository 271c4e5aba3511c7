pub mod destination;
pub mod downloader;
pub mod pacer;
pub mod pattern;
pub mod processor;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, instrument};

pub use downloader::{Downloader, HttpTransport, PageResponse, Transport};
pub use pacer::{FixedPacer, Pacer, RandomPacer};
pub use pattern::{PageNaming, UrlTemplate};
pub use processor::Processor;

use crate::config::Settings;
use crate::pdf;
use crate::prompt::{self, Confirm, ConsoleConfirm};

/// 一次运行的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub requested_pages: u32,
    /// 按页码升序，失败的页不在其中
    pub downloaded: Vec<PathBuf>,
    pub pdf: Option<PathBuf>,
    pub images_deleted: bool,
}

pub struct ManualCrawler<T, P, C> {
    settings: Settings,
    downloader: Downloader<T>,
    pacer: P,
    confirm: C,
}

impl ManualCrawler<HttpTransport, RandomPacer, ConsoleConfirm> {
    pub fn new(settings: Settings) -> Result<Self> {
        let transport = HttpTransport::new(settings.request_timeout())?;
        let (min, max) = settings.delay_bounds();
        Ok(Self::with_parts(
            settings,
            transport,
            RandomPacer::new(min, max),
            ConsoleConfirm,
        ))
    }
}

impl<T, P, C> ManualCrawler<T, P, C>
where
    T: Transport,
    P: Pacer,
    C: Confirm,
{
    pub fn with_parts(settings: Settings, transport: T, pacer: P, confirm: C) -> Self {
        Self {
            settings,
            downloader: Downloader::new(transport),
            pacer,
            confirm,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// 清理目录 -> 解析URL模板 -> 逐页下载 -> 合成PDF -> 询问是否删除图片
    #[instrument(skip_all)]
    pub async fn run(&mut self) -> Result<RunReport> {
        let dest_folder = self.settings.dest_folder.clone();
        destination::prepare(&dest_folder)
            .await
            .with_context(|| format!("无法准备下载目录 {}", dest_folder.display()))?;

        let template = UrlTemplate::resolve(&self.settings.sample_url)?;

        let processor = Processor::new(dest_folder);
        let downloaded = self
            .downloader
            .download_pages(
                &template,
                self.settings.total_pages,
                &processor,
                &mut self.pacer,
            )
            .await;

        let pdf = pdf::create_pdf_from_images(
            &downloaded,
            &self.settings.pdf_path(),
            self.settings.jpeg_quality,
        )
        .context("PDF生成失败")?;

        let images_deleted = prompt::cleanup_images(&mut self.confirm, &downloaded)?;

        info!("任务完成!");
        Ok(RunReport {
            requested_pages: self.settings.total_pages,
            downloaded,
            pdf,
            images_deleted,
        })
    }
}
