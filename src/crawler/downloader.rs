use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use http::StatusCode;
use reqwest::Client;
use tracing::{info, instrument, warn};

use crate::crawler::pacer::Pacer;
use crate::crawler::pattern::UrlTemplate;
use crate::crawler::processor::Processor;
use crate::error::Result;

/// 一次 GET 的结果: 状态码和响应体
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl PageResponse {
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            body: Bytes::new(),
        }
    }

    /// 只有 200 算成功
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }
}

/// 网络层接口，测试中可以替换成假的实现
pub trait Transport {
    fn get(&self, url: &str) -> impl Future<Output = Result<PageResponse>> + Send;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<PageResponse> {
        let mut response = self.client.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Ok(PageResponse::status(status));
        }

        let mut body = BytesMut::new();
        while let Some(chunk) = response.chunk().await? {
            body.extend_from_slice(&chunk);
        }
        Ok(PageResponse {
            status,
            body: body.freeze(),
        })
    }
}

pub struct Downloader<T> {
    transport: T,
}

impl<T: Transport> Downloader<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// 每页只请求一次；失败只记录日志，返回 None
    #[instrument(skip(self, processor))]
    pub async fn download_page(
        &self,
        url: &str,
        index: u32,
        processor: &Processor,
    ) -> Option<PathBuf> {
        info!("正在下载: {}", url);
        info!("保存到: {}", processor.page_path(index).display());

        let response = match self.transport.get(url).await {
            Ok(response) => response,
            Err(e) => {
                warn!("下载出错 {}: {}", url, e);
                return None;
            }
        };

        if !response.is_ok() {
            warn!("下载失败: {}", response.status);
            return None;
        }

        match processor.write_page(index, &response.body).await {
            Ok(path) => {
                info!("下载完成: {}", path.display());
                Some(path)
            }
            Err(e) => {
                warn!("第 {} 页保存失败: {}", index, e);
                None
            }
        }
    }

    /// 按页码顺序下载 1..=total_pages，每次请求后(无论成败)都等待一次
    ///
    /// 返回成功保存的文件路径，顺序与页码一致，失败的页不会出现。
    #[instrument(skip_all, fields(template = %template, total_pages = total_pages))]
    pub async fn download_pages<P: Pacer>(
        &self,
        template: &UrlTemplate,
        total_pages: u32,
        processor: &Processor,
        pacer: &mut P,
    ) -> Vec<PathBuf> {
        let mut saved = Vec::new();
        for index in 1..=total_pages {
            let url = template.page_url(index);
            if let Some(path) = self.download_page(&url, index, processor).await {
                saved.push(path);
            }

            let delay = pacer.next_delay();
            info!("暂停 {:.1} 秒...", delay.as_secs_f64());
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
        info!("下载结束: 成功 {}/{} 页", saved.len(), total_pages);
        saved
    }
}
