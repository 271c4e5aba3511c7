use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{info, instrument};
use url::Url;

use crate::error::{Error, Result};
use crate::utils::zero_pad;

/// URL中页码的位数
pub const URL_INDEX_WIDTH: usize = 4;

// .../page0001_i2.jpg
static MOBILE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*/page)\d+_i2\.jpg$").expect("无法编译移动版URL正则"));

// .../page1_images/0001.jpg
static SEO_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*/page\d+_images/)\d+\.jpg$").expect("无法编译SEO版URL正则"));

/// 页面图片的两种命名规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNaming {
    /// `page` + 4位页码 + `_i2.jpg`
    Mobile,
    /// `page<n>_images/` + 4位页码 + `.jpg`
    Seo,
}

impl PageNaming {
    fn suffix(self, index: u32) -> String {
        match self {
            PageNaming::Mobile => format!("{}_i2.jpg", zero_pad(index, URL_INDEX_WIDTH)),
            PageNaming::Seo => format!("{}.jpg", zero_pad(index, URL_INDEX_WIDTH)),
        }
    }
}

/// 由一个示例链接推导出的页面URL模板: 固定前缀 + 按页码格式化的后缀
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    prefix: String,
    naming: PageNaming,
}

impl UrlTemplate {
    /// 只做语法匹配，不会请求示例链接，也不要求示例页码为 1
    #[instrument]
    pub fn resolve(sample_url: &str) -> Result<Self> {
        let template = if let Some(caps) = MOBILE_PATTERN.captures(sample_url) {
            Self {
                prefix: caps[1].to_owned(),
                naming: PageNaming::Mobile,
            }
        } else if let Some(caps) = SEO_PATTERN.captures(sample_url) {
            Self {
                prefix: caps[1].to_owned(),
                naming: PageNaming::Seo,
            }
        } else {
            return Err(Error::UnsupportedPattern(sample_url.to_owned()));
        };

        let first = template.page_url(1);
        Url::parse(&first).map_err(|source| Error::InvalidUrl { url: first, source })?;

        info!("使用URL模板: {}", template);
        Ok(template)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn naming(&self) -> PageNaming {
        self.naming
    }

    pub fn page_url(&self, index: u32) -> String {
        format!("{}{}", self.prefix, self.naming.suffix(index))
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.naming {
            PageNaming::Mobile => write!(f, "{}{{:04}}_i2.jpg", self.prefix),
            PageNaming::Seo => write!(f, "{}{{:04}}.jpg", self.prefix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BASE_URL_MOBILE, BASE_URL_SEO};

    #[test]
    fn resolves_mobile_pattern() {
        let template = UrlTemplate::resolve(BASE_URL_MOBILE).unwrap();
        assert_eq!(template.naming(), PageNaming::Mobile);
        assert_eq!(
            template.prefix(),
            "https://www.planetarypinball.com/reference/partsmanuals/BLY_Parts_1976/files/assets/mobile/page"
        );
        assert_eq!(template.page_url(1), BASE_URL_MOBILE);
        assert!(template.page_url(9999).ends_with("/page9999_i2.jpg"));
    }

    #[test]
    fn resolves_seo_pattern() {
        let template = UrlTemplate::resolve(BASE_URL_SEO).unwrap();
        assert_eq!(template.naming(), PageNaming::Seo);
        assert!(template.prefix().ends_with("/seo/page1_images/"));
        assert_eq!(template.page_url(1), BASE_URL_SEO);
        assert!(template.page_url(9999).ends_with("/page1_images/9999.jpg"));
    }

    #[test]
    fn first_and_last_pages_are_distinct_valid_urls() {
        for sample in [BASE_URL_MOBILE, BASE_URL_SEO] {
            let template = UrlTemplate::resolve(sample).unwrap();
            let first = Url::parse(&template.page_url(1)).unwrap();
            let last = Url::parse(&template.page_url(9999)).unwrap();
            assert_ne!(first, last);
            assert_eq!(first.host_str(), last.host_str());
        }
    }

    #[test]
    fn sample_page_number_is_not_checked() {
        let template =
            UrlTemplate::resolve("https://example.com/assets/mobile/page0042_i2.jpg").unwrap();
        assert_eq!(
            template.page_url(3),
            "https://example.com/assets/mobile/page0003_i2.jpg"
        );
    }

    #[test]
    fn index_is_zero_padded_to_four_digits() {
        let template = UrlTemplate::resolve(BASE_URL_SEO).unwrap();
        assert!(template.page_url(7).ends_with("/0007.jpg"));
        assert!(template.page_url(123).ends_with("/0123.jpg"));
        assert!(template.page_url(10000).ends_with("/10000.jpg"));
    }

    #[test]
    fn rejects_unknown_shapes() {
        for url in [
            "https://example.com/page0001.jpg",
            "https://example.com/page0001_i2.png",
            "https://example.com/images/0001.jpg",
            "https://example.com/pageX_images/0001.jpg",
            "",
        ] {
            assert!(
                matches!(UrlTemplate::resolve(url), Err(Error::UnsupportedPattern(ref u)) if u == url),
                "{url} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_prefix_that_is_not_a_url() {
        assert!(matches!(
            UrlTemplate::resolve("not a url/page0001_i2.jpg"),
            Err(Error::InvalidUrl { .. })
        ));
    }

    #[test]
    fn display_shows_format() {
        let template = UrlTemplate::resolve("https://example.com/page0001_i2.jpg").unwrap();
        assert_eq!(template.to_string(), "https://example.com/page{:04}_i2.jpg");
    }
}
