pub mod page;

pub use page::PageImage;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};
use tracing::{info, instrument, warn};

use crate::error::{Error, Result};

static PRODUCER: &str = concat!("manual-fetch ", env!("CARGO_PKG_VERSION"));

/// 把已下载的图片按列表顺序合成为一个PDF，每张图片一页
///
/// 列表为空时不生成文件，返回 `Ok(None)`。所有图片会同时保存在内存中，
/// 文件只在最后写入一次。
#[instrument(skip(image_files), fields(pages = image_files.len()))]
pub fn create_pdf_from_images(
    image_files: &[PathBuf],
    pdf_path: &Path,
    quality: u8,
) -> Result<Option<PathBuf>> {
    if image_files.is_empty() {
        warn!("没有可转换为PDF的图片");
        return Ok(None);
    }

    let pages = image_files
        .iter()
        .map(|path| PageImage::load(path, quality))
        .collect::<Result<Vec<_>>>()?;

    let mut document = build_document(&pages, Local::now())?;
    document.save(pdf_path)?;

    info!("PDF已生成: {}", pdf_path.display());
    Ok(Some(pdf_path.to_path_buf()))
}

/// 页面尺寸按 72dpi 计算，即一个像素对应一个点
pub fn build_document(pages: &[PageImage], created: DateTime<Local>) -> Result<Document> {
    if pages.is_empty() {
        return Err(Error::EmptyDocument);
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids = Vec::with_capacity(pages.len());

    for page in pages {
        let width = Object::Integer(page.width() as i64);
        let height = Object::Integer(page.height() as i64);
        let image_id = doc.add_object(page.to_xobject());

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        width.clone(),
                        Object::Integer(0),
                        Object::Integer(0),
                        height.clone(),
                        Object::Integer(0),
                        Object::Integer(0),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![Object::Integer(0), Object::Integer(0), width, height],
            "Resources" => dictionary! {
                "XObject" => dictionary! {
                    "Im0" => image_id,
                },
            },
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Producer" => Object::string_literal(PRODUCER),
        "CreationDate" => Object::string_literal(pdf_date(created)),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    Ok(doc)
}

fn pdf_date(time: DateTime<Local>) -> String {
    time.format("D:%Y%m%d%H%M%S").to_string()
}
