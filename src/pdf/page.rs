use std::path::Path;

use image::ImageReader;
use image::codecs::jpeg::JpegEncoder;
use lopdf::{Object, Stream, dictionary};

use crate::error::{Error, Result};

/// 一张已转为 RGB 并重新编码为 JPEG 的页面图片
#[derive(Debug, Clone)]
pub struct PageImage {
    width: u32,
    height: u32,
    jpeg: Vec<u8>,
}

impl PageImage {
    /// 按文件内容识别格式，不依赖扩展名；去掉 alpha 通道和调色板
    pub fn load(path: &Path, quality: u8) -> Result<Self> {
        let image_error = |source| Error::Image {
            path: path.to_path_buf(),
            source,
        };

        let image = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(image_error)?;
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, quality)
            .encode_image(&rgb)
            .map_err(image_error)?;

        Ok(Self {
            width,
            height,
            jpeg,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn jpeg(&self) -> &[u8] {
        &self.jpeg
    }

    /// DCTDecode 图像 XObject；数据已是 JPEG，不再做 Flate 压缩
    pub fn to_xobject(&self) -> Stream {
        let dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => Object::Integer(self.width as i64),
            "Height" => Object::Integer(self.height as i64),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => Object::Integer(8),
            "Filter" => "DCTDecode",
        };
        Stream::new(dict, self.jpeg.clone()).with_compression(false)
    }
}

#[cfg(test)]
mod tests {
    use image::{ColorType, Rgb, RgbImage, Rgba, RgbaImage};

    use super::*;

    #[test]
    fn rgba_png_is_flattened_to_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alpha.png");
        RgbaImage::from_pixel(12, 8, Rgba([10, 200, 30, 128]))
            .save(&path)
            .unwrap();

        let page = PageImage::load(&path, 90).unwrap();

        assert_eq!((page.width(), page.height()), (12, 8));
        let decoded = image::load_from_memory(page.jpeg()).unwrap();
        assert_eq!(decoded.color(), ColorType::Rgb8);
        assert_eq!((decoded.width(), decoded.height()), (12, 8));
    }

    #[test]
    fn format_is_sniffed_from_content() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("scan.png");
        RgbImage::from_pixel(5, 7, Rgb([0, 0, 0])).save(&png).unwrap();
        let misnamed = dir.path().join("page_001.jpg");
        std::fs::rename(&png, &misnamed).unwrap();

        let page = PageImage::load(&misnamed, 75).unwrap();

        assert_eq!((page.width(), page.height()), (5, 7));
    }

    #[test]
    fn garbage_is_an_image_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page_001.jpg");
        std::fs::write(&path, b"<html>404</html>").unwrap();

        assert!(matches!(
            PageImage::load(&path, 90),
            Err(Error::Image { .. })
        ));
    }

    #[test]
    fn xobject_describes_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.jpg");
        RgbImage::from_pixel(3, 4, Rgb([1, 2, 3])).save(&path).unwrap();
        let page = PageImage::load(&path, 90).unwrap();

        let stream = page.to_xobject();

        assert_eq!(stream.dict.get(b"Width").unwrap().as_i64().unwrap(), 3);
        assert_eq!(stream.dict.get(b"Height").unwrap().as_i64().unwrap(), 4);
        assert_eq!(stream.dict.get(b"Filter").unwrap().as_name().unwrap(), b"DCTDecode");
        assert_eq!(stream.content, page.jpeg());
    }
}
