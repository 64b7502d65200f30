/*
 * @Author       : 老董
 * @Description  : 本模块提供数据增强所需的图像操作：解码、随机裁剪、缩放、水平拼接。
 *                 所有操作都作用于Image库的`DynamicImage`/`RgbImage`，转张量见`TraitForDynamicImage`。
 */

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImage, GenericImageView, ImageReader, ImageResult, RgbImage};
use rand::Rng;

#[cfg(test)]
mod tests;

/// 缩放时使用的插值方式
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub enum Interpolation {
    Nearest,
    /// 双线性插值，与常见`Resize`变换的默认值一致
    #[default]
    Bilinear,
    Bicubic,
}

impl Interpolation {
    fn filter_type(self) -> FilterType {
        match self {
            Interpolation::Nearest => FilterType::Nearest,
            Interpolation::Bilinear => FilterType::Triangle,
            Interpolation::Bicubic => FilterType::CatmullRom,
        }
    }
}

pub struct Vision;

impl Vision {
    /// 按文件内容（而非扩展名）识别格式并解码本地图像，保留其原本的颜色模式。
    /// 内容无法识别时退回按扩展名判断。
    pub fn open_image(path: impl AsRef<Path>) -> ImageResult<DynamicImage> {
        ImageReader::open(path)?.with_guessed_format()?.decode()
    }

    /// 同[`Vision::open_image`]，解码后强制转为RGB
    pub fn open_rgb(path: impl AsRef<Path>) -> ImageResult<RgbImage> {
        Ok(Self::open_image(path)?.to_rgb8())
    }

    /// 随机选取一个裁剪窗口的左上角`(x, y)`，保证`crop_width × crop_height`的窗口完全落在图像内。
    /// 窗口大于图像时返回`None`；窗口与图像等大时原点恒为`(0, 0)`。
    pub fn random_crop_origin<R: Rng + ?Sized>(
        width: u32,
        height: u32,
        crop_width: u32,
        crop_height: u32,
        rng: &mut R,
    ) -> Option<(u32, u32)> {
        if crop_width > width || crop_height > height {
            return None;
        }
        let x = rng.gen_range(0..=width - crop_width);
        let y = rng.gen_range(0..=height - crop_height);
        Some((x, y))
    }

    /// 随机裁剪出`crop_width × crop_height`的图块；图像不够大时返回`None`
    pub fn random_crop<R: Rng + ?Sized>(
        image: &DynamicImage,
        crop_width: u32,
        crop_height: u32,
        rng: &mut R,
    ) -> Option<DynamicImage> {
        let (width, height) = image.dimensions();
        let (x, y) = Self::random_crop_origin(width, height, crop_width, crop_height, rng)?;
        Some(image.crop_imm(x, y, crop_width, crop_height))
    }

    /// 调整图像大小（不保持宽高比）
    /// * `image` - 原始图像
    /// * `width` - 调整后的宽度
    /// * `height` - 调整后的高度
    /// * `interpolation` - 插值方式
    pub fn resize_image(
        image: &DynamicImage,
        width: u32,
        height: u32,
        interpolation: Interpolation,
    ) -> DynamicImage {
        image.resize_exact(width, height, interpolation.filter_type())
    }

    /// 将两张等高的图像逐像素左右拼接为一张宽图；高度不同时返回`None`
    pub fn hstack(left: &RgbImage, right: &RgbImage) -> Option<RgbImage> {
        if left.height() != right.height() {
            return None;
        }
        let mut combined = RgbImage::new(left.width() + right.width(), left.height());
        combined.copy_from(left, 0, 0).ok()?;
        combined.copy_from(right, left.width(), 0).ok()?;
        Some(combined)
    }
}
