//! 超分辨率图块数据集
//!
//! 从图像目录中取样：随机裁剪出`crop_size × crop_size`的高分辨率图块作为目标，
//! 再双三次插值降采样到`crop_size / downscale_factor`作为输入。

use std::path::{Path, PathBuf};

use image::GenericImageView;
use log::{debug, trace};
use rand::Rng;

use super::list_dir;
use crate::data::dataset::{Dataset, check_index};
use crate::data::error::DataError;
use crate::tensor::Tensor;
use crate::utils::traits::image::TraitForDynamicImage;
use crate::vision::{Interpolation, Vision};

pub const DEFAULT_CROP_SIZE: u32 = 256;
pub const DEFAULT_DOWNSCALE_FACTOR: u32 = 4;

/// `(低分辨率输入, 高分辨率目标)`，形状分别为`[3, crop/factor, crop/factor]`与`[3, crop, crop]`
pub type SuperResolutionSample = (Tensor, Tensor);

/// 超分辨率图块数据集
///
/// # 示例
/// ```ignore
/// let dataset = PatchSuperResolutionLoader::new("images")?.with_patch(128, 2)?;
/// let (input, ground_truth) = dataset.fetch(0)?; // [3, 64, 64], [3, 128, 128]
/// ```
#[derive(Debug, Clone)]
pub struct PatchSuperResolutionLoader {
    image_dir: PathBuf,
    image_list: Vec<PathBuf>,
    crop_size: u32,
    downscale_factor: u32,
}

impl PatchSuperResolutionLoader {
    /// 以默认裁剪尺寸(256)与降采样倍数(4)构造；目录不存在时立即报错
    pub fn new(image_dir: impl AsRef<Path>) -> Result<Self, DataError> {
        Self::new_with(image_dir, DEFAULT_CROP_SIZE, DEFAULT_DOWNSCALE_FACTOR)
    }

    /// 以给定的裁剪尺寸与降采样倍数构造，二者须能整除
    pub fn new_with(
        image_dir: impl AsRef<Path>,
        crop_size: u32,
        downscale_factor: u32,
    ) -> Result<Self, DataError> {
        validate_patch(crop_size, downscale_factor)?;
        let image_dir = image_dir.as_ref().to_path_buf();
        let image_list = list_dir(&image_dir, false)?;
        debug!(
            "超分辨率数据集 {}: {} 个条目, 裁剪 {}, 降采样 {}",
            image_dir.display(),
            image_list.len(),
            crop_size,
            downscale_factor
        );
        Ok(Self {
            image_dir,
            image_list,
            crop_size,
            downscale_factor,
        })
    }

    /// 同时设置裁剪尺寸与降采样倍数，并检查二者能否整除
    pub fn with_patch(mut self, crop_size: u32, downscale_factor: u32) -> Result<Self, DataError> {
        validate_patch(crop_size, downscale_factor)?;
        self.crop_size = crop_size;
        self.downscale_factor = downscale_factor;
        Ok(self)
    }

    /// 单独设置裁剪尺寸，只检查其为正数；
    /// 与降采样倍数能否整除在取样时检查（亦可改用[`Self::with_patch`]在配置时检查）
    pub fn crop_size(mut self, crop_size: u32) -> Result<Self, DataError> {
        check_positive("裁剪尺寸", crop_size)?;
        self.crop_size = crop_size;
        Ok(self)
    }

    /// 单独设置降采样倍数，只检查其为正数；整除关系同[`Self::crop_size`]
    pub fn downscale_factor(mut self, downscale_factor: u32) -> Result<Self, DataError> {
        check_positive("降采样倍数", downscale_factor)?;
        self.downscale_factor = downscale_factor;
        Ok(self)
    }

    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    pub fn image_list(&self) -> &[PathBuf] {
        &self.image_list
    }

    /// 低分辨率输入的边长
    pub fn input_size(&self) -> u32 {
        self.crop_size / self.downscale_factor
    }

    /// 同[`Dataset::fetch`]，但裁剪原点取自调用方给定的`rng`
    pub fn fetch_with_rng<R: Rng + ?Sized>(
        &self,
        index: usize,
        rng: &mut R,
    ) -> Result<SuperResolutionSample, DataError> {
        check_index(index, self.image_list.len())?;
        validate_patch(self.crop_size, self.downscale_factor)?;
        let path = &self.image_list[index];
        trace!("超分辨率取样 {}: {}", index, path.display());

        let image = Vision::open_rgb(path)
            .map(image::DynamicImage::ImageRgb8)
            .map_err(|e| DataError::from_image(e, path))?;

        let (width, height) = image.dimensions();
        let ground_truth = Vision::random_crop(&image, self.crop_size, self.crop_size, rng)
            .ok_or_else(|| DataError::ImageTooSmall {
                path: path.clone(),
                width,
                height,
                crop: self.crop_size,
            })?;

        let input_size = self.input_size();
        let input = Vision::resize_image(
            &ground_truth,
            input_size,
            input_size,
            Interpolation::Bicubic,
        );

        Ok((input.to_chw_tensor()?, ground_truth.to_chw_tensor()?))
    }
}

fn check_positive(name: &str, value: u32) -> Result<(), DataError> {
    if value == 0 {
        return Err(DataError::InvalidConfig(format!("{}须大于0", name)));
    }
    Ok(())
}

fn validate_patch(crop_size: u32, downscale_factor: u32) -> Result<(), DataError> {
    check_positive("裁剪尺寸", crop_size)?;
    check_positive("降采样倍数", downscale_factor)?;
    if crop_size % downscale_factor != 0 {
        return Err(DataError::InvalidConfig(format!(
            "裁剪尺寸({})须能被降采样倍数({})整除",
            crop_size, downscale_factor
        )));
    }
    Ok(())
}

impl Dataset for PatchSuperResolutionLoader {
    type Item = SuperResolutionSample;

    fn len(&self) -> usize {
        self.image_list.len()
    }

    fn fetch(&self, index: usize) -> Result<SuperResolutionSample, DataError> {
        self.fetch_with_rng(index, &mut rand::thread_rng())
    }
}
