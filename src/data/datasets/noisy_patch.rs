//! 加噪图块数据集：256×256随机裁剪 → 双线性缩放到64×64 → 叠加σ=0.05的高斯噪声

use std::fmt;
use std::path::{Path, PathBuf};

use image::GenericImageView;
use log::{debug, trace};
use rand::Rng;

use super::list_dir;
use crate::data::dataset::{Dataset, check_index};
use crate::data::error::DataError;
use crate::data::transforms::Transform;
use crate::tensor::Tensor;
use crate::utils::traits::image::TraitForDynamicImage;
use crate::vision::{Interpolation, Vision};

pub const NOISY_CROP_SIZE: u32 = 256;
pub const NOISY_TARGET_SIZE: u32 = 64;
pub const NOISE_STD: f32 = 0.05;

/// `(加噪的降采样图块 [C, 64, 64], 裁剪图块 [C, 256, 256]（已执行可选变换）)`
pub type NoisySample = (Tensor, Tensor);

/// 加噪图块数据集。图像不做颜色模式转换，通道数随文件而定。
pub struct NoisyPatchLoader {
    root_dir: PathBuf,
    image_files: Vec<PathBuf>,
    transform: Option<Transform>,
}

impl NoisyPatchLoader {
    /// 只统计根目录下直接包含的常规文件；目录不存在时立即报错
    pub fn new(root_dir: impl AsRef<Path>) -> Result<Self, DataError> {
        let root_dir = root_dir.as_ref().to_path_buf();
        let image_files = list_dir(&root_dir, true)?;
        debug!(
            "加噪图块数据集 {}: {} 个文件",
            root_dir.display(),
            image_files.len()
        );
        Ok(Self {
            root_dir,
            image_files,
            transform: None,
        })
    }

    /// 仅作用于256×256的裁剪图块（第二个输出）
    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn image_files(&self) -> &[PathBuf] {
        &self.image_files
    }

    /// 同[`Dataset::fetch`]，但裁剪原点与噪声都取自调用方给定的`rng`
    pub fn fetch_with_rng<R: Rng + ?Sized>(
        &self,
        index: usize,
        rng: &mut R,
    ) -> Result<NoisySample, DataError> {
        check_index(index, self.image_files.len())?;
        let path = &self.image_files[index];
        trace!("加噪取样 {}: {}", index, path.display());

        let image = Vision::open_image(path).map_err(|e| DataError::from_image(e, path))?;
        let (width, height) = image.dimensions();
        let crop = Vision::random_crop(&image, NOISY_CROP_SIZE, NOISY_CROP_SIZE, rng).ok_or_else(
            || DataError::ImageTooSmall {
                path: path.clone(),
                width,
                height,
                crop: NOISY_CROP_SIZE,
            },
        )?;

        let downsampled = Vision::resize_image(
            &crop,
            NOISY_TARGET_SIZE,
            NOISY_TARGET_SIZE,
            Interpolation::default(),
        )
        .to_chw_tensor()?;
        let noise = Tensor::new_normal_with_rng(0., NOISE_STD, downsampled.shape(), rng);
        let noisy = downsampled + &noise;

        let crop = crop.to_chw_tensor()?;
        let crop = match &self.transform {
            Some(transform) => transform(&crop),
            None => crop,
        };

        Ok((noisy, crop))
    }
}

impl fmt::Debug for NoisyPatchLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoisyPatchLoader")
            .field("root_dir", &self.root_dir)
            .field("image_files", &self.image_files.len())
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

impl Dataset for NoisyPatchLoader {
    type Item = NoisySample;

    fn len(&self) -> usize {
        self.image_files.len()
    }

    fn fetch(&self, index: usize) -> Result<NoisySample, DataError> {
        self.fetch_with_rng(index, &mut rand::thread_rng())
    }
}
