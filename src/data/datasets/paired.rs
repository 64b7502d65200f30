//! 试穿配对样本数据集
//!
//! 由清单（manifest，JSON数组）驱动，每条记录描述一张“穿着”照片及其对应的服装。
//! 每次取样按固定目录约定解析出6个文件（3张人物侧图像、1张服装图、2个关键点文件），返回5元组：
//! `(拼接图, 人物关键点, 服装关键点, 服装参考图, 人物原图)`。
//!
//! 任一文件缺失时不报错，而是跳到下一条记录重试（取模绕回），最多绕行一整圈。

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use log::{debug, trace, warn};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::data::dataset::{Dataset, check_index};
use crate::data::error::DataError;
use crate::data::landmarks::load_landmarks;
use crate::data::transforms::Transform;
use crate::tensor::Tensor;
use crate::utils::traits::image::TraitForDynamicImage;
use crate::vision::Vision;

/// 清单中的一条记录（只读）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManifestRecord {
    /// “穿着”照片的文件名，如`00001.jpg`
    pub wearing: String,
    /// 内搭上衣的服装编号；为`null`或缺省时回退到`main_top`
    #[serde(default, deserialize_with = "garment_id")]
    pub inner_top: Option<String>,
    #[serde(default, deserialize_with = "garment_id")]
    pub main_top: Option<String>,
}

impl ManifestRecord {
    /// 优先取`inner_top`，否则取`main_top`
    pub fn garment_id(&self) -> Option<&str> {
        self.inner_top.as_deref().or(self.main_top.as_deref())
    }
}

/// 服装编号既可以是字符串也可以是数值（数值按其十进制文本使用）
fn garment_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(id)) => Ok(Some(id)),
        Some(Value::Number(id)) => Ok(Some(id.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "服装编号须为字符串或数值，实际得到: {}",
            other
        ))),
    }
}

/// 资源目录约定。所有子目录均相对于`base_dir`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLayout {
    pub base_dir: PathBuf,
    /// “穿着”照片目录
    pub wearing_dir: String,
    /// 对齐图目录（与“穿着”照片同名）
    pub alignment_dir: String,
    /// 人物原图目录（与“穿着”照片同名）
    pub original_dir: String,
    /// 服装关键点目录，文件名为`<服装编号><garment_landmark_suffix>`
    pub garment_landmark_dir: String,
    /// 服装参考图目录，文件名为`<服装编号><garment_image_suffix>`
    pub garment_image_dir: String,
    /// 人物关键点目录，文件名为“穿着”照片名中的`.jpg`替换为`.json`
    pub person_landmark_dir: String,
    pub garment_landmark_suffix: String,
    pub garment_image_suffix: String,
}

impl Default for AssetLayout {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("trainexample"),
            wearing_dir: "blur_model".to_string(),
            alignment_dir: "Ia".to_string(),
            original_dir: "resized_org_model".to_string(),
            garment_landmark_dir: "Jg".to_string(),
            garment_image_dir: "Ic".to_string(),
            person_landmark_dir: "Jp".to_string(),
            garment_landmark_suffix: "_F.json".to_string(),
            garment_image_suffix: "_F.jpg".to_string(),
        }
    }
}

impl AssetLayout {
    /// 默认子目录名，但换一个根目录
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    /// 由记录推导出全部资源路径（纯字符串替换，不访问磁盘）
    pub fn resolve(&self, record: &ManifestRecord) -> Result<SamplePaths, DataError> {
        let garment = record.garment_id().ok_or_else(|| {
            DataError::FormatError(format!(
                "记录 {} 既没有 inner_top 也没有 main_top",
                record.wearing
            ))
        })?;
        let base = &self.base_dir;
        Ok(SamplePaths {
            garment_id: garment.to_string(),
            wearing_image: base.join(&self.wearing_dir).join(&record.wearing),
            alignment_image: base.join(&self.alignment_dir).join(&record.wearing),
            original_image: base.join(&self.original_dir).join(&record.wearing),
            garment_landmarks: base
                .join(&self.garment_landmark_dir)
                .join(format!("{}{}", garment, self.garment_landmark_suffix)),
            garment_image: base
                .join(&self.garment_image_dir)
                .join(format!("{}{}", garment, self.garment_image_suffix)),
            person_landmarks: base
                .join(&self.person_landmark_dir)
                .join(record.wearing.replace(".jpg", ".json")),
        })
    }
}

/// 一条记录对应的全部资源路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplePaths {
    pub garment_id: String,
    pub wearing_image: PathBuf,
    pub alignment_image: PathBuf,
    pub original_image: PathBuf,
    pub garment_landmarks: PathBuf,
    pub garment_image: PathBuf,
    pub person_landmarks: PathBuf,
}

/// `(拼接图, 人物关键点, 服装关键点, 服装参考图, 人物原图)`
pub type PairedSample = (Tensor, Tensor, Tensor, Tensor, Tensor);

/// 试穿配对样本数据集
///
/// # 示例
/// ```ignore
/// let dataset = PairedSampleLoader::new("trainexample/train.json")?
///     .layout(AssetLayout::with_base_dir("/data/tryon"))
///     .transform(transforms::normalize(&[0.5; 3], &[0.5; 3]));
/// let (combined, person_pose, garment_pose, garment, original) = dataset.fetch(0)?;
/// ```
pub struct PairedSampleLoader {
    records: Vec<ManifestRecord>,
    layout: AssetLayout,
    transform: Option<Transform>,
}

impl PairedSampleLoader {
    /// 从清单文件构造；清单缺失或格式错误时立即报错
    pub fn new(manifest_path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = manifest_path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| DataError::from_io(e, path))?;
        let records: Vec<ManifestRecord> = serde_json::from_str(&text).map_err(|e| {
            DataError::FormatError(format!("清单 {} 解析失败: {}", path.display(), e))
        })?;
        debug!("载入清单 {}: {} 条记录", path.display(), records.len());
        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<ManifestRecord>) -> Self {
        Self {
            records,
            layout: AssetLayout::default(),
            transform: None,
        }
    }

    pub fn layout(mut self, layout: AssetLayout) -> Self {
        self.layout = layout;
        self
    }

    /// 作用于拼接图、服装参考图与人物原图（关键点不受影响）
    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn records(&self) -> &[ManifestRecord] {
        &self.records
    }

    pub fn record(&self, index: usize) -> Option<&ManifestRecord> {
        self.records.get(index)
    }

    pub fn asset_layout(&self) -> &AssetLayout {
        &self.layout
    }

    pub fn resolve_paths(&self, index: usize) -> Result<SamplePaths, DataError> {
        check_index(index, self.records.len())?;
        self.layout.resolve(&self.records[index])
    }

    /// 单条记录的完整解析；任何缺失文件都以[`DataError::FileNotFound`]返回
    fn load_sample(&self, index: usize) -> Result<PairedSample, DataError> {
        let paths = self.resolve_paths(index)?;
        trace!("解析记录 {}: {:?}", index, paths);

        let wearing = open_rgb(&paths.wearing_image)?;
        let alignment = open_rgb(&paths.alignment_image)?;
        let garment = open_rgb(&paths.garment_image)?;

        // 左右拼接要求两图等高
        let combined =
            Vision::hstack(&wearing, &alignment).ok_or_else(|| DataError::ShapeMismatch {
                expected: vec![wearing.height() as usize],
                got: vec![alignment.height() as usize],
            })?;

        let person_pose = load_landmarks(&paths.person_landmarks)?;
        let garment_pose = load_landmarks(&paths.garment_landmarks)?;

        let original = open_rgb(&paths.original_image)?;

        let combined = self.apply_transform(DynamicImage::ImageRgb8(combined).to_chw_tensor()?);
        let garment = self.apply_transform(DynamicImage::ImageRgb8(garment).to_chw_tensor()?);
        let original = self.apply_transform(DynamicImage::ImageRgb8(original).to_chw_tensor()?);

        Ok((combined, person_pose, garment_pose, garment, original))
    }

    fn apply_transform(&self, tensor: Tensor) -> Tensor {
        match &self.transform {
            Some(transform) => transform(&tensor),
            None => tensor,
        }
    }
}

impl fmt::Debug for PairedSampleLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PairedSampleLoader")
            .field("records", &self.records.len())
            .field("layout", &self.layout)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

fn open_rgb(path: &Path) -> Result<image::RgbImage, DataError> {
    Vision::open_rgb(path).map_err(|e| DataError::from_image(e, path))
}

impl Dataset for PairedSampleLoader {
    type Item = PairedSample;

    fn len(&self) -> usize {
        self.records.len()
    }

    /// 缺失文件时依次尝试`index+1, index+2, ...`（对记录数取模），最多尝试`len()`次；
    /// 其余错误（关键点格式错误、图像无法解码等）直接返回。
    fn fetch(&self, index: usize) -> Result<PairedSample, DataError> {
        let len = self.records.len();
        check_index(index, len)?;

        for attempt in 0..len {
            let current = (index + attempt) % len;
            match self.load_sample(current) {
                Ok(sample) => return Ok(sample),
                Err(DataError::FileNotFound(path)) => {
                    warn!(
                        "记录 {} 缺少文件 {}，跳到下一条记录",
                        current,
                        path.display()
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(DataError::NoResolvableRecord { start: index, len })
    }
}
