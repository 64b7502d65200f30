//! 数据加载模块
//!
//! 提供数据集加载、变换和批处理功能。
//!
//! # 主要组件
//!
//! - [`Dataset`]: 按索引取样的统一接口（`len` + `fetch`）
//! - [`DataLoader`]: `PyTorch` 风格的数据批量加载器
//! - [`PairedSampleLoader`]: 试穿配对样本（清单驱动，缺失文件时跳到下一条）
//! - [`PatchSuperResolutionLoader`]: 超分辨率图块对
//! - [`NoisyPatchLoader`]: 加噪降采样图块对
//! - [`transforms`]: 可选的图像张量变换
//! - [`DataError`]: 数据加载错误类型
//!
//! # 使用示例
//!
//! ```ignore
//! use tryon_data::data::{DataLoader, NoisyPatchLoader};
//!
//! let dataset = NoisyPatchLoader::new("path_to_images")?;
//! let loader = DataLoader::new(dataset, 32).shuffle(true);
//!
//! for batch in loader.iter() {
//!     let (noisy, crop) = batch?;
//!     model.forward(&noisy)?;
//! }
//! ```

mod dataloader;
mod dataset;
pub mod datasets;
pub mod error;
pub mod landmarks;
pub mod transforms;

#[cfg(test)]
mod tests;

// Re-exports
pub use dataloader::{Collate, DataLoader, DataLoaderIterator};
pub use dataset::Dataset;
pub use datasets::{
    AssetLayout, ManifestRecord, NoisyPatchLoader, PairedSample, PairedSampleLoader,
    PatchSuperResolutionLoader, SamplePaths,
};
pub use error::DataError;
pub use transforms::Transform;
