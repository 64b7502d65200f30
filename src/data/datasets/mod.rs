//! 内置数据集：
//! - [`PairedSampleLoader`]：试穿配对样本（清单驱动）
//! - [`PatchSuperResolutionLoader`]：超分辨率图块对
//! - [`NoisyPatchLoader`]：加噪降采样图块对

mod noisy_patch;
mod paired;
mod super_resolution;

use std::fs;
use std::path::{Path, PathBuf};

pub use noisy_patch::{NOISE_STD, NOISY_CROP_SIZE, NOISY_TARGET_SIZE, NoisyPatchLoader, NoisySample};
pub use paired::{AssetLayout, ManifestRecord, PairedSample, PairedSampleLoader, SamplePaths};
pub use super_resolution::{
    DEFAULT_CROP_SIZE, DEFAULT_DOWNSCALE_FACTOR, PatchSuperResolutionLoader, SuperResolutionSample,
};

use super::error::DataError;

/// 构造时对目录做一次快照，按文件名排序；之后目录的变化不可见。
/// `files_only`为`true`时只保留常规文件（跳过子目录等）。
fn list_dir(dir: &Path, files_only: bool) -> Result<Vec<PathBuf>, DataError> {
    if !dir.is_dir() {
        return Err(if dir.exists() {
            DataError::InvalidConfig(format!("{} 不是目录", dir.display()))
        } else {
            DataError::FileNotFound(dir.to_path_buf())
        });
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| DataError::from_io(e, dir))? {
        let entry = entry?;
        if files_only && !entry.file_type()?.is_file() {
            continue;
        }
        entries.push(entry.path());
    }
    entries.sort();
    Ok(entries)
}
