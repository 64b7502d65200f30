//! # Tryon Data
//!
//! `tryon_data`提供训练循环所需的数据集加载器：从硬盘读取图像与姿态关键点（landmark）元数据，
//! 做裁剪、缩放、加噪等简单增强后转换为张量，再交由外部的批处理/训练流程使用。
//!
//! 包含三个互不依赖的数据集：
//! - [`data::PairedSampleLoader`]：基于清单（manifest）的试穿样本，返回5元组张量；
//! - [`data::PatchSuperResolutionLoader`]：随机裁剪+双三次降采样的超分辨率样本对；
//! - [`data::NoisyPatchLoader`]：随机裁剪+降采样+高斯噪声的样本对。
//!

pub mod data;
pub mod errors;
pub mod tensor;
pub mod utils;
pub mod vision;
