//! 数据加载错误类型定义

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::errors::TensorError;

/// 数据加载相关错误
#[derive(Debug, Error)]
pub enum DataError {
    /// 文件未找到（`PairedSampleLoader`会据此跳到下一条记录）
    #[error("文件未找到: {0}")]
    FileNotFound(PathBuf),

    /// IO 错误
    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    /// 格式错误（清单/关键点文件内容不合法）
    #[error("格式错误: {0}")]
    FormatError(String),

    /// 图像解码错误
    #[error("图像解码失败 {path}: {source}")]
    ImageError {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// 索引越界
    #[error("索引越界: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// 形状不匹配
    #[error("形状不匹配: 期望 {expected:?}, 实际 {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// 图像小于裁剪窗口
    #[error("图像尺寸 {width}x{height} 小于裁剪尺寸 {crop}x{crop}: {path}")]
    ImageTooSmall {
        path: PathBuf,
        width: u32,
        height: u32,
        crop: u32,
    },

    /// 配置不合法（构造阶段即报错）
    #[error("配置错误: {0}")]
    InvalidConfig(String),

    /// 从起始索引绕行一整圈仍无可用记录
    #[error("从索引 {start} 起遍历全部 {len} 条记录，均缺少文件")]
    NoResolvableRecord { start: usize, len: usize },
}

impl DataError {
    /// 带路径地包装IO错误：`NotFound`归为[`DataError::FileNotFound`]，其余保留为IO错误
    pub fn from_io(err: std::io::Error, path: &Path) -> Self {
        if err.kind() == ErrorKind::NotFound {
            DataError::FileNotFound(path.to_path_buf())
        } else {
            DataError::IoError(err)
        }
    }

    /// 带路径地包装图像错误：底层为`NotFound`的IO错误时归为[`DataError::FileNotFound`]
    pub fn from_image(err: image::ImageError, path: &Path) -> Self {
        match err {
            image::ImageError::IoError(e) => Self::from_io(e, path),
            source => DataError::ImageError {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

impl From<TensorError> for DataError {
    fn from(err: TensorError) -> Self {
        match err {
            TensorError::InconsistentShape { first, got, .. } => DataError::ShapeMismatch {
                expected: first,
                got,
            },
            TensorError::DataShapeMismatch { shape, len } => DataError::ShapeMismatch {
                expected: shape,
                got: vec![len],
            },
            other => DataError::FormatError(other.to_string()),
        }
    }
}
