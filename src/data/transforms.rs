//! 数据变换函数
//!
//! 数据集接收的可选变换是一个“图像张量 → 图像张量”的函数（[`Transform`]），
//! 作用于已经转换为`[C, H, W]`、值域`[0, 1]`的图像张量。任意满足签名的闭包都可用：
//!
//! ```ignore
//! let transform = transforms::compose(vec![
//!     transforms::horizontal_flip(),
//!     transforms::normalize(&[0.5; 3], &[0.5; 3]),
//! ]);
//! let dataset = NoisyPatchLoader::new("images")?.transform(transform);
//! ```

use std::sync::Arc;

use crate::tensor::Tensor;

/// 图像张量变换。须可在多线程间共享，以便数据集被并发取样。
pub type Transform = Arc<dyn Fn(&Tensor) -> Tensor + Send + Sync>;

/// 将闭包包装为[`Transform`]
pub fn from_fn(f: impl Fn(&Tensor) -> Tensor + Send + Sync + 'static) -> Transform {
    Arc::new(f)
}

/// 按顺序依次执行多个变换
pub fn compose(transforms: Vec<Transform>) -> Transform {
    Arc::new(move |tensor: &Tensor| {
        transforms
            .iter()
            .fold(tensor.clone(), |acc, transform| transform(&acc))
    })
}

/// 逐通道标准化：`(x - mean[c]) / std[c]`
///
/// `mean`与`std`的长度应与通道数一致；通道数多于给定长度时，多出的通道保持不变。
pub fn normalize(mean: &[f32], std: &[f32]) -> Transform {
    let mean = mean.to_vec();
    let std = std.to_vec();
    Arc::new(move |tensor: &Tensor| normalize_channels(tensor, &mean, &std))
}

/// 左右翻转（沿宽度维）
pub fn horizontal_flip() -> Transform {
    Arc::new(flip_width)
}

/// [`normalize`]的实现部分
pub fn normalize_channels(tensor: &Tensor, mean: &[f32], std: &[f32]) -> Tensor {
    let mut output = tensor.clone();
    if output.dimension() != 3 {
        return output;
    }
    let channels = output.shape()[0].min(mean.len()).min(std.len());
    let mut view = output.view_mut();
    for c in 0..channels {
        let (m, s) = (mean[c], std[c]);
        view.index_axis_mut(ndarray::Axis(0), c)
            .mapv_inplace(|x| (x - m) / s);
    }
    output
}

/// [`horizontal_flip`]的实现部分；非3维张量原样返回
pub fn flip_width(tensor: &Tensor) -> Tensor {
    if tensor.dimension() != 3 {
        return tensor.clone();
    }
    tensor.flip(2)
}
