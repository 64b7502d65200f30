use ndarray::{Array, IxDyn};
use rand::Rng;
use rand::distributions::Standard;

use crate::errors::TensorError;

mod ops {
    pub mod add;
    pub mod eq;
    pub mod others;
}

mod index;
mod property;
mod shape;


/// 定义张量的结构体。其可以是标量、向量、矩阵或更高维度的数组。
/// 本库中图像张量一律为通道在前（channel-first）的`[C, H, W]`布局，像素值缩放到`[0, 1]`。
#[derive(Debug, Clone)]
pub struct Tensor {
    data: Array<f32, IxDyn>,
}

impl Tensor {
    /// 创建一个张量，若为标量，`shape`可以是[]、[1]、[1,1]...；
    /// 若为向量，`shape`可以是[n]、[1,n]、[n,1]；
    /// 若为更高维度的数组，`shape`可以是[c,n,m,...]；
    /// 注：`data`的长度必须和`shape`中所有元素的乘积相等，否则panic。
    /// 运行时数据（形状未必可信）请用[`Tensor::try_new`]。
    pub fn new(data: &[f32], shape: &[usize]) -> Tensor {
        match Self::try_new(data, shape) {
            Ok(tensor) => tensor,
            Err(e) => panic!("{}", e),
        }
    }

    /// [`Tensor::new`]的非panic版本
    pub fn try_new(data: &[f32], shape: &[usize]) -> Result<Tensor, TensorError> {
        Self::from_vec(data.to_vec(), shape)
    }

    /// 直接接管`Vec`所有权创建张量，免去一次拷贝
    pub fn from_vec(data: Vec<f32>, shape: &[usize]) -> Result<Tensor, TensorError> {
        let len = data.len();
        let data =
            Array::from_shape_vec(IxDyn(shape), data).map_err(|_| TensorError::DataShapeMismatch {
                shape: shape.to_vec(),
                len,
            })?;
        Ok(Tensor { data })
    }

    /// 创建一个服从正态分布的随机张量，随机数取自线程本地的随机数生成器。
    pub fn new_normal(mean: f32, std_dev: f32, shape: &[usize]) -> Tensor {
        Self::new_normal_with_rng(mean, std_dev, shape, &mut rand::thread_rng())
    }

    /// 同[`Tensor::new_normal`]，但随机数取自调用方给定的`rng`（便于固定种子复现）。
    /// 采用Box-Muller变换，每对均匀分布样本产出两个正态分布样本。
    pub fn new_normal_with_rng<R: Rng + ?Sized>(
        mean: f32,
        std_dev: f32,
        shape: &[usize],
        rng: &mut R,
    ) -> Tensor {
        // Box-Muller每轮产出两个样本，第二个留给下一个元素
        let mut spare: Option<f32> = None;
        let data = Array::from_shape_simple_fn(IxDyn(shape), || {
            if let Some(z1) = spare.take() {
                return z1;
            }
            loop {
                let u1: f32 = rng.sample(Standard);
                let u2: f32 = rng.sample(Standard);
                // u1为0时ln发散
                if u1 <= 0. {
                    continue;
                }
                let r = (-2.0 * u1.ln()).sqrt();
                let theta = 2.0 * std::f32::consts::PI * u2;
                spare = Some(mean + std_dev * r * theta.sin());
                return mean + std_dev * r * theta.cos();
            }
        });

        Tensor { data }
    }
}
