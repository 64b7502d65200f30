use super::Tensor;
use crate::errors::TensorError;
use ndarray::Axis;

impl Tensor {
    /// 将多个张量堆叠起来，返回一个新的张量。
    /// * `tensors` - 一个包含多个张量的数组的引用。
    /// * `new_dim` - 布尔值，指示是否增加一个新的（首个）维度来堆叠。
    ///
    /// 当 `new_dim` 为 `true` 时，所有张量须形状相同，结果形状为`[tensors.len(), ..首个张量的形状]`。
    /// 当 `new_dim` 为 `false` 时，沿已有的首个维度拼接，首维可以不同，其余维度须相同。
    pub fn stack(tensors: &[&Self], new_dim: bool) -> Result<Self, TensorError> {
        let first = tensors.first().ok_or(TensorError::EmptyList)?;
        let first_shape = first.shape();
        let skip = if new_dim { 0 } else { 1 };

        for (index, t) in tensors.iter().enumerate().skip(1) {
            let t_shape = t.shape();
            let compatible = t_shape.len() == first_shape.len()
                && t_shape
                    .iter()
                    .skip(skip)
                    .zip(first_shape.iter().skip(skip))
                    .all(|(a, b)| a == b);
            if !compatible {
                return Err(TensorError::InconsistentShape {
                    first: first_shape.to_vec(),
                    index,
                    got: t_shape.to_vec(),
                });
            }
        }

        let views: Vec<_> = tensors.iter().map(|t| t.data.view()).collect();
        let data = if new_dim {
            ndarray::stack(Axis(0), &views)
        } else {
            ndarray::concatenate(Axis(0), &views)
        }
        .map_err(|_| TensorError::IncompatibleShape)?;

        Ok(Self { data })
    }

    /// 沿`axis`维翻转，返回标准布局的新张量。如图像张量`[C, H, W]`沿`axis=2`翻转即为水平翻转。
    /// `axis`越界时panic。
    pub fn flip(&self, axis: usize) -> Self {
        let mut view = self.data.view();
        view.invert_axis(Axis(axis));
        Self {
            data: view.as_standard_layout().into_owned(),
        }
    }
}
