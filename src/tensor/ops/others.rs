use crate::tensor::Tensor;

impl Tensor {
    /// 对每个元素执行`f`，返回新张量（形状不变）
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Tensor {
        Tensor {
            data: self.data.mapv(f),
        }
    }

    /// 所有元素的均值；空张量返回`None`
    pub fn mean(&self) -> Option<f32> {
        self.data.mean()
    }

    /// 所有元素的总体标准差（除以N）；空张量返回`None`
    pub fn std_dev(&self) -> Option<f32> {
        if self.data.is_empty() {
            return None;
        }
        Some(self.data.std(0.))
    }
}
