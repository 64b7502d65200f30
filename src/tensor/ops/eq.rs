use crate::tensor::Tensor;

/// 形状与每个元素（逐位）都相等才视为相等
impl PartialEq for Tensor {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}
