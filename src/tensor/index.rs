use super::Tensor;
use std::ops::Index;

// 引用式索引：`tensor[[c, y, x]]`
impl<const N: usize> Index<[usize; N]> for Tensor {
    type Output = f32;

    fn index(&self, index: [usize; N]) -> &f32 {
        &self.data[&index[..]]
    }
}
