use thiserror::Error;
mod ops;
pub use self::ops::*;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TensorError {
    // 张量二元运算
    #[error(
        "形状不一致，故无法{operator}：第一个张量的形状为{tensor1_shape:?}，第二个张量的形状为{tensor2_shape:?}"
    )]
    OperatorError {
        operator: Operator,
        tensor1_shape: Vec<usize>,
        tensor2_shape: Vec<usize>,
    },
    #[error("数据长度{len}与形状{shape:?}不符")]
    DataShapeMismatch { shape: Vec<usize>, len: usize },

    #[error("张量列表为空")]
    EmptyList,
    #[error("张量形状不一致：首个张量为{first:?}，第{index}个张量为{got:?}")]
    InconsistentShape {
        first: Vec<usize>,
        index: usize,
        got: Vec<usize>,
    },
    #[error("张量形状不兼容")]
    IncompatibleShape,
}
