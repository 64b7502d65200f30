//! 数据集统一接口

use super::error::DataError;

/// 按索引取样的数据集
///
/// 实现须为`Send + Sync`：外部批处理工具（以及[`super::DataLoader`]的多线程取样）
/// 会在多个线程上以不同索引并发调用`fetch`。构造后的状态只读，`fetch`不得修改共享状态。
pub trait Dataset: Send + Sync {
    /// 单个样本的类型，通常是张量元组
    type Item: Send;

    /// 样本数量
    fn len(&self) -> usize;

    /// 数据集是否为空
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 获取第 `index` 个样本；`index >= len()`时返回[`DataError::IndexOutOfBounds`]
    fn fetch(&self, index: usize) -> Result<Self::Item, DataError>;
}

/// 索引越界检查，各数据集共用
pub(crate) fn check_index(index: usize, len: usize) -> Result<(), DataError> {
    if index >= len {
        return Err(DataError::IndexOutOfBounds { index, len });
    }
    Ok(())
}
