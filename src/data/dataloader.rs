/*
 * @Author       : 老董
 * @Description  : DataLoader - PyTorch 风格的数据批量加载器
 *
 * 对任意实现了`Dataset`的数据集提供统一的批量迭代 API，支持：
 * - 自动分批 (batch_size)
 * - 随机打乱 (shuffle)
 * - 丢弃不完整批次 (drop_last)
 * - 多线程并发取样 (num_workers)
 */

use std::thread;

use log::debug;
use rand::SeedableRng;
use rand::seq::SliceRandom;

use super::dataset::Dataset;
use super::error::DataError;
use crate::tensor::Tensor;

/// 将一批样本沿新的首维堆叠为批次张量
pub trait Collate: Sized {
    type Batch;

    fn collate(samples: Vec<Self>) -> Result<Self::Batch, DataError>;
}

fn stack_field<'a>(tensors: impl Iterator<Item = &'a Tensor>) -> Result<Tensor, DataError> {
    let tensors: Vec<&Tensor> = tensors.collect();
    Ok(Tensor::stack(&tensors, true)?)
}

impl Collate for (Tensor, Tensor) {
    type Batch = (Tensor, Tensor);

    fn collate(samples: Vec<Self>) -> Result<Self::Batch, DataError> {
        Ok((
            stack_field(samples.iter().map(|s| &s.0))?,
            stack_field(samples.iter().map(|s| &s.1))?,
        ))
    }
}

impl Collate for (Tensor, Tensor, Tensor, Tensor, Tensor) {
    type Batch = (Tensor, Tensor, Tensor, Tensor, Tensor);

    fn collate(samples: Vec<Self>) -> Result<Self::Batch, DataError> {
        Ok((
            stack_field(samples.iter().map(|s| &s.0))?,
            stack_field(samples.iter().map(|s| &s.1))?,
            stack_field(samples.iter().map(|s| &s.2))?,
            stack_field(samples.iter().map(|s| &s.3))?,
            stack_field(samples.iter().map(|s| &s.4))?,
        ))
    }
}

/// DataLoader - PyTorch 风格的数据批量加载器
///
/// # 示例
/// ```ignore
/// let dataset = NoisyPatchLoader::new("images")?;
/// let loader = DataLoader::new(dataset, 32)
///     .shuffle(true)
///     .num_workers(4);
///
/// for batch in loader.iter() {
///     let (noisy, crop) = batch?; // [32, C, 64, 64], [32, C, 256, 256]
/// }
/// ```
pub struct DataLoader<D: Dataset> {
    dataset: D,
    batch_size: usize,
    shuffle: bool,
    drop_last: bool,
    seed: Option<u64>,
    num_workers: usize,
}

impl<D: Dataset> DataLoader<D> {
    /// 创建新的 DataLoader
    ///
    /// # 参数
    /// - `dataset`: 数据集
    /// - `batch_size`: 批大小
    pub fn new(dataset: D, batch_size: usize) -> Self {
        assert!(batch_size > 0, "DataLoader: batch_size 必须大于 0");
        Self {
            dataset,
            batch_size,
            shuffle: false,
            drop_last: false,
            seed: None,
            num_workers: 1,
        }
    }

    /// 设置是否打乱数据
    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// 设置是否丢弃最后一个不完整的批次
    pub fn drop_last(mut self, drop_last: bool) -> Self {
        self.drop_last = drop_last;
        self
    }

    /// 设置随机种子（用于 shuffle）
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// 每个批次由多少个线程并发取样；0 与 1 都表示在当前线程顺序取样
    pub fn num_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers.max(1);
        self
    }

    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// 获取批次数量
    pub fn num_batches(&self) -> usize {
        let n = self.dataset.len();
        if self.drop_last {
            n / self.batch_size
        } else {
            n.div_ceil(self.batch_size)
        }
    }

    /// 获取数据集大小
    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    /// 检查是否为空
    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    /// 创建迭代器
    pub fn iter(&self) -> DataLoaderIterator<'_, D> {
        let n = self.dataset.len();
        let mut indices: Vec<usize> = (0..n).collect();

        if self.shuffle {
            if let Some(seed) = self.seed {
                let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
                indices.shuffle(&mut rng);
            } else {
                let mut rng = rand::thread_rng();
                indices.shuffle(&mut rng);
            }
        }
        debug!(
            "DataLoader: {} 个样本, {} 个批次, {} 个取样线程",
            n,
            self.num_batches(),
            self.num_workers
        );

        DataLoaderIterator {
            loader: self,
            indices,
            current_batch: 0,
        }
    }

    /// 按索引取出一批样本（保持索引顺序）
    fn fetch_samples(&self, indices: &[usize]) -> Result<Vec<D::Item>, DataError> {
        if self.num_workers <= 1 || indices.len() <= 1 {
            return indices.iter().map(|&i| self.dataset.fetch(i)).collect();
        }

        let chunk_size = indices.len().div_ceil(self.num_workers);
        let dataset = &self.dataset;
        let chunks: Vec<Result<Vec<D::Item>, DataError>> = thread::scope(|scope| {
            let handles: Vec<_> = indices
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|&i| dataset.fetch(i))
                            .collect::<Result<Vec<_>, _>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(result) => result,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        });

        let mut samples = Vec::with_capacity(indices.len());
        for chunk in chunks {
            samples.extend(chunk?);
        }
        Ok(samples)
    }
}

/// DataLoader 迭代器
pub struct DataLoaderIterator<'a, D: Dataset> {
    loader: &'a DataLoader<D>,
    indices: Vec<usize>,
    current_batch: usize,
}

impl<D> Iterator for DataLoaderIterator<'_, D>
where
    D: Dataset,
    D::Item: Collate,
{
    type Item = Result<<D::Item as Collate>::Batch, DataError>;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.indices.len();
        let batch_size = self.loader.batch_size;
        let start = self.current_batch * batch_size;

        // 检查是否还有数据
        if start >= n {
            return None;
        }

        let end = (start + batch_size).min(n);

        // 如果 drop_last 且批次不完整，则跳过
        if self.loader.drop_last && end - start < batch_size {
            return None;
        }

        self.current_batch += 1;

        let batch_indices = &self.indices[start..end];
        Some(
            self.loader
                .fetch_samples(batch_indices)
                .and_then(<D::Item as Collate>::collate),
        )
    }
}
