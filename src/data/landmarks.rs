//! 姿态关键点（landmark）元数据解析
//!
//! 关键点文件是一个JSON对象，其`landmarks`字段为任意层嵌套的数值数组，
//! 如`{"landmarks": [[12.0, 30.5], [40.0, 31.0]]}`。形状由嵌套结构推断，须为规则（非锯齿）数组。

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use super::error::DataError;
use crate::tensor::Tensor;

#[derive(Debug, Deserialize)]
struct LandmarkFile {
    landmarks: Value,
}

/// 读取关键点文件并转换为张量；文件缺失时返回[`DataError::FileNotFound`]
pub fn load_landmarks(path: &Path) -> Result<Tensor, DataError> {
    let text = fs::read_to_string(path).map_err(|e| DataError::from_io(e, path))?;
    let file: LandmarkFile = serde_json::from_str(&text).map_err(|e| {
        DataError::FormatError(format!("关键点文件 {} 解析失败: {}", path.display(), e))
    })?;
    landmarks_to_tensor(&file.landmarks)
        .map_err(|e| DataError::FormatError(format!("{}: {}", path.display(), e)))
}

/// 将嵌套数值数组转换为张量：`[[x, y], [x, y]]` → 形状`[2, 2]`，`[a, b, c]` → `[3]`，单个数值 → `[]`
pub fn landmarks_to_tensor(value: &Value) -> Result<Tensor, String> {
    let mut data = Vec::new();
    let shape = collect_values(value, &mut data)?;
    Tensor::from_vec(data, &shape).map_err(|e| e.to_string())
}

/// 深度优先收集所有数值，返回该层的形状
fn collect_values(value: &Value, data: &mut Vec<f32>) -> Result<Vec<usize>, String> {
    match value {
        Value::Number(number) => {
            let number = number
                .as_f64()
                .ok_or_else(|| format!("无法表示的数值: {}", number))?;
            data.push(number as f32);
            Ok(vec![])
        }
        Value::Array(items) => {
            let mut child_shape: Option<Vec<usize>> = None;
            for item in items {
                let shape = collect_values(item, data)?;
                match &child_shape {
                    None => child_shape = Some(shape),
                    Some(expected) if *expected != shape => {
                        return Err(format!(
                            "关键点数组不规则：期望子数组形状 {:?}，实际 {:?}",
                            expected, shape
                        ));
                    }
                    Some(_) => {}
                }
            }
            let mut shape = vec![items.len()];
            shape.extend(child_shape.unwrap_or_default());
            Ok(shape)
        }
        other => Err(format!("关键点只能是数值或数值数组，实际得到: {}", other)),
    }
}
