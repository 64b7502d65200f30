mod super_resolution;

use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};
use serde_json::Value;

/// 生成一张像素随坐标与`tone`变化的RGB图像并保存（格式由扩展名决定）
fn save_rgb(path: &Path, width: u32, height: u32, tone: u8) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            tone,
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
        ])
    })
    .save(path)
    .unwrap();
}

fn write_json(path: &Path, value: &Value) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, serde_json::to_string(value).unwrap()).unwrap();
}
