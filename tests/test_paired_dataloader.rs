/*
 * @Author       : 老董
 * @Description  : 试穿配对数据集 + DataLoader 集成测试
 *                 验证：清单驱动的取样、缺失文件跳过、5 元组批量堆叠
 */

use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};
use serde_json::json;
use tryon_data::data::{AssetLayout, DataLoader, Dataset, PairedSampleLoader};

fn save(path: &Path, width: u32, height: u32) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    RgbImage::from_pixel(width, height, Rgb([120, 60, 30]))
        .save(path)
        .unwrap();
}

fn write_json(path: &Path, value: &serde_json::Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, value.to_string()).unwrap();
}

/// 为编号为`id`的人物与服装`garment`写入完整资源
fn write_record(base: &Path, id: &str, garment: &str) {
    let wearing = format!("{id}.jpg");
    save(&base.join("blur_model").join(&wearing), 8, 12);
    save(&base.join("Ia").join(&wearing), 8, 12);
    save(&base.join("resized_org_model").join(&wearing), 8, 12);
    save(&base.join("Ic").join(format!("{garment}_F.jpg")), 6, 6);
    write_json(
        &base.join("Jp").join(format!("{id}.json")),
        &json!({ "landmarks": [[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]] }),
    );
    write_json(
        &base.join("Jg").join(format!("{garment}_F.json")),
        &json!({ "landmarks": [0.1, 0.2, 0.3, 0.4] }),
    );
}

#[test]
fn test_paired_batches_skip_missing_records() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path();
    write_record(base, "0001", "g1");
    write_record(base, "0003", "g3");
    // 第 2 条记录的资源不存在
    let manifest = base.join("train.json");
    write_json(
        &manifest,
        &json!([
            {"wearing": "0001.jpg", "inner_top": null, "main_top": "g1"},
            {"wearing": "0002.jpg", "inner_top": "g2", "main_top": null},
            {"wearing": "0003.jpg", "inner_top": "g3", "main_top": "g9"},
            {"wearing": "0001.jpg", "main_top": "g1"},
        ]),
    );

    let dataset = PairedSampleLoader::new(&manifest)
        .unwrap()
        .layout(AssetLayout::with_base_dir(base));
    assert_eq!(dataset.len(), 4);

    let loader = DataLoader::new(dataset, 4).num_workers(2);
    let batches: Vec<_> = loader.iter().map(|b| b.unwrap()).collect();
    assert_eq!(batches.len(), 1);

    let (combined, person, garment_pose, garment, original) = &batches[0];
    assert_eq!(combined.shape(), &[4, 3, 12, 16]);
    assert_eq!(person.shape(), &[4, 3, 2]);
    assert_eq!(garment_pose.shape(), &[4, 4]);
    assert_eq!(garment.shape(), &[4, 3, 6, 6]);
    assert_eq!(original.shape(), &[4, 3, 12, 8]);
}
