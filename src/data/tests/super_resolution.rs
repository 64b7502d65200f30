use rand::SeedableRng;
use rand::rngs::StdRng;

use super::save_rgb;
use crate::assert_err;
use crate::data::{DataError, Dataset, PatchSuperResolutionLoader};

#[test]
fn test_super_resolution_default_shapes() {
    let dir = tempfile::tempdir().unwrap();
    save_rgb(&dir.path().join("a.png"), 300, 280, 10);
    save_rgb(&dir.path().join("b.png"), 256, 256, 20);

    let dataset = PatchSuperResolutionLoader::new(dir.path()).unwrap();
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.input_size(), 64);

    for index in 0..dataset.len() {
        let (input, ground_truth) = dataset.fetch(index).unwrap();
        assert_eq!(input.shape(), &[3, 64, 64]);
        assert_eq!(ground_truth.shape(), &[3, 256, 256]);
        assert!(ground_truth.to_vec().iter().all(|v| (0.0..=1.0).contains(v)));
        assert!(input.to_vec().iter().all(|v| (0.0..=1.0).contains(v)));
    }
}

#[test]
fn test_super_resolution_custom_config() {
    let dir = tempfile::tempdir().unwrap();
    save_rgb(&dir.path().join("a.png"), 200, 150, 10);

    let dataset = PatchSuperResolutionLoader::new(dir.path())
        .unwrap()
        .crop_size(128)
        .unwrap()
        .downscale_factor(2)
        .unwrap();
    let (input, ground_truth) = dataset.fetch(0).unwrap();
    assert_eq!(input.shape(), &[3, 64, 64]);
    assert_eq!(ground_truth.shape(), &[3, 128, 128]);
}

#[test]
fn test_super_resolution_crop_not_divisible_by_default_factor() {
    let dir = tempfile::tempdir().unwrap();
    save_rgb(&dir.path().join("a.png"), 120, 100, 10);

    // 90 不能被默认倍数 4 整除，3 也不能整除默认裁剪 256，但 (90, 3) 本身合法
    let by_pair = PatchSuperResolutionLoader::new(dir.path())
        .unwrap()
        .with_patch(90, 3)
        .unwrap();
    let crop_first = PatchSuperResolutionLoader::new(dir.path())
        .unwrap()
        .crop_size(90)
        .unwrap()
        .downscale_factor(3)
        .unwrap();
    let factor_first = PatchSuperResolutionLoader::new(dir.path())
        .unwrap()
        .downscale_factor(3)
        .unwrap()
        .crop_size(90)
        .unwrap();
    let constructed = PatchSuperResolutionLoader::new_with(dir.path(), 90, 3).unwrap();

    for dataset in [by_pair, crop_first, factor_first, constructed] {
        assert_eq!(dataset.input_size(), 30);
        let (input, ground_truth) = dataset.fetch(0).unwrap();
        assert_eq!(input.shape(), &[3, 30, 30]);
        assert_eq!(ground_truth.shape(), &[3, 90, 90]);
    }
}

#[test]
fn test_super_resolution_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    save_rgb(&dir.path().join("a.png"), 256, 256, 10);
    let dataset = PatchSuperResolutionLoader::new(dir.path()).unwrap();

    assert_err!(dataset.clone().crop_size(0), DataError::InvalidConfig(_));
    assert_err!(dataset.clone().downscale_factor(0), DataError::InvalidConfig(_));
    assert_err!(dataset.clone().with_patch(90, 4), DataError::InvalidConfig(_));
    assert_err!(dataset.clone().with_patch(0, 4), DataError::InvalidConfig(_));
    assert_err!(
        PatchSuperResolutionLoader::new_with(dir.path(), 100, 3),
        DataError::InvalidConfig(msg) if msg.contains("100") && msg.contains("3")
    );

    // 单独设置后仍不能整除的组合在取样时报错
    let mismatched = dataset.crop_size(90).unwrap();
    assert_err!(mismatched.fetch(0), DataError::InvalidConfig(_));
}

#[test]
fn test_super_resolution_converts_gray_to_rgb() {
    let dir = tempfile::tempdir().unwrap();
    image::GrayImage::from_pixel(256, 256, image::Luma([77]))
        .save(dir.path().join("gray.png"))
        .unwrap();

    let dataset = PatchSuperResolutionLoader::new(dir.path()).unwrap();
    let (input, ground_truth) = dataset.fetch(0).unwrap();
    assert_eq!(input.shape(), &[3, 64, 64]);
    assert_eq!(ground_truth.shape(), &[3, 256, 256]);
}

#[test]
fn test_super_resolution_image_too_small() {
    let dir = tempfile::tempdir().unwrap();
    save_rgb(&dir.path().join("small.png"), 300, 255, 10);

    let dataset = PatchSuperResolutionLoader::new(dir.path()).unwrap();
    assert_err!(
        dataset.fetch(0),
        DataError::ImageTooSmall { width: 300, height: 255, crop: 256, .. }
    );
}

#[test]
fn test_super_resolution_directory_errors() {
    let dir = tempfile::tempdir().unwrap();
    assert_err!(
        PatchSuperResolutionLoader::new(dir.path().join("missing")),
        DataError::FileNotFound(_)
    );

    let file = dir.path().join("file.png");
    save_rgb(&file, 4, 4, 0);
    assert_err!(
        PatchSuperResolutionLoader::new(&file),
        DataError::InvalidConfig(_)
    );
}

#[test]
fn test_super_resolution_listing_is_a_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    save_rgb(&dir.path().join("b.png"), 256, 256, 10);
    save_rgb(&dir.path().join("a.png"), 256, 256, 10);
    std::fs::create_dir(dir.path().join("nested")).unwrap();

    let dataset = PatchSuperResolutionLoader::new(dir.path()).unwrap();
    // 子目录同样计入，按文件名排序
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.image_list()[0], dir.path().join("a.png"));
    assert!(dataset.fetch(2).is_err());

    // 构造之后新增的文件不可见
    save_rgb(&dir.path().join("c.png"), 256, 256, 10);
    assert_eq!(dataset.len(), 3);
    assert_err!(dataset.fetch(3), DataError::IndexOutOfBounds { index: 3, len: 3 });
}

#[test]
fn test_super_resolution_randomness() {
    let dir = tempfile::tempdir().unwrap();
    save_rgb(&dir.path().join("a.png"), 512, 512, 10);
    let dataset = PatchSuperResolutionLoader::new(dir.path()).unwrap();

    // 相同种子结果一致
    let first = dataset
        .fetch_with_rng(0, &mut StdRng::seed_from_u64(1))
        .unwrap();
    let second = dataset
        .fetch_with_rng(0, &mut StdRng::seed_from_u64(1))
        .unwrap();
    assert_eq!(first, second);

    // 多次取样的裁剪位置不同，但形状不变
    let samples: Vec<_> = (0..5).map(|_| dataset.fetch(0).unwrap()).collect();
    assert!(samples.iter().any(|s| s.1 != samples[0].1));
    assert!(samples.iter().all(|s| s.0.shape() == &[3, 64, 64]));
}
