use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::vision::{Interpolation, Vision};

/// 像素值编码坐标，便于检查裁剪位置
fn coordinate_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 7]))
}

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓随机裁剪↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
#[test]
fn test_random_crop_origin_fits_within_bounds() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..1000 {
        let (x, y) = Vision::random_crop_origin(300, 260, 256, 256, &mut rng).unwrap();
        assert!(x <= 300 - 256);
        assert!(y <= 260 - 256);
    }
}

#[test]
fn test_random_crop_origin_with_exact_size() {
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(
        Vision::random_crop_origin(256, 256, 256, 256, &mut rng),
        Some((0, 0))
    );
}

#[test]
fn test_random_crop_origin_with_too_small_image() {
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(Vision::random_crop_origin(255, 300, 256, 256, &mut rng), None);
    assert_eq!(Vision::random_crop_origin(300, 255, 256, 256, &mut rng), None);
}

#[test]
fn test_random_crop_extracts_window() {
    let image = DynamicImage::ImageRgb8(coordinate_image(40, 30));
    let mut rng = StdRng::seed_from_u64(3);
    let crop = Vision::random_crop(&image, 16, 8, &mut rng).unwrap();
    assert_eq!(crop.dimensions(), (16, 8));

    // 裁剪块内像素的坐标应连续递增
    let rgb = crop.to_rgb8();
    let origin = rgb.get_pixel(0, 0).0;
    let corner = rgb.get_pixel(15, 7).0;
    assert_eq!(corner[0], origin[0] + 15);
    assert_eq!(corner[1], origin[1] + 7);

    assert!(Vision::random_crop(&image, 41, 8, &mut rng).is_none());
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑随机裁剪↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

#[test]
fn test_resize_image() {
    let image = DynamicImage::ImageRgb8(coordinate_image(256, 256));
    for interpolation in [
        Interpolation::Nearest,
        Interpolation::Bilinear,
        Interpolation::Bicubic,
    ] {
        let resized = Vision::resize_image(&image, 64, 32, interpolation);
        assert_eq!(resized.dimensions(), (64, 32));
    }
    assert_eq!(Interpolation::default(), Interpolation::Bilinear);
}

#[test]
fn test_hstack() {
    let left = RgbImage::from_pixel(3, 2, Rgb([255, 0, 0]));
    let right = RgbImage::from_pixel(4, 2, Rgb([0, 0, 255]));
    let combined = Vision::hstack(&left, &right).unwrap();

    assert_eq!(combined.dimensions(), (7, 2));
    assert_eq!(combined.get_pixel(2, 1).0, [255, 0, 0]);
    assert_eq!(combined.get_pixel(3, 0).0, [0, 0, 255]);
    assert_eq!(combined.get_pixel(6, 1).0, [0, 0, 255]);
}

#[test]
fn test_hstack_with_diff_heights() {
    let left = RgbImage::new(3, 2);
    let right = RgbImage::new(3, 3);
    assert!(Vision::hstack(&left, &right).is_none());
}

#[test]
fn test_open_image_keeps_color_mode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gray.png");
    image::GrayImage::from_pixel(5, 4, image::Luma([9])).save(&path).unwrap();

    let image = Vision::open_image(&path).unwrap();
    assert_eq!(image.color(), image::ColorType::L8);
    let rgb = Vision::open_rgb(&path).unwrap();
    assert_eq!(rgb.get_pixel(0, 0).0, [9, 9, 9]);

    assert!(Vision::open_image(dir.path().join("missing.png")).is_err());
}

#[test]
fn test_open_image_detects_format_from_content() {
    let dir = tempfile::tempdir().unwrap();
    // 扩展名无法识别
    let unknown = dir.path().join("a.img");
    coordinate_image(6, 4)
        .save_with_format(&unknown, image::ImageFormat::Png)
        .unwrap();
    let image = Vision::open_image(&unknown).unwrap();
    assert_eq!(image.dimensions(), (6, 4));
    assert_eq!(image.to_rgb8().get_pixel(5, 3).0, [5, 3, 7]);

    // 扩展名与内容不符
    let mislabeled = dir.path().join("b.jpg");
    coordinate_image(3, 2)
        .save_with_format(&mislabeled, image::ImageFormat::Png)
        .unwrap();
    let rgb = Vision::open_rgb(&mislabeled).unwrap();
    assert_eq!(rgb.get_pixel(2, 1).0, [2, 1, 7]);
}

#[test]
fn test_open_image_missing_file_is_io_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let result = Vision::open_image(dir.path().join("missing.png"));
    assert!(matches!(
        result,
        Err(image::ImageError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound
    ));
}
