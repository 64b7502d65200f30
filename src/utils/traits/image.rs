use crate::errors::TensorError;
use crate::tensor::Tensor;
use image::{DynamicImage, ImageBuffer, Pixel};

pub trait TraitForDynamicImage {
    fn get_channel_len(&self) -> usize;
    /// 按图像自身的颜色模式转换为`[C, H, W]`、值域`[0, 1]`的张量（不强制转RGB）：
    /// 灰度为1通道、灰度+透明为2通道、RGB为3通道、RGBA为4通道；16位与浮点图像同样缩放到`[0, 1]`。
    fn to_chw_tensor(&self) -> Result<Tensor, TensorError>;
}

impl TraitForDynamicImage for DynamicImage {
    fn get_channel_len(&self) -> usize {
        self.color().channel_count() as usize
    }

    fn to_chw_tensor(&self) -> Result<Tensor, TensorError> {
        match self.get_channel_len() {
            1 => self.to_luma32f().to_chw_tensor(),
            2 => self.to_luma_alpha32f().to_chw_tensor(),
            3 => self.to_rgb32f().to_chw_tensor(),
            _ => self.to_rgba32f().to_chw_tensor(),
        }
    }
}

pub trait TraitForImageBuffer {
    /// 像素按原值转为f32（不做缩放），布局由`[H, W, C]`转置为`[C, H, W]`
    fn to_chw_tensor(&self) -> Result<Tensor, TensorError>;
}

impl<P: Pixel + 'static> TraitForImageBuffer for ImageBuffer<P, Vec<P::Subpixel>> {
    fn to_chw_tensor(&self) -> Result<Tensor, TensorError> {
        let width = self.width() as usize;
        let height = self.height() as usize;
        let channels = P::CHANNEL_COUNT as usize;
        let plane = height * width;

        let mut tensor_data = vec![0.0; channels * plane];
        for (x, y, pixel) in self.enumerate_pixels() {
            let offset = y as usize * width + x as usize;
            for (c, value) in pixel.channels().iter().enumerate() {
                tensor_data[c * plane + offset] = num_traits::NumCast::from(*value).unwrap_or(0.0);
            }
        }

        Tensor::from_vec(tensor_data, &[channels, height, width])
    }
}
