use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma, Pixel, Rgb, Rgba};

use super::decode::ChannelFormat;

/// One level of a mip chain, tightly packed in the texture's channel format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MipLevel {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Number of levels down to 1x1: `floor(log2(max(w, h))) + 1`.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Build the full mip chain from the base pixels, each level filtered from the one above.
pub fn generate(format: ChannelFormat, width: u32, height: u32, pixels: Vec<u8>) -> Vec<MipLevel> {
    match format {
        ChannelFormat::Red => chain::<Luma<u8>>(width, height, pixels),
        ChannelFormat::Rgb => chain::<Rgb<u8>>(width, height, pixels),
        ChannelFormat::Rgba => chain::<Rgba<u8>>(width, height, pixels),
    }
}

fn chain<P>(width: u32, height: u32, pixels: Vec<u8>) -> Vec<MipLevel>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    let count = mip_level_count(width, height) as usize;
    let expected = width as usize * height as usize * P::CHANNEL_COUNT as usize;
    if pixels.len() != expected {
        // Buffer does not match the dimensions; upload what we have without mips.
        return vec![MipLevel {
            width,
            height,
            pixels,
        }];
    }
    // Length was checked above, so this only fails on a size overflow.
    let Some(mut current) = ImageBuffer::<P, Vec<u8>>::from_raw(width, height, pixels) else {
        return Vec::new();
    };

    let mut levels = Vec::with_capacity(count);
    levels.push(MipLevel {
        width,
        height,
        pixels: current.as_raw().clone(),
    });

    for _ in 1..count {
        let w = (current.width() / 2).max(1);
        let h = (current.height() / 2).max(1);
        current = imageops::resize(&current, w, h, FilterType::Triangle);
        levels.push(MipLevel {
            width: w,
            height: h,
            pixels: current.as_raw().clone(),
        });
    }
    levels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_count() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(2, 2), 2);
        assert_eq!(mip_level_count(256, 256), 9);
        assert_eq!(mip_level_count(640, 480), 10);
        assert_eq!(mip_level_count(1, 5), 3);
    }

    #[test]
    fn test_chain_halves_to_one_by_one() {
        let levels = generate(ChannelFormat::Rgb, 8, 2, vec![200; 8 * 2 * 3]);
        let sizes: Vec<_> = levels.iter().map(|l| (l.width, l.height)).collect();
        assert_eq!(sizes, vec![(8, 2), (4, 1), (2, 1), (1, 1)]);
        for level in &levels {
            assert_eq!(level.pixels.len(), (level.width * level.height * 3) as usize);
        }
    }

    #[test]
    fn test_uniform_colour_preserved() {
        let levels = generate(ChannelFormat::Rgba, 4, 4, [9, 99, 199, 255].repeat(16));
        let last = levels.last().unwrap();
        assert_eq!((last.width, last.height), (1, 1));
        assert_eq!(last.pixels, vec![9, 99, 199, 255]);
    }

    #[test]
    fn test_single_channel_chain() {
        let levels = generate(ChannelFormat::Red, 4, 4, vec![50; 16]);
        assert_eq!(levels.len(), 3);
        assert_eq!(levels[2].pixels, vec![50]);
    }

    #[test]
    fn test_base_level_is_the_source_image() {
        let pixels: Vec<u8> = (0..4 * 4 * 4).map(|i| i as u8).collect();
        let levels = generate(ChannelFormat::Rgba, 4, 4, pixels.clone());
        assert_eq!(levels.len(), 3);
        assert_eq!(levels[0].pixels, pixels);
        assert_eq!(levels[2].pixels.len(), 4);
    }

    #[test]
    fn test_mismatched_buffer_keeps_base_only() {
        let levels = generate(ChannelFormat::Rgb, 4, 4, vec![0; 5]);
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].pixels.len(), 5);
    }
}
