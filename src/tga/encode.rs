use super::TgaEncoding;
use super::header::{DESC_ALPHA_8, DESC_TOP_ORIGIN, ImageType, TgaHeader};
use super::palette::ColorTable;
use super::rle;
use crate::error::BitmapError;
use crate::image::{Image, Orientation};
use crate::pixel::convert_bytes;
use crate::sink::ByteSink;

fn base_header(image: &Image, image_type: ImageType) -> Result<TgaHeader, BitmapError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(BitmapError::InvalidDimensions {
            width: i64::from(width),
            height: i64::from(height),
        });
    }
    let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
        return Err(BitmapError::DimensionsTooLarge { width, height });
    };

    let layout = image.layout();
    let mut descriptor = if layout.has_alpha() { DESC_ALPHA_8 } else { 0 };
    if image.orientation == Orientation::TopLeft {
        descriptor |= DESC_TOP_ORIGIN;
    }
    Ok(TgaHeader {
        image_type: image_type as u8,
        width: w,
        height: h,
        bits_per_pixel: (layout.bytes_per_pixel() * 8) as u8,
        descriptor,
        ..Default::default()
    })
}

/// Serialize `image` with `encoding`. The sink is reset first.
pub(crate) fn encode<S: ByteSink>(
    image: &Image,
    encoding: TgaEncoding,
    sink: &mut S,
) -> Result<(), BitmapError> {
    let image_type = match encoding {
        TgaEncoding::Uncompressed => ImageType::TrueColor,
        TgaEncoding::ColorMapped => ImageType::Mapped,
        TgaEncoding::Rle => ImageType::RleTrueColor,
    };
    let header = base_header(image, image_type)?;
    log::debug!(
        "tga: encoding {}x{} {:?} as {:?}",
        header.width,
        header.height,
        image.layout(),
        encoding
    );

    sink.reset()?;
    let native = image.layout().tga_native();
    match encoding {
        TgaEncoding::Uncompressed => {
            sink.write_typed(&header)?;
            sink.write(&convert_bytes(image.pixels(), image.layout(), native))
        }
        TgaEncoding::Rle => {
            sink.write_typed(&header)?;
            let pixels = convert_bytes(image.pixels(), image.layout(), native);
            rle::compress_into(&pixels, native.bytes_per_pixel(), sink)
        }
        TgaEncoding::ColorMapped => {
            let table = ColorTable::build(image.pixels(), image.layout())?;
            log::debug!("tga: color table of {} entries", table.len());
            let header = TgaHeader {
                colormap_type: 1,
                colormap_len: table.len() as u16,
                colormap_entry_size: header.bits_per_pixel,
                bits_per_pixel: 16,
                ..header
            };
            sink.write_typed(&header)?;
            sink.write(table.entries())?;
            let mut indices = alloc::vec::Vec::with_capacity(table.indices().len() * 2);
            for &index in table.indices() {
                indices.extend_from_slice(&index.to_le_bytes());
            }
            sink.write(&indices)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::FixedLayout;
    use crate::pixel::PixelLayout;
    use alloc::vec::Vec;

    fn encoded(image: &Image, encoding: TgaEncoding) -> Vec<u8> {
        let mut out = Vec::new();
        encode(image, encoding, &mut out).unwrap();
        out
    }

    #[test]
    fn uncompressed_layout() {
        let image = Image::from_pixels(1, 1, PixelLayout::Rgb8, alloc::vec![1, 2, 3]).unwrap();
        let out = encoded(&image, TgaEncoding::Uncompressed);
        let header = TgaHeader::parse(&out);
        assert_eq!(header.image_type, 2);
        assert_eq!(header.colormap_type, 0);
        assert_eq!(header.bits_per_pixel, 24);
        assert_eq!(header.descriptor, DESC_TOP_ORIGIN);
        assert_eq!(&out[TgaHeader::SIZE..], &[3, 2, 1]);
    }

    #[test]
    fn rle_concrete_packet() {
        let px = alloc::vec![10, 20, 30, 255, 10, 20, 30, 255];
        let image = Image::from_pixels(2, 1, PixelLayout::Rgba8, px).unwrap();
        let out = encoded(&image, TgaEncoding::Rle);
        let header = TgaHeader::parse(&out);
        assert_eq!(header.image_type, 10);
        assert_eq!(header.bits_per_pixel, 32);
        assert_eq!(header.descriptor, DESC_TOP_ORIGIN | DESC_ALPHA_8);
        assert_eq!(&out[TgaHeader::SIZE..], &[0x81, 30, 20, 10, 255]);
    }

    #[test]
    fn mapped_layout() {
        let px = alloc::vec![9, 9, 9, 1, 1, 1, 9, 9, 9];
        let mut image = Image::from_pixels(3, 1, PixelLayout::Bgr8, px).unwrap();
        image.orientation = Orientation::BottomLeft;
        let out = encoded(&image, TgaEncoding::ColorMapped);
        let header = TgaHeader::parse(&out);
        assert_eq!(header.image_type, 1);
        assert_eq!(header.colormap_type, 1);
        assert_eq!(header.colormap_len, 2);
        assert_eq!(header.colormap_entry_size, 24);
        assert_eq!(header.bits_per_pixel, 16);
        assert_eq!(header.descriptor, 0);
        assert_eq!(
            &out[TgaHeader::SIZE..],
            &[9, 9, 9, 1, 1, 1, 0, 0, 1, 0, 0, 0]
        );
    }

    #[test]
    fn rejects_empty_and_oversized() {
        let mut out = Vec::new();
        assert!(matches!(
            encode(&Image::empty(PixelLayout::Rgb8), TgaEncoding::Rle, &mut out),
            Err(BitmapError::InvalidDimensions { .. })
        ));
        let wide = Image::new(70_000, 1, PixelLayout::Rgb8).unwrap();
        assert!(matches!(
            encode(&wide, TgaEncoding::Uncompressed, &mut out),
            Err(BitmapError::DimensionsTooLarge { width: 70_000, .. })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn sink_is_reset_first() {
        let image = Image::new(1, 1, PixelLayout::Rgb8).unwrap();
        let mut out = alloc::vec![0xffu8; 40];
        encode(&image, TgaEncoding::Uncompressed, &mut out).unwrap();
        assert_eq!(out.len(), TgaHeader::SIZE + 3);
    }
}
