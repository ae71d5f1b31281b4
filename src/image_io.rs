//! Reading and writing PNG files as guillotine images.

use std::io::{Read, Write};

use guillotine::Image;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error(transparent)]
    Decoding(#[from] png::DecodingError),

    #[error(transparent)]
    Encoding(#[from] png::EncodingError),

    #[error("unsupported PNG format {color_type:?} at {bit_depth:?}")]
    Unsupported {
        color_type: png::ColorType,
        bit_depth: png::BitDepth,
    },
}

pub fn decode_png<R: Read>(input: R) -> Result<Image, ImageError> {
    let mut decoder = png::Decoder::new(input);

    // Expand palettes, low bit depths and tRNS chunks so that everything we
    // see below is 8 bits per channel.
    decoder.set_transformations(png::Transformations::EXPAND);

    let (info, mut reader) = decoder.read_info()?;

    let mut data = vec![0; info.buffer_size()];
    reader.next_frame(&mut data)?;

    let size = (info.width, info.height);

    if info.bit_depth != png::BitDepth::Eight {
        return Err(ImageError::Unsupported {
            color_type: info.color_type,
            bit_depth: info.bit_depth,
        });
    }

    let rgba = match info.color_type {
        png::ColorType::RGBA => data,
        png::ColorType::RGB => data
            .chunks_exact(3)
            .flat_map(|px| vec![px[0], px[1], px[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .flat_map(|px| vec![px[0], px[0], px[0], px[1]])
            .collect(),
        png::ColorType::Grayscale => data
            .iter()
            .flat_map(|&value| vec![value, value, value, 255])
            .collect(),
        color_type => {
            return Err(ImageError::Unsupported {
                color_type,
                bit_depth: info.bit_depth,
            })
        }
    };

    Ok(Image::new_rgba8(size, rgba))
}

pub fn encode_png<W: Write>(image: &Image, output: W) -> Result<(), ImageError> {
    let (width, height) = image.size();
    let mut encoder = png::Encoder::new(output, width, height);

    encoder.set_color(png::ColorType::RGBA);
    encoder.set_depth(png::BitDepth::Eight);

    let mut output_writer = encoder.write_header()?;
    output_writer.write_image_data(image.data())?;

    // On drop, output_writer will write the last chunk of the PNG file.
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    use guillotine::Pixel;

    #[test]
    fn round_trip() {
        let mut image = Image::new_empty_rgba8((3, 2));
        image.set_pixel((0, 0), Pixel::new(255, 0, 0, 255));
        image.set_pixel((2, 1), Pixel::new(0, 0, 255, 128));

        let mut encoded = Vec::new();
        encode_png(&image, &mut encoded).unwrap();

        let decoded = decode_png(encoded.as_slice()).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn rgb_gains_alpha() {
        let mut encoded = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut encoded, 2, 1);
            encoder.set_color(png::ColorType::RGB);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[1, 2, 3, 4, 5, 6]).unwrap();
        }

        let decoded = decode_png(encoded.as_slice()).unwrap();
        assert_eq!(decoded.size(), (2, 1));
        assert_eq!(decoded.data(), &[1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn garbage_fails() {
        assert!(decode_png(&b"not a png"[..]).is_err());
    }
}
