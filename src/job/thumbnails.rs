use std::path::Path;

const SMALL_THUMB_SIZE: u32 = 128;
const LARGE_THUMB_SIZE: u32 = 512;

/// Reads `<image_dir>/raw/<image_name>` and writes the `small` and `large`
/// variants next to it. Formats that can't be resized (animated GIFs) are
/// copied as they are.
pub fn run(image_dir: &Path, image_name: &str) {
    let raw_path = image_dir.join("raw").join(image_name);
    if !raw_path.is_file() {
        tracing::debug!("Image {image_name} is gone, skipping thumbnails");
        return;
    }

    for (variant, max_size) in [("small", SMALL_THUMB_SIZE), ("large", LARGE_THUMB_SIZE)] {
        let variant_dir = image_dir.join(variant);
        // never recreate the image folder of a post deleted meanwhile
        match std::fs::create_dir(&variant_dir) {
            Ok(()) => (),
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => (),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Image folder {image_dir:?} is gone, skipping thumbnails");
                return;
            }
            Err(err) => {
                tracing::error!("Error creating {variant} thumbnail folder {variant_dir:?}: {err}");
                continue;
            }
        }
        let variant_path = variant_dir.join(image_name);

        match create_thumb(&raw_path, max_size) {
            Ok(Some(thumb)) => {
                if let Err(err) = thumb.save(&variant_path) {
                    tracing::error!(
                        "Error writing {variant} thumbnail for image {image_name}: {err}"
                    );
                }
            }
            Ok(None) => {
                if let Err(err) = std::fs::copy(&raw_path, &variant_path) {
                    tracing::error!("Error writing {variant} copy for image {image_name}: {err}");
                }
            }
            Err(err) => {
                tracing::error!("Error creating {variant} thumbnail for image {image_name}: {err}");
            }
        }
    }
}

fn create_thumb(
    image_path: &Path,
    max_size: u32,
) -> Result<Option<image::DynamicImage>, image::ImageError> {
    let image = image::io::Reader::open(image_path)?.with_guessed_format()?;

    // TODO: resize animated GIFs frame by frame instead of copying them
    if image.format() == Some(image::ImageFormat::Gif) {
        return Ok(None);
    }

    let image = image.decode()?;
    Ok(Some(create_thumb_static(image, max_size)))
}

fn create_thumb_static(image: image::DynamicImage, max_size: u32) -> image::DynamicImage {
    let (width, height) = (image.width(), image.height());

    if height <= max_size && width <= max_size {
        image
    } else {
        image.resize_to_fill(max_size, max_size, image::imageops::Lanczos3)
    }
}
