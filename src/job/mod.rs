use std::path::PathBuf;

pub mod thumbnails;

/// Creates the small and large thumbnails of a freshly uploaded post image
/// on the blocking pool. The request that uploaded it does not wait.
pub fn spawn_thumbnails(image_dir: PathBuf, image_name: String) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        thumbnails::run(&image_dir, &image_name);
        tracing::debug!("Created thumbnails for {image_name} in {image_dir:?}");
    })
}
