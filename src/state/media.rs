use crate::blog::PostID;
use crate::forms::ImageUpload;
use std::path::{Path, PathBuf};

impl super::State {
    pub fn post_image_dir(&self, post_id: PostID) -> PathBuf {
        self.config
            .media
            .path
            .join("post")
            .join(post_id.to_string())
            .join("image")
    }

    /// Stores `upload` as the post's only image and queues its thumbnails.
    /// The new file is written to a staging folder first, so a failed write
    /// leaves the previous image untouched.
    pub async fn save_post_image(
        &self,
        post_id: PostID,
        upload: &ImageUpload,
    ) -> std::io::Result<()> {
        let image_dir = self.post_image_dir(post_id);
        let staging_dir = image_dir.with_file_name("image.new");

        remove_dir_if_exists(&staging_dir).await?;
        tokio::fs::create_dir_all(staging_dir.join("raw")).await?;
        tokio::fs::write(staging_dir.join("raw").join(&upload.file_name), &upload.bytes).await?;

        remove_dir_if_exists(&image_dir).await?;
        tokio::fs::rename(&staging_dir, &image_dir).await?;

        crate::job::spawn_thumbnails(image_dir, upload.file_name.clone());
        Ok(())
    }

    pub async fn remove_post_media(&self, post_id: PostID) {
        let post_dir = self
            .config
            .media
            .path
            .join("post")
            .join(post_id.to_string());

        match tokio::fs::remove_dir_all(&post_dir).await {
            Ok(()) => (),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => (),
            Err(err) => tracing::error!("Error deleting media for post {post_id}: {err}"),
        }
    }
}

async fn remove_dir_if_exists(path: &Path) -> std::io::Result<()> {
    match tokio::fs::remove_dir_all(path).await {
        Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err),
        _ => Ok(()),
    }
}
