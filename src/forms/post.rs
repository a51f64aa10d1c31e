use super::{required, FormErrors, REQUIRED};
use crate::blog::{
    Category, CategoryID, Location, LocationID, Post, PostContent, IMAGE_NAME_MAX_CHARS,
};
use axum::body::Bytes;
use axum::extract::Multipart;
use chrono::TimeZone;
use validator::Validate;

const INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";
const INVALID_DATETIME: &str = "Enter a valid date/time.";
const INVALID_IMAGE: &str =
    "Upload a valid image. The file you uploaded was either not an image or a corrupted image.";

const PUB_DATE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];
pub const PUB_DATE_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone)]
pub enum ImageChange {
    Keep,
    Clear,
    Replace(ImageUpload),
}

/// Raw values of the post form as submitted, kept as text so an invalid
/// submission can be shown back unchanged.
#[derive(Debug, Default, Clone, Validate)]
pub struct PostForm {
    #[validate(
        custom(function = "required"),
        length(max = 256, message = "Ensure this value has at most 256 characters.")
    )]
    pub title: String,
    #[validate(custom(function = "required"))]
    pub text: String,
    pub pub_date: String,
    pub category: String,
    pub location: String,
    pub is_published: bool,
    pub image: Option<ImageUpload>,
    pub clear_image: bool,
}

impl PostForm {
    pub fn new(now: chrono::DateTime<chrono::Utc>) -> Self {
        PostForm {
            pub_date: now.format(PUB_DATE_INPUT_FORMAT).to_string(),
            is_published: true,
            ..PostForm::default()
        }
    }

    pub fn from_post(post: &Post) -> Self {
        let content = &post.content;
        PostForm {
            title: content.title.clone(),
            text: content.text.clone(),
            pub_date: content.pub_date.format(PUB_DATE_INPUT_FORMAT).to_string(),
            category: content.category.map(|id| id.to_string()).unwrap_or_default(),
            location: content.location.map(|id| id.to_string()).unwrap_or_default(),
            is_published: content.is_published,
            image: None,
            clear_image: false,
        }
    }

    pub async fn from_multipart(mut multipart: Multipart) -> crate::error::Result<Self> {
        let mut form = PostForm::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match name.as_str() {
                "title" => form.title = field.text().await?,
                "text" => form.text = field.text().await?,
                "pub_date" => form.pub_date = field.text().await?,
                "category" => form.category = field.text().await?,
                "location" => form.location = field.text().await?,
                "is_published" => form.is_published = true,
                "image-clear" => form.clear_image = true,
                "image" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await?;
                    if !file_name.is_empty() && !bytes.is_empty() {
                        form.image = Some(ImageUpload { file_name, bytes });
                    }
                }
                _ => (),
            }
        }

        Ok(form)
    }

    /// Validates the submission against the available choices. The returned
    /// content has no image set; the caller applies the [`ImageChange`].
    pub async fn clean(
        &self,
        categories: &[Category],
        locations: &[Location],
    ) -> Result<(PostContent, ImageChange), FormErrors> {
        let mut errors = FormErrors::of(self);

        let pub_date = match parse_pub_date(&self.pub_date) {
            Ok(it) => Some(it),
            Err(message) => {
                errors.add("pub_date", message);
                None
            }
        };

        let category = match self.category.trim() {
            "" => {
                errors.add("category", REQUIRED);
                None
            }
            raw => {
                let id = raw.parse::<CategoryID>().ok();
                let known = id.filter(|id| categories.iter().any(|it| it.id == *id));
                if known.is_none() {
                    errors.add("category", INVALID_CHOICE);
                }
                known
            }
        };

        let location = match self.location.trim() {
            "" => None,
            raw => {
                let id = raw.parse::<LocationID>().ok();
                let known = id.filter(|id| locations.iter().any(|it| it.id == *id));
                if known.is_none() {
                    errors.add("location", INVALID_CHOICE);
                }
                known
            }
        };

        let image_change = match (&self.image, self.clear_image) {
            (Some(upload), _) => match clean_image(upload).await {
                Ok(upload) => ImageChange::Replace(upload),
                Err(message) => {
                    errors.add("image", message);
                    ImageChange::Keep
                }
            },
            (None, true) => ImageChange::Clear,
            (None, false) => ImageChange::Keep,
        };

        let (Some(pub_date), true) = (pub_date, errors.is_empty()) else {
            return Err(errors);
        };

        Ok((
            PostContent {
                title: self.title.trim().to_string(),
                text: self.text.trim().to_string(),
                pub_date,
                category,
                location,
                is_published: self.is_published,
                image: None,
            },
            image_change,
        ))
    }
}

fn parse_pub_date(raw: &str) -> Result<chrono::DateTime<chrono::Utc>, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(REQUIRED);
    }

    PUB_DATE_FORMATS
        .iter()
        .find_map(|format| chrono::NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| chrono::Utc.from_utc_datetime(&naive))
        .ok_or(INVALID_DATETIME)
}

async fn clean_image(upload: &ImageUpload) -> Result<ImageUpload, &'static str> {
    let Some(file_name) = std::path::Path::new(&upload.file_name)
        .file_name()
        .and_then(|name| name.to_str())
    else {
        return Err(INVALID_IMAGE);
    };

    if file_name.chars().count() > IMAGE_NAME_MAX_CHARS {
        return Err("Ensure this filename has at most 100 characters.");
    }

    // a full decode, so truncated files with a valid header are caught too
    let bytes = upload.bytes.clone();
    let decodes = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes).is_ok())
        .await
        .unwrap_or(false);
    if !decodes {
        return Err(INVALID_IMAGE);
    }

    Ok(ImageUpload {
        file_name: file_name.to_string(),
        bytes: upload.bytes.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::category;

    fn png_bytes() -> Vec<u8> {
        let mut png = Vec::new();
        image::DynamicImage::ImageRgb8(image::RgbImage::new(8, 8))
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageOutputFormat::Png)
            .unwrap();
        png
    }

    fn valid_form() -> PostForm {
        PostForm {
            title: " Trip to the sea ".to_string(),
            text: "It was windy.".to_string(),
            pub_date: "2024-05-01T10:30".to_string(),
            category: "1".to_string(),
            is_published: true,
            ..PostForm::default()
        }
    }

    #[tokio::test]
    async fn valid_submission_becomes_content() {
        let categories = [category(1, "travel", true)];

        let (content, image) = valid_form().clean(&categories, &[]).await.unwrap();
        assert_eq!(content.title, "Trip to the sea");
        assert_eq!(content.category, Some(1));
        assert_eq!(content.location, None);
        assert_eq!(
            content.pub_date,
            chrono::Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap()
        );
        assert!(matches!(image, ImageChange::Keep));
    }

    #[tokio::test]
    async fn missing_fields_are_reported_per_field() {
        let errors = PostForm::default().clean(&[], &[]).await.unwrap_err();

        for field in ["title", "text", "pub_date", "category"] {
            assert_eq!(errors.field(field), [REQUIRED.to_string()], "{field}");
        }
        assert!(errors.field("location").is_empty());
    }

    #[tokio::test]
    async fn unknown_choices_and_bad_dates_are_rejected() {
        let categories = [category(1, "travel", true)];
        let form = PostForm {
            pub_date: "yesterday".to_string(),
            category: "7".to_string(),
            location: "3".to_string(),
            ..valid_form()
        };

        let errors = form.clean(&categories, &[]).await.unwrap_err();
        assert_eq!(errors.field("pub_date"), [INVALID_DATETIME.to_string()]);
        assert_eq!(errors.field("category"), [INVALID_CHOICE.to_string()]);
        assert_eq!(errors.field("location"), [INVALID_CHOICE.to_string()]);
    }

    #[tokio::test]
    async fn overlong_title_is_rejected() {
        let categories = [category(1, "travel", true)];
        let form = PostForm {
            title: "x".repeat(257),
            ..valid_form()
        };

        let errors = form.clean(&categories, &[]).await.unwrap_err();
        assert_eq!(errors.field("title").len(), 1);
    }

    #[tokio::test]
    async fn non_image_upload_is_rejected() {
        let categories = [category(1, "travel", true)];
        let form = PostForm {
            image: Some(ImageUpload {
                file_name: "notes.png".to_string(),
                bytes: Bytes::from_static(b"definitely not a png"),
            }),
            ..valid_form()
        };

        let errors = form.clean(&categories, &[]).await.unwrap_err();
        assert_eq!(errors.field("image"), [INVALID_IMAGE.to_string()]);
    }

    #[tokio::test]
    async fn image_path_is_reduced_to_its_file_name() {
        let categories = [category(1, "travel", true)];
        let form = PostForm {
            image: Some(ImageUpload {
                file_name: "../../etc/sea.png".to_string(),
                bytes: Bytes::from(png_bytes()),
            }),
            ..valid_form()
        };

        let (_, image) = form.clean(&categories, &[]).await.unwrap();
        let ImageChange::Replace(upload) = image else {
            panic!("expected a replacement image");
        };
        assert_eq!(upload.file_name, "sea.png");
    }

    #[tokio::test]
    async fn truncated_image_is_rejected() {
        let categories = [category(1, "travel", true)];
        let mut truncated = png_bytes();
        truncated.truncate(truncated.len() / 2);

        for bytes in [truncated, b"\x89PNG\r\n\x1a\n\0\0\0\rIHDRgarbage".to_vec()] {
            let form = PostForm {
                image: Some(ImageUpload {
                    file_name: "broken.png".to_string(),
                    bytes: Bytes::from(bytes),
                }),
                ..valid_form()
            };

            let errors = form.clean(&categories, &[]).await.unwrap_err();
            assert_eq!(errors.field("image"), [INVALID_IMAGE.to_string()]);
        }
    }
}
