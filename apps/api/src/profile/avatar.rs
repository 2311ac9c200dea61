use std::future::Future;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;

/// Largest accepted avatar upload.
pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

/// Maps an image content type to the file extension used in the object key.
/// Non-image types are rejected.
pub fn extension_for(content_type: &str) -> Result<&'static str, AppError> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    let ext = match essence.as_str() {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "image/avif" => "avif",
        other if other.starts_with("image/") => "img",
        _ => {
            return Err(AppError::Validation(
                "avatar must be an image file".to_string(),
            ))
        }
    };
    Ok(ext)
}

pub fn check_size(len: usize) -> Result<(), AppError> {
    if len == 0 {
        return Err(AppError::Validation("avatar file is empty".to_string()));
    }
    if len > MAX_AVATAR_BYTES {
        return Err(AppError::Validation(format!(
            "avatar must be at most {} MiB",
            MAX_AVATAR_BYTES / (1024 * 1024)
        )));
    }
    Ok(())
}

pub fn avatar_key(user_id: Uuid, ext: &str) -> String {
    format!("avatars/{}/{}.{}", user_id, Uuid::new_v4(), ext)
}

/// Path-style public URL for an object: `{base}/{bucket}/{key}`.
pub fn public_url(base: &str, bucket: &str, key: &str) -> String {
    format!("{}/{}/{}", base.trim_end_matches('/'), bucket, key)
}

/// Blob storage for avatars. Implemented for the S3 client; tests use an in-memory fake.
#[async_trait]
pub trait AvatarStore: Send + Sync {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<(), AppError>;

    async fn delete(&self, bucket: &str, key: &str) -> Result<(), AppError>;
}

#[async_trait]
impl AvatarStore for aws_sdk_s3::Client {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<(), AppError> {
        self.put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| AppError::S3(format!("avatar upload failed: {e}")))?;
        Ok(())
    }

    async fn delete(&self, bucket: &str, key: &str) -> Result<(), AppError> {
        self.delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AppError::S3(format!("avatar delete failed: {e}")))?;
        Ok(())
    }
}

/// Uploads a new avatar, then hands its public URL to `persist`.
///
/// If `persist` fails the uploaded object is deleted, so a failed profile
/// update never leaves an unreferenced avatar behind.
pub async fn replace_avatar<S, T, F, Fut>(
    store: &S,
    bucket: &str,
    public_base: &str,
    user_id: Uuid,
    content_type: &str,
    data: Bytes,
    persist: F,
) -> Result<T, AppError>
where
    S: AvatarStore + ?Sized,
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let ext = extension_for(content_type)?;
    check_size(data.len())?;

    let key = avatar_key(user_id, ext);
    store.put(bucket, &key, content_type, data).await?;
    info!("Uploaded avatar to s3://{}/{}", bucket, key);

    match persist(public_url(public_base, bucket, &key)).await {
        Ok(saved) => Ok(saved),
        Err(e) => {
            warn!("Profile update failed after upload; removing s3://{}/{}", bucket, key);
            if let Err(cleanup) = store.delete(bucket, &key).await {
                warn!("Orphaned avatar s3://{}/{}: {cleanup}", bucket, key);
            }
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct MemoryAvatarStore {
        objects: Mutex<Vec<String>>,
    }

    impl MemoryAvatarStore {
        fn keys(&self) -> Vec<String> {
            self.objects.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AvatarStore for MemoryAvatarStore {
        async fn put(&self, _: &str, key: &str, _: &str, _: Bytes) -> Result<(), AppError> {
            self.objects.lock().unwrap().push(key.to_string());
            Ok(())
        }

        async fn delete(&self, _: &str, key: &str) -> Result<(), AppError> {
            self.objects.lock().unwrap().retain(|k| k != key);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_replace_avatar_keeps_object_when_saved() {
        let store = MemoryAvatarStore::default();
        let user_id = Uuid::new_v4();
        let url = replace_avatar(
            &store,
            "yapforge",
            "http://localhost:9000",
            user_id,
            "image/png",
            Bytes::from_static(b"png"),
            |url| async move { Ok::<_, AppError>(url) },
        )
        .await
        .unwrap();

        let keys = store.keys();
        assert_eq!(keys.len(), 1);
        assert_eq!(url, format!("http://localhost:9000/yapforge/{}", keys[0]));
    }

    #[tokio::test]
    async fn test_replace_avatar_deletes_upload_when_save_fails() {
        let store = MemoryAvatarStore::default();
        let result: Result<(), AppError> = replace_avatar(
            &store,
            "yapforge",
            "http://localhost:9000",
            Uuid::new_v4(),
            "image/png",
            Bytes::from_static(b"png"),
            |_| async { Err(AppError::NotFound("user gone".to_string())) },
        )
        .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(store.keys().is_empty());
    }

    #[tokio::test]
    async fn test_replace_avatar_rejects_before_upload() {
        let store = MemoryAvatarStore::default();
        let result: Result<(), AppError> = replace_avatar(
            &store,
            "yapforge",
            "http://localhost:9000",
            Uuid::new_v4(),
            "application/pdf",
            Bytes::from_static(b"%PDF"),
            |_| async { Ok(()) },
        )
        .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_extension_for_known_types() {
        assert_eq!(extension_for("image/png").unwrap(), "png");
        assert_eq!(extension_for("IMAGE/JPEG").unwrap(), "jpg");
        assert_eq!(extension_for("image/webp; charset=binary").unwrap(), "webp");
        assert_eq!(extension_for("image/x-icon").unwrap(), "img");
    }

    #[test]
    fn test_extension_for_rejects_non_images() {
        assert!(matches!(
            extension_for("application/pdf"),
            Err(AppError::Validation(_))
        ));
        assert!(extension_for("").is_err());
    }

    #[test]
    fn test_check_size_bounds() {
        assert!(check_size(1).is_ok());
        assert!(check_size(MAX_AVATAR_BYTES).is_ok());
        assert!(check_size(MAX_AVATAR_BYTES + 1).is_err());
        assert!(check_size(0).is_err());
    }

    #[test]
    fn test_avatar_key_layout() {
        let user_id = Uuid::new_v4();
        let key = avatar_key(user_id, "png");
        let prefix = format!("avatars/{user_id}/");
        assert!(key.starts_with(&prefix));
        assert!(key.ends_with(".png"));
        let name = key.trim_start_matches(&prefix).trim_end_matches(".png");
        assert!(Uuid::parse_str(name).is_ok());
    }

    #[test]
    fn test_public_url_joins_without_double_slash() {
        assert_eq!(
            public_url("http://localhost:9000/", "yapforge", "avatars/a/b.png"),
            "http://localhost:9000/yapforge/avatars/a/b.png"
        );
    }
}
