use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::warn;

fn img_src_regex() -> &'static Regex {
    static IMG_SRC: OnceLock<Regex> = OnceLock::new();
    IMG_SRC.get_or_init(|| Regex::new(r#"<img[^>]+src=["']([^"']+)["']"#).unwrap())
}

/// Image URLs present in `old` but absent from `new`; these are the files a
/// product/blog update leaves behind and must be removed from storage.
pub fn orphaned_images(old: &[String], new: &[String]) -> Vec<String> {
    let kept: HashSet<&str> = new.iter().map(String::as_str).collect();
    old.iter()
        .filter(|url| !kept.contains(url.as_str()))
        .cloned()
        .collect()
}

/// Pull every `<img src="...">` URL out of a blog's rich HTML content.
pub fn extract_content_images(content: &str) -> Vec<String> {
    img_src_regex()
        .captures_iter(content)
        .map(|cap| cap[1].to_string())
        .collect()
}

/// All image URLs a blog references: its cover image plus everything
/// embedded in the content body.
pub fn blog_image_set(cover_image: &str, content: &str) -> Vec<String> {
    let mut urls = vec![cover_image.to_string()];
    urls.extend(extract_content_images(content));
    urls
}

/// Map a stored image URL (e.g. `/uploads/abc.jpg`) to its path under the
/// upload directory. URLs pointing outside the upload dir are ignored.
fn upload_path(upload_dir: &str, url: &str) -> Option<PathBuf> {
    let file_name = Path::new(url.strip_prefix('/').unwrap_or(url)).file_name()?;
    Some(Path::new(upload_dir).join(file_name))
}

/// Best-effort removal of stored image files. A missing or undeletable file
/// is logged and skipped; image cleanup never fails the surrounding write.
pub fn remove_image_files(upload_dir: &str, urls: &[String]) {
    for url in urls {
        let Some(path) = upload_path(upload_dir, url) else {
            continue;
        };
        if let Err(e) = std::fs::remove_file(&path) {
            warn!("Failed to remove image file {}: {}", path.display(), e);
        }
    }
}
