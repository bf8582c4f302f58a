/// Derive a URL slug from a blog title.
///
/// Lowercases the title, collapses every maximal run of non-alphanumeric
/// characters into a single hyphen, then strips a leading/trailing hyphen.
/// Deterministic; colliding titles produce colliding slugs (uniqueness is
/// left to the storage layer's constraint on the slug column).
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.chars() {
        if ch.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
