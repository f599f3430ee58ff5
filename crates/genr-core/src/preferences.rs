//! UI preferences stored with the user state.

pub const DEFAULT_PROFILE_PIC_URL: &str = "https://media.giphy.com/media/v1.Y2lkPTc5MGI3NjExdWw0bHg0NmFzYTV2b3JocGhpZnhzYmJ2Zms0dHI5bTJkbzBrd2RsciZlcD12MV9pbnRlcm5hbF9naWZfYnlfaWQmY3Q9Zw/3o7TKWpu2j5jG44WpG/giphy.gif";

pub const INVALID_IMAGE_URL_MESSAGE: &str =
    "URL gambar tidak valid. Pastikan menggunakan JPG, JPEG, PNG, atau GIF dan URL yang benar.";

const IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".gif"];

/// Accepts http(s) URLs with a host whose path ends in a known image
/// extension. Query and fragment are ignored.
pub fn is_valid_image_url(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    let Some(rest) = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
    else {
        return false;
    };

    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    let (host, path) = match rest.find('/') {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };
    if host.is_empty() || host.contains(char::is_whitespace) {
        return false;
    }
    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Outcome of a profile picture change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilePictureChange {
    Updated,
    Reset,
}
