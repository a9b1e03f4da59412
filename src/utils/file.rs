// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

//! File-type classification by extension, optionally confirmed by MIME type.
//!
//! Extensions are compared case-insensitively and without a leading dot.
//! `webp` appears in both the image and video tables; [`classify_path`]
//! resolves it as an image.

use std::path::Path;

pub const IMAGE_FORMATS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp", "svg", "heic", "heif",
];

pub const VIDEO_FORMATS: &[&str] = &[
    "mp4", "mkv", "mov", "avi", "wmv", "flv", "webp", "webm", "m4v",
];

pub const AUDIO_FORMATS: &[&str] = &["mp3", "wav", "ogg", "m4a", "wma", "flac", "aac"];

pub const DOCUMENT_FORMATS: &[&str] = &["doc", "docx", "xls", "xlsx", "ppt", "pptx", "pdf"];

const ZIP_MIME_TYPES: &[&str] = &[
    "application/zip",
    "application/x-zip-compressed",
    "multipart/x-zip",
];

/// Coarse file family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Video,
    Audio,
    Document,
    Zip,
    Other,
}

pub fn is_image_format(extension: &str, mime: Option<&str>) -> bool {
    matches_family(IMAGE_FORMATS, "image/", extension, mime)
}

pub fn is_video_format(extension: &str, mime: Option<&str>) -> bool {
    matches_family(VIDEO_FORMATS, "video/", extension, mime)
}

pub fn is_audio_format(extension: &str, mime: Option<&str>) -> bool {
    matches_family(AUDIO_FORMATS, "audio/", extension, mime)
}

pub fn is_document_format(extension: &str, mime: Option<&str>) -> bool {
    matches_family(DOCUMENT_FORMATS, "application/", extension, mime)
}

/// True for the MIME types browsers and OSes report for zip archives.
pub fn is_zip(mime: &str) -> bool {
    let mime = normalize_mime(mime);
    ZIP_MIME_TYPES.contains(&mime.as_str())
}

/// Text after the last `.` of `filename`.
///
/// Empty when there is no dot, when the only dot is leading (`.bashrc`), or
/// when the name ends with a dot.
pub fn file_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(0) | None => "",
        Some(idx) => &filename[idx + 1..],
    }
}

/// Classify a path by its extension and the MIME type guessed from it.
pub fn classify_path(path: &Path) -> FileKind {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let ext = file_extension(name);
    let guessed = mime_guess::from_path(path).first_raw();
    classify(ext, guessed)
}

/// Classify an extension with an optional MIME type.
pub fn classify(extension: &str, mime: Option<&str>) -> FileKind {
    if let Some(m) = mime
        && is_zip(m)
    {
        return FileKind::Zip;
    }
    if is_image_format(extension, mime) {
        FileKind::Image
    } else if is_video_format(extension, mime) {
        FileKind::Video
    } else if is_audio_format(extension, mime) {
        FileKind::Audio
    } else if is_document_format(extension, mime) {
        FileKind::Document
    } else if extension.eq_ignore_ascii_case("zip") && mime.is_none() {
        FileKind::Zip
    } else {
        FileKind::Other
    }
}

fn matches_family(table: &[&str], prefix: &str, extension: &str, mime: Option<&str>) -> bool {
    let ext = extension.trim_start_matches('.').to_ascii_lowercase();
    if !table.contains(&ext.as_str()) {
        return false;
    }
    match mime {
        Some(m) => normalize_mime(m).starts_with(prefix),
        None => true,
    }
}

fn normalize_mime(mime: &str) -> String {
    mime.split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn extension_only_checks() {
        assert!(is_image_format("png", None));
        assert!(is_image_format("JPG", None));
        assert!(is_video_format("mkv", None));
        assert!(is_audio_format("flac", None));
        assert!(is_document_format("pdf", None));
        assert!(!is_document_format("txt", None));
    }

    #[test]
    fn mime_must_match_family_when_given() {
        assert!(is_image_format("png", Some("image/png")));
        assert!(!is_image_format("png", Some("application/octet-stream")));
        assert!(is_video_format("webp", Some("video/webm")));
        assert!(!is_video_format("webp", Some("image/webp")));
        assert!(is_document_format(
            "docx",
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        ));
        assert!(is_audio_format("mp3", Some("audio/mpeg; charset=binary")));
    }

    #[test]
    fn zip_mime_types() {
        assert!(is_zip("application/zip"));
        assert!(is_zip("application/x-zip-compressed"));
        assert!(is_zip("multipart/x-zip"));
        assert!(!is_zip("application/gzip"));
    }

    #[test]
    fn file_extension_edge_cases() {
        assert_eq!(file_extension("photo.png"), "png");
        assert_eq!(file_extension("archive.tar.gz"), "gz");
        assert_eq!(file_extension("README"), "");
        assert_eq!(file_extension(".bashrc"), "");
        assert_eq!(file_extension("trailing."), "");
        assert_eq!(file_extension(""), "");
    }

    #[test]
    fn classify_path_uses_guessed_mime() {
        assert_eq!(classify_path(&PathBuf::from("a/b/photo.JPEG")), FileKind::Image);
        assert_eq!(classify_path(&PathBuf::from("clip.mp4")), FileKind::Video);
        assert_eq!(classify_path(&PathBuf::from("song.mp3")), FileKind::Audio);
        assert_eq!(classify_path(&PathBuf::from("report.pdf")), FileKind::Document);
        assert_eq!(classify_path(&PathBuf::from("bundle.zip")), FileKind::Zip);
        assert_eq!(classify_path(&PathBuf::from("notes.txt")), FileKind::Other);
        assert_eq!(classify_path(&PathBuf::from("no_extension")), FileKind::Other);
    }

    #[test]
    fn webp_resolves_as_image() {
        assert_eq!(classify("webp", None), FileKind::Image);
    }
}
