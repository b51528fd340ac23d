//! Content-type resolution.
//!
//! # Responsibilities
//! - Map file extensions to MIME types (fallback when the origin declares none)
//! - Classify MIME types as text-like
//!
//! # Design Decisions
//! - Extension lookup is case-insensitive
//! - Unknown or missing extensions fall back to application/octet-stream
//! - Text-likeness drives both the `; charset=utf-8` suffix and compression
//!   eligibility

/// Fallback MIME type for unknown extensions.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Resolve a MIME type from the file extension of `path`.
pub fn from_extension(path: &str) -> &'static str {
    let ext = match path.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && !ext.contains('/') => ext.to_ascii_lowercase(),
        _ => return OCTET_STREAM,
    };

    match ext.as_str() {
        // JavaScript & TypeScript
        "js" | "mjs" | "cjs" => "application/javascript",
        "ts" | "tsx" => "application/typescript",
        "jsx" => "text/jsx",

        // Styles
        "css" => "text/css",
        "scss" => "text/x-scss",
        "sass" => "text/x-sass",
        "less" => "text/x-less",

        // Markup
        "html" | "htm" => "text/html",
        "xml" => "application/xml",
        "svg" => "image/svg+xml",

        // Data
        "json" => "application/json",
        "yaml" | "yml" => "text/yaml",
        "toml" => "text/toml",
        "csv" => "text/csv",

        // Documents
        "md" => "text/markdown",
        "txt" => "text/plain",
        "pdf" => "application/pdf",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "bmp" => "image/bmp",
        "tiff" | "tif" => "image/tiff",

        // Fonts
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "eot" => "application/vnd.ms-fontobject",

        // Video
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "ogg" => "video/ogg",

        // Audio
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "m4a" => "audio/mp4",

        // Archives
        "zip" => "application/zip",
        "tar" => "application/x-tar",
        "gz" => "application/gzip",
        "7z" => "application/x-7z-compressed",

        // Binary
        "wasm" => "application/wasm",
        "exe" | "dll" => OCTET_STREAM,

        _ => OCTET_STREAM,
    }
}

/// Whether a MIME type carries text that wants a charset.
pub fn is_text(mime: &str) -> bool {
    mime.starts_with("text/")
        || matches!(
            mime,
            "application/javascript"
                | "application/typescript"
                | "application/json"
                | "application/xml"
        )
}
