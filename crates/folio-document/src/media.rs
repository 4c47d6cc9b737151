//! Media helpers: embeddable video URLs and attachment content types.

/// Rewrites known video page URLs to their embeddable form.
///
/// `https://www.youtube.com/watch?v=ID` and `https://youtu.be/ID` both become
/// `https://www.youtube.com/embed/ID`. Any other URL is returned unchanged.
pub fn embed_video_url(url: &str) -> String {
    let Some((host, path, query)) = split_url(url) else {
        return url.to_string();
    };

    let id = if host.ends_with("youtube.com") {
        query_param(query, "v")
    } else if host == "youtu.be" {
        path.trim_start_matches('/')
            .split('/')
            .next()
            .filter(|id| !id.is_empty())
    } else {
        None
    };

    match id {
        Some(id) => format!("https://www.youtube.com/embed/{id}"),
        None => url.to_string(),
    }
}

/// Splits an absolute URL into host, path and query.
fn split_url(url: &str) -> Option<(&str, &str, &str)> {
    let (_, rest) = url.split_once("://")?;
    let rest = rest.split('#').next().unwrap_or(rest);
    let (authority, path_and_query) = match rest.find(['/', '?']) {
        Some(i) => rest.split_at(i),
        None => (rest, ""),
    };
    let host = authority.rsplit('@').next().unwrap_or(authority);
    let host = host.split(':').next().unwrap_or(host);
    let (path, query) = path_and_query
        .split_once('?')
        .unwrap_or((path_and_query, ""));
    Some((host, path, query))
}

/// Returns the first non-empty value of a query parameter.
fn query_param<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, v)| *k == key && !v.is_empty())
        .map(|(_, v)| v)
}

/// Returns the MIME type for a file extension.
pub fn content_type(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "md" | "markdown" => "text/markdown",
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "csv" => "text/csv",
        "js" => "application/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "mp3" => "audio/mpeg",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn youtube_watch_url_is_embedded() {
        assert_eq!(
            embed_video_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10"),
            "https://www.youtube.com/embed/dQw4w9WgXcQ"
        );
        assert_eq!(
            embed_video_url("https://m.youtube.com/watch?feature=share&v=abc123"),
            "https://www.youtube.com/embed/abc123"
        );
    }

    #[test]
    fn short_link_is_embedded() {
        assert_eq!(
            embed_video_url("https://youtu.be/abc123?si=x"),
            "https://www.youtube.com/embed/abc123"
        );
    }

    #[test]
    fn youtube_without_video_id_is_unchanged() {
        let url = "https://www.youtube.com/channel/UC123";
        assert_eq!(embed_video_url(url), url);
    }

    #[test]
    fn other_hosts_are_unchanged() {
        let url = "https://vimeo.com/12345?v=1";
        assert_eq!(embed_video_url(url), url);
        assert_eq!(embed_video_url("not a url"), "not a url");
    }

    #[test]
    fn content_types() {
        assert_eq!(content_type("PDF"), "application/pdf");
        assert_eq!(content_type("jpeg"), "image/jpeg");
        assert_eq!(content_type(""), "application/octet-stream");
    }
}
