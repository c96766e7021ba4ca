//! File and directory names derived from URLs.

use sha1::{Digest, Sha1};
use url::Url;

const HASH_LEN: usize = 10;

/// Host used when a URL has no network location.
pub const UNKNOWN_HOST: &str = "unknown";

/// Filesystem-safe base name for `url`.
///
/// The last path segment, as written in `url`, is used when it carries an
/// extension, with every character outside `[A-Za-z0-9-_.]` replaced by `_`.
/// Otherwise the name is the first 10 hex chars of the SHA-1 of the URL, plus
/// `.js` when the URL ends in `.js` or `.mjs`.
pub fn filename_from_url(url: &str) -> String {
    match last_segment(url) {
        Some(name) if name.contains('.') => sanitize(name),
        _ => hashed_name(url),
    }
}

/// Lowercased extension of the last path segment, dot included.
pub fn extension_of(url: &str) -> Option<String> {
    let name = last_segment(url)?;
    let idx = name.rfind('.')?;
    Some(name[idx..].to_ascii_lowercase())
}

/// Network location of `url`: host plus an explicit non-default port.
///
/// Unlike the raw netloc this is lowercased and drops userinfo and default
/// ports, so `https://A.test:443/x` maps to `a.test`.
pub fn host_from_url(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return UNKNOWN_HOST.to_string();
    };
    match (parsed.host_str(), parsed.port()) {
        (Some(host), Some(port)) if !host.is_empty() => format!("{host}:{port}"),
        (Some(host), None) if !host.is_empty() => host.to_string(),
        _ => UNKNOWN_HOST.to_string(),
    }
}

/// Last non-empty `/` segment of the raw path, without percent-encoding
/// applied. `None` for an empty path and for `.` or `..`.
fn last_segment(url: &str) -> Option<&str> {
    let name = raw_path(url).trim_end_matches('/').rsplit('/').next()?;
    match name {
        "" | "." | ".." => None,
        name => Some(name),
    }
}

/// Path component of `url` exactly as written: scheme and authority
/// stripped, cut at the first `?` or `#`.
fn raw_path(url: &str) -> &str {
    let mut rest = url;
    if let Some((scheme, after)) = rest.split_once(':') {
        if is_scheme(scheme) {
            rest = after;
        }
    }
    if let Some(after) = rest.strip_prefix("//") {
        let end = after.find(['/', '?', '#']).unwrap_or(after.len());
        rest = &after[end..];
    }
    let end = rest.find(['?', '#']).unwrap_or(rest.len());
    &rest[..end]
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn hashed_name(url: &str) -> String {
    let digest = Sha1::digest(url.as_bytes());
    let mut name = hex::encode(digest);
    name.truncate(HASH_LEN);
    if url.ends_with(".js") || url.ends_with(".mjs") {
        name.push_str(".js");
    }
    name
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_hex(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_hexdigit())
    }

    #[test]
    fn keeps_segment_with_extension() {
        assert_eq!(filename_from_url("https://a.test/static/app.js"), "app.js");
        assert_eq!(
            filename_from_url("https://a.test/lib/jquery-3.7.min.js?v=2"),
            "jquery-3.7.min.js"
        );
    }

    #[test]
    fn strips_trailing_slash() {
        assert_eq!(filename_from_url("https://a.test/dist/bundle.v1/"), "bundle.v1");
    }

    #[test]
    fn replaces_disallowed_characters() {
        assert_eq!(
            filename_from_url("https://a.test/a%20b+c@d.js"),
            "a_20b_c_d.js"
        );
        assert_eq!(filename_from_url("assets/we!rd~name.css"), "we_rd_name.css");
    }

    #[test]
    fn uses_segment_as_written() {
        assert_eq!(filename_from_url("https://a.test/a b.js"), "a_b.js");
        assert_eq!(filename_from_url("https://a.test/{x}.js"), "_x_.js");
        assert_eq!(filename_from_url("https://a.test/a\"b.js"), "a_b.js");
        assert_eq!(filename_from_url("https://a.test/caf\u{e9}.js"), "caf_.js");
    }

    #[test]
    fn query_and_fragment_are_not_part_of_the_segment() {
        assert_eq!(filename_from_url("https://a.test/x/app.js#frag/y"), "app.js");
        assert_eq!(filename_from_url("https://a.test/x/app.js?next=/b/c.css"), "app.js");
        assert_eq!(filename_from_url("https://a.test?x=/y.js").len(), 13);
    }

    #[test]
    fn dot_segments_are_hashed() {
        assert_eq!(filename_from_url("https://a.test/x/..").len(), 10);
        assert_eq!(filename_from_url("https://a.test/.").len(), 10);
    }

    #[test]
    fn authority_is_never_a_segment() {
        // Host contains a dot but there is no path.
        assert_eq!(filename_from_url("https://cdn.a.test").len(), 10);
        assert_eq!(filename_from_url("https://cdn.a.test/").len(), 10);
    }

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(extension_of("https://a.test/App.JS?v=1").as_deref(), Some(".js"));
        assert_eq!(extension_of("https://a.test/bad"), None);
        assert_eq!(extension_of("https://a.test/"), None);
    }

    #[test]
    fn hashes_when_no_extension() {
        let name = filename_from_url("https://b.test/bad");
        assert_eq!(name.len(), 10);
        assert!(is_hex(&name));
        // sha1("https://b.test/bad") is stable across calls.
        assert_eq!(name, filename_from_url("https://b.test/bad"));
    }

    #[test]
    fn hashes_known_value() {
        // sha1("abc") = a9993e364706816aba3e25717850c26c9cd0d89d
        assert_eq!(filename_from_url("abc"), "a9993e3647");
    }

    #[test]
    fn hashes_root_and_empty_paths() {
        let root = filename_from_url("https://a.test/");
        assert_eq!(root.len(), 10);
        assert!(is_hex(&root));
        assert_ne!(root, filename_from_url("https://c.test/"));
        assert_eq!(filename_from_url("").len(), 10);
    }

    #[test]
    fn js_suffix_only_when_url_ends_in_js() {
        let js = filename_from_url("https://a.test/loader?file=main.js");
        assert!(js.ends_with(".js"));
        assert_eq!(js.len(), 13);
        assert!(is_hex(&js[..10]));

        let mjs = filename_from_url("https://a.test/mod?x=y.mjs");
        assert!(mjs.ends_with(".js"));
        assert!(!mjs.ends_with(".mjs"));

        let plain = filename_from_url("https://a.test/loader?file=main.css");
        assert_eq!(plain.len(), 10);
    }

    #[test]
    fn host_includes_explicit_port() {
        assert_eq!(host_from_url("https://a.test/app.js"), "a.test");
        assert_eq!(host_from_url("http://127.0.0.1:8080/x.js"), "127.0.0.1:8080");
        assert_eq!(host_from_url("https://a.test:443/x.js"), "a.test");
    }

    #[test]
    fn host_falls_back_to_unknown() {
        assert_eq!(host_from_url("not a url"), UNKNOWN_HOST);
        assert_eq!(host_from_url("file:///tmp/x.js"), UNKNOWN_HOST);
    }
}
