//! Path helpers shared by registration and request classification.

/// Ensure the path ends with a slash.
pub fn end_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

/// Drop every leading slash.
pub fn trim_leading_slash(path: &str) -> &str {
    path.trim_start_matches('/')
}

/// Normalize an application mount path to `/name/` form (`/` for the root).
pub fn normalize_mount(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}

/// Normalize a registration prefix: no leading slash, trailing slash unless
/// it is the root prefix `""`.
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = trim_leading_slash(prefix);
    if trimmed.is_empty() {
        String::new()
    } else {
        end_slash(trimmed)
    }
}

/// Join a backing location and a relative path with exactly one separator.
pub fn join(location: &str, relative: &str) -> String {
    let relative = trim_leading_slash(relative);
    if location.is_empty() {
        relative.to_string()
    } else if location.ends_with('/') {
        format!("{location}{relative}")
    } else {
        format!("{location}/{relative}")
    }
}

/// True when any segment of the path walks upwards.
pub fn has_parent_segment(path: &str) -> bool {
    path.split(['/', '\\']).any(|segment| segment == "..")
}

/// Strip the mount path from a request path.
///
/// `/app/users/42` under `/app/` gives `users/42`; the mount itself (with or
/// without its trailing slash) gives an empty string.
pub fn strip_mount<'a>(path: &'a str, mount: &str) -> &'a str {
    if let Some(rest) = path.strip_prefix(mount) {
        return rest;
    }
    if path == mount.trim_end_matches('/') {
        return "";
    }
    trim_leading_slash(path)
}
