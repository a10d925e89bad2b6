use crate::assemble::{DATE_PREFIX, HEADER_CLOSE, HEADER_OPEN};
use sha2::{Digest, Sha256};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

/// Removes the build timestamp from a leading manifest block. Only `@date`
/// lines between the opening and closing markers go; the rest of the source,
/// including any `@date` text in file bodies, is untouched. Sources without a
/// complete manifest block are returned as-is.
pub fn strip_script_header(source: &str) -> Cow<'_, str> {
    let Some(end) = manifest_end(source) else {
        return Cow::Borrowed(source);
    };
    let (manifest, body) = source.split_at(end);
    let mut stripped: String = manifest
        .split_inclusive('\n')
        .filter(|line| !line.starts_with(DATE_PREFIX))
        .collect();
    stripped.push_str(body);
    Cow::Owned(stripped)
}

/// Byte offset just past the manifest's closing marker line.
fn manifest_end(source: &str) -> Option<usize> {
    let mut lines = source.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != HEADER_OPEN {
        return None;
    }

    let mut offset = first.len();
    for line in lines {
        offset += line.len();
        if line.trim_end() == HEADER_CLOSE {
            return Some(offset);
        }
    }
    None
}

pub fn content_digest(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Whether writing `new_content` to `target` would change anything beyond the
/// build timestamp. A target that does not exist, or cannot be read, counts as
/// changed.
pub fn has_changed(target: &Path, new_content: &str) -> bool {
    if !target.exists() {
        log::debug!("'{}' does not exist yet.", target.display());
        return true;
    }

    let existing = match fs::read(target) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!(
                "Unable to read existing '{}' for comparison: {}",
                target.display(),
                e
            );
            return true;
        }
    };

    let old = content_digest(&strip_script_header(&String::from_utf8_lossy(&existing)));
    let new = content_digest(&strip_script_header(new_content));
    log::trace!("Digest of '{}': old {} new {}", target.display(), old, new);
    old != new
}
