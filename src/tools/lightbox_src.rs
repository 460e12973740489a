//! Point each `<img>` at its largest sibling variant via `data-lightbox-src`.
//!
//! Site images ship in several widths (`hall-480.jpg`, `hall-1200.jpg`). The
//! page shows a small one; the lightbox should open the biggest. This walks
//! the site's HTML and records the biggest variant on every image tag, or
//! strips those attributes again with `revert`.

use super::ToolError;
use regex::{Captures, Regex};
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Directory names never descended into.
pub const IGNORED_DIRS: &[&str] = &["node_modules", "dist", ".git", "0"];

/// Attribute written on annotated images.
pub const ATTRIBUTE: &str = "data-lightbox-src";

static IMG_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<img\b[^>]*>").unwrap());
static SRC_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)\ssrc\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});
static EXISTING_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)\sdata-lightbox-src\s*=\s*(?:"[^"]*"|'[^']*')"#).unwrap()
});
// prefix token: "-480", "_800w", "@1200" right before the extension
static SIZE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_@](\d{2,4})w?\.[A-Za-z]{2,4}$").unwrap());
static CANDIDATE_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2,4})w?\.[A-Za-z]{2,4}$").unwrap());
static TRAILING_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_][A-Za-z0-9]+$").unwrap());

/// What the tree walk should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotateOptions {
    /// Site root; also the base for `/`-prefixed sources.
    pub root: PathBuf,
    /// Report changes without writing.
    pub dry_run: bool,
    /// Remove attributes instead of adding them.
    pub revert: bool,
}

/// One modified (or would-be modified) HTML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// The HTML file.
    pub path: PathBuf,
    /// Attributes added or removed.
    pub edits: usize,
}

/// Outcome of a tree walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotateReport {
    /// HTML files visited.
    pub scanned: usize,
    /// Files with at least one edit.
    pub changed: Vec<FileChange>,
    /// Per-file failures; the walk continues past them.
    pub errors: Vec<String>,
}

fn is_ignored(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| IGNORED_DIRS.contains(&name))
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("html"))
}

/// Walk every HTML file under the root and annotate (or revert) it.
///
/// # Errors
///
/// Returns `ToolError::NotFound` when the root is not a directory and
/// `ToolError::Walk` when traversal fails. Unreadable or unwritable files are
/// collected in [`AnnotateReport::errors`].
pub fn annotate_tree(options: &AnnotateOptions) -> Result<AnnotateReport, ToolError> {
    if !options.root.is_dir() {
        return Err(ToolError::NotFound(options.root.clone()));
    }

    let mut report = AnnotateReport::default();
    let walker = WalkDir::new(&options.root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_ignored(e));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_html(entry.path()) {
            continue;
        }
        report.scanned += 1;
        match process_file(entry.path(), options) {
            Ok(0) => {}
            Ok(edits) => report.changed.push(FileChange {
                path: entry.path().to_path_buf(),
                edits,
            }),
            Err(e) => {
                warn!("Skipping {}: {}", entry.path().display(), e);
                report.errors.push(e.to_string());
            }
        }
    }

    info!(
        scanned = report.scanned,
        changed = report.changed.len(),
        errors = report.errors.len(),
        revert = options.revert,
        dry_run = options.dry_run,
        "Lightbox source pass complete"
    );
    Ok(report)
}

fn process_file(path: &Path, options: &AnnotateOptions) -> Result<usize, ToolError> {
    let io_err = |source| ToolError::Io {
        path: path.to_path_buf(),
        source,
    };
    let html = std::fs::read_to_string(path).map_err(io_err)?;
    let (updated, edits) = if options.revert {
        revert_html(&html)
    } else {
        let html_dir = path.parent().unwrap_or(Path::new("."));
        annotate_html(&html, html_dir, &options.root)
    };
    if edits > 0 && !options.dry_run {
        std::fs::write(path, updated).map_err(io_err)?;
    }
    Ok(edits)
}

/// Add `data-lightbox-src` to every image tag that lacks one and has a
/// larger variant on disk. Returns the new text and the number of tags changed.
pub fn annotate_html(html: &str, html_dir: &Path, root: &Path) -> (String, usize) {
    let mut edits = 0;
    let updated = IMG_TAG.replace_all(html, |caps: &Captures<'_>| {
        let tag = &caps[0];
        if EXISTING_ATTR.is_match(tag) {
            return tag.to_string();
        }
        let Some(src) = SRC_ATTR
            .captures(tag)
            .and_then(|c| c.get(1).or_else(|| c.get(2)))
            .map(|m| m.as_str())
        else {
            return tag.to_string();
        };
        let Some(image) = resolve_src(src, html_dir, root) else {
            debug!(src, "Image source not found on disk");
            return tag.to_string();
        };
        let Some(largest) = find_largest_variant(&image) else {
            return tag.to_string();
        };
        edits += 1;
        let href = relative_url(&largest, html_dir);
        insert_attribute(tag, &format!(" {ATTRIBUTE}=\"{href}\""))
    });
    (updated.into_owned(), edits)
}

/// Remove every `data-lightbox-src` attribute. Returns the new text and the
/// number removed.
pub fn revert_html(html: &str) -> (String, usize) {
    let edits = EXISTING_ATTR.find_iter(html).count();
    (EXISTING_ATTR.replace_all(html, "").into_owned(), edits)
}

fn insert_attribute(tag: &str, attribute: &str) -> String {
    let body = tag.strip_suffix('>').unwrap_or(tag);
    match body.trim_end().strip_suffix('/') {
        Some(open) => format!("{}{attribute} />", open.trim_end()),
        None => format!("{body}{attribute}>"),
    }
}

/// Locate an image on disk: `/x` is root-relative, anything else is relative
/// to the HTML file, falling back to the root.
pub fn resolve_src(src: &str, html_dir: &Path, root: &Path) -> Option<PathBuf> {
    let src = src.split(['?', '#']).next().unwrap_or(src);
    if src.is_empty() || src.contains("://") || src.starts_with("data:") {
        return None;
    }
    if let Some(rooted) = src.strip_prefix('/') {
        let path = root.join(rooted);
        return path.is_file().then_some(path);
    }
    let local = html_dir.join(src);
    if local.is_file() {
        return Some(local);
    }
    let rooted = root.join(src);
    rooted.is_file().then_some(rooted)
}

/// Name prefix shared by all size variants of an image file.
pub fn variant_prefix(file_name: &str) -> String {
    if let Some(token) = SIZE_TOKEN.find(file_name) {
        return file_name[..token.start()].to_string();
    }
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    TRAILING_WORD.replace(stem, "").into_owned()
}

/// Largest sibling variant of an image: biggest size token (0 when absent),
/// then biggest file.
pub fn find_largest_variant(image: &Path) -> Option<PathBuf> {
    let dir = image.parent()?;
    let prefix = variant_prefix(image.file_name()?.to_str()?);

    std::fs::read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            if !name.starts_with(&prefix) {
                return None;
            }
            // untokenized siblings compete on bytes alone
            let size: u32 = CANDIDATE_SIZE
                .captures(&name)
                .and_then(|c| c[1].parse().ok())
                .unwrap_or(0);
            let metadata = entry.metadata().ok()?;
            metadata
                .is_file()
                .then(|| ((size, metadata.len()), entry.path()))
        })
        .max_by_key(|(key, _)| *key)
        .map(|(_, path)| path)
}

fn normalize(path: &Path) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.last().is_some_and(|p| p != "..") {
                    parts.pop();
                } else {
                    parts.push("..".to_string());
                }
            }
            other => parts.push(other.as_os_str().to_string_lossy().into_owned()),
        }
    }
    parts
}

/// `/`-separated path from `base_dir` to `target`, both under the same root.
pub fn relative_url(target: &Path, base_dir: &Path) -> String {
    let target = normalize(target);
    let base = normalize(base_dir);
    let common = target
        .iter()
        .zip(&base)
        .take_while(|(a, b)| a == b)
        .count();
    let ups = std::iter::repeat_n("..", base.len() - common);
    ups.chain(target[common..].iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path, bytes: usize) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, vec![0u8; bytes]).unwrap();
    }

    fn site() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        let img = root.path().join("img");
        touch(&img.join("hall-480.jpg"), 10);
        touch(&img.join("hall-1200.jpg"), 40);
        touch(&img.join("hall-800w.jpg"), 20);
        touch(&img.join("logo.png"), 5);
        root
    }

    #[test]
    fn prefix_strips_size_token_or_trailing_word() {
        assert_eq!(variant_prefix("hall-480.jpg"), "hall");
        assert_eq!(variant_prefix("hall_800w.webp"), "hall");
        assert_eq!(variant_prefix("hall@1200.png"), "hall");
        assert_eq!(variant_prefix("hall-small.jpg"), "hall");
    }

    #[test]
    fn largest_variant_prefers_size_token() {
        let root = site();
        let largest = find_largest_variant(&root.path().join("img/hall-480.jpg")).unwrap();
        assert_eq!(largest.file_name().unwrap(), "hall-1200.jpg");
    }

    #[test]
    fn equal_tokens_fall_back_to_bytes() {
        let root = tempfile::tempdir().unwrap();
        touch(&root.path().join("a-800.jpg"), 10);
        touch(&root.path().join("a_800.png"), 90);
        let largest = find_largest_variant(&root.path().join("a-800.jpg")).unwrap();
        assert_eq!(largest.file_name().unwrap(), "a_800.png");
    }

    #[test]
    fn image_without_variants_is_its_own_largest() {
        let root = site();
        let logo = root.path().join("img/logo.png");
        assert_eq!(find_largest_variant(&logo), Some(logo));
    }

    #[test]
    fn word_suffixed_variants_compare_by_bytes() {
        let root = tempfile::tempdir().unwrap();
        touch(&root.path().join("hall-small.jpg"), 10);
        touch(&root.path().join("hall-large.jpg"), 5000);
        let largest = find_largest_variant(&root.path().join("hall-small.jpg")).unwrap();
        assert_eq!(largest.file_name().unwrap(), "hall-large.jpg");
    }

    #[test]
    fn token_beats_untokenized_sibling_bytes() {
        let root = tempfile::tempdir().unwrap();
        touch(&root.path().join("hall-small.jpg"), 9000);
        touch(&root.path().join("hall-640.jpg"), 10);
        let largest = find_largest_variant(&root.path().join("hall-small.jpg")).unwrap();
        assert_eq!(largest.file_name().unwrap(), "hall-640.jpg");
    }

    #[test]
    fn relative_url_walks_up_from_nested_pages() {
        assert_eq!(
            relative_url(Path::new("site/img/a.jpg"), Path::new("site/about")),
            "../img/a.jpg"
        );
        assert_eq!(
            relative_url(Path::new("site/img/a.jpg"), Path::new("site")),
            "img/a.jpg"
        );
    }

    #[test]
    fn annotates_relative_and_rooted_sources() {
        let root = site();
        let html = r#"<img src="img/hall-480.jpg" alt="Hall"><img src='/img/hall-800w.jpg'/>"#;
        let (out, edits) = annotate_html(html, root.path(), root.path());
        assert_eq!(edits, 2);
        assert_eq!(
            out,
            r#"<img src="img/hall-480.jpg" alt="Hall" data-lightbox-src="img/hall-1200.jpg"><img src='/img/hall-800w.jpg' data-lightbox-src="img/hall-1200.jpg" />"#
        );
    }

    #[test]
    fn nested_page_falls_back_to_root_relative() {
        let root = site();
        let page_dir = root.path().join("news");
        let (out, edits) = annotate_html(r#"<img src="img/hall-480.jpg">"#, &page_dir, root.path());
        assert_eq!(edits, 1);
        assert!(out.contains(r#"data-lightbox-src="../img/hall-1200.jpg""#));
    }

    #[test]
    fn already_annotated_and_missing_images_are_skipped() {
        let root = site();
        let html = r#"<img src="img/hall-480.jpg" data-lightbox-src="x.jpg"><img src="img/gone-480.jpg"><img src="https://cdn/x-480.jpg">"#;
        let (out, edits) = annotate_html(html, root.path(), root.path());
        assert_eq!(edits, 0);
        assert_eq!(out, html);
    }

    #[test]
    fn revert_removes_every_attribute() {
        let html = r#"<img src="a.jpg" data-lightbox-src="b.jpg"><img data-lightbox-src='c.jpg' src="d.jpg">"#;
        let (out, edits) = revert_html(html);
        assert_eq!(edits, 2);
        assert_eq!(out, r#"<img src="a.jpg"><img src="d.jpg">"#);
    }

    #[test]
    fn tree_walk_skips_ignored_directories_and_honours_dry_run() {
        let root = site();
        let page = root.path().join("index.html");
        let built = root.path().join("dist").join("index.html");
        let body = r#"<img src="img/hall-480.jpg">"#;
        fs::write(&page, body).unwrap();
        touch(&built, 0);
        fs::write(&built, body).unwrap();

        let mut options = AnnotateOptions {
            root: root.path().to_path_buf(),
            dry_run: true,
            revert: false,
        };
        let report = annotate_tree(&options).unwrap();
        assert_eq!(report.scanned, 1);
        assert_eq!(report.changed.len(), 1);
        assert_eq!(fs::read_to_string(&page).unwrap(), body);

        options.dry_run = false;
        annotate_tree(&options).unwrap();
        assert!(fs::read_to_string(&page).unwrap().contains(ATTRIBUTE));
        assert_eq!(fs::read_to_string(&built).unwrap(), body);

        options.revert = true;
        let report = annotate_tree(&options).unwrap();
        assert_eq!(report.changed[0].edits, 1);
        assert_eq!(fs::read_to_string(&page).unwrap(), body);
    }

    #[test]
    fn revert_reaches_the_zero_tree_only_as_root() {
        let root = tempfile::tempdir().unwrap();
        let archived = root.path().join("0").join("index.html");
        let body = r#"<img src="a.jpg" data-lightbox-src="b.jpg">"#;
        touch(&archived, 0);
        fs::write(&archived, body).unwrap();

        let mut options = AnnotateOptions {
            root: root.path().to_path_buf(),
            dry_run: false,
            revert: true,
        };
        let report = annotate_tree(&options).unwrap();
        assert_eq!(report.scanned, 0);
        assert_eq!(fs::read_to_string(&archived).unwrap(), body);

        options.root = root.path().join("0");
        let report = annotate_tree(&options).unwrap();
        assert_eq!(report.changed.len(), 1);
        assert_eq!(
            fs::read_to_string(&archived).unwrap(),
            r#"<img src="a.jpg">"#
        );
    }

    #[test]
    fn missing_root_is_an_error() {
        let options = AnnotateOptions {
            root: PathBuf::from("/nonexistent/site"),
            dry_run: true,
            revert: false,
        };
        assert!(matches!(annotate_tree(&options), Err(ToolError::NotFound(_))));
    }
}
