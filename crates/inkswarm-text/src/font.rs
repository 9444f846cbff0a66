//! Font discovery and loading
//!
//! Families are looked up by file name in the platform font directories, the
//! way a browser resolves a CSS `font-family` list: first family with a
//! matching face wins, otherwise a common default face is used.

use inkswarm_core::FontWeight;
use rusttype::Font;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Tried in order when none of the requested families is installed
const DEFAULT_FAMILIES: &[&str] = &[
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Arial",
    "Helvetica",
    "Segoe UI",
    "Verdana",
    "FreeSans",
];

const SERIF_FAMILIES: &[&str] = &["DejaVu Serif", "Liberation Serif", "Noto Serif", "Times New Roman", "Times"];
const MONO_FAMILIES: &[&str] = &["DejaVu Sans Mono", "Liberation Mono", "Noto Sans Mono", "Consolas", "Menlo", "Courier New"];

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc"];
const MAX_SCAN_DEPTH: usize = 5;

/// Style words that disqualify a face from counting as "regular"
const STYLE_WORDS: &[&str] = &[
    "bold", "italic", "oblique", "light", "thin", "medium", "black", "heavy", "semibold",
    "extrabold", "condensed", "narrow",
];

/// A loaded face and the file it came from
#[derive(Clone)]
pub struct ResolvedFont {
    pub path: PathBuf,
    pub font: Arc<Font<'static>>,
}

struct FontFile {
    path: PathBuf,
    /// Lowercased file stem with separators removed, e.g. `latobold`
    key: String,
}

/// Index of installed font files plus a cache of loaded faces
pub struct FontBook {
    dirs: Vec<PathBuf>,
    index: Option<Vec<FontFile>>,
    loaded: HashMap<PathBuf, Arc<Font<'static>>>,
}

impl FontBook {
    /// A font book over the platform's standard font directories
    pub fn new() -> Self {
        Self::with_dirs(system_font_dirs())
    }

    /// A font book over explicit directories only
    pub fn with_dirs(dirs: Vec<PathBuf>) -> Self {
        Self {
            dirs,
            index: None,
            loaded: HashMap::new(),
        }
    }

    /// Add a directory searched before the existing ones
    pub fn add_dir(&mut self, dir: PathBuf) {
        self.dirs.insert(0, dir);
        self.index = None;
    }

    /// Number of font files found (scans on first call)
    pub fn file_count(&mut self) -> usize {
        self.index().len()
    }

    /// Resolve a CSS-style family list to a loaded face.
    ///
    /// Returns `None` only if no usable font file exists at all.
    pub fn resolve(&mut self, family_list: &str, weight: FontWeight) -> Option<ResolvedFont> {
        let requested = parse_family_list(family_list);
        let mut candidates: Vec<&str> = Vec::new();
        for family in &requested {
            match family.to_ascii_lowercase().as_str() {
                "serif" => candidates.extend_from_slice(SERIF_FAMILIES),
                "monospace" => candidates.extend_from_slice(MONO_FAMILIES),
                "sans-serif" | "system-ui" | "ui-sans-serif" => {
                    candidates.extend_from_slice(DEFAULT_FAMILIES)
                }
                _ => candidates.push(family),
            }
        }
        candidates.extend_from_slice(DEFAULT_FAMILIES);

        for family in &candidates {
            let Some(path) = self.find_face(family, weight) else {
                continue;
            };
            if let Some(font) = self.load(&path) {
                log::debug!(
                    "Resolved font '{}' ({}) to {}",
                    family_list,
                    weight.as_str(),
                    path.display()
                );
                return Some(ResolvedFont { path, font });
            }
        }

        // Last resort: any loadable file, in a stable order
        let paths: Vec<PathBuf> = self.index().iter().map(|f| f.path.clone()).collect();
        paths.into_iter().find_map(|path| {
            let font = self.load(&path)?;
            log::warn!(
                "No default font family installed, using {}",
                path.display()
            );
            Some(ResolvedFont { path, font })
        })
    }

    fn find_face(&mut self, family: &str, weight: FontWeight) -> Option<PathBuf> {
        let family_key = normalize(family);
        if family_key.is_empty() {
            return None;
        }
        self.index()
            .iter()
            .filter_map(|file| {
                let suffix = file.key.strip_prefix(&family_key)?;
                face_score(suffix, weight).map(|score| (score, file))
            })
            .max_by(|(a, fa), (b, fb)| {
                a.cmp(b)
                    .then_with(|| fb.key.len().cmp(&fa.key.len()))
                    .then_with(|| fb.path.cmp(&fa.path))
            })
            .map(|(_, file)| file.path.clone())
    }

    fn load(&mut self, path: &Path) -> Option<Arc<Font<'static>>> {
        if let Some(font) = self.loaded.get(path) {
            return Some(Arc::clone(font));
        }
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Failed to read font {}: {}", path.display(), e);
                return None;
            }
        };
        let Some(font) = Font::try_from_vec_and_index(bytes, 0) else {
            log::warn!("Unsupported font file {}", path.display());
            return None;
        };
        log::info!("Loaded font {}", path.display());
        let font = Arc::new(font);
        self.loaded.insert(path.to_path_buf(), Arc::clone(&font));
        Some(font)
    }

    fn index(&mut self) -> &[FontFile] {
        if self.index.is_none() {
            let mut files = Vec::new();
            for dir in &self.dirs {
                scan_dir(dir, 0, &mut files);
            }
            log::debug!("Indexed {} font files in {} directories", files.len(), self.dirs.len());
            self.index = Some(files);
        }
        self.index.as_deref().unwrap_or_default()
    }
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a CSS `font-family` value into unquoted family names
pub fn parse_family_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|f| f.trim().trim_matches(|c| c == '"' || c == '\'').trim())
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Score how well a file-name suffix (after the family name) fits the weight.
/// `None` means the face is unsuitable.
fn face_score(suffix: &str, weight: FontWeight) -> Option<u8> {
    if suffix.contains("italic") || suffix.contains("oblique") {
        return None;
    }
    match weight {
        FontWeight::Bold => match suffix {
            "bold" | "bd" => Some(4),
            s if s.contains("bold") && !s.contains("semi") && !s.contains("extra") => Some(3),
            s if s.contains("bold") => Some(2),
            "" | "regular" => Some(1),
            _ => None,
        },
        FontWeight::Normal => match suffix {
            "" | "regular" | "book" | "roman" | "normal" => Some(4),
            s if !STYLE_WORDS.iter().any(|w| s.contains(w)) => Some(2),
            _ => None,
        },
    }
}

fn scan_dir(dir: &Path, depth: usize, out: &mut Vec<FontFile>) {
    if depth > MAX_SCAN_DEPTH {
        return;
    }
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok().map(|e| e.path())).collect();
    paths.sort();

    for path in paths {
        if path.is_dir() {
            scan_dir(&path, depth + 1, out);
            continue;
        }
        let is_font = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| FONT_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
        if !is_font {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            out.push(FontFile {
                key: normalize(stem),
                path,
            });
        }
    }
}

/// Standard font directories for the current platform
pub fn system_font_dirs() -> Vec<PathBuf> {
    let mut dirs_found = Vec::new();
    if let Some(dir) = dirs::font_dir() {
        dirs_found.push(dir);
    }
    if cfg!(target_os = "windows") {
        let windir = std::env::var("WINDIR").unwrap_or_else(|_| "C:\\Windows".to_string());
        dirs_found.push(PathBuf::from(windir).join("Fonts"));
    } else if cfg!(target_os = "macos") {
        dirs_found.push(PathBuf::from("/Library/Fonts"));
        dirs_found.push(PathBuf::from("/System/Library/Fonts"));
    } else {
        if let Some(home) = dirs::home_dir() {
            dirs_found.push(home.join(".fonts"));
        }
        dirs_found.push(PathBuf::from("/usr/local/share/fonts"));
        dirs_found.push(PathBuf::from("/usr/share/fonts"));
    }
    dirs_found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_list_strips_quotes() {
        assert_eq!(
            parse_family_list("Lato, 'Lucida Grande', \"Open Sans\" ,, sans-serif"),
            vec!["Lato", "Lucida Grande", "Open Sans", "sans-serif"]
        );
        assert!(parse_family_list(" , ").is_empty());
    }

    #[test]
    fn normalize_drops_separators() {
        assert_eq!(normalize("Lucida Grande"), "lucidagrande");
        assert_eq!(normalize("DejaVuSans-Bold"), "dejavusansbold");
    }

    #[test]
    fn regular_faces_preferred_for_normal_weight() {
        assert_eq!(face_score("", FontWeight::Normal), Some(4));
        assert_eq!(face_score("regular", FontWeight::Normal), Some(4));
        assert_eq!(face_score("bold", FontWeight::Normal), None);
        assert_eq!(face_score("oblique", FontWeight::Normal), None);
        // "DejaVu Sans" must not pick "DejaVu Sans Mono" over a plain face
        assert!(face_score("mono", FontWeight::Normal) < face_score("", FontWeight::Normal));
    }

    #[test]
    fn bold_faces_preferred_for_bold_weight() {
        assert!(face_score("bold", FontWeight::Bold) > face_score("semibold", FontWeight::Bold));
        assert!(face_score("semibold", FontWeight::Bold) > face_score("", FontWeight::Bold));
        assert_eq!(face_score("bolditalic", FontWeight::Bold), None);
    }

    #[test]
    fn empty_font_dirs_resolve_to_none() {
        let mut book = FontBook::with_dirs(vec![PathBuf::from("/nonexistent/inkswarm/fonts")]);
        assert_eq!(book.file_count(), 0);
        assert!(book.resolve("Lato", FontWeight::Normal).is_none());
    }
}
