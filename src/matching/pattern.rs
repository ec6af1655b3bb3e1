//! Glob-style file discovery
//!
//! Patterns are relative paths below the searched folder. Within a segment
//! `*`, `?`, `[abc]` and `[!abc]` never cross a `/`; a whole `**` segment
//! matches any number of directories, so `**/*.Align` finds every Align file
//! in the tree.

use std::io;
use std::path::Path;

use log::{debug, trace, warn};
use regex::Regex;
use walkdir::WalkDir;

use crate::errors::{ReferenceError, ReferenceResult};
use super::file_handle::FileHandle;

const RECURSIVE: &str = "**";

/// A compiled discovery pattern
#[derive(Debug, Clone)]
pub struct FilePattern {
    source: String,
    path_regex: Regex,
    /// Directory levels to walk, unbounded for recursive patterns
    max_depth: Option<usize>,
}

impl FilePattern {
    /// Compile a glob pattern
    pub fn new(pattern: &str) -> ReferenceResult<Self> {
        if pattern.starts_with('/') {
            return Err(ReferenceError::ConfigError(format!(
                "File patterns must be relative to the input folder: {}", pattern)));
        }
        let segments: Vec<&str> = pattern
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();
        match segments.last() {
            None => return Err(ReferenceError::ConfigError("Empty file pattern".to_string())),
            Some(&RECURSIVE) => {
                return Err(ReferenceError::ConfigError(format!(
                    "File patterns must end in a file name: {}", pattern)));
            },
            Some(_) => {},
        }

        let mut out = String::from("^");
        for (index, segment) in segments.iter().enumerate() {
            if *segment == RECURSIVE {
                out.push_str("(?:[^/]+/)*");
                continue;
            }
            out.push_str(&segment_to_regex(segment));
            if index + 1 < segments.len() {
                out.push('/');
            }
        }
        out.push('$');

        let path_regex = Regex::new(&out).map_err(|e| {
            ReferenceError::ConfigError(format!("Invalid file pattern {}: {}", pattern, e))
        })?;
        trace!("Compiled pattern {} to {}", pattern, path_regex.as_str());

        let max_depth = if segments.contains(&RECURSIVE) { None } else { Some(segments.len()) };

        Ok(FilePattern {
            source: pattern.to_string(),
            path_regex,
            max_depth,
        })
    }

    /// Whether a `/`-separated path relative to the searched folder matches
    pub fn matches(&self, relative: &str) -> bool {
        self.path_regex.is_match(relative)
    }

    /// List the matching files below `folder`, sorted by path
    ///
    /// An unreadable `folder` is an error; unreadable subfolders are skipped.
    pub fn discover(&self, folder: &Path) -> ReferenceResult<Vec<FileHandle>> {
        let mut walker = WalkDir::new(folder).min_depth(1);
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut paths = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(io::Error::from(e).into()),
                Err(e) => {
                    warn!("Skipping unreadable entry while matching {}: {}", self.source, e);
                    continue;
                },
            };
            if !entry.path().is_file() {
                continue;
            }
            let matched = entry
                .path()
                .strip_prefix(folder)
                .ok()
                .and_then(relative_key)
                .map(|key| self.matches(&key))
                .unwrap_or(false);
            if matched {
                paths.push(entry.into_path());
            }
        }
        paths.sort();

        debug!("Pattern {} matched {} files in {}", self.source, paths.len(), folder.display());
        paths.into_iter().map(FileHandle::new).collect()
    }
}

/// `/`-joined components of a relative path, `None` when not UTF-8
fn relative_key(relative: &Path) -> Option<String> {
    let parts = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<&str>>>()?;
    Some(parts.join("/"))
}

/// Translate one path segment of a glob to regex syntax
fn segment_to_regex(glob: &str) -> String {
    let mut out = String::new();
    let mut chars = glob.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' => {
                while chars.peek() == Some(&'*') {
                    chars.next();
                }
                out.push_str("[^/]*");
            },
            '?' => out.push_str("[^/]"),
            '[' => {
                let mut raw = String::new();
                let mut class = String::new();
                let mut closed = false;

                if chars.peek() == Some(&'!') {
                    raw.push(chars.next().unwrap_or('!'));
                    class.push('^');
                }
                // a ']' right after the opening bracket is literal
                if chars.peek() == Some(&']') {
                    raw.push(chars.next().unwrap_or(']'));
                    class.push_str("\\]");
                }
                for n in chars.by_ref() {
                    if n == ']' {
                        closed = true;
                        break;
                    }
                    raw.push(n);
                    if matches!(n, '\\' | '[' | '^' | '&' | '~') {
                        class.push('\\');
                    }
                    class.push(n);
                }

                if closed {
                    if class.starts_with('^') {
                        class.push('/');
                    }
                    out.push('[');
                    out.push_str(&class);
                    out.push(']');
                } else {
                    // unterminated class: the bracket was literal
                    out.push_str(&regex::escape("["));
                    out.push_str(&regex::escape(&raw));
                }
            },
            other => {
                let mut buf = [0u8; 4];
                out.push_str(&regex::escape(other.encode_utf8(&mut buf)));
            },
        }
    }
    out
}
