//! Front matter extraction for standards documents.
//!
//! A standards document starts with a metadata block delimited by `---`
//! (YAML), `+++` (TOML) or `;;;` (JSON). A JSON object whose opening `{` and
//! closing `}` sit on lines of their own is accepted as well:
//!
//! ```text
//! ---
//! title: Golang REST API Standards
//! description: Standards for writing REST APIs in Go.
//! scope: "*.go"
//! topics: [golang, api]
//! parent: golang/GENERAL.md
//! ---
//! # Body
//! ```
//!
//! Documents without a block, or with a block that does not describe a valid
//! header, are not errors: plenty of markdown files in a standards library
//! (READMEs, changelogs) are not standards.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::domain::{IncompleteHeader, StandardsHeader};

/// The outcome of reading a document's front matter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Extracted {
    /// The document carries a valid header.
    Header(StandardsHeader),
    /// The document has no usable header.
    NoHeader(SkipReason),
}

impl Extracted {
    /// Returns the header, if one was found.
    #[must_use]
    pub fn header(self) -> Option<StandardsHeader> {
        match self {
            Self::Header(header) => Some(header),
            Self::NoHeader(_) => None,
        }
    }
}

/// Why a document has no usable header.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    /// The document does not start with a front matter block.
    #[error("no front matter block")]
    Missing,
    /// The front matter block could not be parsed.
    #[error("malformed front matter: {0}")]
    Malformed(String),
    /// The front matter block parsed, but required fields are missing.
    #[error(transparent)]
    Incomplete(#[from] IncompleteHeader),
}

/// A document could not be read.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Reading the file failed.
    #[error("failed to read {}", path.display())]
    Read {
        /// The document that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Reads the document at `path` and extracts its header.
///
/// # Errors
///
/// Returns an error only if the file cannot be read. A missing, malformed or
/// incomplete header is reported as [`Extracted::NoHeader`].
pub fn extract(path: &Path) -> Result<Extracted, ExtractError> {
    tracing::debug!(path = %path.display(), "extracting md header");

    let bytes = fs::read(path).map_err(|source| ExtractError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let Ok(content) = String::from_utf8(bytes) else {
        return Ok(Extracted::NoHeader(SkipReason::Malformed(
            "content is not valid UTF-8".to_string(),
        )));
    };

    Ok(parse(&content))
}

/// Extracts the header from the content of a document.
pub fn parse(content: &str) -> Extracted {
    match parse_header(content) {
        Ok(header) => Extracted::Header(header),
        Err(reason) => Extracted::NoHeader(reason),
    }
}

fn parse_header(content: &str) -> Result<StandardsHeader, SkipReason> {
    let (syntax, block) = split_front_matter(content)?;

    let front: FrontMatter = if block.trim().is_empty() {
        FrontMatter::default()
    } else {
        syntax.deserialize(&block)?
    };

    Ok(StandardsHeader::try_from(front)?)
}

/// Returns the syntax and the raw text of the leading front matter block.
fn split_front_matter(content: &str) -> Result<(Syntax, String), SkipReason> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.lines();

    let opening = lines.next().ok_or(SkipReason::Missing)?;
    let syntax = Syntax::from_opening(opening).ok_or(SkipReason::Missing)?;

    // A bare JSON object is its own delimiter, so the braces stay in the block.
    let mut block = Vec::new();
    if syntax == Syntax::JsonObject {
        block.push(opening.trim());
    }
    for line in lines {
        if syntax.is_closing(line) {
            if syntax == Syntax::JsonObject {
                block.push(line.trim_end());
            }
            return Ok((syntax, block.join("\n")));
        }
        block.push(line);
    }

    Err(SkipReason::Malformed(format!(
        "expected front matter to be closed by '{}'",
        syntax.delimiter()
    )))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Syntax {
    Yaml,
    Toml,
    /// JSON between `;;;` lines.
    Json,
    /// A JSON object opened by a `{` line and closed by an unindented `}` line.
    JsonObject,
}

impl Syntax {
    fn from_opening(line: &str) -> Option<Self> {
        match line.trim() {
            "---" => Some(Self::Yaml),
            "+++" => Some(Self::Toml),
            ";;;" => Some(Self::Json),
            "{" => Some(Self::JsonObject),
            _ => None,
        }
    }

    const fn delimiter(self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
            Self::Json => ";;;",
            Self::JsonObject => "}",
        }
    }

    fn is_closing(self, line: &str) -> bool {
        match self {
            Self::JsonObject => line.trim_end() == self.delimiter(),
            _ => line.trim() == self.delimiter(),
        }
    }

    fn deserialize(self, block: &str) -> Result<FrontMatter, SkipReason> {
        match self {
            Self::Yaml => serde_yaml::from_str(block).map_err(|e| malformed(self, &e)),
            Self::Toml => toml::from_str(block).map_err(|e| malformed(self, &e)),
            Self::Json | Self::JsonObject => {
                serde_json::from_str(block).map_err(|e| malformed(self, &e))
            }
        }
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => write!(f, "YAML"),
            Self::Toml => write!(f, "TOML"),
            Self::Json | Self::JsonObject => write!(f, "JSON"),
        }
    }
}

fn malformed(syntax: Syntax, error: &dyn fmt::Display) -> SkipReason {
    SkipReason::Malformed(format!("invalid {syntax}: {error}"))
}

/// The front matter as authored. Every field is optional here so that
/// missing fields can be reported together.
#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    title: Option<String>,
    description: Option<String>,
    scope: Option<String>,
    topics: Option<Vec<String>>,
    parent: Option<String>,
}

impl TryFrom<FrontMatter> for StandardsHeader {
    type Error = IncompleteHeader;

    fn try_from(front: FrontMatter) -> Result<Self, Self::Error> {
        let FrontMatter {
            title,
            description,
            scope,
            topics,
            parent,
        } = front;

        let header = match Self::new(
            title.unwrap_or_default(),
            description.unwrap_or_default(),
            scope.unwrap_or_default(),
            topics.clone().unwrap_or_default(),
        ) {
            Ok(_) if topics.is_none() => return Err(IncompleteHeader(vec!["topics"])),
            Ok(header) => header,
            Err(IncompleteHeader(mut missing)) => {
                if topics.is_none() {
                    missing.push("topics");
                }
                return Err(IncompleteHeader(missing));
            }
        };

        // A blank parent is treated as no parent at all.
        Ok(match parent.filter(|parent| !parent.trim().is_empty()) {
            Some(parent) => header.with_parent(parent),
            None => header,
        })
    }
}
