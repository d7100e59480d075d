//! Reader for the PABULIB `.pb` format.
//!
//! A file is a sequence of `;`-delimited lines split into `META`, `PROJECTS`
//! and `VOTES` sections. Each section marker is followed by a header line
//! naming its columns.

use log::{debug, warn};
use pb_structs::core::{PbInstance, PbMeta, PbProject, PbVoter, VoteType};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{file}, line {line}: {message}")]
    Parse {
        file: String,
        line: usize,
        message: String,
    },
    #[error("{file}: missing {what}")]
    Missing { file: String, what: &'static str },
}

#[derive(Debug, Default)]
pub struct DirectoryScan {
    pub instances: Vec<PbInstance>,
    pub failures: Vec<(PathBuf, ReadError)>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    None,
    Meta,
    Projects,
    Votes,
}

/// Positions of the columns a section needs, resolved from its header.
#[derive(Clone, Copy, Debug)]
struct Columns {
    id: usize,
    value: usize,
    name: Option<usize>,
}

/// Splits a line on `;`, honouring double-quoted fields (`""` is an escaped
/// quote inside them).
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => fields.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

struct Parser<'a> {
    file: &'a str,
    line: usize,
}

impl Parser<'_> {
    fn error(&self, message: impl Into<String>) -> ReadError {
        ReadError::Parse {
            file: self.file.to_string(),
            line: self.line,
            message: message.into(),
        }
    }

    fn columns(&self, header: &[String], id: &str, value: &str) -> Result<Columns, ReadError> {
        let find = |name: &str| header.iter().position(|h| h == name);
        Ok(Columns {
            id: find(id).ok_or_else(|| self.error(format!("missing column '{}'", id)))?,
            value: find(value).ok_or_else(|| self.error(format!("missing column '{}'", value)))?,
            name: find("name"),
        })
    }

    fn field<'f>(&self, fields: &'f [String], index: usize) -> Result<&'f str, ReadError> {
        fields
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| self.error(format!("expected at least {} fields", index + 1)))
    }
}

/// Parses the content of a PABULIB file. `file_name` is recorded in the
/// instance metadata and in error messages.
pub fn parse_str(file_name: &str, content: &str) -> Result<PbInstance, ReadError> {
    let mut parser = Parser {
        file: file_name,
        line: 0,
    };
    let mut budget = None;
    let mut vote_type = None;
    let mut projects = Vec::new();
    let mut voters = Vec::new();

    let mut section = Section::None;
    let mut awaiting_header = false;
    let mut columns = None;

    for (i, raw) in content.lines().enumerate() {
        parser.line = i + 1;
        if raw.trim().is_empty() {
            continue;
        }
        let fields = split_fields(raw);

        let marker = match fields[0].as_str() {
            "META" => Some(Section::Meta),
            "PROJECTS" => Some(Section::Projects),
            "VOTES" => Some(Section::Votes),
            _ => None,
        };
        if let Some(marker) = marker {
            section = marker;
            awaiting_header = true;
            continue;
        }

        if awaiting_header {
            awaiting_header = false;
            columns = match section {
                Section::Projects => Some(parser.columns(&fields, "project_id", "cost")?),
                Section::Votes => Some(parser.columns(&fields, "voter_id", "vote")?),
                _ => None,
            };
            continue;
        }

        match (section, columns) {
            (Section::None, _) => return Err(parser.error("row outside of any section")),
            (Section::Meta, _) => {
                let key = parser.field(&fields, 0)?;
                let value = parser.field(&fields, 1)?;
                match key {
                    "budget" => {
                        budget = Some(value.parse::<f64>().map_err(|_| {
                            parser.error(format!("invalid budget '{}'", value))
                        })?)
                    }
                    "vote_type" => {
                        vote_type = Some(
                            value
                                .parse::<VoteType>()
                                .map_err(|e| parser.error(e.to_string()))?,
                        )
                    }
                    _ => {}
                }
            }
            (Section::Projects, Some(columns)) => {
                let id = parser.field(&fields, columns.id)?;
                let cost = parser.field(&fields, columns.value)?;
                let cost = cost
                    .parse::<u64>()
                    .map_err(|_| parser.error(format!("invalid cost '{}'", cost)))?;
                let name = columns
                    .name
                    .and_then(|i| fields.get(i))
                    .filter(|name| !name.is_empty())
                    .cloned();
                projects.push(PbProject {
                    id: id.to_string(),
                    cost,
                    name,
                });
            }
            (Section::Votes, Some(columns)) => {
                let id = parser.field(&fields, columns.id)?;
                let vote = parser
                    .field(&fields, columns.value)?
                    .split(',')
                    .map(str::trim)
                    .filter(|project| !project.is_empty())
                    .map(str::to_string)
                    .collect();
                voters.push(PbVoter {
                    id: id.to_string(),
                    vote,
                });
            }
            (Section::Projects | Section::Votes, None) => {
                return Err(parser.error("section has no header"))
            }
        }
    }

    let budget = budget.ok_or_else(|| ReadError::Missing {
        file: file_name.to_string(),
        what: "budget",
    })?;
    debug!(
        "{}: {} projects, {} voters, budget {}",
        file_name,
        projects.len(),
        voters.len(),
        budget
    );
    Ok(PbInstance {
        meta: PbMeta {
            file_name: file_name.to_string(),
            budget,
            vote_type,
        },
        projects,
        voters,
    })
}

pub fn read_file(path: &Path) -> Result<PbInstance, ReadError> {
    let content = fs::read_to_string(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_str(&file_name, &content)
}

/// Reads every regular file of `dir`, in name order.
///
/// A file that fails to parse is logged and listed in
/// [`DirectoryScan::failures`]; the remaining files are still read. Only an
/// unreadable directory fails the whole scan.
pub fn read_dir(dir: &Path) -> Result<DirectoryScan, ReadError> {
    let io_error = |source| ReadError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut scan = DirectoryScan::default();
    for path in paths {
        match read_file(&path) {
            Ok(instance) => scan.instances.push(instance),
            Err(e) => {
                warn!("Error while reading file {}: {}", path.display(), e);
                scan.failures.push((path, e));
            }
        }
    }
    Ok(scan)
}
