//! Markdown vault adapter: every note under a kind's folder is one record,
//! its frontmatter the record's attributes.

pub mod frontmatter;

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use pcb_core::{CoreError, RawRecord, RecordSource};
use pcb_domain::RecordKind;

const NOTE_EXTENSION: &str = "md";
const ENGINE_ROOM: &str = "Engine Room";

/// Filesystem-backed record source. Notes are re-read on every load; a note
/// that cannot be read as UTF-8 text is skipped with a warning.
#[derive(Debug, Clone)]
pub struct MarkdownVault {
    root: PathBuf,
    folders: HashMap<RecordKind, PathBuf>,
}

impl MarkdownVault {
    /// Vault rooted at `root` with the default `Engine Room/<Kind>` folders.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let folders = RecordKind::ALL
            .iter()
            .map(|&kind| (kind, Path::new(ENGINE_ROOM).join(default_folder(kind))))
            .collect();
        Self {
            root: root.into(),
            folders,
        }
    }

    /// Overrides the folder of one record kind, relative to the vault root.
    pub fn with_folder(mut self, kind: RecordKind, folder: impl Into<PathBuf>) -> Self {
        self.folders.insert(kind, folder.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn folder(&self, kind: RecordKind) -> PathBuf {
        match self.folders.get(&kind) {
            Some(folder) => self.root.join(folder),
            None => self.root.join(ENGINE_ROOM).join(default_folder(kind)),
        }
    }

    fn read_note(&self, path: &Path) -> Result<RawRecord, CoreError> {
        let text = fs::read_to_string(path)?;
        let id = path
            .strip_prefix(&self.root)
            .unwrap_or(path)
            .components()
            .map(|part| part.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| id.clone());
        Ok(RawRecord::new(id, name, frontmatter::parse(&text)))
    }
}

impl RecordSource for MarkdownVault {
    fn load(&self, kind: RecordKind) -> Result<Vec<RawRecord>, CoreError> {
        let folder = self.folder(kind);
        if !folder.is_dir() {
            debug!(?kind, folder = %folder.display(), "record folder missing");
            return Ok(Vec::new());
        }
        let mut notes = Vec::new();
        collect_notes(&folder, &mut notes)?;
        notes.sort();

        let records: Vec<RawRecord> = notes
            .iter()
            .filter_map(|path| match self.read_note(path) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(note = %path.display(), error = %err, "unreadable note skipped");
                    None
                }
            })
            .collect();
        debug!(?kind, count = records.len(), "vault records read");
        Ok(records)
    }
}

fn collect_notes(dir: &Path, notes: &mut Vec<PathBuf>) -> Result<(), CoreError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_notes(&path, notes)?;
        } else if path.extension().and_then(|ext| ext.to_str()) == Some(NOTE_EXTENSION) {
            notes.push(path);
        }
    }
    Ok(())
}

fn default_folder(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Bill => "Bills",
        RecordKind::Debt => "Debts",
        RecordKind::Income => "Income",
        RecordKind::Injector => "Injectors",
        RecordKind::Account => "Accounts",
        RecordKind::Checking => "Checking",
    }
}
