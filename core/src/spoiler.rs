//! Spoiler log. The human-readable record of what a pass changed.
//!
//! Append-only, sectioned by module, one file per save, written once at
//! the end of the per-save pass. A disabled log still writes its file,
//! just empty. Write failures never block the replacement computation.

use crate::error::RandoResult;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpoilerSection {
    pub title: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SpoilerLog {
    identifier: String,
    enabled:    bool,
    sections:   Vec<SpoilerSection>,
    recording:  bool,
}

impl SpoilerLog {
    pub fn new(identifier: &str, enabled: bool) -> Self {
        Self {
            identifier: identifier.to_string(),
            enabled,
            sections:   Vec::new(),
            recording:  false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Open a new section. Lines written while `record` is false are dropped.
    pub fn begin_section(&mut self, title: &str, record: bool) {
        self.recording = self.enabled && record;
        if self.recording {
            self.sections.push(SpoilerSection {
                title: title.to_string(),
                lines: Vec::new(),
            });
        }
    }

    pub fn line(&mut self, text: impl Into<String>) {
        if !self.recording {
            return;
        }
        if let Some(section) = self.sections.last_mut() {
            section.lines.push(text.into());
        }
    }

    pub fn end_section(&mut self) {
        self.recording = false;
    }

    pub fn sections(&self) -> &[SpoilerSection] {
        &self.sections
    }

    /// Every line in order, headers included.
    pub fn lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        for section in &self.sections {
            out.push(format!("==== {} ====", section.title));
            out.extend(section.lines.iter().cloned());
            out.push(String::new());
        }
        out
    }

    pub fn render(&self) -> String {
        if !self.enabled {
            return String::new();
        }
        let mut text = self.lines().join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        text
    }

    pub fn file_name(&self) -> String {
        format!("SpoilerLog-{}.txt", sanitize_file_component(&self.identifier))
    }

    /// Write the whole log with a single buffered write.
    pub fn write_file(&self, dir: &Path) -> RandoResult<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        let mut writer = BufWriter::new(File::create(&path)?);
        writer.write_all(self.render().as_bytes())?;
        writer.flush()?;
        Ok(path)
    }
}

/// Replace anything that is not safe in a file name. Empty becomes "_".
fn sanitize_file_component(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' || c == ' ' { c } else { '_' })
        .collect();
    if cleaned.trim().is_empty() {
        "_".to_string()
    } else {
        cleaned
    }
}
