//! Human-readable dump of a reconciled configuration

use crate::config::{CommentTable, StorageRoots};
use crate::core::document::ConfigDocument;
use std::fmt;
use std::path::Path;

/// Prints roots, sections, options and, optionally, their comments
///
/// ```text
/// --- after sync ---
///     wkdir: /opt/app
///   src dir: /opt/app/src
///  data dir: /opt/app/data
/// file name: config.cfg
///
/// sections: [MAIN, SYSTEM]
/// # main section
/// [MAIN]
///    # turn it on
///    flag: True
/// ```
#[derive(Debug, Clone)]
pub struct DocumentReport<'a> {
    document: &'a ConfigDocument,
    comments: &'a CommentTable,
    roots: Option<&'a StorageRoots>,
    config_path: Option<&'a Path>,
    heading: Option<String>,
    show_comments: bool,
}

impl<'a> DocumentReport<'a> {
    pub fn new(document: &'a ConfigDocument, comments: &'a CommentTable) -> Self {
        Self {
            document,
            comments,
            roots: None,
            config_path: None,
            heading: None,
            show_comments: true,
        }
    }

    pub fn with_roots(mut self, roots: &'a StorageRoots) -> Self {
        self.roots = Some(roots);
        self
    }

    pub fn with_config_path(mut self, path: &'a Path) -> Self {
        self.config_path = Some(path);
        self
    }

    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    pub fn show_comments(mut self, show: bool) -> Self {
        self.show_comments = show;
        self
    }
}

impl fmt::Display for DocumentReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(heading) = &self.heading {
            writeln!(f, "--- {heading} ---")?;
        }

        if let Some(roots) = self.roots {
            writeln!(f, "    wkdir: {}", roots.working_dir.display())?;
            writeln!(f, "  src dir: {}", roots.source_dir.display())?;
            writeln!(f, " data dir: {}", roots.data_dir.display())?;
        }
        if let Some(path) = self.config_path {
            let name = path.file_name().map(|n| n.to_string_lossy());
            writeln!(f, "file name: {}", name.unwrap_or_default())?;
        }
        if self.roots.is_some() || self.config_path.is_some() {
            writeln!(f)?;
        }

        let sections: Vec<&str> = self.document.sections().collect();
        writeln!(f, "sections: [{}]", sections.join(", "))?;

        for section in sections {
            if self.show_comments {
                for line in self.comments.get(section) {
                    writeln!(f, "# {line}")?;
                }
            }
            writeln!(f, "[{section}]")?;
            for (option, value) in self.document.options(section) {
                if self.show_comments {
                    for line in self.comments.get(option) {
                        writeln!(f, "   # {line}")?;
                    }
                }
                writeln!(f, "   {}: {}", option, value.unwrap_or_default())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (ConfigDocument, CommentTable) {
        let doc = ConfigDocument::parse("[MAIN]\nflag = True\n[SYSTEM]\nver = 1.0\n").unwrap();
        let comments = CommentTable::new()
            .with("MAIN", ["main section"])
            .with("flag", ["turn it on"]);
        (doc, comments)
    }

    #[test]
    fn test_report_with_comments() {
        let (doc, comments) = fixture();
        let text = DocumentReport::new(&doc, &comments).to_string();
        assert_eq!(
            text,
            "sections: [MAIN, SYSTEM]\n\
             # main section\n\
             [MAIN]\n   # turn it on\n   flag: True\n\
             [SYSTEM]\n   ver: 1.0\n"
        );
    }

    #[test]
    fn test_report_without_comments() {
        let (doc, comments) = fixture();
        let text = DocumentReport::new(&doc, &comments)
            .show_comments(false)
            .to_string();
        assert!(!text.contains('#'));
        assert!(text.contains("   flag: True\n"));
    }

    #[test]
    fn test_report_header() {
        let (doc, comments) = fixture();
        let roots = StorageRoots::from_source_dir("/opt/app/src");
        let path = roots.config_path("config.cfg");
        let text = DocumentReport::new(&doc, &comments)
            .with_heading("after sync")
            .with_roots(&roots)
            .with_config_path(&path)
            .to_string();
        assert!(text.starts_with("--- after sync ---\n    wkdir: /opt/app\n"));
        assert!(text.contains(" data dir: /opt/app/data\nfile name: config.cfg\n\nsections:"));
    }
}
