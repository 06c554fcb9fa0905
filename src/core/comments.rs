//! Comment overlay
//!
//! Comments are stored in the document as valueless options named
//! `"<marker> <text>"`, so a written file shows them as `# text` lines above
//! the section's or variable's entries. [`CommentOverlay::strip`] removes every
//! option whose name begins with a comment prefix, which makes
//! `strip(attach(doc))` equal to `doc` for any document free of such options.

use crate::config::CommentTable;
use crate::core::document::ConfigDocument;

/// Characters that mark an option name as a comment
pub const DEFAULT_COMMENT_PREFIXES: [char; 2] = ['#', ';'];

/// Marker used to name attached comment options
pub const DEFAULT_COMMENT_MARKER: char = '#';

/// Attaches and strips annotation lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentOverlay {
    marker: char,
    prefixes: Vec<char>,
}

impl Default for CommentOverlay {
    fn default() -> Self {
        Self {
            marker: DEFAULT_COMMENT_MARKER,
            prefixes: DEFAULT_COMMENT_PREFIXES.to_vec(),
        }
    }
}

impl CommentOverlay {
    /// Creates an overlay. The marker is always treated as a prefix.
    pub fn new(marker: char, prefixes: impl IntoIterator<Item = char>) -> Self {
        let mut prefixes: Vec<char> = prefixes.into_iter().collect();
        if !prefixes.contains(&marker) {
            prefixes.push(marker);
        }
        Self { marker, prefixes }
    }

    pub fn marker(&self) -> char {
        self.marker
    }

    pub fn prefixes(&self) -> &[char] {
        &self.prefixes
    }

    /// Option name used for one comment line
    pub fn comment_key(&self, line: &str) -> String {
        format!("{} {}", self.marker, line)
    }

    pub fn is_comment(&self, option: &str) -> bool {
        option
            .chars()
            .next()
            .is_some_and(|c| self.prefixes.contains(&c))
    }

    /// Appends the comment lines for `key` to `section`
    ///
    /// Called right after a section is created (section comments) or right
    /// before a variable is written (variable comments). A comment containing
    /// line breaks becomes one comment option per line. Returns the number of
    /// options attached.
    ///
    /// Comment options are keyed by their text, so a line repeated within one
    /// section is written once, at its first position.
    pub fn attach(
        &self,
        document: &mut ConfigDocument,
        section: &str,
        key: &str,
        comments: &CommentTable,
    ) -> usize {
        let mut attached = 0;
        for line in comments.get(key).iter().flat_map(|c| split_lines(c)) {
            document.set_valueless(section, &self.comment_key(line));
            attached += 1;
        }
        attached
    }

    /// Removes every comment option from every section
    pub fn strip(&self, document: &mut ConfigDocument) -> usize {
        document.retain_options(|_, option| !self.is_comment(option))
    }
}

/// Splits comment text at `\n` and `\r\n`; empty text stays one empty line
pub(crate) fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comments() -> CommentTable {
        CommentTable::new()
            .with("DATA", ["sec comment 1", "sec comment 2"])
            .with("m2", ["m2 comment 1", "m2 comment 2"])
    }

    fn plain() -> ConfigDocument {
        ConfigDocument::parse("[DATA]\nm1 = textm1\nm2 = m2-1,m2-2\n[SYSTEM]\nsys_var = x\n")
            .unwrap()
    }

    #[test]
    fn test_attach_names_comment_options() {
        let overlay = CommentOverlay::default();
        let mut doc = ConfigDocument::new();
        doc.add_section("DATA");
        assert_eq!(overlay.attach(&mut doc, "DATA", "DATA", &comments()), 2);
        assert!(doc.has_option("DATA", "# sec comment 1"));
        assert_eq!(doc.get_raw("DATA", "# sec comment 2"), Some(None));
    }

    #[test]
    fn test_attach_unknown_key_is_noop() {
        let overlay = CommentOverlay::default();
        let mut doc = plain();
        assert_eq!(overlay.attach(&mut doc, "DATA", "m1", &comments()), 0);
        assert_eq!(doc, plain());
    }

    #[test]
    fn test_strip_reverses_attach() {
        let overlay = CommentOverlay::default();
        let mut doc = plain();
        overlay.attach(&mut doc, "DATA", "DATA", &comments());
        overlay.attach(&mut doc, "SYSTEM", "m2", &comments());
        assert_ne!(doc, plain());
        assert_eq!(overlay.strip(&mut doc), 4);
        assert_eq!(doc, plain());
    }

    #[test]
    fn test_multiline_comment_attaches_one_option_per_line() {
        let overlay = CommentOverlay::default();
        let comments = CommentTable::new().with("m1", ["line one\nline two", "crlf\r\nend"]);
        let mut doc = plain();
        assert_eq!(overlay.attach(&mut doc, "DATA", "m1", &comments), 4);

        let mut reloaded = ConfigDocument::parse(&doc.to_ini_string()).unwrap();
        assert!(reloaded.has_option("DATA", "# line two"));
        assert_eq!(overlay.strip(&mut reloaded), 4);
        assert_eq!(reloaded, plain());
    }

    #[test]
    fn test_repeated_line_is_attached_once() {
        let overlay = CommentOverlay::default();
        let comments = CommentTable::new()
            .with("m1", ["shared note"])
            .with("m2", ["shared note"]);
        let mut doc = ConfigDocument::new();
        overlay.attach(&mut doc, "DATA", "m1", &comments);
        doc.set("DATA", "m1", "x");
        overlay.attach(&mut doc, "DATA", "m2", &comments);
        doc.set("DATA", "m2", "y");

        let names: Vec<_> = doc.options("DATA").map(|(name, _)| name).collect();
        assert_eq!(names, vec!["# shared note", "m1", "m2"]);
    }

    #[test]
    fn test_strip_removes_semicolon_comments() {
        let overlay = CommentOverlay::default();
        let mut doc = ConfigDocument::parse("[A]\n; old style\nkey = 1\n").unwrap();
        assert_eq!(overlay.strip(&mut doc), 1);
        assert_eq!(doc.options("A").count(), 1);
    }

    #[test]
    fn test_strip_keeps_values_with_hash_inside() {
        let overlay = CommentOverlay::default();
        let mut doc = ConfigDocument::parse("[A]\ncolor = #ff0000\n").unwrap();
        assert_eq!(overlay.strip(&mut doc), 0);
        assert_eq!(doc.get("A", "color"), Some("#ff0000"));
    }

    #[test]
    fn test_custom_marker_is_also_a_prefix() {
        let overlay = CommentOverlay::new('!', ['#']);
        assert!(overlay.is_comment("! note"));
        assert!(overlay.is_comment("# note"));
        assert!(!overlay.is_comment("; note"));
        assert_eq!(overlay.comment_key("note"), "! note");
    }
}
