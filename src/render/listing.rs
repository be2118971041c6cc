use crate::render::{ColorDef, DisplayData, Renderer, TextEdit};
use anyhow::Result;
use console::{Color, Style, Term};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{cmp::max, io::Write};

/// The ascii separator used after the diff title
const TITLE_SEPARATOR: &str = "=";

/// A plain listing of every edit, one line per deleted or inserted run.
///
/// Each line carries the position in the old document where the edit applies, followed by the
/// quoted text so that whitespace and newlines stay visible.
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone)]
#[serde(rename_all = "kebab-case", default)]
pub struct Listing {
    pub addition: TextStyle,
    pub deletion: TextStyle,
}

/// Text style options for additions or deletions.
///
/// Left unset, a style is plain white text with no prefix.
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone)]
#[serde(rename_all = "kebab-case", default)]
pub struct TextStyle {
    /// The foreground color of the line
    #[serde(with = "ColorDef")]
    pub foreground: Color,
    /// Whether to bold the line
    pub bold: bool,
    /// The prefix to use with the line
    pub prefix: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            foreground: Color::White,
            bold: false,
            prefix: String::new(),
        }
    }
}

impl Default for Listing {
    fn default() -> Self {
        Listing {
            addition: TextStyle {
                foreground: Color::Green,
                bold: true,
                prefix: "+ ".into(),
            },
            deletion: TextStyle {
                foreground: Color::Red,
                bold: true,
                prefix: "- ".into(),
            },
        }
    }
}

impl From<&TextStyle> for Style {
    fn from(fmt: &TextStyle) -> Self {
        let style = Style::new().fg(fmt.foreground);
        if fmt.bold { style.bold() } else { style }
    }
}

impl Renderer for Listing {
    fn render(
        &self,
        writer: &mut dyn Write,
        data: &DisplayData,
        term_info: Option<&Term>,
    ) -> Result<()> {
        let DisplayData { edits, old, new } = data;

        if edits.is_empty() {
            info!("No differences between {} and {}", old.filename, new.filename);
            return Ok(());
        }

        self.print_title(writer, old.filename, new.filename, term_info)?;
        for edit in edits {
            self.print_edit(writer, edit)?;
        }
        Ok(())
    }
}

impl Listing {
    /// Print the names of the two documents being compared.
    ///
    /// The names are stacked vertically if they don't fit on one line of the terminal.
    fn print_title(
        &self,
        term: &mut dyn Write,
        old_fname: &str,
        new_fname: &str,
        term_info: Option<&Term>,
    ) -> std::io::Result<()> {
        let old_style = Style::from(&self.deletion);
        let new_style = Style::from(&self.addition);
        let divider = " -> ";
        let title_len = old_fname.len() + divider.len() + new_fname.len();
        let term_width = term_info
            .and_then(Term::size_checked)
            .map_or(title_len, |(_height, width)| width.into());

        let (title, sep_len) = if title_len <= term_width {
            (
                format!(
                    "{}{}{}",
                    old_style.apply_to(old_fname),
                    divider,
                    new_style.apply_to(new_fname)
                ),
                title_len,
            )
        } else {
            debug!("Title is wider than the terminal ({term_width}), stacking it");
            (
                format!(
                    "{}\n{}",
                    old_style.apply_to(old_fname),
                    new_style.apply_to(new_fname)
                ),
                max(old_fname.len(), new_fname.len()),
            )
        };
        writeln!(term, "{title}")?;
        writeln!(term, "{}", TITLE_SEPARATOR.repeat(sep_len))?;
        Ok(())
    }

    fn print_edit(&self, term: &mut dyn Write, edit: &TextEdit) -> std::io::Result<()> {
        if !edit.deleted.is_empty() {
            let line = format!(
                "{}{}..{} {:?}",
                self.deletion.prefix, edit.start, edit.end, edit.deleted
            );
            writeln!(term, "{}", Style::from(&self.deletion).apply_to(line))?;
        }
        if !edit.inserted.is_empty() {
            let line = format!("{}{} {:?}", self.addition.prefix, edit.start, edit.inserted);
            writeln!(term, "{}", Style::from(&self.addition).apply_to(line))?;
        }
        Ok(())
    }
}
