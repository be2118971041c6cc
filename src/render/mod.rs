//! Utilities and modules related to rendering edit scripts.
//!
//! Renderers implement a single trait, [Renderer], and receive the computed edits along with the
//! documents they were computed from. What they do with that data is up to them.

mod json;
mod listing;

use self::json::Json;
use self::listing::Listing;
use crate::diff::Edit;
use crate::input_processing::{Token, join_tokens};
use crate::position::Position;
use anyhow::anyhow;
use console::{Color, Term};
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::io::Write;
use strum::{Display, EnumString};

/// The parameters required to display a diff for a particular document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentDiffData<'a> {
    /// The filename of the document
    pub filename: &'a str,
    /// The full text of the document
    pub text: &'a str,
}

/// An edit of the old document expressed as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    /// Where the edit starts in the old document.
    pub start: Position,
    /// Where the edit ends in the old document.
    pub end: Position,
    /// The text removed from the old document.
    pub deleted: String,
    /// The text from the new document that is inserted in its place.
    pub inserted: String,
}

impl TextEdit {
    /// Resolve a token edit against the tokens of the document it applies to.
    pub fn from_edit(edit: &Edit<'_, Token<'_>>, old: &[Token<'_>]) -> Self {
        Self {
            start: edit.start,
            end: edit.end,
            deleted: join_tokens(&old[edit.range()]),
            inserted: join_tokens(edit.replacement),
        }
    }
}

/// The parameters a [Renderer] instance receives to render a diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayData<'a> {
    /// The edits that turn the old document into the new one, in document order.
    pub edits: Vec<TextEdit>,
    /// The parameters that correspond to the old document
    pub old: DocumentDiffData<'a>,
    /// The parameters that correspond to the new document
    pub new: DocumentDiffData<'a>,
}

#[enum_dispatch]
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Renderers {
    Listing,
    Json,
}

impl Default for Renderers {
    fn default() -> Self {
        Renderers::Listing(Listing::default())
    }
}

/// An interface that renders given diff data.
#[enum_dispatch(Renderers)]
pub trait Renderer {
    /// Render a diff.
    ///
    /// Errors are free form for implementors since they aren't recoverable.
    ///
    /// `writer` can be any sink (stdout, a pager, a buffer in tests). `term_info` is an optional
    /// handle to the terminal that renderers can use to query things like the terminal width when
    /// the process is writing to a TTY.
    fn render(
        &self,
        writer: &mut dyn Write,
        data: &DisplayData,
        term_info: Option<&Term>,
    ) -> anyhow::Result<()>;
}

/// A copy of the [Color](console::Color) enum so we can serialize using serde, and get around the
/// orphan rule.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
#[serde(remote = "Color", rename_all = "snake_case")]
enum ColorDef {
    Color256(u8),
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    TrueColor(u8, u8, u8),
}

/// Configurations for the different renderers
///
/// The user can tweak the settings of each renderer and choose the one that is used when nothing
/// is passed on the command line.
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Clone)]
#[serde(rename_all = "kebab-case", default)]
pub struct RenderConfig {
    /// The default renderer to use.
    ///
    /// This is used if no renderer is specified at the command line.
    default: String,

    listing: Listing,
    json: Json,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let default_renderer = Renderers::default();
        RenderConfig {
            default: default_renderer.to_string(),
            listing: Listing::default(),
            json: Json::default(),
        }
    }
}

impl RenderConfig {
    /// Get the renderer specified by the given tag.
    ///
    /// If the tag is not specified this will fall back to the default renderer.
    pub fn get_renderer(self, tag: Option<String>) -> anyhow::Result<Renderers> {
        let tag = tag.unwrap_or_else(|| self.default.clone());

        match tag.as_str() {
            "listing" => Ok(Renderers::Listing(self.listing)),
            "json" => Ok(Renderers::Json(self.json)),
            _ => Err(anyhow!("'{}' is not a valid renderer", &tag)),
        }
    }
}
