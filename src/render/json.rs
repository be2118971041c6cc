use crate::render::{DisplayData, Renderer, TextEdit};
use console::Term;
use logging_timer::time;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// A renderer that outputs the edit script as JSON.
///
/// This can be useful if you want to use `jq` or feed the edits to another program.
#[derive(Serialize, Deserialize, Clone, Eq, PartialEq, Debug, Default)]
#[serde(rename_all = "kebab-case", default)]
pub struct Json {
    /// Whether to pretty print the output JSON.
    pub pretty_print: bool,

    /// Whether to include the full text of both documents in the output.
    pub include_text: bool,
}

/// The shape of the emitted document when the full text is left out.
#[derive(Serialize)]
struct EditsOnly<'a> {
    old: &'a str,
    new: &'a str,
    edits: &'a [TextEdit],
}

impl Renderer for Json {
    fn render(
        &self,
        writer: &mut dyn Write,
        data: &DisplayData,
        _term_info: Option<&Term>,
    ) -> anyhow::Result<()> {
        let json_str = self.generate_json_str(data)?;
        writeln!(writer, "{}", &json_str)?;
        Ok(())
    }
}

impl Json {
    /// Create a JSON string from the display data.
    #[time("trace")]
    fn generate_json_str(&self, data: &DisplayData) -> Result<String, serde_json::Error> {
        let value = if self.include_text {
            serde_json::to_value(data)?
        } else {
            serde_json::to_value(EditsOnly {
                old: data.old.filename,
                new: data.new.filename,
                edits: &data.edits,
            })?
        };
        if self.pretty_print {
            return serde_json::to_string_pretty(&value);
        }
        serde_json::to_string(&value)
    }
}
