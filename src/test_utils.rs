use crate::render::{DisplayData, Renderer};
use std::io::Write;

/// Collects everything written to it as a string.
///
/// Renderers write to a generic writer, so this lets unit tests assert on their exact output.
#[derive(Default)]
pub(crate) struct StringWriter {
    internal_buffer: String,
}

impl StringWriter {
    /// Consume the writer and return the text with any terminal styling removed.
    pub fn into_plain_text(self) -> String {
        console::strip_ansi_codes(&self.internal_buffer).into_owned()
    }
}

impl Write for StringWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let s = std::str::from_utf8(buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        self.internal_buffer.push_str(s);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Render `data` without a terminal and return the unstyled output.
pub(crate) fn render_to_string<R: Renderer>(renderer: &R, data: &DisplayData) -> String {
    let mut writer = StringWriter::default();
    renderer.render(&mut writer, data, None).unwrap();
    writer.into_plain_text()
}
