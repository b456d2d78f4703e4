//! Indentation-aware C# source writer.

/// One level of indentation in generated code.
pub const INDENT: &str = "    ";

/// Tool name stamped into every generated file.
pub const GENERATOR_NAME: &str = env!("CARGO_PKG_NAME");

/// Whether `#nullable enable` is understood by the given C# language version.
///
/// Numeric versions from 8 on qualify, as do the symbolic `latest`,
/// `latestmajor` and `preview`.
pub fn supports_nullable(lang_version: &str) -> bool {
    let version = lang_version.trim();
    if ["latest", "latestmajor", "preview"]
        .iter()
        .any(|symbolic| version.eq_ignore_ascii_case(symbolic))
    {
        return true;
    }

    version
        .split('.')
        .next()
        .and_then(|major| major.parse::<u32>().ok())
        .is_some_and(|major| major >= 8)
}

/// Accumulates generated source line by line.
#[derive(Debug)]
pub struct CodeWriter {
    buffer: String,
    depth: usize,
}

impl CodeWriter {
    /// Start a new file with the auto-generated preamble.
    pub fn new(lang_version: &str) -> Self {
        let mut writer = Self {
            buffer: String::new(),
            depth: 0,
        };
        writer.line("// <auto-generated>");
        writer.line(&format!("//     This code was generated by {GENERATOR_NAME}."));
        writer.line("// </auto-generated>");
        if supports_nullable(lang_version) {
            writer.line("#nullable enable");
        }
        writer.blank_line();
        writer
    }

    /// Write one line at the current indentation.
    pub fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.buffer.push_str(INDENT);
        }
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    /// Write an empty line (no trailing indentation).
    pub fn blank_line(&mut self) {
        self.buffer.push('\n');
    }

    /// Write `header` followed by an opening brace and indent.
    pub fn open(&mut self, header: &str) {
        self.line(header);
        self.line("{");
        self.depth += 1;
    }

    /// Dedent and write a closing brace.
    pub fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}
