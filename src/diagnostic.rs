use std::fmt;

/// A range of bytes in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    Primary,
    Secondary,
}

/// A message attached to a span of the source.
#[derive(Debug, Clone)]
pub struct Label {
    pub span: Span,
    pub message: String,
    pub style: LabelStyle,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            style: LabelStyle::Primary,
        }
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            style: LabelStyle::Secondary,
        }
    }
}

/// A renderable report about one failure.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: Option<String>,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.notes.push(format!("help: {}", help.into()));
        self
    }
}

/// Computes a 1-based line and column from a byte offset.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

fn line_content(source: &str, line_num: usize) -> Option<&str> {
    source.lines().nth(line_num - 1)
}

/// Renders diagnostics against their source in the style of rustc output.
pub struct DiagnosticRenderer<'a> {
    source: &'a str,
    file_name: &'a str,
    use_color: bool,
}

impl<'a> DiagnosticRenderer<'a> {
    pub fn new(source: &'a str, file_name: &'a str, use_color: bool) -> Self {
        Self {
            source,
            file_name,
            use_color,
        }
    }

    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let mut output = String::new();

        let severity = match diagnostic.severity {
            Severity::Error => self.paint("1;31", "error"),
            Severity::Warning => self.paint("1;33", "warning"),
        };
        match &diagnostic.code {
            Some(code) => output.push_str(&format!(
                "{}[{}]: {}\n",
                severity,
                code,
                self.paint("1", &diagnostic.message)
            )),
            None => output.push_str(&format!(
                "{}: {}\n",
                severity,
                self.paint("1", &diagnostic.message)
            )),
        }

        if let Some(label) = diagnostic.labels.first() {
            let (line, col) = line_col(self.source, label.span.start);
            output.push_str(&format!(
                "  {} {}:{}:{}\n",
                self.paint("34", "-->"),
                self.file_name,
                line,
                col
            ));
        }

        for label in &diagnostic.labels {
            self.render_label(&mut output, label);
        }

        for note in &diagnostic.notes {
            output.push_str(&format!("  {} {}\n", self.paint("34", "="), note));
        }

        output
    }

    fn render_label(&self, output: &mut String, label: &Label) {
        let (line, col) = line_col(self.source, label.span.start);
        let content = match line_content(self.source, line) {
            Some(content) => content,
            None => return,
        };

        let gutter = line.to_string();
        let pad = " ".repeat(gutter.len());
        output.push_str(&format!("{} {}\n", pad, self.paint("34", "|")));
        output.push_str(&format!(
            "{} {} {}\n",
            self.paint("34", &gutter),
            self.paint("34", "|"),
            content
        ));

        // Underline the labelled range, clamped to this line.
        let width = label.span.end.saturating_sub(label.span.start).max(1);
        let width = width.min(content.len().saturating_sub(col - 1).max(1));
        let marker = match label.style {
            LabelStyle::Primary => "^".repeat(width),
            LabelStyle::Secondary => "-".repeat(width),
        };
        let color = match label.style {
            LabelStyle::Primary => "31",
            LabelStyle::Secondary => "34",
        };
        let mut underline = format!(
            "{} {} {}{}",
            pad,
            self.paint("34", "|"),
            " ".repeat(col - 1),
            self.paint(color, &marker)
        );
        if !label.message.is_empty() {
            underline.push(' ');
            underline.push_str(&self.paint(color, &label.message));
        }
        underline.push('\n');
        output.push_str(&underline);
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_color {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let source = "do(a,\n   b)";
        assert_eq!(line_col(source, 0), (1, 1));
        assert_eq!(line_col(source, 3), (1, 4));
        assert_eq!(line_col(source, 6), (2, 1));
        assert_eq!(line_col(source, 9), (2, 4));
    }

    #[test]
    fn test_span_merge() {
        let merged = Span::new(5, 10).merge(Span::new(8, 15));
        assert_eq!(merged, Span::new(5, 15));
    }

    #[test]
    fn test_render_plain() {
        let source = "undefinedName";
        let diagnostic = Diagnostic::error("unbound name `undefinedName`")
            .with_code("E0201")
            .with_label(Label::primary(Span::new(0, 13), "not defined"))
            .with_help("define it first");

        let renderer = DiagnosticRenderer::new(source, "program", false);
        let output = renderer.render(&diagnostic);

        assert!(output.contains("error[E0201]"));
        assert!(output.contains("program:1:1"));
        assert!(output.contains("^^^^^^^^^^^^^"));
        assert!(output.contains("help: define it first"));
    }

    #[test]
    fn test_render_second_line() {
        let source = "do(1,\n   oops)";
        let diagnostic = Diagnostic::error("unbound name `oops`")
            .with_label(Label::primary(Span::new(9, 13), ""));

        let renderer = DiagnosticRenderer::new(source, "program", false);
        let output = renderer.render(&diagnostic);

        assert!(output.contains("program:2:4"));
        assert!(output.contains("   oops)"));
    }
}
