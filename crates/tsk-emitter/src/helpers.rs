use crate::printer::Printer;
use tsk_ast::{NodeAccess, NodeIndex, NodeList};

impl<'a> Printer<'a> {
    // =========================================================================
    // Output Helpers
    // =========================================================================

    pub(crate) fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    /// Write `text` as a double-quoted string literal.
    pub(crate) fn write_quoted(&mut self, text: &str) {
        self.output.push('"');
        for c in text.chars() {
            match c {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                '\0' => self.output.push_str("\\0"),
                c if (c as u32) < 0x20 || c == '\x7F' => {
                    self.output.push_str(&format!("\\u{:04X}", c as u32));
                }
                _ => self.output.push(c),
            }
        }
        self.output.push('"');
    }

    pub(crate) fn write_line(&mut self) {
        self.output.push('\n');
    }

    pub(crate) fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(self.indent_str);
        }
    }

    pub(crate) fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub(crate) fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    // =========================================================================
    // Identifier Helpers
    // =========================================================================

    pub(crate) fn write_identifier_text(&mut self, idx: NodeIndex) {
        if let Some(text) = self.arena.get_identifier_text(idx) {
            self.write(text);
        }
    }

    /// Identifier, string literal or numeric literal used as a name.
    pub(crate) fn write_property_name(&mut self, idx: NodeIndex) {
        let arena = self.arena;
        if let Some(text) = arena.get_identifier_text(idx) {
            self.write(text);
        } else if let Some(node) = arena.get(idx)
            && node.kind == tsk_ast::SyntaxKind::StringLiteral as u16
            && let Some(text) = arena.get_literal_text(idx)
        {
            self.write_quoted(text);
        } else if let Some(text) = arena.get_literal_text(idx) {
            self.write(text);
        }
    }

    // =========================================================================
    // Lists
    // =========================================================================

    /// `a, b, c` using `emit` for each element.
    pub(crate) fn write_comma_list(&mut self, list: &NodeList, emit: fn(&mut Self, NodeIndex)) {
        for (i, item) in list.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            emit(self, item);
        }
    }

    /// `<T, U>`; nothing for `None`.
    pub(crate) fn write_type_list(&mut self, list: Option<&NodeList>) {
        let Some(list) = list else {
            return;
        };
        self.write("<");
        self.write_comma_list(list, Self::emit_node);
        self.write(">");
    }
}
