//! Type Printer - Convert TypeId to TypeScript syntax
//!
//! Output follows `typeToString`: keyword types by name, string literals in
//! double quotes, object types as `{ a: string; b?: number; }`, named types
//! by their declared name plus type arguments.

use crate::interner::TypeInterner;
use crate::types::{FunctionShape, LiteralValue, ObjectShape, TypeData, TypeId};
use tsk_ast::is_identifier_text;
use tsk_common::limits::MAX_TYPE_PRINT_DEPTH;

/// Prints types as TypeScript syntax.
///
/// # Examples
///
/// ```
/// use tsk_checker::{TypeId, TypeInterner, TypePrinter};
///
/// let interner = TypeInterner::new();
/// let printer = TypePrinter::new(&interner);
/// assert_eq!(printer.print_type(TypeId::STRING), "string");
/// assert_eq!(printer.print_type(TypeId::NUMBER), "number");
/// ```
pub struct TypePrinter<'a> {
    interner: &'a TypeInterner,
    max_depth: u32,
}

impl<'a> TypePrinter<'a> {
    pub fn new(interner: &'a TypeInterner) -> Self {
        Self {
            interner,
            max_depth: MAX_TYPE_PRINT_DEPTH,
        }
    }

    /// Nesting beyond `max_depth` prints as `...`.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Convert a TypeId to TypeScript syntax string.
    pub fn print_type(&self, type_id: TypeId) -> String {
        let mut out = String::new();
        self.write_type(&mut out, type_id, 0);
        out
    }

    fn write_type(&self, out: &mut String, type_id: TypeId, depth: u32) {
        if depth > self.max_depth {
            out.push_str("...");
            return;
        }

        let Some(data) = self.interner.lookup(type_id) else {
            out.push_str("any");
            return;
        };

        match data {
            TypeData::Intrinsic(name) => out.push_str(name),
            TypeData::Literal(literal) => self.write_literal(out, &literal),
            TypeData::Array(element) => {
                let needs_parens = matches!(
                    self.interner.get(element),
                    Some(TypeData::Union(_) | TypeData::Function(_))
                );
                if needs_parens {
                    out.push('(');
                }
                self.write_type(out, element, depth + 1);
                if needs_parens {
                    out.push(')');
                }
                out.push_str("[]");
            }
            TypeData::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" | ");
                    }
                    let is_function = matches!(self.interner.get(*member), Some(TypeData::Function(_)));
                    if is_function {
                        out.push('(');
                    }
                    self.write_type(out, *member, depth + 1);
                    if is_function {
                        out.push(')');
                    }
                }
            }
            TypeData::Object(shape) => self.write_object(out, &shape, depth),
            TypeData::Function(shape) => self.write_function(out, &shape, depth),
            TypeData::Interface {
                name,
                type_arguments,
                ..
            }
            | TypeData::Alias {
                name,
                type_arguments,
                ..
            } => {
                out.push_str(&name);
                self.write_type_arguments(out, &type_arguments, depth);
            }
            TypeData::TypeParameter(name) => out.push_str(&name),
        }
    }

    fn write_literal(&self, out: &mut String, literal: &LiteralValue) {
        match literal {
            LiteralValue::String(text) => {
                out.push('"');
                for ch in text.chars() {
                    match ch {
                        '"' => out.push_str("\\\""),
                        '\\' => out.push_str("\\\\"),
                        '\n' => out.push_str("\\n"),
                        _ => out.push(ch),
                    }
                }
                out.push('"');
            }
            LiteralValue::Number(text) => out.push_str(text),
            LiteralValue::Boolean(value) => out.push_str(if *value { "true" } else { "false" }),
        }
    }

    fn write_type_arguments(&self, out: &mut String, args: &[TypeId], depth: u32) {
        if args.is_empty() {
            return;
        }
        out.push('<');
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_type(out, *arg, depth + 1);
        }
        out.push('>');
    }

    fn write_object(&self, out: &mut String, shape: &ObjectShape, depth: u32) {
        if shape.properties.is_empty() {
            out.push_str("{}");
            return;
        }
        out.push_str("{ ");
        for prop in &shape.properties {
            if prop.readonly {
                out.push_str("readonly ");
            }
            if is_identifier_text(&prop.name) || prop.name.parse::<f64>().is_ok() {
                out.push_str(&prop.name);
            } else {
                self.write_literal(out, &LiteralValue::String(prop.name.clone()));
            }
            if prop.optional {
                out.push('?');
            }
            match self.interner.get(prop.type_id) {
                Some(TypeData::Function(func)) if prop.is_method => {
                    self.write_params(out, func, depth + 1);
                    out.push_str(": ");
                    self.write_type(out, func.return_type, depth + 1);
                }
                _ => {
                    out.push_str(": ");
                    self.write_type(out, prop.type_id, depth + 1);
                }
            }
            out.push_str("; ");
        }
        out.push('}');
    }

    fn write_function(&self, out: &mut String, shape: &FunctionShape, depth: u32) {
        self.write_params(out, shape, depth + 1);
        out.push_str(" => ");
        self.write_type(out, shape.return_type, depth + 1);
    }

    fn write_params(&self, out: &mut String, shape: &FunctionShape, depth: u32) {
        out.push('(');
        for (i, param) in shape.params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&param.name);
            if param.optional {
                out.push('?');
            }
            out.push_str(": ");
            self.write_type(out, param.type_id, depth);
        }
        out.push(')');
    }
}
