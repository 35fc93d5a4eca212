//! Line scanner that splits a schema blob into per-type field lists.
//!
//! [`parse_components`] is the public entry point. It runs the resolution
//! pass from [`crate::resolver`] before returning, so every field type in the
//! returned table is either primitive, a table key, or listed in
//! [`ComponentTable::unresolved`].

use msgintro_core::{ArrayShape, PrimitiveKind};

use crate::{
    error::SchemaError,
    lex::{is_separator_line, split_array_suffix, strip_comment},
    resolver::resolve_references,
    table::{ComponentTable, ConstantDescriptor, FieldDescriptor},
};

const DIRECTIVE: &str = "MSG:";

/// Parse `text` into a resolved [`ComponentTable`].
///
/// Lines before the first `MSG:` directive belong to `root_type`.
pub fn parse_components(root_type: &str, text: &str) -> Result<ComponentTable, SchemaError> {
    let mut table = ComponentTable::new();
    let mut current = root_type.to_string();
    table.component_mut(&current);

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;

        if let Some(constant) = parse_constant(raw) {
            table.component_mut(&current).constants.push(constant);
            continue;
        }

        let line = strip_comment(raw).trim();
        if line.is_empty() || is_separator_line(line) {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens[0] == DIRECTIVE {
            let name = tokens
                .get(1)
                .ok_or_else(|| SchemaError::parse(line_no, "`MSG:` directive without a type name"))?;
            current = name.to_string();
            table.component_mut(&current);
            continue;
        }

        let field = parse_field(line_no, line, &tokens)?;
        table.component_mut(&current).fields.push(field);
    }

    resolve_references(&mut table);
    Ok(table)
}

fn parse_field(
    line_no: usize,
    line: &str,
    tokens: &[&str],
) -> Result<FieldDescriptor, SchemaError> {
    if line.contains('=') {
        return Err(SchemaError::parse(
            line_no,
            format!("unexpected '=' in field line: {line}"),
        ));
    }
    let [type_token, name, ..] = tokens else {
        return Err(SchemaError::parse(
            line_no,
            format!("expected '<type> <name>', got: {line}"),
        ));
    };

    let (type_name, array) = split_array_suffix(type_token);
    if type_name.is_empty() {
        return Err(SchemaError::parse(
            line_no,
            format!("missing type name: {line}"),
        ));
    }
    ArrayShape::parse(array).map_err(|source| SchemaError::ArrayIndicator {
        line: line_no,
        source,
    })?;

    Ok(FieldDescriptor::new(type_name, array, *name))
}

/// Recognize `type NAME=value` where `type` is a builtin.
///
/// Works on the raw line: string constant values may contain `#`, so the
/// comment is only stripped from non-string values.
fn parse_constant(raw: &str) -> Option<ConstantDescriptor> {
    let (decl, value) = raw.split_once('=')?;
    if decl.contains('#') {
        return None;
    }
    let tokens: Vec<&str> = decl.split_whitespace().collect();
    let [type_name, name] = tokens.as_slice() else {
        return None;
    };
    let kind = PrimitiveKind::from_type_name(type_name)?;

    let value = if kind == PrimitiveKind::String {
        value.trim()
    } else {
        strip_comment(value).trim()
    };
    Some(ConstantDescriptor {
        type_name: type_name.to_string(),
        name: name.to_string(),
        value: value.to_string(),
    })
}
