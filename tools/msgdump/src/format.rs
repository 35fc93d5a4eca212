use std::fmt::Write as _;

use clap::ValueEnum;
use msgintro::{core::Value, layout::Layout};

#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    Text,
    Csv,
}

/// Render every slot of `layout`, one row per field in buffer order.
pub fn format_offsets(layout: &Layout, format: OutputFormat) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    match format {
        OutputFormat::Text => {
            for (path, slot) in layout.slots() {
                writeln!(out, "{:>8}  {:<10} {path}", slot.offset, slot.kind)?;
            }
            write!(
                out,
                "consumed {} of {} bytes",
                layout.consumed(),
                layout.buffer_len()
            )?;
        }
        OutputFormat::Csv => {
            out.push_str("offset,kind,path");
            for (path, slot) in layout.slots() {
                write!(out, "\n{},{},{path}", slot.offset, slot.kind)?;
            }
        }
    }
    Ok(out)
}

pub fn format_value(value: &Value) -> String {
    match value {
        Value::Bool(v) => v.to_string(),
        Value::I8(v) => v.to_string(),
        Value::I16(v) => v.to_string(),
        Value::I32(v) => v.to_string(),
        Value::I64(v) => v.to_string(),
        Value::U8(v) => v.to_string(),
        Value::U16(v) => v.to_string(),
        Value::U32(v) => v.to_string(),
        Value::U64(v) => v.to_string(),
        Value::F32(v) => v.to_string(),
        Value::F64(v) => v.to_string(),
        Value::String(s) => format!("{s:?}"),
        Value::Time(t) => format!("{}.{:09}", t.sec, t.nsec),
        Value::Duration(d) => format!("{}.{:09}s", d.sec, d.nsec),
    }
}

#[cfg(test)]
mod tests {
    use msgintro::{core::Time, msg::MessageSchema};

    use super::*;

    #[test]
    fn csv_lists_slots_in_buffer_order() {
        let schema = MessageSchema::parse("pkg/M", "uint8 a\nstring b\n").unwrap();
        let buf = [1, 1, 0, 0, 0, b'x'];
        let layout = Layout::build(schema.tree(), &buf).unwrap();
        let text = format_offsets(&layout, OutputFormat::Csv).unwrap();
        assert_eq!(text, "offset,kind,path\n0,uint8,a\n1,string,b");
    }

    #[test]
    fn time_is_seconds_dot_nanos() {
        assert_eq!(format_value(&Value::Time(Time::new(3, 5))), "3.000000005");
        assert_eq!(format_value(&Value::string("hi")), "\"hi\"");
    }
}
