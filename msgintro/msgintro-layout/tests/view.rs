use msgintro_core::{Duration, PrimitiveKind, Time, Value};
use msgintro_layout::{Layout, MessageView};
use msgintro_msg::MessageSchema;

// ── helpers ──────────────────────────────────────────────────────────────────

const SCALARS: &str = "\
bool flag
int8 i8v
int16 i16v
int32 i32v
int64 i64v
uint8 u8v
uint16 u16v
uint32 u32v
uint64 u64v
float32 f32v
float64 f64v
time stamp
duration span
string label
";

fn scalars_bytes(label: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.push(2);
    buf.extend_from_slice(&(-5i8).to_le_bytes());
    buf.extend_from_slice(&(-300i16).to_le_bytes());
    buf.extend_from_slice(&(-70_000i32).to_le_bytes());
    buf.extend_from_slice(&(-5_000_000_000i64).to_le_bytes());
    buf.extend_from_slice(&250u8.to_le_bytes());
    buf.extend_from_slice(&60_000u16.to_le_bytes());
    buf.extend_from_slice(&4_000_000_000u32.to_le_bytes());
    buf.extend_from_slice(&u64::MAX.to_le_bytes());
    buf.extend_from_slice(&1.5f32.to_le_bytes());
    buf.extend_from_slice(&(-2.25f64).to_le_bytes());
    buf.extend_from_slice(&10u32.to_le_bytes());
    buf.extend_from_slice(&250_000_000u32.to_le_bytes());
    buf.extend_from_slice(&3u32.to_le_bytes());
    buf.extend_from_slice(&500_000_000u32.to_le_bytes());
    buf.extend_from_slice(&(label.len() as u32).to_le_bytes());
    buf.extend_from_slice(label);
    buf
}

fn with_view<R>(text: &str, buf: &[u8], f: impl FnOnce(MessageView<'_>) -> R) -> R {
    let schema = MessageSchema::parse("test_msgs/Scalars", text).expect("schema should parse");
    let layout = Layout::build(schema.tree(), buf).expect("layout should build");
    f(MessageView::new(&layout, buf))
}

// ── typed getters ────────────────────────────────────────────────────────────

#[test]
fn typed_getters_decode_little_endian() {
    let buf = scalars_bytes(b"hello");
    with_view(SCALARS, &buf, |v| {
        assert_eq!(v.get_bool("flag"), Some(true));
        assert_eq!(v.get_i8("i8v"), Some(-5));
        assert_eq!(v.get_i16("i16v"), Some(-300));
        assert_eq!(v.get_i32("i32v"), Some(-70_000));
        assert_eq!(v.get_i64("i64v"), Some(-5_000_000_000));
        assert_eq!(v.get_u8("u8v"), Some(250));
        assert_eq!(v.get_u16("u16v"), Some(60_000));
        assert_eq!(v.get_u32("u32v"), Some(4_000_000_000));
        assert_eq!(v.get_u64("u64v"), Some(u64::MAX));
        assert_eq!(v.get_f32("f32v"), Some(1.5));
        assert_eq!(v.get_f64("f64v"), Some(-2.25));
        assert_eq!(v.get_time("stamp"), Some(Time::new(10, 250_000_000)));
        assert_eq!(v.get_duration("span"), Some(Duration::new(3, 500_000_000)));
        assert_eq!(v.get_string("label").as_deref(), Some("hello"));
    });
}

#[test]
fn kind_mismatch_is_none() {
    let buf = scalars_bytes(b"x");
    with_view(SCALARS, &buf, |v| {
        assert!(v.path_exists("i32v"));
        assert_eq!(v.get_u32("i32v"), None);
        assert_eq!(v.get_f64("f32v"), None);
        assert_eq!(v.get_string("u8v"), None);
        assert_eq!(v.get_duration("stamp"), None);
        assert_eq!(v.get_bool("u8v"), None);
    });
}

#[test]
fn missing_path_is_none() {
    let buf = scalars_bytes(b"x");
    with_view(SCALARS, &buf, |v| {
        assert!(!v.path_exists("nope"));
        assert_eq!(v.get_i32("nope"), None);
        assert_eq!(v.get_number("nope"), None);
        assert_eq!(v.get_value("nope"), None);
        assert_eq!(v.slot("nope"), None);
    });
}

#[test]
fn bool_is_any_nonzero_byte() {
    with_view("bool a\nbool b\n", &[0, 0x80], |v| {
        assert_eq!(v.get_bool("a"), Some(false));
        assert_eq!(v.get_bool("b"), Some(true));
    });
}

// ── strings ──────────────────────────────────────────────────────────────────

#[test]
fn string_bytes_exclude_prefix() {
    let buf = scalars_bytes(b"abc");
    with_view(SCALARS, &buf, |v| {
        assert_eq!(v.get_string_bytes("label"), Some(&b"abc"[..]));
        assert_eq!(v.slot("label").map(|s| s.kind), Some(PrimitiveKind::String));
    });
}

#[test]
fn invalid_utf8_string_is_none_but_bytes_remain() {
    let buf = scalars_bytes(&[0xff, 0xfe]);
    with_view(SCALARS, &buf, |v| {
        assert_eq!(v.get_string("label"), None);
        assert_eq!(v.get_string_bytes("label"), Some(&[0xff, 0xfe][..]));
        assert!(v.get_number("label").unwrap().is_nan());
    });
}

#[test]
fn empty_string_is_some() {
    with_view("string s\n", &[0, 0, 0, 0], |v| {
        assert_eq!(v.get_string("s").as_deref(), Some(""));
    });
}

// ── numeric coercion ─────────────────────────────────────────────────────────

#[test]
fn get_number_coerces_every_kind() {
    let buf = scalars_bytes(b" 12.5 ");
    with_view(SCALARS, &buf, |v| {
        assert_eq!(v.get_number("flag"), Some(1.0));
        assert_eq!(v.get_number("i16v"), Some(-300.0));
        assert_eq!(v.get_number("u32v"), Some(4_000_000_000.0));
        assert_eq!(v.get_number("f32v"), Some(1.5));
        assert_eq!(v.get_number("stamp"), Some(10.25));
        assert_eq!(v.get_number("span"), Some(3.5));
        assert_eq!(v.get_number("label"), Some(12.5));
    });
}

#[test]
fn get_number_of_non_numeric_string_is_nan() {
    let buf = scalars_bytes(b"twelve");
    with_view(SCALARS, &buf, |v| {
        let n = v.get_number("label");
        assert!(n.is_some_and(f64::is_nan));
    });
}

#[test]
fn get_value_matches_stored_kind() {
    let buf = scalars_bytes(b"hi");
    with_view(SCALARS, &buf, |v| {
        assert_eq!(v.get_value("u16v"), Some(Value::U16(60_000)));
        assert_eq!(v.get_value("label"), Some(Value::string("hi")));
        assert_eq!(
            v.get_value("stamp"),
            Some(Value::Time(Time::new(10, 250_000_000)))
        );
        let values: Vec<Value> = v
            .layout()
            .slots()
            .filter_map(|(path, _)| v.get_value(path))
            .collect();
        assert_eq!(values.len(), 14);
        assert!(
            values
                .iter()
                .zip(v.layout().slots())
                .all(|(val, (_, slot))| val.kind() == slot.kind)
        );
    });
}

// ── arrays ───────────────────────────────────────────────────────────────────

#[test]
fn indexed_paths_read_elements() {
    let mut buf = 2u32.to_le_bytes().to_vec();
    buf.extend_from_slice(&7i32.to_le_bytes());
    buf.extend_from_slice(&(-8i32).to_le_bytes());
    with_view("int32[] values\n", &buf, |v| {
        assert_eq!(v.array_len("values"), Some(2));
        assert_eq!(v.get_i32("values[0]"), Some(7));
        assert_eq!(v.get_i32("values[1]"), Some(-8));
        assert_eq!(v.get_i32("values[2]"), None);
        assert_eq!(v.get_i32("values"), None);
    });
}

#[test]
fn view_over_shorter_buffer_reads_nothing_past_end() {
    let schema = MessageSchema::parse("pkg/W", "uint32 a\nuint64 b\n").unwrap();
    let full = [1, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0];
    let layout = Layout::build(schema.tree(), &full).unwrap();
    let view = MessageView::new(&layout, &full[..6]);
    assert_eq!(view.get_u32("a"), Some(1));
    assert_eq!(view.get_u64("b"), None);
}
