use msgintro::{FieldInfo, IntrospectError, Introspector, KeepAll, SchemaRegistry};
use msgintro::core::{Time, Value};

// ── helpers ──────────────────────────────────────────────────────────────────

const MARKER_HASH: &str = "4e6ae8b7bba2a5b9bc8d7d8ab3a9c5f1";
const MARKER: &str = "\
uint8 ARROW=0
uint8 CUBE=1
Header header
string ns
int32 id
float64[] scale
bool frame_locked
================================================================================
MSG: std_msgs/Header
uint32 seq
time stamp
string frame_id
";

const COUNT_HASH: &str = "c0ffee";
const COUNT: &str = "uint16 count\n";

fn push_str(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u32).to_le_bytes());
    buf.extend_from_slice(s.as_bytes());
}

fn marker_bytes(seq: u32, ns: &str, scale: &[f64]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&seq.to_le_bytes());
    buf.extend_from_slice(&1_700_000_000u32.to_le_bytes());
    buf.extend_from_slice(&500u32.to_le_bytes());
    push_str(&mut buf, "map");
    push_str(&mut buf, ns);
    buf.extend_from_slice(&(-3i32).to_le_bytes());
    buf.extend_from_slice(&(scale.len() as u32).to_le_bytes());
    for v in scale {
        buf.extend_from_slice(&v.to_le_bytes());
    }
    buf.push(1);
    buf
}

fn session() -> Introspector {
    let mut s = Introspector::new();
    s.register(MARKER_HASH, "visualization_msgs/Marker", MARKER)
        .expect("schema should register");
    s
}

// ── ingest ───────────────────────────────────────────────────────────────────

#[test]
fn ingest_then_read_by_path() {
    let mut s = session();
    s.ingest(MARKER_HASH, &marker_bytes(9, "lane", &[0.5, 2.0]))
        .unwrap();

    assert_eq!(s.get_u32("header.seq"), Some(9));
    assert_eq!(
        s.get_time("header.stamp"),
        Some(Time::new(1_700_000_000, 500))
    );
    assert_eq!(s.get_string("header.frame_id").as_deref(), Some("map"));
    assert_eq!(s.get_string("ns").as_deref(), Some("lane"));
    assert_eq!(s.get_i32("id"), Some(-3));
    assert_eq!(s.array_len("scale"), Some(2));
    assert_eq!(s.get_f64("scale[1]"), Some(2.0));
    assert_eq!(s.get_bool("frame_locked"), Some(true));
    assert_eq!(s.get_number("id"), Some(-3.0));
    assert_eq!(s.get_value("scale[0]"), Some(Value::F64(0.5)));
    assert_eq!(s.current_hash().map(|h| h.as_str()), Some(MARKER_HASH));
}

#[test]
fn new_instance_replaces_offsets() {
    let mut s = session();
    s.ingest(MARKER_HASH, &marker_bytes(1, "a", &[1.0, 2.0, 3.0]))
        .unwrap();
    let first = s.slot("frame_locked").unwrap().offset;

    s.ingest(MARKER_HASH, &marker_bytes(2, "longer", &[])).unwrap();
    let second = s.slot("frame_locked").unwrap().offset;

    assert_eq!(first, 4 + 8 + 7 + 5 + 4 + 4 + 24);
    assert_eq!(second, 4 + 8 + 7 + 10 + 4 + 4);
    assert!(!s.path_exists("scale[0]"));
    assert_eq!(s.get_u32("header.seq"), Some(2));
}

#[test]
fn kind_mismatch_and_missing_path_are_none() {
    let mut s = session();
    s.ingest(MARKER_HASH, &marker_bytes(1, "x", &[])).unwrap();
    assert_eq!(s.get_i64("id"), None);
    assert_eq!(s.get_string("id"), None);
    assert_eq!(s.get_u8("ARROW"), None);
    assert!(!s.path_exists("header"));
    assert!(!s.path_exists("nope"));
}

#[test]
fn ingest_unknown_hash_fails() {
    let mut s = session();
    let err = s.ingest("deadbeef", &[0; 4]).unwrap_err();
    assert!(matches!(err, IntrospectError::UnknownSchema { ref hash } if hash == "deadbeef"));
    assert!(s.layout().is_none());
}

#[test]
fn failed_ingest_clears_instance() {
    let mut s = session();
    s.ingest(MARKER_HASH, &marker_bytes(1, "x", &[])).unwrap();
    assert!(s.path_exists("id"));

    let mut truncated = marker_bytes(1, "x", &[1.0]);
    truncated.truncate(20);
    let err = s.ingest(MARKER_HASH, &truncated).unwrap_err();
    assert!(matches!(err, IntrospectError::Layout { .. }));
    assert!(!s.path_exists("id"));
    assert_eq!(s.get_i32("id"), None);
    assert!(s.current_hash().is_none());
}

#[test]
fn reads_before_ingest_are_none() {
    let s = session();
    assert!(!s.path_exists("id"));
    assert_eq!(s.get_number("id"), None);
    assert!(s.view().is_none());
}

// ── registration ─────────────────────────────────────────────────────────────

#[test]
fn ingest_with_registers_once() {
    let mut s = Introspector::new();
    s.ingest_with(COUNT_HASH, "pkg/Count", COUNT, &7u16.to_le_bytes())
        .unwrap();
    s.ingest_with(COUNT_HASH, "pkg/Count", COUNT, &8u16.to_le_bytes())
        .unwrap();
    assert_eq!(s.get_u16("count"), Some(8));
    assert_eq!(s.registry().parse_count(), 1);
}

#[test]
fn bad_schema_is_reported() {
    let mut s = Introspector::new();
    let err = s.register("h", "pkg/Bad", "uint8[x] data\n").unwrap_err();
    assert!(matches!(
        err,
        IntrospectError::SchemaParse { ref type_name, .. } if type_name == "pkg/Bad"
    ));
    assert!(err.to_string().contains("non-numeric array length"));
    assert!(s.schema().is_none());
}

#[test]
fn evicting_the_instance_schema_drops_the_instance() {
    let mut s = session();
    s.ingest(MARKER_HASH, &marker_bytes(1, "x", &[])).unwrap();
    s.register(COUNT_HASH, "pkg/Count", COUNT).unwrap();

    assert!(!s.is_registered(MARKER_HASH));
    assert!(s.layout().is_none());
    assert_eq!(s.schema().unwrap().type_name(), "pkg/Count");
}

#[test]
fn registering_another_hash_keeps_a_live_instance() {
    let mut s = Introspector::with_registry(SchemaRegistry::with_policy(KeepAll));
    s.register(MARKER_HASH, "visualization_msgs/Marker", MARKER)
        .unwrap();
    s.ingest(MARKER_HASH, &marker_bytes(4, "x", &[])).unwrap();
    s.register(COUNT_HASH, "pkg/Count", COUNT).unwrap();

    assert_eq!(s.get_u32("header.seq"), Some(4));
    assert_eq!(s.schema().unwrap().type_name(), "pkg/Count");
    assert_eq!(
        s.instance_schema().unwrap().type_name(),
        "visualization_msgs/Marker"
    );
}

// ── schema queries ───────────────────────────────────────────────────────────

#[test]
fn list_fields_and_field_info() {
    let s = session();
    let names: Vec<String> = s
        .list_fields("")
        .unwrap()
        .into_iter()
        .map(|f| f.name)
        .collect();
    assert_eq!(names, vec!["header", "ns", "id", "scale", "frame_locked"]);

    assert_eq!(
        s.field_info("scale"),
        Some(FieldInfo {
            name: "scale".to_string(),
            type_name: "float64".to_string(),
            array: "[]".to_string(),
            is_primitive: true,
            path: "scale".to_string(),
        })
    );
    let header = s.field_info("header").unwrap();
    assert_eq!(header.type_name, "std_msgs/Header");
    assert!(!header.is_primitive);
    assert!(s.field_info("header.nope").is_none());
    assert!(s.list_fields("ns.nope").is_none());
}

#[test]
fn printers_render_active_schema() {
    let s = session();
    let components = s.print_components().unwrap();
    assert!(components.starts_with("std_msgs/Header\n"));
    assert!(components.contains("\tconst name = CUBE type = uint8 value = 1\n"));

    let tree = s.print_definition_tree().unwrap();
    assert!(tree.starts_with("name =  type = visualization_msgs/Marker"));
    assert!(tree.contains("\t\tname = frame_id type = string size = 0 array = \n"));
    assert_eq!(s.definition_tree().unwrap().fields().len(), 5);
}
