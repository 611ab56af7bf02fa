//! Tests for the auto-typing decoder and record codec

use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use typeval::*;

#[test]
fn test_numeric_literals() {
    assert_eq!(decode_value("4"), Value::int(4));
    assert_eq!(decode_value("-4"), Value::int(-4));
    assert_eq!(decode_value("4.0"), Value::int(4));
    assert_eq!(decode_value("2.5"), Value::float(2.5));
    assert_eq!(decode_value("1e3"), Value::int(1000));
    assert_eq!(decode_value("0.00"), Value::int(0));
}

#[test]
fn test_unit_suffixes() {
    assert_eq!(decode_value("4kb"), Value::int(4 * 1024));
    assert_eq!(decode_value("4KB"), Value::int(4 * 1024));
    assert_eq!(decode_value("4mb"), Value::int(4 * 1024 * 1024));
    assert_eq!(decode_value("4gb"), Value::int(4 * 1024 * 1024 * 1024));
    assert_eq!(decode_value("4tb"), Value::int(4 * (1i64 << 40)));
    assert_eq!(decode_value("4pb"), Value::int(4 * (1i64 << 50)));
    assert_eq!(decode_value("3922492kb"), Value::int(3922492 * 1024));
    // fractional base values multiply before normalizing
    assert_eq!(decode_value("1.5kb"), Value::int(1536));
    // a suffix without a numeric base is a string
    assert_eq!(decode_value("kb"), Value::string("kb"));
    assert_eq!(decode_value("akb"), Value::string("akb"));
}

#[test]
fn test_list_literals() {
    assert_eq!(decode_value("[]"), Value::empty_list());
    assert_eq!(
        decode_value("[1,2]"),
        Value::list(vec![Value::int(1), Value::int(2)])
    );
    // a comma inside quotes does not split
    assert_eq!(
        decode_value(r#"[1,2,"a,b"]"#),
        Value::list(vec![Value::int(1), Value::int(2), Value::string("a,b")])
    );
    // elements are decoded recursively
    assert_eq!(
        decode_value(r#"[true,[1]]"#),
        Value::list(vec![Value::Bool(true), Value::list(vec![Value::int(1)])])
    );
}

#[test]
fn test_boolean_literals() {
    assert_eq!(decode_value("true"), Value::Bool(true));
    assert_eq!(decode_value("FALSE"), Value::Bool(false));
    assert_eq!(decode_value("True"), Value::Bool(true));
}

#[test]
fn test_string_fallback() {
    assert_eq!(decode_value("free"), Value::string("free"));
    assert_eq!(decode_value("4x4"), Value::string("4x4"));
}

#[test]
fn test_quoted_token_is_forced_string() {
    assert_eq!(decode_value(r#""free""#), Value::string("free"));
    // quoting suppresses the numeric and boolean rules
    assert_eq!(decode_value(r#""4""#), Value::string("4"));
    assert_eq!(decode_value(r#""true""#), Value::string("true"));
    assert_eq!(decode_value(r#""a\"b""#), Value::string("a\"b"));
}

#[test]
fn test_record_decoding() {
    let vars = decode_record(r#"ncpus=4;state="free";queues=[];"#).unwrap();
    assert_eq!(vars.len(), 3);
    assert_eq!(vars["ncpus"], Value::int(4));
    assert_eq!(vars["state"], Value::string("free"));
    assert_eq!(vars["queues"], Value::empty_list());
}

#[test]
fn test_record_empty_value_is_empty_string() {
    let vars = decode_record("jobs=;ncpus=4;").unwrap();
    assert_eq!(vars["jobs"], Value::string(""));
    assert_eq!(vars["ncpus"], Value::int(4));
}

#[test]
fn test_record_quoted_value_may_contain_semicolons() {
    let vars = decode_record(r#"uname="Linux node1; x86_64";state=free;"#).unwrap();
    assert_eq!(vars["uname"], Value::string("Linux node1; x86_64"));
    assert_eq!(vars["state"], Value::string("free"));
}

#[test]
fn test_record_preserves_key_order() {
    let vars = decode_record("b=1;a=2;c=3;").unwrap();
    let keys: Vec<&str> = vars.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["b", "a", "c"]);
}

#[test]
fn test_malformed_record() {
    assert!(matches!(
        decode_record("ncpus=4;=bad;"),
        Err(EvalError::MalformedRecord { .. })
    ));
    assert!(matches!(
        decode_record("ncpus"),
        Err(EvalError::MalformedRecord { .. })
    ));
    assert!(matches!(
        decode_record("ncpus=4;;state=free;"),
        Err(EvalError::MalformedRecord { .. })
    ));
}

#[test]
fn test_record_leading_trailing_separators_tolerated() {
    let vars = decode_record("  ;;ncpus=4;state=free;;  ").unwrap();
    assert_eq!(vars["ncpus"], Value::int(4));
    assert_eq!(vars["state"], Value::string("free"));
}

#[test]
fn test_probe_record() {
    // the shape reported by a PBS-style monitoring probe
    let text = concat!(
        "hostname=\"pbsnode01\";rectime=1416575227;varattr=;jobs=;state=free;",
        "loadave=0.00;ncpus=1;physmem=503484kb;availmem=445812kb;idletime=1173;",
        "sessions=\"1070 1002\";opsys=linux;queues=[];properties=[\"q1\"];",
    );
    let vars = decode_record(text).unwrap();
    assert_eq!(vars["hostname"], Value::string("pbsnode01"));
    assert_eq!(vars["rectime"], Value::int(1416575227));
    assert_eq!(vars["state"], Value::string("free"));
    assert_eq!(vars["loadave"], Value::int(0));
    assert_eq!(vars["physmem"], Value::int(503484 * 1024));
    assert_eq!(vars["sessions"], Value::string("1070 1002"));
    assert_eq!(vars["queues"], Value::empty_list());
    assert_eq!(vars["properties"], Value::list(vec![Value::string("q1")]));
}

#[test]
fn test_encode_record_round_trip() {
    let mut vars = IndexMap::new();
    vars.insert("ncpus".to_string(), Value::int(4));
    vars.insert("state".to_string(), Value::string("free"));
    vars.insert(
        "queues".to_string(),
        Value::list(vec![Value::string("q1"), Value::string("q2")]),
    );
    vars.insert("busy".to_string(), Value::Bool(false));

    let text = encode_record(&vars);
    assert_eq!(
        text,
        r#"ncpus=4;state="free";queues=["q1","q2"];busy=false;"#
    );
    assert_eq!(decode_record(&text).unwrap(), vars);
}

#[test]
fn test_encode_record_unknown_is_empty() {
    let mut vars = IndexMap::new();
    vars.insert("varattr".to_string(), Value::Unknown);
    assert_eq!(encode_record(&vars), "varattr=;");
}
