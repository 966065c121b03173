use std::borrow::Cow;
use std::fs;

use super::*;
use crate::bencode;
use crate::quark::{Key, QuarkTable};
use crate::variant::{Dict, Variant};

fn lean(value: &Variant<'_>) -> String {
    String::from_utf8(encode(value, JsonStyle::Lean).unwrap()).unwrap()
}

fn single_string(input: &[u8]) -> (Vec<u8>, usize) {
    let parsed = parse(input).unwrap();
    let list = parsed.value.as_list().unwrap();
    assert_eq!(list.len(), 1);
    (list[0].as_str().unwrap().to_vec(), parsed.end)
}

#[test]
fn test_decode_strings() {
    let cases: &[(&str, &[u8])] = &[
        (r#"[""]"#, b""),
        (r#"["\u0000"]"#, b"\0"),
        (r#"["\b\f\t\r\n\"\\/"]"#, b"\x08\x0c\t\r\n\"\\/"),
        (r#"["te\u0000st"]"#, b"te\0st"),
        (r#"["\u000"]"#, b"\\u000"),
        (r#"["\u00"]"#, b"\\u00"),
        (r#"["\u0"]"#, b"\\u0"),
        (r#"["\u"]"#, b"\\u"),
        (r#"["hello"]"#, b"hello"),
        (r#"["\u0068\u0065\u006c\u006c\u006f"]"#, b"hello"),
        (r#"["h\u0065l\u006co"]"#, b"hello"),
        (r#"["привет"]"#, "привет".as_bytes()),
        (r#"["п\u0440и\u0432е\u0442"]"#, "привет".as_bytes()),
        (r#"["喂"]"#, "喂".as_bytes()),
        (r#"["\u5582"]"#, "喂".as_bytes()),
        (r#"["😂"]"#, "😂".as_bytes()),
        (r#"["\ud83d\ude02"]"#, "😂".as_bytes()),
        (r#"["\uD83D\uDE02"]"#, "😂".as_bytes()),
    ];

    for (input, expected) in cases {
        let (output, end) = single_string(input.as_bytes());
        assert_eq!(output, *expected, "decoding {}", input);
        assert_eq!(end, input.len(), "end of {}", input);
    }
}

#[test]
fn test_decode_lone_surrogates() {
    let replacement = "\u{fffd}".as_bytes();

    let (output, _) = single_string(br#"["\ud83d"]"#);
    assert_eq!(output, replacement);

    let (output, _) = single_string(br#"["\ude02x"]"#);
    assert_eq!(output, [replacement, b"x"].concat());

    let (output, _) = single_string(br#"["\ud83d\u0041"]"#);
    assert_eq!(output, [replacement, b"A"].concat());
}

#[test]
fn test_unescaped_strings_are_borrowed() {
    let parsed = parse(br#"["plain", "esc\/aped"]"#).unwrap();
    let list = parsed.value.as_list().unwrap();
    assert!(matches!(list[0], Variant::Str(Cow::Borrowed(_))));
    assert!(matches!(list[1], Variant::Str(Cow::Owned(_))));
    assert_eq!(list[1].as_utf8(), Ok("esc/aped"));
}

#[test]
fn test_encode_strings() {
    let cases: &[(&[u8], &str)] = &[
        (b"", "[\"\"]\n"),
        (b"\0", "[\"\\u0000\"]\n"),
        (b"\x08\x0c\t\r\n\"\\/", "[\"\\b\\f\\t\\r\\n\\\"\\\\/\"]\n"),
        (b"te\0st", "[\"te\\u0000st\"]\n"),
        (b"hello", "[\"hello\"]\n"),
        (
            "привет".as_bytes(),
            "[\"\\u043f\\u0440\\u0438\\u0432\\u0435\\u0442\"]\n",
        ),
        ("喂".as_bytes(), "[\"\\u5582\"]\n"),
        ("😂".as_bytes(), "[\"\\ud83d\\ude02\"]\n"),
        (b"\x01\x1f\x7f", "[\"\\u0001\\u001f\\u007f\"]\n"),
        (b"a\xffb", "[\"a\\ufffdb\"]\n"),
    ];

    for (input, expected) in cases {
        let value = Variant::from(vec![Variant::str(*input)]);
        assert_eq!(lean(&value), *expected);
    }
}

#[test]
fn test_string_roundtrip() {
    let text = "tab\there \"quoted\" 😂 喂 \u{1}".as_bytes();
    let value = Variant::from(vec![Variant::str(text)]);

    let json = encode(&value, JsonStyle::Lean).unwrap();
    assert!(json.is_ascii());

    let back = decode(&json).unwrap();
    assert_eq!(back.as_list().unwrap()[0].as_str(), Ok(text));
}

fn snippet(benc: &[u8]) -> String {
    let value = bencode::decode(benc).unwrap();
    let json = encode(&value, JsonStyle::Pretty).unwrap();
    String::from_utf8(json)
        .unwrap()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

#[test]
fn test_bencode_to_json() {
    assert_eq!(snippet(b"i6e"), "6");
    assert_eq!(snippet(b"d5:helloi1e5:worldi2ee"), r#"{"hello":1,"world":2}"#);
    assert_eq!(
        snippet(b"d5:helloi1e5:worldi2e3:fooli1ei2ei3eee"),
        r#"{"foo":[1,2,3],"hello":1,"world":2}"#
    );
    assert_eq!(
        snippet(b"d5:helloi1e5:worldi2e3:fooli1ei2ei3ed1:ai0eeee"),
        r#"{"foo":[1,2,3,{"a":0}],"hello":1,"world":2}"#
    );
    assert_eq!(
        snippet(b"d4:argsd6:statusle7:status2lee6:result7:successe"),
        r#"{"args":{"status":[],"status2":[]},"result":"success"}"#
    );
}

#[test]
fn test_pretty_layout() {
    let value = bencode::decode(b"d4:argsd6:statusli1ei2ee7:status2dee6:result7:successe").unwrap();
    let pretty = String::from_utf8(encode(&value, JsonStyle::Pretty).unwrap()).unwrap();
    let expected = concat!(
        "{\n",
        "    \"args\": {\n",
        "        \"status\": [\n",
        "            1,\n",
        "            2\n",
        "        ],\n",
        "        \"status2\": {}\n",
        "    },\n",
        "    \"result\": \"success\"\n",
        "}\n",
    );
    assert_eq!(pretty, expected);

    assert_eq!(
        lean(&value),
        "{\"args\":{\"status\":[1,2],\"status2\":{}},\"result\":\"success\"}\n"
    );
}

#[test]
fn test_encode_scalars() {
    assert_eq!(lean(&Variant::Null), "null\n");
    assert_eq!(lean(&Variant::Bool(true)), "true\n");
    assert_eq!(lean(&Variant::Bool(false)), "false\n");
    assert_eq!(lean(&Variant::Int(-42)), "-42\n");
    assert_eq!(lean(&Variant::Real(0.5)), "0.5000\n");
    assert_eq!(lean(&Variant::Real(1.23456)), "1.2346\n");
    assert_eq!(lean(&Variant::Real(3.0)), "3\n");
    assert_eq!(lean(&Variant::Real(2.999999)), "3\n");
    assert_eq!(lean(&Variant::Real(-0.0)), "0\n");
    assert_eq!(lean(&Variant::Real(f64::NAN)), "null\n");
    assert_eq!(lean(&Variant::Real(f64::INFINITY)), "null\n");
}

#[test]
fn test_decode_values() {
    let value = decode(
        br#" {
            "int": 42, "neg": -7, "zero": 0,
            "real": 0.25, "exp": 1e3, "big": 9223372036854775808,
            "yes": true, "no": false, "none": null,
            "list": [1, [], {}]
        } "#,
    )
    .unwrap();
    let dict = value.as_dict().unwrap();
    let find = |name: &str| dict.get(crate::quark::Quark::new(name)).unwrap();

    assert_eq!(find("int"), &Variant::Int(42));
    assert_eq!(find("neg"), &Variant::Int(-7));
    assert_eq!(find("zero"), &Variant::Int(0));
    assert_eq!(find("real"), &Variant::Real(0.25));
    assert_eq!(find("exp"), &Variant::Real(1000.0));
    assert_eq!(find("big"), &Variant::Real(9223372036854775808.0));
    assert_eq!(find("yes"), &Variant::Bool(true));
    assert_eq!(find("no"), &Variant::Bool(false));
    assert!(find("none").is_null());

    let list = find("list").as_list().unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list[1].as_list().map(Vec::len), Ok(0));
    assert_eq!(list[2].as_dict().map(Dict::len), Ok(0));
}

#[test]
fn test_duplicate_keys_keep_last() {
    let value = decode(br#"{"port": 1, "port": 2}"#).unwrap();
    let dict = value.as_dict().unwrap();
    assert_eq!(dict.len(), 1);
    assert_eq!(dict.find_int(Key::Port), Ok(2));
}

#[test]
fn test_parse_end_offset() {
    let parsed = parse(b"  [1, 2]  extra").unwrap();
    assert_eq!(parsed.end, 8);

    let parsed = parse(b"01").unwrap();
    assert_eq!(parsed.value, Variant::Int(0));
    assert_eq!(parsed.end, 1);

    match decode(b"01") {
        Err(JsonError::TrailingData { offset }) => assert_eq!(offset, 1),
        other => panic!("expected trailing data, got {:?}", other),
    }
    assert!(decode(b"[1, 2]\n").is_ok());
}

#[test]
fn test_parse_errors() {
    assert!(matches!(parse(b""), Err(JsonError::EmptyInput)));
    assert!(matches!(parse(b" \n\t"), Err(JsonError::EmptyInput)));
    assert!(matches!(parse(b"["), Err(JsonError::UnterminatedContainer)));
    assert!(matches!(parse(b"{\"a\": [1"), Err(JsonError::UnterminatedContainer)));
    assert!(matches!(
        parse(b"[1,]"),
        Err(JsonError::UnexpectedByte { byte: b']', offset: 3 })
    ));
    assert!(matches!(
        parse(b"[1 2]"),
        Err(JsonError::UnexpectedByte { byte: b'2', offset: 3 })
    ));
    assert!(matches!(
        parse(b"{1: 2}"),
        Err(JsonError::UnexpectedByte { byte: b'1', offset: 1 })
    ));
    assert!(matches!(
        parse(b"{\"a\" 1}"),
        Err(JsonError::UnexpectedByte { byte: b'1', offset: 5 })
    ));
    assert!(matches!(
        parse(b"[1}"),
        Err(JsonError::UnexpectedByte { byte: b'}', offset: 2 })
    ));
    assert!(matches!(
        parse(b"{\"a\": 1]"),
        Err(JsonError::UnexpectedByte { byte: b']', offset: 7 })
    ));
    assert!(matches!(
        parse(b"[\"abc"),
        Err(JsonError::UnterminatedString { offset: 1 })
    ));
    assert!(matches!(
        parse(b"[\"\\"),
        Err(JsonError::UnterminatedString { .. })
    ));
    assert!(matches!(
        parse(b"[\"\\x\"]"),
        Err(JsonError::InvalidEscape { offset: 2 })
    ));
    assert!(matches!(parse(b"tru"), Err(JsonError::InvalidLiteral { offset: 0 })));
    assert!(matches!(parse(b"[nul]"), Err(JsonError::InvalidLiteral { offset: 1 })));
    assert!(matches!(parse(b"-"), Err(JsonError::InvalidNumber { offset: 0 })));
    assert!(matches!(parse(b"1."), Err(JsonError::InvalidNumber { offset: 0 })));
    assert!(matches!(parse(b"[2e]"), Err(JsonError::InvalidNumber { offset: 1 })));
}

#[test]
fn test_bool_reads_back_through_bencode() {
    let value = decode(br#"{"dht-enabled": true, "ratio": 1.5}"#).unwrap();
    let benc = bencode::encode(&value).unwrap();
    assert_eq!(benc, b"d11:dht-enabledi1e5:ratio8:1.500000e");

    let back = bencode::decode(&benc).unwrap();
    let dict = back.as_dict().unwrap();
    assert_eq!(dict.find_bool(Key::DhtEnabled), Ok(true));
    assert_eq!(
        dict.find_real(crate::quark::Quark::new("ratio")),
        Ok(1.5)
    );
}

#[test]
fn test_deep_nesting() {
    const DEPTH: usize = 100_000;

    let mut input = vec![b'['; DEPTH];
    input.resize(DEPTH * 2, b']');

    let value = decode(&input).unwrap();
    let mut output = encode(&value, JsonStyle::Lean).unwrap();
    assert_eq!(output.pop(), Some(b'\n'));
    assert!(output == input);
}

#[test]
fn test_private_table() {
    let table = QuarkTable::new();
    let parsed = parse_with(&table, br#"{"json-only-key": 1}"#).unwrap();
    assert!(table.lookup(b"json-only-key").is_some());
    assert_eq!(
        encode_with(&table, &parsed.value, JsonStyle::Lean).unwrap(),
        b"{\"json-only-key\":1}\n"
    );
}

#[test]
fn test_encode_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut settings = Dict::new();
    settings.insert(Key::DownloadDir, "/var/lib/downloads");
    settings.insert(Key::SpeedLimitUp, 100);
    settings.insert(Key::PexEnabled, true);

    let file = fs::File::create(&path).unwrap();
    encode_to(
        QuarkTable::global(),
        &Variant::Dict(settings),
        JsonStyle::Pretty,
        file,
    )
    .unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        "{\n    \"download-dir\": \"/var/lib/downloads\",\n    \"pex-enabled\": true,\n    \"speed-limit-up\": 100\n}\n"
    );

    let back = decode(written.as_bytes()).unwrap();
    let dict = back.as_dict().unwrap();
    assert_eq!(dict.find_utf8(Key::DownloadDir), Ok("/var/lib/downloads"));
    assert_eq!(dict.find_bool(Key::PexEnabled), Ok(true));
}
