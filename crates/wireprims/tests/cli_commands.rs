#![cfg(feature = "cli")]

use std::process::{Command, Output};

fn wireprims(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wireprims"))
        .env_remove("WIREPRIMS_ORDER")
        .arg("--log-level")
        .arg("off")
        .args(args)
        .output()
        .expect("wireprims should run")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(stdout.trim()).expect("stdout should be JSON")
}

#[test]
fn decode_outputs_fields_as_json() {
    let output = wireprims(&[
        "--format",
        "json",
        "decode",
        "--layout",
        "magic:4950,u16,guid,str:4",
        "4950123404030201060508070910111213141516616200 00",
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let json = stdout_json(&output);
    assert_eq!(json["order"], "be");
    assert_eq!(json["trailing"], 0);
    let fields = json["fields"].as_array().expect("fields array");
    assert_eq!(fields.len(), 4);
    assert_eq!(fields[0]["value"], true);
    assert_eq!(fields[1]["value"], 0x1234);
    assert_eq!(fields[2]["value"], "01020304-0506-0708-0910-111213141516");
    assert_eq!(fields[3]["value"], "ab");
    assert_eq!(fields[3]["offset"], 20);
}

#[test]
fn decode_little_endian_from_env() {
    let output = Command::new(env!("CARGO_BIN_EXE_wireprims"))
        .env("WIREPRIMS_ORDER", "le")
        .args(["--log-level", "off", "--format", "json", "decode", "-l", "u16", "3412"])
        .output()
        .expect("wireprims should run");
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["fields"][0]["value"], 0x1234);
}

#[test]
fn decode_short_input_exits_data_invalid() {
    let output = wireprims(&["--format", "json", "decode", "-l", "u32", "0102"]);
    assert_eq!(output.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("out of bounds"), "stderr: {stderr}");
}

#[test]
fn decode_strict_magic_mismatch_fails() {
    let lenient = wireprims(&["--format", "json", "decode", "-l", "magic:4950", "0000"]);
    assert!(lenient.status.success());
    assert_eq!(stdout_json(&lenient)["fields"][0]["value"], false);

    let strict = wireprims(&["--format", "json", "decode", "--strict", "-l", "magic:4950", "0000"]);
    assert_eq!(strict.status.code(), Some(1));
}

#[test]
fn encode_prints_hex() {
    let output = wireprims(&[
        "--format",
        "pretty",
        "encode",
        "--layout",
        "u16,u16r,str:5",
        "0x1234",
        "0x1234",
        "ab",
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "order=be size=9 hex=123434126162000000");
}

#[test]
fn encode_raw_writes_bytes() {
    let output = wireprims(&["--format", "raw", "encode", "-o", "le", "-l", "u32", "1"]);
    assert!(output.status.success());
    assert_eq!(output.stdout, vec![1, 0, 0, 0]);
}

#[test]
fn encode_value_count_mismatch_is_usage() {
    let output = wireprims(&["--format", "json", "encode", "-l", "u8,u8", "1"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn encode_capacity_limit_is_data_invalid() {
    let output = wireprims(&["--format", "json", "encode", "--capacity", "1", "-l", "u16", "1"]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn encode_oversized_capacity_is_usage() {
    let output = wireprims(&[
        "--format",
        "json",
        "encode",
        "--capacity",
        "18446744073709551615",
        "-l",
        "u8",
        "1",
    ]);
    assert_eq!(output.status.code(), Some(64));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--capacity"));
}

#[test]
fn encode_rejects_signed_hex_and_empty_magic() {
    let output = wireprims(&["--format", "json", "encode", "-l", "i16", "0x-5"]);
    assert_eq!(output.status.code(), Some(64));

    let output = wireprims(&["--format", "json", "encode", "-l", "magic:"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn version_prints_name() {
    let output = wireprims(&["version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("wireprims "));
}
