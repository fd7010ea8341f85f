//! Tests for the run module.

use std::io::Write as _;

use tempfile::NamedTempFile;

use super::*;
use device_ip::config::Cli;
use device_ip::network::classifier::SubstringClassifier;

const SNAPSHOT: &str = r#"[
    {"name": "lo", "is_loopback": true, "addresses": ["127.0.0.1", "::1"]},
    {"name": "wlan0", "addresses": ["fe80::1%wlan0", "192.168.1.20", "2001:db8::20"]},
    {"name": "rmnet_data0", "addresses": ["10.64.1.7"]}
]"#;

fn snapshot_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file
}

/// Config reading `snapshot` with the probe disabled.
fn config(snapshot: &NamedTempFile, extra: &[&str]) -> ValidatedConfig {
    let path = snapshot.path().to_str().unwrap();
    let mut args = vec![
        "device-ip",
        "--snapshot",
        path,
        "--skip-connectivity-check",
        "--classifier",
        "substring",
    ];
    args.extend(extra);
    ValidatedConfig::from_raw(&Cli::parse_from_iter(args), None).unwrap()
}

fn run(config: ValidatedConfig, command: Option<&Command>) -> (Result<(), RunError>, String) {
    let mut out = Vec::new();
    let result = execute_to(config, command, &mut out);
    (result, String::from_utf8(out).unwrap())
}

mod run_error {
    use super::*;

    #[test]
    fn not_implemented_names_the_method() {
        let error = RunError::NotImplemented("getBatteryLevel".to_string());
        assert_eq!(error.to_string(), "Method not implemented: getBatteryLevel");
    }

    #[test]
    fn lookup_carries_record_error() {
        let error = RunError::Lookup("No internet connection".to_string());
        assert_eq!(error.to_string(), "Lookup failed: No internet connection");
    }

    #[test]
    fn debug_format_works() {
        let error = RunError::NotImplemented("x".to_string());
        let debug_str = format!("{error:?}");
        assert!(debug_str.contains("NotImplemented"));
    }
}

mod call_args {
    use super::*;

    #[test]
    fn absent_args_are_null() {
        assert_eq!(parse_call_args(None).unwrap(), Value::Null);
    }

    #[test]
    fn object_args_are_parsed() {
        let value = parse_call_args(Some(r#"{"networkType":"wifi"}"#)).unwrap();
        assert_eq!(value["networkType"], "wifi");
    }

    #[test]
    fn malformed_json_is_rejected() {
        let result = parse_call_args(Some("{networkType:"));
        assert!(matches!(result, Err(RunError::CallArgs(_))));
    }
}

mod fetcher {
    use super::*;

    #[test]
    fn snapshot_file_is_loaded() {
        let file = snapshot_file(SNAPSHOT);

        let fetcher = create_fetcher(Some(file.path())).unwrap();
        let interfaces = fetcher.fetch().unwrap();

        assert_eq!(interfaces.len(), 3);
        assert_eq!(interfaces[1].name, "wlan0");
        assert!(interfaces[0].is_loopback);
    }

    #[test]
    fn missing_snapshot_file_is_read_error() {
        let result = create_fetcher(Some(Path::new("missing_snapshot_24680.json")));
        assert!(matches!(result, Err(RunError::SnapshotRead { .. })));
    }

    #[test]
    fn malformed_snapshot_is_parse_error() {
        let file = snapshot_file(r#"{"name": "wlan0"}"#);

        let result = create_fetcher(Some(file.path()));

        assert!(matches!(result, Err(RunError::SnapshotParse { .. })));
    }
}

mod rendering {
    use super::*;

    #[test]
    fn json_record_has_all_keys() {
        let result = ResolveResult::found(Some("192.168.1.20".to_string()), None);

        let json = render_result(&result, OutputFormat::Json).unwrap();

        assert_eq!(
            json,
            r#"{"ipv4":"192.168.1.20","ipv6":null,"error":null}"#
        );
    }

    #[test]
    fn text_record_is_display() {
        let result = ResolveResult::found(None, Some("2001:db8::20".to_string()));

        let text = render_result(&result, OutputFormat::Text).unwrap();

        assert_eq!(text, "ipv4: none, ipv6: 2001:db8::20");
    }

    #[test]
    fn interfaces_text_lists_kind_and_state() {
        let interfaces = StaticFetcher::from_json(SNAPSHOT).unwrap();

        let text = render_interfaces(
            interfaces.interfaces(),
            &SubstringClassifier,
            OutputFormat::Text,
        )
        .unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "lo [other] loopback: 127.0.0.1, ::1");
        assert_eq!(
            lines[1],
            "wlan0 [wifi] up: fe80::1%wlan0, 192.168.1.20, 2001:db8::20"
        );
        assert_eq!(lines[2], "rmnet_data0 [mobile] up: 10.64.1.7");
    }

    #[test]
    fn interfaces_json_is_an_array() {
        let interfaces = StaticFetcher::from_json(SNAPSHOT).unwrap();

        let json = render_interfaces(
            interfaces.interfaces(),
            &SubstringClassifier,
            OutputFormat::Json,
        )
        .unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value.as_array().unwrap().len(), 3);
        assert_eq!(value[1]["kind"], "wifi");
        assert_eq!(value[1]["addresses"][0], "fe80::1%wlan0");
    }
}

mod commands {
    use super::*;

    #[test]
    fn get_prints_first_addresses() {
        let file = snapshot_file(SNAPSHOT);

        let (result, out) = run(config(&file, &[]), None);

        assert!(result.is_ok());
        let value: Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(value["ipv4"], "192.168.1.20");
        assert_eq!(value["ipv6"], "2001:db8::20");
        assert_eq!(value["error"], Value::Null);
    }

    #[test]
    fn get_honors_request_options() {
        let file = snapshot_file(SNAPSHOT);
        let config = config(&file, &["--network-type", "mobile", "--format", "text"]);

        let (result, out) = run(config, Some(&Command::Get));

        assert!(result.is_ok());
        assert_eq!(out.trim(), "ipv4: 10.64.1.7, ipv6: none");
    }

    #[test]
    fn call_dispatches_to_channel() {
        let file = snapshot_file(SNAPSHOT);
        let command = Command::Call {
            method: "getIpAddress".to_string(),
            args: Some(r#"{"networkType":"wifi","ipVersion":"ipv4"}"#.to_string()),
        };

        let (result, out) = run(config(&file, &[]), Some(&command));

        assert!(result.is_ok());
        let value: Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(value["ipv4"], "192.168.1.20");
        assert_eq!(value["ipv6"], Value::Null);
    }

    #[test]
    fn call_with_invalid_arguments_prints_error_record() {
        let file = snapshot_file(SNAPSHOT);
        let command = Command::Call {
            method: "getIpAddress".to_string(),
            args: Some(r#"{"networkType":"bluetooth"}"#.to_string()),
        };

        let (result, out) = run(config(&file, &[]), Some(&command));

        assert!(matches!(result, Err(RunError::Lookup(ref e)) if e == "Invalid arguments"));
        let value: Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(value["error"], "Invalid arguments");
    }

    #[test]
    fn unknown_method_is_not_implemented() {
        let file = snapshot_file(SNAPSHOT);
        let command = Command::Call {
            method: "getBatteryLevel".to_string(),
            args: None,
        };

        let (result, out) = run(config(&file, &[]), Some(&command));

        assert!(matches!(result, Err(RunError::NotImplemented(ref m)) if m == "getBatteryLevel"));
        assert!(out.is_empty());
    }

    #[test]
    fn interfaces_lists_snapshot() {
        let file = snapshot_file(SNAPSHOT);

        let (result, out) = run(
            config(&file, &["--format", "text"]),
            Some(&Command::Interfaces),
        );

        assert!(result.is_ok());
        assert_eq!(out.lines().count(), 3);
        assert!(out.contains("wlan0 [wifi] up"));
    }

    #[test]
    fn bad_snapshot_fails_before_resolving() {
        let file = snapshot_file("not json");

        let (result, out) = run(config(&file, &[]), None);

        assert!(matches!(result, Err(RunError::SnapshotParse { .. })));
        assert!(out.is_empty());
    }
}
