//! Golden fixture integration tests for slipcheck-evm.
//!
//! Each fixture under `fixtures/calldata/` carries a `calldata` hex string,
//! the `now` timestamp to evaluate against, and the expected decode and
//! rule outcome. The second half builds calldata with alloy's ABI encoder
//! and checks properties that must hold for any input.

use alloy_core::dyn_abi::DynSolValue;
use alloy_primitives::{Address, U256};
use slipcheck_core::{
    CalldataDecoder, CheckConfig, DecodeError, DecodedSwap, FindingCode, ReportOutcome,
    RuleContext, SwapReport,
};
use slipcheck_evm::SwapDecoder;

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn fixture_dir() -> std::path::PathBuf {
    let mut p = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push("../../fixtures/calldata");
    p
}

fn load_fixture(name: &str) -> serde_json::Value {
    let content =
        std::fs::read_to_string(fixture_dir().join(name)).expect("fixture not found");
    serde_json::from_str(&content).expect("invalid fixture JSON")
}

fn ctx_for(f: &serde_json::Value) -> RuleContext {
    RuleContext::new(f["now"].as_u64().expect("missing now"), CheckConfig::default())
}

fn decode_fixture(f: &serde_json::Value) -> Result<DecodedSwap, DecodeError> {
    let hex_str = f["calldata"].as_str().expect("missing calldata");
    SwapDecoder::new().decode_hex(hex_str)
}

fn addresses(v: &serde_json::Value) -> Vec<Address> {
    v.as_array()
        .expect("expected an array of addresses")
        .iter()
        .map(|a| a.as_str().unwrap().parse().expect("bad address"))
        .collect()
}

/// Check a fixture that should decode, including its findings and risk level.
fn assert_decoded_fixture(name: &str) {
    let f = load_fixture(name);
    assert_eq!(f["expectedStatus"], "decoded", "{name}: wrong fixture kind");

    let swap = decode_fixture(&f).unwrap_or_else(|e| panic!("{name}: decode failed: {e}"));
    assert_eq!(swap.function().name(), f["expectedFunction"].as_str().unwrap(), "{name}");
    assert_eq!(swap.tokens(), addresses(&f["expectedTokens"]).as_slice(), "{name}");
    assert_eq!(
        swap.recipient(),
        f["expectedRecipient"].as_str().unwrap().parse::<Address>().unwrap(),
        "{name}"
    );
    assert_eq!(
        swap.deadline(),
        U256::from(f["expectedDeadline"].as_u64().unwrap()),
        "{name}"
    );
    let bound = f["expectedBound"]
        .as_str()
        .map(|s| s.parse::<U256>().expect("bad bound"));
    assert_eq!(swap.slippage_bound(), bound, "{name}: slippage bound");

    let json = serde_json::to_value(&swap).unwrap();
    assert_eq!(json["shape"], f["expectedShape"], "{name}: shape");
    assert_eq!(json["function"], f["expectedFunction"], "{name}: serialized function");
    if let Some(fees) = f.get("expectedFees") {
        match &swap {
            DecodedSwap::PathEncoded(p) => {
                let expected: Vec<u32> = fees
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|v| v.as_u64().unwrap() as u32)
                    .collect();
                assert_eq!(p.path.fees, expected, "{name}: fees");
            }
            DecodedSwap::Simple(_) => panic!("{name}: fees given for a simple swap"),
        }
    }

    let report = SwapReport::build(name, Ok(swap), &ctx_for(&f));
    let codes: Vec<&str> = report.findings().iter().map(|x| x.code.as_str()).collect();
    let expected: Vec<&str> = f["expectedFindings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(codes, expected, "{name}: findings");

    match &report.outcome {
        ReportOutcome::Decoded { risk, .. } => {
            assert_eq!(risk.level.to_string(), f["expectedRiskLevel"].as_str().unwrap(), "{name}")
        }
        other => panic!("{name}: expected a decoded report, got {other:?}"),
    }
}

// ─── Router v2 ────────────────────────────────────────────────────────────────

#[test]
fn golden_v2_exact_tokens_clean() {
    assert_decoded_fixture("v2-exact-tokens-clean.json");
}

#[test]
fn golden_v2_zero_min_no_deadline() {
    assert_decoded_fixture("v2-zero-min-no-deadline.json");
}

#[test]
fn golden_v2_eth_for_exact_tokens() {
    assert_decoded_fixture("v2-eth-for-exact-tokens.json");
}

#[test]
fn golden_v2_duplicate_hop() {
    assert_decoded_fixture("v2-duplicate-hop.json");
}

#[test]
fn golden_v2_truncated() {
    let f = load_fixture("v2-truncated.json");
    let err = decode_fixture(&f).unwrap_err();
    assert!(matches!(err, DecodeError::TruncatedData { .. }), "got {err:?}");
}

// ─── Router v3 ────────────────────────────────────────────────────────────────

#[test]
fn golden_v3_exact_input_multihop() {
    assert_decoded_fixture("v3-exact-input-multihop.json");
}

#[test]
fn golden_v3_exact_output_unbounded() {
    assert_decoded_fixture("v3-exact-output-unbounded.json");
}

#[test]
fn golden_v3_malformed_path() {
    let f = load_fixture("v3-malformed-path-42.json");
    let err = decode_fixture(&f).unwrap_err();
    assert!(matches!(err, DecodeError::MalformedPath { .. }), "got {err:?}");

    let report = SwapReport::build("#1", Err(err), &ctx_for(&f));
    assert!(report.is_failure());
    assert!(matches!(report.outcome, ReportOutcome::Malformed { .. }));
}

// ─── Not a swap ───────────────────────────────────────────────────────────────

#[test]
fn golden_unknown_selector() {
    let f = load_fixture("unknown-selector.json");
    let report = SwapReport::build("#1", decode_fixture(&f), &ctx_for(&f));
    match &report.outcome {
        ReportOutcome::Unrecognized { selector } => {
            assert_eq!(selector, f["expectedSelector"].as_str().unwrap())
        }
        other => panic!("expected unrecognized, got {other:?}"),
    }
}

#[test]
fn every_fixture_is_covered() {
    let mut names: Vec<String> = std::fs::read_dir(fixture_dir())
        .expect("fixture dir missing")
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".json"))
        .collect();
    names.sort();
    assert_eq!(
        names,
        [
            "unknown-selector.json",
            "v2-duplicate-hop.json",
            "v2-eth-for-exact-tokens.json",
            "v2-exact-tokens-clean.json",
            "v2-truncated.json",
            "v2-zero-min-no-deadline.json",
            "v3-exact-input-multihop.json",
            "v3-exact-output-unbounded.json",
            "v3-malformed-path-42.json",
        ]
    );
}

// ─── Encoder-built calldata ───────────────────────────────────────────────────

const NOW: u64 = 1_700_000_000;

fn token_a() -> Address {
    Address::repeat_byte(0xaa)
}

fn token_b() -> Address {
    Address::repeat_byte(0xbb)
}

fn uint(v: u64) -> DynSolValue {
    DynSolValue::Uint(U256::from(v), 256)
}

fn with_selector(selector: [u8; 4], args: Vec<u8>) -> Vec<u8> {
    let mut out = selector.to_vec();
    out.extend(args);
    out
}

/// `swapExactTokensForTokens(amountIn, amountOutMin, path, to, deadline)`.
fn v2_exact_tokens(min_out: u64, path: &[Address], deadline: u64) -> Vec<u8> {
    let args = DynSolValue::Tuple(vec![
        uint(1_000_000),
        uint(min_out),
        DynSolValue::Array(path.iter().copied().map(DynSolValue::Address).collect()),
        DynSolValue::Address(Address::repeat_byte(0x11)),
        uint(deadline),
    ]);
    with_selector([0x38, 0xed, 0x17, 0x39], args.abi_encode_params())
}

/// `swapExactETHForTokens(amountOutMin, path, to, deadline)`.
fn v2_exact_eth(min_out: u64, path: &[Address], deadline: u64) -> Vec<u8> {
    let args = DynSolValue::Tuple(vec![
        uint(min_out),
        DynSolValue::Array(path.iter().copied().map(DynSolValue::Address).collect()),
        DynSolValue::Address(Address::repeat_byte(0x11)),
        uint(deadline),
    ]);
    with_selector([0x7f, 0xf3, 0x6a, 0xb5], args.abi_encode_params())
}

/// `exactInput((path, recipient, deadline, amountIn, amountOutMinimum))`.
fn v3_exact_input(path: Vec<u8>, min_out: u64, deadline: u64) -> Vec<u8> {
    let params = DynSolValue::Tuple(vec![
        DynSolValue::Bytes(path),
        DynSolValue::Address(Address::repeat_byte(0x22)),
        uint(deadline),
        uint(5_000),
        uint(min_out),
    ]);
    with_selector(
        [0xc0, 0x4b, 0x8d, 0x59],
        DynSolValue::Tuple(vec![params]).abi_encode_params(),
    )
}

fn packed_path(tokens: &[Address], fees: &[u32]) -> Vec<u8> {
    let mut out = tokens[0].to_vec();
    for (t, fee) in tokens[1..].iter().zip(fees) {
        out.extend_from_slice(&fee.to_be_bytes()[1..]);
        out.extend_from_slice(t.as_slice());
    }
    out
}

fn codes_for(calldata: &[u8]) -> Vec<FindingCode> {
    let swap = SwapDecoder::new().decode(calldata).expect("decode failed");
    slipcheck_core::check(&swap, &RuleContext::new(NOW, CheckConfig::default()))
        .into_iter()
        .map(|f| f.code)
        .collect()
}

#[test]
fn zero_min_and_zero_deadline() {
    let data = v2_exact_tokens(0, &[token_a(), token_b()], 0);
    assert_eq!(
        codes_for(&data),
        vec![FindingCode::UnboundedSlippage, FindingCode::NoDeadline]
    );
}

#[test]
fn zero_deadline_is_never_excessive() {
    let data = v2_exact_eth(5, &[token_a(), token_b()], 0);
    let codes = codes_for(&data);
    assert!(codes.contains(&FindingCode::NoDeadline));
    assert!(!codes.contains(&FindingCode::ExcessiveDeadline));
}

#[test]
fn noop_and_duplicate_paths() {
    let noop = v2_exact_tokens(1, &[token_a(), token_a()], NOW + 60);
    assert_eq!(codes_for(&noop), vec![FindingCode::NoopPath]);

    let round_trip = v2_exact_tokens(1, &[token_a(), token_b(), token_a()], NOW + 60);
    let codes = codes_for(&round_trip);
    assert_eq!(codes, vec![FindingCode::DuplicateHop]);
    assert!(!codes.contains(&FindingCode::NoopPath));
}

#[test]
fn v3_path_with_forty_two_bytes_is_malformed() {
    let data = v3_exact_input(vec![0x33; 42], 1, NOW + 60);
    assert!(matches!(
        SwapDecoder::new().decode(&data),
        Err(DecodeError::MalformedPath { .. })
    ));
}

#[test]
fn v3_matches_encoder_fields() {
    let path = packed_path(&[token_a(), token_b()], &[500]);
    let data = v3_exact_input(path, 4_900, NOW + 60);
    let DecodedSwap::PathEncoded(p) = SwapDecoder::new().decode(&data).unwrap() else {
        panic!("expected a path-encoded swap");
    };
    assert_eq!(p.path.tokens, vec![token_a(), token_b()]);
    assert_eq!(p.path.fees, vec![500]);
    assert_eq!(p.amount_specified, U256::from(5_000u64));
    assert_eq!(p.amount_limit, U256::from(4_900u64));
    assert_eq!(p.recipient, Address::repeat_byte(0x22));
    assert_eq!(p.deadline, U256::from(NOW + 60));
}

#[test]
fn decoding_is_deterministic() {
    let decoder = SwapDecoder::new();
    let ctx = RuleContext::new(NOW, CheckConfig::default());
    let inputs = [
        v2_exact_tokens(0, &[token_a(), token_b(), token_a()], u64::MAX),
        v2_exact_eth(7, &[token_b(), token_a()], NOW + 10),
        v3_exact_input(packed_path(&[token_a(), token_b(), token_a()], &[3000, 100]), 0, 0),
    ];
    for data in &inputs {
        let first = decoder.decode(data).unwrap();
        let second = decoder.decode(data).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            slipcheck_core::check(&first, &ctx),
            slipcheck_core::check(&second, &ctx)
        );
    }
}

#[test]
fn every_truncation_is_reported() {
    let decoder = SwapDecoder::new();
    let inputs = [
        v2_exact_tokens(1, &[token_a(), token_b()], NOW),
        v2_exact_eth(1, &[token_a(), token_b(), token_a()], NOW),
        v3_exact_input(packed_path(&[token_a(), token_b()], &[3000]), 1, NOW),
    ];
    for data in &inputs {
        assert!(decoder.decode(data).is_ok());
        for cut in 4..data.len() {
            let err = decoder.decode(&data[..cut]).unwrap_err();
            assert!(
                matches!(err, DecodeError::TruncatedData { .. }),
                "cut at {cut} of {}: {err:?}",
                data.len()
            );
        }
    }
}

#[test]
fn unrecognized_selector_is_not_malformed() {
    let data = with_selector([0xa9, 0x05, 0x9c, 0xbb], vec![0u8; 64]);
    let err = SwapDecoder::new().decode(&data).unwrap_err();
    assert!(!err.is_malformed());
}
