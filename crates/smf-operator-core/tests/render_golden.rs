// crates/smf-operator-core/tests/render_golden.rs
// ============================================================================
// Module: Renderer Golden Tests
// Description: Golden-file comparison and determinism of config rendering.
// Purpose: Ensure byte-identical output for byte-identical input.
// ============================================================================

//! Configuration renderer tests.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::net::Ipv4Addr;

use proptest::prelude::proptest;
use smf_operator_core::DatabaseData;
use smf_operator_core::DesiredConfig;
use smf_operator_core::runtime::render;

// ============================================================================
// SECTION: Test Fixtures
// ============================================================================

const EXPECTED_CONFIG: &str = include_str!("testdata/expected_smfcfg.yaml");

fn desired_config() -> DesiredConfig {
    DesiredConfig::assemble(
        &DatabaseData {
            uris: "mongodb://1.2.3.4:27017,mongodb://5.6.7.8:27017".to_string(),
            username: "banana".to_string(),
            password: "pizza".to_string(),
        },
        "https://nrf:443",
        "sdcore-webui-k8s:9876",
        Ipv4Addr::new(1, 1, 1, 1),
        "smf.whatever.svc.cluster.local",
    )
}

// ============================================================================
// SECTION: Golden Comparison
// ============================================================================

#[test]
fn rendered_config_matches_the_golden_file() {
    let content = render(&desired_config()).unwrap();

    assert_eq!(content, EXPECTED_CONFIG);
}

#[test]
fn only_the_first_database_uri_is_consumed() {
    let content = render(&desired_config()).unwrap();

    assert!(content.contains("url: mongodb://1.2.3.4:27017"));
    assert!(!content.contains("5.6.7.8"));
}

#[test]
fn fixed_tls_paths_are_interpolated() {
    let content = render(&desired_config()).unwrap();

    assert!(content.contains("key: /support/TLS/smf.key"));
    assert!(content.contains("pem: /support/TLS/smf.pem"));
}

// ============================================================================
// SECTION: Determinism
// ============================================================================

proptest! {
    #[test]
    fn rendering_is_deterministic(
        database_url in "[a-z0-9:/._-]{1,64}",
        nrf_url in "https://[a-z0-9.-]{1,32}",
        webui_url in "[a-z0-9.-]{1,32}:[0-9]{2,5}",
        octet in 1_u8..255,
    ) {
        let config = DesiredConfig::assemble(
            &DatabaseData {
                uris: database_url,
                username: "banana".to_string(),
                password: "pizza".to_string(),
            },
            &nrf_url,
            &webui_url,
            Ipv4Addr::new(octet, 0, 0, 1),
            "smf.whatever.svc.cluster.local",
        );

        let first = render(&config).unwrap();
        let second = render(&config).unwrap();

        assert_eq!(first, second);
        assert!(first.contains(&format!("nrfUri: {nrf_url}")));
        assert!(first.contains(&format!("addr: {}", Ipv4Addr::new(octet, 0, 0, 1))));
    }
}
