// crates/smf-operator-relations/tests/databag_validation.rs
// ============================================================================
// Module: Databag Validation Tests
// Description: Fail-closed parsing of provider relation databags.
// Purpose: Ensure incomplete or malformed upstream data reads as absent.
// ============================================================================

//! Relation databag adapter tests.

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

use smf_operator_core::CertificateRequest;
use smf_operator_core::CertificateSource;
use smf_operator_relations::Databag;
use smf_operator_relations::RelationCertificateSource;
use smf_operator_relations::database_data;
use smf_operator_relations::nrf_url;
use smf_operator_relations::provider_certificates;
use smf_operator_relations::webui_url;

// ============================================================================
// SECTION: Test Fixtures
// ============================================================================

fn databag(pairs: &[(&str, &str)]) -> Databag {
    pairs.iter().map(|(key, value)| ((*key).to_string(), (*value).to_string())).collect()
}

// ============================================================================
// SECTION: NRF
// ============================================================================

#[test]
fn valid_nrf_url_is_extracted() {
    let bag = databag(&[("url", "https://nrf:443")]);

    assert_eq!(nrf_url(&bag), Some("https://nrf:443".to_string()));
}

#[test]
fn missing_nrf_url_field_reads_as_absent() {
    assert_eq!(nrf_url(&databag(&[])), None);
}

#[test]
fn unparseable_nrf_url_reads_as_absent() {
    let bag = databag(&[("url", "not a url")]);

    assert_eq!(nrf_url(&bag), None);
}

#[test]
fn non_http_nrf_scheme_reads_as_absent() {
    let bag = databag(&[("url", "ftp://nrf:443")]);

    assert_eq!(nrf_url(&bag), None);
}

// ============================================================================
// SECTION: Database
// ============================================================================

#[test]
fn complete_database_data_is_extracted() {
    let bag = databag(&[
        ("uris", "mongodb://1.2.3.4:27017,mongodb://5.6.7.8:27017"),
        ("username", "banana"),
        ("password", "pizza"),
    ]);

    let data = database_data(&bag).unwrap();

    assert_eq!(data.first_uri(), "mongodb://1.2.3.4:27017");
    assert_eq!(data.username, "banana");
    assert_eq!(data.password, "pizza");
}

#[test]
fn database_data_without_uris_reads_as_absent() {
    let bag = databag(&[("username", "banana"), ("password", "pizza")]);

    assert_eq!(database_data(&bag), None);
}

#[test]
fn database_data_with_empty_password_reads_as_absent() {
    let bag = databag(&[("uris", "mongodb://1.2.3.4:27017"), ("username", "banana"), ("password", "")]);

    assert_eq!(database_data(&bag), None);
}

// ============================================================================
// SECTION: Webui
// ============================================================================

#[test]
fn webui_address_is_extracted() {
    let bag = databag(&[("webui_url", "sdcore-webui-k8s:9876")]);

    assert_eq!(webui_url(&bag), Some("sdcore-webui-k8s:9876".to_string()));
}

#[test]
fn empty_webui_address_reads_as_absent() {
    let bag = databag(&[("webui_url", "")]);

    assert_eq!(webui_url(&bag), None);
}

// ============================================================================
// SECTION: Certificates
// ============================================================================

#[test]
fn provider_certificates_are_parsed_from_the_databag() {
    let bag = databag(&[(
        "certificates",
        r#"[{"certificate": "whatever cert", "certificate_signing_request": "whatever csr", "ca": "whatever ca", "chain": ["whatever ca"]}]"#,
    )]);

    let entries = provider_certificates(&bag);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].certificate, "whatever cert");
    assert_eq!(entries[0].certificate_signing_request, "whatever csr");
}

#[test]
fn malformed_certificates_field_reads_as_no_entries() {
    let bag = databag(&[("certificates", "not json")]);

    assert!(provider_certificates(&bag).is_empty());
}

#[test]
fn assigned_certificate_matches_the_local_csr_by_trimmed_bytes() {
    let bag = databag(&[(
        "certificates",
        r#"[{"certificate": "whatever cert", "certificate_signing_request": "whatever csr"}]"#,
    )]);
    let source = RelationCertificateSource::new(
        provider_certificates(&bag),
        Some("whatever key".to_string()),
        Some("whatever csr\n".to_string()),
    );

    let bundle = source.assigned_certificate(&CertificateRequest::smf()).unwrap();

    assert_eq!(bundle.certificate_pem, "whatever cert");
    assert_eq!(bundle.private_key_pem, "whatever key");
}

#[test]
fn certificate_for_a_different_csr_is_not_assigned() {
    let bag = databag(&[(
        "certificates",
        r#"[{"certificate": "whatever cert", "certificate_signing_request": "some other csr"}]"#,
    )]);
    let source = RelationCertificateSource::new(
        provider_certificates(&bag),
        Some("whatever key".to_string()),
        Some("whatever csr".to_string()),
    );

    assert_eq!(source.assigned_certificate(&CertificateRequest::smf()), None);
}

#[test]
fn no_local_key_means_no_assignment() {
    let bag = databag(&[(
        "certificates",
        r#"[{"certificate": "whatever cert", "certificate_signing_request": "whatever csr"}]"#,
    )]);
    let source =
        RelationCertificateSource::new(provider_certificates(&bag), None, Some("whatever csr".to_string()));

    assert_eq!(source.assigned_certificate(&CertificateRequest::smf()), None);
}

#[test]
fn submitted_requests_are_recorded_in_order() {
    let mut source = RelationCertificateSource::new(Vec::new(), None, None);

    source.request_certificate("first csr").unwrap();
    source.request_certificate("second csr").unwrap();

    assert_eq!(source.submitted_requests(), ["first csr", "second csr"]);
}
