// crates/smf-operator-relations/tests/csr_generation.rs
// ============================================================================
// Module: CSR Generation Tests
// Description: PEM output of the rcgen-backed key and CSR factory.
// Purpose: Ensure generated material is well-formed and key-bound.
// ============================================================================

//! CSR factory tests.

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
use smf_operator_core::CsrFactory;
use smf_operator_relations::RcgenCsrFactory;

// ============================================================================
// SECTION: Key Generation
// ============================================================================

#[test]
fn generated_private_key_is_pem_encoded() {
    let key = RcgenCsrFactory::new().generate_private_key().unwrap();

    assert!(key.contains("BEGIN PRIVATE KEY"));
    assert!(key.contains("END PRIVATE KEY"));
}

#[test]
fn consecutive_keys_differ() {
    let factory = RcgenCsrFactory::new();

    let first = factory.generate_private_key().unwrap();
    let second = factory.generate_private_key().unwrap();

    assert_ne!(first, second);
}

// ============================================================================
// SECTION: CSR Generation
// ============================================================================

#[test]
fn csr_is_generated_from_a_previously_generated_key() {
    let factory = RcgenCsrFactory::new();
    let key = factory.generate_private_key().unwrap();

    let csr = factory.generate_csr(&key, &CertificateRequest::smf()).unwrap();

    assert!(csr.contains("BEGIN CERTIFICATE REQUEST"));
    assert!(csr.contains("END CERTIFICATE REQUEST"));
}

#[test]
fn csr_generation_with_a_garbage_key_fails() {
    let factory = RcgenCsrFactory::new();

    let result = factory.generate_csr("not a key", &CertificateRequest::smf());

    assert!(result.is_err());
}
