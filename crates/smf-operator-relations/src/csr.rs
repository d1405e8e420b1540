// crates/smf-operator-relations/src/csr.rs
// ============================================================================
// Module: CSR Factory
// Description: Private key and CSR generation backed by rcgen.
// Purpose: Produce the PEM material the certificate flows persist and submit.
// Dependencies: smf-operator-core, rcgen
// ============================================================================

//! Key and CSR generation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use rcgen::CertificateParams;
use rcgen::DnType;
use rcgen::KeyPair;

use smf_operator_core::CertificateRequest;
use smf_operator_core::CsrError;
use smf_operator_core::CsrFactory;

// ============================================================================
// SECTION: Factory
// ============================================================================

/// CSR factory producing ECDSA keys and requests via `rcgen`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RcgenCsrFactory;

impl RcgenCsrFactory {
    /// Builds the factory.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CsrFactory for RcgenCsrFactory {
    fn generate_private_key(&self) -> Result<String, CsrError> {
        let key = KeyPair::generate().map_err(|error| CsrError::Generation(error.to_string()))?;
        Ok(key.serialize_pem())
    }

    fn generate_csr(&self, private_key_pem: &str, request: &CertificateRequest) -> Result<String, CsrError> {
        let key =
            KeyPair::from_pem(private_key_pem).map_err(|error| CsrError::Generation(error.to_string()))?;
        let mut params = CertificateParams::new(request.sans_dns.clone())
            .map_err(|error| CsrError::Generation(error.to_string()))?;
        params.distinguished_name.push(DnType::CommonName, request.common_name.clone());
        let csr =
            params.serialize_request(&key).map_err(|error| CsrError::Generation(error.to_string()))?;
        csr.pem().map_err(|error| CsrError::Generation(error.to_string()))
    }
}
