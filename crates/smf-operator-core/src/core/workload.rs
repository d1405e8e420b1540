// crates/smf-operator-core/src/core/workload.rs
// ============================================================================
// Module: SMF Workload Contract
// Description: Fixed paths, ports, and supervisor plan for the SMF binary.
// Purpose: Centralize the on-disk and process-supervisor contract of the workload.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The SMF workload binary hardcodes its configuration and TLS paths; the
//! constants here are a compatibility contract and must be reproduced exactly.
//! Invariants:
//! - Paths and port numbers never vary per deployment.
//! - The service plan carries exactly one dynamic value: the pod IP.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Path Constants
// ============================================================================

/// Directory holding the workload configuration files.
pub const BASE_CONFIG_PATH: &str = "/etc/smf";

/// Rendered SMF configuration file.
pub const CONFIG_FILE_PATH: &str = "/etc/smf/smfcfg.yaml";

/// Static UE routing table, written once.
pub const UE_ROUTING_FILE_PATH: &str = "/etc/smf/uerouting.yaml";

/// Directory holding TLS material. Hardcoded in the SMF binary.
pub const CERTS_DIR_PATH: &str = "/support/TLS";

/// PEM private key used for the SBI TLS endpoint.
pub const PRIVATE_KEY_PATH: &str = "/support/TLS/smf.key";

/// PEM certificate used for the SBI TLS endpoint.
pub const CERTIFICATE_PATH: &str = "/support/TLS/smf.pem";

/// PEM certificate signing request. Legacy certificate flow only.
pub const CSR_PATH: &str = "/support/TLS/smf.csr";

/// Version marker written by the workload image; read-only to the operator.
pub const WORKLOAD_VERSION_PATH: &str = "/etc/workload-version";

// ============================================================================
// SECTION: Service Constants
// ============================================================================

/// Supervised service name.
pub const SERVICE_NAME: &str = "smf";

/// Workload binary path inside the container.
pub const WORKLOAD_BINARY: &str = "/bin/smf";

/// Database name provisioned for the SMF.
pub const DATABASE_NAME: &str = "sdcore_smf";

/// Service-Based Interface port.
pub const SBI_PORT: u16 = 29502;

/// PFCP control-channel port (UDP).
pub const PFCP_PORT: u16 = 8805;

/// Prometheus metrics port exposed by the workload.
pub const PROMETHEUS_PORT: u16 = 9089;

/// Common name and SAN used for the workload certificate.
pub const CERTIFICATE_COMMON_NAME: &str = "smf.sdcore";

// ============================================================================
// SECTION: Service Plan
// ============================================================================

/// Override policy for a supervised service definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrideMode {
    /// Replace any previous definition of the service.
    Replace,
    /// Merge into a previous definition of the service.
    Merge,
}

/// Startup policy for a supervised service definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartupMode {
    /// Start the service automatically when the plan is applied.
    Enabled,
    /// Require an explicit start.
    Disabled,
}

/// One service entry in a supervisor plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSpec {
    /// Override policy applied when layering plans.
    #[serde(rename = "override")]
    pub override_mode: OverrideMode,
    /// Startup policy for the service.
    pub startup: StartupMode,
    /// Full command line for the service process.
    pub command: String,
    /// Environment variables passed to the service process.
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
}

/// Declarative supervisor plan: services keyed by name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServicePlan {
    /// Service entries keyed by service name.
    #[serde(default)]
    pub services: BTreeMap<String, ServiceSpec>,
}

impl ServicePlan {
    /// Returns the entry for the SMF service, when declared.
    #[must_use]
    pub fn smf_service(&self) -> Option<&ServiceSpec> {
        self.services.get(SERVICE_NAME)
    }
}

/// Builds the desired supervisor plan for the SMF service.
///
/// The command line encodes the fixed configuration paths; the environment
/// carries a fixed key set with the pod IP as the only dynamic value.
#[must_use]
pub fn desired_service_plan(pod_ip: Ipv4Addr) -> ServicePlan {
    let spec = ServiceSpec {
        override_mode: OverrideMode::Replace,
        startup: StartupMode::Enabled,
        command: format!("{WORKLOAD_BINARY} -smfcfg {CONFIG_FILE_PATH} -uerouting {UE_ROUTING_FILE_PATH}"),
        environment: service_environment(pod_ip),
    };
    let mut services = BTreeMap::new();
    services.insert(SERVICE_NAME.to_string(), spec);
    ServicePlan {
        services,
    }
}

/// Builds the fixed environment variable set for the SMF service.
#[must_use]
pub fn service_environment(pod_ip: Ipv4Addr) -> BTreeMap<String, String> {
    let mut environment = BTreeMap::new();
    environment.insert("GRPC_GO_LOG_VERBOSITY_LEVEL".to_string(), "99".to_string());
    environment.insert("GRPC_GO_LOG_SEVERITY_LEVEL".to_string(), "info".to_string());
    environment.insert("GRPC_TRACE".to_string(), "all".to_string());
    environment.insert("GRPC_VERBOSITY".to_string(), "debug".to_string());
    environment.insert("PFCP_PORT_UPF".to_string(), PFCP_PORT.to_string());
    environment.insert("MANAGED_BY_CONFIG_POD".to_string(), "true".to_string());
    environment.insert("POD_IP".to_string(), pod_ip.to_string());
    environment
}
