// crates/smf-operator-core/src/runtime/render.rs
// ============================================================================
// Module: Configuration Renderer
// Description: Deterministic rendering of the SMF configuration file.
// Purpose: Produce byte-identical output for byte-identical input.
// Dependencies: crate::core::config, minijinja
// ============================================================================

//! ## Overview
//! Rendering is literal field interpolation over a bundled template; there
//! is no conditional logic. Byte-identical input yields byte-identical
//! output, which the reconciler's diff-based change detection depends on.
//! A [`RenderError`] indicates a template-level fault and therefore a bug
//! in this crate, never absent upstream data: the readiness gate is the
//! sole authority for input presence.

// ============================================================================
// SECTION: Imports
// ============================================================================

use minijinja::Environment;
use thiserror::Error;

use crate::core::DesiredConfig;

// ============================================================================
// SECTION: Bundled Assets
// ============================================================================

/// Template for the SMF configuration file.
const CONFIG_TEMPLATE: &str = include_str!("../../templates/smfcfg.yaml.j2");

/// Name under which the template is registered.
const CONFIG_TEMPLATE_NAME: &str = "smfcfg.yaml.j2";

/// Static UE routing table, written verbatim and exactly once.
pub const UE_ROUTING_CONFIG: &str = include_str!("../../templates/uerouting.yaml");

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration rendering errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The bundled template failed to parse or render.
    #[error("config template error: {0}")]
    Template(#[from] minijinja::Error),
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders the SMF configuration file content.
///
/// # Errors
///
/// Returns [`RenderError`] when the bundled template cannot be parsed or
/// rendered; both indicate a caller or packaging bug.
pub fn render(config: &DesiredConfig) -> Result<String, RenderError> {
    let mut environment = Environment::new();
    environment.set_keep_trailing_newline(true);
    environment.add_template(CONFIG_TEMPLATE_NAME, CONFIG_TEMPLATE)?;
    let template = environment.get_template(CONFIG_TEMPLATE_NAME)?;
    Ok(template.render(config)?)
}
