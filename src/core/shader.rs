//! WGSL front-end checks
//!
//! Shaders are parsed and validated with naga before a module is created, so
//! a bad shader is reported as an error instead of reaching the device's
//! uncaptured error handler.

use crate::error::{Error, Result};

/// Parse and validate `source`, checking that both entry points exist.
pub fn validate_wgsl(
    label: &str,
    source: &str,
    vertex_entry: &str,
    fragment_entry: &str,
) -> Result<()> {
    let compile_error = |message: String| Error::Compile {
        label: label.to_string(),
        message,
    };

    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| compile_error(e.emit_to_string(source)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|e| compile_error(e.emit_to_string(source)))?;

    for (name, stage) in [
        (vertex_entry, naga::ShaderStage::Vertex),
        (fragment_entry, naga::ShaderStage::Fragment),
    ] {
        if !module
            .entry_points
            .iter()
            .any(|ep| ep.name == name && ep.stage == stage)
        {
            return Err(compile_error(format!(
                "missing {stage:?} entry point `{name}`"
            )));
        }
    }

    Ok(())
}
