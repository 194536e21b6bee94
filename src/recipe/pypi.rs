//! PyPI install block — one pip invocation, every requirement quoted.

/// Render the Dockerfile block installing the given PyPI requirements.
pub fn install_block(requirements: &[String]) -> String {
    if requirements.is_empty() {
        return "# No PyPI dependencies!".to_string();
    }
    let quoted: Vec<String> = requirements.iter().map(|r| format!("'{r}'")).collect();
    format!("RUN python3 -m pip install {}", quoted.join(" "))
}
