// ABOUTME: Validate command implementation.
// ABOUTME: Parses a compose file and reports the services it declares.

use moorage::config::load_compose_file;
use moorage::error::Result;
use moorage::output::Output;
use std::path::Path;

pub fn validate(file: &Path, output: Output) -> Result<()> {
    let document = load_compose_file(file)?;

    for name in document.service_names() {
        output.progress(&format!("  ✓ {}", name));
    }

    output.success(&format!(
        "{} is valid ({} service(s))",
        file.display(),
        document.len()
    ));
    Ok(())
}
