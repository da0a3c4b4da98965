use std::path::Path;
use std::process::Command;

/// Reveal `dir` in the platform file browser. Best effort: failures are logged only.
pub fn open_output_dir(dir: &Path) {
    let spawned = if cfg!(target_os = "macos") {
        Command::new("open").arg(dir).spawn()
    } else if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/c", "start", ""]).arg(dir).spawn()
    } else {
        tracing::debug!(dir = %dir.display(), "output directory");
        return;
    };
    if let Err(e) = spawned {
        tracing::warn!(dir = %dir.display(), error = %e, "could not open output directory");
    }
}
