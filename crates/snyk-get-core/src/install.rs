//! Finalizing a verified download.

use std::path::Path;

/// Promote a verified download to the canonical name.
///
/// Sets executable permission bits, then renames. The rename overwrites any
/// previous install (last successful install wins); the canonical name never
/// refers to a file that has not passed verification.
pub fn install(downloaded: &Path, canonical: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(downloaded, std::fs::Permissions::from_mode(0o755))?;
    }
    std::fs::rename(downloaded, canonical)?;
    Ok(())
}
