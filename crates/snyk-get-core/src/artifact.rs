//! Distribution filenames for each supported platform.

use crate::platform::{Arch, Libc, Os, PlatformKey, UnsupportedPlatform};

/// Remote and local filenames for one platform's binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactName {
    /// Filename published by the distribution server.
    pub remote_name: String,
    /// Canonical filename the binary is installed under.
    pub local_name: String,
}

impl ArtifactName {
    /// Look up the published filename for `key`.
    ///
    /// The match is exhaustive over [`PlatformKey`], so this table cannot
    /// drift from the platform table: a combination the resolver refuses to
    /// build has no filename here either.
    pub fn for_platform(key: &PlatformKey) -> Result<Self, UnsupportedPlatform> {
        let remote = match (key.os, key.arch, key.libc) {
            (Os::Linux, Arch::Arm64, _) => "snyk-linux-arm64",
            (Os::Linux, Arch::Amd64, Some(Libc::Musl)) => "snyk-alpine",
            (Os::Linux, Arch::Amd64, _) => "snyk-linux",
            (Os::Windows, Arch::Amd64, _) => "snyk-win.exe",
            (Os::Macos, Arch::Amd64, _) => "snyk-macos",
            (Os::Macos, Arch::Arm64, _) => "snyk-macos-arm64",
            (Os::Windows, Arch::Arm64, _) => {
                return Err(UnsupportedPlatform {
                    os: key.os.to_string(),
                    arch: key.arch.to_string(),
                });
            }
        };
        let local = match key.os {
            Os::Windows => "snyk.exe",
            Os::Linux | Os::Macos => "snyk",
        };
        Ok(Self {
            remote_name: remote.to_string(),
            local_name: local.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(os: Os, arch: Arch, libc: Option<Libc>) -> PlatformKey {
        PlatformKey { os, arch, libc }
    }

    #[test]
    fn every_supported_key_has_nonempty_names() {
        let table = [
            (key(Os::Linux, Arch::Arm64, None), "snyk-linux-arm64", "snyk"),
            (
                key(Os::Linux, Arch::Amd64, Some(Libc::Glibc)),
                "snyk-linux",
                "snyk",
            ),
            (
                key(Os::Linux, Arch::Amd64, Some(Libc::Musl)),
                "snyk-alpine",
                "snyk",
            ),
            (
                key(Os::Windows, Arch::Amd64, None),
                "snyk-win.exe",
                "snyk.exe",
            ),
            (key(Os::Macos, Arch::Amd64, None), "snyk-macos", "snyk"),
            (
                key(Os::Macos, Arch::Arm64, None),
                "snyk-macos-arm64",
                "snyk",
            ),
        ];
        for (key, remote, local) in table {
            let artifact = ArtifactName::for_platform(&key).unwrap();
            assert!(!artifact.remote_name.is_empty());
            assert_eq!(artifact.remote_name, remote);
            assert_eq!(artifact.local_name, local);
        }
    }

    #[test]
    fn windows_arm64_is_rejected() {
        let err = ArtifactName::for_platform(&key(Os::Windows, Arch::Arm64, None)).unwrap_err();
        assert_eq!(err.os, "windows");
        assert_eq!(err.arch, "arm64");
    }
}
