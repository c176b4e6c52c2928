//! Host platform resolution.
//!
//! Maps the running operating system and CPU architecture to the
//! distribution's platform vocabulary. On linux/amd64 a local filesystem
//! probe selects the musl-linked binary variant.

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// The host OS/architecture combination has no published binary.
///
/// This is a terminal condition: retrying or switching download sources
/// cannot change host hardware.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported platform: {os} {arch}")]
pub struct UnsupportedPlatform {
    /// Host operating system name as reported by the runtime.
    pub os: String,
    /// Host CPU architecture as reported by the runtime.
    pub arch: String,
}

/// Operating system of a published binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    /// Linux (glibc or musl).
    Linux,
    /// Windows.
    Windows,
    /// macOS.
    Macos,
}

impl Os {
    /// Platform name as used in distribution filenames.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Windows => "windows",
            Self::Macos => "macos",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// CPU architecture of a published binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    /// `x86_64`.
    Amd64,
    /// ARM64.
    Arm64,
}

impl Arch {
    /// Architecture name as used in distribution filenames.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// C library flavor, relevant only on linux/amd64 where a musl-linked
/// variant of the binary is published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Libc {
    /// GNU libc (default on most distributions).
    Glibc,
    /// musl (Alpine and friends).
    Musl,
}

/// Capability for detecting a musl runtime on the host.
///
/// Injectable so tests can exercise the musl path without an Alpine system.
pub trait LibcProbe {
    /// Whether the host links against musl rather than glibc.
    fn is_musl(&self) -> bool;
}

/// Path of the musl dynamic loader on amd64 hosts.
const MUSL_LOADER: &str = "/lib/ld-musl-x86_64.so.1";

/// Default probe: checks the local filesystem for the musl loader.
/// Never touches the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostLibcProbe;

impl LibcProbe for HostLibcProbe {
    fn is_musl(&self) -> bool {
        Path::new(MUSL_LOADER).exists()
    }
}

/// Resolved host platform: the (os, arch) pair plus the libc flavor where
/// one matters. Derived once per invocation and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformKey {
    /// Operating system.
    pub os: Os,
    /// CPU architecture.
    pub arch: Arch,
    /// libc flavor; populated only for linux/amd64.
    pub libc: Option<Libc>,
}

impl PlatformKey {
    /// Resolve the platform of the running host.
    pub fn current(probe: &dyn LibcProbe) -> Result<Self, UnsupportedPlatform> {
        Self::resolve(std::env::consts::OS, std::env::consts::ARCH, probe)
    }

    /// Map host identifiers (in `std::env::consts` vocabulary, case
    /// sensitive) to a platform key.
    ///
    /// The table is exhaustive; anything outside it is [`UnsupportedPlatform`].
    pub fn resolve(
        os: &str,
        arch: &str,
        probe: &dyn LibcProbe,
    ) -> Result<Self, UnsupportedPlatform> {
        let key = match (os, arch) {
            ("linux", "x86_64") => {
                let libc = if probe.is_musl() { Libc::Musl } else { Libc::Glibc };
                Self {
                    os: Os::Linux,
                    arch: Arch::Amd64,
                    libc: Some(libc),
                }
            }
            ("linux", "aarch64") => Self {
                os: Os::Linux,
                arch: Arch::Arm64,
                libc: None,
            },
            ("windows", "x86_64") => Self {
                os: Os::Windows,
                arch: Arch::Amd64,
                libc: None,
            },
            ("macos", "x86_64") => Self {
                os: Os::Macos,
                arch: Arch::Amd64,
                libc: None,
            },
            ("macos", "aarch64") => Self {
                os: Os::Macos,
                arch: Arch::Arm64,
                libc: None,
            },
            _ => {
                return Err(UnsupportedPlatform {
                    os: os.to_string(),
                    arch: arch.to_string(),
                });
            }
        };
        Ok(key)
    }
}

impl fmt::Display for PlatformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)?;
        if let Some(Libc::Musl) = self.libc {
            write!(f, " (musl)")?;
        }
        Ok(())
    }
}
