// ABOUTME: Linux capability names accepted by cap_add and cap_drop.
// ABOUTME: Tokens outside the fixed capability table are rejected.

use super::element::ListItem;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

const CAPABILITY_NAMES: &[&str] = &[
    "CAP_AUDIT_CONTROL",
    "CAP_AUDIT_READ",
    "CAP_AUDIT_WRITE",
    "CAP_BLOCK_SUSPEND",
    "CAP_BPF",
    "CAP_CHECKPOINT_RESTORE",
    "CAP_CHOWN",
    "CAP_DAC_OVERRIDE",
    "CAP_DAC_READ_SEARCH",
    "CAP_FOWNER",
    "CAP_FSETID",
    "CAP_IPC_LOCK",
    "CAP_IPC_OWNER",
    "CAP_KILL",
    "CAP_LEASE",
    "CAP_LINUX_IMMUTABLE",
    "CAP_MAC_ADMIN",
    "CAP_MAC_OVERRIDE",
    "CAP_MKNOD",
    "CAP_NET_ADMIN",
    "CAP_NET_BIND_SERVICE",
    "CAP_NET_BROADCAST",
    "CAP_NET_RAW",
    "CAP_PERFMON",
    "CAP_SETGID",
    "CAP_SETFCAP",
    "CAP_SETPCAP",
    "CAP_SETUID",
    "CAP_SYS_ADMIN",
    "CAP_SYS_BOOT",
    "CAP_SYS_CHROOT",
    "CAP_SYS_MODULE",
    "CAP_SYS_NICE",
    "CAP_SYS_PACCT",
    "CAP_SYS_PTRACE",
    "CAP_SYS_RAWIO",
    "CAP_SYS_RESOURCE",
    "CAP_SYS_TIME",
    "CAP_SYS_TTY_CONFIG",
    "CAP_SYSLOG",
    "CAP_WAKE_ALARM",
];

static CAPABILITIES: LazyLock<BTreeSet<&'static str>> =
    LazyLock::new(|| CAPABILITY_NAMES.iter().copied().collect());

/// A validated capability name such as `CAP_NET_ADMIN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Capability(&'static str);

impl Capability {
    pub fn parse(name: &str) -> Result<Self, String> {
        CAPABILITIES
            .get(name)
            .map(|known| Capability(*known))
            .ok_or_else(|| format!("unknown capability: {}", name))
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Every capability name in the table.
    pub fn all() -> impl Iterator<Item = Capability> {
        CAPABILITIES.iter().map(|name| Capability(*name))
    }
}

impl ListItem for Capability {
    fn from_token(token: &str) -> Result<Self, String> {
        Capability::parse(token)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
