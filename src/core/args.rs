//! Shared helpers for rendering option groups into emulator arguments.

/// An option group that renders itself into command-line tokens.
pub trait ToArgs {
    fn to_args(&self) -> Vec<String>;
}

/// Comma-joined `key=value` fragment list for a single flag.
///
/// Empty strings and zero integers are skipped so optional keys are never
/// emitted with an empty value.
#[derive(Debug, Default)]
pub struct Fragments {
    parts: Vec<String>,
}

impl Fragments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fragment list with a bare leading word such as `user` or `tap`.
    pub fn head(word: impl Into<String>) -> Self {
        Self {
            parts: vec![word.into()],
        }
    }

    pub fn opt(mut self, key: &str, value: &str) -> Self {
        if !value.is_empty() {
            self.parts.push(format!("{key}={value}"));
        }
        self
    }

    pub fn num(mut self, key: &str, value: u64) -> Self {
        if value > 0 {
            self.parts.push(format!("{key}={value}"));
        }
        self
    }

    /// Always emits `key=value`, even when the value is zero or empty.
    pub fn required(mut self, key: &str, value: impl std::fmt::Display) -> Self {
        self.parts.push(format!("{key}={value}"));
        self
    }

    /// Appends an already-formatted fragment verbatim when non-empty.
    pub fn raw(mut self, value: &str) -> Self {
        if !value.is_empty() {
            self.parts.push(value.to_string());
        }
        self
    }

    pub fn flag_if(mut self, word: &str, enabled: bool) -> Self {
        if enabled {
            self.parts.push(word.to_string());
        }
        self
    }

    pub fn join(&self) -> String {
        self.parts.join(",")
    }

    pub fn finish(self, flag: &str) -> Vec<String> {
        vec![flag.to_string(), self.join()]
    }
}

/// Pushes `flag value` when the value is non-empty.
pub(crate) fn push_pair(args: &mut Vec<String>, flag: &str, value: &str) {
    if !value.is_empty() {
        args.push(flag.to_string());
        args.push(value.to_string());
    }
}

pub(crate) fn is_zero_u32(value: &u32) -> bool {
    *value == 0
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_empty_and_zero_values() {
        let rendered = Fragments::head("user")
            .opt("id", "net0")
            .opt("ipv4", "")
            .num("queues", 0)
            .num("sndbuf", 4096)
            .finish("-netdev");
        assert_eq!(rendered, vec!["-netdev", "user,id=net0,sndbuf=4096"]);
    }

    #[test]
    fn required_values_are_always_emitted() {
        let rendered = Fragments::new().required("size", 0).finish("-m");
        assert_eq!(rendered, vec!["-m", "size=0"]);
    }

    #[test]
    fn raw_fragments_are_appended_verbatim() {
        let rendered = Fragments::head("virtio-net-pci")
            .raw("netdev=n0,mac=52:54:00:12:34:56")
            .raw("")
            .finish("-device");
        assert_eq!(
            rendered,
            vec!["-device", "virtio-net-pci,netdev=n0,mac=52:54:00:12:34:56"]
        );
    }

    #[test]
    fn push_pair_skips_empty_values() {
        let mut args = Vec::new();
        push_pair(&mut args, "-hda", "");
        push_pair(&mut args, "-hdb", "disk.img");
        assert_eq!(args, vec!["-hdb", "disk.img"]);
    }
}
