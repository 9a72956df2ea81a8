use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownVariant;

/// QEMU system emulator used to run a guest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EngineArch {
    #[default]
    X86_64,
    Arm,
    M68k,
    I386,
    Mips,
    S390x,
    Ppc32,
    Ppc64,
    Riscv32,
    Riscv64,
    Aarch64,
}

const ENGINES: [(EngineArch, &str); 11] = [
    (EngineArch::X86_64, "qemu-system-x86_64"),
    (EngineArch::Arm, "qemu-system-arm"),
    (EngineArch::M68k, "qemu-system-m68k"),
    (EngineArch::I386, "qemu-system-i386"),
    (EngineArch::Mips, "qemu-system-mips"),
    (EngineArch::S390x, "qemu-system-s390x"),
    (EngineArch::Ppc32, "qemu-system-ppc32"),
    (EngineArch::Ppc64, "qemu-system-ppc64"),
    (EngineArch::Riscv32, "qemu-system-riscv32"),
    (EngineArch::Riscv64, "qemu-system-riscv64"),
    (EngineArch::Aarch64, "qemu-system-aarch64"),
];

impl EngineArch {
    /// Emulator binary name, e.g. `qemu-system-x86_64`.
    pub fn binary_name(self) -> &'static str {
        ENGINES
            .iter()
            .find(|(engine, _)| *engine == self)
            .map(|(_, name)| *name)
            .unwrap_or("qemu-system-x86_64")
    }

    pub fn all() -> impl Iterator<Item = EngineArch> {
        ENGINES.iter().map(|(engine, _)| *engine)
    }
}

impl fmt::Display for EngineArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary_name())
    }
}

impl FromStr for EngineArch {
    type Err = UnknownVariant;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let lower = input.trim().to_ascii_lowercase();
        ENGINES
            .iter()
            .find(|(_, name)| *name == lower)
            .map(|(engine, _)| *engine)
            .ok_or_else(|| UnknownVariant {
                kind: "emulator",
                value: input.to_string(),
                expected: ENGINES
                    .iter()
                    .map(|(_, name)| *name)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl TryFrom<String> for EngineArch {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EngineArch> for String {
    fn from(engine: EngineArch) -> Self {
        engine.binary_name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_engine_round_trips_through_its_name() {
        for engine in EngineArch::all() {
            assert_eq!(engine.binary_name().parse::<EngineArch>(), Ok(engine));
        }
    }

    #[test]
    fn parsing_ignores_case() {
        assert_eq!(
            "QEMU-System-Aarch64".parse::<EngineArch>(),
            Ok(EngineArch::Aarch64)
        );
    }

    #[test]
    fn unknown_engine_is_rejected() {
        let err = "qemu-system-sparc".parse::<EngineArch>().unwrap_err();
        assert_eq!(err.value, "qemu-system-sparc");
        assert!(err.to_string().contains("qemu-system-x86_64"));
    }

    #[test]
    fn default_is_x86_64() {
        assert_eq!(EngineArch::default().to_string(), "qemu-system-x86_64");
    }
}
