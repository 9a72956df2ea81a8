use serde::{Deserialize, Serialize};

use super::args::{Fragments, ToArgs, is_zero_u32};

/// Guest RAM configuration rendered as `-m size=N[,slots=S][,maxmem=M]`.
///
/// Sizes are in megabytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryOptions {
    pub size: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub slots: String,
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub maxmem: u32,
}

impl MemoryOptions {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }
}

impl ToArgs for MemoryOptions {
    fn to_args(&self) -> Vec<String> {
        Fragments::new()
            .required("size", self.size)
            .opt("slots", &self.slots)
            .num("maxmem", self.maxmem.into())
            .finish("-m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_only_renders_single_fragment() {
        assert_eq!(MemoryOptions::new(2048).to_args(), vec!["-m", "size=2048"]);
    }

    #[test]
    fn hotplug_fields_follow_size() {
        let memory = MemoryOptions {
            size: 1024,
            slots: "4".into(),
            maxmem: 8192,
        };
        assert_eq!(
            memory.to_args(),
            vec!["-m", "size=1024,slots=4,maxmem=8192"]
        );
    }

    #[test]
    fn clearing_slots_drops_the_fragment() {
        let mut memory = MemoryOptions {
            size: 512,
            slots: "2".into(),
            maxmem: 0,
        };
        assert_eq!(memory.to_args()[1], "size=512,slots=2");
        memory.slots.clear();
        assert_eq!(memory.to_args()[1], "size=512");
    }
}
