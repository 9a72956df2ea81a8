use serde::{Deserialize, Serialize};

use super::args::{Fragments, ToArgs, is_zero_u32};

/// vCPU topology rendered as `-smp`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmpOptions {
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub cpus: u32,
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub dies: u32,
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub cores: u32,
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub books: u32,
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub drawers: u32,
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub maxcpus: u32,
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub modules: u32,
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub sockets: u32,
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub threads: u32,
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub clusters: u32,
}

impl ToArgs for SmpOptions {
    fn to_args(&self) -> Vec<String> {
        Fragments::new()
            .num("cpus", self.cpus.into())
            .num("dies", self.dies.into())
            .num("cores", self.cores.into())
            .num("books", self.books.into())
            .num("drawers", self.drawers.into())
            .num("maxcpus", self.maxcpus.into())
            .num("modules", self.modules.into())
            .num("sockets", self.sockets.into())
            .num("threads", self.threads.into())
            .num("clusters", self.clusters.into())
            .finish("-smp")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpus_and_cores() {
        let smp = SmpOptions {
            cpus: 4,
            cores: 2,
            ..SmpOptions::default()
        };
        assert_eq!(smp.to_args(), vec!["-smp", "cpus=4,cores=2"]);
    }

    #[test]
    fn full_topology_keeps_declared_order() {
        let smp = SmpOptions {
            cpus: 16,
            dies: 1,
            cores: 4,
            books: 1,
            drawers: 1,
            maxcpus: 32,
            modules: 1,
            sockets: 2,
            threads: 2,
            clusters: 1,
        };
        assert_eq!(
            smp.to_args()[1],
            "cpus=16,dies=1,cores=4,books=1,drawers=1,maxcpus=32,modules=1,sockets=2,threads=2,clusters=1"
        );
    }

    #[test]
    fn empty_topology_renders_empty_value() {
        assert_eq!(SmpOptions::default().to_args(), vec!["-smp", ""]);
    }
}
