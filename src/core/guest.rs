use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::args::{ToArgs, is_false, push_pair};
use super::devices::DeviceOptions;
use super::drives::BlockDevicesOptions;
use super::engine::EngineArch;
use super::memory::MemoryOptions;
use super::network::{
    NetdevAfXdpOptions, NetdevBridgeOptions, NetdevHubportOptions, NetdevL2tpv3Options,
    NetdevPasstOptions, NetdevSocketOptions, NetdevTapOptions, NetdevUserOptions,
    NetdevVdeOptions, NetdevVhostUserOptions, NetdevVhostVdpaOptions, NicOptions,
};
use super::qmp::QmpOptions;
use super::smp::SmpOptions;

/// A guest definition: identity plus every option group passed to the emulator.
///
/// An absent group means its flags are not emitted at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Guest {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    pub engine: EngineArch,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub mem_path: String,
    #[serde(skip_serializing_if = "is_false")]
    pub mem_prealloc: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub daemonize: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub keyboard: String,
    #[serde(skip_serializing_if = "is_false")]
    pub no_graphic: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemoryOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smp: Option<SmpOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_devices: Option<BlockDevicesOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qmp: Option<QmpOptions>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nics: Vec<NicOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub netdev_bridge: Option<NetdevBridgeOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub netdev_hubport: Option<NetdevHubportOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub netdev_passt: Option<NetdevPasstOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub netdev_tap: Option<NetdevTapOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub netdev_user: Option<NetdevUserOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub netdev_vde: Option<NetdevVdeOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub netdev_vhost_user: Option<NetdevVhostUserOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub netdev_vhost_vdpa: Option<NetdevVhostVdpaOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub netdev_af_xdp: Option<NetdevAfXdpOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub netdev_l2tpv3: Option<NetdevL2tpv3Options>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub netdev_socket: Option<NetdevSocketOptions>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub devices: Vec<DeviceOptions>,
}

impl Guest {
    pub fn new(name: impl Into<String>, engine: EngineArch) -> Self {
        Self {
            name: name.into(),
            engine,
            ..Self::default()
        }
    }

    /// Assigns a random UUID if none is set and returns the current one.
    pub fn ensure_uuid(&mut self) -> &str {
        if self.uuid.is_empty() {
            self.uuid = Uuid::new_v4().to_string();
        }
        &self.uuid
    }

    /// Full emulator argument vector, starting with the emulator binary name.
    ///
    /// Generates and stores a UUID when the guest has none yet.
    pub fn to_args(&mut self) -> Vec<String> {
        self.ensure_uuid();

        let mut args = vec![
            self.engine.binary_name().to_string(),
            "-name".to_string(),
            self.name.clone(),
            "-uuid".to_string(),
            self.uuid.clone(),
        ];

        if let Some(memory) = &self.memory {
            args.extend(memory.to_args());
        }
        push_pair(&mut args, "-mem-path", &self.mem_path);
        if self.mem_prealloc {
            args.push("-mem-prealloc".to_string());
        }
        if let Some(smp) = &self.smp {
            args.extend(smp.to_args());
        }
        if let Some(block_devices) = &self.block_devices {
            args.extend(block_devices.to_args());
        }
        if let Some(qmp) = &self.qmp {
            args.extend(qmp.to_args());
        }
        for nic in &self.nics {
            args.extend(nic.to_args());
        }

        for netdev in self.netdevs() {
            args.extend(netdev.to_args());
        }

        for device in &self.devices {
            args.extend(device.to_args());
        }
        push_pair(&mut args, "-k", &self.keyboard);
        if self.no_graphic {
            args.push("-nographic".to_string());
        }
        if self.daemonize {
            args.push("-daemonize".to_string());
        }

        args
    }

    /// Configured netdev backends in emission order.
    fn netdevs(&self) -> Vec<&dyn ToArgs> {
        let backends: [Option<&dyn ToArgs>; 11] = [
            self.netdev_bridge.as_ref().map(|n| n as &dyn ToArgs),
            self.netdev_hubport.as_ref().map(|n| n as &dyn ToArgs),
            self.netdev_passt.as_ref().map(|n| n as &dyn ToArgs),
            self.netdev_tap.as_ref().map(|n| n as &dyn ToArgs),
            self.netdev_user.as_ref().map(|n| n as &dyn ToArgs),
            self.netdev_vde.as_ref().map(|n| n as &dyn ToArgs),
            self.netdev_vhost_user.as_ref().map(|n| n as &dyn ToArgs),
            self.netdev_vhost_vdpa.as_ref().map(|n| n as &dyn ToArgs),
            self.netdev_af_xdp.as_ref().map(|n| n as &dyn ToArgs),
            self.netdev_l2tpv3.as_ref().map(|n| n as &dyn ToArgs),
            self.netdev_socket.as_ref().map(|n| n as &dyn ToArgs),
        ];
        backends.into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::drives::DriveOptions;
    use crate::core::network::NicType;

    #[test]
    fn identity_prefix_and_generated_uuid() {
        let mut guest = Guest::new("devbox", EngineArch::Aarch64);
        let args = guest.to_args();
        assert_eq!(&args[..4], ["qemu-system-aarch64", "-name", "devbox", "-uuid"]);
        assert!(!guest.uuid.is_empty());
        assert_eq!(args[4], guest.uuid);
        assert!(Uuid::parse_str(&guest.uuid).is_ok());
    }

    #[test]
    fn existing_uuid_is_kept() {
        let mut guest = Guest::new("fixed", EngineArch::X86_64);
        guest.uuid = "6f1b3c7e-8f0a-4a5e-9c1d-2b3a4c5d6e7f".into();
        let first = guest.to_args();
        let second = guest.to_args();
        assert_eq!(first, second);
        assert_eq!(guest.uuid, "6f1b3c7e-8f0a-4a5e-9c1d-2b3a4c5d6e7f");
    }

    #[test]
    fn bare_guest_renders_identity_only() {
        let mut guest = Guest::new("bare", EngineArch::X86_64);
        guest.uuid = "u".into();
        assert_eq!(
            guest.to_args(),
            vec!["qemu-system-x86_64", "-name", "bare", "-uuid", "u"]
        );
    }

    #[test]
    fn groups_render_in_fixed_order() {
        let mut guest = Guest {
            name: "full".into(),
            uuid: "id".into(),
            engine: EngineArch::X86_64,
            mem_path: "/dev/hugepages".into(),
            mem_prealloc: true,
            daemonize: true,
            keyboard: "fr".into(),
            no_graphic: true,
            memory: Some(MemoryOptions::new(1024)),
            smp: Some(SmpOptions {
                cpus: 2,
                ..SmpOptions::default()
            }),
            block_devices: Some(BlockDevicesOptions {
                drive: vec![DriveOptions {
                    file: "disk.qcow2".into(),
                    ..DriveOptions::default()
                }],
                ..BlockDevicesOptions::default()
            }),
            qmp: Some(QmpOptions {
                proto_path: "stdio".into(),
                ..QmpOptions::default()
            }),
            nics: vec![NicOptions {
                kind: NicType::None,
                ..NicOptions::default()
            }],
            netdev_tap: Some(NetdevTapOptions {
                id: "t0".into(),
                ..NetdevTapOptions::default()
            }),
            netdev_bridge: Some(NetdevBridgeOptions {
                id: "b0".into(),
                ..NetdevBridgeOptions::default()
            }),
            netdev_socket: Some(NetdevSocketOptions {
                id: "s0".into(),
                ..NetdevSocketOptions::default()
            }),
            devices: vec![DeviceOptions::new("virtio-net-pci", "netdev=t0")],
            ..Guest::default()
        };

        assert_eq!(
            guest.to_args(),
            vec![
                "qemu-system-x86_64",
                "-name",
                "full",
                "-uuid",
                "id",
                "-m",
                "size=1024",
                "-mem-path",
                "/dev/hugepages",
                "-mem-prealloc",
                "-smp",
                "cpus=2",
                "-drive",
                "file=disk.qcow2",
                "-qmp",
                "stdio",
                "-nic",
                "none",
                "-netdev",
                "bridge,id=b0",
                "-netdev",
                "tap,id=t0",
                "-netdev",
                "socket,id=s0",
                "-device",
                "virtio-net-pci,netdev=t0",
                "-k",
                "fr",
                "-nographic",
                "-daemonize",
            ]
        );
    }
}
