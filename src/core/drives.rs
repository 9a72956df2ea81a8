//! Block device option groups: `-drive`, `-cdrom`, `-blockdev` and the
//! legacy floppy/IDE shorthands.

use serde::{Deserialize, Serialize};

use super::args::{Fragments, ToArgs, push_pair};

/// `-cdrom FILE`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CdromOptions {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub file: String,
}

impl ToArgs for CdromOptions {
    fn to_args(&self) -> Vec<String> {
        vec!["-cdrom".to_string(), self.file.clone()]
    }
}

/// `-drive file=F[,if=..][,bus=..][,unit=..][,index=..][,media=..][,format=..]`.
///
/// `file` is always emitted; the remaining keys only when set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveOptions {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub file: String,
    #[serde(rename = "if", skip_serializing_if = "String::is_empty")]
    pub interface: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub bus: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub unit: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub index: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub media: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub format: String,
}

impl ToArgs for DriveOptions {
    fn to_args(&self) -> Vec<String> {
        Fragments::new()
            .required("file", &self.file)
            .opt("if", &self.interface)
            .opt("bus", &self.bus)
            .opt("unit", &self.unit)
            .opt("index", &self.index)
            .opt("media", &self.media)
            .opt("format", &self.format)
            .finish("-drive")
    }
}

/// `-blockdev [driver=]driver[,discard=..][,read-only=..][,node-name=..]...`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockDevOptions {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub driver: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub discard: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub read_only: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub node_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cache_direct: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cache_no_flush: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub auto_read_only: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub force_share: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub detect_zeroes: String,
}

impl ToArgs for BlockDevOptions {
    fn to_args(&self) -> Vec<String> {
        Fragments::new()
            .opt("driver", &self.driver)
            .opt("discard", &self.discard)
            .opt("read-only", &self.read_only)
            .opt("node-name", &self.node_name)
            .opt("cache.direct", &self.cache_direct)
            .opt("cache.no-flush", &self.cache_no_flush)
            .opt("auto-read-only", &self.auto_read_only)
            .opt("force-share", &self.force_share)
            .opt("detect-zeroes", &self.detect_zeroes)
            .finish("-blockdev")
    }
}

/// All storage attached to a guest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockDevicesOptions {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fda: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fdb: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hda: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hdb: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hdc: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hdd: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockdev: Option<BlockDevOptions>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cdrom: Vec<CdromOptions>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub drive: Vec<DriveOptions>,
}

impl ToArgs for BlockDevicesOptions {
    fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        push_pair(&mut args, "-fda", &self.fda);
        push_pair(&mut args, "-fdb", &self.fdb);
        push_pair(&mut args, "-hda", &self.hda);
        push_pair(&mut args, "-hdb", &self.hdb);
        push_pair(&mut args, "-hdc", &self.hdc);
        push_pair(&mut args, "-hdd", &self.hdd);
        if let Some(blockdev) = &self.blockdev {
            args.extend(blockdev.to_args());
        }
        for cdrom in &self.cdrom {
            args.extend(cdrom.to_args());
        }
        for drive in &self.drive {
            args.extend(drive.to_args());
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_with_only_file() {
        let drive = DriveOptions {
            file: "disks/vm.qcow2".into(),
            ..DriveOptions::default()
        };
        assert_eq!(drive.to_args(), vec!["-drive", "file=disks/vm.qcow2"]);
    }

    #[test]
    fn drive_fragments_keep_declared_order() {
        let drive = DriveOptions {
            file: "vm.img".into(),
            interface: "virtio".into(),
            bus: "0".into(),
            unit: "1".into(),
            index: "2".into(),
            media: "disk".into(),
            format: "qcow2".into(),
        };
        assert_eq!(
            drive.to_args()[1],
            "file=vm.img,if=virtio,bus=0,unit=1,index=2,media=disk,format=qcow2"
        );
    }

    #[test]
    fn blockdev_uses_qemu_key_spelling() {
        let blockdev = BlockDevOptions {
            driver: "file".into(),
            node_name: "disk0".into(),
            read_only: "on".into(),
            cache_direct: "off".into(),
            detect_zeroes: "unmap".into(),
            ..BlockDevOptions::default()
        };
        assert_eq!(
            blockdev.to_args(),
            vec![
                "-blockdev",
                "driver=file,read-only=on,node-name=disk0,cache.direct=off,detect-zeroes=unmap"
            ]
        );
    }

    #[test]
    fn block_devices_render_shorthands_then_blockdev_cdrom_drive() {
        let devices = BlockDevicesOptions {
            fda: "floppy.img".into(),
            hda: "hd0.img".into(),
            hdd: "hd3.img".into(),
            blockdev: Some(BlockDevOptions {
                driver: "null-co".into(),
                ..BlockDevOptions::default()
            }),
            cdrom: vec![CdromOptions {
                file: "install.iso".into(),
            }],
            drive: vec![DriveOptions {
                file: "data.img".into(),
                format: "raw".into(),
                ..DriveOptions::default()
            }],
            ..BlockDevicesOptions::default()
        };
        assert_eq!(
            devices.to_args(),
            vec![
                "-fda",
                "floppy.img",
                "-hda",
                "hd0.img",
                "-hdd",
                "hd3.img",
                "-blockdev",
                "driver=null-co",
                "-cdrom",
                "install.iso",
                "-drive",
                "file=data.img,format=raw",
            ]
        );
    }

    #[test]
    fn empty_block_devices_render_nothing() {
        assert!(BlockDevicesOptions::default().to_args().is_empty());
    }
}
