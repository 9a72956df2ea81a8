use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::args::{Fragments, ToArgs, is_false};

/// QMP control channel endpoint.
///
/// `proto_path` is `stdio`, `unix:PATH` or `tcp:HOST:PORT`. The `serve` and
/// `wait` modifiers only apply to the socket forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QmpOptions {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub proto_path: String,
    #[serde(skip_serializing_if = "is_false")]
    pub wait: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub serve: bool,
}

impl QmpOptions {
    pub fn unix(path: impl Into<PathBuf>, serve: bool, wait: bool) -> Self {
        Self {
            proto_path: format!("unix:{}", path.into().display()),
            wait,
            serve,
        }
    }

    pub fn is_stdio(&self) -> bool {
        self.proto_path.eq_ignore_ascii_case("stdio")
    }

    /// Filesystem path of a `unix:` endpoint.
    pub fn unix_socket_path(&self) -> Option<PathBuf> {
        self.proto_path
            .strip_prefix("unix:")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
    }
}

impl ToArgs for QmpOptions {
    fn to_args(&self) -> Vec<String> {
        let fragments = if self.is_stdio() {
            Fragments::head("stdio")
        } else {
            Fragments::head(self.proto_path.as_str())
                .flag_if("server", self.serve)
                .flag_if(if self.wait { "wait" } else { "nowait" }, true)
        };
        fragments.finish("-qmp")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_server_nowait() {
        let qmp = QmpOptions {
            proto_path: "unix:/tmp/q.sock".into(),
            serve: true,
            wait: false,
        };
        assert_eq!(qmp.to_args(), vec!["-qmp", "unix:/tmp/q.sock,server,nowait"]);
    }

    #[test]
    fn stdio_ignores_modifiers() {
        let qmp = QmpOptions {
            proto_path: "STDIO".into(),
            serve: true,
            wait: true,
        };
        assert_eq!(qmp.to_args(), vec!["-qmp", "stdio"]);
    }

    #[test]
    fn tcp_client_wait() {
        let qmp = QmpOptions {
            proto_path: "tcp:127.0.0.1:4444".into(),
            serve: false,
            wait: true,
        };
        assert_eq!(qmp.to_args(), vec!["-qmp", "tcp:127.0.0.1:4444,wait"]);
    }

    #[test]
    fn unix_socket_path_is_extracted() {
        let qmp = QmpOptions::unix("/run/vm/guest.qmp", false, false);
        assert_eq!(qmp.proto_path, "unix:/run/vm/guest.qmp");
        assert_eq!(
            qmp.unix_socket_path(),
            Some(PathBuf::from("/run/vm/guest.qmp"))
        );

        let tcp = QmpOptions {
            proto_path: "tcp:localhost:4444".into(),
            ..QmpOptions::default()
        };
        assert_eq!(tcp.unix_socket_path(), None);
    }
}
