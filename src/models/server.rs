//! Server status snapshot.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryInfo {
    pub current: u64,
    pub total: u64,
}

impl MemoryInfo {
    /// Usage in percent, 0 when the total is unknown.
    pub fn usage_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.current as f64 * 100.0 / self.total as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XrayInfo {
    pub state: String,
    #[serde(default)]
    pub error_msg: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkIo {
    pub up: u64,
    pub down: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkTraffic {
    pub sent: u64,
    pub recv: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicIp {
    pub ipv4: String,
    pub ipv6: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppStats {
    pub threads: u64,
    pub mem: u64,
    pub uptime: u64,
}

/// CPU, memory, network and Xray state of the panel host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatus {
    /// CPU usage in percent.
    pub cpu: f64,
    pub cpu_cores: u32,
    pub logical_pro: u32,
    pub cpu_speed_mhz: f64,
    pub mem: MemoryInfo,
    pub swap: MemoryInfo,
    pub disk: MemoryInfo,
    pub xray: XrayInfo,
    /// Host uptime in seconds.
    pub uptime: u64,
    /// 1, 5 and 15 minute load averages.
    pub loads: Vec<f64>,
    pub tcp_count: u64,
    pub udp_count: u64,
    #[serde(rename = "netIO")]
    pub net_io: NetworkIo,
    pub net_traffic: NetworkTraffic,
    #[serde(rename = "publicIP")]
    pub public_ip: PublicIp,
    pub app_stats: AppStats,
}
