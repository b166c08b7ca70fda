/*!
 * Network Process
 * Sends a random number of packets between two ports
 */

use super::{Completion, RunResult};
use crate::core::errors::{ProcessError, ProcessResult};
use crate::core::limits::{PACKETS_MAX, PACKETS_MIN, PORT_MAX, PORT_MIN};
use crate::core::types::Priority;
use crate::process::timing::ExecutionContext;
use crate::process::validation::in_range;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Protocol {
    Tcp,
    Udp,
    Http,
    Https,
}

impl Protocol {
    pub const NAMES: [&'static str; 4] = ["TCP", "UDP", "HTTP", "HTTPS"];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tcp => "TCP",
            Self::Udp => "UDP",
            Self::Http => "HTTP",
            Self::Https => "HTTPS",
        }
    }
}

impl FromStr for Protocol {
    type Err = ProcessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TCP" => Ok(Self::Tcp),
            "UDP" => Ok(Self::Udp),
            "HTTP" => Ok(Self::Http),
            "HTTPS" => Ok(Self::Https),
            _ => Err(ProcessError::invalid_choice("protocol", s, &Self::NAMES)),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct NetworkProcess {
    protocol: Protocol,
    source_port: u16,
    dest_port: u16,
    packets_sent: u32,
}

impl NetworkProcess {
    pub const PRIORITY: Priority = 6;

    pub fn new(protocol: Protocol, source_port: i64, dest_port: i64) -> ProcessResult<Self> {
        Ok(Self {
            protocol,
            source_port: validate_port("source port", source_port)?,
            dest_port: validate_port("destination port", dest_port)?,
            packets_sent: 0,
        })
    }

    #[inline]
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    #[inline]
    pub fn source_port(&self) -> u16 {
        self.source_port
    }

    #[inline]
    pub fn dest_port(&self) -> u16 {
        self.dest_port
    }

    /// Packets sent by the last execution (0 before the first)
    #[inline]
    pub fn packets_sent(&self) -> u32 {
        self.packets_sent
    }

    pub fn set_protocol(&mut self, protocol: Protocol) {
        self.protocol = protocol;
    }

    pub fn set_source_port(&mut self, port: i64) -> ProcessResult<()> {
        self.source_port = validate_port("source port", port)?;
        Ok(())
    }

    pub fn set_dest_port(&mut self, port: i64) -> ProcessResult<()> {
        self.dest_port = validate_port("destination port", port)?;
        Ok(())
    }

    pub(super) fn describe(&self) -> String {
        format!(
            "Protocol={}, Ports {}→{}, Packets={}",
            self.protocol, self.source_port, self.dest_port, self.packets_sent
        )
    }

    pub(super) fn run(&mut self, ctx: &ExecutionContext) -> RunResult {
        let elapsed = ctx.base_wait()?;
        self.packets_sent = ctx
            .entropy()
            .between(u64::from(PACKETS_MIN), u64::from(PACKETS_MAX)) as u32;

        Ok(Completion::new(
            elapsed,
            format!(
                "Protocol {} | Port {} → {} | Packets sent: {}",
                self.protocol, self.source_port, self.dest_port, self.packets_sent
            ),
        ))
    }
}

fn validate_port(field: &str, port: i64) -> ProcessResult<u16> {
    Ok(in_range(field, port, i64::from(PORT_MIN), i64::from(PORT_MAX))? as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_bounds() {
        assert!(NetworkProcess::new(Protocol::Tcp, 1, 65535).is_ok());
        assert!(NetworkProcess::new(Protocol::Tcp, 0, 80).is_err());
        assert!(NetworkProcess::new(Protocol::Tcp, 8080, 65536).is_err());
    }

    #[test]
    fn test_protocol_parsing() {
        assert_eq!("https".parse::<Protocol>().unwrap(), Protocol::Https);
        assert!("FTP".parse::<Protocol>().is_err());
    }

    #[test]
    fn test_port_setters_revalidate() {
        let mut net = NetworkProcess::new(Protocol::Udp, 5353, 53).unwrap();
        assert!(net.set_dest_port(70_000).is_err());
        assert_eq!(net.dest_port(), 53);
        net.set_source_port(6000).unwrap();
        assert_eq!(net.source_port(), 6000);
    }
}
