//! Locating the Cube on the local network.
//!
//! A fixed probe is broadcast over UDP and the first non-echo datagram is
//! taken as the Cube's reply. When nothing answers, every host of the
//! configured range is probed with a short TCP connect on the Cube port.

use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, TcpStream, UdpSocket};
use std::ops::Range;
use std::time::{Duration, Instant};

use crate::config::CubeConfig;
use crate::error::DiscoveryError;
use crate::subnet::Ipv4Subnet;
use crate::transport::is_timeout;

/// Discovery probe understood by every Cube: `eQ3Max*\0**********I`.
pub const PROBE: [u8; 19] = *b"eQ3Max*\0**********I";

/// Identification fields of a Cube's discovery reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryInfo {
    /// Bytes 0 to 8 of the reply (`eQ3MaxAp` on real hardware).
    pub generic_reply: String,
    /// Bytes 9 to 18 of the reply.
    pub serial_number: String,
    /// Last two bytes of the reply, hex-encoded.
    pub firmware_version: String,
    /// Source address of the reply.
    pub address: IpAddr,
}

/// Where the Cube was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeLocation {
    pub address: IpAddr,
    /// Present only when the Cube answered the broadcast probe.
    pub info: Option<DiscoveryInfo>,
}

/// Extract the identification fields from a reply datagram.
///
/// Short replies yield truncated or empty fields.
#[must_use]
pub fn parse_reply(datagram: &[u8], address: IpAddr) -> DiscoveryInfo {
    let text = |range: Range<usize>| {
        let end = range.end.min(datagram.len());
        let start = range.start.min(end);
        String::from_utf8_lossy(&datagram[start..end]).into_owned()
    };
    DiscoveryInfo {
        generic_reply: text(0..8),
        serial_number: text(9..18),
        firmware_version: hex::encode(&datagram[datagram.len().saturating_sub(2)..]),
        address,
    }
}

/// Wait up to `timeout` for a reply on `socket`.
///
/// Datagrams identical to `probe` are our own broadcast looping back and
/// are skipped without extending the deadline.
///
/// # Errors
///
/// Returns any socket error other than a timeout.
pub fn await_reply(
    socket: &UdpSocket,
    probe: &[u8],
    timeout: Duration,
) -> io::Result<Option<DiscoveryInfo>> {
    let deadline = Instant::now() + timeout;
    let mut buffer = [0u8; 1024];
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Ok(None);
        }
        socket.set_read_timeout(Some(remaining))?;
        match socket.recv_from(&mut buffer) {
            Ok((size, from)) => {
                let datagram = &buffer[..size];
                if datagram == probe {
                    tracing::trace!(%from, "ignoring echo of discovery probe");
                    continue;
                }
                tracing::debug!(%from, bytes = size, "received discovery reply");
                return Ok(Some(parse_reply(datagram, from.ip())));
            }
            Err(err) if is_timeout(&err) => return Ok(None),
            Err(err) => return Err(err),
        }
    }
}

fn broadcast_probe(broadcast: Ipv4Addr, config: &CubeConfig) -> io::Result<Option<DiscoveryInfo>> {
    let listener = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, config.discovery_port))?;
    let sender = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    sender.set_broadcast(true)?;
    sender.send_to(&PROBE, (broadcast, config.discovery_port))?;
    tracing::debug!(%broadcast, port = config.discovery_port, "sent discovery probe");
    await_reply(&listener, &PROBE, config.discovery_timeout())
}

/// Return the first host accepting a TCP connection on `port`.
pub fn scan_hosts<I>(hosts: I, port: u16, timeout: Duration) -> Option<IpAddr>
where
    I: IntoIterator<Item = Ipv4Addr>,
{
    hosts
        .into_iter()
        .map(IpAddr::V4)
        .find(|&host| accepts_connection(SocketAddr::new(host, port), timeout))
}

fn accepts_connection(addr: SocketAddr, timeout: Duration) -> bool {
    match TcpStream::connect_timeout(&addr, timeout) {
        Ok(_) => true,
        Err(err) => {
            tracing::trace!(%addr, error = %err, "no cube");
            false
        }
    }
}

/// Locate the Cube in the configured network range.
///
/// # Errors
///
/// Returns [`DiscoveryError::InvalidNetwork`] if the range cannot be parsed
/// and [`DiscoveryError::NotFound`] if neither strategy finds a Cube.
pub fn discover(config: &CubeConfig) -> Result<CubeLocation, DiscoveryError> {
    let subnet: Ipv4Subnet = config.network.parse()?;
    tracing::info!(network = %subnet, "looking for MAX! Cube");
    let broadcast = broadcast_probe(subnet.broadcast(), config);
    resolve_location(broadcast, subnet, config.port, config.scan_timeout())
}

fn resolve_location(
    broadcast: io::Result<Option<DiscoveryInfo>>,
    subnet: Ipv4Subnet,
    port: u16,
    scan_timeout: Duration,
) -> Result<CubeLocation, DiscoveryError> {
    match broadcast {
        Ok(Some(info)) => {
            tracing::info!(
                address = %info.address,
                serial = %info.serial_number,
                firmware = %info.firmware_version,
                "found MAX! Cube through broadcast discovery"
            );
            return Ok(CubeLocation {
                address: info.address,
                info: Some(info),
            });
        }
        Ok(None) => tracing::warn!(
            "could not find MAX! Cube through broadcast discovery, retrying with tcp scan, this may take a while"
        ),
        Err(err) => tracing::warn!(
            error = %err,
            "broadcast discovery failed, retrying with tcp scan, this may take a while"
        ),
    }

    if let Some(address) = scan_hosts(subnet.hosts(), port, scan_timeout) {
        tracing::info!(%address, "found MAX! Cube through tcp scan");
        return Ok(CubeLocation {
            address,
            info: None,
        });
    }

    tracing::error!(network = %subnet, "could not find any MAX! Cube");
    Err(DiscoveryError::NotFound {
        network: subnet.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    fn loopback_pair() -> (UdpSocket, UdpSocket) {
        let listener = UdpSocket::bind("127.0.0.1:0").unwrap();
        let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
        (listener, sender)
    }

    fn reply() -> Vec<u8> {
        let mut datagram = b"eQ3MaxApKEQ0523864>I".to_vec();
        datagram.extend_from_slice(&[0x00, 0x09, 0x7F, 0x2C, 0x01, 0x13]);
        datagram
    }

    #[test]
    fn should_match_documented_probe_bytes() {
        assert_eq!(hex::encode(PROBE), "6551334d61782a002a2a2a2a2a2a2a2a2a2a49");
    }

    #[test]
    fn should_parse_reply_fields() {
        let info = parse_reply(&reply(), IpAddr::V4(Ipv4Addr::new(192, 168, 178, 20)));
        assert_eq!(info.generic_reply, "eQ3MaxAp");
        assert_eq!(info.serial_number, "EQ0523864");
        assert_eq!(info.firmware_version, "0113");
        assert_eq!(info.address, IpAddr::V4(Ipv4Addr::new(192, 168, 178, 20)));
    }

    #[test]
    fn should_tolerate_short_reply() {
        let info = parse_reply(b"eQ3", IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(info.generic_reply, "eQ3");
        assert_eq!(info.serial_number, "");
        assert_eq!(info.firmware_version, "5133");
    }

    #[test]
    fn should_ignore_echo_of_probe() {
        let (listener, sender) = loopback_pair();
        sender.send_to(&PROBE, listener.local_addr().unwrap()).unwrap();

        let result = await_reply(&listener, &PROBE, Duration::from_millis(200)).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn should_take_first_datagram_after_echo() {
        let (listener, sender) = loopback_pair();
        let target = listener.local_addr().unwrap();
        sender.send_to(&PROBE, target).unwrap();
        sender.send_to(&reply(), target).unwrap();

        let info = await_reply(&listener, &PROBE, Duration::from_secs(1))
            .unwrap()
            .unwrap();

        assert_eq!(info.serial_number, "EQ0523864");
        assert_eq!(info.address, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn should_time_out_without_reply() {
        let (listener, _sender) = loopback_pair();
        let started = Instant::now();
        let result = await_reply(&listener, &PROBE, Duration::from_millis(100)).unwrap();
        assert!(result.is_none());
        assert!(started.elapsed() >= Duration::from_millis(100));
    }

    #[test]
    fn should_find_listening_host_by_scan() {
        let cube = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = cube.local_addr().unwrap().port();

        let found = scan_hosts([Ipv4Addr::LOCALHOST], port, Duration::from_millis(500));

        assert_eq!(found, Some(IpAddr::V4(Ipv4Addr::LOCALHOST)));
    }

    #[test]
    fn should_find_nothing_when_port_is_closed() {
        let port = {
            let cube = TcpListener::bind("127.0.0.1:0").unwrap();
            cube.local_addr().unwrap().port()
        };
        assert!(scan_hosts([Ipv4Addr::LOCALHOST], port, Duration::from_millis(200)).is_none());
    }

    #[test]
    fn should_fall_back_to_scan_after_echo_only() {
        let (listener, sender) = loopback_pair();
        sender.send_to(&PROBE, listener.local_addr().unwrap()).unwrap();
        let broadcast = await_reply(&listener, &PROBE, Duration::from_millis(100));

        let cube = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = cube.local_addr().unwrap().port();
        let location = resolve_location(
            broadcast,
            "127.0.0.1/32".parse().unwrap(),
            port,
            Duration::from_millis(500),
        )
        .unwrap();

        assert_eq!(location.address, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert!(location.info.is_none());
    }

    #[test]
    fn should_prefer_broadcast_reply() {
        let info = parse_reply(&reply(), IpAddr::V4(Ipv4Addr::new(10, 0, 0, 9)));
        let location = resolve_location(
            Ok(Some(info.clone())),
            "10.0.0.0/24".parse().unwrap(),
            62910,
            Duration::from_millis(10),
        )
        .unwrap();
        assert_eq!(location.address, info.address);
        assert_eq!(location.info, Some(info));
    }

    #[test]
    fn should_report_not_found_when_both_strategies_fail() {
        let port = {
            let cube = TcpListener::bind("127.0.0.1:0").unwrap();
            cube.local_addr().unwrap().port()
        };
        let err = resolve_location(
            Err(io::ErrorKind::PermissionDenied.into()),
            "127.0.0.1/32".parse().unwrap(),
            port,
            Duration::from_millis(200),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DiscoveryError::NotFound { ref network } if network == "127.0.0.1/32"
        ));
    }

    #[test]
    fn should_reject_invalid_network() {
        let config = CubeConfig {
            network: "not-a-network".to_string(),
            ..CubeConfig::default()
        };
        assert!(matches!(discover(&config), Err(DiscoveryError::InvalidNetwork(_))));
    }
}
