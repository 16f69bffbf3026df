use std::io::ErrorKind;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::{Duration, Instant};

use rosc::{OscMessage, OscPacket, OscType, decoder, encoder};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::OscError;
use crate::osc::args::OscArg;
use crate::params;

/// One UDP socket plus the fixed peer it talks to.
///
/// Lifecycle is open, then any number of send/read calls, then close. The
/// peer address never changes after open. Every operation on a closed
/// transport fails with OscError::Closed; dropping an open transport
/// releases the socket like close() would.
pub struct Transport {
    socket: Option<UdpSocket>,
    peer: SocketAddr,
    timeout: Duration,
}

impl Transport {
    /// Bind the receive port and fix the peer for the lifetime of the
    /// transport. A recv_port of 0 asks the OS for a free port; see
    /// [`Transport::local_addr`].
    pub fn open(config: &Config) -> Result<Transport, OscError> {
        let peer = (config.host.as_str(), config.send_port)
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or_else(|| OscError::Resolve(format!("{}:{}", config.host, config.send_port)))?;
        let socket = UdpSocket::bind(("0.0.0.0", config.recv_port)).map_err(OscError::Bind)?;
        socket
            .set_read_timeout(Some(config.timeout()))
            .map_err(OscError::Bind)?;
        if let Ok(local) = socket.local_addr() {
            debug!("transport bound on {}, peer {}", local, peer);
        }
        Ok(Transport {
            socket: Some(socket),
            peer,
            timeout: config.timeout(),
        })
    }

    fn socket(&self) -> Result<&UdpSocket, OscError> {
        self.socket.as_ref().ok_or(OscError::Closed)
    }

    /// The local address the socket is bound to. Mostly useful when the
    /// receive port was requested as 0 and the OS picked one.
    pub fn local_addr(&self) -> Result<SocketAddr, OscError> {
        self.socket()?.local_addr().map_err(OscError::Bind)
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    pub fn is_closed(&self) -> bool {
        self.socket.is_none()
    }

    /// Encode one message and push it to the peer as a single datagram.
    ///
    /// Address and arguments are validated before anything is encoded, so a
    /// rejected call never puts partial bytes on the wire. The OS must
    /// accept the full datagram length for the send to count as a success.
    pub fn send_message(&self, path: &str, args: Vec<OscArg>) -> Result<(), OscError> {
        let socket = self.socket()?;
        params::validate_address(path)?;
        let msg = OscMessage {
            addr: path.to_string(),
            args: args.into_iter().map(OscType::from).collect(),
        };
        let buf = encoder::encode(&OscPacket::Message(msg)).map_err(OscError::Encode)?;
        let sent = socket.send_to(&buf, self.peer).map_err(OscError::Send)?;
        if sent != buf.len() {
            return Err(OscError::ShortSend {
                sent,
                expected: buf.len(),
            });
        }
        debug!("sent {} bytes to {} for {}", buf.len(), self.peer, path);
        Ok(())
    }

    /// The tagged-string surface: one raw value per type tag character,
    /// parsed per its tag before anything is sent.
    pub fn send_tagged(&self, path: &str, tags: &str, values: &[String]) -> Result<(), OscError> {
        let args = OscArg::parse_tagged(tags, values)?;
        self.send_message(path, args)
    }

    /// Query one parameter and block for the reply.
    ///
    /// The query is a bodiless message for the parameter's address; the
    /// device echoes the address back with the current value. Replies are
    /// correlated by address, so datagrams for other addresses are skipped
    /// until the configured deadline. The reply's first argument must be a
    /// float.
    pub fn read_param(&self, path: &str) -> Result<f32, OscError> {
        self.send_message(path, Vec::new())?;
        let socket = self.socket()?;
        let deadline = Instant::now() + self.timeout;
        let mut buf = [0u8; decoder::MTU];
        loop {
            let remaining = deadline
                .checked_duration_since(Instant::now())
                .filter(|d| !d.is_zero())
                .ok_or(OscError::Timeout)?;
            socket.set_read_timeout(Some(remaining)).map_err(OscError::Recv)?;
            let (size, _) = match socket.recv_from(&mut buf) {
                Ok(received) => received,
                Err(err) if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    return Err(OscError::Timeout);
                }
                Err(err) => return Err(OscError::Recv(err)),
            };
            let (_, packet) = decoder::decode_udp(&buf[..size]).map_err(OscError::Decode)?;
            let Some(msg) = first_message(packet) else {
                warn!("dropping empty bundle from {}", self.peer);
                continue;
            };
            if msg.addr != path {
                warn!("skipping reply for {} while waiting on {}", msg.addr, path);
                continue;
            }
            return match msg.args.first() {
                Some(OscType::Float(value)) => Ok(*value),
                Some(other) => Err(OscError::BadReply(format!("first argument is {:?}", other))),
                None => Err(OscError::BadReply("no arguments".to_string())),
            };
        }
    }

    /// Receive one message, bounded by the configured timeout. This is the
    /// polling half of the monitor loop; unsolicited device traffic arrives
    /// here.
    pub fn recv_message(&self) -> Result<OscMessage, OscError> {
        let socket = self.socket()?;
        socket
            .set_read_timeout(Some(self.timeout))
            .map_err(OscError::Recv)?;
        let mut buf = [0u8; decoder::MTU];
        let (size, _) = match socket.recv_from(&mut buf) {
            Ok(received) => received,
            Err(err) if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                return Err(OscError::Timeout);
            }
            Err(err) => return Err(OscError::Recv(err)),
        };
        let (_, packet) = decoder::decode_udp(&buf[..size]).map_err(OscError::Decode)?;
        first_message(packet).ok_or_else(|| OscError::BadReply("empty bundle".to_string()))
    }

    /// Release the socket. Safe to call more than once.
    pub fn close(&mut self) {
        if self.socket.take().is_some() {
            debug!("closed transport to {}", self.peer);
        }
    }
}

fn first_message(packet: OscPacket) -> Option<OscMessage> {
    match packet {
        OscPacket::Message(msg) => Some(msg),
        OscPacket::Bundle(bundle) => bundle.content.into_iter().find_map(first_message),
    }
}
