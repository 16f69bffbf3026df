use std::error;
use std::fmt;
use std::io;

/// Everything that can go wrong talking to the device.
///
/// Failures are fatal to the current call: there is no retry tier, the
/// error propagates straight back to the caller.
#[derive(Debug)]
pub enum OscError {
    Bind(io::Error),
    Resolve(String),
    Send(io::Error),
    ShortSend { sent: usize, expected: usize },
    Recv(io::Error),
    Timeout,
    Encode(rosc::OscError),
    Decode(rosc::OscError),
    Address(String),
    UnknownParam(String),
    UnsupportedTag(char),
    TagArity { tags: usize, values: usize },
    BadValue { tag: char, value: String },
    BadReply(String),
    Closed,
}

impl fmt::Display for OscError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OscError::Bind(err) => write!(f, "error binding socket: {}", err),
            OscError::Resolve(addr) => write!(f, "cannot resolve peer address {}", addr),
            OscError::Send(err) => write!(f, "error sending OSC message: {}", err),
            OscError::ShortSend { sent, expected } => {
                write!(f, "short send: {} of {} bytes accepted", sent, expected)
            }
            OscError::Recv(err) => write!(f, "error receiving OSC message: {}", err),
            OscError::Timeout => write!(f, "timed out waiting for reply"),
            OscError::Encode(err) => write!(f, "error encoding OSC packet: {:?}", err),
            OscError::Decode(err) => write!(f, "error decoding OSC packet: {:?}", err),
            OscError::Address(addr) => write!(f, "invalid OSC address pattern {:?}", addr),
            OscError::UnknownParam(name) => write!(f, "unknown parameter {:?}", name),
            OscError::UnsupportedTag(tag) => write!(f, "unsupported type tag '{}'", tag),
            OscError::TagArity { tags, values } => {
                write!(f, "{} type tags but {} values", tags, values)
            }
            OscError::BadValue { tag, value } => {
                write!(f, "cannot parse {:?} as type tag '{}'", value, tag)
            }
            OscError::BadReply(what) => write!(f, "unexpected reply: {}", what),
            OscError::Closed => write!(f, "transport is closed"),
        }
    }
}

impl error::Error for OscError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            OscError::Bind(err) | OscError::Send(err) | OscError::Recv(err) => Some(err),
            _ => None,
        }
    }
}
