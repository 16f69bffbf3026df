use crate::config::Config;
use crate::error::OscError;
use crate::osc::args::OscArg;
use crate::osc::transport::Transport;
use crate::traits::{Query, Set};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StripKind {
    Input,
    Playback,
    Output,
}

impl StripKind {
    fn segment(self) -> &'static str {
        match self {
            StripKind::Input => "input",
            StripKind::Playback => "playback",
            StripKind::Output => "output",
        }
    }
}

/// The mixer object model over one transport.
///
/// Endpoints borrow the device's transport, so the usual shape is
/// `device.input(3).volume().set(0.8)`.
pub struct Device {
    transport: Transport,
}

impl Device {
    pub fn open(config: &Config) -> Result<Device, OscError> {
        Ok(Device {
            transport: Transport::open(config)?,
        })
    }

    pub fn new(transport: Transport) -> Device {
        Device { transport }
    }

    pub fn input(&self, index: u16) -> Strip<'_> {
        Strip {
            transport: &self.transport,
            kind: StripKind::Input,
            index,
        }
    }

    pub fn playback(&self, index: u16) -> Strip<'_> {
        Strip {
            transport: &self.transport,
            kind: StripKind::Playback,
            index,
        }
    }

    pub fn output(&self, index: u16) -> Strip<'_> {
        Strip {
            transport: &self.transport,
            kind: StripKind::Output,
            index,
        }
    }

    /// /main/volume
    pub fn main_volume(&self) -> Volume<'_> {
        Volume {
            transport: &self.transport,
            addr: "/main/volume".to_string(),
        }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn close(&mut self) {
        self.transport.close();
    }
}

/// One channel strip (input, playback, or output) on the mixer.
pub struct Strip<'a> {
    transport: &'a Transport,
    kind: StripKind,
    index: u16,
}

impl Strip<'_> {
    fn endpoint(&self, leaf: &str) -> String {
        format!("/{}/{}/{}", self.kind.segment(), self.index, leaf)
    }

    pub fn volume(&self) -> Volume<'_> {
        Volume {
            transport: self.transport,
            addr: self.endpoint("volume"),
        }
    }

    pub fn mute(&self) -> Mute<'_> {
        Mute {
            transport: self.transport,
            addr: self.endpoint("mute"),
        }
    }

    pub fn pan(&self) -> Pan<'_> {
        Pan {
            transport: self.transport,
            addr: self.endpoint("pan"),
        }
    }
}

pub struct Volume<'a> {
    transport: &'a Transport,
    addr: String,
}

/// /{strip}/{index}/volume, fader position normalized to 0.0..=1.0
impl Set<f32> for Volume<'_> {
    type Error = OscError;
    fn set(&mut self, value: f32) -> Result<(), OscError> {
        self.transport
            .send_message(&self.addr, vec![OscArg::Float(value)])
    }
}

impl Query for Volume<'_> {
    type Output = f32;
    type Error = OscError;
    fn query(&self) -> Result<f32, OscError> {
        self.transport.read_param(&self.addr)
    }
}

pub struct Mute<'a> {
    transport: &'a Transport,
    addr: String,
}

/// /{strip}/{index}/mute, 0 or 1 on the wire
impl Set<bool> for Mute<'_> {
    type Error = OscError;
    fn set(&mut self, value: bool) -> Result<(), OscError> {
        let flag = if value { 1 } else { 0 };
        self.transport
            .send_message(&self.addr, vec![OscArg::Int(flag)])
    }
}

impl Query for Mute<'_> {
    type Output = bool;
    type Error = OscError;
    fn query(&self) -> Result<bool, OscError> {
        Ok(self.transport.read_param(&self.addr)? != 0.0)
    }
}

pub struct Pan<'a> {
    transport: &'a Transport,
    addr: String,
}

/// /{strip}/{index}/pan, -1.0 (hard left) to 1.0 (hard right)
impl Set<f32> for Pan<'_> {
    type Error = OscError;
    fn set(&mut self, value: f32) -> Result<(), OscError> {
        self.transport
            .send_message(&self.addr, vec![OscArg::Float(value)])
    }
}

impl Query for Pan<'_> {
    type Output = f32;
    type Error = OscError;
    fn query(&self) -> Result<f32, OscError> {
        self.transport.read_param(&self.addr)
    }
}
