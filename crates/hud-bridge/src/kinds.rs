use core::fmt;

use mavlink::ardupilotmega::{MavMessage, VFR_HUD_DATA, WIND_DATA};
use mavlink::{Message, MessageData};

/// MAVLink message kinds this bridge translates.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum MessageKind {
    /// `VFR_HUD` from the common dialect
    VfrHud,
    /// `WIND`, an ArduPilot extension
    Wind,
}

impl MessageKind {
    pub const ALL: [MessageKind; 2] = [MessageKind::VfrHud, MessageKind::Wind];

    /// MAVLink message id.
    pub fn id(self) -> u32 {
        match self {
            MessageKind::VfrHud => VFR_HUD_DATA::ID,
            MessageKind::Wind => WIND_DATA::ID,
        }
    }

    /// MAVLink message name as it appears in the dialect XML.
    pub fn name(self) -> &'static str {
        match self {
            MessageKind::VfrHud => VFR_HUD_DATA::NAME,
            MessageKind::Wind => WIND_DATA::NAME,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }

    pub fn of(message: &MavMessage) -> Option<Self> {
        Self::from_id(message.message_id())
    }

    /// Lower-case label used for metrics and logs.
    pub fn label(self) -> &'static str {
        match self {
            MessageKind::VfrHud => "vfr_hud",
            MessageKind::Wind => "wind",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{name}({id})", name = self.name(), id = self.id())
    }
}
