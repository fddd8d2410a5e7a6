use std::sync::Arc;

use mavlink::ardupilotmega::MavMessage;
use telemetry_sink::PublishSink;
use tracing::info;

use crate::dispatcher::{Clock, DispatchOutcome, Dispatcher, HandlerEntry};
use crate::translate::{handle_vfr_hud, handle_wind};
use crate::{BridgeConfig, BridgeMetrics, MessageKind};

/// A component the host router can feed decoded messages to.
pub trait BridgePlugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// The (kind, handler) pairs this component wants routed to it.
    fn subscriptions(&self) -> &[HandlerEntry];

    fn dispatch(&self, message: &MavMessage) -> DispatchOutcome;
}

/// Publishes `VFR_HUD` as HUD reports and ArduPilot `WIND` as wind estimates.
pub struct VfrHudBridge {
    dispatcher: Dispatcher,
}

impl VfrHudBridge {
    /// Fixed registration table, in order.
    pub fn register_all() -> Vec<HandlerEntry> {
        vec![
            HandlerEntry::new(MessageKind::VfrHud, handle_vfr_hud),
            HandlerEntry::new(MessageKind::Wind, handle_wind),
        ]
    }

    pub fn new(config: &BridgeConfig, sink: Arc<dyn PublishSink>) -> Self {
        let dispatcher = Dispatcher::new(Self::register_all(), sink)
            .with_topics(config.topics.clone())
            .with_validation(config.validate_inputs);
        info!(
            vfr_hud = %config.topics.vfr_hud,
            wind_estimation = %config.topics.wind_estimation,
            validate = config.validate_inputs,
            "vfr_hud bridge registered"
        );
        Self { dispatcher }
    }

    pub fn with_metrics(mut self, metrics: BridgeMetrics) -> Self {
        self.dispatcher = self.dispatcher.with_metrics(metrics);
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.dispatcher = self.dispatcher.with_clock(clock);
        self
    }
}

impl BridgePlugin for VfrHudBridge {
    fn name(&self) -> &'static str {
        "vfr_hud"
    }

    fn subscriptions(&self) -> &[HandlerEntry] {
        self.dispatcher.entries()
    }

    fn dispatch(&self, message: &MavMessage) -> DispatchOutcome {
        self.dispatcher.dispatch(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mavlink::ardupilotmega::{SYSTEM_TIME_DATA, VFR_HUD_DATA, WIND_DATA};
    use telemetry_sink::RecordingSink;
    use time::OffsetDateTime;

    #[test]
    fn test_register_all_is_fixed_and_ordered() {
        let ids: Vec<u32> = VfrHudBridge::register_all()
            .iter()
            .map(|e| e.id())
            .collect();
        assert_eq!(ids, vec![74, 168]);

        let again: Vec<MessageKind> = VfrHudBridge::register_all()
            .iter()
            .map(|e| e.kind)
            .collect();
        assert_eq!(again, vec![MessageKind::VfrHud, MessageKind::Wind]);
    }

    #[test]
    fn test_one_output_per_supported_kind() {
        let sink = Arc::new(RecordingSink::new());
        let bridge = VfrHudBridge::new(&BridgeConfig::default(), sink.clone())
            .with_clock(|| OffsetDateTime::UNIX_EPOCH);

        bridge.dispatch(&MavMessage::VFR_HUD(VFR_HUD_DATA {
            airspeed: 12.5,
            groundspeed: 11.0,
            alt: 120.3,
            climb: 0.5,
            heading: 180,
            throttle: 75,
        }));
        bridge.dispatch(&MavMessage::WIND(WIND_DATA {
            direction: 0.0,
            speed: 5.0,
            speed_z: 0.0,
        }));
        let outcome = bridge.dispatch(&MavMessage::SYSTEM_TIME(SYSTEM_TIME_DATA {
            time_unix_usec: 0,
            time_boot_ms: 0,
        }));
        assert!(outcome.is_ignored());

        let huds = sink.on_topic("vfr_hud");
        let winds = sink.on_topic("wind_estimation");
        assert_eq!(huds.len(), 1);
        assert_eq!(winds.len(), 1);
        assert_eq!(sink.len(), 2);

        let report = huds[0].as_vfr_hud().unwrap();
        assert_eq!(report.airspeed, 12.5);
        assert_eq!(report.groundspeed, 11.0);
        assert_eq!(report.heading, 180);
        assert_eq!(report.throttle, 0.75);
        assert_eq!(report.altitude, 120.3);
        assert_eq!(report.climb, 0.5);

        let v = winds[0].as_wind_estimate().unwrap().linear_velocity;
        assert_eq!((v.x, v.y, v.z), (0.0, 5.0, 0.0));
    }

    #[test]
    fn test_subscriptions_match_registration() {
        let bridge = VfrHudBridge::new(&BridgeConfig::default(), Arc::new(RecordingSink::new()));
        assert_eq!(bridge.name(), "vfr_hud");
        let ids: Vec<u32> = bridge.subscriptions().iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![74, 168]);
    }
}
