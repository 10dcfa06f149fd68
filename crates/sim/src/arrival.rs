//! Arrival handling: reactant reclaim, time-acceleration cancel, and the arrival notice.

use voyage_geodesy::Coordinates;
use voyage_power::EnergyLedger;

use crate::host::{ArrivalNotice, HostContext, NotificationSink};

const ARRIVAL_TITLE: &str = "Rover arrived";

/// Warp rate index the host can drop to without a smooth ramp.
const INSTANT_DEWARP_CEILING: u32 = 3;

/// Details of a completed trip.
#[derive(Debug, Clone, Copy)]
pub struct Arrival<'a> {
    pub vessel_name: &'a str,
    pub body: &'a str,
    pub target: Coordinates,
    pub distance_travelled: f64,
}

/// Finalizes a trip once the rover has been committed at its target.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrivalHandler {
    pub auto_dewarp: bool,
}

impl ArrivalHandler {
    pub fn new(auto_dewarp: bool) -> Self {
        Self { auto_dewarp }
    }

    pub fn handle(
        &self,
        arrival: Arrival<'_>,
        ledger: &mut EnergyLedger<'_>,
        host: &mut dyn HostContext,
        sink: &mut dyn NotificationSink,
    ) -> ArrivalNotice {
        let net_consumed = ledger.pool().consumed();
        if !ledger.reclaim(net_consumed) {
            log::warn!(
                "{}: not enough reactants left to reclaim {net_consumed:.1} charge",
                arrival.vessel_name
            );
        }

        if self.auto_dewarp {
            if host.time_warp_rate() > INSTANT_DEWARP_CEILING {
                host.set_time_warp_rate(INSTANT_DEWARP_CEILING, true);
            }
            if host.time_warp_rate() > 0 {
                host.set_time_warp_rate(0, false);
            }
            host.post_screen_message(&format!(
                "{} has arrived to destination at {}",
                arrival.vessel_name, arrival.body
            ));
        }

        let notice = ArrivalNotice {
            title: ARRIVAL_TITLE.to_string(),
            vessel_name: arrival.vessel_name.to_string(),
            latitude: arrival.target.latitude,
            longitude: arrival.target.longitude,
            body: arrival.body.to_string(),
            distance_travelled: arrival.distance_travelled,
        };
        log::info!("{notice}");
        sink.notify(notice.clone());
        notice
    }
}
