use pid::Pid;

use crate::thermometer::Temperature;

/// Maximum heating power demand in watts.
pub const MAX_DEMAND_W: f32 = 6000.0;
/// Control loop rate the integral gain is normalized to.
pub const UPDATE_RATE_HZ: f32 = 100.0;

const KP: f32 = 50.0;
const KI: f32 = 5.0;

/// PI regulator producing a power demand in `[0, 6000]` watts.
pub struct PiController {
    pid: Pid<Temperature>,
}

impl PiController {
    pub fn new(target: impl Into<Temperature>) -> Self {
        let mut pid = Pid::new(target, MAX_DEMAND_W);
        pid.p(KP, MAX_DEMAND_W);
        // The integral gain is per second; scale to per-call at the tick rate.
        pid.i(KI / UPDATE_RATE_HZ, MAX_DEMAND_W);

        Self { pid }
    }
}

impl super::Controller for PiController {
    fn set_target(&mut self, target: Temperature) {
        self.pid.setpoint = target;
    }

    fn get_target(&self) -> Temperature {
        self.pid.setpoint
    }

    fn run(&mut self, temp: Temperature) -> u16 {
        let output = self.pid.next_control_output(temp).output;
        output.max(0.0) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Controller;

    #[test]
    fn demand_stays_in_range_and_saturates() {
        let mut pi = PiController::new(80.0);

        for _ in 0..1000 {
            assert!(pi.run(0.0) <= 6000);
        }
        // Integrator wound up against a persistent 80 degree error.
        assert_eq!(pi.run(0.0), 6000);
    }

    #[test]
    fn heats_below_setpoint() {
        let mut pi = PiController::new(40.0);
        assert!(pi.run(20.0) > 0);
    }

    #[test]
    fn no_demand_above_setpoint() {
        let mut pi = PiController::new(20.0);
        assert_eq!(pi.run(30.0), 0);
    }

    #[test]
    fn target_is_stored() {
        let mut pi = PiController::new(0.0);
        pi.set_target(42.0);
        assert_eq!(pi.get_target(), 42.0);
    }
}
