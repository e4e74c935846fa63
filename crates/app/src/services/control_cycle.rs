//! Control cycle: the periodic loop that ties every component together.
//!
//! One iteration:
//! 1. capture the sensor frame and evaluate alarms against it
//! 2. publish the state on the address space
//! 3. pull remote setpoints and modes
//! 4. execute pending one-shot commands
//! 5. run automatic control when enabled
//! 6. force every actuator off when the system is disabled
//! 7. persist a history entry
//!
//! The frame is read once, so a sensor update arriving mid-iteration only
//! takes effect on the next one.

use std::time::Duration;

use greenhouse_domain::alarm::Alarms;
use greenhouse_domain::control;
use greenhouse_domain::error::GreenhouseError;
use greenhouse_domain::history::HistoryEntry;
use greenhouse_domain::process_image::ProcessImage;
use greenhouse_domain::sensor::SensorReading;
use greenhouse_domain::time::now;

use crate::ports::{AddressSpace, HistoryStore, OutputPort};
use crate::process_state::ProcessState;
use crate::services::actuator_driver::ActuatorDriver;
use crate::services::address_space_sync::AddressSpaceSync;

/// Sleep durations of the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleTiming {
    /// Pause after a successful iteration.
    pub interval: Duration,
    /// Pause after a failed iteration.
    pub recovery: Duration,
}

impl Default for CycleTiming {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            recovery: Duration::from_secs(5),
        }
    }
}

pub struct ControlCycle<A, O, H> {
    state: ProcessState,
    sync: AddressSpaceSync<A>,
    driver: ActuatorDriver<O>,
    store: H,
    timing: CycleTiming,
}

impl<A, O, H> ControlCycle<A, O, H>
where
    A: AddressSpace,
    O: OutputPort,
    H: HistoryStore,
{
    pub fn new(
        state: ProcessState,
        space: A,
        driver: ActuatorDriver<O>,
        store: H,
        timing: CycleTiming,
    ) -> Self {
        Self {
            state,
            sync: AddressSpaceSync::new(space),
            driver,
            store,
            timing,
        }
    }

    /// Current state with the readings replaced by the cycle's frame.
    fn image(&self, frame: &SensorReading) -> ProcessImage {
        let mut image = self.state.read();
        image.readings = frame.clone();
        image
    }

    fn refresh_alarms(&self, frame: &SensorReading) {
        self.state.update(|image| {
            image.alarms = Alarms::evaluate(frame, &image.setpoints);
        });
    }

    /// Run a single iteration.
    ///
    /// # Errors
    ///
    /// Returns the storage error when the history entry cannot be persisted.
    /// Address-space failures are logged and never abort the iteration.
    #[tracing::instrument(skip(self))]
    pub async fn iterate(&mut self) -> Result<(), GreenhouseError> {
        let frame = self.state.read().readings;
        self.refresh_alarms(&frame);
        let alarms = self.state.read().alarms;
        if alarms.any() {
            tracing::warn!(?alarms, "alarm conditions active");
        }

        self.sync.push(&self.image(&frame)).await;
        self.sync.pull(&self.state).await;
        self.sync.process_commands(&mut self.driver).await;

        let modes = self.state.read().modes;
        if modes.automatic_control_active() {
            self.refresh_alarms(&frame);
            for decision in control::decide(&self.image(&frame)) {
                self.driver.set(decision.actuator, decision.on);
            }
        }
        if !modes.system_enabled {
            tracing::debug!("system disabled, forcing all actuators off");
            self.driver.all_off();
        }

        let entry = HistoryEntry::new(now(), self.image(&frame));
        self.store.record(entry).await?;
        tracing::debug!("cycle completed");
        Ok(())
    }

    /// Loop forever. Errors are logged and followed by the recovery pause.
    pub async fn run(mut self) {
        tracing::info!(
            interval_secs = self.timing.interval.as_secs(),
            recovery_secs = self.timing.recovery.as_secs(),
            "control cycle started"
        );
        loop {
            let pause = match self.iterate().await {
                Ok(()) => self.timing.interval,
                Err(err) => {
                    tracing::error!(error = %err, "control cycle failed");
                    self.timing.recovery
                }
            };
            tokio::time::sleep(pause).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address_space::InMemoryAddressSpace;
    use greenhouse_domain::actuator::Actuator;
    use greenhouse_domain::mode::Mode;
    use greenhouse_domain::setpoint::ControlledVariable;
    use greenhouse_domain::tag::{CommandKind, Tag, TagValue};
    use std::future::Future;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    struct NullOutput;

    impl OutputPort for NullOutput {
        fn write(&mut self, _: Actuator, _: bool) -> Result<(), GreenhouseError> {
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct MemoryStore {
        entries: Arc<Mutex<Vec<HistoryEntry>>>,
        failing: Arc<AtomicBool>,
    }

    impl HistoryStore for MemoryStore {
        fn record(
            &self,
            entry: HistoryEntry,
        ) -> impl Future<Output = Result<(), GreenhouseError>> + Send {
            let result = if self.failing.load(Ordering::SeqCst) {
                Err(GreenhouseError::Storage("disk full".into()))
            } else {
                self.entries.lock().unwrap().push(entry);
                Ok(())
            };
            async move { result }
        }
    }

    struct Harness {
        cycle: ControlCycle<Arc<InMemoryAddressSpace>, NullOutput, MemoryStore>,
        state: ProcessState,
        space: Arc<InMemoryAddressSpace>,
        store: MemoryStore,
    }

    /// Address space that rejects every write to a command variable.
    struct StuckCommands(Arc<InMemoryAddressSpace>);

    impl AddressSpace for StuckCommands {
        fn write(
            &self,
            tag: Tag,
            value: TagValue,
        ) -> impl Future<Output = Result<(), GreenhouseError>> + Send {
            let inner = Arc::clone(&self.0);
            async move {
                if matches!(tag, Tag::Command(..)) {
                    return Err(GreenhouseError::AddressSpace("node write failed".into()));
                }
                inner.write(tag, value).await
            }
        }

        fn read(
            &self,
            tag: Tag,
        ) -> impl Future<Output = Result<TagValue, GreenhouseError>> + Send {
            self.0.read(tag)
        }
    }

    fn harness() -> Harness {
        let state = ProcessState::default();
        let space = Arc::new(InMemoryAddressSpace::new(&state.read()));
        let store = MemoryStore::default();
        let cycle = ControlCycle::new(
            state.clone(),
            Arc::clone(&space),
            ActuatorDriver::new(NullOutput, state.clone()),
            store.clone(),
            CycleTiming::default(),
        );
        Harness {
            cycle,
            state,
            space,
            store,
        }
    }

    #[tokio::test]
    async fn should_cool_when_temperature_above_band() {
        let mut h = harness();
        h.state
            .update(|image| image.readings.temperature = Some(32.0));

        h.cycle.iterate().await.unwrap();

        let image = h.state.read();
        assert!(image.alarms.temperature.above);
        assert!(image.actuators.is_on(Actuator::Fan));
        assert!(image.actuators.is_on(Actuator::Exhaust));
    }

    #[tokio::test]
    async fn should_irrigate_when_soil_is_dry() {
        let mut h = harness();
        h.state
            .update(|image| image.readings.soil_moisture = Some(40.0));

        h.cycle.iterate().await.unwrap();

        let image = h.state.read();
        assert!(image.alarms.soil_moisture.below);
        assert!(image.actuators.is_on(Actuator::Pump));
    }

    #[tokio::test]
    async fn should_not_control_in_manual_mode() {
        let mut h = harness();
        h.state
            .update(|image| image.readings.temperature = Some(35.0));
        h.space
            .remote_write(Tag::Mode(Mode::Manual), TagValue::Boolean(true))
            .unwrap();

        h.cycle.iterate().await.unwrap();

        let image = h.state.read();
        assert!(image.modes.manual_mode);
        assert!(!image.actuators.is_on(Actuator::Fan));
        assert!(image.alarms.temperature.above);
    }

    #[tokio::test]
    async fn should_force_everything_off_when_disabled() {
        let mut h = harness();
        h.space
            .remote_write(
                Tag::Command(Actuator::Pump, CommandKind::TurnOn),
                TagValue::Boolean(true),
            )
            .unwrap();
        h.space
            .remote_write(Tag::Mode(Mode::SystemEnabled), TagValue::Boolean(false))
            .unwrap();

        h.cycle.iterate().await.unwrap();

        let image = h.state.read();
        assert!(Actuator::ALL.iter().all(|a| !image.actuators.is_on(*a)));
        assert_eq!(
            h.space
                .remote_read(Tag::Command(Actuator::Pump, CommandKind::TurnOn)),
            TagValue::Boolean(false)
        );
    }

    #[tokio::test]
    async fn should_apply_remote_setpoint_in_same_cycle() {
        let mut h = harness();
        h.state
            .update(|image| image.readings.temperature = Some(28.0));
        h.space
            .remote_write(
                Tag::Setpoint(ControlledVariable::Temperature),
                TagValue::Double(25.0),
            )
            .unwrap();

        h.cycle.iterate().await.unwrap();

        let image = h.state.read();
        assert!(image.alarms.temperature.above);
        assert!(image.actuators.is_on(Actuator::Fan));
    }

    #[tokio::test]
    async fn should_record_one_entry_per_cycle() {
        let mut h = harness();

        h.cycle.iterate().await.unwrap();
        h.cycle.iterate().await.unwrap();

        assert_eq!(h.store.entries.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn should_persist_final_actuator_states() {
        let mut h = harness();
        h.state.update(|image| image.readings.light = Some(100.0));

        h.cycle.iterate().await.unwrap();

        let entries = h.store.entries.lock().unwrap();
        assert!(entries[0].image().actuators.is_on(Actuator::GrowLight));
        assert_eq!(entries[0].image().readings.light, Some(100.0));
    }

    #[tokio::test]
    async fn should_surface_storage_failure() {
        let mut h = harness();
        h.store.failing.store(true, Ordering::SeqCst);

        let result = h.cycle.iterate().await;

        assert!(matches!(result, Err(GreenhouseError::Storage(_))));
    }

    #[tokio::test]
    async fn should_publish_state_on_next_cycle() {
        let mut h = harness();
        h.state
            .update(|image| image.readings.temperature = Some(32.0));

        h.cycle.iterate().await.unwrap();
        h.cycle.iterate().await.unwrap();

        assert_eq!(
            h.space.remote_read(Tag::ActuatorState(Actuator::Fan)),
            TagValue::Boolean(true)
        );
        assert_eq!(
            h.space.remote_read(Tag::Sensor(
                greenhouse_domain::sensor::SensorChannel::Temperature
            )),
            TagValue::Double(32.0)
        );
    }

    #[tokio::test]
    async fn should_force_off_and_persist_when_command_reset_fails() {
        let state = ProcessState::default();
        let space = Arc::new(InMemoryAddressSpace::new(&state.read()));
        let store = MemoryStore::default();
        let mut cycle = ControlCycle::new(
            state.clone(),
            StuckCommands(Arc::clone(&space)),
            ActuatorDriver::new(NullOutput, state.clone()),
            store.clone(),
            CycleTiming::default(),
        );
        space
            .remote_write(
                Tag::Command(Actuator::Pump, CommandKind::TurnOn),
                TagValue::Boolean(true),
            )
            .unwrap();
        space
            .remote_write(Tag::Mode(Mode::SystemEnabled), TagValue::Boolean(false))
            .unwrap();

        cycle.iterate().await.unwrap();

        let image = state.read();
        assert!(!image.modes.system_enabled);
        assert!(!image.actuators.is_on(Actuator::Pump));
        assert_eq!(store.entries.lock().unwrap().len(), 1);
    }
}
