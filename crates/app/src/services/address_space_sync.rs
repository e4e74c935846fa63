//! Address-space sync: moves values between the process state and the
//! remote view once per cycle.
//!
//! Commands are one-shot pulses: a remote client writes `true` to
//! `<actuator>_cmd_on` or `<actuator>_cmd_off`, the next cycle executes it
//! and resets the variable to `false`. A command that still reads `true` has
//! not been processed yet. When both pulses of an actuator are set in the
//! same cycle the actuator ends up off. A numeric pulse counts as set when
//! it is non-zero.

use greenhouse_domain::actuator::{Actuator, FeedbackKind};
use greenhouse_domain::alarm::AlarmBound;
use greenhouse_domain::mode::Mode;
use greenhouse_domain::process_image::ProcessImage;
use greenhouse_domain::sensor::SensorChannel;
use greenhouse_domain::setpoint::ControlledVariable;
use greenhouse_domain::tag::{CommandKind, Tag, TagValue};

use crate::ports::{AddressSpace, OutputPort};
use crate::process_state::ProcessState;
use crate::services::actuator_driver::ActuatorDriver;

/// Tags published outward every cycle.
fn outward_tags() -> impl Iterator<Item = Tag> {
    let sensors = SensorChannel::ALL.into_iter().map(Tag::Sensor);
    let states = Actuator::ALL.into_iter().map(Tag::ActuatorState);
    let feedback = Actuator::ALL.into_iter().flat_map(|actuator| {
        FeedbackKind::ALL
            .into_iter()
            .map(move |kind| Tag::Feedback(actuator, kind))
    });
    let alarms = ControlledVariable::ALL.into_iter().flat_map(|variable| {
        AlarmBound::ALL
            .into_iter()
            .map(move |bound| Tag::Alarm(variable, bound))
    });
    sensors.chain(states).chain(feedback).chain(alarms)
}

/// Whether a command variable holds a pulse waiting to be executed.
fn is_pending(value: TagValue) -> bool {
    match value {
        TagValue::Boolean(set) => set,
        TagValue::Double(raw) => raw.abs() > f64::EPSILON,
        TagValue::Empty => false,
    }
}

/// Tags pulled inward every cycle.
fn inward_tags() -> impl Iterator<Item = Tag> {
    ControlledVariable::ALL
        .into_iter()
        .map(Tag::Setpoint)
        .chain(Mode::ALL.into_iter().map(Tag::Mode))
}

pub struct AddressSpaceSync<A> {
    space: A,
}

impl<A: AddressSpace> AddressSpaceSync<A> {
    pub fn new(space: A) -> Self {
        Self { space }
    }

    /// Publish sensors, actuator states, feedback and alarms.
    ///
    /// A failed write is logged and the remaining tags are still published.
    pub async fn push(&self, image: &ProcessImage) {
        for tag in outward_tags() {
            if let Err(err) = self.space.write(tag, image.tag_value(tag)).await {
                tracing::warn!(tag = %tag, error = %err, "failed to publish tag");
            }
        }
    }

    /// Copy remotely writable setpoints and modes into the process state.
    ///
    /// A tag that cannot be read keeps its local value for this cycle.
    pub async fn pull(&self, state: &ProcessState) {
        for tag in inward_tags() {
            let value = match self.space.read(tag).await {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(tag = %tag, error = %err, "failed to read tag, keeping local value");
                    continue;
                }
            };
            if let Err(err) = state.update(|image| image.apply_remote(tag, value)) {
                tracing::warn!(tag = %tag, error = %err, "ignoring remote value");
            }
        }
    }

    /// Execute pending one-shot commands and reset them.
    ///
    /// A command that cannot be read or reset is logged and the remaining
    /// commands are still processed. A pulse left set runs again next cycle.
    pub async fn process_commands<O: OutputPort>(&self, driver: &mut ActuatorDriver<O>) {
        for actuator in Actuator::ALL {
            for kind in CommandKind::ALL {
                let tag = Tag::Command(actuator, kind);
                let value = match self.space.read(tag).await {
                    Ok(value) => value,
                    Err(err) => {
                        tracing::warn!(tag = %tag, error = %err, "failed to read command");
                        continue;
                    }
                };
                if !is_pending(value) {
                    continue;
                }
                if value.as_bool().is_none() {
                    tracing::debug!(tag = %tag, ?value, "treating numeric command as a pulse");
                }
                tracing::info!(tag = %tag, "processing remote command");
                driver.set(actuator, kind.target_state());
                if let Err(err) = self.space.write(tag, TagValue::Boolean(false)).await {
                    tracing::error!(tag = %tag, error = %err, "failed to reset command");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address_space::InMemoryAddressSpace;
    use greenhouse_domain::error::GreenhouseError;
    use std::future::Future;
    use std::sync::Arc;

    struct NullOutput;

    impl OutputPort for NullOutput {
        fn write(&mut self, _: Actuator, _: bool) -> Result<(), GreenhouseError> {
            Ok(())
        }
    }

    /// Address space whose reads of one tag always fail.
    struct FlakySpace {
        inner: InMemoryAddressSpace,
        broken: Tag,
    }

    impl AddressSpace for FlakySpace {
        fn write(
            &self,
            tag: Tag,
            value: TagValue,
        ) -> impl Future<Output = Result<(), GreenhouseError>> + Send {
            self.inner.write(tag, value)
        }

        fn read(
            &self,
            tag: Tag,
        ) -> impl Future<Output = Result<TagValue, GreenhouseError>> + Send {
            let result = if tag == self.broken {
                Err(GreenhouseError::AddressSpace("bad node".into()))
            } else {
                Ok(self.inner.remote_read(tag))
            };
            async move { result }
        }
    }

    /// Address space that rejects every write to a command variable.
    struct StuckCommands {
        inner: Arc<InMemoryAddressSpace>,
    }

    impl AddressSpace for StuckCommands {
        fn write(
            &self,
            tag: Tag,
            value: TagValue,
        ) -> impl Future<Output = Result<(), GreenhouseError>> + Send {
            let inner = Arc::clone(&self.inner);
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
            self.inner.read(tag)
        }
    }

    fn setup() -> (
        AddressSpaceSync<Arc<InMemoryAddressSpace>>,
        Arc<InMemoryAddressSpace>,
        ProcessState,
    ) {
        let state = ProcessState::default();
        let space = Arc::new(InMemoryAddressSpace::new(&state.read()));
        (AddressSpaceSync::new(Arc::clone(&space)), space, state)
    }

    #[test]
    fn should_cover_every_tag_once() {
        let pushed = outward_tags().count();
        let pulled = inward_tags().count();
        let commands = Actuator::ALL.len() * CommandKind::ALL.len();
        assert_eq!(pushed + pulled + commands, Tag::catalogue().len());
    }

    #[tokio::test]
    async fn should_push_readings_and_alarms() {
        let (sync, space, _) = setup();
        let mut image = ProcessImage::default();
        image.readings.temperature = Some(32.0);
        image.actuators.set(Actuator::Fan, true);
        image.refresh_alarms();

        sync.push(&image).await;

        assert_eq!(
            space.remote_read(Tag::Sensor(SensorChannel::Temperature)),
            TagValue::Double(32.0)
        );
        assert_eq!(
            space.remote_read(Tag::ActuatorState(Actuator::Fan)),
            TagValue::Boolean(true)
        );
        assert_eq!(
            space.remote_read(Tag::Alarm(ControlledVariable::Temperature, AlarmBound::Above)),
            TagValue::Boolean(true)
        );
    }

    #[tokio::test]
    async fn should_pull_setpoints_and_modes() {
        let (sync, space, state) = setup();
        space
            .remote_write(
                Tag::Setpoint(ControlledVariable::Temperature),
                TagValue::Double(25.0),
            )
            .unwrap();
        space
            .remote_write(Tag::Mode(Mode::Manual), TagValue::Boolean(true))
            .unwrap();

        sync.pull(&state).await;

        let image = state.read();
        assert!((image.setpoints.temperature - 25.0).abs() < f64::EPSILON);
        assert!(image.modes.manual_mode);
    }

    #[tokio::test]
    async fn should_keep_local_value_when_read_fails() {
        let state = ProcessState::default();
        let inner = InMemoryAddressSpace::new(&state.read());
        inner
            .remote_write(
                Tag::Setpoint(ControlledVariable::Humidity),
                TagValue::Double(10.0),
            )
            .unwrap();
        inner
            .remote_write(
                Tag::Setpoint(ControlledVariable::Light),
                TagValue::Double(500.0),
            )
            .unwrap();
        let sync = AddressSpaceSync::new(FlakySpace {
            inner,
            broken: Tag::Setpoint(ControlledVariable::Humidity),
        });

        sync.pull(&state).await;

        let image = state.read();
        assert!((image.setpoints.humidity - 70.0).abs() < f64::EPSILON);
        assert!((image.setpoints.light - 500.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn should_ignore_value_of_wrong_type() {
        let (sync, space, state) = setup();
        space
            .remote_write(Tag::Mode(Mode::SystemEnabled), TagValue::Double(0.0))
            .unwrap();

        sync.pull(&state).await;

        assert!(state.read().modes.system_enabled);
    }

    #[tokio::test]
    async fn should_execute_and_reset_turn_on_pulse() {
        let (sync, space, state) = setup();
        let mut driver = ActuatorDriver::new(NullOutput, state.clone());
        let tag = Tag::Command(Actuator::Pump, CommandKind::TurnOn);
        space.remote_write(tag, TagValue::Boolean(true)).unwrap();

        sync.process_commands(&mut driver).await;

        assert!(state.read().actuators.is_on(Actuator::Pump));
        assert_eq!(space.remote_read(tag), TagValue::Boolean(false));
    }

    #[tokio::test]
    async fn should_resolve_simultaneous_pulses_to_off() {
        let (sync, space, state) = setup();
        let mut driver = ActuatorDriver::new(NullOutput, state.clone());
        driver.set(Actuator::GrowLight, true);
        let on = Tag::Command(Actuator::GrowLight, CommandKind::TurnOn);
        let off = Tag::Command(Actuator::GrowLight, CommandKind::TurnOff);
        space.remote_write(on, TagValue::Boolean(true)).unwrap();
        space.remote_write(off, TagValue::Boolean(true)).unwrap();

        sync.process_commands(&mut driver).await;

        assert!(!state.read().actuators.is_on(Actuator::GrowLight));
        assert_eq!(space.remote_read(on), TagValue::Boolean(false));
        assert_eq!(space.remote_read(off), TagValue::Boolean(false));
    }

    #[tokio::test]
    async fn should_do_nothing_without_pulses() {
        let (sync, _, state) = setup();
        let mut driver = ActuatorDriver::new(NullOutput, state.clone());

        sync.process_commands(&mut driver).await;

        assert_eq!(state.read(), ProcessImage::default());
    }

    #[tokio::test]
    async fn should_keep_processing_when_reset_fails() {
        let state = ProcessState::default();
        let inner = Arc::new(InMemoryAddressSpace::new(&state.read()));
        let pump = Tag::Command(Actuator::Pump, CommandKind::TurnOn);
        let fan = Tag::Command(Actuator::Fan, CommandKind::TurnOn);
        inner.remote_write(pump, TagValue::Boolean(true)).unwrap();
        inner.remote_write(fan, TagValue::Boolean(true)).unwrap();
        let sync = AddressSpaceSync::new(StuckCommands {
            inner: Arc::clone(&inner),
        });
        let mut driver = ActuatorDriver::new(NullOutput, state.clone());

        sync.process_commands(&mut driver).await;

        let image = state.read();
        assert!(image.actuators.is_on(Actuator::Pump));
        assert!(image.actuators.is_on(Actuator::Fan));
        assert_eq!(inner.remote_read(pump), TagValue::Boolean(true));
    }

    #[tokio::test]
    async fn should_treat_non_zero_number_as_pulse() {
        let (sync, space, state) = setup();
        let mut driver = ActuatorDriver::new(NullOutput, state.clone());
        let on = Tag::Command(Actuator::Valve, CommandKind::TurnOn);
        let off = Tag::Command(Actuator::Exhaust, CommandKind::TurnOff);
        space.remote_write(on, TagValue::Double(1.0)).unwrap();
        space.remote_write(off, TagValue::Double(0.0)).unwrap();

        sync.process_commands(&mut driver).await;

        assert!(state.read().actuators.is_on(Actuator::Valve));
        assert_eq!(space.remote_read(on), TagValue::Boolean(false));
        assert_eq!(space.remote_read(off), TagValue::Double(0.0));
    }
}
