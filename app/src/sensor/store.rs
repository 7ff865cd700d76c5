use chrono::{DateTime, Duration, Utc};
use irrigo_core::error::ValidationError;
use irrigo_core::{IrrigationEvent, IrrigationStatus};

/// The only mutable server state, shared by every client
pub struct IrrigationStore {
    irrigating: bool,
    last_irrigation: DateTime<Utc>,
    events: Vec<IrrigationEvent>,
}

impl IrrigationStore {
    pub fn new(last_irrigation: DateTime<Utc>, events: Vec<IrrigationEvent>) -> Self {
        IrrigationStore {
            irrigating: false,
            last_irrigation,
            events,
        }
    }

    pub fn status(&self) -> IrrigationStatus {
        IrrigationStatus::from(self.irrigating)
    }

    pub fn last_irrigation(&self) -> DateTime<Utc> {
        self.last_irrigation
    }

    pub fn upcoming(&self) -> &[IrrigationEvent] {
        &self.events
    }

    pub fn next_event(&self) -> Option<&IrrigationEvent> {
        self.events.first()
    }

    /// Turning irrigation on stamps `now` as the last irrigation
    pub fn set_irrigation(&mut self, irrigating: bool, now: DateTime<Utc>) {
        self.irrigating = irrigating;
        if irrigating {
            self.last_irrigation = now;
        }
    }

    /// Pushes the first scheduled event back, the delay must be positive
    pub fn delay_next_event(&mut self, delay: Duration) -> Result<(), ValidationError> {
        if let Some(event) = self.events.first_mut() {
            event.scheduled_at = event
                .scheduled_at
                .checked_add_signed(delay)
                .ok_or(ValidationError::DelayOutOfRange(delay.num_minutes() as f64))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn event(id: &str, scheduled_at: DateTime<Utc>) -> IrrigationEvent {
        IrrigationEvent {
            id: id.to_owned(),
            zone: "Zone 1".to_owned(),
            scheduled_at,
            duration_minutes: 20,
            reason: "Routine schedule".to_owned(),
        }
    }

    fn build_store(now: DateTime<Utc>) -> IrrigationStore {
        IrrigationStore::new(
            now - Duration::hours(1),
            vec![
                event("evt-1", now + Duration::minutes(4)),
                event("evt-2", now + Duration::minutes(10)),
            ],
        )
    }

    #[test]
    fn test_initial_state() {
        let now = Utc::now();
        let store = build_store(now);

        assert_eq!(IrrigationStatus::Off, store.status());
        assert_eq!(now - Duration::hours(1), store.last_irrigation());
        assert_eq!("evt-1", store.next_event().unwrap().id);
    }

    #[test]
    fn test_start_stamps_last_irrigation() {
        let now = Utc::now();
        let mut store = build_store(now);
        let later = now + Duration::minutes(3);

        store.set_irrigation(true, later);

        assert_eq!(IrrigationStatus::On, store.status());
        assert_eq!(later, store.last_irrigation());
    }

    #[test]
    fn test_stop_keeps_last_irrigation() {
        let now = Utc::now();
        let mut store = build_store(now);
        store.set_irrigation(true, now);

        store.set_irrigation(false, now + Duration::minutes(30));

        assert_eq!(IrrigationStatus::Off, store.status());
        assert_eq!(now, store.last_irrigation());
    }

    #[test]
    fn test_delay_only_moves_first_event() {
        let now = Utc::now();
        let mut store = build_store(now);

        store.delay_next_event(Duration::minutes(60)).unwrap();
        store.delay_next_event(Duration::minutes(60)).unwrap();

        let upcoming = store.upcoming();
        assert_eq!(now + Duration::minutes(124), upcoming[0].scheduled_at);
        assert_eq!(now + Duration::minutes(10), upcoming[1].scheduled_at);
    }

    #[test]
    fn test_delay_without_events() {
        let mut store = IrrigationStore::new(Utc::now(), vec![]);

        assert!(store.delay_next_event(Duration::minutes(5)).is_ok());
        assert!(store.next_event().is_none());
    }

    #[test]
    fn test_delay_overflow_keeps_event() {
        let now = Utc::now();
        let mut store = build_store(now);

        let res = store.delay_next_event(Duration::milliseconds(i64::MAX / 2));

        assert!(res.is_err());
        assert_eq!(now + Duration::minutes(4), store.upcoming()[0].scheduled_at);
    }
}
