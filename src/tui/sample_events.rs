use chrono::{Days, Local, NaiveDate};
use event_desk::{
    events::{event::DATE_FORMAT, Event, EventId},
    sync::in_memory::InMemoryEventStore,
};

/// Offline store seeded with a handful of events around today.
pub fn sample_store() -> InMemoryEventStore {
    InMemoryEventStore::with_events(sample_events(Local::now().date_naive()))
}

fn sample_events(today: NaiveDate) -> Vec<Event> {
    let samples = [
        ("Sprint Planning", 0, 0),
        ("Design Review", 1, 1),
        ("Team Offsite", 7, 9),
        ("Quarterly Report Due", 14, 14),
        ("Conference Trip", 30, 33),
    ];

    samples
        .into_iter()
        .enumerate()
        .filter_map(|(i, (name, start_offset, end_offset))| {
            let start = today.checked_add_days(Days::new(start_offset))?;
            let end = today.checked_add_days(Days::new(end_offset))?;
            Some(Event {
                id: EventId(i as u64 + 1),
                event_name: name.to_string(),
                start_date: start.format(DATE_FORMAT).to_string(),
                end_date: end.format(DATE_FORMAT).to_string(),
            })
        })
        .collect()
}
