use anyhow::Result;
use chrono::NaiveDate;
use rand::seq::IndexedRandom;
use rand::Rng;

use vms_types::{NewEvent, RowId, UserRole};

use crate::db::repositories::{EventRepository, UserRepository};
use crate::fakes;
use crate::seed::{SeedContext, Seeder};

pub struct EventSeeder;

impl Seeder for EventSeeder {
    fn name(&self) -> &'static str {
        "events"
    }

    fn seed(&self, ctx: &mut SeedContext<'_>) -> Result<usize> {
        let organizer_ids = UserRepository::new(ctx.conn).ids_by_role(UserRole::Organizer)?;
        if organizer_ids.is_empty() {
            tracing::warn!("No organizers found, skipping events");
            return Ok(0);
        }

        tracing::info!("Creating {} events", ctx.plan.events);
        let events = generate_events(&mut ctx.rng, ctx.today, ctx.plan.events, &organizer_ids);
        EventRepository::new(ctx.conn).insert_many(&events)
    }
}

/// `count` events owned by random organizers; empty when there are no organizers
pub fn generate_events<R: Rng + ?Sized>(
    rng: &mut R,
    today: NaiveDate,
    count: usize,
    organizer_ids: &[RowId],
) -> Vec<NewEvent> {
    let mut events = Vec::with_capacity(count);
    for _ in 0..count {
        let Some(&created_by_user_id) = organizer_ids.choose(rng) else {
            break;
        };
        let name = fakes::event_name(rng);
        events.push(NewEvent {
            date: fakes::event_date(rng, today),
            description: Some(fakes::description(rng)),
            location_address: Some(fakes::address(rng)),
            image_url: Some(fakes::event_banner_url(&name)),
            name,
            created_by_user_id,
        });
    }
    events
}
